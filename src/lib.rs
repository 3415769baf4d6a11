pub mod config;
pub mod filters;
pub mod loader;
pub mod output;
pub mod pager;
pub mod parser;
pub mod prompt;
pub mod session;
pub mod stats;
