//! City registry: which cities exist and where their trip files live.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while resolving a city against the registry.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown city '{0}'")]
    UnknownCity(String),

    #[error("city registry is empty")]
    Empty,
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CityEntry {
    /// Display name, e.g. `New York City`.
    pub name: String,
    /// Path of the trip CSV. Relative paths resolve against the data directory.
    pub file: PathBuf,
    /// Whether the file carries `Gender` and `Birth Year` columns.
    #[serde(default = "default_true")]
    pub has_demographics: bool,
}

fn default_true() -> bool {
    true
}

/// Immutable mapping from city name (case-insensitive) to its trip file.
///
/// Stored on disk as a JSON array:
/// ```json
/// [
///   { "name": "Chicago", "file": "chicago.csv" },
///   { "name": "Washington", "file": "washington.csv", "has_demographics": false }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct CityRegistry {
    entries: Vec<CityEntry>,
}

impl CityRegistry {
    /// The three stock cities, with files resolved under `data_dir`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        let entry = |name: &str, file: &str, has_demographics| CityEntry {
            name: name.to_string(),
            file: dir.join(file),
            has_demographics,
        };

        Self {
            entries: vec![
                entry("Chicago", "chicago.csv", true),
                entry("New York City", "new_york_city.csv", true),
                entry("Washington", "washington.csv", false),
            ],
        }
    }

    /// Loads the registry from a JSON file at `path`, resolving relative file
    /// paths against `data_dir`.
    pub fn load(path: impl AsRef<Path>, data_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let entries: Vec<CityEntry> = serde_json::from_str(&content)?;
        Self::from_entries(entries, data_dir)
    }

    pub fn from_entries(
        entries: Vec<CityEntry>,
        data_dir: impl AsRef<Path>,
    ) -> anyhow::Result<Self> {
        if entries.is_empty() {
            return Err(ConfigError::Empty.into());
        }

        let entries = entries
            .into_iter()
            .map(|mut e| {
                if e.file.is_relative() {
                    e.file = data_dir.as_ref().join(&e.file);
                }
                e
            })
            .collect();

        Ok(Self { entries })
    }

    /// Looks up a city by name, ignoring case and surrounding whitespace.
    pub fn get(&self, city: &str) -> Option<&CityEntry> {
        let city = city.trim();
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(city))
    }

    pub fn resolve(&self, city: &str) -> Result<&CityEntry, ConfigError> {
        self.get(city)
            .ok_or_else(|| ConfigError::UnknownCity(city.to_string()))
    }

    /// Display names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}
