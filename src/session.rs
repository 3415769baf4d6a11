//! The interactive prompt → load → report → page loop.

use anyhow::Result;
use tracing::info;

use crate::config::CityRegistry;
use crate::loader::load_data;
use crate::output::write_report;
use crate::pager::display_raw_data;
use crate::prompt::{InputClosed, Prompter, get_filters};
use crate::stats::compute_all;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    DecideRestart,
    Terminal,
}

/// Runs passes until the user declines to restart. Returns the number of
/// completed passes.
///
/// # Errors
///
/// A trip file that cannot be read ends the session with an error. Closed
/// console input ends it cleanly.
pub fn run<P: Prompter + ?Sized>(prompter: &mut P, registry: &CityRegistry) -> Result<usize> {
    let mut state = State::Active;
    let mut passes = 0;

    while state != State::Terminal {
        state = match state {
            State::Active => match run_pass(prompter, registry) {
                Ok(()) => {
                    passes += 1;
                    State::DecideRestart
                }
                Err(e) if is_closed_input(&e) => State::Terminal,
                Err(e) => return Err(e),
            },
            State::DecideRestart => {
                match prompter.input("\nWould you like to restart? Enter yes or no.") {
                    Ok(answer) if answer.eq_ignore_ascii_case("yes") => State::Active,
                    Ok(_) => State::Terminal,
                    Err(e) if is_closed_input(&e) => State::Terminal,
                    Err(e) => return Err(e),
                }
            }
            State::Terminal => State::Terminal,
        };
    }

    info!(passes, "Session finished");
    Ok(passes)
}

/// One full pass. The working table lives only for the duration of this call.
fn run_pass<P: Prompter + ?Sized>(prompter: &mut P, registry: &CityRegistry) -> Result<()> {
    let selection = get_filters(prompter, registry)?;
    let entry = registry.resolve(&selection.city)?;

    let table = load_data(registry, &selection)?;
    let report = compute_all(&table, &selection, entry.has_demographics);
    write_report(prompter.out(), &report)?;

    display_raw_data(prompter, &table)?;
    Ok(())
}

fn is_closed_input(e: &anyhow::Error) -> bool {
    e.downcast_ref::<InputClosed>().is_some()
}
