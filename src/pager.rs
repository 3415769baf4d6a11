//! Shows the working table five rows at a time.

use anyhow::Result;
use tracing::debug;

use crate::loader::TripTable;
use crate::output::rows_table;
use crate::prompt::{Prompter, ask_yes_no};

pub const WINDOW: usize = 5;

/// Offers to print raw rows, then prints successive windows of [`WINDOW`]
/// rows while the user keeps answering yes. Returns the number of windows
/// shown.
///
/// An invalid first answer gets exactly one more chance; anything but "yes"
/// the second time means no. A window is only shown when a full [`WINDOW`]
/// rows remain, so a trailing partial window is never printed.
pub fn display_raw_data<P: Prompter + ?Sized>(
    prompter: &mut P,
    table: &TripTable,
) -> Result<usize> {
    const QUESTION: &str = "Would you like to see 5 lines of raw data? Enter yes or no.";
    const MORE: &str = "Would you like to see 5 more rows? Enter yes or no.";

    let wanted = match ask_yes_no(prompter, QUESTION)? {
        Some(answer) => answer,
        None => {
            prompter.say("Please answer yes or no.")?;
            ask_yes_no(prompter, QUESTION)? == Some(true)
        }
    };
    if !wanted {
        return Ok(0);
    }

    let rows = table.rows();
    let mut offset = 0;
    let mut shown = 0;

    while offset + WINDOW <= rows.len() {
        let window = &rows[offset..offset + WINDOW];
        writeln!(prompter.out(), "{}", rows_table(offset, window))?;
        shown += 1;
        offset += WINDOW;

        if ask_yes_no(prompter, MORE)? != Some(true) {
            break;
        }
    }

    debug!(windows = shown, rows = rows.len(), "Raw data paging finished");
    Ok(shown)
}
