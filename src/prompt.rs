//! Interactive console prompts.
//!
//! [`Prompter`] is the seam between the session and the user.
//! [`TerminalPrompter`] drives a real terminal through `dialoguer`;
//! [`LinePrompter`] reads answers line by line from any reader, which covers
//! piped input and scripted sessions.

use anyhow::Result;
use dialoguer::Input;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::config::CityRegistry;
use crate::filters::{DayFilter, FilterSelection, MonthFilter};
use crate::output::separator;

/// The console reached end of input before an answer was given.
#[derive(Debug, Error)]
#[error("console input closed")]
pub struct InputClosed;

/// Asks the user questions and receives report output.
pub trait Prompter {
    /// Where report text and tables are written.
    fn out(&mut self) -> &mut dyn Write;

    /// Asks `question` and returns the trimmed answer, whatever it is.
    fn input(&mut self, question: &str) -> Result<String>;

    /// Asks `question` until `is_valid` accepts the trimmed answer, showing
    /// `invalid` after each rejected one.
    fn input_valid(
        &mut self,
        question: &str,
        invalid: &str,
        is_valid: &dyn Fn(&str) -> bool,
    ) -> Result<String>;

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.out(), "{message}")?;
        Ok(())
    }
}

/// Asks until `parse` accepts the answer and returns the parsed value.
pub fn ask_until<P, T>(
    prompter: &mut P,
    question: &str,
    invalid: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T>
where
    P: Prompter + ?Sized,
{
    loop {
        let answer = prompter.input_valid(question, invalid, &|s| parse(s).is_some())?;
        if let Some(value) = parse(&answer) {
            return Ok(value);
        }
    }
}

/// Asks a yes/no question. `Some(true)` for yes, `Some(false)` for no,
/// `None` for anything else.
pub fn ask_yes_no<P: Prompter + ?Sized>(prompter: &mut P, question: &str) -> Result<Option<bool>> {
    let answer = prompter.input(question)?;
    Ok(parse_yes_no(&answer))
}

pub fn parse_yes_no(answer: &str) -> Option<bool> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if answer.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Prompts on the terminal with `dialoguer`; report output goes to stdout.
pub struct TerminalPrompter {
    stdout: io::Stdout,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn closed_or(e: dialoguer::Error) -> anyhow::Error {
    match e {
        dialoguer::Error::IO(e)
            if matches!(
                e.kind(),
                io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
            ) =>
        {
            InputClosed.into()
        }
        e => e.into(),
    }
}

impl Prompter for TerminalPrompter {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }

    fn input(&mut self, question: &str) -> Result<String> {
        self.stdout.flush()?;
        let answer = Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(closed_or)?;
        Ok(answer.trim().to_string())
    }

    fn input_valid(
        &mut self,
        question: &str,
        invalid: &str,
        is_valid: &dyn Fn(&str) -> bool,
    ) -> Result<String> {
        self.stdout.flush()?;
        let answer = Input::<String>::new()
            .with_prompt(question)
            .validate_with(|s: &String| -> Result<(), String> {
                if is_valid(s.trim()) {
                    Ok(())
                } else {
                    debug!(answer = %s, "Rejected input");
                    Err(invalid.to_string())
                }
            })
            .interact_text()
            .map_err(closed_or)?;
        Ok(answer.trim().to_string())
    }
}

/// Reads one answer per line from `input`, echoing questions to `output`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    fn input(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;
        self.read_answer()
    }

    fn input_valid(
        &mut self,
        question: &str,
        invalid: &str,
        is_valid: &dyn Fn(&str) -> bool,
    ) -> Result<String> {
        loop {
            let answer = self.input(question)?;
            if is_valid(&answer) {
                return Ok(answer);
            }
            debug!(answer = %answer, "Rejected input");
            writeln!(self.output, "{invalid}")?;
        }
    }
}

fn list_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}

/// Asks for city, month, and day in turn, re-prompting each until it is
/// valid.
pub fn get_filters<P: Prompter + ?Sized>(
    prompter: &mut P,
    registry: &CityRegistry,
) -> Result<FilterSelection> {
    prompter.say("Hello! Let's explore some US bikeshare data!")?;

    let city_question = format!(
        "Please choose a city to investigate. You can search for {}.",
        list_names(registry.names())
    );
    let city = ask_until(
        prompter,
        &city_question,
        "The city you chose is not a valid option.",
        |answer| registry.get(answer).map(|e| e.name.clone()),
    )?;

    let month = ask_until(
        prompter,
        "Which month would you like to investigate? Select January, February, March, \
         April, May, or June. You can also enter 'all' to apply no month filter.",
        "The month you chose is not a valid option.",
        |answer| MonthFilter::from_str(answer).ok(),
    )?;

    let day = ask_until(
        prompter,
        "Which day of the week? Enter a weekday name such as Monday, or 'all' to apply \
         no day filter.",
        "The day of week you chose is not valid, please try again.",
        |answer| DayFilter::from_str(answer).ok(),
    )?;

    prompter.say(&separator())?;

    Ok(FilterSelection { city, month, day })
}
