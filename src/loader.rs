//! Loads a city's trips and applies the month/day filters.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info};

use crate::config::CityRegistry;
use crate::filters::{DayFilter, FilterSelection, MonthFilter};
use crate::parser::{TripRecord, parse_trips};

/// The working table for one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripTable {
    rows: Vec<TripRecord>,
}

impl TripTable {
    pub fn new(rows: Vec<TripRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TripRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Reads the selected city's file and returns the rows matching the month
/// and day filters.
///
/// # Errors
///
/// Fails if the city is not in the registry, or its file is missing,
/// unreadable, or contains a malformed row.
#[tracing::instrument(
    skip(registry, selection),
    fields(city = %selection.city, month = %selection.month, day = %selection.day)
)]
pub fn load_data(registry: &CityRegistry, selection: &FilterSelection) -> Result<TripTable> {
    let entry = registry.resolve(&selection.city)?;

    // File handle is dropped before filtering.
    let rows = {
        let file = File::open(&entry.file)
            .with_context(|| format!("failed to open trip data {}", entry.file.display()))?;
        parse_trips(BufReader::new(file))
            .with_context(|| format!("failed to read trip data {}", entry.file.display()))?
    };
    debug!(rows = rows.len(), path = %entry.file.display(), "Trip file read");

    let table = apply_filters(TripTable::new(rows), selection.month, selection.day);
    info!(rows = table.len(), "Working table ready");

    Ok(table)
}

/// Keeps only rows whose derived month and weekday match the filters.
/// Applying the same filters twice yields the same table.
pub fn apply_filters(table: TripTable, month: MonthFilter, day: DayFilter) -> TripTable {
    let month = month.ordinal();
    let day = day.name();

    let rows = table
        .rows
        .into_iter()
        .filter(|t| month.is_none_or(|m| t.month == m))
        .filter(|t| day.is_none_or(|d| t.day_of_week == d))
        .collect();

    TripTable { rows }
}
