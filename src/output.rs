//! Console rendering and persistence for statistics and trip rows.
//!
//! Supports plain-text report sections, JSON serialization, and CSV export of
//! the working table.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table, presets};
use csv::WriterBuilder;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::loader::TripTable;
use crate::parser::TripRecord;
use crate::stats::StatsReport;
use crate::stats::utility::ValueCount;

pub fn separator() -> String {
    "-".repeat(40)
}

/// Two-column table of distinct values and how often they occur.
pub fn counts_table(header: &str, counts: &[ValueCount]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(vec![Cell::new(header), Cell::new("Count")]);

    for c in counts {
        table.add_row(vec![Cell::new(&c.value), Cell::new(c.count)]);
    }

    table
}

/// Table of raw trips. `offset` is the row number of the first trip.
pub fn rows_table(offset: usize, rows: &[TripRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "#",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
        "Gender",
        "Birth Year",
    ]);

    for (i, trip) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(offset + i),
            Cell::new(trip.start_time.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(trip.end_time.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(trip.trip_duration),
            Cell::new(&trip.start_station),
            Cell::new(&trip.end_station),
            Cell::new(trip.user_type.as_deref().unwrap_or("")),
            Cell::new(trip.gender.as_deref().unwrap_or("")),
            Cell::new(
                trip.birth_year
                    .map(|y| (y as i64).to_string())
                    .unwrap_or_default(),
            ),
        ]);
    }

    table
}

/// Writes one reporter's section: banner, body, timing, separator.
pub fn write_section<W: Write + ?Sized>(
    out: &mut W,
    title: &str,
    body: &impl Display,
    elapsed_secs: f64,
) -> Result<()> {
    writeln!(out, "\n{title}\n")?;
    writeln!(out, "{body}")?;
    writeln!(out, "\nThis took {elapsed_secs:.6} seconds.")?;
    writeln!(out, "{}", separator())?;
    Ok(())
}

/// Writes every section of `report` as plain text.
pub fn write_report<W: Write + ?Sized>(out: &mut W, report: &StatsReport) -> Result<()> {
    write_section(
        out,
        "Calculating The Most Frequent Times of Travel...",
        &report.time.stats,
        report.time.elapsed_secs,
    )?;
    write_section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        &report.stations.stats,
        report.stations.elapsed_secs,
    )?;
    write_section(
        out,
        "Calculating Trip Duration...",
        &report.durations.stats,
        report.durations.elapsed_secs,
    )?;
    write_section(
        out,
        "Calculating User Stats...",
        &report.users.stats,
        report.users.elapsed_secs,
    )?;
    Ok(())
}

/// Writes `report` as pretty-printed JSON.
pub fn write_json<W: Write + ?Sized>(out: &mut W, report: &StatsReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes the working table to a CSV file, replacing any existing file.
///
/// The file keeps the source column names, so it can be loaded again as a
/// city's trip data.
pub fn export_table(path: impl AsRef<Path>, table: &TripTable) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = table.len(), "Exporting working table");

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for trip in table {
        writer.serialize(trip)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "Working table exported");
    Ok(())
}
