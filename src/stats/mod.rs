//! Descriptive statistics over the working table.
//!
//! Four independent reporters, each a pure function of the filtered
//! [`TripTable`]: travel times, stations and routes, trip duration, and user
//! demographics. [`compute_all`] runs them in order and records how long each
//! one took.

pub mod duration;
pub mod station;
pub mod time;
pub mod users;
pub mod utility;

use serde::Serialize;
use std::fmt::Display;
use std::time::Instant;
use tracing::info;

use crate::filters::FilterSelection;
use crate::loader::TripTable;

pub use duration::{DurationStats, duration_stats};
pub use station::{StationStats, station_stats};
pub use time::{TimeStats, time_stats};
pub use users::{Demographics, NO_DEMOGRAPHICS_NOTICE, UserStats, user_stats};

/// Shown in place of a statistic that cannot be computed on an empty table.
pub const NO_DATA: &str = "unavailable (no trips match the selected filters)";

pub(crate) fn or_no_data<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| v.to_string())
}

/// A reporter's result together with its wall-clock computation time.
#[derive(Debug, Clone, Serialize)]
pub struct Timed<T> {
    #[serde(flatten)]
    pub stats: T,
    pub elapsed_secs: f64,
}

/// Runs `f`, measuring how long it takes and logging the elapsed time under
/// `reporter`.
pub fn timed<T>(reporter: &'static str, f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let stats = f();
    let elapsed = start.elapsed();

    info!(
        reporter,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "Statistics computed"
    );

    Timed {
        stats,
        elapsed_secs: elapsed.as_secs_f64(),
    }
}

/// Every statistic for one pass.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub selection: FilterSelection,
    pub trips: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

/// Runs all four reporters over `table`.
pub fn compute_all(
    table: &TripTable,
    selection: &FilterSelection,
    has_demographics: bool,
) -> StatsReport {
    StatsReport {
        selection: selection.clone(),
        trips: table.len(),
        time: timed("time", || time_stats(table)),
        stations: timed("station", || station_stats(table)),
        durations: timed("duration", || duration_stats(table)),
        users: timed("users", || user_stats(table, has_demographics)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{DayFilter, MonthFilter};

    #[test]
    fn test_or_no_data() {
        assert_eq!(or_no_data(Some(7)), "7");
        assert_eq!(or_no_data(None::<u32>), NO_DATA);
    }

    #[test]
    fn test_compute_all_on_empty_table() {
        let selection = FilterSelection {
            city: "Washington".to_string(),
            month: MonthFilter::All,
            day: DayFilter::All,
        };

        let report = compute_all(&TripTable::default(), &selection, false);

        assert_eq!(report.trips, 0);
        assert_eq!(report.time.stats.most_common_month, None);
        assert!(report.users.stats.demographics.is_none());
        assert!(report.time.elapsed_secs >= 0.0);
    }

    #[test]
    fn test_timed_flattens_in_json() {
        let t = timed("test", || time_stats(&TripTable::default()));
        let json = serde_json::to_value(&t).unwrap();

        assert!(json.get("most_common_month").is_some());
        assert!(json.get("elapsed_secs").is_some());
    }
}
