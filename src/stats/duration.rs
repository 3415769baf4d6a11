use serde::Serialize;
use std::fmt;

use super::or_no_data;
use super::utility::mean;
use crate::loader::TripTable;

/// Total and average trip duration, in whole seconds.
///
/// Both values are rounded half away from zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    pub total_seconds: f64,
    pub mean_seconds: Option<f64>,
}

pub fn duration_stats(table: &TripTable) -> DurationStats {
    let durations: Vec<f64> = table.iter().map(|t| t.trip_duration).collect();

    DurationStats {
        trips: durations.len(),
        // Empty float sums are -0.0; fold from +0.0 instead.
        total_seconds: durations.iter().fold(0.0, |acc, d| acc + d).round(),
        mean_seconds: mean(&durations).map(f64::round),
    }
}

/// Renders seconds as `1d 2h 3m 4s`, dropping leading zero units.
fn humanize(seconds: f64) -> String {
    let total = seconds as i64;
    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, secs) = (rem / 60, rem % 60);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{secs}s"));
    parts.join(" ")
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The total travel time was {:.0} seconds ({}) across {} trips.",
            self.total_seconds,
            humanize(self.total_seconds),
            self.trips
        )?;
        write!(
            f,
            "The average travel time was {}",
            or_no_data(
                self.mean_seconds
                    .map(|m| format!("{m:.0} seconds ({})", humanize(m)))
            )
        )
    }
}
