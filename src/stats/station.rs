use serde::Serialize;
use std::fmt;

use super::or_no_data;
use super::utility::mode;
use crate::loader::TripTable;

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: Option<String>,
    pub most_common_end_station: Option<String>,
    /// `"<start>, <end>"`
    pub most_common_route: Option<String>,
}

pub fn station_stats(table: &TripTable) -> StationStats {
    StationStats {
        most_common_start_station: mode(table.iter().map(|t| t.start_station.as_str()))
            .map(str::to_string),
        most_common_end_station: mode(table.iter().map(|t| t.end_station.as_str()))
            .map(str::to_string),
        most_common_route: mode(table.iter().map(|t| t.route.as_str())).map(str::to_string),
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The most commonly used station to start a ride is {}",
            or_no_data(self.most_common_start_station.as_deref())
        )?;
        writeln!(
            f,
            "The most commonly used station to end a ride is {}",
            or_no_data(self.most_common_end_station.as_deref())
        )?;
        write!(
            f,
            "The most commonly used route for bikeshare activity is {}",
            or_no_data(self.most_common_route.as_deref())
        )
    }
}
