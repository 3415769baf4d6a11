use chrono::Month;
use serde::Serialize;
use std::fmt;

use super::utility::mode;
use super::{NO_DATA, or_no_data};
use crate::loader::TripTable;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub most_common_month: Option<u32>,
    pub most_common_day: Option<&'static str>,
    pub most_common_hour: Option<u32>,
}

pub fn time_stats(table: &TripTable) -> TimeStats {
    TimeStats {
        most_common_month: mode(table.iter().map(|t| t.month)),
        most_common_day: mode(table.iter().map(|t| t.day_of_week)),
        most_common_hour: mode(table.iter().map(|t| t.hour)),
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = match self.most_common_month {
            Some(m) => match u8::try_from(m).ok().and_then(|n| Month::try_from(n).ok()) {
                Some(name) => format!("{} ({})", m, name.name()),
                None => m.to_string(),
            },
            None => NO_DATA.to_string(),
        };
        writeln!(f, "The most common month for bikeshare activity is {month}")?;
        writeln!(
            f,
            "The most common day for bikeshare activity is {}",
            or_no_data(self.most_common_day)
        )?;
        write!(
            f,
            "The most common hour for bikeshare activity is {}",
            or_no_data(self.most_common_hour.map(|h| format!("{h}:00")))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{TripRecord, parse_timestamp};

    fn table(starts: &[&str]) -> TripTable {
        TripTable::new(
            starts
                .iter()
                .map(|s| {
                    let ts = parse_timestamp(s).unwrap();
                    TripRecord::new(ts, ts, 60.0, "A", "B")
                })
                .collect(),
        )
    }

    #[test]
    fn test_time_stats() {
        let stats = time_stats(&table(&[
            "2017-06-01 08:00:00",
            "2017-06-01 08:30:00",
            "2017-01-02 17:00:00",
        ]));

        assert_eq!(stats.most_common_month, Some(6));
        assert_eq!(stats.most_common_day, Some("Thursday"));
        assert_eq!(stats.most_common_hour, Some(8));
    }

    #[test]
    fn test_time_stats_empty_table() {
        let stats = time_stats(&TripTable::default());

        assert_eq!(stats.most_common_month, None);
        assert!(stats.to_string().contains(NO_DATA));
    }

    #[test]
    fn test_display_names_month() {
        let stats = time_stats(&table(&["2017-06-01 08:00:00"]));
        let text = stats.to_string();

        assert!(text.contains("month for bikeshare activity is 6 (June)"));
        assert!(text.contains("day for bikeshare activity is Thursday"));
        assert!(text.contains("hour for bikeshare activity is 8:00"));
    }
}
