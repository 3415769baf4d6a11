//! Month and day-of-week filters applied to a city's trip table.

use chrono::{Month, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Months covered by the trip data, in calendar order.
pub const MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("'{0}' is not a valid month; expected January through June or 'all'")]
    InvalidMonth(String),

    #[error("'{0}' is not a valid day of the week; expected a weekday name or 'all'")]
    InvalidDay(String),
}

/// Full English weekday name (`Monday`, not `Mon`).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// 1-based month number to match, or `None` for no filtering.
    pub fn ordinal(&self) -> Option<u32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Only(m) => Some(m.number_from_month()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        MONTHS
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .map(|m| MonthFilter::Only(*m))
            .ok_or_else(|| FilterError::InvalidMonth(s.to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => f.write_str(m.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Title-case weekday name to match, or `None` for no filtering.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            DayFilter::All => None,
            DayFilter::Only(d) => Some(weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .iter()
            .find(|d| weekday_name(**d).eq_ignore_ascii_case(wanted))
            .map(|d| DayFilter::Only(*d))
            .ok_or_else(|| FilterError::InvalidDay(s.to_string()))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("all"))
    }
}

/// The validated (city, month, day) triple for one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSelection {
    /// Canonical registry name of the city.
    pub city: String,
    #[serde(serialize_with = "serialize_display")]
    pub month: MonthFilter,
    #[serde(serialize_with = "serialize_display")]
    pub day: DayFilter,
}

fn serialize_display<T: fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_parse_case_insensitive() {
        assert_eq!(
            "JUNE".parse::<MonthFilter>(),
            Ok(MonthFilter::Only(Month::June))
        );
        assert_eq!(
            " january ".parse::<MonthFilter>(),
            Ok(MonthFilter::Only(Month::January))
        );
        assert_eq!("All".parse::<MonthFilter>(), Ok(MonthFilter::All));
    }

    #[test]
    fn test_month_outside_range_rejected() {
        assert_eq!(
            "july".parse::<MonthFilter>(),
            Err(FilterError::InvalidMonth("july".to_string()))
        );
        assert!("".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_month_ordinal() {
        assert_eq!(MonthFilter::All.ordinal(), None);
        assert_eq!(MonthFilter::Only(Month::March).ordinal(), Some(3));
        assert_eq!(MonthFilter::Only(Month::June).ordinal(), Some(6));
    }

    #[test]
    fn test_day_parse() {
        assert_eq!(
            "wednesday".parse::<DayFilter>(),
            Ok(DayFilter::Only(Weekday::Wed))
        );
        assert_eq!("ALL".parse::<DayFilter>(), Ok(DayFilter::All));
        assert!("wed".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_day_name_is_title_case() {
        assert_eq!(DayFilter::Only(Weekday::Sat).name(), Some("Saturday"));
        assert_eq!(DayFilter::All.name(), None);
        assert_eq!(DayFilter::Only(Weekday::Thu).to_string(), "Thursday");
    }

    #[test]
    fn test_selection_serializes_filters_as_names() {
        let selection = FilterSelection {
            city: "Chicago".to_string(),
            month: MonthFilter::Only(Month::June),
            day: DayFilter::All,
        };

        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["month"], "June");
        assert_eq!(json["day"], "all");
    }
}
