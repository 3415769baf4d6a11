//! CSV row parsing for bike-share trip files.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::filters::weekday_name;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single row as it appears in a city's trip file. Columns not named here
/// (such as the unnamed index column) are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// One trip, with its calendar fields and route label derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    #[serde(rename = "Start Time", serialize_with = "serialize_timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "End Time", serialize_with = "serialize_timestamp")]
    pub end_time: NaiveDateTime,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type")]
    pub user_type: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year")]
    pub birth_year: Option<f64>,

    pub month: u32,
    pub day_of_week: &'static str,
    pub hour: u32,
    pub route: String,
}

impl TripRecord {
    /// Builds a record from its source fields, deriving month, weekday, hour
    /// and route.
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        let start_station = start_station.into();
        let end_station = end_station.into();
        let route = format!("{}, {}", start_station, end_station);

        Self {
            month: start_time.month(),
            day_of_week: weekday_name(start_time.weekday()),
            hour: start_time.hour(),
            start_time,
            end_time,
            trip_duration,
            start_station,
            end_station,
            user_type: None,
            gender: None,
            birth_year: None,
            route,
        }
    }

    pub fn with_user(
        mut self,
        user_type: Option<String>,
        gender: Option<String>,
        birth_year: Option<f64>,
    ) -> Self {
        self.user_type = user_type;
        self.gender = gender;
        self.birth_year = birth_year;
        self
    }
}

/// Parses a trip timestamp such as `2017-06-23 15:09:32` (fractional seconds
/// are accepted).
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .with_context(|| format!("invalid timestamp '{s}'"))
}

fn serialize_timestamp<S: serde::Serializer>(
    ts: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(DISPLAY_FORMAT))
}

/// Reads every row of a trip CSV.
///
/// # Errors
///
/// Returns an error on the first row that fails to deserialize or whose
/// timestamps do not parse; the row number is included in the message.
pub fn parse_trips<R: Read>(reader: R) -> Result<Vec<TripRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut trips = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        let row = || format!("malformed trip on row {}", i + 1);
        let raw: RawTrip = result.with_context(row)?;
        let trip = TripRecord::new(
            parse_timestamp(&raw.start_time).with_context(row)?,
            parse_timestamp(&raw.end_time).with_context(row)?,
            raw.trip_duration,
            raw.start_station,
            raw.end_station,
        )
        .with_user(raw.user_type, raw.gender, raw.birth_year);
        trips.push(trip);
    }

    Ok(trips)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_DEMOGRAPHICS: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Customer,,
";

    const WITHOUT_DEMOGRAPHICS: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    #[test]
    fn test_parse_derives_calendar_fields() {
        let trips = parse_trips(WITH_DEMOGRAPHICS.as_bytes()).unwrap();
        assert_eq!(trips.len(), 2);

        let first = &trips[0];
        assert_eq!(first.month, 6);
        assert_eq!(first.day_of_week, "Friday");
        assert_eq!(first.hour, 15);
        assert_eq!(first.trip_duration, 321.0);
        assert_eq!(first.route, "Wood St & Hubbard St, Damen Ave & Chicago Ave");
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992.0));
    }

    #[test]
    fn test_empty_demographics_are_missing() {
        let trips = parse_trips(WITH_DEMOGRAPHICS.as_bytes()).unwrap();

        assert_eq!(trips[1].user_type.as_deref(), Some("Customer"));
        assert_eq!(trips[1].gender, None);
        assert_eq!(trips[1].birth_year, None);
    }

    #[test]
    fn test_parse_without_demographic_columns() {
        let trips = parse_trips(WITHOUT_DEMOGRAPHICS.as_bytes()).unwrap();

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].day_of_week, "Wednesday");
        assert_eq!(trips[0].trip_duration, 489.066);
        assert_eq!(trips[0].gender, None);
    }

    #[test]
    fn test_parse_invalid_timestamp() {
        let data = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
yesterday,2017-06-21 08:44:43,10,A,B,Subscriber
";
        let err = parse_trips(data.as_bytes()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("malformed trip on row 1"));
        assert!(message.contains("invalid timestamp 'yesterday'"));
    }

    #[test]
    fn test_invalid_end_time_names_the_row() {
        let data = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-06-21 08:36:34,2017-06-21 08:44:43,10,A,B,Subscriber
2017-06-21 09:00:00,soon,10,A,B,Subscriber
";
        let err = parse_trips(data.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "malformed trip on row 2");
        assert!(format!("{err:#}").contains("invalid timestamp 'soon'"));
    }

    #[test]
    fn test_parse_timestamp_fractional_seconds() {
        let ts = parse_timestamp("2017-01-01 00:07:57.123").unwrap();
        assert_eq!(ts.hour(), 0);
        assert_eq!(ts.minute(), 7);
    }
}
