use serde::Serialize;
use std::fmt;

use super::or_no_data;
use super::utility::{ValueCount, mode, value_counts};
use crate::loader::TripTable;
use crate::output::counts_table;

pub const NO_DEMOGRAPHICS_NOTICE: &str =
    "There are no gender or birth year statistics for this city.";

/// Rider breakdown. `demographics` is `None` for cities whose data has no
/// gender or birth year columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<ValueCount>,
    pub demographics: Option<Demographics>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub genders: Vec<ValueCount>,
    pub earliest_birth_year: Option<i64>,
    pub most_recent_birth_year: Option<i64>,
    pub most_common_birth_year: Option<i64>,
}

pub fn user_stats(table: &TripTable, has_demographics: bool) -> UserStats {
    UserStats {
        user_types: value_counts(table.iter().filter_map(|t| t.user_type.as_deref())),
        demographics: has_demographics.then(|| demographics(table)),
    }
}

fn demographics(table: &TripTable) -> Demographics {
    let years: Vec<i64> = table
        .iter()
        .filter_map(|t| t.birth_year)
        .map(|y| y as i64)
        .collect();

    Demographics {
        genders: value_counts(table.iter().filter_map(|t| t.gender.as_deref())),
        earliest_birth_year: years.iter().min().copied(),
        most_recent_birth_year: years.iter().max().copied(),
        most_common_birth_year: mode(years.iter().copied()),
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.user_types.is_empty() {
            writeln!(f, "User types: {}", super::NO_DATA)?;
        } else {
            writeln!(f, "{}", counts_table("User Type", &self.user_types))?;
        }

        let Some(d) = &self.demographics else {
            return write!(f, "{NO_DEMOGRAPHICS_NOTICE}");
        };

        if d.genders.is_empty() {
            writeln!(f, "Gender: {}", super::NO_DATA)?;
        } else {
            writeln!(f, "{}", counts_table("Gender", &d.genders))?;
        }
        writeln!(
            f,
            "The oldest bikeshare rider was born in {}",
            or_no_data(d.earliest_birth_year)
        )?;
        writeln!(
            f,
            "The youngest bikeshare rider was born in {}",
            or_no_data(d.most_recent_birth_year)
        )?;
        write!(
            f,
            "The most common birth year for bikeshare riders is {}",
            or_no_data(d.most_common_birth_year)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{TripRecord, parse_timestamp};

    fn rider(user_type: &str, gender: Option<&str>, birth_year: Option<f64>) -> TripRecord {
        let ts = parse_timestamp("2017-06-01 08:00:00").unwrap();
        TripRecord::new(ts, ts, 60.0, "A", "B").with_user(
            Some(user_type.to_string()),
            gender.map(str::to_string),
            birth_year,
        )
    }

    fn sample() -> TripTable {
        TripTable::new(vec![
            rider("Subscriber", Some("Male"), Some(1985.0)),
            rider("Subscriber", Some("Female"), Some(1990.0)),
            rider("Customer", None, None),
            rider("Subscriber", Some("Male"), Some(1985.0)),
            rider("Subscriber", Some("Male"), Some(1970.0)),
        ])
    }

    #[test]
    fn test_user_types_counted_descending() {
        let stats = user_stats(&sample(), true);

        assert_eq!(
            stats.user_types,
            vec![
                ValueCount {
                    value: "Subscriber".into(),
                    count: 4,
                },
                ValueCount {
                    value: "Customer".into(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_demographics() {
        let stats = user_stats(&sample(), true);
        let d = stats.demographics.unwrap();

        assert_eq!(
            d.genders[0],
            ValueCount {
                value: "Male".into(),
                count: 3,
            }
        );
        assert_eq!(
            d.genders[1],
            ValueCount {
                value: "Female".into(),
                count: 1,
            }
        );
        assert_eq!(d.earliest_birth_year, Some(1970));
        assert_eq!(d.most_recent_birth_year, Some(1990));
        assert_eq!(d.most_common_birth_year, Some(1985));
    }

    #[test]
    fn test_no_demographics_skips_gender_and_birth_year() {
        let stats = user_stats(&sample(), false);

        assert!(stats.demographics.is_none());
        assert_eq!(stats.user_types.len(), 2);

        let text = stats.to_string();
        assert!(text.contains(NO_DEMOGRAPHICS_NOTICE));
        assert!(!text.contains("born in"));
    }

    #[test]
    fn test_empty_table() {
        let stats = user_stats(&TripTable::default(), true);
        let d = stats.demographics.as_ref().unwrap();

        assert!(stats.user_types.is_empty());
        assert_eq!(d.earliest_birth_year, None);
        assert_eq!(d.most_common_birth_year, None);
        assert!(stats.to_string().contains(super::super::NO_DATA));
    }

    #[test]
    fn test_display_lists_counts() {
        let text = user_stats(&sample(), true).to_string();

        assert!(text.contains("Subscriber"));
        assert!(text.contains("Female"));
        assert!(text.contains("The oldest bikeshare rider was born in 1970"));
    }
}
