//! Date range covered by a historical dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DateRangeError;

/// Inclusive range of order dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First order date (inclusive).
    pub earliest: NaiveDate,
    /// Last order date (inclusive).
    pub latest: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that earliest <= latest.
    ///
    /// # Errors
    ///
    /// Returns an error if earliest > latest.
    pub fn new(earliest: NaiveDate, latest: NaiveDate) -> Result<Self, DateRangeError> {
        if earliest > latest {
            return Err(DateRangeError::InvalidRange { earliest, latest });
        }
        Ok(Self { earliest, latest })
    }

    /// Creates a date range for a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            earliest: date,
            latest: date,
        }
    }

    /// Returns the smallest range covering all given dates, or `None` if empty.
    pub fn spanning(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        dates.into_iter().fold(None, |acc, date| match acc {
            None => Some(Self::single_day(date)),
            Some(range) => Some(Self {
                earliest: range.earliest.min(date),
                latest: range.latest.max(date),
            }),
        })
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.earliest, self.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range() {
        let range = DateRange::new(date(2023, 3, 1), date(2025, 10, 8)).unwrap();
        assert_eq!(range.to_string(), "2023-03-01 to 2025-10-08");
        assert_eq!(
            DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap(),
            DateRange::single_day(date(2024, 1, 1))
        );
    }

    #[test]
    fn test_invalid_range() {
        let err = DateRange::new(date(2025, 1, 2), date(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, DateRangeError::InvalidRange { .. }));
    }

    #[test]
    fn test_spanning() {
        let range =
            DateRange::spanning([date(2024, 5, 1), date(2023, 2, 9), date(2024, 1, 1)]).unwrap();
        assert_eq!(range.earliest, date(2023, 2, 9));
        assert_eq!(range.latest, date(2024, 5, 1));
        assert!(DateRange::spanning(std::iter::empty()).is_none());
    }

    #[test]
    fn test_serde_field_names() {
        let range = DateRange::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"earliest":"2023-01-01","latest":"2023-12-31"}"#);
    }
}
