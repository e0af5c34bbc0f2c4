//! Reporting month in `YYYY-MM` form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The value did not have the `YYYY-MM` digit shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Month must be in YYYY-MM format, got '{0}'")]
pub struct MonthFormatError(pub String);

/// A reporting month.
///
/// Only the shape is checked: four ASCII digits, a hyphen, two ASCII digits.
/// `2024-13` is accepted; `2024-1` is not.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month(String);

impl Month {
    /// Parses a month string.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not exactly `YYYY-MM`.
    pub fn parse(value: &str) -> Result<Self, MonthFormatError> {
        if Self::is_valid(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(MonthFormatError(value.to_string()))
        }
    }

    /// Returns true if `value` has the `YYYY-MM` shape.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        let bytes = value.as_bytes();
        bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit)
    }

    /// Returns the month as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Month {
    type Err = MonthFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = MonthFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(MonthFormatError(value))
        }
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
