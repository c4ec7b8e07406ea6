use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Display form of a missing field.
pub const NO_VALUE: &str = "—";

/// A resolved text value, or the "no value" sentinel.
///
/// An absent element and an element with empty or whitespace-only text
/// both become [`Field::Missing`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field {
    /// Trimmed, non-empty text.
    Value(String),
    #[default]
    Missing,
}

impl Field {
    /// Trim `text` and wrap it, mapping blank text to [`Field::Missing`].
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Field::Missing
        } else {
            Field::Value(trimmed.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Value(v) => Some(v),
            Field::Missing => None,
        }
    }

    /// The text, or [`NO_VALUE`] when missing.
    pub fn display(&self) -> &str {
        self.as_str().unwrap_or(NO_VALUE)
    }

    /// Parse as a decimal amount. `None` when missing or not a number.
    pub fn as_decimal(&self) -> Option<Decimal> {
        self.as_str().and_then(|s| Decimal::from_str(s).ok())
    }

    /// Parse as an ISO 8601 calendar date (`YYYY-MM-DD`).
    pub fn as_date(&self) -> Option<NaiveDate> {
        self.as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => serializer.serialize_some(v),
            Field::Missing => serializer.serialize_none(),
        }
    }
}
