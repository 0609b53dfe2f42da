//! Task deadline.

use core::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Deadline`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeadlineError {
    /// The input string is empty.
    #[error("deadline cannot be empty")]
    Empty,
    /// The input is neither `YYYY-MM-DD` nor an RFC 3339 timestamp.
    #[error("invalid deadline: {0}")]
    Invalid(String),
}

/// A task deadline, kept at day precision.
///
/// The backend stores deadlines as timestamps (`2025-01-05T00:00:00.000Z`)
/// while the task form submits plain dates (`2025-01-05`). Both are accepted;
/// the time-of-day is dropped. Serializes as `YYYY-MM-DD`.
///
/// ## Examples
///
/// ```
/// use taskboard_core::Deadline;
///
/// let from_form = Deadline::parse("2025-01-05").unwrap();
/// let from_api = Deadline::parse("2025-01-05T00:00:00.000Z").unwrap();
/// assert_eq!(from_form, from_api);
/// assert_eq!(from_form.display(), "Jan 5, 2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(NaiveDate);

impl Deadline {
    /// Parse a date or an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or in neither format.
    pub fn parse(s: &str) -> Result<Self, DeadlineError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DeadlineError::Empty);
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self(date));
        }

        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.date_naive()))
            .map_err(|_| DeadlineError::Invalid(s.to_owned()))
    }

    /// Value for an `<input type="date">` and for the backend.
    #[must_use]
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Human-readable form, e.g. `Jan 5, 2025`.
    #[must_use]
    pub fn display(&self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for Deadline {
    type Err = DeadlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.iso())
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional deadline, treating anything unreadable as absent.
///
/// For use with `#[serde(default, deserialize_with = "...")]`: a missing,
/// null, non-string or malformed value becomes `None`, so one bad document
/// does not fail a whole list.
///
/// # Errors
///
/// Only fails if the underlying deserializer does.
pub fn deserialize_lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Deadline>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(raw)) => Deadline::parse(&raw).ok(),
        Some(Raw::Other(serde::de::IgnoredAny)) | None => None,
    })
}
