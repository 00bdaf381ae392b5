use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::primitives::{millis_to_datetime, parse_datetime_text};

/// A single x-coordinate as host figures carry them: a plain number or a
/// string that may hold an ISO-ish datetime or numeric text.
///
/// The untagged representation round-trips the host JSON exactly; typing is
/// decided per interaction by the window that filters against the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    Number(f64),
    Text(String),
}

impl Coord {
    /// Builds the ISO text form hosts use on date axes.
    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        Self::Text(time.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }

    /// Date interpretation: strings parse as ISO-ish datetimes and numbers
    /// are treated as millisecond Unix timestamps, matching how the host
    /// chart coerces either onto a date axis.
    #[must_use]
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Number(value) => millis_to_datetime(*value),
            Self::Text(text) => parse_datetime_text(text),
        }
    }

    /// Text form used when bounds are neither dates nor numbers and the
    /// comparison falls back to lexicographic order.
    #[must_use]
    pub fn text_form(&self) -> Cow<'_, str> {
        match self {
            Self::Number(value) => Cow::Owned(value.to_string()),
            Self::Text(text) => Cow::Borrowed(text.as_str()),
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Value {
        match self {
            Self::Number(value) => Value::from(*value),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Coord {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Coord {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Coord {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
