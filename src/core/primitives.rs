use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> EngineResult<f64> {
    value.to_f64().ok_or_else(|| {
        EngineError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Parses an ISO-ish datetime string the way host charts emit them.
///
/// Space-separated datetimes are normalized to `T`-separated form first.
/// Accepted shapes: `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, `YYYY-MM-DD HH:MM:SS`
/// with optional fractional seconds. Returns `None` instead of erroring so
/// callers can fall through to numeric or text handling.
#[must_use]
pub fn parse_datetime_text(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    // Cheap rejection of plain numbers and other non-ISO text.
    if trimmed.len() < 10 || trimmed.as_bytes().get(4) != Some(&b'-') {
        return None;
    }
    let normalized = trimmed.replacen(' ', "T", 1);

    if let Ok(parsed) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M") {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Interprets a number as a millisecond Unix timestamp, mirroring how the
/// host chart coerces numeric values on date axes.
#[must_use]
pub fn millis_to_datetime(millis: f64) -> Option<NaiveDateTime> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|time| time.naive_utc())
}

#[must_use]
pub fn format_datetime_iso(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S").to_string()
}
