use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};

use crate::core::Coord;
use crate::core::primitives::{format_datetime_iso, parse_datetime_text};

/// Days added on each side of a date window that touches a weekend gap, so
/// markets closed on Saturday/Sunday still show the flanking sessions.
const WEEKEND_PAD_DAYS: i64 = 2;

/// Padded filter bounds for one viewport, by comparison domain.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBounds {
    /// ISO-date window; bounds are already second-truncated and
    /// weekend-padded.
    Date {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Plain numeric window; never padded.
    Numeric { start: f64, end: f64 },
    /// Opaque bounds compared lexicographically.
    Text { start: String, end: String },
}

/// One normalized viewport request: the padded bounds used for filtering
/// plus the requested bounds echoed verbatim into the x-axis patch.
#[derive(Debug, Clone, PartialEq)]
pub struct XWindow {
    bounds: RangeBounds,
    display_start: Coord,
    display_end: Coord,
}

impl XWindow {
    /// Interprets one pair of x-axis bounds.
    ///
    /// Dates are detected off the lower bound; when both bounds parse as
    /// datetimes the window is a [`RangeBounds::Date`] with seconds zeroed
    /// and weekend padding applied. Otherwise bounds that both read as
    /// numbers form a [`RangeBounds::Numeric`] window, and anything left is
    /// compared as text. Parsing never fails; malformed dates simply fall
    /// through to the next branch.
    #[must_use]
    pub fn parse(min: Coord, max: Coord) -> Self {
        if let Coord::Text(raw_start) = &min {
            if let Some(start) = parse_datetime_text(raw_start) {
                // The upper bound may arrive as a string or as a millisecond
                // timestamp; both coerce the way the host chart would.
                if let Some(end) = max.as_datetime() {
                    return Self::date_window(start, end, min.clone(), max);
                }
            }
        }

        if let (Some(start), Some(end)) = (min.as_f64(), max.as_f64()) {
            let (start, end) = if start <= end { (start, end) } else { (end, start) };
            return Self {
                bounds: RangeBounds::Numeric { start, end },
                display_start: min,
                display_end: max,
            };
        }

        let start = min.text_form().into_owned();
        let end = max.text_form().into_owned();
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            bounds: RangeBounds::Text { start, end },
            display_start: min,
            display_end: max,
        }
    }

    fn date_window(start: NaiveDateTime, end: NaiveDateTime, min: Coord, max: Coord) -> Self {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        let pad = Duration::days(weekend_pad_days(start, end));
        Self {
            bounds: RangeBounds::Date {
                start: start.checked_sub_signed(pad).unwrap_or(start),
                end: end.checked_add_signed(pad).unwrap_or(end),
            },
            display_start: min,
            display_end: max,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> &RangeBounds {
        &self.bounds
    }

    /// The bounds as the host requested them, for echoing into the x-axis
    /// patch. Padding only widens what gets filtered, never what the axis
    /// displays.
    #[must_use]
    pub fn display_range(&self) -> (&Coord, &Coord) {
        (&self.display_start, &self.display_end)
    }

    /// Padded filter bounds in ISO text form; `None` for non-date windows.
    #[must_use]
    pub fn padded_iso_range(&self) -> Option<(String, String)> {
        match &self.bounds {
            RangeBounds::Date { start, end } => {
                Some((format_datetime_iso(*start), format_datetime_iso(*end)))
            }
            _ => None,
        }
    }

    /// Inclusive point test in the window's comparison domain. Points that
    /// do not coerce into that domain are outside.
    #[must_use]
    pub fn contains(&self, coord: &Coord) -> bool {
        match &self.bounds {
            RangeBounds::Date { start, end } => coord
                .as_datetime()
                .is_some_and(|point| point >= *start && point <= *end),
            RangeBounds::Numeric { start, end } => coord
                .as_f64()
                .is_some_and(|point| point >= *start && point <= *end),
            RangeBounds::Text { start, end } => {
                let point = coord.text_form();
                point.as_ref() >= start.as_str() && point.as_ref() <= end.as_str()
            }
        }
    }
}

fn truncate_to_minute(value: NaiveDateTime) -> NaiveDateTime {
    value
        .with_second(0)
        .and_then(|truncated| truncated.with_nanosecond(0))
        .unwrap_or(value)
}

/// A window touches the weekend gap when its lower bound lands on Friday
/// through Sunday or its upper bound on Thursday through Saturday. Both ends
/// then get the same padding so the flanking sessions stay visible.
fn weekend_pad_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let lower_touches_gap = matches!(
        start.weekday(),
        Weekday::Fri | Weekday::Sat | Weekday::Sun
    );
    let upper_touches_gap = matches!(
        end.weekday(),
        Weekday::Thu | Weekday::Fri | Weekday::Sat
    );
    if lower_touches_gap || upper_touches_gap {
        WEEKEND_PAD_DAYS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeBounds, XWindow};
    use crate::core::Coord;

    #[test]
    fn friday_window_is_padded_two_days_on_both_ends() {
        // 2023-01-06 is a Friday.
        let window = XWindow::parse(
            Coord::from("2023-01-06 00:00:00"),
            Coord::from("2023-01-06 23:00:00"),
        );
        let (start, end) = window.padded_iso_range().expect("date window");
        assert_eq!(start, "2023-01-04T00:00:00");
        assert_eq!(end, "2023-01-08T23:00:00");
    }

    #[test]
    fn midweek_window_is_not_padded() {
        // Tuesday through Wednesday.
        let window = XWindow::parse(
            Coord::from("2023-01-10 09:30:00"),
            Coord::from("2023-01-11 16:00:00"),
        );
        let (start, end) = window.padded_iso_range().expect("date window");
        assert_eq!(start, "2023-01-10T09:30:00");
        assert_eq!(end, "2023-01-11T16:00:00");
    }

    #[test]
    fn thursday_upper_bound_triggers_padding() {
        // Monday through Thursday.
        let window = XWindow::parse(
            Coord::from("2023-01-09 00:00:00"),
            Coord::from("2023-01-12 00:00:00"),
        );
        let (start, end) = window.padded_iso_range().expect("date window");
        assert_eq!(start, "2023-01-07T00:00:00");
        assert_eq!(end, "2023-01-14T00:00:00");
    }

    #[test]
    fn seconds_are_zeroed_before_padding() {
        let window = XWindow::parse(
            Coord::from("2023-01-10 10:15:30"),
            Coord::from("2023-01-10 11:45:59"),
        );
        let (start, end) = window.padded_iso_range().expect("date window");
        assert_eq!(start, "2023-01-10T10:15:00");
        assert_eq!(end, "2023-01-10T11:45:00");
    }

    #[test]
    fn malformed_dates_fall_through_to_text() {
        let window = XWindow::parse(Coord::from("2023-13-45 99:99:99"), Coord::from("oops"));
        assert!(matches!(window.bounds(), RangeBounds::Text { .. }));
    }

    #[test]
    fn numeric_bounds_swap_when_descending() {
        let window = XWindow::parse(Coord::from(30.0), Coord::from(10.0));
        assert!(matches!(
            window.bounds(),
            RangeBounds::Numeric { start, end } if *start == 10.0 && *end == 30.0
        ));
        assert!(window.contains(&Coord::from(20.0)));
        assert!(!window.contains(&Coord::from(31.0)));
    }

    #[test]
    fn display_range_echoes_the_request_verbatim() {
        let min = Coord::from("2023-01-06 00:00:00");
        let max = Coord::from("2023-01-06 23:00:00");
        let window = XWindow::parse(min.clone(), max.clone());
        assert_eq!(window.display_range(), (&min, &max));
    }
}
