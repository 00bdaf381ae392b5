use serde_json::Value;

#[cfg(feature = "parallel-windowing")]
use rayon::prelude::*;

use crate::core::range::XWindow;
use crate::core::series::{ColorAttr, Series, StyleBlock};

/// Result of windowing one dataset against a viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedData {
    /// Windowed traces, or a full copy of the input when nothing survived.
    pub series: Vec<Series>,
    /// Whether any trace retained at least one point.
    pub any_retained: bool,
}

/// Filters every trace down to the points whose x falls inside `window`,
/// slicing all parallel per-point fields with the same mask.
///
/// Trace order is preserved and traces left with no visible points are
/// dropped. When every trace ends up empty the input set is returned
/// unchanged instead, so a viewport beyond the data never blanks the chart.
#[must_use]
pub fn window_series_set(series: &[Series], window: &XWindow) -> WindowedData {
    #[cfg(feature = "parallel-windowing")]
    let filtered: Vec<Option<Series>> = series
        .par_iter()
        .map(|trace| window_single_series(trace, window))
        .collect();
    #[cfg(not(feature = "parallel-windowing"))]
    let filtered: Vec<Option<Series>> = series
        .iter()
        .map(|trace| window_single_series(trace, window))
        .collect();

    let retained: Vec<Series> = filtered.into_iter().flatten().collect();
    if retained.is_empty() {
        return WindowedData {
            series: series.to_vec(),
            any_retained: false,
        };
    }
    WindowedData {
        series: retained,
        any_retained: true,
    }
}

fn window_single_series(series: &Series, window: &XWindow) -> Option<Series> {
    let mask: Vec<bool> = series.x.iter().map(|coord| window.contains(coord)).collect();
    let kept = mask.iter().filter(|keep| **keep).count();
    if kept == 0 {
        return None;
    }
    if kept == series.x.len() {
        return Some(series.clone());
    }

    Some(Series {
        x: filter_by_mask(&series.x, &mask),
        y: filter_numeric(&series.y, &mask),
        open: filter_numeric(&series.open, &mask),
        high: filter_numeric(&series.high, &mask),
        low: filter_numeric(&series.low, &mask),
        close: filter_numeric(&series.close, &mask),
        text: filter_value_array(&series.text, &mask),
        customdata: filter_value_array(&series.customdata, &mask),
        marker: filter_style(&series.marker, &mask),
        line: filter_style(&series.line, &mask),
        ..series.clone()
    })
}

fn filter_by_mask<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(value, keep)| keep.then(|| value.clone()))
        .collect()
}

/// Numeric parallel fields are sliced only when index-aligned with x;
/// mismatched arrays pass through untouched.
fn filter_numeric(
    field: &Option<Vec<Option<f64>>>,
    mask: &[bool],
) -> Option<Vec<Option<f64>>> {
    field.as_ref().map(|values| {
        if values.len() == mask.len() {
            filter_by_mask(values, mask)
        } else {
            values.clone()
        }
    })
}

/// `text` and `customdata` are sliced only in their array form; scalar
/// values apply to every point and are kept as-is.
fn filter_value_array(field: &Option<Value>, mask: &[bool]) -> Option<Value> {
    field.as_ref().map(|value| match value {
        Value::Array(items) if items.len() == mask.len() => {
            Value::Array(filter_by_mask(items, mask))
        }
        other => other.clone(),
    })
}

fn filter_style(block: &Option<StyleBlock>, mask: &[bool]) -> Option<StyleBlock> {
    block.as_ref().map(|style| {
        let color = style.color.as_ref().map(|color| match color {
            ColorAttr::PerPoint(items) if items.len() == mask.len() => {
                ColorAttr::PerPoint(filter_by_mask(items, mask))
            }
            other => other.clone(),
        });
        StyleBlock {
            color,
            extra: style.extra.clone(),
        }
    })
}
