use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::figure::{AxisConfig, AxisId, Layout};
use crate::core::series::Series;
use crate::error::{EngineError, EngineResult};

/// Tick label format applied to volume panes.
pub const VOLUME_TICK_FORMAT: &str = ".2p";

/// Fixed digit-count to rounding-digits lookup used to snap volume ticks.
/// The breaks are deliberately asymmetric; do not replace with a formula.
/// A digit count above each break selects its rounding digits, last match
/// wins, and counts of two or fewer fall back to rounding at thousands.
const VOLUME_ROUND_BREAKS: [(u32, i32); 7] = [
    (2, -1),
    (5, -2),
    (6, -3),
    (7, -4),
    (8, -5),
    (9, -6),
    (10, -7),
];

const VOLUME_ROUND_FALLBACK_DIGITS: i32 = -3;

/// Tuning controls for viewport-driven y-axis rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RescaleTuning {
    /// Outward padding ratio for axes fed by ordinary traces only.
    pub scatter_padding_ratio: f64,
    /// Outward padding ratio for axes carrying at least one candlestick.
    pub candlestick_padding_ratio: f64,
    /// Share of the unpadded maximum used as the base volume tick.
    pub volume_tick_share: f64,
    /// Multiplier applied to the unpadded maximum for the volume ceiling.
    pub volume_range_multiplier: f64,
}

impl Default for RescaleTuning {
    fn default() -> Self {
        Self {
            scatter_padding_ratio: 0.15,
            candlestick_padding_ratio: 0.30,
            volume_tick_share: 0.20,
            volume_range_multiplier: 7.0,
        }
    }
}

impl RescaleTuning {
    pub(crate) fn validate(self) -> EngineResult<Self> {
        if !self.scatter_padding_ratio.is_finite() || self.scatter_padding_ratio < 0.0 {
            return Err(EngineError::InvalidConfig(
                "scatter_padding_ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.candlestick_padding_ratio.is_finite() || self.candlestick_padding_ratio < 0.0 {
            return Err(EngineError::InvalidConfig(
                "candlestick_padding_ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.volume_tick_share.is_finite() || self.volume_tick_share <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "volume_tick_share must be finite and > 0".to_owned(),
            ));
        }
        if !self.volume_range_multiplier.is_finite() || self.volume_range_multiplier <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "volume_range_multiplier must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One axis's recomputed layout entries. Ranges for log axes are already in
/// log10 space, which is the form the host chart stores them in.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisUpdate {
    pub axis: AxisId,
    pub range: [f64; 2],
    pub tickvals: Option<Vec<f64>>,
    pub tickformat: Option<String>,
}

/// Recomputes the y-range of every axis referenced by `series`.
///
/// Axes are visited in first-seen trace order. Ordinary traces feed their
/// `y` values into a running min/max; a candlestick trace replaces whatever
/// accumulated before it with its own low/high envelope, so the last
/// candlestick on an axis wins. Null and non-finite values (including the
/// log10 of non-positive values on log axes) are skipped. An axis whose
/// visible window holds no finite value at all fails the whole pass.
pub fn rescale_axes(
    series: &[Series],
    layout: &Layout,
    tuning: RescaleTuning,
) -> EngineResult<Vec<AxisUpdate>> {
    let mut groups: IndexMap<AxisId, SmallVec<[usize; 4]>> = IndexMap::new();
    for (index, trace) in series.iter().enumerate() {
        if trace.is_empty() {
            continue;
        }
        groups.entry(trace.y_axis_id()).or_default().push(index);
    }

    let mut updates = Vec::with_capacity(groups.len());
    for (axis, indices) in groups {
        let config = layout.axis(&axis);
        let update = rescale_single_axis(axis, &indices, series, config.as_ref(), tuning)?;
        updates.push(update);
    }
    Ok(updates)
}

fn rescale_single_axis(
    axis: AxisId,
    indices: &[usize],
    series: &[Series],
    config: Option<&AxisConfig>,
    tuning: RescaleTuning,
) -> EngineResult<AxisUpdate> {
    let log_scale = config.is_some_and(AxisConfig::is_log);

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut has_values = false;
    let mut has_candles = false;

    for &index in indices {
        let trace = &series[index];
        if trace.is_candlestick() {
            let mut envelope = finite_candidates(trace.low.as_ref(), log_scale);
            envelope.extend(finite_candidates(trace.high.as_ref(), log_scale));
            if let Some((lo, hi)) = span_of(&envelope) {
                min = lo;
                max = hi;
                has_values = true;
                has_candles = true;
            }
        } else {
            let values = finite_candidates(trace.y.as_ref(), log_scale);
            if let Some((lo, hi)) = span_of(&values) {
                min = min.min(lo);
                max = max.max(hi);
                has_values = true;
            }
        }
    }

    if !has_values {
        return Err(EngineError::EmptyAxisWindow {
            axis: axis.to_string(),
        });
    }

    let span = max - min;
    let ratio = if has_candles {
        tuning.candlestick_padding_ratio
    } else {
        tuning.scatter_padding_ratio
    };
    let padded = [min - span * ratio, max + span * ratio];

    let fixedrange = config.is_some_and(|axis_config| axis_config.fixedrange);
    if !fixedrange {
        return Ok(AxisUpdate {
            axis,
            range: padded,
            tickvals: None,
            tickformat: None,
        });
    }

    // Fixed-range panes keep their floor at zero. Panes that carry a tick
    // table are volume panes and get snapped ticks plus a headroom ceiling;
    // the rest keep their configured ceiling when one is set.
    if config.is_some_and(|axis_config| axis_config.tickvals.is_some()) {
        return Ok(volume_axis_update(axis, max, tuning));
    }

    let upper = config
        .and_then(AxisConfig::upper_range_bound)
        .unwrap_or(padded[1]);
    Ok(AxisUpdate {
        axis,
        range: [0.0, upper],
        tickvals: None,
        tickformat: None,
    })
}

fn volume_axis_update(axis: AxisId, unpadded_max: f64, tuning: RescaleTuning) -> AxisUpdate {
    let base = round_to_digits(
        unpadded_max * tuning.volume_tick_share,
        volume_round_digits(integral_digit_count(unpadded_max)),
    );
    AxisUpdate {
        axis,
        range: [0.0, unpadded_max * tuning.volume_range_multiplier],
        tickvals: Some(vec![base, base * 2.0, base * 3.0, base * 4.0]),
        tickformat: Some(VOLUME_TICK_FORMAT.to_owned()),
    }
}

/// Rounding digits for a volume maximum with the given integral digit
/// count, per the fixed break table.
#[must_use]
pub fn volume_round_digits(digit_count: u32) -> i32 {
    let mut digits = VOLUME_ROUND_FALLBACK_DIGITS;
    for (break_count, candidate) in VOLUME_ROUND_BREAKS {
        if digit_count > break_count {
            digits = candidate;
        }
    }
    digits
}

/// Rounds to multiples of `10^(-digits)`, halves away from zero. Negative
/// `digits` round into the integral part, e.g. -2 rounds to hundreds.
#[must_use]
pub fn round_to_digits(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(-digits);
    (value / factor).round() * factor
}

/// Decimal digits in the integral part of `value`; at least 1.
fn integral_digit_count(value: f64) -> u32 {
    let mut magnitude = value.abs().trunc() as u64;
    let mut digits = 1;
    while magnitude >= 10 {
        magnitude /= 10;
        digits += 1;
    }
    digits
}

fn finite_candidates(values: Option<&Vec<Option<f64>>>, log_scale: bool) -> Vec<f64> {
    let Some(values) = values else {
        return Vec::new();
    };
    values
        .iter()
        .flatten()
        .map(|value| if log_scale { value.log10() } else { *value })
        .filter(|value| value.is_finite())
        .collect()
}

fn span_of(values: &[f64]) -> Option<(f64, f64)> {
    let min = values
        .iter()
        .copied()
        .min_by_key(|value| OrderedFloat(*value))?;
    let max = values
        .iter()
        .copied()
        .max_by_key(|value| OrderedFloat(*value))?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::{integral_digit_count, round_to_digits, volume_round_digits};

    #[test]
    fn digit_counts_ignore_the_fraction() {
        assert_eq!(integral_digit_count(0.25), 1);
        assert_eq!(integral_digit_count(9.99), 1);
        assert_eq!(integral_digit_count(10.0), 2);
        assert_eq!(integral_digit_count(500_000.7), 6);
        assert_eq!(integral_digit_count(1_000_000_000.0), 10);
    }

    #[test]
    fn break_table_is_last_match_wins() {
        assert_eq!(volume_round_digits(1), -3);
        assert_eq!(volume_round_digits(2), -3);
        assert_eq!(volume_round_digits(3), -1);
        assert_eq!(volume_round_digits(5), -1);
        assert_eq!(volume_round_digits(6), -2);
        assert_eq!(volume_round_digits(7), -3);
        assert_eq!(volume_round_digits(8), -4);
        assert_eq!(volume_round_digits(9), -5);
        assert_eq!(volume_round_digits(10), -6);
        assert_eq!(volume_round_digits(11), -7);
        assert_eq!(volume_round_digits(20), -7);
    }

    #[test]
    fn rounding_digits_follow_the_python_convention() {
        assert!((round_to_digits(123_456.0, -2) - 123_500.0).abs() <= f64::EPSILON * 1e6);
        assert!((round_to_digits(0.12345, 3) - 0.123).abs() <= 1e-12);
        assert!((round_to_digits(100_000.0, -2) - 100_000.0).abs() <= f64::EPSILON * 1e6);
    }
}
