use serde_json::Value;

use crate::core::{AxisId, Coord};
use crate::error::{EngineError, EngineResult};

/// Classified x-axis intent of one relayout payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventIntent {
    /// Explicit new bounds: window the data and rescale.
    Window,
    /// Autorange or axis reset: recompute over the full dataset.
    ResetToFull,
    /// No x-axis change (restyle, resize, legend toggles).
    Ignore,
}

/// One zoom/pan/reset notification from the host chart.
///
/// Events are built either programmatically by the host or parsed from the
/// raw relayout payload the chart emits. Synthetic events mark re-dispatches
/// the engine itself caused; they bypass debouncing so an applied update
/// never re-queues itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayoutEvent {
    axis: AxisId,
    range_start: Option<Coord>,
    range_end: Option<Coord>,
    autorange: bool,
    synthetic: bool,
}

impl RelayoutEvent {
    /// Interactive zoom or pan to explicit bounds on the default x-axis.
    #[must_use]
    pub fn with_range(start: impl Into<Coord>, end: impl Into<Coord>) -> Self {
        Self {
            axis: AxisId::default_x(),
            range_start: Some(start.into()),
            range_end: Some(end.into()),
            autorange: false,
            synthetic: false,
        }
    }

    /// Double-click or reset-axes interaction on the default x-axis.
    #[must_use]
    pub fn autorange() -> Self {
        Self {
            axis: AxisId::default_x(),
            range_start: None,
            range_end: None,
            autorange: true,
            synthetic: false,
        }
    }

    #[must_use]
    pub fn for_axis(mut self, axis: AxisId) -> Self {
        self.axis = axis;
        self
    }

    /// Marks the event as a synthetic re-dispatch.
    #[must_use]
    pub fn mark_synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    pub fn from_json_str(raw: &str) -> EngineResult<Self> {
        let payload: Value = serde_json::from_str(raw).map_err(|error| {
            EngineError::InvalidData(format!("failed to parse relayout payload: {error}"))
        })?;
        Self::from_json_value(&payload)
    }

    /// Interprets one raw relayout payload.
    ///
    /// Handled keys: `"<xaxis>.range[0]"` / `"<xaxis>.range[1]"`, the
    /// two-element `"<xaxis>.range"` array form, `"<xaxis>.autorange"`, and
    /// the boolean-ish `"relayout"` marker flagging synthetic re-dispatches.
    /// Everything else is ignored, so restyle and resize payloads classify
    /// as [`EventIntent::Ignore`] instead of erroring.
    pub fn from_json_value(payload: &Value) -> EngineResult<Self> {
        let Value::Object(map) = payload else {
            return Err(EngineError::InvalidData(
                "relayout payload must be a JSON object".to_owned(),
            ));
        };

        let mut event = Self {
            axis: AxisId::default_x(),
            range_start: None,
            range_end: None,
            autorange: false,
            synthetic: false,
        };

        for (key, value) in map {
            if let Some(axis_key) = key.strip_suffix(".range[0]") {
                if is_x_axis_key(axis_key) {
                    event.axis = AxisId::from_layout_key(axis_key);
                    event.range_start = coord_from_value(value);
                }
            } else if let Some(axis_key) = key.strip_suffix(".range[1]") {
                if is_x_axis_key(axis_key) {
                    event.axis = AxisId::from_layout_key(axis_key);
                    event.range_end = coord_from_value(value);
                }
            } else if let Some(axis_key) = key.strip_suffix(".range") {
                if is_x_axis_key(axis_key) {
                    if let Value::Array(bounds) = value {
                        if bounds.len() == 2 {
                            event.axis = AxisId::from_layout_key(axis_key);
                            event.range_start = coord_from_value(&bounds[0]);
                            event.range_end = coord_from_value(&bounds[1]);
                        }
                    }
                }
            } else if let Some(axis_key) = key.strip_suffix(".autorange") {
                if is_x_axis_key(axis_key) && truthy(value) {
                    event.axis = AxisId::from_layout_key(axis_key);
                    event.autorange = true;
                }
            } else if key == "relayout" {
                event.synthetic = truthy(value);
            }
        }

        Ok(event)
    }

    /// Both bounds present wins over autorange; payloads with neither are
    /// ignored.
    #[must_use]
    pub fn intent(&self) -> EventIntent {
        if self.range_start.is_some() && self.range_end.is_some() {
            EventIntent::Window
        } else if self.autorange {
            EventIntent::ResetToFull
        } else {
            EventIntent::Ignore
        }
    }

    #[must_use]
    pub fn axis(&self) -> &AxisId {
        &self.axis
    }

    #[must_use]
    pub fn range(&self) -> Option<(&Coord, &Coord)> {
        match (&self.range_start, &self.range_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

fn is_x_axis_key(key: &str) -> bool {
    key.strip_prefix("xaxis")
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
}

fn coord_from_value(value: &Value) -> Option<Coord> {
    match value {
        Value::Number(number) => number.as_f64().map(Coord::Number),
        Value::String(text) => Some(Coord::Text(text.clone())),
        _ => None,
    }
}

/// Host payloads carry flags as booleans, numbers, or strings.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty() && text != "false" && text != "0",
        _ => false,
    }
}
