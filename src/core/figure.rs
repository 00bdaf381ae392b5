use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::{Coord, Series};
use crate::error::{EngineError, EngineResult};

/// Short axis reference as traces carry it (`"y"`, `"y2"`, `"x"`),
/// convertible to and from the long layout keys (`"yaxis2"`, `"xaxis"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisId(String);

impl AxisId {
    #[must_use]
    pub fn default_x() -> Self {
        Self("x".to_owned())
    }

    #[must_use]
    pub fn default_y() -> Self {
        Self("y".to_owned())
    }

    /// Accepts the short form traces use (`"y2"`).
    #[must_use]
    pub fn from_trace_ref(reference: &str) -> Self {
        Self(reference.to_owned())
    }

    /// Accepts the long form layouts use (`"yaxis2"` becomes `"y2"`).
    #[must_use]
    pub fn from_layout_key(key: &str) -> Self {
        let mut chars = key.chars();
        match chars.next() {
            Some(letter) if chars.as_str().starts_with("axis") => {
                Self(format!("{letter}{}", &chars.as_str()[4..]))
            }
            _ => Self(key.to_owned()),
        }
    }

    /// Long layout form: `"y2"` becomes `"yaxis2"`, `"x"` becomes `"xaxis"`.
    #[must_use]
    pub fn layout_key(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(letter) => format!("{letter}axis{}", chars.as_str()),
            None => "yaxis".to_owned(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Axis metadata the rescaler reads. Unknown axis attributes are preserved
/// so configs survive a round trip through [`Layout::set_axis`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[Coord; 2]>,
    #[serde(default)]
    pub fixedrange: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl AxisConfig {
    #[must_use]
    pub fn is_log(&self) -> bool {
        self.axis_type.as_deref() == Some("log")
    }

    /// Upper bound of the configured range, when it reads as a number.
    #[must_use]
    pub fn upper_range_bound(&self) -> Option<f64> {
        self.range
            .as_ref()
            .and_then(|range| range[1].as_f64())
    }
}

/// Raw layout entries keyed as the host sends them. Axis metadata is parsed
/// on demand so one malformed axis cannot fail a whole figure, and insertion
/// order is preserved for stable serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    entries: IndexMap<String, Value>,
}

impl Layout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the metadata of one axis. Absent or unparsable entries both
    /// come back as `None`; unparsable ones are logged and treated as
    /// unconfigured.
    #[must_use]
    pub fn axis(&self, axis: &AxisId) -> Option<AxisConfig> {
        let raw = self.entries.get(&axis.layout_key())?;
        match serde_json::from_value(raw.clone()) {
            Ok(config) => Some(config),
            Err(error) => {
                warn!(axis = %axis, error = %error, "ignoring unparsable axis metadata");
                None
            }
        }
    }

    pub fn set_axis(&mut self, axis: &AxisId, config: &AxisConfig) -> EngineResult<()> {
        let value = serde_json::to_value(config).map_err(|error| {
            EngineError::InvalidConfig(format!("axis {axis} is not serializable: {error}"))
        })?;
        self.entries.insert(axis.layout_key(), value);
        Ok(())
    }

    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

/// One host figure: traces plus layout, with any extra top-level keys
/// (frames, config) carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Series>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Figure {
    pub fn new(data: Vec<Series>, layout: Layout) -> EngineResult<Self> {
        let figure = Self {
            data,
            layout,
            extra: IndexMap::new(),
        };
        figure.validate()?;
        Ok(figure)
    }

    pub fn from_json_str(raw: &str) -> EngineResult<Self> {
        let figure: Self = serde_json::from_str(raw)
            .map_err(|error| EngineError::InvalidFigure(format!("failed to parse figure: {error}")))?;
        figure.validate()?;
        Ok(figure)
    }

    pub fn from_json_value(value: Value) -> EngineResult<Self> {
        let figure: Self = serde_json::from_value(value)
            .map_err(|error| EngineError::InvalidFigure(format!("failed to parse figure: {error}")))?;
        figure.validate()?;
        Ok(figure)
    }

    /// Validates every trace's parallel-field alignment.
    pub fn validate(&self) -> EngineResult<()> {
        for (index, series) in self.data.iter().enumerate() {
            series.validate().map_err(|error| match error {
                EngineError::InvalidFigure(message) => {
                    EngineError::InvalidFigure(format!("trace {index}: {message}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}
