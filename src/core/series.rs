use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Coord;
use crate::core::figure::AxisId;
use crate::core::primitives::decimal_to_f64;
use crate::error::{EngineError, EngineResult};

/// Style attribute that is either one shared value or a per-point array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorAttr {
    PerPoint(Vec<Value>),
    Single(Value),
}

/// Shape shared by the `marker` and `line` style blocks. Only `color`
/// participates in windowing; every other key passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorAttr>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// One trace of a host figure.
///
/// Parallel per-point fields (`y`, OHLC columns, array-valued `text`,
/// `customdata`, and per-point colors) are kept index-aligned with `x`;
/// unknown trace attributes are preserved in `extra` so windowed copies
/// round-trip the host JSON losslessly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub trace_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<StyleBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<StyleBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Strongly-typed OHLC row for hosts that ingest decimal price feeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalBar {
    pub time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl Series {
    #[must_use]
    pub fn is_candlestick(&self) -> bool {
        self.trace_type.as_deref() == Some("candlestick")
    }

    /// Y-axis this trace renders on; traces without an explicit reference
    /// sit on the default `y` axis.
    #[must_use]
    pub fn y_axis_id(&self) -> AxisId {
        self.yaxis
            .as_deref()
            .map_or_else(AxisId::default_y, AxisId::from_trace_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Checks that every array-valued parallel field matches `x` in length.
    pub fn validate(&self) -> EngineResult<()> {
        let expected = self.x.len();
        self.check_aligned("y", self.y.as_ref(), expected)?;
        self.check_aligned("open", self.open.as_ref(), expected)?;
        self.check_aligned("high", self.high.as_ref(), expected)?;
        self.check_aligned("low", self.low.as_ref(), expected)?;
        self.check_aligned("close", self.close.as_ref(), expected)?;
        self.check_aligned_value("text", self.text.as_ref(), expected)?;
        self.check_aligned_value("customdata", self.customdata.as_ref(), expected)?;
        self.check_aligned_color("marker.color", self.marker.as_ref(), expected)?;
        self.check_aligned_color("line.color", self.line.as_ref(), expected)?;
        Ok(())
    }

    /// Builds an ordinary scatter trace from decimal samples, with x emitted
    /// in the ISO text form date windows expect.
    pub fn scatter_from_decimal_points(
        name: &str,
        points: &[(DateTime<Utc>, Decimal)],
    ) -> EngineResult<Self> {
        let mut x = Vec::with_capacity(points.len());
        let mut y = Vec::with_capacity(points.len());
        for (time, price) in points {
            x.push(Coord::from_datetime(*time));
            y.push(Some(decimal_to_f64(*price, "price")?));
        }
        Ok(Self {
            name: Some(name.to_owned()),
            x,
            y: Some(y),
            ..Self::default()
        })
    }

    /// Builds a candlestick trace from decimal bars, enforcing the envelope
    /// invariants of each bar.
    pub fn candlestick_from_decimal_bars(name: &str, bars: &[DecimalBar]) -> EngineResult<Self> {
        let mut x = Vec::with_capacity(bars.len());
        let mut open = Vec::with_capacity(bars.len());
        let mut high = Vec::with_capacity(bars.len());
        let mut low = Vec::with_capacity(bars.len());
        let mut close = Vec::with_capacity(bars.len());

        for bar in bars {
            if bar.low > bar.high {
                return Err(EngineError::InvalidData(format!(
                    "bar at {} has low above high",
                    bar.time
                )));
            }
            if bar.open < bar.low || bar.open > bar.high || bar.close < bar.low || bar.close > bar.high
            {
                return Err(EngineError::InvalidData(format!(
                    "bar at {} has open/close outside the low..=high envelope",
                    bar.time
                )));
            }
            x.push(Coord::from_datetime(bar.time));
            open.push(Some(decimal_to_f64(bar.open, "open")?));
            high.push(Some(decimal_to_f64(bar.high, "high")?));
            low.push(Some(decimal_to_f64(bar.low, "low")?));
            close.push(Some(decimal_to_f64(bar.close, "close")?));
        }

        Ok(Self {
            name: Some(name.to_owned()),
            trace_type: Some("candlestick".to_owned()),
            x,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            ..Self::default()
        })
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    fn check_aligned(
        &self,
        field: &str,
        values: Option<&Vec<Option<f64>>>,
        expected: usize,
    ) -> EngineResult<()> {
        match values {
            Some(values) if values.len() != expected => Err(EngineError::InvalidFigure(format!(
                "series `{}` field `{field}` has {} entries but x has {expected}",
                self.display_name(),
                values.len()
            ))),
            _ => Ok(()),
        }
    }

    fn check_aligned_value(
        &self,
        field: &str,
        value: Option<&Value>,
        expected: usize,
    ) -> EngineResult<()> {
        match value {
            Some(Value::Array(items)) if items.len() != expected => {
                Err(EngineError::InvalidFigure(format!(
                    "series `{}` field `{field}` has {} entries but x has {expected}",
                    self.display_name(),
                    items.len()
                )))
            }
            _ => Ok(()),
        }
    }

    fn check_aligned_color(
        &self,
        field: &str,
        block: Option<&StyleBlock>,
        expected: usize,
    ) -> EngineResult<()> {
        match block.and_then(|style| style.color.as_ref()) {
            Some(ColorAttr::PerPoint(items)) if items.len() != expected => {
                Err(EngineError::InvalidFigure(format!(
                    "series `{}` field `{field}` has {} entries but x has {expected}",
                    self.display_name(),
                    items.len()
                )))
            }
            _ => Ok(()),
        }
    }
}
