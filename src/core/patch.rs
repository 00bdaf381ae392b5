use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::figure::AxisId;
use crate::core::rescale::AxisUpdate;

/// Sparse chart-layout update keyed by dotted property paths, in the shape
/// host charts apply directly (`"yaxis2.range": [lo, hi]`). Insertion order
/// is preserved so emitted patches serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutPatch {
    entries: IndexMap<String, Value>,
}

impl LayoutPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: impl Into<String>, value: Value) {
        self.entries.insert(path.into(), value);
    }

    /// Echoes the requested x-range back so the axis keeps the exact bounds
    /// the interaction asked for.
    pub fn set_axis_range(&mut self, axis: &AxisId, start: Value, end: Value) {
        self.set(
            format!("{}.range", axis.layout_key()),
            Value::Array(vec![start, end]),
        );
    }

    pub fn set_axis_autorange(&mut self, axis: &AxisId) {
        self.set(format!("{}.autorange", axis.layout_key()), Value::Bool(true));
    }

    /// Folds one rescaled axis into the patch: its range entry always, tick
    /// values and tick format only when the rescaler produced them.
    pub fn apply_axis_update(&mut self, update: &AxisUpdate) {
        let key = update.axis.layout_key();
        self.set(
            format!("{key}.range"),
            Value::Array(vec![
                Value::from(update.range[0]),
                Value::from(update.range[1]),
            ]),
        );
        if let Some(tickvals) = &update.tickvals {
            self.set(
                format!("{key}.tickvals"),
                Value::Array(tickvals.iter().copied().map(Value::from).collect()),
            );
        }
        if let Some(tickformat) = &update.tickformat {
            self.set(
                format!("{key}.tickformat"),
                Value::String(tickformat.clone()),
            );
        }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries.get(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &IndexMap<String, Value> {
        &self.entries
    }
}
