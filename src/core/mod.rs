//! Core viewport math: range parsing, data windowing, axis rescaling, and
//! layout patch assembly. Everything here is pure and side-effect free; the
//! event-driven surface lives in [`crate::api`].

pub mod coord;
pub mod figure;
pub mod patch;
pub mod primitives;
pub mod range;
pub mod rescale;
pub mod series;
pub mod window;

pub use coord::Coord;
pub use figure::{AxisConfig, AxisId, Figure, Layout};
pub use patch::LayoutPatch;
pub use range::{RangeBounds, XWindow};
pub use rescale::{AxisUpdate, RescaleTuning, VOLUME_TICK_FORMAT, rescale_axes};
pub use series::{ColorAttr, DecimalBar, Series, StyleBlock};
pub use window::{WindowedData, window_series_set};
