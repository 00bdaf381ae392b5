//! Viewport re-windowing engine for Plotly-style financial charts.
//!
//! When a host chart raises a zoom, pan, or reset relayout event, the engine
//! normalizes the requested x-bounds (ISO dates or numbers, with weekend
//! padding for market data), windows every trace and its parallel per-point
//! fields to the visible range, recomputes each y-axis's extents
//! (candlestick envelopes, log scales, and fixed-range volume panes
//! included), and hands back a sparse dotted-path layout patch plus the
//! windowed dataset for the host to apply in one update call. Rendering and
//! the charting library itself stay outside the crate.
//!
//! Gesture bursts are coalesced through a host-ticked debounce gate, and any
//! failure inside a recompute cycle is suppressed so an odd payload can
//! never take the chart down; the interaction simply leaves the previous
//! viewport in place.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartContext, EngineConfig, RelayoutEvent, RelayoutUpdate, ViewportEngine};
pub use error::{EngineError, EngineResult};
