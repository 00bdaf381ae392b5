//! Event-driven engine surface: the per-chart context, the debounce gate,
//! and the persistent relayout subscription that turns host events into
//! layout patches.

mod debounce;
mod json_contract;
mod recompute;
mod relayout_event;

pub use debounce::RelayoutDebouncer;
pub use json_contract::{RELAYOUT_UPDATE_JSON_SCHEMA_V1, RelayoutUpdateJsonContractV1};
pub use relayout_event::{EventIntent, RelayoutEvent};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Figure, LayoutPatch, RescaleTuning, Series};
use crate::error::EngineResult;

/// Explicit per-mount chart state threaded into every engine call.
///
/// One context is constructed per mounted chart; the host keeps its dataset
/// current through [`ChartContext::set_figure`] and owns the auto-scale
/// toggle as plain state rather than inferring it from widget styling.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartContext {
    figure: Figure,
    auto_scale: bool,
}

impl ChartContext {
    /// Validates the figure and wraps it with auto-scaling enabled.
    pub fn new(figure: Figure) -> EngineResult<Self> {
        figure.validate()?;
        Ok(Self {
            figure,
            auto_scale: true,
        })
    }

    #[must_use]
    pub fn with_auto_scale(mut self, enabled: bool) -> Self {
        self.auto_scale = enabled;
        self
    }

    #[must_use]
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Replaces the dataset, e.g. after a live price append.
    pub fn set_figure(&mut self, figure: Figure) -> EngineResult<()> {
        figure.validate()?;
        self.figure = figure;
        Ok(())
    }

    #[must_use]
    pub fn auto_scale(&self) -> bool {
        self.auto_scale
    }

    pub fn set_auto_scale(&mut self, enabled: bool) {
        self.auto_scale = enabled;
    }
}

/// Engine bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quiet period a gesture burst must respect before one recompute fires.
    pub quiet_period: Duration,
    pub tuning: RescaleTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(100),
            tuning: RescaleTuning::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: RescaleTuning) -> Self {
        self.tuning = tuning;
        self
    }
}

/// Full engine output for one interaction: the sparse layout patch plus the
/// replacement dataset the host pushes back into the chart alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayoutUpdate {
    pub layout: LayoutPatch,
    pub data: Vec<Series>,
}

/// Viewport re-windowing engine: the single persistent relayout subscription
/// for one chart. Mode changes flip the context's auto-scale flag; the
/// subscription itself is never torn down or re-registered.
#[derive(Debug)]
pub struct ViewportEngine {
    config: EngineConfig,
    debouncer: RelayoutDebouncer,
}

impl ViewportEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let config = EngineConfig {
            tuning: config.tuning.validate()?,
            ..config
        };
        Ok(Self {
            debouncer: RelayoutDebouncer::new(config.quiet_period),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.debouncer.has_pending()
    }

    /// Drops whatever interaction is queued, e.g. on chart unmount.
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
    }
}
