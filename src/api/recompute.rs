use std::time::Duration;

use tracing::{debug, trace};

use crate::core::range::XWindow;
use crate::core::{Figure, LayoutPatch, rescale_axes, window_series_set};
use crate::error::EngineResult;

use super::{ChartContext, EventIntent, RelayoutEvent, RelayoutUpdate, ViewportEngine};

impl ViewportEngine {
    /// Entry point for the host's persistent relayout subscription.
    ///
    /// The context's auto-scale toggle is consulted on every call, so hosts
    /// flip the flag instead of churning subscriptions. Synthetic events
    /// recompute immediately; interactive events are queued behind the quiet
    /// period and fire from [`ViewportEngine::advance`].
    pub fn submit_relayout(
        &mut self,
        context: &ChartContext,
        event: RelayoutEvent,
    ) -> Option<RelayoutUpdate> {
        if !context.auto_scale() {
            trace!("auto-scale disabled; relayout event ignored");
            return None;
        }
        if matches!(event.intent(), EventIntent::Ignore) {
            trace!("relayout event carries no x-axis change; ignored");
            return None;
        }
        match self.debouncer.submit(event) {
            Some(immediate) => self.recompute_now(context, &immediate),
            None => None,
        }
    }

    /// Advances debounce time and runs the coalesced recompute when the
    /// quiet period expires. The context is read at fire time so the
    /// computation sees the freshest dataset and toggle state.
    pub fn advance(&mut self, context: &ChartContext, elapsed: Duration) -> Option<RelayoutUpdate> {
        let event = self.debouncer.advance(elapsed)?;
        if !context.auto_scale() {
            debug!("auto-scale disabled while an event was queued; dropping it");
            return None;
        }
        self.recompute_now(context, &event)
    }

    /// Immediate recompute, bypassing the debounce gate. Internal failures
    /// are suppressed: the interaction yields no update and the previous
    /// viewport stays on screen.
    #[must_use]
    pub fn recompute_now(
        &self,
        context: &ChartContext,
        event: &RelayoutEvent,
    ) -> Option<RelayoutUpdate> {
        match self.recompute(context.figure(), event) {
            Ok(update) => update,
            Err(error) => {
                debug!(error = %error, "relayout recompute failed; keeping previous viewport");
                None
            }
        }
    }

    fn recompute(
        &self,
        figure: &Figure,
        event: &RelayoutEvent,
    ) -> EngineResult<Option<RelayoutUpdate>> {
        match event.intent() {
            EventIntent::Ignore => Ok(None),
            EventIntent::Window => {
                let Some((start, end)) = event.range() else {
                    return Ok(None);
                };
                let window = XWindow::parse(start.clone(), end.clone());
                trace!(axis = %event.axis(), "parsed relayout window");

                let windowed = window_series_set(&figure.data, &window);
                let mut patch = LayoutPatch::new();
                let (display_start, display_end) = window.display_range();
                patch.set_axis_range(event.axis(), display_start.as_json(), display_end.as_json());

                if windowed.any_retained {
                    let updates = rescale_axes(&windowed.series, &figure.layout, self.config.tuning)?;
                    for update in &updates {
                        patch.apply_axis_update(update);
                    }
                    debug!(
                        series = windowed.series.len(),
                        axes = updates.len(),
                        "rescaled viewport"
                    );
                } else {
                    debug!("window retained no points; passing dataset through unchanged");
                }

                Ok(Some(RelayoutUpdate {
                    layout: patch,
                    data: windowed.series,
                }))
            }
            EventIntent::ResetToFull => {
                let mut patch = LayoutPatch::new();
                patch.set_axis_autorange(event.axis());

                let updates = rescale_axes(&figure.data, &figure.layout, self.config.tuning)?;
                for update in &updates {
                    patch.apply_axis_update(update);
                }
                debug!(axes = updates.len(), "reset viewport to full extent");

                Ok(Some(RelayoutUpdate {
                    layout: patch,
                    data: figure.data.clone(),
                }))
            }
        }
    }
}
