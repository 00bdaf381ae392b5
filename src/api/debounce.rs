use std::time::Duration;

use super::RelayoutEvent;

/// Coalesces a gesture burst into a single pending event.
///
/// Hosts tick the gate with explicit elapsed durations instead of wall-clock
/// timers, so a superseded event is simply dropped when a newer one arrives
/// and tests can drive time deterministically. Synthetic events bypass the
/// gate entirely.
#[derive(Debug)]
pub struct RelayoutDebouncer {
    quiet_period: Duration,
    pending: Option<RelayoutEvent>,
    idle_for: Duration,
}

impl RelayoutDebouncer {
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            idle_for: Duration::ZERO,
        }
    }

    /// Queues `event` as the pending computation, discarding any superseded
    /// one, and restarts the quiet period. Synthetic events are handed
    /// straight back for immediate processing.
    pub fn submit(&mut self, event: RelayoutEvent) -> Option<RelayoutEvent> {
        if event.is_synthetic() {
            // A synthetic re-dispatch also supersedes whatever was queued.
            self.cancel();
            return Some(event);
        }
        self.pending = Some(event);
        self.idle_for = Duration::ZERO;
        None
    }

    /// Advances the quiet-period clock; returns the pending event once the
    /// full quiet period has elapsed without a newer submission.
    pub fn advance(&mut self, elapsed: Duration) -> Option<RelayoutEvent> {
        self.pending.as_ref()?;
        self.idle_for = self.idle_for.saturating_add(elapsed);
        if self.idle_for >= self.quiet_period {
            self.idle_for = Duration::ZERO;
            return self.pending.take();
        }
        None
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.idle_for = Duration::ZERO;
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
