//! The "now" line drawn across the week grid.

use super::CalendarSettings;
use chrono::NaiveDateTime;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

/// Offset of the "now" line for `now`, or `None` outside the visible hours.
#[must_use]
pub fn now_indicator_offset(settings: &CalendarSettings, now: NaiveDateTime) -> Option<f64> {
    settings.now_offset(now)
}

/// Periodically recomputes the "now" offset from a clock.
///
/// The ticker owns its background task: dropping the ticker stops it, and
/// subscribers then observe a closed channel.
#[derive(Debug)]
pub struct NowIndicatorTicker {
    receiver: watch::Receiver<Option<f64>>,
    handle: JoinHandle<()>,
}

impl NowIndicatorTicker {
    /// Refresh period used by the calendar view.
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

    const MIN_PERIOD: Duration = Duration::from_millis(1);

    /// Computes the current offset and spawns the refresh task.
    ///
    /// A zero `period` is raised to one millisecond.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn spawn<C>(settings: CalendarSettings, clock: Arc<C>, period: Duration) -> Self
    where
        C: Clock + Send + Sync + 'static,
    {
        let initial = settings.now_offset(clock.local().naive_local());
        let (sender, receiver) = watch::channel(initial);
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period.max(Self::MIN_PERIOD));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;
            loop {
                interval.tick().await;
                let offset = settings.now_offset(clock.local().naive_local());
                trace!(?offset, "now indicator refreshed");
                if sender.send(offset).is_err() {
                    break;
                }
            }
        });
        Self { receiver, handle }
    }

    /// Returns the latest offset.
    #[must_use]
    pub fn current(&self) -> Option<f64> {
        *self.receiver.borrow()
    }

    /// Returns a receiver notified on every refresh.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<f64>> {
        self.receiver.clone()
    }

    /// Returns `true` while the refresh task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for NowIndicatorTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
