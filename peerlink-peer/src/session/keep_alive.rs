use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::debug;

/// Periodic PING timer owned by the session loop.
///
/// Started once when signaling becomes ready and stopped once when the session closes; while
/// stopped, [`KeepAlive::tick`] never completes.
pub(super) struct KeepAlive {
    period: Duration,
    interval: Option<Interval>,
}

impl KeepAlive {
    pub(super) fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub(super) fn start(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        debug!("Keep-alive started ({:?})", self.period);
    }

    pub(super) fn stop(&mut self) {
        if self.interval.take().is_some() {
            debug!("Keep-alive stopped");
        }
    }

    pub(super) fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub(super) async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
