//! Repeating scheduled callback with an explicit start/stop lifecycle.
//!
//! The callback runs on a tokio task: once immediately on `start`, then once
//! per period until `stop`. Must be started from inside a tokio runtime.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::actors::ActorHandle;
use crate::dlog_debug;

pub struct RepeatingTimer {
    period: Duration,
    handle: Option<ActorHandle>,
}

impl RepeatingTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start firing `callback`. A running timer is stopped and restarted.
    pub fn start<F>(&mut self, mut callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.stop();

        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();
        let period = self.period;
        dlog_debug!("RepeatingTimer::start period={:?}", period);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel_clone.cancelled() => break,
                    _ = interval.tick() => callback(),
                }
            }
        });

        self.handle = Some(ActorHandle::new(cancel));
    }

    /// Stop firing. Safe to call when not running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            dlog_debug!("RepeatingTimer::stop");
            handle.shutdown();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_cancelled())
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
