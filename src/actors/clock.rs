//! Clock actor: samples the clock on a fixed period and posts ticks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::clock::Clock;
use crate::config::DEFAULT_TICK_INTERVAL_MS;
use crate::tea::Message;
use crate::timer::RepeatingTimer;
use crate::{dlog_debug, dlog_trace};

const TICK_INTERVAL: Duration = Duration::from_millis(DEFAULT_TICK_INTERVAL_MS);

pub struct ClockActor {
    msg_tx: mpsc::UnboundedSender<Message>,
    clock: Arc<dyn Clock>,
    timer: RepeatingTimer,
}

impl ClockActor {
    pub fn new(msg_tx: mpsc::UnboundedSender<Message>, clock: Arc<dyn Clock>) -> Self {
        Self {
            msg_tx,
            clock,
            timer: RepeatingTimer::new(TICK_INTERVAL),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.timer = RepeatingTimer::new(interval);
        self
    }

    /// Begin ticking; the first tick is sent immediately.
    pub fn start(&mut self) {
        dlog_debug!("ClockActor::start interval={:?}", self.timer.period());
        let tx = self.msg_tx.clone();
        let clock = self.clock.clone();
        self.timer.start(move || {
            let now = clock.now();
            dlog_trace!("ClockActor tick {}", now.to_rfc3339());
            if tx.send(Message::Tick(now)).is_err() {
                dlog_trace!("ClockActor: message channel closed");
            }
        });
    }

    pub fn stop(&mut self) {
        dlog_debug!("ClockActor::stop");
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }
}
