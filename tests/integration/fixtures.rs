//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Loading a localizer for a locale tag
//! - Fixed and stepping clocks
//! - A harness that runs `update` and executes its commands

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeDelta};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use datenum::actors::ClockActor;
use datenum::bindings::Localizer;
use datenum::clock::{Clock, FixedClock, Timestamp};
use datenum::locale::{LocaleProfile, LocaleTag};
use datenum::tea::{update, Command, Message, Model};

/// Instant used by every fixed clock in the suite.
pub const NOW: &str = "2026-10-18T15:04:05+02:00";

pub fn instant(rfc3339: &str) -> DateTime<FixedOffset> {
    FixedClock::parse(rfc3339).expect("valid timestamp").0
}

pub fn at(rfc3339: &str) -> Timestamp {
    Timestamp::Fixed(instant(rfc3339))
}

pub fn localizer(tag: &str) -> Arc<Localizer> {
    let tag = LocaleTag::parse(tag).expect("valid tag");
    let profile = LocaleProfile::lookup(&tag).expect("supported locale");
    Arc::new(Localizer::load(profile, None).expect("embedded bundles load"))
}

/// Advances by `step` every time it is read.
pub struct SteppingClock {
    start: DateTime<FixedOffset>,
    step: TimeDelta,
    reads: AtomicI64,
}

impl SteppingClock {
    pub fn new(start: DateTime<FixedOffset>, step: TimeDelta) -> Self {
        Self {
            start,
            step,
            reads: AtomicI64::new(0),
        }
    }

    pub fn reads(&self) -> i64 {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Timestamp {
        let n = self.reads.fetch_add(1, Ordering::SeqCst) as i32;
        Timestamp::Fixed(self.start + self.step * n)
    }
}

pub fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::empty()))
}

pub fn ctrl(c: char) -> Message {
    Message::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

/// Model plus a live clock actor, wired the way the logic thread wires them.
pub struct AppHarness {
    pub model: Model,
    pub actor: ClockActor,
    pub rx: mpsc::UnboundedReceiver<Message>,
    pub commands: Vec<Command>,
    pub quit: bool,
}

impl AppHarness {
    pub fn new(tag: &str, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            model: Model::new(localizer(tag)),
            actor: ClockActor::new(tx, clock).with_interval(interval),
            rx,
            commands: Vec::new(),
            quit: false,
        }
    }

    pub fn fixed(tag: &str) -> Self {
        Self::new(
            tag,
            Arc::new(FixedClock::parse(NOW).expect("valid timestamp")),
            Duration::from_millis(500),
        )
    }

    /// Apply one message and execute the commands it produces.
    pub fn send(&mut self, msg: Message) {
        for cmd in update(&mut self.model, msg) {
            self.commands.push(cmd);
            match cmd {
                Command::StartClock => self.actor.start(),
                Command::StopClock => self.actor.stop(),
                Command::Quit => self.quit = true,
            }
        }
    }

    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.send(key(KeyCode::Char(c)));
        }
    }

    /// Feed every queued tick back through `update`. Returns how many there were.
    pub fn pump_ticks(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.send(msg);
            count += 1;
        }
        count
    }
}
