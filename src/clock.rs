//! Sources of "now".
//!
//! The form samples the clock on every tick. System samples stay in the local
//! timezone, so adding days applies its daylight-saving rules. Only an explicit
//! `--at` instant is pinned to the UTC offset it was written with.

use chrono::{DateTime, Days, FixedOffset, Local, LocalResult, TimeDelta, TimeZone};
use serde::Serialize;

use crate::{Error, Result};

/// One clock sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Wall clock in the system timezone.
    Local(DateTime<Local>),
    /// Pinned to a fixed UTC offset.
    Fixed(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Same wall-clock time `days` later, resolved in this timestamp's zone.
    ///
    /// A local time that falls in a DST gap moves forward by the gap; one
    /// that is ambiguous takes the earlier offset. `None` past chrono's range.
    pub fn checked_add_days(&self, days: Days) -> Option<Self> {
        match self {
            Timestamp::Local(t) => {
                let naive = t.naive_local().checked_add_days(days)?;
                let resolved = match Local.from_local_datetime(&naive) {
                    LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => Some(t),
                    LocalResult::None => Local
                        .from_local_datetime(&naive.checked_add_signed(TimeDelta::hours(1))?)
                        .earliest(),
                };
                resolved.map(Timestamp::Local)
            }
            Timestamp::Fixed(t) => t.checked_add_days(days).map(Timestamp::Fixed),
        }
    }

    /// The instant with the offset in effect at that moment.
    pub fn fixed_offset(&self) -> DateTime<FixedOffset> {
        match self {
            Timestamp::Local(t) => t.fixed_offset(),
            Timestamp::Fixed(t) => *t,
        }
    }

    pub fn to_rfc3339(&self) -> String {
        self.fixed_offset().to_rfc3339()
    }
}

impl From<DateTime<Local>> for Timestamp {
    fn from(t: DateTime<Local>) -> Self {
        Timestamp::Local(t)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Timestamp::Fixed(t)
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock in the system's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::Local(Local::now())
    }
}

/// A clock frozen at one instant. Used by headless `--at` and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Parse an RFC 3339 timestamp, e.g. `2026-10-18T15:04:05+02:00`.
    pub fn parse(input: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(input)
            .map(FixedClock)
            .map_err(|e| Error::InvalidTimestamp {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::Fixed(self.0)
    }
}
