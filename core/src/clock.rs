//! Simulation clock — owns tick count and the tick interval.
//!
//! Wall-clock time for ledger timestamps flows through a TimeSource so
//! tests can pin it.

use crate::types::Tick;
use chrono::{NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub current_tick: Tick,
    pub interval_ms:  u64,
}

impl SimClock {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            current_tick: 0,
            interval_ms,
        }
    }

    /// Advance one tick. Returns the new tick number.
    pub fn advance(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SimClock {
    fn default() -> Self { Self::new(DEFAULT_TICK_INTERVAL_MS) }
}

/// Source of "now" for ledger timestamps. Second precision, UTC.
pub trait TimeSource: Send {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> NaiveDateTime {
        let now = Utc::now().naive_utc();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub NaiveDateTime);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> NaiveDateTime { self.0 }
}
