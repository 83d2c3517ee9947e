//! Tick sources for the rolling display

use std::thread;
use std::time::{Duration, Instant};

/// Paces the rolling loop
///
/// `wait` returns when the next tick is due.
pub trait Ticker {
    fn wait(&mut self);
}

/// Wall-clock ticker with a fixed cadence
///
/// Deadlines are spaced `interval` apart rather than sleeping a full interval
/// after each tick, so slow display callbacks do not stretch the cadence. A
/// tick that is already overdue fires immediately and the schedule restarts
/// from now.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
    next: Option<Instant>,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Ticker for IntervalTicker {
    fn wait(&mut self) {
        let now = Instant::now();
        let deadline = self.next.unwrap_or(now) + self.interval;
        if deadline > now {
            thread::sleep(deadline - now);
            self.next = Some(deadline);
        } else {
            self.next = Some(now);
        }
    }
}

/// Ticker that never blocks, for tests and batch runs
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    ticks: u64,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks handed out so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Ticker for ManualTicker {
    fn wait(&mut self) {
        self.ticks += 1;
    }
}
