use std::time::SystemTime;

use time::OffsetDateTime;

/// A source of "now" for timestamp validation.
///
/// Implementations return UTC wall-clock time. The validator calls this once
/// per instruction.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time from `std::time::SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::from(SystemTime::now())
    }
}

/// A clock driven by the CPU's Time-Stamp Counter via `quanta`.
///
/// It anchors to the wall clock at construction and advances with TSC ticks,
/// so it never jumps backwards when NTP adjusts the system time.
#[derive(Debug, Clone)]
pub struct QuantaClock {
    clock: quanta::Clock,
    start_wall: OffsetDateTime,
    start_instant: quanta::Instant,
}

impl Default for QuantaClock {
    fn default() -> Self {
        let clock = quanta::Clock::new();
        let start_instant = clock.now();
        Self {
            clock,
            start_wall: OffsetDateTime::from(SystemTime::now()),
            start_instant,
        }
    }
}

impl QuantaClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for QuantaClock {
    fn now(&self) -> OffsetDateTime {
        let delta = self.clock.now().duration_since(self.start_instant);
        self.start_wall + delta
    }
}

/// A clock frozen at a single instant. Useful for deterministic validation.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
