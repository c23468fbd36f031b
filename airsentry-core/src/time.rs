//! Time sources for bounding hardware waits
//!
//! Acquisition needs a clock only to know when a conversion has been busy
//! for too long. Sources provided:
//! - System clock (std builds)
//! - Fixed time (tests, replay)
//! - Stepping time (tests that need the clock to move while polling)
//!
//! Boards implement [`TimeSource`] over their own tick counter.

use core::cell::Cell;

/// Timestamp in milliseconds since epoch (or device boot for monotonic)
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Cell<Timestamp>,
}

impl FixedTime {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp: Cell::new(timestamp) }
    }

    /// Jump to `timestamp`
    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.set(timestamp);
    }

    /// Move forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.timestamp.set(self.timestamp.get().saturating_add(ms));
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp.get()
    }
}

/// Clock that moves forward by a fixed step every time it is read.
///
/// Lets a test drive a timeout without sleeping: each poll of a stuck ADC
/// costs `step_ms` of simulated time.
#[derive(Debug, Clone)]
pub struct SteppingTime {
    current: Cell<Timestamp>,
    step_ms: u64,
}

impl SteppingTime {
    /// Start at `start`, advancing `step_ms` per read
    pub fn new(start: Timestamp, step_ms: u64) -> Self {
        Self {
            current: Cell::new(start),
            step_ms,
        }
    }
}

impl TimeSource for SteppingTime {
    fn now(&self) -> Timestamp {
        let now = self.current.get();
        self.current.set(now.saturating_add(self.step_ms));
        now
    }
}

/// Deadline `timeout_ms` after `start`, saturating at the end of time
pub fn deadline(start: Timestamp, timeout_ms: u64) -> Timestamp {
    start.saturating_add(timeout_ms)
}
