//! Monotonic Time Source
//!
//! Interval timing reads `CLOCK_MONOTONIC_RAW`, which is immune to NTP slewing
//! and wall-clock steps. Other Unix targets fall back to `CLOCK_MONOTONIC`.

use libc::{clockid_t, timespec};
use std::mem;

#[cfg(any(target_os = "linux", target_os = "android"))]
const MONOTONIC_CLOCK_ID: clockid_t = libc::CLOCK_MONOTONIC_RAW;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const MONOTONIC_CLOCK_ID: clockid_t = libc::CLOCK_MONOTONIC;

const NANOS_PER_SEC: f64 = 1e9;

/// A point in time as a seconds/nanoseconds pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp {
    pub secs: i64,
    pub nanos: i64,
}

impl Timestamp {
    pub fn new(secs: i64, nanos: i64) -> Self {
        Self { secs, nanos }
    }

    /// Seconds from `earlier` to `self`, as `Δsec + Δnsec / 1e9`
    pub fn seconds_since(&self, earlier: &Timestamp) -> f64 {
        (self.secs - earlier.secs) as f64 + (self.nanos - earlier.nanos) as f64 / NANOS_PER_SEC
    }
}

impl From<timespec> for Timestamp {
    fn from(ts: timespec) -> Self {
        Self {
            secs: ts.tv_sec as i64,
            nanos: ts.tv_nsec as i64,
        }
    }
}

/// Anything that can be read as a monotonic time source
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// The raw hardware-backed monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now(&self) -> Timestamp {
        read_clock(MONOTONIC_CLOCK_ID)
    }
}

#[inline(always)]
fn read_clock(id: clockid_t) -> Timestamp {
    let mut ts: timespec = unsafe { mem::zeroed() };
    // Only fails for an invalid clock id or a bad pointer, neither possible here.
    let ret = unsafe { libc::clock_gettime(id, &mut ts) };
    debug_assert_eq!(ret, 0, "clock_gettime failed");
    Timestamp::from(ts)
}
