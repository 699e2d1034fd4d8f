use std::hint::black_box;

use crate::clock::{Clock, MonotonicClock};

/// The project's main computational work, kept apart from start-up and
/// wrap-up so it can be benchmarked on its own.
///
/// Placeholder: reads the monotonic clock and returns.
pub fn main_functions() {
    black_box(MonotonicClock.now());
}
