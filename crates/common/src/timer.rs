//! Wall-clock timing for a single compute burst.
//!
//! Backed by `std::time::Instant`, which is monotonic and has sub-microsecond
//! resolution on every supported platform.

use std::time::{Duration, Instant};

/// Opaque point in time returned by [`Timer::now`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(Instant);

/// Monotonic timestamp source.
#[derive(Debug, Default, Clone, Copy)]
pub struct Timer;

impl Timer {
    pub fn now() -> Timestamp {
        Timestamp(Instant::now())
    }

    /// `end - start`, clamped to zero if the pair is mis-ordered.
    pub fn elapsed(start: Timestamp, end: Timestamp) -> Duration {
        end.0.saturating_duration_since(start.0)
    }
}
