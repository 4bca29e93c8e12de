use std::time::Duration;

use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Looping timer with a fixed interval, advanced by the scene's tick.
///
/// Firings are reported, not dispatched: the owner runs its callback once
/// per firing returned by [`RepeatingTimer::advance`], which keeps the
/// callback on the same single-threaded tick as everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatingTimer {
    interval_ms: u64,
    elapsed: Duration,
    fired: u64,
}

impl RepeatingTimer {
    /// An interval of zero would fire forever within one advance, so it is
    /// clamped to one millisecond.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed: Duration::ZERO,
            fired: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Total firings since creation.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Time left until the next firing.
    pub fn remaining(&self) -> Duration {
        self.interval().saturating_sub(self.elapsed)
    }

    /// Advance by `dt` and return how many times the timer fired,
    /// saturating at `u32::MAX`. [`RepeatingTimer::fired`] keeps the exact
    /// total.
    ///
    /// Overshoot carries into the next interval, so a timer driven by
    /// uneven ticks still fires at multiples of the interval.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed = self.elapsed.saturating_add(dt);
        let interval = self.interval().as_nanos();
        let elapsed = self.elapsed.as_nanos();
        let count = elapsed / interval;
        let rest = elapsed % interval;
        // rest < interval, which came from a Duration, so it fits
        self.elapsed = Duration::new(
            (rest / NANOS_PER_SEC) as u64,
            (rest % NANOS_PER_SEC) as u32,
        );
        self.fired = self
            .fired
            .saturating_add(u64::try_from(count).unwrap_or(u64::MAX));
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}
