//! Cooperative playback timer.
//!
//! The timer never sleeps or spawns. The caller feeds it elapsed time (from a
//! UI frame loop, a test, or a real clock) and it answers how many steps are
//! due.

use std::time::Duration;

/// Accumulates elapsed time and converts it into whole step intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTimer {
    interval: Duration,
    accumulated: Duration,
}

impl PlaybackTimer {
    /// Shortest interval accepted; zero would make every tick unbounded.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Creates a timer firing every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Self::MIN_INTERVAL),
            accumulated: Duration::ZERO,
        }
    }

    /// Step interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the interval, keeping accumulated time.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Self::MIN_INTERVAL);
    }

    /// Time carried over towards the next step.
    #[must_use]
    pub fn pending(&self) -> Duration {
        self.accumulated
    }

    /// Adds `elapsed` and returns how many whole intervals are now due,
    /// saturating at `u32::MAX`.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let total = self.accumulated.saturating_add(elapsed);
        let interval = self.interval.as_nanos();
        let due = total.as_nanos() / interval;
        let remainder = total.as_nanos() % interval;
        // The remainder is below the interval, which itself fits a Duration.
        self.accumulated = Duration::from_nanos(u64::try_from(remainder).unwrap_or(u64::MAX));
        u32::try_from(due).unwrap_or(u32::MAX)
    }

    /// Drops accumulated time.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

impl Default for PlaybackTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Splitting elapsed time into chunks never changes the total due.
        #[test]
        fn prop_chunking_is_irrelevant(
            interval_ms in 1u64..500,
            chunks in prop::collection::vec(0u64..1000, 0..50)
        ) {
            let mut timer = PlaybackTimer::new(Duration::from_millis(interval_ms));
            let due: u64 = chunks
                .iter()
                .map(|&c| u64::from(timer.advance(Duration::from_millis(c))))
                .sum();
            let total: u64 = chunks.iter().sum();
            prop_assert_eq!(due, total / interval_ms);
            prop_assert!(timer.pending() < timer.interval());
        }
    }
}
