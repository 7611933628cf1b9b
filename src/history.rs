//! Bounded undo history.
//!
//! A fixed-capacity stack of snapshots. Pushing past capacity discards the
//! oldest snapshot, so memory stays bounded no matter how many edits a caller
//! makes.
//!
//! # Example
//!
//! ```rust
//! use sortviz::history::UndoHistory;
//!
//! let mut history = UndoHistory::new(2);
//! history.push(1);
//! history.push(2);
//! history.push(3);
//! assert_eq!(history.len(), 2); // Bounded
//! assert_eq!(history.pop(), Some(3));
//! assert_eq!(history.pop(), Some(2));
//! assert_eq!(history.pop(), None);
//! ```

use std::collections::VecDeque;

/// A fixed-capacity LIFO history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoHistory<T> {
    /// Oldest snapshot at the front, newest at the back.
    data: VecDeque<T>,
    /// Maximum capacity (never exceeded).
    capacity: usize,
}

impl<T> UndoHistory<T> {
    /// Creates a new history with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Undo history capacity must be greater than 0");
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a snapshot, discarding the oldest one when full.
    pub fn push(&mut self, value: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop_back()
    }

    /// Returns the most recent snapshot without removing it.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.data.back()
    }

    /// Returns the number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there is nothing to undo.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the maximum capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every stored snapshot.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let history: UndoHistory<u8> = UndoHistory::new(10);
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 10);
        assert_eq!(history.latest(), None);
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        let _: UndoHistory<u8> = UndoHistory::new(0);
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut history = UndoHistory::new(4);
        for i in 0..3 {
            history.push(i);
        }
        assert_eq!(history.latest(), Some(&2));
        assert_eq!(history.pop(), Some(2));
        assert_eq!(history.pop(), Some(1));
        assert_eq!(history.pop(), Some(0));
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut history = UndoHistory::new(3);
        for i in 0..10 {
            history.push(i);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.pop(), Some(9));
        assert_eq!(history.pop(), Some(8));
        assert_eq!(history.pop(), Some(7));
        assert!(history.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = UndoHistory::new(3);
        history.push("a");
        history.clear();
        assert!(history.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// History never exceeds its capacity.
        #[test]
        fn prop_history_never_exceeds_capacity(
            capacity in 1usize..64,
            pushes in 0usize..500
        ) {
            let mut history = UndoHistory::new(capacity);
            for i in 0..pushes {
                history.push(i);
            }
            prop_assert_eq!(history.len(), pushes.min(capacity));
        }

        /// The latest snapshot is always the last one pushed.
        #[test]
        fn prop_latest_is_last_pushed(
            capacity in 1usize..32,
            values in prop::collection::vec(any::<i64>(), 1..200)
        ) {
            let mut history = UndoHistory::new(capacity);
            for &v in &values {
                history.push(v);
            }
            prop_assert_eq!(history.latest(), values.last());
        }
    }
}
