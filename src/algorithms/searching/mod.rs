//! Searching family: linear and binary search.

mod binary;
mod linear;

pub use binary::max_lookups;

use crate::algorithms::AlgorithmKind;
use crate::collection::Collection;
use crate::error::Result;
use crate::step::{AlgorithmInfo, StepTrace};

/// Closed family of searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchAlgorithm {
    /// Scan from the front, no ordering precondition.
    Linear,
    /// Loop-based bisection over ascending input.
    BinaryIterative,
    /// Recursive bisection over ascending input.
    BinaryRecursive,
}

impl SearchAlgorithm {
    /// Algorithm tag.
    #[must_use]
    pub fn kind(self) -> AlgorithmKind {
        match self {
            Self::Linear => AlgorithmKind::LinearSearch,
            Self::BinaryIterative => AlgorithmKind::BinaryIterative,
            Self::BinaryRecursive => AlgorithmKind::BinaryRecursive,
        }
    }

    /// Static metadata. Searches never reorder, so they are reported as
    /// stable and in-place.
    #[must_use]
    pub fn info(self) -> AlgorithmInfo {
        let name = match self {
            Self::Linear => "Linear Search",
            Self::BinaryIterative => "Binary Search (Iterative)",
            Self::BinaryRecursive => "Binary Search (Recursive)",
        };
        AlgorithmInfo {
            kind: self.kind(),
            name: name.to_string(),
            stable: true,
            in_place: true,
        }
    }

    /// Searches `collection` for an item ranked `target`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) for an empty
    /// collection, [`Error::UnsortedInput`](crate::Error::UnsortedInput) when
    /// a binary search gets input that is not sorted ascending.
    pub fn run(self, collection: &Collection, target: i64) -> Result<StepTrace> {
        match self {
            Self::Linear => linear::run(self.info(), collection, target),
            Self::BinaryIterative => binary::run(self.info(), collection, target, false),
            Self::BinaryRecursive => binary::run(self.info(), collection, target, true),
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::step::StepKind;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Binary search finds a present target and every lookup stays in bounds.
        #[test]
        fn prop_binary_search_lookups_stay_in_range(
            mut ranks in prop::collection::vec(-50i64..50, 1..60),
            target in -55i64..55,
            recursive in any::<bool>()
        ) {
            ranks.sort_unstable();
            let collection = Collection::from_ranks(&ranks).unwrap();
            let search = if recursive {
                SearchAlgorithm::BinaryRecursive
            } else {
                SearchAlgorithm::BinaryIterative
            };
            let trace = search.run(&collection, target).unwrap();

            for step in trace.iter().filter(|s| s.kind() == StepKind::RangeNarrow) {
                let mid = step.index_list()[0];
                prop_assert!(step.range_list()[0].contains(mid));
            }
            prop_assert!(trace.count(StepKind::RangeNarrow) <= max_lookups(ranks.len()));

            match trace.found_index() {
                Some(i) => prop_assert_eq!(ranks[i], target),
                None => prop_assert!(!ranks.contains(&target)),
            }
            prop_assert!(trace.steps().last().unwrap().kind().is_terminal());
        }

        /// Linear search agrees with a plain scan.
        #[test]
        fn prop_linear_search_finds_first_match(
            ranks in prop::collection::vec(-10i64..10, 1..40),
            target in -12i64..12
        ) {
            let collection = Collection::from_ranks(&ranks).unwrap();
            let trace = SearchAlgorithm::Linear.run(&collection, target).unwrap();
            prop_assert_eq!(trace.found_index(), ranks.iter().position(|&r| r == target));
        }
    }
}
