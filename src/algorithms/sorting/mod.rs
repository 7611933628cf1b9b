//! Sorting family: bubble, merge and quick sort.

mod bubble;
mod merge;
mod quick;

pub use bubble::BubbleSort;
pub use merge::MergeSort;
pub use quick::QuickSort;

use crate::algorithms::AlgorithmKind;
use crate::analysis::stability_violations;
use crate::collection::{Collection, RankedItem, SortDirection};
use crate::error::Result;
use crate::step::{Outcome, Step, StepKind, StepTrace, TraceRecorder};

/// Closed family of sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    /// Bubble sort.
    Bubble(BubbleSort),
    /// Merge sort.
    Merge(MergeSort),
    /// Quick sort.
    Quick(QuickSort),
}

impl SortAlgorithm {
    /// Algorithm tag.
    #[must_use]
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Bubble(_) => AlgorithmKind::Bubble,
            Self::Merge(_) => AlgorithmKind::Merge,
            Self::Quick(_) => AlgorithmKind::Quick,
        }
    }

    /// Direction the sort orders by.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        match self {
            Self::Bubble(sort) => sort.direction(),
            Self::Merge(sort) => sort.direction(),
            Self::Quick(sort) => sort.direction(),
        }
    }

    /// Sorts a copy of `collection`, recording every step.
    pub fn run(&self, collection: &Collection) -> Result<StepTrace> {
        match self {
            Self::Bubble(sort) => sort.run(collection),
            Self::Merge(sort) => sort.run(collection),
            Self::Quick(sort) => sort.run(collection),
        }
    }
}

/// Emits the closing COMPLETE step.
fn push_complete(recorder: &mut TraceRecorder, working: &[RankedItem]) {
    let description = format!(
        "Sorting complete: {} comparisons, {} swaps",
        recorder.comparisons(),
        recorder.swaps()
    );
    recorder.push(Step::new(StepKind::Complete, working).describe(description));
}

/// Builds the trace, checking the output for stability violations.
fn finish(
    recorder: TraceRecorder,
    input: &[RankedItem],
    output: &[RankedItem],
    direction: SortDirection,
) -> StepTrace {
    let violations = stability_violations(input, output);
    if !violations.is_empty() {
        tracing::debug!(target: "sortviz::trace", groups = violations.len(), "stability violated");
    }
    recorder.finish(Outcome::Sorted {
        direction,
        stability_violations: violations,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::algorithms::{PartitionScheme, PivotStrategy};
    use proptest::prelude::*;

    fn all_sorts(direction: SortDirection, seed: u64) -> Vec<SortAlgorithm> {
        let mut sorts = vec![
            SortAlgorithm::Bubble(BubbleSort::new(direction)),
            SortAlgorithm::Merge(MergeSort::new(direction)),
        ];
        for pivot in [
            PivotStrategy::First,
            PivotStrategy::Last,
            PivotStrategy::MedianOfThree,
            PivotStrategy::Random,
        ] {
            for partition in [PartitionScheme::TwoWay, PartitionScheme::ThreeWay] {
                sorts.push(SortAlgorithm::Quick(
                    QuickSort::new(direction)
                        .with_pivot(pivot)
                        .with_partition(partition)
                        .with_seed(seed),
                ));
            }
        }
        sorts
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Final ranks equal the sorted input multiset.
        #[test]
        fn prop_final_is_sorted_permutation(
            ranks in prop::collection::vec(-5i64..5, 1..30),
            descending in any::<bool>(),
            seed in any::<u64>()
        ) {
            let direction = if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            let collection = Collection::from_ranks(&ranks).unwrap();
            let mut expected = ranks.clone();
            expected.sort_unstable();
            if descending {
                expected.reverse();
            }
            for sort in all_sorts(direction, seed) {
                let trace = sort.run(&collection).unwrap();
                let got: Vec<i64> = trace.final_snapshot().iter().map(RankedItem::rank).collect();
                prop_assert_eq!(&got, &expected);
                prop_assert_eq!(trace.initial(), collection.items());
            }
        }

        /// Bubble and merge sort never produce stability violations.
        #[test]
        fn prop_stable_sorts_have_no_violations(
            ranks in prop::collection::vec(0i64..4, 1..40),
            descending in any::<bool>()
        ) {
            let direction = if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            let collection = Collection::from_ranks(&ranks).unwrap();
            for sort in [
                SortAlgorithm::Bubble(BubbleSort::new(direction)),
                SortAlgorithm::Merge(MergeSort::new(direction)),
            ] {
                let trace = sort.run(&collection).unwrap();
                prop_assert!(trace.stability_violations().is_empty());
            }
        }

        /// Traces are deterministic for a fixed configuration.
        #[test]
        fn prop_runs_are_deterministic(
            ranks in prop::collection::vec(-10i64..10, 1..25),
            seed in any::<u64>()
        ) {
            let collection = Collection::from_ranks(&ranks).unwrap();
            for sort in all_sorts(SortDirection::Ascending, seed) {
                let a = sort.run(&collection).unwrap();
                let b = sort.run(&collection).unwrap();
                prop_assert_eq!(a.steps(), b.steps());
            }
        }
    }
}
