use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::algorithms::{check_input, AlgorithmKind, PartitionScheme, PivotStrategy, DEFAULT_SEED};
use crate::analysis::partition_balance;
use crate::collection::{Collection, RankedItem, SortDirection};
use crate::error::Result;
use crate::step::{AlgorithmInfo, Span, Step, StepKind, StepTrace, TraceRecorder};

use super::{finish, push_complete};

/// Quick sort with a configurable pivot strategy and partition scheme.
/// Unstable, in-place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickSort {
    direction: SortDirection,
    pivot: PivotStrategy,
    partition: PartitionScheme,
    seed: u64,
}

impl Default for QuickSort {
    fn default() -> Self {
        Self::new(SortDirection::Ascending)
    }
}

/// Per-run mutable state threaded through the recursion.
struct Partitioner<'a> {
    data: Vec<RankedItem>,
    recorder: &'a mut TraceRecorder,
    rng: SmallRng,
}

impl QuickSort {
    /// FIRST pivot, TWO_WAY partition.
    #[must_use]
    pub fn new(direction: SortDirection) -> Self {
        Self {
            direction,
            pivot: PivotStrategy::First,
            partition: PartitionScheme::TwoWay,
            seed: DEFAULT_SEED,
        }
    }

    /// Sets the pivot strategy.
    #[must_use]
    pub fn with_pivot(mut self, pivot: PivotStrategy) -> Self {
        self.pivot = pivot;
        self
    }

    /// Sets the partition scheme.
    #[must_use]
    pub fn with_partition(mut self, partition: PartitionScheme) -> Self {
        self.partition = partition;
        self
    }

    /// Sets the seed used by RANDOM pivots.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Direction the sort orders by.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Pivot strategy.
    #[must_use]
    pub fn pivot(&self) -> PivotStrategy {
        self.pivot
    }

    /// Partition scheme.
    #[must_use]
    pub fn partition(&self) -> PartitionScheme {
        self.partition
    }

    /// Static metadata.
    #[must_use]
    pub fn info(&self) -> AlgorithmInfo {
        let scheme = match self.partition {
            PartitionScheme::TwoWay => "2-Way",
            PartitionScheme::ThreeWay => "3-Way",
        };
        AlgorithmInfo {
            kind: AlgorithmKind::Quick,
            name: format!("Quick Sort ({} Pivot, {scheme})", self.pivot.title()),
            stable: false,
            in_place: true,
        }
    }

    /// Sorts a copy of `collection`.
    pub fn run(&self, collection: &Collection) -> Result<StepTrace> {
        check_input(collection)?;
        let mut recorder = TraceRecorder::new(self.info(), collection.items());
        let mut state = Partitioner {
            data: collection.snapshot(),
            recorder: &mut recorder,
            rng: SmallRng::seed_from_u64(self.seed),
        };
        let last = state.data.len() - 1;

        self.sort_range(&mut state, 0, last, 0);

        let data = state.data;
        push_complete(&mut recorder, &data);
        Ok(finish(recorder, collection.items(), &data, self.direction))
    }

    fn sort_range(&self, state: &mut Partitioner<'_>, left: usize, right: usize, depth: usize) {
        if left >= right {
            return;
        }
        let pivot = self.select_pivot(state, left, right);
        let description = format!(
            "Select pivot {} at position {pivot} ({} strategy)",
            state.data[pivot],
            self.pivot.title()
        );
        state.recorder.push(
            Step::new(StepKind::PivotSelect, &state.data)
                .indices([pivot])
                .ranges([Span::new(left, right)])
                .depth(depth)
                .describe(description),
        );

        let (low, high) = match self.partition {
            PartitionScheme::TwoWay => {
                let slot = self.lomuto(state, left, right, pivot, depth);
                (slot, slot)
            }
            PartitionScheme::ThreeWay => self.dutch_flag(state, left, right, pivot, depth),
        };

        let balance = partition_balance(low - left, right - high, right - left + 1);
        let placed = if low == high {
            format!("Pivot {} is in its final position {low}", state.data[low])
        } else {
            format!("Equal group {} is in its final position", Span::new(low, high))
        };
        state.recorder.push(
            Step::new(StepKind::MarkSorted, &state.data)
                .indices(low..=high)
                .ranges([Span::new(left, right)])
                .depth(depth)
                .describe(format!("{placed}; partition {balance}")),
        );

        if low > left {
            self.sort_range(state, left, low - 1, depth + 1);
        }
        self.sort_range(state, high + 1, right, depth + 1);
    }

    fn select_pivot(&self, state: &mut Partitioner<'_>, left: usize, right: usize) -> usize {
        match self.pivot {
            PivotStrategy::First => left,
            PivotStrategy::Last => right,
            PivotStrategy::Random => state.rng.random_range(left..=right),
            PivotStrategy::MedianOfThree => {
                let mid = left + (right - left) / 2;
                let candidates = [left, mid, right];
                let mut ranks = candidates.map(|i| state.data[i].rank());
                ranks.sort_unstable();
                let median = ranks[1];
                candidates
                    .into_iter()
                    .find(|&i| state.data[i].rank() == median)
                    .unwrap_or(mid)
            }
        }
    }

    /// Lomuto partition with the pivot parked at `left`. Returns the pivot's
    /// final slot.
    fn lomuto(
        &self,
        state: &mut Partitioner<'_>,
        left: usize,
        right: usize,
        pivot: usize,
        depth: usize,
    ) -> usize {
        let range = Span::new(left, right);
        if pivot != left {
            move_item(state, pivot, left, range, depth, "Park pivot at the start of the range");
        }
        let pivot_rank = state.data[left].rank();

        let mut boundary = left;
        for j in left + 1..=right {
            state.recorder.count_comparison();
            if !self.direction.out_of_order(state.data[j].rank(), pivot_rank) {
                boundary += 1;
                if boundary != j {
                    move_item(state, j, boundary, range, depth, "Move to the left of the pivot");
                }
            }
        }

        if boundary != left {
            move_item(state, left, boundary, range, depth, "Move pivot into its final slot");
        }
        boundary
    }

    /// Three-way partition. Returns the inclusive bounds of the equal group.
    fn dutch_flag(
        &self,
        state: &mut Partitioner<'_>,
        left: usize,
        right: usize,
        pivot: usize,
        depth: usize,
    ) -> (usize, usize) {
        let range = Span::new(left, right);
        let pivot_rank = state.data[pivot].rank();
        let (mut lt, mut i, mut gt) = (left, left, right);

        // The pivot itself always stays in [lt, gt], so gt never drops below left.
        while i <= gt {
            state.recorder.count_comparison();
            let rank = state.data[i].rank();
            if self.direction.out_of_order(pivot_rank, rank) {
                if lt != i {
                    move_item(state, i, lt, range, depth, "Move into the lower region");
                }
                lt += 1;
                i += 1;
            } else if self.direction.out_of_order(rank, pivot_rank) {
                if i != gt {
                    move_item(state, i, gt, range, depth, "Move into the upper region");
                }
                gt -= 1;
            } else {
                i += 1;
            }
        }
        (lt, gt)
    }
}

/// Swaps `from` and `to` and records a PARTITION_MOVE.
fn move_item(
    state: &mut Partitioner<'_>,
    from: usize,
    to: usize,
    range: Span,
    depth: usize,
    action: &str,
) {
    state.data.swap(from, to);
    state.recorder.count_swap();
    let description = format!("{action}: {} goes to position {to}", state.data[to]);
    state.recorder.push(
        Step::new(StepKind::PartitionMove, &state.data)
            .indices([from, to])
            .ranges([range])
            .depth(depth)
            .describe(description),
    );
}
