use crate::algorithms::{check_input, AlgorithmKind};
use crate::collection::{Collection, RankedItem, SortDirection};
use crate::error::Result;
use crate::step::{AlgorithmInfo, Span, Step, StepKind, StepTrace, TraceRecorder};

use super::{finish, push_complete};

/// Top-down merge sort. Stable, out-of-place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSort {
    direction: SortDirection,
}

impl MergeSort {
    /// Creates a merge sort ordering by `direction`.
    #[must_use]
    pub fn new(direction: SortDirection) -> Self {
        Self { direction }
    }

    /// Direction the sort orders by.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Static metadata.
    #[must_use]
    pub fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            kind: AlgorithmKind::Merge,
            name: "Merge Sort".to_string(),
            stable: true,
            in_place: false,
        }
    }

    /// Sorts a copy of `collection`.
    pub fn run(&self, collection: &Collection) -> Result<StepTrace> {
        check_input(collection)?;
        let mut recorder = TraceRecorder::new(self.info(), collection.items());
        let mut data = collection.snapshot();
        let last = data.len() - 1;

        self.sort_range(&mut data, 0, last, 0, &mut recorder);

        push_complete(&mut recorder, &data);
        Ok(finish(recorder, collection.items(), &data, self.direction))
    }

    fn sort_range(
        &self,
        data: &mut [RankedItem],
        left: usize,
        right: usize,
        depth: usize,
        recorder: &mut TraceRecorder,
    ) {
        if left >= right {
            return;
        }
        let mid = left + (right - left) / 2;
        let description = format!(
            "Split {} into {} and {}",
            Span::new(left, right),
            Span::new(left, mid),
            Span::new(mid + 1, right)
        );
        recorder.push(
            Step::new(StepKind::Split, data)
                .indices([left, mid, right])
                .ranges([Span::new(left, mid), Span::new(mid + 1, right)])
                .depth(depth)
                .describe(description),
        );

        self.sort_range(data, left, mid, depth + 1, recorder);
        self.sort_range(data, mid + 1, right, depth + 1, recorder);
        self.merge(data, left, mid, right, depth, recorder);
    }

    fn merge(
        &self,
        data: &mut [RankedItem],
        left: usize,
        mid: usize,
        right: usize,
        depth: usize,
        recorder: &mut TraceRecorder,
    ) {
        let left_half = data[left..=mid].to_vec();
        let right_half = data[mid + 1..=right].to_vec();
        let range = Span::new(left, right);
        let (mut i, mut j) = (0, 0);

        for k in left..=right {
            let take_right = if i < left_half.len() && j < right_half.len() {
                recorder.count_comparison();
                // Strict comparison keeps ties on the left.
                self.direction.out_of_order(left_half[i].rank(), right_half[j].rank())
            } else {
                i >= left_half.len()
            };

            let item = if take_right {
                j += 1;
                &right_half[j - 1]
            } else {
                i += 1;
                &left_half[i - 1]
            };
            data[k] = item.clone();
            recorder.count_swap();

            let side = if take_right { "right" } else { "left" };
            let description = format!("Place {item} from the {side} half at position {k}");
            recorder.push(
                Step::new(StepKind::Merge, data)
                    .indices([k])
                    .ranges([range])
                    .depth(depth)
                    .describe(description),
            );
        }

        recorder.push(
            Step::new(StepKind::MarkSorted, data)
                .indices(left..=right)
                .ranges([range])
                .depth(depth)
                .describe(format!("Merged range {range} is sorted")),
        );
    }
}
