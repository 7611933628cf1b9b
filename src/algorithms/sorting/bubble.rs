use crate::algorithms::{check_input, AlgorithmKind};
use crate::collection::{Collection, SortDirection};
use crate::error::Result;
use crate::step::{AlgorithmInfo, Step, StepKind, StepTrace, TraceRecorder};

use super::{finish, push_complete};

/// Bubble sort with early exit. Stable, in-place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BubbleSort {
    direction: SortDirection,
}

impl BubbleSort {
    /// Creates a bubble sort ordering by `direction`.
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
            kind: AlgorithmKind::Bubble,
            name: "Bubble Sort".to_string(),
            stable: true,
            in_place: true,
        }
    }

    /// Sorts a copy of `collection`.
    pub fn run(&self, collection: &Collection) -> Result<StepTrace> {
        check_input(collection)?;
        let mut recorder = TraceRecorder::new(self.info(), collection.items());
        let mut data = collection.snapshot();
        let n = data.len();

        for pass in 0..n.saturating_sub(1) {
            let mut swapped = false;
            for j in 0..n - 1 - pass {
                recorder.count_comparison();
                let description = format!("Compare {} with {}", data[j], data[j + 1]);
                recorder.push(
                    Step::new(StepKind::Compare, &data)
                        .indices([j, j + 1])
                        .describe(description),
                );

                if self.direction.out_of_order(data[j].rank(), data[j + 1].rank()) {
                    data.swap(j, j + 1);
                    recorder.count_swap();
                    swapped = true;
                    let description = format!("Swap {} and {}", data[j + 1], data[j]);
                    recorder.push(
                        Step::new(StepKind::Swap, &data)
                            .indices([j, j + 1])
                            .describe(description),
                    );
                }
            }

            let settled = n - 1 - pass;
            let description =
                format!("Pass {} complete: {} is in its final position", pass + 1, data[settled]);
            recorder.push(
                Step::new(StepKind::PassComplete, &data)
                    .indices([settled])
                    .describe(description),
            );

            if !swapped {
                let description = format!("No swaps in pass {}, the list is sorted", pass + 1);
                recorder.push(Step::new(StepKind::EarlyExit, &data).describe(description));
                return Ok(finish(recorder, collection.items(), &data, self.direction));
            }
        }

        push_complete(&mut recorder, &data);
        Ok(finish(recorder, collection.items(), &data, self.direction))
    }
}
