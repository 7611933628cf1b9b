use crate::step::StepKind;

use super::{mark, mark_span, CursorContext, Highlight, LegendEntry, StepRenderer};

/// Highlights the live `[low, high]` window and its midpoint. Shared by the
/// iterative and recursive variants.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryRenderer;

impl StepRenderer for BinaryRenderer {
    fn name(&self) -> &'static str {
        "binary_search"
    }

    fn highlights(&self, ctx: &CursorContext<'_>) -> Vec<Highlight> {
        let mut cells = vec![Highlight::None; ctx.width()];
        let Some(step) = ctx.step() else {
            return cells;
        };
        cells.fill(Highlight::Eliminated);
        match step.kind() {
            StepKind::RangeNarrow => {
                if let Some(&range) = step.range_list().first() {
                    mark_span(&mut cells, range, Highlight::SearchRange);
                }
                mark(&mut cells, step.index_list().iter().copied(), Highlight::Mid);
            }
            StepKind::Found => {
                mark(&mut cells, step.index_list().iter().copied(), Highlight::Found)
            }
            _ => {}
        }
        cells
    }

    fn legend(&self) -> Vec<LegendEntry> {
        vec![
            LegendEntry::new(Highlight::SearchRange, "still in the search window"),
            LegendEntry::new(Highlight::Mid, "midpoint being inspected"),
            LegendEntry::new(Highlight::Eliminated, "ruled out"),
            LegendEntry::new(Highlight::Found, "target found"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::SearchAlgorithm;
    use crate::collection::Collection;

    #[test]
    fn test_window_and_mid() {
        let collection = Collection::from_ranks(&[0, 1, 2, 2, 5, 8, 9]).unwrap();
        let trace = SearchAlgorithm::BinaryIterative.run(&collection, 5).unwrap();
        // Second lookup: window [4, 6], mid 5.
        let cells = BinaryRenderer.highlights(&CursorContext::new(&trace, 2));
        assert_eq!(cells[..4], [Highlight::Eliminated; 4]);
        assert_eq!(cells[4..], [Highlight::SearchRange, Highlight::Mid, Highlight::SearchRange]);
    }

    #[test]
    fn test_not_found_eliminates_everything() {
        let collection = Collection::from_ranks(&[1, 3]).unwrap();
        let trace = SearchAlgorithm::BinaryRecursive.run(&collection, 2).unwrap();
        let cells = BinaryRenderer.highlights(&CursorContext::new(&trace, trace.len()));
        assert!(cells.iter().all(|h| *h == Highlight::Eliminated));
    }
}
