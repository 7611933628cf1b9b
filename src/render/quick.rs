use crate::step::StepKind;

use super::{mark, mark_span, CursorContext, Highlight, LegendEntry, StepRenderer};

/// Highlights the active partition, the pivot, moved items and every
/// position already fixed by an earlier partition.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickRenderer;

impl StepRenderer for QuickRenderer {
    fn name(&self) -> &'static str {
        "quick"
    }

    fn highlights(&self, ctx: &CursorContext<'_>) -> Vec<Highlight> {
        let mut cells = vec![Highlight::None; ctx.width()];
        let step = ctx.step();

        if let Some(&range) = step.and_then(|s| s.range_list().first()) {
            mark_span(&mut cells, range, Highlight::SearchRange);
        }
        for fixed in ctx.shown().iter().filter(|s| s.kind() == StepKind::MarkSorted) {
            mark(&mut cells, fixed.index_list().iter().copied(), Highlight::Sorted);
        }

        if let Some(step) = step {
            let indices = step.index_list().iter().copied();
            match step.kind() {
                StepKind::PivotSelect => mark(&mut cells, indices, Highlight::Pivot),
                StepKind::PartitionMove => mark(&mut cells, indices, Highlight::Swap),
                StepKind::Complete => cells.fill(Highlight::Sorted),
                _ => {}
            }
        }
        cells
    }

    fn legend(&self) -> Vec<LegendEntry> {
        vec![
            LegendEntry::new(Highlight::Pivot, "pivot chosen for this partition"),
            LegendEntry::new(Highlight::SearchRange, "range being partitioned"),
            LegendEntry::new(Highlight::Swap, "items just relocated"),
            LegendEntry::new(Highlight::Sorted, "pivot or equal group in its final position"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{QuickSort, SortAlgorithm};
    use crate::collection::Collection;

    #[test]
    fn test_pivot_select_view() {
        let collection = Collection::from_ranks(&[3, 1, 2]).unwrap();
        let trace = SortAlgorithm::Quick(QuickSort::default()).run(&collection).unwrap();
        let cells = QuickRenderer.highlights(&CursorContext::new(&trace, 1));
        assert_eq!(cells, vec![Highlight::Pivot, Highlight::SearchRange, Highlight::SearchRange]);
    }

    #[test]
    fn test_fixed_positions_stay_sorted() {
        let collection = Collection::from_ranks(&[1, 2, 3]).unwrap();
        let trace = SortAlgorithm::Quick(QuickSort::default()).run(&collection).unwrap();
        // PIVOT_SELECT, MARK_SORTED, then the second PIVOT_SELECT.
        let cells = QuickRenderer.highlights(&CursorContext::new(&trace, 3));
        assert_eq!(cells, vec![Highlight::Sorted, Highlight::Pivot, Highlight::SearchRange]);
    }
}
