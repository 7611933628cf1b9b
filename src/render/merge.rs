use crate::step::StepKind;

use super::{mark, mark_span, CursorContext, Highlight, LegendEntry, StepRenderer};

/// Highlights split halves, the merge output range and placed items.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeRenderer;

impl StepRenderer for MergeRenderer {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn highlights(&self, ctx: &CursorContext<'_>) -> Vec<Highlight> {
        let mut cells = vec![Highlight::None; ctx.width()];
        let Some(step) = ctx.step() else {
            return cells;
        };
        match step.kind() {
            StepKind::Split => {
                for &range in step.range_list() {
                    mark_span(&mut cells, range, Highlight::SearchRange);
                }
            }
            StepKind::Merge => {
                let placed = step.index_list().first();
                if let (Some(range), Some(&placed)) = (step.range_list().first(), placed) {
                    mark(&mut cells, range.start..placed, Highlight::Merged);
                    mark(&mut cells, [placed], Highlight::Insert);
                }
            }
            StepKind::MarkSorted => {
                mark(&mut cells, step.index_list().iter().copied(), Highlight::Merged)
            }
            StepKind::Complete => cells.fill(Highlight::Sorted),
            _ => {}
        }
        cells
    }

    fn legend(&self) -> Vec<LegendEntry> {
        vec![
            LegendEntry::new(Highlight::SearchRange, "halves of the range being split"),
            LegendEntry::new(Highlight::Merged, "already merged into the output range"),
            LegendEntry::new(Highlight::Insert, "item just placed"),
            LegendEntry::new(Highlight::Sorted, "fully sorted"),
        ]
    }
}
