use crate::step::StepKind;

use super::{mark, CursorContext, Highlight, LegendEntry, StepRenderer};

/// Highlights compared and swapped neighbours and the sorted tail.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleRenderer;

impl StepRenderer for BubbleRenderer {
    fn name(&self) -> &'static str {
        "bubble"
    }

    fn highlights(&self, ctx: &CursorContext<'_>) -> Vec<Highlight> {
        let mut cells = vec![Highlight::None; ctx.width()];
        for step in ctx.shown().iter().filter(|s| s.kind() == StepKind::PassComplete) {
            mark(&mut cells, step.index_list().iter().copied(), Highlight::Sorted);
        }
        if let Some(step) = ctx.step() {
            match step.kind() {
                StepKind::Compare => {
                    mark(&mut cells, step.index_list().iter().copied(), Highlight::Compare)
                }
                StepKind::Swap => {
                    mark(&mut cells, step.index_list().iter().copied(), Highlight::Swap)
                }
                StepKind::EarlyExit | StepKind::Complete => cells.fill(Highlight::Sorted),
                _ => {}
            }
        }
        cells
    }

    fn legend(&self) -> Vec<LegendEntry> {
        vec![
            LegendEntry::new(Highlight::Compare, "adjacent pair being compared"),
            LegendEntry::new(Highlight::Swap, "pair just swapped"),
            LegendEntry::new(Highlight::Sorted, "bubbled into its final position"),
        ]
    }
}
