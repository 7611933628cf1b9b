use crate::step::StepKind;

use super::{mark, CursorContext, Highlight, LegendEntry, StepRenderer};

/// Highlights the scanned prefix and the item under comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRenderer;

impl StepRenderer for LinearRenderer {
    fn name(&self) -> &'static str {
        "linear_search"
    }

    fn highlights(&self, ctx: &CursorContext<'_>) -> Vec<Highlight> {
        let mut cells = vec![Highlight::None; ctx.width()];
        let Some(step) = ctx.step() else {
            return cells;
        };
        let current = step.index_list().first().copied();
        match (step.kind(), current) {
            (StepKind::Compare, Some(i)) => {
                mark(&mut cells, 0..i, Highlight::Eliminated);
                mark(&mut cells, [i], Highlight::Compare);
            }
            (StepKind::Found, Some(i)) => {
                mark(&mut cells, 0..i, Highlight::Eliminated);
                mark(&mut cells, [i], Highlight::Found);
            }
            (StepKind::NotFound, _) => cells.fill(Highlight::Eliminated),
            _ => {}
        }
        cells
    }

    fn legend(&self) -> Vec<LegendEntry> {
        vec![
            LegendEntry::new(Highlight::Compare, "item compared with the target"),
            LegendEntry::new(Highlight::Eliminated, "already checked"),
            LegendEntry::new(Highlight::Found, "target found"),
        ]
    }
}
