//! Step renderers: turn a trace position into a display-agnostic [`StepView`].
//!
//! A [`StepRenderer`] decides, per algorithm, which cells to highlight at a
//! cursor position and what the legend says. The [`RendererFactory`] maps each
//! [`AlgorithmKind`] to its renderer; callers may [`register`] their own.
//!
//! Views carry no presentation: they are plain data a terminal, web page or
//! test can consume. [`TextEncoder`] is one such consumer.
//!
//! [`register`]: RendererFactory::register

mod binary;
mod bubble;
mod linear;
mod merge;
mod quick;
mod text;

pub use binary::BinaryRenderer;
pub use bubble::BubbleRenderer;
pub use linear::LinearRenderer;
pub use merge::MergeRenderer;
pub use quick::QuickRenderer;
pub use text::{TextEncoder, TextMode};

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::algorithms::AlgorithmKind;
use crate::collection::RankedItem;
use crate::error::{Error, Result};
use crate::step::{Span, Step, StepKind, StepTrace, TraceStats};

/// Role a cell plays at the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    /// Not involved.
    #[default]
    None,
    /// Being compared.
    Compare,
    /// Just exchanged.
    Swap,
    /// In its final position.
    Sorted,
    /// Current pivot.
    Pivot,
    /// Search match.
    Found,
    /// Inside the active range.
    SearchRange,
    /// Already merged into the output range.
    Merged,
    /// Just placed.
    Insert,
    /// Binary search midpoint.
    Mid,
    /// Ruled out by the search.
    Eliminated,
}

impl Highlight {
    /// Short name, e.g. `"search_range"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::Sorted => "sorted",
            Self::Pivot => "pivot",
            Self::Found => "found",
            Self::SearchRange => "search_range",
            Self::Merged => "merged",
            Self::Insert => "insert",
            Self::Mid => "mid",
            Self::Eliminated => "eliminated",
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One legend line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Highlight being explained.
    pub highlight: Highlight,
    /// What it means for this algorithm.
    pub meaning: String,
}

impl LegendEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(highlight: Highlight, meaning: impl Into<String>) -> Self {
        Self {
            highlight,
            meaning: meaning.into(),
        }
    }
}

/// One item as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Sort key.
    pub rank: i64,
    /// Stability tag.
    pub capture_order: u64,
    /// Display label.
    pub label: String,
    /// Role at this step.
    pub highlight: Highlight,
    /// True when this item's equal-rank group was reordered by the sort.
    pub unstable: bool,
}

/// Everything needed to draw one trace position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    /// Number of steps shown so far, `0..=total`.
    pub cursor: usize,
    /// Steps in the trace.
    pub total: usize,
    /// Algorithm display name.
    pub title: String,
    /// Kind of the step shown, `None` for the initial state.
    pub kind: Option<StepKind>,
    /// What happened.
    pub description: String,
    /// Working array with highlights.
    pub cells: Vec<CellView>,
    /// Recursion depth of the step shown.
    pub depth: usize,
    /// Suggested indentation for the depth, in spaces.
    pub indent: usize,
    /// Ranges the step refers to.
    pub ranges: Vec<Span>,
    /// Legend, empty when disabled.
    pub legend: Vec<LegendEntry>,
    /// Completion, 0–100.
    pub progress: f64,
    /// Summary counters, present when statistics are enabled.
    pub stats: Option<TraceStats>,
}

impl StepView {
    /// Returns true when the view shows the end of the trace.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.cursor == self.total
    }

    /// Highlights in cell order.
    #[must_use]
    pub fn highlights(&self) -> Vec<Highlight> {
        self.cells.iter().map(|c| c.highlight).collect()
    }
}

/// Options applied by [`StepRenderer::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Include the legend.
    pub show_legend: bool,
    /// Include the summary counters.
    pub show_statistics: bool,
    /// Spaces of indentation per recursion level.
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_legend: true,
            show_statistics: true,
            indent_width: 2,
        }
    }
}

/// A trace position handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct CursorContext<'a> {
    /// The trace being played.
    pub trace: &'a StepTrace,
    /// Steps shown so far.
    pub cursor: usize,
}

impl<'a> CursorContext<'a> {
    /// Creates a context, clamping `cursor` to the trace length.
    #[must_use]
    pub fn new(trace: &'a StepTrace, cursor: usize) -> Self {
        Self {
            trace,
            cursor: cursor.min(trace.len()),
        }
    }

    /// Step on display, `None` at cursor 0.
    #[must_use]
    pub fn step(&self) -> Option<&'a Step> {
        self.cursor.checked_sub(1).and_then(|i| self.trace.get(i))
    }

    /// Steps shown so far, oldest first.
    #[must_use]
    pub fn shown(&self) -> &'a [Step] {
        &self.trace.steps()[..self.cursor]
    }

    /// Working array at this position.
    #[must_use]
    pub fn snapshot(&self) -> &'a [RankedItem] {
        self.step().map_or(self.trace.initial(), Step::snapshot)
    }

    /// Number of cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.snapshot().len()
    }

    /// Kind of the step on display.
    #[must_use]
    pub fn kind(&self) -> Option<StepKind> {
        self.step().map(Step::kind)
    }
}

/// Per-algorithm presentation logic.
pub trait StepRenderer: Send + Sync {
    /// Renderer name, used in logs.
    fn name(&self) -> &'static str;

    /// One highlight per cell for the position in `ctx`.
    fn highlights(&self, ctx: &CursorContext<'_>) -> Vec<Highlight>;

    /// Meaning of each highlight this renderer uses.
    fn legend(&self) -> Vec<LegendEntry>;

    /// Builds the full view. The default covers every built-in renderer.
    fn render(&self, ctx: &CursorContext<'_>, options: &RenderOptions) -> StepView {
        let trace = ctx.trace;
        let step = ctx.step();
        let mut highlights = self.highlights(ctx);
        highlights.resize(ctx.width(), Highlight::None);

        let unstable: BTreeSet<u64> = if ctx.cursor == trace.len() {
            trace.stability_violations().iter().flat_map(|v| v.displaced.iter().copied()).collect()
        } else {
            BTreeSet::new()
        };

        let cells = ctx
            .snapshot()
            .iter()
            .zip(highlights)
            .map(|(item, highlight)| CellView {
                rank: item.rank(),
                capture_order: item.capture_order(),
                label: item.label().to_string(),
                highlight,
                unstable: unstable.contains(&item.capture_order()),
            })
            .collect();

        let depth = step.map_or(0, Step::recursion_depth);
        let progress = if trace.is_empty() {
            100.0
        } else {
            ctx.cursor as f64 / trace.len() as f64 * 100.0
        };

        StepView {
            cursor: ctx.cursor,
            total: trace.len(),
            title: trace.name().to_string(),
            kind: step.map(Step::kind),
            description: step.map_or_else(
                || format!("Initial state: {} items", ctx.width()),
                |s| s.description().to_string(),
            ),
            cells,
            depth,
            indent: depth * options.indent_width,
            ranges: step.map(|s| s.range_list().to_vec()).unwrap_or_default(),
            legend: if options.show_legend {
                self.legend()
            } else {
                Vec::new()
            },
            progress,
            stats: options.show_statistics.then(|| *trace.stats()),
        }
    }
}

/// Lookup table from algorithm kind to renderer.
#[derive(Clone)]
pub struct RendererFactory {
    renderers: HashMap<AlgorithmKind, Arc<dyn StepRenderer>>,
}

impl Default for RendererFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RendererFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.renderers.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("RendererFactory").field("kinds", &kinds).finish()
    }
}

impl RendererFactory {
    /// Factory with the built-in renderer for every algorithm kind.
    #[must_use]
    pub fn new() -> Self {
        let binary: Arc<dyn StepRenderer> = Arc::new(BinaryRenderer);
        let mut factory = Self::empty();
        factory.register(AlgorithmKind::Bubble, Arc::new(BubbleRenderer));
        factory.register(AlgorithmKind::Merge, Arc::new(MergeRenderer));
        factory.register(AlgorithmKind::Quick, Arc::new(QuickRenderer));
        factory.register(AlgorithmKind::LinearSearch, Arc::new(LinearRenderer));
        factory.register(AlgorithmKind::BinaryIterative, Arc::clone(&binary));
        factory.register(AlgorithmKind::BinaryRecursive, binary);
        factory
    }

    /// Factory with no renderers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Installs `renderer` for `kind`, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: AlgorithmKind,
        renderer: Arc<dyn StepRenderer>,
    ) -> Option<Arc<dyn StepRenderer>> {
        self.renderers.insert(kind, renderer)
    }

    /// Returns true if `kind` has a renderer.
    #[must_use]
    pub fn contains(&self, kind: AlgorithmKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    /// Renderer for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RendererMissing`] when none is registered.
    pub fn renderer_for(&self, kind: AlgorithmKind) -> Result<Arc<dyn StepRenderer>> {
        self.renderers.get(&kind).cloned().ok_or(Error::RendererMissing(kind))
    }

    /// Renders `trace` at `cursor` with the matching renderer.
    pub fn render(
        &self,
        trace: &StepTrace,
        cursor: usize,
        options: &RenderOptions,
    ) -> Result<StepView> {
        let renderer = self.renderer_for(trace.kind())?;
        Ok(renderer.render(&CursorContext::new(trace, cursor), options))
    }
}

/// Sets `highlight` on every in-bounds index.
fn mark(cells: &mut [Highlight], indices: impl IntoIterator<Item = usize>, highlight: Highlight) {
    for i in indices {
        if let Some(cell) = cells.get_mut(i) {
            *cell = highlight;
        }
    }
}

/// Sets `highlight` on every index of `span`.
fn mark_span(cells: &mut [Highlight], span: Span, highlight: Highlight) {
    mark(cells, span.start..=span.end, highlight);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{run, RunConfig};
    use crate::collection::Collection;

    fn trace(kind: AlgorithmKind, ranks: &[i64]) -> StepTrace {
        let collection = Collection::from_ranks(ranks).unwrap();
        run(&collection, &RunConfig::new(kind).with_target(ranks[0])).unwrap()
    }

    #[test]
    fn test_factory_covers_every_kind() {
        let factory = RendererFactory::new();
        for kind in AlgorithmKind::ALL {
            assert!(factory.contains(kind), "{kind}");
        }
    }

    #[test]
    fn test_missing_renderer() {
        let factory = RendererFactory::empty();
        let err = factory.renderer_for(AlgorithmKind::Merge).err().unwrap();
        assert_eq!(err, Error::RendererMissing(AlgorithmKind::Merge));
    }

    #[test]
    fn test_register_replaces() {
        let mut factory = RendererFactory::new();
        let previous = factory.register(AlgorithmKind::Merge, Arc::new(BubbleRenderer));
        assert_eq!(previous.unwrap().name(), "merge");
        assert_eq!(factory.renderer_for(AlgorithmKind::Merge).unwrap().name(), "bubble");
    }

    #[test]
    fn test_initial_view() {
        let t = trace(AlgorithmKind::Bubble, &[3, 1, 2]);
        let view = RendererFactory::new().render(&t, 0, &RenderOptions::default()).unwrap();
        assert_eq!(view.cursor, 0);
        assert_eq!(view.kind, None);
        assert_eq!(view.description, "Initial state: 3 items");
        assert!(view.highlights().iter().all(|h| *h == Highlight::None));
        assert_eq!(view.progress, 0.0);
        assert!(!view.legend.is_empty());
        assert!(view.stats.is_some());
    }

    #[test]
    fn test_options_hide_legend_and_stats() {
        let t = trace(AlgorithmKind::Merge, &[2, 1]);
        let options = RenderOptions {
            show_legend: false,
            show_statistics: false,
            indent_width: 4,
        };
        let view = RendererFactory::new().render(&t, 1, &options).unwrap();
        assert!(view.legend.is_empty());
        assert!(view.stats.is_none());
        assert_eq!(view.indent, 0);
    }

    #[test]
    fn test_final_view_flags_unstable_items() {
        let t = trace(AlgorithmKind::Quick, &[2, 2, 2, 0]);
        let view = RendererFactory::new().render(&t, t.len(), &RenderOptions::default()).unwrap();
        assert!(view.is_final());
        assert_eq!(view.progress, 100.0);
        let flagged: Vec<u64> = view
            .cells
            .iter()
            .filter(|c| c.unstable)
            .map(|c| c.capture_order)
            .collect();
        assert!(flagged.contains(&1));

        let earlier = RendererFactory::new().render(&t, 1, &RenderOptions::default()).unwrap();
        assert!(earlier.cells.iter().all(|c| !c.unstable));
    }

    #[test]
    fn test_cursor_is_clamped() {
        let t = trace(AlgorithmKind::LinearSearch, &[5, 6]);
        let ctx = CursorContext::new(&t, 99);
        assert_eq!(ctx.cursor, t.len());
    }

    #[test]
    fn test_mark_ignores_out_of_bounds() {
        let mut cells = vec![Highlight::None; 2];
        mark(&mut cells, [1, 5], Highlight::Swap);
        assert_eq!(cells, vec![Highlight::None, Highlight::Swap]);
    }
}
