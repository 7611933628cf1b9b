//! Step and trace data model.
//!
//! Every algorithm run produces one [`StepTrace`]: an ordered, immutable log
//! of [`Step`]s plus summary counters and static algorithm metadata. Each step
//! carries a full snapshot of the working array *after* the step's effect, so
//! any step can be shown without replaying the ones before it.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::algorithms::{AlgorithmKind, ConfigWarning};
use crate::analysis::StabilityViolation;
use crate::collection::{RankedItem, SortDirection};

/// Kind of instrumented event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    /// Two items (or an item and the target) are compared.
    Compare,
    /// Two items exchange positions.
    Swap,
    /// A range is divided into two sub-ranges.
    Split,
    /// An item is placed into a merged output range.
    Merge,
    /// A pivot is chosen for partitioning.
    PivotSelect,
    /// An item is relocated while partitioning.
    PartitionMove,
    /// A binary search lookup narrows `[low, high]`.
    RangeNarrow,
    /// The search target was found.
    Found,
    /// The search target is absent.
    NotFound,
    /// A full bubble pass finished.
    PassComplete,
    /// A pass made no swaps, so the sort stops early.
    EarlyExit,
    /// One or more items reached their final position.
    MarkSorted,
    /// The sort finished.
    Complete,
}

impl StepKind {
    /// Upper-case event name, e.g. `"PIVOT_SELECT"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compare => "COMPARE",
            Self::Swap => "SWAP",
            Self::Split => "SPLIT",
            Self::Merge => "MERGE",
            Self::PivotSelect => "PIVOT_SELECT",
            Self::PartitionMove => "PARTITION_MOVE",
            Self::RangeNarrow => "RANGE_NARROW",
            Self::Found => "FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::PassComplete => "PASS_COMPLETE",
            Self::EarlyExit => "EARLY_EXIT",
            Self::MarkSorted => "MARK_SORTED",
            Self::Complete => "COMPLETE",
        }
    }

    /// Returns true for the events that end a run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::NotFound | Self::EarlyExit | Self::Complete)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inclusive index range `[start, end]` into the working array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// First index in the range.
    pub start: usize,
    /// Last index in the range (inclusive).
    pub end: usize,
}

impl Span {
    /// Creates a span. `start > end` denotes an empty range.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns true if `index` lies inside the span.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Number of indices covered.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Returns true if the span covers no index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.start, self.end)
    }
}

/// A single immutable event in an algorithm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    kind: StepKind,
    indices: Vec<usize>,
    ranges: Vec<Span>,
    depth: usize,
    description: String,
    snapshot: Vec<RankedItem>,
}

impl Step {
    /// Starts a step of `kind` over the current working state.
    pub(crate) fn new(kind: StepKind, working: &[RankedItem]) -> Self {
        Self {
            kind,
            indices: Vec::new(),
            ranges: Vec::new(),
            depth: 0,
            description: String::new(),
            snapshot: working.to_vec(),
        }
    }

    pub(crate) fn indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices = indices.into_iter().collect();
        self
    }

    pub(crate) fn ranges(mut self, ranges: impl IntoIterator<Item = Span>) -> Self {
        self.ranges = ranges.into_iter().collect();
        self
    }

    pub(crate) fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub(crate) fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// What happened.
    #[must_use]
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Positions involved, as indices into the working array.
    #[must_use]
    pub fn index_list(&self) -> &[usize] {
        &self.indices
    }

    /// Sub-ranges involved (split halves, search bounds, partition regions).
    #[must_use]
    pub fn range_list(&self) -> &[Span] {
        &self.ranges
    }

    /// Recursion depth, 0 for iterative algorithms.
    #[must_use]
    pub fn recursion_depth(&self) -> usize {
        self.depth
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Working array after this step.
    #[must_use]
    pub fn snapshot(&self) -> &[RankedItem] {
        &self.snapshot
    }

    /// Ranks of the snapshot in order.
    #[must_use]
    pub fn snapshot_ranks(&self) -> Vec<i64> {
        self.snapshot.iter().map(RankedItem::rank).collect()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices = self.indices.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        write!(
            f,
            "[{}] indices=[{}] depth={}: {}",
            self.kind, indices, self.depth, self.description
        )
    }
}

/// Static metadata of the algorithm that produced a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    /// Algorithm tag, used for renderer dispatch.
    pub kind: AlgorithmKind,
    /// Display name including configuration, e.g. `"Quick Sort (First Pivot, 2-Way)"`.
    pub name: String,
    /// Whether equal ranks keep their relative order.
    pub stable: bool,
    /// Whether the algorithm works without a full-size auxiliary buffer.
    pub in_place: bool,
}

impl AlgorithmInfo {
    /// Name with its properties, e.g. `"Merge Sort (Stable, Out-of-place)"`.
    #[must_use]
    pub fn description(&self) -> String {
        let stability = if self.stable { "Stable" } else { "Unstable" };
        let memory = if self.in_place {
            "In-place"
        } else {
            "Out-of-place"
        };
        format!("{} ({stability}, {memory})", self.name)
    }
}

/// Summary counters of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TraceStats {
    /// Rank comparisons performed.
    pub comparisons: usize,
    /// Swaps for in-place sorts, element placements for merge sort.
    pub swaps: usize,
    /// Deepest recursion level reached.
    pub max_depth: usize,
    /// Wall-clock time spent generating the trace.
    pub elapsed: Duration,
}

/// What a run produced besides its steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A sort finished.
    Sorted {
        /// Direction the sort ordered by.
        direction: SortDirection,
        /// Rank groups whose capture orders changed relative order.
        stability_violations: Vec<StabilityViolation>,
    },
    /// A search finished.
    Search {
        /// Rank that was searched for.
        target: i64,
        /// Index of the match in the working array, if any. Among equal
        /// ranks this is whichever match the algorithm reached first.
        found: Option<usize>,
    },
}

/// The complete, immutable log of one algorithm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTrace {
    info: AlgorithmInfo,
    initial: Vec<RankedItem>,
    steps: Vec<Step>,
    stats: TraceStats,
    outcome: Outcome,
    warnings: Vec<ConfigWarning>,
}

impl StepTrace {
    /// Algorithm metadata.
    #[must_use]
    pub fn info(&self) -> &AlgorithmInfo {
        &self.info
    }

    /// Algorithm tag.
    #[must_use]
    pub fn kind(&self) -> AlgorithmKind {
        self.info.kind
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the run produced no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps in order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Step at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Iterates over the steps in order.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Number of steps of `kind`.
    #[must_use]
    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }

    /// Summary counters.
    #[must_use]
    pub fn stats(&self) -> &TraceStats {
        &self.stats
    }

    /// Working array before the first step.
    #[must_use]
    pub fn initial(&self) -> &[RankedItem] {
        &self.initial
    }

    /// Working array after the last step.
    #[must_use]
    pub fn final_snapshot(&self) -> &[RankedItem] {
        self.steps.last().map_or(&self.initial, |s| &s.snapshot)
    }

    /// Run result.
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Stability violations of a sort; empty for searches.
    #[must_use]
    pub fn stability_violations(&self) -> &[StabilityViolation] {
        match &self.outcome {
            Outcome::Sorted { stability_violations, .. } => stability_violations,
            Outcome::Search { .. } => &[],
        }
    }

    /// Index of a search match, if this was a successful search.
    #[must_use]
    pub fn found_index(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Search { found, .. } => found,
            Outcome::Sorted { .. } => None,
        }
    }

    /// Non-fatal configuration mismatches recorded for this run.
    #[must_use]
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }
}

impl StepTrace {
    pub(crate) fn with_warnings(mut self, warnings: Vec<ConfigWarning>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps and counters while an algorithm runs.
#[derive(Debug)]
pub(crate) struct TraceRecorder {
    info: AlgorithmInfo,
    initial: Vec<RankedItem>,
    steps: Vec<Step>,
    stats: TraceStats,
    started: Instant,
}

impl TraceRecorder {
    pub(crate) fn new(info: AlgorithmInfo, initial: &[RankedItem]) -> Self {
        Self {
            info,
            initial: initial.to_vec(),
            steps: Vec::new(),
            stats: TraceStats::default(),
            started: Instant::now(),
        }
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.stats.max_depth = self.stats.max_depth.max(step.depth);
        self.steps.push(step);
    }

    pub(crate) fn count_comparison(&mut self) -> usize {
        self.stats.comparisons += 1;
        self.stats.comparisons
    }

    pub(crate) fn count_swap(&mut self) -> usize {
        self.stats.swaps += 1;
        self.stats.swaps
    }

    pub(crate) fn comparisons(&self) -> usize {
        self.stats.comparisons
    }

    pub(crate) fn swaps(&self) -> usize {
        self.stats.swaps
    }

    pub(crate) fn finish(self, outcome: Outcome) -> StepTrace {
        let mut stats = self.stats;
        stats.elapsed = self.started.elapsed();
        tracing::debug!(
            target: "sortviz::trace",
            algorithm = %self.info.name,
            steps = self.steps.len(),
            comparisons = stats.comparisons,
            swaps = stats.swaps,
            max_depth = stats.max_depth,
            elapsed_us = stats.elapsed.as_micros() as u64,
            "trace generated"
        );
        StepTrace {
            info: self.info,
            initial: self.initial,
            steps: self.steps,
            stats,
            outcome,
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<RankedItem> {
        vec![RankedItem::new(2, 1, "b"), RankedItem::new(1, 2, "a")]
    }

    fn info() -> AlgorithmInfo {
        AlgorithmInfo {
            kind: AlgorithmKind::Bubble,
            name: "Bubble Sort".to_string(),
            stable: true,
            in_place: true,
        }
    }

    #[test]
    fn test_step_builder() {
        let step = Step::new(StepKind::Split, &items())
            .indices([0, 1])
            .ranges([Span::new(0, 0), Span::new(1, 1)])
            .depth(2)
            .describe("split");
        assert_eq!(step.kind(), StepKind::Split);
        assert_eq!(step.index_list(), &[0, 1]);
        assert_eq!(step.range_list().len(), 2);
        assert_eq!(step.recursion_depth(), 2);
        assert_eq!(step.snapshot_ranks(), vec![2, 1]);
        assert_eq!(step.to_string(), "[SPLIT] indices=[0, 1] depth=2: split");
    }

    #[test]
    fn test_span() {
        let span = Span::new(2, 4);
        assert_eq!(span.len(), 3);
        assert!(span.contains(2) && span.contains(4));
        assert!(!span.contains(5));
        assert!(Span::new(3, 2).is_empty());
        assert_eq!(span.to_string(), "[2:4]");
    }

    #[test]
    fn test_recorder_tracks_depth_and_counters() {
        let mut recorder = TraceRecorder::new(info(), &items());
        recorder.count_comparison();
        recorder.count_swap();
        recorder.push(Step::new(StepKind::Compare, &items()).depth(3));
        recorder.push(Step::new(StepKind::Complete, &items()));
        let trace = recorder.finish(Outcome::Sorted {
            direction: SortDirection::Ascending,
            stability_violations: Vec::new(),
        });
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.stats().comparisons, 1);
        assert_eq!(trace.stats().swaps, 1);
        assert_eq!(trace.stats().max_depth, 3);
        assert_eq!(trace.count(StepKind::Compare), 1);
        assert!(trace.stability_violations().is_empty());
        assert_eq!(trace.found_index(), None);
    }

    #[test]
    fn test_final_snapshot_falls_back_to_initial() {
        let recorder = TraceRecorder::new(info(), &items());
        let trace = recorder.finish(Outcome::Search {
            target: 1,
            found: None,
        });
        assert!(trace.is_empty());
        assert_eq!(trace.final_snapshot(), trace.initial());
    }

    #[test]
    fn test_info_description() {
        assert_eq!(info().description(), "Bubble Sort (Stable, In-place)");
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(StepKind::EarlyExit.is_terminal());
        assert!(StepKind::Found.is_terminal());
        assert!(!StepKind::RangeNarrow.is_terminal());
        assert_eq!(StepKind::PartitionMove.to_string(), "PARTITION_MOVE");
    }
}
