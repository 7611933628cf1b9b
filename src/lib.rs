//! # sortviz
//!
//! Instrumented sorting and searching algorithms with replayable step traces,
//! for teaching how algorithms behave rather than just what they return.
//!
//! Every run produces a [`StepTrace`](step::StepTrace): an immutable log of
//! comparisons, swaps, splits, merges, pivot choices and range narrowing, each
//! with a snapshot of the working array. A [`Visualizer`](playback::Visualizer)
//! steps, plays and seeks through a trace and renders each position into a
//! display-agnostic [`StepView`](render::StepView).
//!
//! ## Features
//!
//! - **Sorts**: bubble (early exit), merge (top-down), quick (first / last /
//!   median-of-three / random pivot, 2-way or 3-way partition)
//! - **Searches**: linear, binary (iterative and recursive)
//! - **Stability audit**: equal ranks carry a capture order; every sort trace
//!   reports groups whose relative order changed
//! - **Case analysis**: best / average / worst labelling before a run
//! - **Playback**: cooperative timer, no threads or sleeping
//!
//! ## Quick Start
//!
//! ```rust
//! use sortviz::prelude::*;
//!
//! let collection = Collection::from_ranks(&[2, 2, 2, 1]).unwrap();
//! let config = RunConfig::new(AlgorithmKind::Quick);
//!
//! let verdict = classify(&config, &collection);
//! let trace = run(&collection, &config).unwrap();
//! assert!(!trace.stability_violations().is_empty());
//!
//! let mut viz = Visualizer::new();
//! viz.load(trace).unwrap();
//! let view = viz.step().unwrap();
//! assert_eq!(view.cursor, 1);
//! # let _ = verdict;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli`: the `sortviz` command-line trace viewer

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data Model
// ============================================================================

/// Bounded undo history.
pub mod history;

/// Ranked items and the bounded collection.
pub mod collection;

/// Steps and traces.
pub mod step;

// ============================================================================
// Algorithms
// ============================================================================

/// Instrumented sorts and searches.
pub mod algorithms;

/// Case labelling, stability audit, quick sort risk.
pub mod analysis;

// ============================================================================
// Presentation
// ============================================================================

/// Per-algorithm step renderers and text output.
pub mod render;

/// Playback controller.
pub mod playback;

// ============================================================================
// Configuration & Errors
// ============================================================================

/// YAML configuration.
pub mod config;

/// Error types for sortviz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use sortviz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algorithms::{
        run, Algorithm, AlgorithmKind, ConfigWarning, PartitionScheme, PivotStrategy, RunConfig,
        SearchAlgorithm, SortAlgorithm,
    };
    pub use crate::analysis::{
        classify, partition_balance, quick_sort_risk, stability_violations, CaseLabel,
        CaseVerdict, StabilityViolation,
    };
    pub use crate::collection::{Collection, RankedItem, SortDirection};
    pub use crate::config::{Config, PlaybackConfig};
    pub use crate::error::{Error, Result};
    pub use crate::playback::{PlaybackMode, Visualizer};
    pub use crate::render::{
        Highlight, RendererFactory, StepRenderer, StepView, TextEncoder, TextMode,
    };
    pub use crate::step::{Step, StepKind, StepTrace, TraceStats};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_all_public_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Collection>();
        assert_send_sync::<StepTrace>();
        assert_send_sync::<Visualizer>();
        assert_send_sync::<RendererFactory>();
        assert_send_sync::<StepView>();
        assert_send_sync::<Error>();
    }
}
