//! Error types for sortviz operations.

use crate::algorithms::AlgorithmKind;
use crate::playback::PlaybackMode;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building traces or driving playback.
///
/// Configuration mismatches that are harmless (a seed supplied for a
/// non-random pivot, a target supplied to a sort) are not errors; they are
/// recorded as [`ConfigWarning`](crate::algorithms::ConfigWarning)s on the
/// trace instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input rejected before any step was generated (empty or oversized
    /// collection, unknown option, missing search target, bad position).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Binary search was asked to run over a collection that is not sorted
    /// ascending by rank.
    #[error(
        "unsorted input: {algorithm} requires ascending ranks (first inversion at {position})"
    )]
    UnsortedInput {
        /// Display name of the search that refused to run.
        algorithm: String,
        /// Position `i` such that `rank[i] > rank[i + 1]`.
        position: usize,
    },

    /// A playback operation was invoked from a state that does not allow it.
    #[error("invalid playback transition: cannot {action} while {from}")]
    StateTransition {
        /// Mode the controller was in.
        from: PlaybackMode,
        /// Operation that was attempted.
        action: &'static str,
    },

    /// No renderer is registered for the trace's algorithm kind.
    #[error("no renderer registered for {0}")]
    RendererMissing(AlgorithmKind),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
