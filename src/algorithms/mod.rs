//! Instrumented sorting and searching algorithms.
//!
//! Each algorithm copies the caller's [`Collection`] into a private working
//! vector and records every comparison, swap, split and lookup as a
//! [`Step`](crate::step::Step). The resulting [`StepTrace`] is a pure function
//! of the input and the configuration.
//!
//! # Example
//!
//! ```rust
//! use sortviz::algorithms::{run, AlgorithmKind, RunConfig};
//! use sortviz::collection::Collection;
//!
//! let collection = Collection::from_ranks(&[3, 1, 2]).unwrap();
//! let trace = run(&collection, &RunConfig::new(AlgorithmKind::Bubble)).unwrap();
//! let ranks: Vec<i64> = trace.final_snapshot().iter().map(|i| i.rank()).collect();
//! assert_eq!(ranks, vec![1, 2, 3]);
//! ```

pub mod searching;
pub mod sorting;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collection::{Collection, SortDirection};
use crate::error::{Error, Result};
use crate::step::StepTrace;

pub use searching::SearchAlgorithm;
pub use sorting::{BubbleSort, MergeSort, QuickSort, SortAlgorithm};

/// Seed used for RANDOM pivots when the configuration supplies none.
pub const DEFAULT_SEED: u64 = 0;

/// Tag identifying one algorithm variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    /// Bubble sort.
    #[default]
    Bubble,
    /// Top-down merge sort.
    Merge,
    /// Quick sort with configurable pivot and partition.
    Quick,
    /// Linear search.
    LinearSearch,
    /// Iterative binary search.
    #[serde(rename = "binary_iter")]
    BinaryIterative,
    /// Recursive binary search.
    BinaryRecursive,
}

impl AlgorithmKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Bubble,
        Self::Merge,
        Self::Quick,
        Self::LinearSearch,
        Self::BinaryIterative,
        Self::BinaryRecursive,
    ];

    /// Configuration name, e.g. `"binary_iter"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Merge => "merge",
            Self::Quick => "quick",
            Self::LinearSearch => "linear_search",
            Self::BinaryIterative => "binary_iter",
            Self::BinaryRecursive => "binary_recursive",
        }
    }

    /// Returns true for the search family.
    #[must_use]
    pub fn is_search(self) -> bool {
        matches!(self, Self::LinearSearch | Self::BinaryIterative | Self::BinaryRecursive)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::invalid(format!("unknown algorithm '{s}'")))
    }
}

/// How quick sort picks its pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotStrategy {
    /// First element of the range.
    #[default]
    First,
    /// Last element of the range.
    Last,
    /// Median rank of first, middle and last.
    MedianOfThree,
    /// Uniformly random position from a seeded generator.
    Random,
}

impl PivotStrategy {
    /// Configuration name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::MedianOfThree => "median_of_three",
            Self::Random => "random",
        }
    }

    /// Human-readable name, e.g. `"Median-of-Three"`.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Last => "Last",
            Self::MedianOfThree => "Median-of-Three",
            Self::Random => "Random",
        }
    }
}

impl fmt::Display for PivotStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PivotStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "median_of_three" => Ok(Self::MedianOfThree),
            "random" => Ok(Self::Random),
            other => Err(Error::invalid(format!("unknown pivot strategy '{other}'"))),
        }
    }
}

/// How quick sort partitions around its pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionScheme {
    /// Lomuto: less-or-equal / greater.
    #[default]
    TwoWay,
    /// Dutch national flag: less / equal / greater.
    ThreeWay,
}

impl PartitionScheme {
    /// Configuration name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoWay => "two_way",
            Self::ThreeWay => "three_way",
        }
    }
}

impl fmt::Display for PartitionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "two_way" => Ok(Self::TwoWay),
            "three_way" => Ok(Self::ThreeWay),
            other => Err(Error::invalid(format!("unknown partition scheme '{other}'"))),
        }
    }
}

/// Everything needed to pick and configure one algorithm run.
///
/// Options that do not apply to the chosen algorithm are tolerated and
/// reported as [`ConfigWarning`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Algorithm to run.
    pub algorithm: AlgorithmKind,
    /// Sort direction, ascending when unset.
    pub direction: Option<SortDirection>,
    /// Quick sort pivot strategy.
    pub pivot: Option<PivotStrategy>,
    /// Quick sort partition scheme.
    pub partition: Option<PartitionScheme>,
    /// Seed for RANDOM pivots.
    pub seed: Option<u64>,
    /// Rank to search for.
    pub target: Option<i64>,
}

impl RunConfig {
    /// Configuration for `algorithm` with every option unset.
    #[must_use]
    pub fn new(algorithm: AlgorithmKind) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Sets the sort direction.
    #[must_use]
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the pivot strategy.
    #[must_use]
    pub fn with_pivot(mut self, pivot: PivotStrategy) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Sets the partition scheme.
    #[must_use]
    pub fn with_partition(mut self, partition: PartitionScheme) -> Self {
        self.partition = Some(partition);
        self
    }

    /// Sets the RANDOM pivot seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the search target.
    #[must_use]
    pub fn with_target(mut self, target: i64) -> Self {
        self.target = Some(target);
        self
    }

    /// Direction in effect.
    #[must_use]
    pub fn effective_direction(&self) -> SortDirection {
        self.direction.unwrap_or_default()
    }

    /// Pivot strategy in effect.
    #[must_use]
    pub fn effective_pivot(&self) -> PivotStrategy {
        self.pivot.unwrap_or_default()
    }

    /// Partition scheme in effect.
    #[must_use]
    pub fn effective_partition(&self) -> PartitionScheme {
        self.partition.unwrap_or_default()
    }
}

/// A non-fatal mismatch between a configuration and the chosen algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "warning")]
pub enum ConfigWarning {
    /// A seed was supplied but the pivot strategy is deterministic.
    SeedIgnored {
        /// Strategy in effect.
        pivot: PivotStrategy,
    },
    /// RANDOM pivot without a seed; [`DEFAULT_SEED`] was used.
    DefaultSeed,
    /// Pivot, partition or seed supplied to an algorithm other than quick sort.
    QuickOptionsIgnored {
        /// Algorithm that ignored them.
        algorithm: AlgorithmKind,
    },
    /// A target was supplied to a sort.
    TargetIgnored {
        /// Sort that ignored it.
        algorithm: AlgorithmKind,
    },
    /// A direction was supplied to a search.
    DirectionIgnored {
        /// Search that ignored it.
        algorithm: AlgorithmKind,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeedIgnored { pivot } => {
                write!(f, "seed ignored: pivot strategy '{pivot}' is not random")
            }
            Self::DefaultSeed => {
                write!(f, "random pivot without a seed, using default seed {DEFAULT_SEED}")
            }
            Self::QuickOptionsIgnored { algorithm } => {
                write!(f, "pivot/partition/seed options ignored by {algorithm}")
            }
            Self::TargetIgnored { algorithm } => write!(f, "target ignored by {algorithm}"),
            Self::DirectionIgnored { algorithm } => {
                write!(f, "direction ignored by {algorithm}: searches require ascending order")
            }
        }
    }
}

/// A fully configured algorithm, ready to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// A sort.
    Sort(SortAlgorithm),
    /// A search for `target`.
    Search {
        /// Search variant.
        algorithm: SearchAlgorithm,
        /// Rank to search for.
        target: i64,
    },
}

impl Algorithm {
    /// Builds the algorithm a configuration describes, collecting warnings for
    /// options that do not apply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when a search has no target.
    pub fn from_config(config: &RunConfig) -> Result<(Self, Vec<ConfigWarning>)> {
        let kind = config.algorithm;
        let mut warnings = Vec::new();
        let quick_options =
            config.pivot.is_some() || config.partition.is_some() || config.seed.is_some();

        if kind != AlgorithmKind::Quick && quick_options {
            warnings.push(ConfigWarning::QuickOptionsIgnored { algorithm: kind });
        }

        let algorithm = if kind.is_search() {
            if config.direction.is_some() {
                warnings.push(ConfigWarning::DirectionIgnored { algorithm: kind });
            }
            let target = config
                .target
                .ok_or_else(|| Error::invalid(format!("{kind} requires a target rank")))?;
            let search = match kind {
                AlgorithmKind::LinearSearch => SearchAlgorithm::Linear,
                AlgorithmKind::BinaryIterative => SearchAlgorithm::BinaryIterative,
                _ => SearchAlgorithm::BinaryRecursive,
            };
            Self::Search {
                algorithm: search,
                target,
            }
        } else {
            if config.target.is_some() {
                warnings.push(ConfigWarning::TargetIgnored { algorithm: kind });
            }
            let direction = config.effective_direction();
            let sort = match kind {
                AlgorithmKind::Bubble => SortAlgorithm::Bubble(BubbleSort::new(direction)),
                AlgorithmKind::Merge => SortAlgorithm::Merge(MergeSort::new(direction)),
                _ => {
                    let pivot = config.effective_pivot();
                    match (pivot, config.seed) {
                        (PivotStrategy::Random, None) => warnings.push(ConfigWarning::DefaultSeed),
                        (PivotStrategy::Random, Some(_)) | (_, None) => {}
                        (other, Some(_)) => {
                            warnings.push(ConfigWarning::SeedIgnored { pivot: other });
                        }
                    }
                    SortAlgorithm::Quick(
                        QuickSort::new(direction)
                            .with_pivot(pivot)
                            .with_partition(config.effective_partition())
                            .with_seed(config.seed.unwrap_or(DEFAULT_SEED)),
                    )
                }
            };
            Self::Sort(sort)
        };

        Ok((algorithm, warnings))
    }

    /// Algorithm tag.
    #[must_use]
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Sort(sort) => sort.kind(),
            Self::Search { algorithm, .. } => algorithm.kind(),
        }
    }

    /// Runs over `collection`.
    pub fn run(&self, collection: &Collection) -> Result<StepTrace> {
        match self {
            Self::Sort(sort) => sort.run(collection),
            Self::Search { algorithm, target } => algorithm.run(collection, *target),
        }
    }
}

/// Builds the configured algorithm, runs it and attaches configuration
/// warnings to the trace.
///
/// # Errors
///
/// Fails on an empty collection, a search without a target, or a binary
/// search over unsorted input. No trace is produced in that case.
pub fn run(collection: &Collection, config: &RunConfig) -> Result<StepTrace> {
    let (algorithm, warnings) = Algorithm::from_config(config)?;
    for warning in &warnings {
        tracing::warn!(target: "sortviz::config", algorithm = %config.algorithm, "{warning}");
    }
    let trace = algorithm.run(collection)?;
    Ok(trace.with_warnings(warnings))
}

/// Rejects input no algorithm can run on.
pub(crate) fn check_input(collection: &Collection) -> Result<()> {
    if collection.is_empty() {
        return Err(Error::invalid("collection is empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.as_str().parse::<AlgorithmKind>().unwrap(), kind);
        }
        assert!(matches!("heap".parse::<AlgorithmKind>(), Err(Error::InvalidInput(_))));
        assert!("middle".parse::<PivotStrategy>().is_err());
        assert!("four_way".parse::<PartitionScheme>().is_err());
    }

    #[test]
    fn test_search_without_target_is_invalid() {
        let config = RunConfig::new(AlgorithmKind::BinaryIterative);
        assert!(matches!(Algorithm::from_config(&config), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_seed_ignored_for_first_pivot() {
        let config = RunConfig::new(AlgorithmKind::Quick).with_seed(7);
        let (_, warnings) = Algorithm::from_config(&config).unwrap();
        assert_eq!(
            warnings,
            vec![ConfigWarning::SeedIgnored {
                pivot: PivotStrategy::First
            }]
        );
    }

    #[test]
    fn test_random_without_seed_warns() {
        let config = RunConfig::new(AlgorithmKind::Quick).with_pivot(PivotStrategy::Random);
        let (algorithm, warnings) = Algorithm::from_config(&config).unwrap();
        assert_eq!(warnings, vec![ConfigWarning::DefaultSeed]);
        assert_eq!(algorithm.kind(), AlgorithmKind::Quick);
    }

    #[test]
    fn test_mismatched_options_warn() {
        let config = RunConfig::new(AlgorithmKind::Merge)
            .with_partition(PartitionScheme::ThreeWay)
            .with_target(3);
        let (_, warnings) = Algorithm::from_config(&config).unwrap();
        assert!(warnings.contains(&ConfigWarning::QuickOptionsIgnored {
            algorithm: AlgorithmKind::Merge
        }));
        assert!(warnings.contains(&ConfigWarning::TargetIgnored {
            algorithm: AlgorithmKind::Merge
        }));

        let config = RunConfig::new(AlgorithmKind::LinearSearch)
            .with_direction(SortDirection::Descending)
            .with_target(1);
        let (_, warnings) = Algorithm::from_config(&config).unwrap();
        assert_eq!(
            warnings,
            vec![ConfigWarning::DirectionIgnored {
                algorithm: AlgorithmKind::LinearSearch
            }]
        );
    }

    #[test]
    fn test_run_attaches_warnings() {
        let collection = Collection::from_ranks(&[2, 1]).unwrap();
        let config = RunConfig::new(AlgorithmKind::Bubble).with_target(1);
        let trace = run(&collection, &config).unwrap();
        assert_eq!(trace.warnings().len(), 1);
    }

    #[test]
    fn test_empty_collection_is_rejected_by_every_algorithm() {
        let empty = Collection::new();
        for kind in AlgorithmKind::ALL {
            let config = RunConfig::new(kind).with_target(0);
            assert!(matches!(run(&empty, &config), Err(Error::InvalidInput(_))), "{kind}");
        }
    }

    #[test]
    fn test_run_config_deserializes_from_yaml() {
        let yaml = "algorithm: quick\npivot: median_of_three\npartition: three_way\n";
        let config: RunConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.algorithm, AlgorithmKind::Quick);
        assert_eq!(config.effective_pivot(), PivotStrategy::MedianOfThree);
        assert_eq!(config.effective_partition(), PartitionScheme::ThreeWay);
        assert_eq!(config.effective_direction(), SortDirection::Ascending);

        let config: RunConfig =
            serde_yaml_ng::from_str("algorithm: binary_iter\ntarget: 5\n").unwrap();
        assert_eq!(config.algorithm, AlgorithmKind::BinaryIterative);
        assert_eq!(config.target, Some(5));
    }
}
