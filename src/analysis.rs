//! Case analysis: labels a configured run before it happens and audits a
//! sort's output for stability afterwards.
//!
//! Everything here is pure and cheap. [`classify`] looks only at the shape of
//! the input (sortedness, duplicates, target position) plus, for binary
//! search, one O(log n) walk of the bisection path.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::algorithms::searching::max_lookups;
use crate::algorithms::{AlgorithmKind, PartitionScheme, PivotStrategy, RunConfig};
use crate::collection::{Collection, RankedItem, SortDirection};

/// Complexity case a configured run falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseLabel {
    /// Least work for this algorithm.
    Best,
    /// Typical work.
    Average,
    /// Most work for this algorithm.
    Worst,
    /// The case cannot be determined (random pivot, unsorted binary search
    /// input, missing target).
    NotApplicable,
}

impl fmt::Display for CaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Best => "BEST",
            Self::Average => "AVERAGE",
            Self::Worst => "WORST",
            Self::NotApplicable => "NOT_APPLICABLE",
        };
        f.write_str(s)
    }
}

/// A case label with a one-sentence explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseVerdict {
    /// The case.
    pub label: CaseLabel,
    /// Why the input falls into that case.
    pub rationale: String,
}

impl CaseVerdict {
    fn new(label: CaseLabel, rationale: impl Into<String>) -> Self {
        Self {
            label,
            rationale: rationale.into(),
        }
    }
}

impl fmt::Display for CaseVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.rationale)
    }
}

/// Labels the run `config` describes over `collection` as best, average or
/// worst case.
#[must_use]
pub fn classify(config: &RunConfig, collection: &Collection) -> CaseVerdict {
    use CaseLabel::{Average, Best, NotApplicable, Worst};

    let items = collection.items();
    let direction = config.effective_direction();

    match config.algorithm {
        AlgorithmKind::Bubble => {
            if collection.is_sorted(direction) {
                CaseVerdict::new(
                    Best,
                    format!("input is already {direction}: one pass, no swaps, O(n)"),
                )
            } else if strictly_reversed(items, direction) {
                CaseVerdict::new(
                    Worst,
                    format!(
                        "input is strictly {}: every comparison swaps, O(n²)",
                        direction.reversed()
                    ),
                )
            } else {
                CaseVerdict::new(Average, "input is partially ordered: O(n²) comparisons")
            }
        }
        AlgorithmKind::Merge => CaseVerdict::new(
            Average,
            "merge sort always splits in half: best = average = worst = O(n log n)",
        ),
        AlgorithmKind::Quick => classify_quick(config, collection),
        AlgorithmKind::LinearSearch => {
            let Some(target) = config.target else {
                return CaseVerdict::new(NotApplicable, "no search target configured");
            };
            match items.iter().position(|i| i.rank() == target) {
                Some(0) => CaseVerdict::new(Best, "target is the first element: one comparison"),
                Some(p) if p + 1 == items.len() => CaseVerdict::new(
                    Worst,
                    "target only appears at the last position: n comparisons",
                ),
                Some(p) => {
                    CaseVerdict::new(Average, format!("target first appears at position {p}"))
                }
                None => CaseVerdict::new(Worst, "target is absent: every element is compared"),
            }
        }
        AlgorithmKind::BinaryIterative | AlgorithmKind::BinaryRecursive => {
            let Some(target) = config.target else {
                return CaseVerdict::new(NotApplicable, "no search target configured");
            };
            if let Some(position) = collection.first_inversion(SortDirection::Ascending) {
                return CaseVerdict::new(
                    NotApplicable,
                    format!("input is not sorted ascending (inversion at position {position})"),
                );
            }
            let deepest = max_lookups(items.len());
            let (lookups, found) = bisection_path(items, target);
            if found && lookups == 1 {
                CaseVerdict::new(Best, "target sits at the first midpoint: one lookup, O(1)")
            } else if !found {
                CaseVerdict::new(Worst, format!("target is absent: {lookups} lookups, O(log n)"))
            } else if lookups == deepest {
                CaseVerdict::new(
                    Worst,
                    format!("target is found on the deepest lookup ({deepest})"),
                )
            } else {
                CaseVerdict::new(
                    Average,
                    format!("target is found after {lookups} of at most {deepest} lookups"),
                )
            }
        }
    }
}

fn classify_quick(config: &RunConfig, collection: &Collection) -> CaseVerdict {
    use CaseLabel::{Average, Best, NotApplicable, Worst};

    let pivot = config.effective_pivot();
    let partition = config.effective_partition();
    if collection.len() <= 1 {
        return CaseVerdict::new(Best, "nothing to partition");
    }
    if pivot == PivotStrategy::Random {
        return CaseVerdict::new(
            NotApplicable,
            "random pivot: expected O(n log n), case is probabilistic",
        );
    }
    if collection.count_unique_ranks() == 1 {
        return match partition {
            PartitionScheme::ThreeWay => CaseVerdict::new(
                Best,
                "all ranks equal: 3-way partitioning finishes in one pass",
            ),
            PartitionScheme::TwoWay => CaseVerdict::new(
                Worst,
                "all ranks equal: 2-way partitioning splits 0 / n-1 every time",
            ),
        };
    }
    let sorted = collection.is_sorted(SortDirection::Ascending)
        || collection.is_sorted(SortDirection::Descending);
    match (pivot, sorted) {
        (PivotStrategy::First | PivotStrategy::Last, true) => CaseVerdict::new(
            Worst,
            format!(
                "sorted input with {} pivot: maximally unbalanced partitions, O(n²)",
                pivot.title()
            ),
        ),
        (PivotStrategy::MedianOfThree, true) => CaseVerdict::new(
            Best,
            "sorted input with median-of-three pivot: balanced partitions",
        ),
        _ => CaseVerdict::new(Average, "unordered input: O(n log n) expected"),
    }
}

/// Every adjacent pair strictly out of order for `direction`.
fn strictly_reversed(items: &[RankedItem], direction: SortDirection) -> bool {
    items.len() >= 2
        && items
            .windows(2)
            .all(|pair| direction.out_of_order(pair[0].rank(), pair[1].rank()))
}

/// Walks the iterative bisection path over `[0, n - 1]`. Returns the number
/// of lookups and whether the target was hit.
fn bisection_path(items: &[RankedItem], target: i64) -> (usize, bool) {
    if items.is_empty() {
        return (0, false);
    }
    let (mut low, mut high) = (0usize, items.len() - 1);
    let mut lookups = 0;
    while low <= high {
        let mid = low + (high - low) / 2;
        lookups += 1;
        match items[mid].rank().cmp(&target) {
            std::cmp::Ordering::Equal => return (lookups, true),
            std::cmp::Ordering::Less => low = mid + 1,
            std::cmp::Ordering::Greater if mid == 0 => break,
            std::cmp::Ordering::Greater => high = mid - 1,
        }
    }
    (lookups, false)
}

// ============================================================================
// Stability audit
// ============================================================================

/// One rank group whose capture orders changed relative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StabilityViolation {
    /// Shared rank of the group.
    pub rank: i64,
    /// Capture orders in input order.
    pub input_order: Vec<u64>,
    /// Capture orders in output order.
    pub output_order: Vec<u64>,
    /// Capture orders whose position within the group changed.
    pub displaced: Vec<u64>,
}

impl fmt::Display for StabilityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rank {}: input order {:?}, output order {:?}",
            self.rank, self.input_order, self.output_order
        )
    }
}

/// Compares the relative order of capture orders within every rank-equal
/// group of `output` against `input`. Groups are reported by ascending rank.
#[must_use]
pub fn stability_violations(
    input: &[RankedItem],
    output: &[RankedItem],
) -> Vec<StabilityViolation> {
    let before = group_by_rank(input);
    let after = group_by_rank(output);

    before
        .into_iter()
        .filter_map(|(rank, input_order)| {
            let output_order = after.get(&rank).cloned().unwrap_or_default();
            if input_order == output_order {
                return None;
            }
            let displaced = input_order
                .iter()
                .enumerate()
                .filter(|&(i, c)| output_order.get(i) != Some(c))
                .map(|(_, &c)| c)
                .collect();
            Some(StabilityViolation {
                rank,
                input_order,
                output_order,
                displaced,
            })
        })
        .collect()
}

fn group_by_rank(items: &[RankedItem]) -> BTreeMap<i64, Vec<u64>> {
    let mut groups: BTreeMap<i64, Vec<u64>> = BTreeMap::new();
    for item in items {
        groups.entry(item.rank()).or_default().push(item.capture_order());
    }
    groups
}

// ============================================================================
// Quick sort risk
// ============================================================================

/// Coarse risk of quadratic quick sort behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// No known bad pattern.
    Low,
    /// Partitions are likely to be lopsided.
    Medium,
    /// Worst case is expected.
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// Input shape report for a quick sort configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickSortRisk {
    /// Overall risk.
    pub level: RiskLevel,
    /// True when the configuration hits the O(n²) case.
    pub is_worst_case: bool,
    /// Findings behind the level.
    pub reasons: Vec<String>,
    /// Suggested configuration changes.
    pub recommendations: Vec<String>,
    /// Input is non-decreasing.
    pub sorted_ascending: bool,
    /// Input is non-increasing.
    pub sorted_descending: bool,
    /// More than 80% of adjacent pairs are non-decreasing.
    pub nearly_sorted: bool,
    /// Share of items whose rank repeats an earlier one, 0–1.
    pub duplicate_ratio: f64,
    /// Distinct ranks.
    pub unique_ranks: usize,
}

/// Predicts whether `pivot` and `partition` will degrade on `collection`.
#[must_use]
pub fn quick_sort_risk(
    collection: &Collection,
    pivot: PivotStrategy,
    partition: PartitionScheme,
) -> QuickSortRisk {
    let n = collection.len();
    let unique_ranks = collection.count_unique_ranks();
    let sorted_ascending = collection.is_sorted(SortDirection::Ascending);
    let sorted_descending = collection.is_sorted(SortDirection::Descending);
    let percent_in_order = collection.sortedness_percentage();
    let nearly_sorted = percent_in_order > 80.0;
    let duplicate_ratio = if n == 0 {
        0.0
    } else {
        1.0 - unique_ranks as f64 / n as f64
    };

    let mut report = QuickSortRisk {
        level: RiskLevel::Low,
        is_worst_case: false,
        reasons: Vec::new(),
        recommendations: Vec::new(),
        sorted_ascending,
        sorted_descending,
        nearly_sorted,
        duplicate_ratio,
        unique_ranks,
    };

    if n <= 2 {
        report.reasons.push("collection is too small for the worst case to matter".to_string());
        return report;
    }

    let edge_pivot = matches!(pivot, PivotStrategy::First | PivotStrategy::Last);
    let mut score = 0;

    if sorted_ascending || sorted_descending {
        if edge_pivot {
            let shape = if sorted_ascending {
                "sorted"
            } else {
                "reverse sorted"
            };
            report.reasons.push(format!(
                "input is {shape} and the {} pivot splits every partition 0 / n-1",
                pivot.title()
            ));
            report.recommendations.push("use a median-of-three or random pivot".to_string());
            score += 3;
        }
    } else if nearly_sorted && edge_pivot {
        report.reasons.push(format!(
            "input is nearly sorted ({percent_in_order:.0}% in order) \
             and the {} pivot is likely to split unevenly",
            pivot.title()
        ));
        report
            .recommendations
            .push("consider a median-of-three pivot for nearly sorted input".to_string());
        score += 2;
    }

    if duplicate_ratio > 0.5 {
        match partition {
            PartitionScheme::TwoWay => {
                report.reasons.push(format!(
                    "{:.0}% duplicates with 2-way partitioning puts all equal ranks on one side",
                    duplicate_ratio * 100.0
                ));
                report
                    .recommendations
                    .push("use 3-way partitioning for duplicate-heavy input".to_string());
                score += 2;
            }
            PartitionScheme::ThreeWay => report.reasons.push(format!(
                "{:.0}% duplicates, grouped efficiently by 3-way partitioning",
                duplicate_ratio * 100.0
            )),
        }
    }

    match pivot {
        PivotStrategy::Random => {
            report.reasons.push("random pivot gives expected O(n log n) on any input".to_string());
        }
        PivotStrategy::MedianOfThree => report
            .reasons
            .push("median-of-three pivot avoids the worst case on sorted input".to_string()),
        PivotStrategy::First | PivotStrategy::Last => {}
    }

    report.level = match score {
        s if s >= 3 => RiskLevel::High,
        2 => RiskLevel::Medium,
        _ => RiskLevel::Low,
    };
    report.is_worst_case = report.level == RiskLevel::High;
    report
}

// ============================================================================
// Partition balance
// ============================================================================

/// Quality bucket of one partition split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceQuality {
    /// A range of one element; nothing to balance.
    Trivial,
    /// Smaller side holds at least 40% of the rest.
    Good,
    /// At least 20%.
    Moderate,
    /// At least 10%.
    Poor,
    /// Below 10%.
    Worst,
}

/// How evenly a partition split its range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartitionBalance {
    /// Quality bucket.
    pub quality: BalanceQuality,
    /// Elements left of the pivot (or equal group).
    pub left: usize,
    /// Elements right of the pivot (or equal group).
    pub right: usize,
    /// `min(left, right) / (total - 1)`, 1.0 for trivial ranges.
    pub ratio: f64,
}

impl fmt::Display for PartitionBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, right, pct) = (self.left, self.right, self.ratio * 100.0);
        match self.quality {
            BalanceQuality::Trivial => f.write_str("trivial"),
            BalanceQuality::Good => write!(f, "GOOD ({left}/{right} split, {pct:.0}% balanced)"),
            BalanceQuality::Moderate => {
                write!(f, "MODERATE ({left}/{right} split, {pct:.0}% balanced)")
            }
            BalanceQuality::Poor => write!(f, "POOR ({left}/{right} split, {pct:.0}% balanced)"),
            BalanceQuality::Worst => {
                write!(f, "WORST CASE ({left}/{right} split, maximally unbalanced)")
            }
        }
    }
}

/// Classifies a split of a `total`-element range into `left` and `right`
/// sides around the pivot.
#[must_use]
pub fn partition_balance(left: usize, right: usize, total: usize) -> PartitionBalance {
    if total <= 1 {
        return PartitionBalance {
            quality: BalanceQuality::Trivial,
            left,
            right,
            ratio: 1.0,
        };
    }
    let ratio = left.min(right) as f64 / (total - 1) as f64;
    let quality = if ratio >= 0.4 {
        BalanceQuality::Good
    } else if ratio >= 0.2 {
        BalanceQuality::Moderate
    } else if ratio >= 0.1 {
        BalanceQuality::Poor
    } else {
        BalanceQuality::Worst
    };
    PartitionBalance {
        quality,
        left,
        right,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(config: RunConfig, ranks: &[i64]) -> CaseLabel {
        classify(&config, &Collection::from_ranks(ranks).unwrap()).label
    }

    #[test]
    fn test_bubble_cases() {
        let bubble = RunConfig::new(AlgorithmKind::Bubble);
        assert_eq!(verdict(bubble.clone(), &[1, 2, 2, 3]), CaseLabel::Best);
        assert_eq!(verdict(bubble.clone(), &[4, 3, 2, 1]), CaseLabel::Worst);
        assert_eq!(verdict(bubble.clone(), &[4, 3, 3, 1]), CaseLabel::Average);
        assert_eq!(verdict(bubble.clone(), &[2, 1, 3]), CaseLabel::Average);

        let desc = bubble.with_direction(SortDirection::Descending);
        assert_eq!(verdict(desc.clone(), &[4, 3, 2, 1]), CaseLabel::Best);
        assert_eq!(verdict(desc, &[1, 2, 3]), CaseLabel::Worst);
    }

    #[test]
    fn test_merge_is_always_average() {
        let merge = RunConfig::new(AlgorithmKind::Merge);
        let v = classify(&merge, &Collection::from_ranks(&[1, 2, 3]).unwrap());
        assert_eq!(v.label, CaseLabel::Average);
        assert!(v.rationale.contains("O(n log n)"));
    }

    #[test]
    fn test_quick_cases() {
        let quick = RunConfig::new(AlgorithmKind::Quick);
        assert_eq!(verdict(quick.clone(), &[7]), CaseLabel::Best);
        assert_eq!(verdict(quick.clone(), &[1, 2, 3, 4]), CaseLabel::Worst);

        let last = quick.clone().with_pivot(PivotStrategy::Last);
        assert_eq!(verdict(last, &[4, 3, 2, 1]), CaseLabel::Worst);

        let median = quick.clone().with_pivot(PivotStrategy::MedianOfThree);
        assert_eq!(verdict(median, &[1, 2, 3, 4]), CaseLabel::Best);

        let random = quick.clone().with_pivot(PivotStrategy::Random);
        assert_eq!(verdict(random, &[1, 2, 3]), CaseLabel::NotApplicable);

        assert_eq!(verdict(quick.clone(), &[3, 3, 3]), CaseLabel::Worst);
        let three_way = quick.clone().with_partition(PartitionScheme::ThreeWay);
        assert_eq!(verdict(three_way, &[3, 3, 3]), CaseLabel::Best);
        assert_eq!(verdict(quick, &[3, 1, 2]), CaseLabel::Average);
    }

    #[test]
    fn test_linear_search_cases() {
        let linear = RunConfig::new(AlgorithmKind::LinearSearch);
        assert_eq!(verdict(linear.clone(), &[1, 2]), CaseLabel::NotApplicable);
        assert_eq!(verdict(linear.clone().with_target(5), &[5, 1, 2]), CaseLabel::Best);
        assert_eq!(verdict(linear.clone().with_target(2), &[5, 1, 2]), CaseLabel::Worst);
        assert_eq!(verdict(linear.clone().with_target(9), &[5, 1, 2]), CaseLabel::Worst);
        assert_eq!(verdict(linear.with_target(1), &[5, 1, 2]), CaseLabel::Average);
    }

    #[test]
    fn test_binary_search_cases() {
        let binary = RunConfig::new(AlgorithmKind::BinaryIterative);
        let sorted = [0, 1, 2, 2, 5, 8, 9];
        assert_eq!(verdict(binary.clone().with_target(2), &[3, 1, 2]), CaseLabel::NotApplicable);
        assert_eq!(verdict(binary.clone().with_target(2), &sorted), CaseLabel::Best);
        assert_eq!(verdict(binary.clone().with_target(8), &sorted), CaseLabel::Average);
        assert_eq!(verdict(binary.clone().with_target(5), &sorted), CaseLabel::Worst);
        assert_eq!(verdict(binary.with_target(4), &sorted), CaseLabel::Worst);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let config = RunConfig::new(AlgorithmKind::Quick).with_pivot(PivotStrategy::MedianOfThree);
        let collection = Collection::from_ranks(&[5, 3, 9, 1]).unwrap();
        assert_eq!(classify(&config, &collection), classify(&config, &collection));
    }

    #[test]
    fn test_stability_violations_report_displaced() {
        let input = Collection::from_ranks(&[2, 2, 2, 0]).unwrap();
        let output = vec![
            RankedItem::new(0, 4, "0"),
            RankedItem::new(2, 3, "2"),
            RankedItem::new(2, 2, "2"),
            RankedItem::new(2, 1, "2"),
        ];
        let violations = stability_violations(input.items(), &output);
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.rank, 2);
        assert_eq!(v.input_order, vec![1, 2, 3]);
        assert_eq!(v.output_order, vec![3, 2, 1]);
        assert_eq!(v.displaced, vec![1, 3]);
    }

    #[test]
    fn test_stable_output_has_no_violations() {
        let input = Collection::from_ranks(&[2, 1, 2]).unwrap();
        let mut sorted = input.clone();
        sorted.sort(SortDirection::Ascending);
        assert!(stability_violations(input.items(), sorted.items()).is_empty());
    }

    #[test]
    fn test_quick_sort_risk() {
        let sorted = Collection::from_ranks(&[1, 2, 3, 4, 5]).unwrap();
        let risk = quick_sort_risk(&sorted, PivotStrategy::First, PartitionScheme::TwoWay);
        assert_eq!(risk.level, RiskLevel::High);
        assert!(risk.is_worst_case);
        assert!(!risk.recommendations.is_empty());

        let safe = quick_sort_risk(&sorted, PivotStrategy::MedianOfThree, PartitionScheme::TwoWay);
        assert_eq!(safe.level, RiskLevel::Low);

        let dupes = Collection::from_ranks(&[3, 1, 3, 3, 3, 3]).unwrap();
        let risk = quick_sort_risk(&dupes, PivotStrategy::Random, PartitionScheme::TwoWay);
        assert_eq!(risk.level, RiskLevel::Medium);
        let risk = quick_sort_risk(&dupes, PivotStrategy::Random, PartitionScheme::ThreeWay);
        assert_eq!(risk.level, RiskLevel::Low);

        let tiny = Collection::from_ranks(&[2, 1]).unwrap();
        let risk = quick_sort_risk(&tiny, PivotStrategy::First, PartitionScheme::TwoWay);
        assert_eq!(risk.level, RiskLevel::Low);
    }

    #[test]
    fn test_partition_balance_buckets() {
        assert_eq!(partition_balance(0, 0, 1).quality, BalanceQuality::Trivial);
        assert_eq!(partition_balance(2, 2, 5).quality, BalanceQuality::Good);
        assert_eq!(partition_balance(1, 3, 5).quality, BalanceQuality::Moderate);
        assert_eq!(partition_balance(1, 8, 10).quality, BalanceQuality::Poor);
        assert_eq!(partition_balance(0, 9, 10).quality, BalanceQuality::Worst);
        assert_eq!(partition_balance(2, 2, 5).to_string(), "GOOD (2/2 split, 50% balanced)");
    }
}
