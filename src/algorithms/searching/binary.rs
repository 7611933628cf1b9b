use std::cmp::Ordering;

use crate::algorithms::check_input;
use crate::collection::{Collection, RankedItem, SortDirection};
use crate::error::{Error, Result};
use crate::step::{AlgorithmInfo, Outcome, Span, Step, StepKind, StepTrace, TraceRecorder};

/// Most lookups a binary search over `n` items can need: `floor(log2 n) + 1`.
#[must_use]
pub fn max_lookups(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

pub(super) fn run(
    info: AlgorithmInfo,
    collection: &Collection,
    target: i64,
    recursive: bool,
) -> Result<StepTrace> {
    check_input(collection)?;
    if let Some(position) = collection.first_inversion(SortDirection::Ascending) {
        return Err(Error::UnsortedInput {
            algorithm: info.name,
            position,
        });
    }

    let data = collection.items();
    let mut recorder = TraceRecorder::new(info, data);
    let mut search = Bisection {
        data,
        target,
        limit: max_lookups(data.len()),
        recorder: &mut recorder,
    };

    let found = if recursive {
        search.recurse(0, data.len() - 1, 0)
    } else {
        search.iterate()
    };
    Ok(recorder.finish(Outcome::Search { target, found }))
}

struct Bisection<'a> {
    data: &'a [RankedItem],
    target: i64,
    limit: usize,
    recorder: &'a mut TraceRecorder,
}

impl Bisection<'_> {
    fn iterate(&mut self) -> Option<usize> {
        let (mut low, mut high) = (0, self.data.len() - 1);
        loop {
            let mid = low + (high - low) / 2;
            match self.lookup(low, high, mid, 0) {
                Ordering::Equal => return Some(mid),
                Ordering::Less if mid < high => low = mid + 1,
                Ordering::Greater if mid > low => high = mid - 1,
                _ => {
                    self.not_found(0);
                    return None;
                }
            }
        }
    }

    fn recurse(&mut self, low: usize, high: usize, depth: usize) -> Option<usize> {
        let mid = low + (high - low) / 2;
        match self.lookup(low, high, mid, depth) {
            Ordering::Equal => Some(mid),
            Ordering::Less if mid < high => self.recurse(mid + 1, high, depth + 1),
            Ordering::Greater if mid > low => self.recurse(low, mid - 1, depth + 1),
            _ => {
                self.not_found(depth);
                None
            }
        }
    }

    /// Records one RANGE_NARROW over `[low, high]` and, on a hit, the FOUND
    /// step. Returns how the inspected rank compares with the target.
    fn lookup(&mut self, low: usize, high: usize, mid: usize, depth: usize) -> Ordering {
        let lookup = self.recorder.count_comparison();
        let item = &self.data[mid];
        let ordering = item.rank().cmp(&self.target);
        let outcome = match ordering {
            Ordering::Equal => "match".to_string(),
            Ordering::Less => {
                format!("{} < {}, continue in the right half", item.rank(), self.target)
            }
            Ordering::Greater => {
                format!("{} > {}, continue in the left half", item.rank(), self.target)
            }
        };
        let description = format!(
            "Lookup {lookup} of at most {}: search {}, middle {item} at {mid}: {outcome}",
            self.limit,
            Span::new(low, high)
        );
        self.recorder.push(
            Step::new(StepKind::RangeNarrow, self.data)
                .indices([mid])
                .ranges([Span::new(low, high)])
                .depth(depth)
                .describe(description),
        );

        if ordering == Ordering::Equal {
            let description = format!(
                "Found target {} at position {mid} after {lookup} lookups",
                self.target
            );
            self.recorder.push(
                Step::new(StepKind::Found, self.data)
                    .indices([mid])
                    .depth(depth)
                    .describe(description),
            );
        }
        ordering
    }

    fn not_found(&mut self, depth: usize) {
        let description = format!(
            "Target {} not found after {} lookups",
            self.target,
            self.recorder.comparisons()
        );
        self.recorder.push(
            Step::new(StepKind::NotFound, self.data)
                .depth(depth)
                .describe(description),
        );
    }
}
