use crate::algorithms::check_input;
use crate::collection::Collection;
use crate::error::Result;
use crate::step::{AlgorithmInfo, Outcome, Step, StepKind, StepTrace, TraceRecorder};

pub(super) fn run(info: AlgorithmInfo, collection: &Collection, target: i64) -> Result<StepTrace> {
    check_input(collection)?;
    let mut recorder = TraceRecorder::new(info, collection.items());
    let data = collection.items();

    for (i, item) in data.iter().enumerate() {
        let n = recorder.count_comparison();
        let description = format!("Compare {item} (rank {}) with target {target}", item.rank());
        recorder.push(Step::new(StepKind::Compare, data).indices([i]).describe(description));

        if item.rank() == target {
            let description =
                format!("Found target {target} at position {i} after {n} comparisons");
            recorder.push(Step::new(StepKind::Found, data).indices([i]).describe(description));
            return Ok(recorder.finish(Outcome::Search {
                target,
                found: Some(i),
            }));
        }
    }

    let description = format!("Target {target} not found after {} comparisons", data.len());
    recorder.push(Step::new(StepKind::NotFound, data).describe(description));
    Ok(recorder.finish(Outcome::Search {
        target,
        found: None,
    }))
}
