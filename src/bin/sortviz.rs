//! sortviz: step through a sorting or searching algorithm in the terminal.
//!
//! Run: `sortviz --algorithm quick --pivot median_of_three 5 3 8 1 9 2`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sortviz::prelude::*;
use tracing_subscriber::EnvFilter;

/// sortviz: instrumented sorting and searching traces
#[derive(Parser, Debug)]
#[command(name = "sortviz")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Replay sorting and searching algorithms step by step", long_about = None)]
struct Cli {
    /// Ranks to sort or search, in input order
    #[arg(required = true, allow_negative_numbers = true)]
    ranks: Vec<i64>,

    /// Algorithm: bubble, merge, quick, linear_search, binary_iter, binary_recursive
    #[arg(short, long)]
    algorithm: Option<AlgorithmKind>,

    /// Sort largest rank first
    #[arg(long)]
    descending: bool,

    /// Quick sort pivot: first, last, median_of_three, random
    #[arg(long)]
    pivot: Option<PivotStrategy>,

    /// Quick sort partition: two_way, three_way
    #[arg(long)]
    partition: Option<PartitionScheme>,

    /// Seed for the random pivot
    #[arg(long)]
    seed: Option<u64>,

    /// Rank to search for
    #[arg(short, long, allow_negative_numbers = true)]
    target: Option<i64>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Colour output with ANSI escapes
    #[arg(long)]
    ansi: bool,

    /// Only print the final view
    #[arg(long)]
    summary: bool,

    /// Pause between steps using the configured speed
    #[arg(long)]
    animate: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    let run_config = merge_run_config(config.run.clone(), &cli);

    let collection = Collection::from_ranks(&cli.ranks)?;
    let verdict = classify(&run_config, &collection);
    println!("{}", collection.analysis());
    println!("Case: {verdict}");
    if run_config.algorithm == AlgorithmKind::Quick {
        let risk = quick_sort_risk(
            &collection,
            run_config.effective_pivot(),
            run_config.effective_partition(),
        );
        println!("Quick sort risk: {}", risk.level);
        for reason in &risk.reasons {
            println!("  - {reason}");
        }
    }

    let trace = run(&collection, &run_config)?;
    for warning in trace.warnings() {
        println!("warning: {warning}");
    }
    println!("{}\n", trace.info().description());

    let mode = if cli.ansi {
        TextMode::Ansi
    } else {
        TextMode::Plain
    };
    let encoder = TextEncoder::new().mode(mode);
    let mut viz = Visualizer::with_config(PlaybackConfig {
        auto_play: false,
        ..config.playback
    });
    let interval = viz.config().interval();
    let view = viz.load(trace)?;
    if !cli.summary {
        println!("{}", encoder.render(view));
    }

    while viz.mode() != PlaybackMode::Finished {
        let view = viz.step()?;
        if !cli.summary || view.is_final() {
            println!("{}", encoder.render(view));
        }
        if cli.animate {
            std::thread::sleep(interval);
        }
    }

    print_outcome(&viz)?;
    Ok(())
}

/// Command-line options override the file.
fn merge_run_config(mut config: RunConfig, cli: &Cli) -> RunConfig {
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }
    if cli.descending {
        config.direction = Some(SortDirection::Descending);
    }
    config.pivot = cli.pivot.or(config.pivot);
    config.partition = cli.partition.or(config.partition);
    config.seed = cli.seed.or(config.seed);
    config.target = cli.target.or(config.target);
    config
}

fn print_outcome(viz: &Visualizer) -> Result<()> {
    let Some(trace) = viz.trace() else {
        bail!("no trace loaded");
    };
    let stats = trace.stats();
    println!(
        "Done in {:?}: {} steps, {} comparisons, {} swaps, max depth {}",
        stats.elapsed,
        trace.len(),
        stats.comparisons,
        stats.swaps,
        stats.max_depth
    );
    match trace.found_index() {
        Some(index) => println!("Found at position {index}"),
        None if trace.kind().is_search() => println!("Not found"),
        None => {
            let violations = trace.stability_violations();
            if violations.is_empty() {
                println!("Stable: every equal-rank group kept its order");
            } else {
                for violation in violations {
                    println!("Unstable: {violation}");
                }
            }
        }
    }
    Ok(())
}
