//! Batch command: the same scenario across many seeds, in parallel.

use super::output::{BatchStats, JsonBatchResult, format_batch_csv, format_batch_text};
use super::{BatchFormat, CliError, ScenarioArg, resolve_seed};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;
use tessera::runner::{MatchConfig, factions, run_match};

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub(crate) fn execute(
    scenario: ScenarioArg,
    matches: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_turns: Option<u32>,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    let scenario = scenario.scenario();

    // Pool sizing is best-effort; a pool may already be running.
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok();
    }

    let base_seed = resolve_seed(seed);

    let mut config = MatchConfig::default();
    if let Some(t) = max_turns {
        config.max_turns = t;
    }

    // Size the stats from a probe board; every preset seats its factions
    // at build time.
    let num_teams = factions(&scenario.build(base_seed)).len();

    let pb = if progress {
        let pb = ProgressBar::new(matches);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} matches ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Run matches in parallel using the fold/reduce pattern: each worker
    // accumulates into its own BatchStats, partials merge at the end
    // (no locks or atomics in the hot path).
    let stats = (0..matches)
        .into_par_iter()
        .fold(
            || BatchStats::new(num_teams),
            |mut local_stats, i| {
                let match_seed = base_seed.wrapping_add(i);
                let result = run_match(scenario, match_seed, &config);
                local_stats.add_result(&result);
                local_stats
            },
        )
        .reduce(
            || BatchStats::new(num_teams),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    // The bar catches up once at the end; ticking it per match would
    // put an atomic in the hot path.
    if let Some(pb) = pb {
        pb.set_position(stats.matches_played);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    let matches_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.matches_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} matches/sec)",
                duration.as_secs_f64(),
                matches_per_sec
            );
        }
        BatchFormat::Json => {
            let report = JsonBatchResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats));
        }
    }

    Ok(())
}
