//! Run command: one headless match, reported and done.

use super::output::{JsonMatchResult, format_text};
use super::{CliError, OutputFormat, ScenarioArg, resolve_seed};
use tessera::runner::{MatchConfig, run_match};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub(crate) fn execute(
    scenario: ScenarioArg,
    seed: Option<u64>,
    turns: u32,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let scenario = scenario.scenario();
    let seed = resolve_seed(seed);
    let config = MatchConfig { max_turns: turns };

    if !quiet {
        println!("Running {} with seed {seed}...", scenario.name());
        println!();
    }

    let result = run_match(scenario, seed, &config);

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let report = JsonMatchResult::from_match_result(&result);
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
