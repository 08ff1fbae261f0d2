//! The `tessera` binary: play, run, and batch-simulate territorial
//! matches.

// The binary talks to stdout; the library never does.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Tessera - a deterministic turn-based territorial strategy engine
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands of the binary.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one headless match and report the outcome
    Run {
        /// Scenario preset to run
        #[arg(default_value = "duel")]
        scenario: cli::ScenarioArg,

        /// Seed for the match (defaults to the clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Turn cap before the match is scored as it stands
        #[arg(short, long, default_value = "200")]
        turns: u32,

        /// Report format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Skip the startup banner
        #[arg(short, long)]
        quiet: bool,
    },

    /// Take the field yourself against the computer factions
    Play {
        /// Scenario preset to play
        #[arg(default_value = "duel")]
        scenario: cli::ScenarioArg,

        /// Seed for the match (defaults to the clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Turn cap before the match is scored as it stands
        #[arg(short, long, default_value = "200")]
        turns: u32,

        /// Pause between combat events, in milliseconds
        #[arg(long, default_value = "300")]
        speed: u64,
    },

    /// Sweep one scenario across many seeds and aggregate the outcomes
    Batch {
        /// Scenario preset to sweep
        #[arg(default_value = "duel")]
        scenario: cli::ScenarioArg,

        /// How many matches to play
        #[arg(short, long, default_value = "1000")]
        matches: u64,

        /// First seed of the sweep; each match takes the next one
        #[arg(short, long)]
        seed: Option<u64>,

        /// Worker threads (defaults to the CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Turn cap per match
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Report format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            scenario,
            seed,
            turns,
            format,
            quiet,
        } => cli::run::execute(scenario, seed, turns, format, quiet),

        Commands::Play {
            scenario,
            seed,
            turns,
            speed,
        } => cli::play::execute(scenario, seed, turns, speed),

        Commands::Batch {
            scenario,
            matches,
            seed,
            threads,
            max_turns,
            format,
            progress,
        } => cli::batch::execute(scenario, matches, seed, threads, max_turns, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
