//! Command implementations for the `tessera` binary.

pub(crate) mod batch;
pub(crate) mod play;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use tessera::scenario::Scenario;

/// Report format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Plain text report.
    Text,
    /// JSON report for tooling.
    Json,
}

/// Report format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Plain text report.
    Text,
    /// JSON report for tooling.
    Json,
    /// One CSV row per faction.
    Csv,
}

/// Scenario preset selector shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ScenarioArg {
    /// Two factions on a small, lightly dressed field.
    Duel,
    /// Two factions across a wide fortified frontier.
    Frontier,
    /// Four factions, one seated in each corner.
    Crossfire,
}

impl ScenarioArg {
    /// The engine preset this selector names.
    pub(crate) fn scenario(self) -> Scenario {
        match self {
            Self::Duel => Scenario::Duel,
            Self::Frontier => Scenario::Frontier,
            Self::Crossfire => Scenario::Crossfire,
        }
    }
}

/// Pick a seed: the one given, else the clock, else a fixed fallback.
///
/// Read exactly once at startup; everything downstream is deterministic
/// in whatever this returns.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// Error carried out of any command.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Wrap a message into a command error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}
