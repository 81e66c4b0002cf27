//! CLI command implementations for Ghostcell.

pub(crate) mod play;
pub(crate) mod replay;

mod output;

use clap::ValueEnum;
use ghostcell::{BotError, ConfigError, Strategy, StrategyWeights};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// One JSON object per turn.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
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

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BotError> for CliError {
    fn from(e: BotError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ghostcell::ProtocolError> for CliError {
    fn from(e: ghostcell::ProtocolError) -> Self {
        Self::new(e.to_string())
    }
}

/// Build the strategy, reading weights from `path` if given.
fn load_strategy(path: Option<&Path>) -> Result<Strategy, CliError> {
    let weights = match path {
        Some(path) => StrategyWeights::load(path)?,
        None => StrategyWeights::default(),
    };
    Ok(Strategy::BestProduction(weights))
}
