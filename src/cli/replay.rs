//! Replay command implementation.

use super::output::{format_json, format_text};
use super::{CliError, OutputFormat, load_strategy};
use ghostcell::Bot;
use ghostcell::protocol::TokenReader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the transcript cannot be read or breaks the protocol.
pub(crate) fn execute(
    transcript: &Path,
    format: OutputFormat,
    weights: Option<&Path>,
) -> Result<(), CliError> {
    let strategy = load_strategy(weights)?;
    let file = File::open(transcript).map_err(|e| {
        CliError::new(format!(
            "Failed to open transcript {}: {e}",
            transcript.display()
        ))
    })?;

    let mut reader = TokenReader::new(BufReader::new(file));
    let setup = reader.read_setup()?;
    let mut bot = Bot::new(&setup, strategy);

    while let Some(delta) = reader.read_turn(setup.factory_count)? {
        let orders = bot.decide(&delta).to_vec();
        let line = bot.render();
        let turn = bot.world().turn();
        match format {
            OutputFormat::Text => println!("{}", format_text(turn, &line)),
            OutputFormat::Json => println!(
                "{}",
                format_json(turn, &orders).map_err(|e| CliError::new(e.to_string()))?
            ),
        }
    }

    info!(turns = bot.world().turn(), "replay finished");
    Ok(())
}
