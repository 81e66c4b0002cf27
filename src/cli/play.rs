//! Play command implementation.

use super::{CliError, load_strategy};
use std::io;
use std::path::Path;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the weights cannot be loaded or the game stream breaks.
pub(crate) fn execute(weights: Option<&Path>) -> Result<(), CliError> {
    let strategy = load_strategy(weights)?;
    ghostcell::run(io::stdin().lock(), io::stdout().lock(), strategy)?;
    Ok(())
}
