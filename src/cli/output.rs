//! Output formatting utilities for CLI.

use ghostcell::Order;
use serde::Serialize;

/// JSON-serializable turn record.
#[derive(Debug, Serialize)]
pub(super) struct JsonTurn {
    /// Turn number, starting at 1.
    pub(super) turn: u32,
    /// Orders sent this turn (empty when the bot waited).
    pub(super) orders: Vec<Order>,
}

/// Format one turn as human-readable text.
pub(super) fn format_text(turn: u32, line: &str) -> String {
    format!("turn {turn}: {}", line.trim_end())
}

/// Format one turn as a JSON line.
pub(super) fn format_json(turn: u32, orders: &[Order]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&JsonTurn {
        turn,
        orders: orders.to_vec(),
    })
}
