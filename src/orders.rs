//! Orders and the per-turn order batch.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::world::FactoryId;

/// Separator between directives on the output line.
pub const ORDER_SEPARATOR: &str = ";";

/// A single order sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Order {
    /// Do nothing.
    Wait,
    /// Send cyborgs from one factory to another.
    Move {
        /// Factory the cyborgs leave.
        from: FactoryId,
        /// Factory they head to.
        to: FactoryId,
        /// Number of cyborgs.
        count: u32,
    },
    /// Launch a bomb.
    Bomb {
        /// Launching factory.
        from: FactoryId,
        /// Target factory.
        to: FactoryId,
    },
    /// Spend cyborgs to raise a factory's production.
    IncrementProduction {
        /// Factory to upgrade.
        factory: FactoryId,
    },
}

/// Whether an order is finished once it has been sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Sent, but must be sent again next turn.
    Attempted,
    /// Nothing left to do.
    Completed,
}

impl Order {
    /// State of the order after being written out once.
    ///
    /// Every current order kind completes in a single turn.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        match self {
            Order::Wait
            | Order::Move { .. }
            | Order::Bomb { .. }
            | Order::IncrementProduction { .. } => OrderStatus::Completed,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Wait => write!(f, "WAIT"),
            Order::Move { from, to, count } => write!(f, "MOVE {from} {to} {count}"),
            Order::Bomb { from, to } => write!(f, "BOMB {from} {to}"),
            Order::IncrementProduction { factory } => write!(f, "INC {factory}"),
        }
    }
}

/// Orders collected during a turn.
///
/// Orders that report [`OrderStatus::Attempted`] when flushed stay in the
/// sink and go out again with the next batch.
#[derive(Debug, Clone, Default)]
pub struct OrderSink {
    orders: Vec<Order>,
}

impl OrderSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an order.
    pub fn push(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Check if no order is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Queued orders, in submission order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Render the batch as one line and keep only unfinished orders.
    ///
    /// An empty batch renders as `WAIT`. The line ends with `\n`.
    pub fn render(&mut self) -> String {
        let mut line = if self.orders.is_empty() {
            Order::Wait.to_string()
        } else {
            self.orders
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(ORDER_SEPARATOR)
        };
        line.push('\n');
        self.orders
            .retain(|order| order.status() != OrderStatus::Completed);
        line
    }

    /// Write the batch to `out` and keep only unfinished orders.
    ///
    /// Returns the line that was written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing `out` fails.
    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<String> {
        let line = self.render();
        out.write_all(line.as_bytes())?;
        out.flush()?;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_display() {
        assert_eq!(Order::Wait.to_string(), "WAIT");
        assert_eq!(
            Order::Move {
                from: 0,
                to: 3,
                count: 12
            }
            .to_string(),
            "MOVE 0 3 12"
        );
        assert_eq!(Order::Bomb { from: 2, to: 5 }.to_string(), "BOMB 2 5");
        assert_eq!(
            Order::IncrementProduction { factory: 4 }.to_string(),
            "INC 4"
        );
    }

    #[test]
    fn test_empty_sink_waits() {
        let mut sink = OrderSink::new();
        assert_eq!(sink.render(), "WAIT\n");
    }

    #[test]
    fn test_flush_joins_and_clears() {
        let mut sink = OrderSink::new();
        sink.push(Order::IncrementProduction { factory: 1 });
        sink.push(Order::Move {
            from: 1,
            to: 2,
            count: 7,
        });

        let mut out = Vec::new();
        let line = sink.flush(&mut out).unwrap();
        assert_eq!(line, "INC 1;MOVE 1 2 7\n");
        assert_eq!(out, b"INC 1;MOVE 1 2 7\n");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_every_kind_completes() {
        let orders = [
            Order::Wait,
            Order::Move {
                from: 0,
                to: 1,
                count: 1,
            },
            Order::Bomb { from: 0, to: 1 },
            Order::IncrementProduction { factory: 0 },
        ];
        for order in orders {
            assert_eq!(order.status(), OrderStatus::Completed);
        }
    }

    #[test]
    fn test_order_json() {
        let json = serde_json::to_string(&Order::Bomb { from: 1, to: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"bomb","from":1,"to":4}"#);
    }
}
