// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Ghostcell: a heuristic bot for a turn-based factory conquest game.
//!
//! The bot reads the game setup and per-turn entity snapshots on one stream
//! and answers each turn with a single line of orders on another.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Bot loop (protocol -> orders)     │
//! ├─────────────────────────────────────┤
//! │   Strategy (four ordered phases)    │
//! ├─────────────────────────────────────┤
//! │   World model + routing table       │
//! └─────────────────────────────────────┘
//! ```

pub mod bot;
pub mod error;
pub mod invariants;
pub mod orders;
pub mod protocol;
pub mod strategy;
pub mod world;

pub use bot::{Bot, run};
pub use error::{BotError, ConfigError, ProtocolError, ProtocolResult};

// Re-export key types at crate root for convenience
pub use orders::{Order, OrderSink};
pub use protocol::{GameSetup, TurnDelta};
pub use strategy::{Strategy, StrategyWeights};
pub use world::{Faction, FactoryId, Link, RoutingTable, WorldModel};
