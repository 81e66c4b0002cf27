//! World knowledge for the bot.
//!
//! - Routing table built once from the factory graph
//! - Factories and troop buckets rebuilt from every observation
//! - Bomb ledger carried from turn to turn
//! - Observed state and a planning copy the strategy debits

mod bombs;
mod faction;
mod factory;
mod model;
mod routing;
mod state;

pub use bombs::{BombLedger, INITIAL_BOMBS};
pub use faction::Faction;
pub use factory::{Factory, FactoryId, Incoming};
pub use model::WorldModel;
pub use routing::{Link, RoutingTable, UNREACHABLE};
pub use state::WorldState;
