//! Typed records exchanged with the game host.
//!
//! The host describes the factory graph once, then sends one entity list per
//! turn. [`TokenReader`] turns that text into the records below; the world
//! model only ever sees these records.

mod reader;

pub use reader::{MAX_ENTITIES, MAX_FACTORIES, TokenReader};

use crate::world::{Faction, FactoryId, Link};

/// Entity kind tag for factories.
pub const KIND_FACTORY: &str = "FACTORY";
/// Entity kind tag for cyborg troops.
pub const KIND_TROOP: &str = "TROOP";
/// Entity kind tag for bombs.
pub const KIND_BOMB: &str = "BOMB";

/// Graph description sent once before the first turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    /// Number of factories; ids are `0..factory_count`.
    pub factory_count: usize,
    /// Links between factories.
    pub links: Vec<Link>,
}

/// Observed state of one factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryReport {
    /// Factory id.
    pub id: FactoryId,
    /// Current owner.
    pub owner: Faction,
    /// Cyborgs stationed there.
    pub garrison: u32,
    /// Production factor.
    pub production: u32,
}

/// A group of cyborgs in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TroopReport {
    /// Owner of the cyborgs.
    pub owner: Faction,
    /// Factory they left.
    pub source: FactoryId,
    /// Factory they are heading to.
    pub destination: FactoryId,
    /// Number of cyborgs.
    pub cyborgs: u32,
    /// Turns until arrival.
    pub remaining_turns: u32,
}

/// A bomb in flight. The opponent's destination and timing are hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombReport {
    /// Who launched it.
    pub owner: Faction,
    /// Factory it was launched from.
    pub source: FactoryId,
    /// Target, when visible.
    pub destination: Option<FactoryId>,
    /// Turns until impact, when visible.
    pub remaining_turns: Option<u32>,
}

/// One line of a turn's entity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A factory.
    Factory(FactoryReport),
    /// A troop.
    Troop(TroopReport),
    /// A bomb.
    Bomb(BombReport),
}

/// Everything the host reports for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnDelta {
    /// Entities in the order the host sent them.
    pub entities: Vec<Entity>,
}

impl TurnDelta {
    /// Create an empty delta.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a factory report.
    #[must_use]
    pub fn with_factory(
        mut self,
        id: FactoryId,
        owner: Faction,
        garrison: u32,
        production: u32,
    ) -> Self {
        self.entities.push(Entity::Factory(FactoryReport {
            id,
            owner,
            garrison,
            production,
        }));
        self
    }

    /// Append a troop report.
    #[must_use]
    pub fn with_troop(
        mut self,
        owner: Faction,
        source: FactoryId,
        destination: FactoryId,
        cyborgs: u32,
        remaining_turns: u32,
    ) -> Self {
        self.entities.push(Entity::Troop(TroopReport {
            owner,
            source,
            destination,
            cyborgs,
            remaining_turns,
        }));
        self
    }

    /// Factory reports in this delta.
    pub fn factories(&self) -> impl Iterator<Item = &FactoryReport> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Factory(f) => Some(f),
            _ => None,
        })
    }

    /// Troop reports in this delta.
    pub fn troops(&self) -> impl Iterator<Item = &TroopReport> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Troop(t) => Some(t),
            _ => None,
        })
    }

    /// Bomb reports in this delta.
    pub fn bombs(&self) -> impl Iterator<Item = &BombReport> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Bomb(b) => Some(b),
            _ => None,
        })
    }
}
