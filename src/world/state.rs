//! One view of the world: factories, troops in flight and the bomb ledger.

use tracing::warn;

use crate::protocol::TurnDelta;
use crate::world::{BombLedger, Faction, Factory, FactoryId, Incoming};

/// Factories, incoming troops and bombs as seen at one point of a turn.
///
/// The world model keeps two of these: the observed state exactly as the host
/// reported it, and a planning copy the strategy is free to debit while it
/// decides on orders.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    /// Factories indexed by id.
    factories: Vec<Factory>,
    /// Troops in flight, indexed by destination factory.
    incoming: Vec<Incoming>,
    /// Every cyborg on the board, stationed or travelling.
    total_cyborgs: u32,
    /// Bombs left and their targets.
    bombs: BombLedger,
}

impl WorldState {
    /// Create a state with `factory_count` empty neutral factories.
    #[must_use]
    pub fn new(factory_count: usize) -> Self {
        Self {
            factories: (0..factory_count).map(Factory::unobserved).collect(),
            incoming: vec![Incoming::default(); factory_count],
            total_cyborgs: 0,
            bombs: BombLedger::default(),
        }
    }

    /// Number of factories.
    #[must_use]
    pub fn factory_count(&self) -> usize {
        self.factories.len()
    }

    /// All factories, by ascending id.
    #[must_use]
    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    /// Factories owned by `faction`, by ascending id.
    pub fn factories_of(&self, faction: Faction) -> impl Iterator<Item = &Factory> {
        self.factories.iter().filter(move |f| f.owner == faction)
    }

    /// Ids of factories owned by `faction`, by ascending id.
    #[must_use]
    pub fn ids_of(&self, faction: Faction) -> Vec<FactoryId> {
        self.factories_of(faction).map(|f| f.id).collect()
    }

    /// A factory by id.
    #[must_use]
    #[inline]
    pub fn factory(&self, id: FactoryId) -> &Factory {
        &self.factories[id]
    }

    /// Troops heading to a factory.
    #[must_use]
    #[inline]
    pub fn incoming(&self, id: FactoryId) -> Incoming {
        self.incoming[id]
    }

    /// Number of troop buckets, one per factory.
    #[must_use]
    pub fn incoming_len(&self) -> usize {
        self.incoming.len()
    }

    /// Every cyborg on the board.
    #[must_use]
    pub const fn total_cyborgs(&self) -> u32 {
        self.total_cyborgs
    }

    /// The bomb ledger.
    #[must_use]
    pub const fn bombs(&self) -> &BombLedger {
        &self.bombs
    }

    /// Mutable access to the bomb ledger.
    pub fn bombs_mut(&mut self) -> &mut BombLedger {
        &mut self.bombs
    }

    /// Replace the bomb ledger.
    pub fn set_bombs(&mut self, bombs: BombLedger) {
        self.bombs = bombs;
    }

    /// Cyborgs of `faction` at `target`.
    ///
    /// If `faction` owns the factory this is its garrison, otherwise the
    /// cyborgs of `faction` in flight toward it. The two are never summed.
    #[must_use]
    pub fn presence(&self, target: FactoryId, faction: Faction) -> u32 {
        let factory = &self.factories[target];
        if factory.owner == faction {
            factory.garrison
        } else {
            self.incoming[target].get(faction)
        }
    }

    /// Net cyborgs of `faction` at `target` once pending arrivals land.
    ///
    /// Garrison (when owned by `faction`) plus `faction`'s incoming troops,
    /// minus the incoming troops of the opposing side.
    #[must_use]
    pub fn discounted(&self, target: FactoryId, faction: Faction) -> i64 {
        let factory = &self.factories[target];
        let incoming = self.incoming[target];
        let own = if factory.owner == faction {
            i64::from(factory.garrison)
        } else {
            0
        };
        own + i64::from(incoming.get(faction)) - i64::from(incoming.get(faction.opposing()))
    }

    /// Take up to `count` cyborgs out of a garrison.
    ///
    /// Returns the number actually removed; a garrison never goes below zero.
    pub fn debit(&mut self, id: FactoryId, count: u32) -> u32 {
        let garrison = &mut self.factories[id].garrison;
        let taken = count.min(*garrison);
        *garrison -= taken;
        taken
    }

    /// Empty a garrison, returning what it held.
    pub fn drain(&mut self, id: FactoryId) -> u32 {
        std::mem::take(&mut self.factories[id].garrison)
    }

    /// Overwrite factories and rebuild troop buckets from one turn's report.
    ///
    /// Entities naming a factory outside the state are dropped with a
    /// warning; the protocol reader never produces them.
    pub(crate) fn apply(&mut self, delta: &TurnDelta) {
        let count = self.factories.len();
        self.incoming.fill(Incoming::default());

        for report in delta.factories() {
            if report.id >= count {
                warn!(id = report.id, count, "factory report out of range");
                continue;
            }
            self.factories[report.id] =
                Factory::new(report.id, report.owner, report.garrison, report.production);
        }

        let mut in_flight = 0u32;
        for troop in delta.troops() {
            if troop.destination >= count {
                warn!(
                    destination = troop.destination,
                    count, "troop report out of range"
                );
                continue;
            }
            self.incoming[troop.destination].add(troop.owner, troop.cyborgs);
            in_flight = in_flight.saturating_add(troop.cyborgs);
        }

        let stationed = self
            .factories
            .iter()
            .fold(0u32, |acc, f| acc.saturating_add(f.garrison));
        self.total_cyborgs = stationed.saturating_add(in_flight);
    }
}
