//! The observed world and its per-turn planning copy.

use tracing::trace;

use crate::protocol::{GameSetup, TurnDelta};
use crate::world::{Faction, FactoryId, RoutingTable, WorldState};

/// World knowledge owned by the turn loop.
///
/// `observed` is exactly what the host reported this turn. `planning` is
/// reset from it every turn and then debited by the strategy as it commits
/// cyborgs, so later phases see what earlier phases already spent. Only the
/// bomb ledger survives from one planning copy to the next.
#[derive(Debug, Clone)]
pub struct WorldModel {
    routing: RoutingTable,
    observed: WorldState,
    planning: WorldState,
    /// Turns ingested so far.
    turn: u32,
}

impl WorldModel {
    /// Build the routing table and an empty world for a game.
    #[must_use]
    pub fn new(setup: &GameSetup) -> Self {
        Self::with_routing(RoutingTable::new(setup.factory_count, &setup.links))
    }

    /// Create an empty world over an already built routing table.
    #[must_use]
    pub fn with_routing(routing: RoutingTable) -> Self {
        let observed = WorldState::new(routing.len());
        let planning = observed.clone();
        Self {
            routing,
            observed,
            planning,
            turn: 0,
        }
    }

    /// Ingest one turn.
    ///
    /// The bomb ledger is carried over from the previous planning copy, then
    /// the planning copy is reset to the new observation.
    pub fn step(&mut self, delta: &TurnDelta) {
        let carried = *self.planning.bombs();
        self.observed.apply(delta);
        self.observed.set_bombs(carried);
        self.planning.clone_from(&self.observed);
        self.turn += 1;

        trace!(
            turn = self.turn,
            entities = delta.entities.len(),
            cyborgs = self.observed.total_cyborgs(),
            bombs = carried.remaining(),
            "turn ingested"
        );
    }

    /// The routing table.
    #[must_use]
    pub const fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    /// The world as last reported by the host.
    #[must_use]
    pub const fn observed(&self) -> &WorldState {
        &self.observed
    }

    /// The planning copy.
    #[must_use]
    pub const fn planning(&self) -> &WorldState {
        &self.planning
    }

    /// Mutable access to the planning copy.
    pub fn planning_mut(&mut self) -> &mut WorldState {
        &mut self.planning
    }

    /// Number of turns ingested.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Closest factory of `faction` to `target` in the planning copy.
    ///
    /// Ties go to the lowest id. `None` when `faction` owns nothing.
    #[must_use]
    pub fn nearest(&self, target: FactoryId, faction: Faction) -> Option<FactoryId> {
        self.planning
            .factories_of(faction)
            .min_by_key(|f| (self.routing.distance(target, f.id), f.id))
            .map(|f| f.id)
    }

    /// Mean shortest distance from `src` to the factories of `faction`.
    ///
    /// `None` when `faction` owns nothing.
    #[must_use]
    pub fn mean_distance(&self, src: FactoryId, faction: Faction) -> Option<f64> {
        let (sum, count) = self
            .planning
            .factories_of(faction)
            .fold((0.0, 0u32), |(sum, count), f| {
                (sum + f64::from(self.routing.distance(src, f.id)), count + 1)
            });
        (count > 0).then(|| sum / f64::from(count))
    }
}
