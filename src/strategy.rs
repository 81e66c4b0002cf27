//! Turning world knowledge into orders.
//!
//! The only strategy today runs four phases in a fixed order. Each phase
//! reads the planning copy of the world and debits it as it commits cyborgs,
//! so later phases only see what is still free:
//!
//! 1. Production: upgrade safe factories that can afford it
//! 2. Bombing: spend a bomb on a runaway enemy factory
//! 3. Attack: send garrisons at the best-scored targets
//! 4. Support: move surplus from maxed-out factories toward the front
//!
//! A phase with nothing to do emits nothing; a pass never fails.

mod attack;
mod bombing;
mod production;
mod support;
mod weights;

pub use weights::StrategyWeights;

use tracing::debug;

use crate::orders::Order;
use crate::world::{Faction, FactoryId, WorldModel};

/// Available strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Grow production first, then attack and reinforce by weighted scores.
    BestProduction(StrategyWeights),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::BestProduction(StrategyWeights::default())
    }
}

impl Strategy {
    /// Decide this turn's orders.
    ///
    /// Debits the planning copy of `world` and may spend bombs from its
    /// ledger; the observed state is left untouched.
    pub fn compute(&self, world: &mut WorldModel) -> Vec<Order> {
        match self {
            Strategy::BestProduction(weights) => best_production(world, weights),
        }
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> &StrategyWeights {
        match self {
            Strategy::BestProduction(weights) => weights,
        }
    }
}

/// Shared state of one decision pass.
struct Pass<'a> {
    world: &'a mut WorldModel,
    weights: &'a StrategyWeights,
    /// Our factories, by ascending id. Ownership does not change mid-pass.
    allies: Vec<FactoryId>,
    orders: Vec<Order>,
}

impl Pass<'_> {
    fn emit(&mut self, phase: &'static str, order: Order) {
        debug!(phase, %order, "order");
        self.orders.push(order);
    }
}

fn best_production(world: &mut WorldModel, weights: &StrategyWeights) -> Vec<Order> {
    let allies = world.planning().ids_of(Faction::Ally);
    let mut pass = Pass {
        world,
        weights,
        allies,
        orders: Vec::new(),
    };

    production::upgrade(&mut pass);
    bombing::launch(&mut pass);
    attack::allocate(&mut pass);
    support::reallocate(&mut pass);

    pass.orders
}
