//! Moving surplus from maxed-out rear factories toward the front.

// Cyborg counts are far below f64's exact integer range.
#![allow(clippy::cast_precision_loss)]

use tracing::trace;

use crate::orders::Order;
use crate::strategy::{Pass, StrategyWeights};
use crate::world::{Faction, Factory, FactoryId, WorldModel};

/// Pair the strongest rear factories with the neediest front ones.
///
/// Allies are ranked by support value. Two cursors walk inward from both
/// ends of the ranking while a bound, starting at the ally count, halves
/// every step. A source at maximum production sends its whole garrison
/// toward its partner.
pub(super) fn reallocate(pass: &mut Pass<'_>) {
    let ranking = rank_allies(pass.world, pass.weights, &pass.allies);
    if ranking.is_empty() {
        return;
    }

    let mut first = 0;
    let mut last = ranking.len() - 1;
    let mut bound = ranking.len();
    while first < last && bound > 0 {
        let source = ranking[first].0;
        let destination = ranking[last].0;
        let hop = pass.world.routing().next_hop(source, destination);
        let production = pass.world.planning().factory(source).production;
        trace!(source, destination, hop, production, "support pair");

        if production == pass.weights.max_production {
            let count = pass.world.planning_mut().drain(source);
            if count > 0 {
                pass.emit(
                    "support",
                    Order::Move {
                        from: source,
                        to: hop,
                        count,
                    },
                );
            }
        }

        first += 1;
        last -= 1;
        bound /= 2;
    }
}

/// Allies with their support value, highest first, ties by id.
fn rank_allies(
    world: &WorldModel,
    weights: &StrategyWeights,
    allies: &[FactoryId],
) -> Vec<(FactoryId, f64)> {
    let planning = world.planning();
    let mut ranking: Vec<(FactoryId, f64)> = allies
        .iter()
        .map(|&id| (id, support_value(world, weights, planning.factory(id))))
        .collect();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranking
}

/// High for productive, well-stocked factories far from the enemy.
fn support_value(world: &WorldModel, weights: &StrategyWeights, factory: &Factory) -> f64 {
    let planning = world.planning();
    let production = weights.support_production_base
        + weights.support_production_scale * f64::from(factory.production);
    let remoteness = world
        .mean_distance(factory.id, Faction::Enemy)
        .unwrap_or(weights.empty_faction_distance);
    let share = planning.discounted(factory.id, Faction::Ally) as f64
        / f64::from(planning.total_cyborgs().max(1));
    let stock = 1.0 + weights.support_share_scale * share;
    production * remoteness * stock
}
