//! Sending garrisons at the most valuable non-allied factories.

// Factory counts and cyborg counts are far below f64's exact integer range.
#![allow(clippy::cast_precision_loss)]

use tracing::trace;

use crate::orders::Order;
use crate::strategy::{Pass, StrategyWeights};
use crate::world::{Faction, Factory, FactoryId, WorldModel};

/// Score every target and commit garrisons to them, best target first.
pub(super) fn allocate(pass: &mut Pass<'_>) {
    let targets = score_targets(pass.world, pass.weights, &pass.allies);
    for (target, score) in targets {
        trace!(target, score, "attack candidate");
        commit(pass, target);
    }
}

/// Non-allied factories with their attack value, best first, ties by id.
fn score_targets(
    world: &WorldModel,
    weights: &StrategyWeights,
    allies: &[FactoryId],
) -> Vec<(FactoryId, f64)> {
    let mut scores: Vec<(FactoryId, f64)> = world
        .planning()
        .factories()
        .iter()
        .filter(|f| !f.is_ally())
        .map(|f| (f.id, attack_value(world, weights, f, allies)))
        .collect();
    scores.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scores
}

/// Product of bomb, faction, production and proximity terms.
///
/// A factory we already bombed scores zero: the bomb does the work.
fn attack_value(
    world: &WorldModel,
    weights: &StrategyWeights,
    target: &Factory,
    allies: &[FactoryId],
) -> f64 {
    let bomb = if world.planning().bombs().is_targeted(target.id) {
        0.0
    } else {
        1.0
    };
    let faction = if target.is_enemy() {
        weights.attack_enemy
    } else {
        1.0
    };
    let production = weights.attack_base + weights.attack_production * f64::from(target.production);
    let proximity = if allies.is_empty() {
        0.0
    } else {
        let routing = world.routing();
        let total: f64 = allies
            .iter()
            .map(|&ally| weights.attack_distance / routing.cost(target.id, ally))
            .sum();
        total / allies.len() as f64
    };
    bomb * faction * production * proximity
}

/// Commit whole garrisons to `target` until it is more than covered.
///
/// Nothing is sent if our presence there already beats the strongest
/// opponent plus one turn of production. Allies are taken closest first. A
/// bombed ally always empties out; any other ally only joins when it is
/// adjacent on its shortest route and has cyborgs to spare.
fn commit(pass: &mut Pass<'_>, target: FactoryId) {
    let planning = pass.world.planning();
    let opponents = planning
        .presence(target, Faction::Enemy)
        .max(planning.presence(target, Faction::Neutral));
    let ours = planning.presence(target, Faction::Ally);
    let production = planning.factory(target).production;
    if ours > opponents.saturating_add(production) {
        return;
    }
    let mut required =
        1 + i64::from(production) + i64::from(opponents) - i64::from(ours);

    let mut sources = pass.allies.clone();
    let routing = pass.world.routing();
    sources.sort_by_key(|&ally| (routing.distance(target, ally), ally));

    for source in sources {
        let planning = pass.world.planning();
        let garrison = planning.factory(source).garrison;
        let evacuate = planning.bombs().is_targeted(source);
        let available = i64::from(garrison) - i64::from(planning.presence(source, Faction::Enemy))
            + i64::from(planning.presence(source, Faction::Ally));
        let hop = pass.world.routing().next_hop(source, target);

        if evacuate || (available > 0 && hop == target) {
            let count = pass.world.planning_mut().drain(source);
            if count > 0 {
                pass.emit(
                    "attack",
                    Order::Move {
                        from: source,
                        to: hop,
                        count,
                    },
                );
                required -= i64::from(count);
            }
        }
        if required < 0 {
            break;
        }
    }
}
