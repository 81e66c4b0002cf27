//! Production upgrades for factories far from the front.

use tracing::trace;

use crate::orders::Order;
use crate::strategy::Pass;
use crate::world::{Faction, FactoryId, WorldModel};

/// Upgrade every ally that can pay for it, safest first.
///
/// A factory pays when both its garrison and its discounted strength cover
/// the upgrade cost. The cost is debited from the planning copy.
pub(super) fn upgrade(pass: &mut Pass<'_>) {
    let cost = pass.weights.upgrade_cost;
    let world: &WorldModel = pass.world;
    let mut candidates: Vec<(FactoryId, u32)> = pass
        .allies
        .iter()
        .map(|&id| (id, distance_to_enemy(world, id)))
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for (id, safety) in candidates {
        let planning = pass.world.planning();
        let garrison = planning.factory(id).garrison;
        let discounted = planning.discounted(id, Faction::Ally);
        trace!(id, safety, garrison, discounted, "upgrade candidate");

        if garrison >= cost && discounted >= i64::from(cost) {
            pass.world.planning_mut().debit(id, cost);
            pass.emit("production", Order::IncrementProduction { factory: id });
        }
    }
}

/// Turns from `id` to the closest enemy factory; `u32::MAX` when there is none.
fn distance_to_enemy(world: &WorldModel, id: FactoryId) -> u32 {
    world
        .nearest(id, Faction::Enemy)
        .map_or(u32::MAX, |enemy| world.routing().distance(id, enemy))
}

#[cfg(test)]
mod tests {
    use crate::orders::Order;
    use crate::protocol::{GameSetup, TurnDelta};
    use crate::strategy::{Strategy, StrategyWeights};
    use crate::world::{Faction, Link, WorldModel};

    fn world(delta: &TurnDelta) -> WorldModel {
        // 0 - 1 - 2 - 3, each link 3 turns.
        let mut world = WorldModel::new(&GameSetup {
            factory_count: 4,
            links: (0..3).map(|i| Link::new(i, i + 1, 3)).collect(),
        });
        world.step(delta);
        world
    }

    fn upgrades(orders: &[Order]) -> Vec<usize> {
        orders
            .iter()
            .filter_map(|o| match o {
                Order::IncrementProduction { factory } => Some(*factory),
                _ => None,
            })
            .collect()
    }

    /// Weights that keep the other phases quiet.
    fn production_only() -> Strategy {
        Strategy::BestProduction(StrategyWeights {
            bomb_trigger: f64::INFINITY,
            ..StrategyWeights::default()
        })
    }

    #[test]
    fn test_upgrade_debits_exactly_cost() {
        let mut w = world(
            &TurnDelta::new()
                .with_factory(0, Faction::Ally, 25, 1)
                .with_factory(1, Faction::Ally, 0, 0)
                .with_factory(2, Faction::Ally, 0, 0)
                .with_factory(3, Faction::Enemy, 60, 3),
        );
        let mut pass_world = w.clone();
        let orders = production_only().compute(&mut pass_world);
        assert_eq!(upgrades(&orders), vec![0]);

        // Run the phase alone to observe the debit before attack spends the rest.
        let weights = StrategyWeights::default();
        let allies = w.planning().ids_of(Faction::Ally);
        let mut pass = crate::strategy::Pass {
            world: &mut w,
            weights: &weights,
            allies,
            orders: Vec::new(),
        };
        super::upgrade(&mut pass);
        assert_eq!(pass.orders, vec![Order::IncrementProduction { factory: 0 }]);
        assert_eq!(w.planning().factory(0).garrison, 15);
    }

    #[test]
    fn test_upgrade_needs_discounted_strength() {
        // Enough garrison, but an incoming enemy wave eats the margin.
        let delta = TurnDelta::new()
            .with_factory(0, Faction::Ally, 12, 0)
            .with_factory(3, Faction::Enemy, 5, 1)
            .with_troop(Faction::Enemy, 3, 0, 8, 6);
        let mut w = world(&delta);
        let orders = production_only().compute(&mut w);
        assert!(upgrades(&orders).is_empty());
    }

    #[test]
    fn test_upgrade_order_is_safest_first() {
        let delta = TurnDelta::new()
            .with_factory(0, Faction::Ally, 10, 0)
            .with_factory(1, Faction::Ally, 10, 0)
            .with_factory(2, Faction::Ally, 10, 0)
            .with_factory(3, Faction::Enemy, 50, 3);
        let mut w = world(&delta);
        let orders = production_only().compute(&mut w);
        assert_eq!(upgrades(&orders), vec![0, 1, 2]);
    }

    #[test]
    fn test_no_enemy_ties_by_id() {
        let delta = TurnDelta::new()
            .with_factory(2, Faction::Ally, 11, 0)
            .with_factory(1, Faction::Ally, 11, 0);
        let mut w = world(&delta);
        let orders = production_only().compute(&mut w);
        assert_eq!(upgrades(&orders), vec![1, 2]);
    }
}
