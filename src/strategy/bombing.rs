//! Bomb launches against runaway enemy factories.

// Cyborg counts are far below f64's exact integer range.
#![allow(clippy::cast_precision_loss)]

use tracing::trace;

use crate::orders::Order;
use crate::strategy::{Pass, StrategyWeights};
use crate::world::{Faction, FactoryId, WorldModel};

/// Launch at most one bomb this turn.
///
/// The bomb leaves from the ally closest to the target and the target is
/// recorded in the ledger so it is never bombed twice.
pub(super) fn launch(pass: &mut Pass<'_>) {
    let bombs = *pass.world.planning().bombs();
    if !bombs.has_bomb() {
        return;
    }
    let Some(target) = choose_target(pass.world, pass.weights) else {
        return;
    };
    if bombs.is_targeted(target) {
        trace!(target, "target already bombed");
        return;
    }
    let Some(source) = pass.world.nearest(target, Faction::Ally) else {
        return;
    };

    if pass.world.planning_mut().bombs_mut().launch(target) {
        pass.emit(
            "bombing",
            Order::Bomb {
                from: source,
                to: target,
            },
        );
    }
}

/// Pick the enemy factory worth a bomb, if any.
///
/// In a one-on-one opening with both bombs unused the lone enemy is always
/// picked. Otherwise the enemy with the strongest discounted garrison is
/// picked when it outweighs our strongest garrison by the trigger ratio.
fn choose_target(world: &WorldModel, weights: &StrategyWeights) -> Option<FactoryId> {
    let planning = world.planning();
    let enemy_count = planning.factories_of(Faction::Enemy).count();
    let ally_count = planning.factories_of(Faction::Ally).count();
    let strongest_ally = planning
        .factories_of(Faction::Ally)
        .map(|f| f.garrison)
        .max()
        .unwrap_or(0);

    // Highest projection wins; `max_by` keeps the last maximum, so compare
    // ids in reverse to favour the lowest.
    let (target, projected) = planning
        .factories_of(Faction::Enemy)
        .map(|f| (f.id, planning.discounted(f.id, Faction::Enemy)))
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))?;

    trace!(target, projected, strongest_ally, "bomb candidate");

    if enemy_count == 1 && ally_count == 1 && planning.bombs().is_untouched() {
        return Some(target);
    }
    (projected as f64 > weights.bomb_trigger * f64::from(strongest_ally)).then_some(target)
}

#[cfg(test)]
mod tests {
    use crate::orders::Order;
    use crate::protocol::{GameSetup, TurnDelta};
    use crate::strategy::{Pass, StrategyWeights};
    use crate::world::{Faction, Link, WorldModel};

    /// Star around factory 0; the spoke to factory `i` takes `2 * i` turns.
    fn world(delta: &TurnDelta) -> WorldModel {
        let mut world = WorldModel::new(&GameSetup {
            factory_count: 5,
            links: (1..5)
                .map(|i| Link::new(0, i, 2 * u32::try_from(i).unwrap()))
                .collect(),
        });
        world.step(delta);
        world
    }

    fn run(world: &mut WorldModel) -> Vec<Order> {
        let weights = StrategyWeights::default();
        let allies = world.planning().ids_of(Faction::Ally);
        let mut pass = Pass {
            world,
            weights: &weights,
            allies,
            orders: Vec::new(),
        };
        super::launch(&mut pass);
        pass.orders
    }

    #[test]
    fn test_one_on_one_always_bombs() {
        let mut w = world(
            &TurnDelta::new()
                .with_factory(1, Faction::Ally, 100, 3)
                .with_factory(2, Faction::Enemy, 1, 0),
        );
        assert_eq!(run(&mut w), vec![Order::Bomb { from: 1, to: 2 }]);
        assert_eq!(w.planning().bombs().remaining(), 1);
        assert!(w.planning().bombs().is_targeted(2));
    }

    #[test]
    fn test_one_on_one_only_while_untouched() {
        let mut w = world(
            &TurnDelta::new()
                .with_factory(1, Faction::Ally, 100, 3)
                .with_factory(2, Faction::Enemy, 1, 0),
        );
        run(&mut w);
        // Same board next turn: the special case no longer applies and the
        // enemy is far too weak to trigger a bomb.
        w.step(
            &TurnDelta::new()
                .with_factory(1, Faction::Ally, 100, 3)
                .with_factory(2, Faction::Enemy, 1, 0),
        );
        assert!(run(&mut w).is_empty());
        assert_eq!(w.planning().bombs().remaining(), 1);
    }

    #[test]
    fn test_trigger_ratio() {
        let delta = TurnDelta::new()
            .with_factory(1, Faction::Ally, 10, 1)
            .with_factory(2, Faction::Ally, 12, 1)
            .with_factory(3, Faction::Enemy, 24, 2)
            .with_factory(4, Faction::Enemy, 30, 3);
        let mut w = world(&delta);
        // 30 > 2 * 12: the strongest enemy is bombed from the closest ally.
        assert_eq!(run(&mut w), vec![Order::Bomb { from: 1, to: 4 }]);

        let delta = TurnDelta::new()
            .with_factory(1, Faction::Ally, 15, 1)
            .with_factory(2, Faction::Ally, 12, 1)
            .with_factory(4, Faction::Enemy, 30, 3);
        let mut w = world(&delta);
        // 30 is not more than 2 * 15.
        assert!(run(&mut w).is_empty());
    }

    #[test]
    fn test_projection_counts_incoming() {
        let delta = TurnDelta::new()
            .with_factory(1, Faction::Ally, 5, 1)
            .with_factory(2, Faction::Ally, 5, 1)
            .with_factory(3, Faction::Enemy, 8, 2)
            .with_troop(Faction::Enemy, 4, 3, 4, 3);
        let mut w = world(&delta);
        // 8 + 4 incoming = 12 > 10.
        assert_eq!(run(&mut w), vec![Order::Bomb { from: 1, to: 3 }]);
    }

    #[test]
    fn test_never_bombs_same_target_twice() {
        let delta = TurnDelta::new()
            .with_factory(1, Faction::Ally, 1, 1)
            .with_factory(2, Faction::Ally, 1, 1)
            .with_factory(3, Faction::Enemy, 40, 2);
        let mut w = world(&delta);
        assert_eq!(run(&mut w).len(), 1);

        w.step(&delta);
        assert!(run(&mut w).is_empty());
        assert_eq!(w.planning().bombs().remaining(), 1);
    }

    #[test]
    fn test_no_bombs_left() {
        let delta = TurnDelta::new()
            .with_factory(1, Faction::Ally, 1, 1)
            .with_factory(2, Faction::Ally, 1, 1)
            .with_factory(3, Faction::Enemy, 40, 2)
            .with_factory(4, Faction::Enemy, 50, 2);
        let mut w = world(&delta);
        assert_eq!(run(&mut w), vec![Order::Bomb { from: 1, to: 4 }]);

        // The strongest enemy is already bombed: nothing this turn.
        w.step(&delta);
        assert!(run(&mut w).is_empty());

        let grown = TurnDelta::new()
            .with_factory(1, Faction::Ally, 1, 1)
            .with_factory(2, Faction::Ally, 1, 1)
            .with_factory(3, Faction::Enemy, 60, 2)
            .with_factory(4, Faction::Enemy, 50, 2);
        w.step(&grown);
        assert_eq!(run(&mut w), vec![Order::Bomb { from: 1, to: 3 }]);

        w.step(&grown);
        assert!(run(&mut w).is_empty());
        assert_eq!(w.planning().bombs().remaining(), 0);
    }
}
