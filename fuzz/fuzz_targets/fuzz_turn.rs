#![no_main]

//! Multi-turn decision fuzzer.
//!
//! Builds a connected map and a sequence of snapshots, plays them through
//! the bot and checks the world invariants after every turn.

use arbitrary::Arbitrary;
use ghostcell::invariants::check_invariants;
use ghostcell::protocol::{GameSetup, TurnDelta};
use ghostcell::world::{Faction, Link};
use ghostcell::{Bot, Strategy};
use libfuzzer_sys::fuzz_target;

/// A factory as reported in one snapshot.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzFactory {
    owner: i8,
    garrison: u16,
    production: u8,
}

/// A troop in flight.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzTroop {
    enemy: bool,
    source: u8,
    destination: u8,
    cyborgs: u16,
    eta: u8,
}

/// Structured input for multi-turn fuzzing.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    /// Factory count, capped below.
    factories: u8,
    /// Parent choice and weight for each spanning-tree link.
    tree: Vec<(u8, u8)>,
    /// Extra links beyond the tree.
    extra: Vec<(u8, u8, u8)>,
    /// One snapshot per turn.
    turns: Vec<(Vec<FuzzFactory>, Vec<FuzzTroop>)>,
}

fuzz_target!(|input: TurnInput| {
    let n = usize::from(input.factories % 15) + 1;

    let mut links = Vec::new();
    for child in 1..n {
        let (parent, weight) = input.tree.get(child - 1).copied().unwrap_or((0, 1));
        links.push(Link::new(usize::from(parent) % child, child, u32::from(weight % 20) + 1));
    }
    for &(a, b, weight) in input.extra.iter().take(32) {
        links.push(Link::new(usize::from(a) % n, usize::from(b) % n, u32::from(weight % 20) + 1));
    }

    let setup = GameSetup {
        factory_count: n,
        links,
    };
    let mut bot = Bot::new(&setup, Strategy::default());

    for (factories, troops) in input.turns.iter().take(20) {
        let mut delta = TurnDelta::new();
        for (id, factory) in factories.iter().take(n).enumerate() {
            delta = delta.with_factory(
                id,
                Faction::from_code(i64::from(factory.owner.signum())),
                u32::from(factory.garrison),
                u32::from(factory.production % 4),
            );
        }
        for troop in troops.iter().take(32) {
            let owner = if troop.enemy { Faction::Enemy } else { Faction::Ally };
            delta = delta.with_troop(
                owner,
                usize::from(troop.source) % n,
                usize::from(troop.destination) % n,
                u32::from(troop.cyborgs),
                u32::from(troop.eta),
            );
        }

        let line = bot.play_turn(&delta);
        assert!(line.ends_with('\n'));

        let violations = check_invariants(bot.world());
        assert!(violations.is_empty(), "{violations:?}");
    }
});
