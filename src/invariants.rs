//! World invariants - sanity checks that detect bugs.
//!
//! These should never trigger for input produced by a well-behaved host and
//! a correct strategy. They are not gameplay rules.

use std::collections::HashSet;

use crate::world::{INITIAL_BOMBS, WorldModel, WorldState};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all world invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(world: &WorldModel) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let routing = world.routing();

    for (label, state) in [("observed", world.observed()), ("planning", world.planning())] {
        if state.factory_count() != routing.len() {
            violations.push(InvariantViolation {
                message: format!(
                    "{label} state has {} factories but the routing table covers {}",
                    state.factory_count(),
                    routing.len()
                ),
            });
        }
        if state.incoming_len() != state.factory_count() {
            violations.push(InvariantViolation {
                message: format!(
                    "{label} state has {} troop buckets for {} factories",
                    state.incoming_len(),
                    state.factory_count()
                ),
            });
        }
        check_factory_ids(label, state, &mut violations);
        check_bombs(label, state, &mut violations);
    }

    // Observed garrisons only shrink in the planning copy.
    for (observed, planned) in world
        .observed()
        .factories()
        .iter()
        .zip(world.planning().factories())
    {
        if planned.garrison > observed.garrison {
            violations.push(InvariantViolation {
                message: format!(
                    "Factory {} planned garrison {} exceeds observed {}",
                    observed.id, planned.garrison, observed.garrison
                ),
            });
        }
    }

    // Bombs are only ever spent.
    let observed_bombs = world.observed().bombs().remaining();
    let planned_bombs = world.planning().bombs().remaining();
    if planned_bombs > observed_bombs {
        violations.push(InvariantViolation {
            message: format!(
                "Planning has {planned_bombs} bombs but only {observed_bombs} were available"
            ),
        });
    }

    violations
}

fn check_factory_ids(label: &str, state: &WorldState, violations: &mut Vec<InvariantViolation>) {
    for (index, factory) in state.factories().iter().enumerate() {
        if factory.id != index {
            violations.push(InvariantViolation {
                message: format!("{label} factory at slot {index} has id {}", factory.id),
            });
        }
    }
}

fn check_bombs(label: &str, state: &WorldState, violations: &mut Vec<InvariantViolation>) {
    let bombs = state.bombs();
    if bombs.remaining() > INITIAL_BOMBS {
        violations.push(InvariantViolation {
            message: format!(
                "{label} ledger has {} bombs, more than the {INITIAL_BOMBS} a game starts with",
                bombs.remaining()
            ),
        });
    }

    let targets: Vec<_> = bombs.targets().collect();
    let used = usize::from(INITIAL_BOMBS - bombs.remaining().min(INITIAL_BOMBS));
    if targets.len() != used {
        violations.push(InvariantViolation {
            message: format!(
                "{label} ledger records {} targets for {used} bombs used",
                targets.len()
            ),
        });
    }

    let distinct: HashSet<_> = targets.iter().collect();
    if distinct.len() != targets.len() {
        violations.push(InvariantViolation {
            message: format!("{label} ledger targets a factory twice: {targets:?}"),
        });
    }

    for target in targets {
        if target >= state.factory_count() {
            violations.push(InvariantViolation {
                message: format!("{label} ledger targets unknown factory {target}"),
            });
        }
    }
}
