//! Bomb budget carried from one turn to the next.

use crate::world::FactoryId;

/// Bombs each player starts the game with.
pub const INITIAL_BOMBS: u8 = 2;

/// Remaining bombs and the factories they were sent at.
///
/// This is the only part of the world that is not re-derived from each
/// observation, so the turn loop copies it forward explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombLedger {
    /// Bombs not yet launched.
    remaining: u8,
    /// Targets of launched bombs, filled in launch order.
    targets: [Option<FactoryId>; INITIAL_BOMBS as usize],
}

impl Default for BombLedger {
    fn default() -> Self {
        Self {
            remaining: INITIAL_BOMBS,
            targets: [None; INITIAL_BOMBS as usize],
        }
    }
}

impl BombLedger {
    /// Bombs not yet launched.
    #[must_use]
    pub const fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Check if at least one bomb can still be launched.
    #[must_use]
    pub const fn has_bomb(&self) -> bool {
        self.remaining > 0
    }

    /// Check if no bomb has been launched yet.
    #[must_use]
    pub const fn is_untouched(&self) -> bool {
        self.remaining == INITIAL_BOMBS
    }

    /// Check if a bomb has already been sent at `factory`.
    #[must_use]
    pub fn is_targeted(&self, factory: FactoryId) -> bool {
        self.targets.contains(&Some(factory))
    }

    /// Targets of launched bombs.
    pub fn targets(&self) -> impl Iterator<Item = FactoryId> + '_ {
        self.targets.iter().flatten().copied()
    }

    /// Spend a bomb on `target`.
    ///
    /// Returns `false` and leaves the ledger untouched when no bomb is left
    /// or `target` already has one on its way.
    pub fn launch(&mut self, target: FactoryId) -> bool {
        if !self.has_bomb() || self.is_targeted(target) {
            return false;
        }
        let Some(slot) = self.targets.iter_mut().find(|t| t.is_none()) else {
            return false;
        };
        *slot = Some(target);
        self.remaining -= 1;
        true
    }
}
