//! Factories and the troops heading toward them.

use serde::Serialize;

use crate::world::Faction;

/// Index of a factory, `0..factory_count`.
pub type FactoryId = usize;

/// A single factory as observed this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Factory {
    /// Stable identifier.
    pub id: FactoryId,
    /// Current owner.
    pub owner: Faction,
    /// Cyborgs stationed in the factory.
    pub garrison: u32,
    /// Cyborgs produced per turn (0..=3).
    pub production: u32,
}

impl Factory {
    /// Create a factory.
    #[must_use]
    pub const fn new(id: FactoryId, owner: Faction, garrison: u32, production: u32) -> Self {
        Self {
            id,
            owner,
            garrison,
            production,
        }
    }

    /// An empty neutral factory, used before the first observation.
    #[must_use]
    pub const fn unobserved(id: FactoryId) -> Self {
        Self::new(id, Faction::Neutral, 0, 0)
    }

    /// Check if this factory is ours.
    #[must_use]
    pub fn is_ally(&self) -> bool {
        self.owner == Faction::Ally
    }

    /// Check if this factory belongs to the opponent.
    #[must_use]
    pub fn is_enemy(&self) -> bool {
        self.owner == Faction::Enemy
    }
}

/// Cyborgs in flight toward one factory, bucketed by owner.
///
/// Only says what will arrive eventually, not when.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Incoming {
    cyborgs: [u32; 3],
}

impl Incoming {
    /// Cyborgs of `faction` heading here.
    #[must_use]
    #[inline]
    pub const fn get(&self, faction: Faction) -> u32 {
        self.cyborgs[faction.index()]
    }

    /// Add a troop of `count` cyborgs owned by `faction`.
    pub fn add(&mut self, faction: Faction, count: u32) {
        let slot = &mut self.cyborgs[faction.index()];
        *slot = slot.saturating_add(count);
    }

    /// Total cyborgs heading here regardless of owner.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.cyborgs.iter().fold(0u32, |acc, c| acc.saturating_add(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_ownership() {
        let ally = Factory::new(0, Faction::Ally, 10, 2);
        assert!(ally.is_ally());
        assert!(!ally.is_enemy());

        let unobserved = Factory::unobserved(4);
        assert_eq!(unobserved.id, 4);
        assert_eq!(unobserved.owner, Faction::Neutral);
        assert_eq!(unobserved.garrison, 0);
    }

    #[test]
    fn test_incoming_buckets() {
        let mut incoming = Incoming::default();
        incoming.add(Faction::Ally, 4);
        incoming.add(Faction::Ally, 3);
        incoming.add(Faction::Enemy, 5);

        assert_eq!(incoming.get(Faction::Ally), 7);
        assert_eq!(incoming.get(Faction::Enemy), 5);
        assert_eq!(incoming.get(Faction::Neutral), 0);
        assert_eq!(incoming.total(), 12);
    }
}
