//! Ownership labels for factories and troops.

use serde::Serialize;

/// Which side owns a factory or a group of cyborgs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Faction {
    /// Nobody owns it.
    Neutral = 0,
    /// Owned by this bot.
    Ally = 1,
    /// Owned by the opponent.
    Enemy = 2,
}

impl Faction {
    /// All factions, in bucket order.
    pub const ALL: [Faction; 3] = [Faction::Neutral, Faction::Ally, Faction::Enemy];

    /// Decode the owner code used by the game host.
    ///
    /// `1` is us, `-1` is the opponent, anything else is neutral.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Faction::Ally,
            -1 => Faction::Enemy,
            _ => Faction::Neutral,
        }
    }

    /// The side whose incoming troops count against this one.
    ///
    /// Neutral factories are contested by us, so they oppose [`Faction::Ally`].
    #[must_use]
    pub const fn opposing(self) -> Self {
        match self {
            Faction::Ally => Faction::Enemy,
            Faction::Neutral | Faction::Enemy => Faction::Ally,
        }
    }

    /// Index into per-faction buckets.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Faction::from_code(1), Faction::Ally);
        assert_eq!(Faction::from_code(-1), Faction::Enemy);
        assert_eq!(Faction::from_code(0), Faction::Neutral);
        assert_eq!(Faction::from_code(7), Faction::Neutral);
    }

    #[test]
    fn test_opposing() {
        assert_eq!(Faction::Ally.opposing(), Faction::Enemy);
        assert_eq!(Faction::Enemy.opposing(), Faction::Ally);
        assert_eq!(Faction::Neutral.opposing(), Faction::Ally);
    }

    #[test]
    fn test_bucket_indices_are_distinct() {
        let indices: Vec<usize> = Faction::ALL.iter().map(|f| f.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
