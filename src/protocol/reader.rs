//! Whitespace-token reader for the host's line protocol.

use std::io::BufRead;

use crate::error::{ProtocolError, ProtocolResult};
use crate::protocol::{
    BombReport, Entity, FactoryReport, GameSetup, KIND_BOMB, KIND_FACTORY, KIND_TROOP,
    TroopReport, TurnDelta,
};
use crate::world::{Faction, FactoryId, Link};

/// Most factories a map may announce. Real maps have at most 15.
pub const MAX_FACTORIES: usize = 256;

/// Most entities a single turn may announce.
pub const MAX_ENTITIES: usize = 4096;

/// Reads setup and turn records from a buffered text stream.
///
/// Tokens may be spread over lines arbitrarily; only their order matters.
#[derive(Debug)]
pub struct TokenReader<R> {
    input: R,
    /// Tokens of the current line, reversed so `pop` yields the next one.
    pending: Vec<String>,
    line: String,
}

impl<R: BufRead> TokenReader<R> {
    /// Wrap a buffered reader.
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: Vec::new(),
            line: String::new(),
        }
    }

    /// Next token, or `None` at end of input.
    fn next_token(&mut self) -> ProtocolResult<Option<String>> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.pending = self
                .line
                .split_whitespace()
                .rev()
                .map(str::to_owned)
                .collect();
        }
        Ok(self.pending.pop())
    }

    fn expect_token(&mut self, expected: &'static str) -> ProtocolResult<String> {
        self.next_token()?
            .ok_or(ProtocolError::UnexpectedEof { expected })
    }

    fn expect_int(&mut self, field: &'static str) -> ProtocolResult<i64> {
        let token = self.expect_token(field)?;
        token
            .parse::<i64>()
            .map_err(|_| ProtocolError::InvalidInteger { field, token })
    }

    fn expect_count(&mut self, field: &'static str) -> ProtocolResult<u32> {
        let value = self.expect_int(field)?;
        to_count(field, value)
    }

    fn expect_bounded(&mut self, field: &'static str, limit: usize) -> ProtocolResult<usize> {
        let value = self.expect_count(field)?;
        to_bounded(field, value, limit)
    }

    fn expect_factory(
        &mut self,
        field: &'static str,
        factory_count: usize,
    ) -> ProtocolResult<FactoryId> {
        let value = self.expect_int(field)?;
        to_factory(value, factory_count)
    }

    /// Read the graph description.
    ///
    /// # Errors
    ///
    /// Returns an error on truncated input, non-integer tokens, negative or
    /// oversized counts, or link endpoints outside the announced factory range.
    pub fn read_setup(&mut self) -> ProtocolResult<GameSetup> {
        let factory_count = self.expect_bounded("factory count", MAX_FACTORIES)?;
        // One link per unordered pair at most.
        let max_links = factory_count * factory_count.saturating_sub(1) / 2;
        let link_count = self.expect_bounded("link count", max_links)?;

        let mut links = Vec::new();
        for _ in 0..link_count {
            let a = self.expect_factory("link endpoint", factory_count)?;
            let b = self.expect_factory("link endpoint", factory_count)?;
            let distance = self.expect_count("link distance")?;
            links.push(Link::new(a, b, distance));
        }

        Ok(GameSetup {
            factory_count,
            links,
        })
    }

    /// Read one turn's entity list.
    ///
    /// Returns `Ok(None)` when input ends cleanly before a new turn starts.
    ///
    /// # Errors
    ///
    /// Returns an error on truncated input, unknown entity kinds, bad integers,
    /// more than [`MAX_ENTITIES`] entities or factory ids outside
    /// `0..factory_count`.
    pub fn read_turn(&mut self, factory_count: usize) -> ProtocolResult<Option<TurnDelta>> {
        let Some(first) = self.next_token()? else {
            return Ok(None);
        };
        let entity_count = first
            .parse::<i64>()
            .map_err(|_| ProtocolError::InvalidInteger {
                field: "entity count",
                token: first.clone(),
            })
            .and_then(|v| to_count("entity count", v))
            .and_then(|v| to_bounded("entity count", v, MAX_ENTITIES))?;

        let mut entities = Vec::new();
        for _ in 0..entity_count {
            entities.push(self.read_entity(factory_count)?);
        }
        Ok(Some(TurnDelta { entities }))
    }

    fn read_entity(&mut self, factory_count: usize) -> ProtocolResult<Entity> {
        let id = self.expect_int("entity id")?;
        let kind = self.expect_token("entity kind")?;
        let args = [
            self.expect_int("entity argument")?,
            self.expect_int("entity argument")?,
            self.expect_int("entity argument")?,
            self.expect_int("entity argument")?,
            self.expect_int("entity argument")?,
        ];

        match kind.as_str() {
            KIND_FACTORY => Ok(Entity::Factory(FactoryReport {
                id: to_factory(id, factory_count)?,
                owner: Faction::from_code(args[0]),
                garrison: to_count("factory garrison", args[1])?,
                production: to_count("factory production", args[2])?,
            })),
            KIND_TROOP => Ok(Entity::Troop(TroopReport {
                owner: Faction::from_code(args[0]),
                source: to_factory(args[1], factory_count)?,
                destination: to_factory(args[2], factory_count)?,
                cyborgs: to_count("troop size", args[3])?,
                remaining_turns: to_count("troop travel time", args[4])?,
            })),
            KIND_BOMB => Ok(Entity::Bomb(BombReport {
                owner: Faction::from_code(args[0]),
                source: to_factory(args[1], factory_count)?,
                destination: hidden_or(args[2], |v| to_factory(v, factory_count))?,
                remaining_turns: hidden_or(args[3], |v| to_count("bomb travel time", v))?,
            })),
            _ => Err(ProtocolError::UnknownEntityKind(kind)),
        }
    }
}

fn to_count(field: &'static str, value: i64) -> ProtocolResult<u32> {
    if value < 0 {
        return Err(ProtocolError::NegativeCount { field, value });
    }
    u32::try_from(value).map_err(|_| ProtocolError::InvalidInteger {
        field,
        token: value.to_string(),
    })
}

fn to_bounded(field: &'static str, value: u32, limit: usize) -> ProtocolResult<usize> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v <= limit)
        .ok_or(ProtocolError::TooLarge {
            field,
            value,
            limit,
        })
}

fn to_factory(value: i64, factory_count: usize) -> ProtocolResult<FactoryId> {
    usize::try_from(value)
        .ok()
        .filter(|id| *id < factory_count)
        .ok_or(ProtocolError::FactoryOutOfRange {
            id: value,
            factory_count,
        })
}

/// The host sends `-1` for fields hidden from us.
fn hidden_or<T>(
    value: i64,
    parse: impl FnOnce(i64) -> ProtocolResult<T>,
) -> ProtocolResult<Option<T>> {
    if value == -1 { Ok(None) } else { parse(value).map(Some) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(text: &str) -> TokenReader<&[u8]> {
        TokenReader::new(text.as_bytes())
    }

    #[test]
    fn test_read_setup() {
        let mut r = reader("3\n2\n0 1 4\n1 2 7\n");
        let setup = r.read_setup().unwrap();
        assert_eq!(setup.factory_count, 3);
        assert_eq!(setup.links, vec![Link::new(0, 1, 4), Link::new(1, 2, 7)]);
    }

    #[test]
    fn test_read_setup_rejects_out_of_range_link() {
        let mut r = reader("2 1\n0 5 3\n");
        assert_eq!(
            r.read_setup(),
            Err(ProtocolError::FactoryOutOfRange {
                id: 5,
                factory_count: 2
            })
        );
    }

    #[test]
    fn test_read_turn_all_kinds() {
        let text = "3\n\
                    0 FACTORY 1 12 2 0 0\n\
                    7 TROOP -1 1 0 5 3\n\
                    9 BOMB -1 1 -1 -1 0\n";
        let mut r = reader(text);
        let delta = r.read_turn(2).unwrap().unwrap();

        assert_eq!(
            delta.entities[0],
            Entity::Factory(FactoryReport {
                id: 0,
                owner: Faction::Ally,
                garrison: 12,
                production: 2,
            })
        );
        assert_eq!(
            delta.entities[1],
            Entity::Troop(TroopReport {
                owner: Faction::Enemy,
                source: 1,
                destination: 0,
                cyborgs: 5,
                remaining_turns: 3,
            })
        );
        assert_eq!(
            delta.entities[2],
            Entity::Bomb(BombReport {
                owner: Faction::Enemy,
                source: 1,
                destination: None,
                remaining_turns: None,
            })
        );
    }

    #[test]
    fn test_read_turn_eof_between_turns() {
        let mut r = reader("1\n0 FACTORY 0 3 0 0 0\n");
        assert!(r.read_turn(1).unwrap().is_some());
        assert_eq!(r.read_turn(1), Ok(None));
    }

    #[test]
    fn test_read_turn_truncated() {
        let mut r = reader("2\n0 FACTORY 0 3 0 0 0\n");
        assert!(matches!(
            r.read_turn(1),
            Err(ProtocolError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_read_turn_unknown_kind() {
        let mut r = reader("1\n0 SHIP 0 0 0 0 0\n");
        assert_eq!(
            r.read_turn(1),
            Err(ProtocolError::UnknownEntityKind("SHIP".to_string()))
        );
    }

    #[test]
    fn test_read_turn_bad_integer() {
        let mut r = reader("1\n0 FACTORY x 0 0 0 0\n");
        assert!(matches!(
            r.read_turn(1),
            Err(ProtocolError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_read_turn_negative_garrison() {
        let mut r = reader("1\n0 FACTORY 1 -4 0 0 0\n");
        assert!(matches!(
            r.read_turn(1),
            Err(ProtocolError::NegativeCount { value: -4, .. })
        ));
    }

    #[test]
    fn test_read_setup_rejects_huge_factory_count() {
        let mut r = reader("4294967295 0\n");
        assert_eq!(
            r.read_setup(),
            Err(ProtocolError::TooLarge {
                field: "factory count",
                value: u32::MAX,
                limit: MAX_FACTORIES,
            })
        );
    }

    #[test]
    fn test_read_setup_rejects_more_links_than_pairs() {
        let mut r = reader("2 4000000000\n");
        assert_eq!(
            r.read_setup(),
            Err(ProtocolError::TooLarge {
                field: "link count",
                value: 4_000_000_000,
                limit: 1,
            })
        );

        // Three factories have exactly three pairs.
        let mut r = reader("3 4\n0 1 1\n1 2 1\n0 2 1\n0 1 2\n");
        assert!(matches!(
            r.read_setup(),
            Err(ProtocolError::TooLarge { limit: 3, .. })
        ));
    }

    #[test]
    fn test_read_turn_rejects_huge_entity_count() {
        let mut r = reader("4097\n0 FACTORY 1 0 0 0 0\n");
        assert_eq!(
            r.read_turn(1),
            Err(ProtocolError::TooLarge {
                field: "entity count",
                value: 4097,
                limit: MAX_ENTITIES,
            })
        );
    }
}
