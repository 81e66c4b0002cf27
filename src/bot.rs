//! The per-turn loop: ingest, decide, flush.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::error::BotError;
use crate::invariants::check_invariants;
use crate::orders::{Order, OrderSink};
use crate::protocol::{GameSetup, TokenReader, TurnDelta};
use crate::strategy::Strategy;
use crate::world::WorldModel;

/// A bot for one game.
#[derive(Debug, Clone)]
pub struct Bot {
    world: WorldModel,
    strategy: Strategy,
    sink: OrderSink,
}

impl Bot {
    /// Build the routing table and set up an empty world.
    #[must_use]
    pub fn new(setup: &GameSetup, strategy: Strategy) -> Self {
        Self {
            world: WorldModel::new(setup),
            strategy,
            sink: OrderSink::new(),
        }
    }

    /// World knowledge as of the last turn.
    #[must_use]
    pub const fn world(&self) -> &WorldModel {
        &self.world
    }

    /// Strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Decide this turn's orders and queue them, without rendering.
    ///
    /// Returns the orders queued for output, including any carried over
    /// from the previous turn.
    pub fn decide(&mut self, delta: &TurnDelta) -> &[Order] {
        self.world.step(delta);
        for order in self.strategy.compute(&mut self.world) {
            self.sink.push(order);
        }

        if cfg!(debug_assertions) {
            for violation in check_invariants(&self.world) {
                warn!(turn = self.world.turn(), %violation, "invariant violated");
            }
        }
        self.sink.orders()
    }

    /// Render the queued orders as one output line and clear finished ones.
    pub fn render(&mut self) -> String {
        let line = self.sink.render();
        debug!(turn = self.world.turn(), line = line.trim_end(), "turn played");
        line
    }

    /// Play one turn and return the output line.
    pub fn play_turn(&mut self, delta: &TurnDelta) -> String {
        self.decide(delta);
        self.render()
    }

    /// Play one turn and write the output line to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn play_turn_to<W: Write>(
        &mut self,
        delta: &TurnDelta,
        out: &mut W,
    ) -> std::io::Result<()> {
        self.decide(delta);
        let line = self.sink.flush(out)?;
        debug!(turn = self.world.turn(), line = line.trim_end(), "turn played");
        Ok(())
    }
}

/// Play a whole game: read the setup, then answer every turn until input ends.
///
/// Returns the number of turns played.
///
/// # Errors
///
/// Returns an error if the input breaks the protocol or output cannot be written.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    strategy: Strategy,
) -> Result<u32, BotError> {
    let mut reader = TokenReader::new(input);
    let setup = reader.read_setup()?;
    info!(
        factories = setup.factory_count,
        links = setup.links.len(),
        "game setup read"
    );

    let mut bot = Bot::new(&setup, strategy);
    while let Some(delta) = reader.read_turn(setup.factory_count)? {
        bot.play_turn_to(&delta, &mut output)?;
    }

    let turns = bot.world().turn();
    info!(turns, "input closed");
    Ok(turns)
}
