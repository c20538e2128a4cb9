// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Endpoint orchestration. The decision itself lives in move_selector; this
// type only wires configuration, logging and the API responses around it.

use log::info;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::DecisionResult;
use crate::move_selector::decide_move_for_snapshot;
use crate::types::{Battlesnake, Board, Game};

/// Value of the `Server` response header, e.g. `tailchaser-snake/0.1.0`
pub const SERVER_ID: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Tail-chasing bot behind the four API endpoints
///
/// Holds no per-game state, so one instance can serve concurrent games.
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    /// * `debug_logger` - Sink for per-turn decision records
    pub fn new(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("{} START", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("{} END after turn {}", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Arguments
    /// * `game` - Current game metadata
    /// * `turn` - Current turn number
    /// * `board` - Current board state
    /// * `you` - Your snake's current state
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    ///
    /// # Errors
    /// `DecisionError::InvalidBoard` for a board with a non-positive dimension
    pub fn get_move(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> DecisionResult<Value> {
        let start_time = Instant::now();

        let decision = decide_move_for_snapshot(board, you, &self.config.heuristics)?;

        info!(
            "{} MOVE {}: {} ({}, safe moves: {}, health: {}, time: {}us)",
            game.id,
            turn,
            decision.direction.as_str(),
            decision.reason.as_str(),
            decision.safe_moves,
            you.health,
            start_time.elapsed().as_micros()
        );

        self.debug_logger
            .log_move(&game.id, *turn, board, you, decision.direction);

        Ok(json!({ "move": decision.direction.as_str() }))
    }
}
