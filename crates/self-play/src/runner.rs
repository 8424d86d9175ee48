//! Game runner - plays one game to completion.
//!
//! The engine side uses the configured strategy through [`Game`]. The other
//! side either uses the same engine or, when asked, plays random moves.

use chess_core::Color;
use chess_engine::{select_move, EngineConfig, Game, GameError, SearchConfig, Strategy};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// How a game came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// A capture satisfied the win condition.
    Won(Color),
    /// The side to move had no moves left.
    Stuck(Color),
    /// The turn limit was reached.
    TurnLimit,
}

/// Result of a single game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub ending: Ending,
    pub turns: u32,
    /// Moves in coordinate notation, oldest first.
    pub moves: Vec<String>,
}

/// Plays games under one configuration.
pub struct GameRunner {
    config: EngineConfig,
    max_turns: u32,
    random_white: bool,
}

impl GameRunner {
    pub fn new(config: EngineConfig, max_turns: u32, random_white: bool) -> Self {
        Self {
            config,
            max_turns,
            random_white,
        }
    }

    /// Plays one game. `seed` fixes every random choice when set.
    pub fn play(&self, seed: Option<u64>) -> Result<GameSummary, GameError> {
        let config = EngineConfig {
            seed,
            ..self.config.clone()
        };
        let mut game = Game::new(config);
        let mut random_rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let random = SearchConfig {
            strategy: Strategy::Random,
            ..self.config.search()
        };

        let ending = loop {
            if let Some(winner) = game.winner() {
                break Ending::Won(winner);
            }
            if game.turn_count() >= self.max_turns {
                break Ending::TurnLimit;
            }

            let to_move = game.color_to_move();
            let mv = if self.random_white && to_move == Color::White {
                select_move(game.board(), to_move, &random, &mut random_rng)
                    .ok_or(GameError::NoLegalMoves(to_move))
            } else {
                game.select_engine_move()
            };
            let mv = match mv {
                Ok(mv) => mv,
                Err(GameError::NoLegalMoves(color)) => break Ending::Stuck(color),
                Err(e) => return Err(e),
            };

            game.apply_move(&mv)?;
            tracing::info!(
                turn = game.turn_count(),
                score = ?mv.score,
                "{}",
                mv.describe()
            );
        };

        Ok(GameSummary {
            ending,
            turns: game.turn_count(),
            moves: game
                .move_history()
                .iter()
                .map(|m| m.to_coordinate())
                .collect(),
        })
    }
}
