//! Engine for a chess variant without check.
//!
//! This crate provides:
//! - [`Board`] - an 8x8 grid of pieces with one [`Bitboard`] roster per color
//! - Pseudo-legal move generation, including castling and double pawn steps
//! - [`execute_move`] - the single place pieces are moved, with promotion
//!   and win detection
//! - A minimax opponent with alpha-beta pruning in [`search`]
//! - [`Game`] - a session owning the live board and turn state
//!
//! # Rules
//!
//! Moves are never checked for king safety. A game is won by capturing,
//! either the enemy king or every enemy piece depending on the
//! [`WinCondition`]. There is no en passant and no draw.
//!
//! # Example
//!
//! ```
//! use chess_engine::{EngineConfig, Game};
//!
//! let config = EngineConfig {
//!     seed: Some(7),
//!     ..EngineConfig::default()
//! };
//! let mut game = Game::new(config);
//! game.apply_coordinate("e2e4").unwrap();
//! assert!(game.is_engine_turn());
//!
//! let (reply, _) = game.play_engine_move().unwrap();
//! println!("Engine answered {}", reply.describe());
//! ```

mod bitboard;
mod board;
mod config;
pub mod execute;
mod game;
pub mod movegen;
pub mod rules;
pub mod search;

pub use bitboard::Bitboard;
pub use board::{Board, PANDEMONIUM_PROBABILITY};
pub use config::{ConfigError, EngineConfig, Setup, MAX_SEARCH_DEPTH};
pub use execute::{execute_move, make_move, MoveOutcome};
pub use game::{Game, GameError, TurnState};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{generate_all, generate_moves, MoveList};
pub use rules::WinCondition;
pub use search::{select_move, Evaluation, SearchConfig, SearchStats, Strategy};
