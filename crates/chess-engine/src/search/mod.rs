//! Computer opponent.
//!
//! The engine scores each of its moves with [`minimax`](minimax::Searcher::minimax)
//! and plays the best one, choosing uniformly among equally good moves. A
//! random strategy is available for weak opponents and testing.

pub mod eval;
pub mod minimax;

use crate::execute::make_move;
use crate::movegen::generate_all;
use crate::Board;
use chess_core::{Color, MoveRecord};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use eval::{evaluate_material, evaluate_piece_square, piece_value, Evaluation};
pub use minimax::{minimax, SearchStats, Searcher};

/// How the engine chooses its moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Minimax with alpha-beta pruning.
    #[default]
    Minimax,
    /// Any pseudo-legal move, uniformly at random.
    Random,
}

/// Parameters for a single move selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below each candidate move.
    pub depth: u32,
    pub evaluation: Evaluation,
    pub strategy: Strategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 2,
            evaluation: Evaluation::default(),
            strategy: Strategy::default(),
        }
    }
}

/// Chooses a move for `color`, or `None` if it has no moves.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    color: Color,
    config: &SearchConfig,
    rng: &mut R,
) -> Option<MoveRecord> {
    match config.strategy {
        Strategy::Minimax => select_best_move(board, color, config, rng),
        Strategy::Random => select_random_move(board, color, rng),
    }
}

/// Picks any move for `color` uniformly at random.
pub fn select_random_move<R: Rng + ?Sized>(
    board: &Board,
    color: Color,
    rng: &mut R,
) -> Option<MoveRecord> {
    let moves = generate_all(board, color);
    moves.as_slice().choose(rng).copied()
}

/// Scores every move for `color` and picks among the best.
///
/// Each candidate is applied to a copy of `board` and searched
/// `config.depth` further plies with the opponent to move. The returned
/// record carries its score.
pub fn select_best_move<R: Rng + ?Sized>(
    board: &Board,
    color: Color,
    config: &SearchConfig,
    rng: &mut R,
) -> Option<MoveRecord> {
    let moves = generate_all(board, color);
    if moves.is_empty() {
        return None;
    }

    let mut searcher = Searcher::new(config.evaluation);
    let opponent_maximizes = color.opposite() == Color::White;
    let scored: Vec<MoveRecord> = moves
        .iter()
        .map(|mv| {
            let child = make_move(board, mv);
            let score =
                searcher.minimax(&child, config.depth, i32::MIN, i32::MAX, opponent_maximizes);
            trace!(mv = %mv, score, "scored root move");
            mv.with_score(score)
        })
        .collect();

    let best_score = scored
        .iter()
        .filter_map(|mv| mv.score)
        .reduce(|a, b| match color {
            Color::White => a.max(b),
            Color::Black => a.min(b),
        })?;
    let best: Vec<MoveRecord> = scored
        .into_iter()
        .filter(|mv| mv.score == Some(best_score))
        .collect();

    let chosen = best.choose(rng).copied();
    let stats = searcher.stats();
    debug!(
        %color,
        depth = config.depth,
        score = best_score,
        candidates = best.len(),
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        "search finished"
    );
    chosen
}
