//! Win rules.
//!
//! This variant has no check or checkmate. A game ends only when a capture
//! satisfies the configured [`WinCondition`].

use crate::Board;
use chess_core::{Color, Piece, PieceKind};
use serde::{Deserialize, Serialize};

/// How a game is won. Capturing the enemy king wins under either
/// condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WinCondition {
    /// Only capturing the enemy king wins.
    CaptureKing,
    /// Capturing the enemy king or the last enemy piece wins.
    #[default]
    CaptureAll,
}

impl WinCondition {
    /// Returns the winner after `captured` has been removed from `board`.
    ///
    /// The winner is always the color opposite the captured piece.
    pub fn winner_after_capture(self, board: &Board, captured: &Piece) -> Option<Color> {
        let decided = captured.kind == PieceKind::King
            || (self == WinCondition::CaptureAll && board.roster_len(captured.color) == 0);
        decided.then(|| captured.color.opposite())
    }
}

impl std::fmt::Display for WinCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinCondition::CaptureKing => write!(f, "capture-king"),
            WinCondition::CaptureAll => write!(f, "capture-all"),
        }
    }
}
