//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// A proposed or applied transition of one piece.
///
/// Records are built fresh by the move generator. Apart from `score`, which
/// only the search writes, a record is never modified after generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    /// The square the moving piece starts on.
    pub from: Square,
    /// The destination. For a castle this is the king's destination, not the
    /// rook's square.
    pub to: Square,
    /// The moving piece as it was when the move was generated.
    pub piece: Piece,
    /// The captured occupant of `to`, or the castling rook.
    pub target: Option<Piece>,
    pub castle: bool,
    /// Evaluation assigned by the search engine.
    pub score: Option<i32>,
}

impl MoveRecord {
    /// Creates a normal move (a capture when `target` is set).
    #[inline]
    pub const fn new(piece: Piece, to: Square, target: Option<Piece>) -> Self {
        MoveRecord {
            from: piece.square,
            to,
            piece,
            target,
            castle: false,
            score: None,
        }
    }

    /// Creates a castle. `king_to` is the square next to `rook` on the
    /// king's side.
    #[inline]
    pub const fn castle(king: Piece, king_to: Square, rook: Piece) -> Self {
        MoveRecord {
            from: king.square,
            to: king_to,
            piece: king,
            target: Some(rook),
            castle: true,
            score: None,
        }
    }

    /// Returns the captured piece, if this move captures.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        if self.castle {
            None
        } else {
            self.target
        }
    }

    /// Returns true if this move captures an enemy piece.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured().is_some()
    }

    /// Returns the same move carrying an evaluation.
    #[inline]
    pub const fn with_score(self, score: i32) -> Self {
        MoveRecord {
            score: Some(score),
            ..self
        }
    }

    /// Returns true if both records describe the same transition, ignoring
    /// any score.
    pub fn same_move(&self, other: &MoveRecord) -> bool {
        self.from == other.from && self.to == other.to && self.castle == other.castle
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4").
    pub fn to_coordinate(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Describes the move as a sentence.
    pub fn describe(&self) -> String {
        let mut text = format!(
            "{} moves from {} to {}",
            self.piece.name(),
            self.from,
            self.to
        );
        match (self.castle, self.target) {
            (true, Some(rook)) => text.push_str(&format!(", castling with the {}", rook.name())),
            (false, Some(captured)) => {
                text.push_str(&format!(", capturing the {}", captured.name()))
            }
            _ => {}
        }
        text.push('.');
        text
    }
}

impl fmt::Debug for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveRecord({}", self.to_coordinate())?;
        if self.castle {
            write!(f, " castle")?;
        } else if self.target.is_some() {
            write!(f, " capture")?;
        }
        if let Some(score) = self.score {
            write!(f, " score={}", score)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
