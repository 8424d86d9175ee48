//! Piece placement strings.
//!
//! Setups are written as the first one or two fields of a FEN record: the
//! rank-by-rank placement (rank 8 first) and an optional side to move. The
//! remaining FEN fields (castling rights, en passant, clocks) have no meaning
//! in this variant and are rejected.

use crate::{Color, Piece, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing placement strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("invalid placement: expected 1 or 2 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),
}

/// A parsed starting setup: the `(color, kind, square)` tuples to place and
/// the color that moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub pieces: Vec<Piece>,
    pub side_to_move: Color,
}

impl Placement {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

    /// Parses a placement string.
    ///
    /// Every piece starts unmoved, except pawns standing off their starting
    /// rank, which are marked as moved so they never get a double step.
    pub fn parse(text: &str) -> Result<Self, PlacementError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.is_empty() || parts.len() > 2 {
            return Err(PlacementError::InvalidFieldCount(parts.len()));
        }

        let pieces = Self::parse_pieces(parts[0])?;

        let side_to_move = match parts.get(1).copied() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(PlacementError::InvalidActiveColor(other.to_string())),
        };

        Ok(Placement {
            pieces,
            side_to_move,
        })
    }

    fn parse_pieces(placement: &str) -> Result<Vec<Piece>, PlacementError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::new();
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as i8;
            let mut file = 0u32;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    if file < 8 {
                        let square = Square::new(file as i8, rank);
                        let mut piece = Piece::new(color, kind, square);
                        piece.has_moved =
                            kind == PieceKind::Pawn && rank != color.pawn_start_rank();
                        pieces.push(piece);
                    }
                    file += 1;
                } else {
                    return Err(PlacementError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
                if file > 8 {
                    return Err(PlacementError::InvalidPiecePlacement(format!(
                        "rank {} has more than 8 squares",
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(PlacementError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank + 1,
                    file
                )));
            }
        }

        Ok(pieces)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
