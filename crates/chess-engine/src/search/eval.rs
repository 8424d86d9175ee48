//! Static evaluation.
//!
//! Scores are in centipawns from White's point of view: positive favours
//! White, negative favours Black.

use crate::Board;
use chess_core::{Color, Piece, PieceKind};
use serde::{Deserialize, Serialize};

/// Material value of each kind, indexed by [`PieceKind::index`].
pub const PIECE_VALUES: [i32; 6] = [9900, 900, 500, 330, 320, 100];

/// Which static evaluation the search uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Evaluation {
    /// Material only.
    #[default]
    Material,
    /// Material plus piece-square bonuses.
    PieceSquare,
}

impl Evaluation {
    /// Evaluates `board` with this function.
    pub fn evaluate(self, board: &Board) -> i32 {
        match self {
            Evaluation::Material => evaluate_material(board),
            Evaluation::PieceSquare => evaluate_piece_square(board),
        }
    }
}

// Tables are written from White's side with rank 8 on the first row.
#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_PST: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

const PIECE_SQUARE_TABLES: [&[i32; 64]; 6] = [
    &KING_PST,
    &QUEEN_PST,
    &ROOK_PST,
    &BISHOP_PST,
    &KNIGHT_PST,
    &PAWN_PST,
];

/// Returns the material value of a piece kind.
#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.index()]
}

#[inline]
fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Sum of White's material minus sum of Black's.
pub fn evaluate_material(board: &Board) -> i32 {
    board
        .pieces()
        .map(|p| sign(p.color) * piece_value(p.kind))
        .sum()
}

/// Returns the piece-square bonus for `piece` where it stands.
pub fn piece_square_bonus(piece: &Piece) -> i32 {
    let sq = piece.square;
    // Black reads the table upside down.
    let row = match piece.color {
        Color::White => 7 - sq.rank(),
        Color::Black => sq.rank(),
    };
    PIECE_SQUARE_TABLES[piece.kind.index()][(row * 8 + sq.file()) as usize]
}

/// Material plus piece-square bonuses, White minus Black.
pub fn evaluate_piece_square(board: &Board) -> i32 {
    board
        .pieces()
        .map(|p| sign(p.color) * (piece_value(p.kind) + piece_square_bonus(p)))
        .sum()
}
