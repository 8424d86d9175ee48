//! Board state representation.

use crate::Bitboard;
use chess_core::{Color, Piece, PieceKind, Placement, Square};
use rand::Rng;
use std::fmt;

/// Chance that a square is filled in a pandemonium setup.
pub const PANDEMONIUM_PROBABILITY: f64 = 0.5;

/// The authoritative 8x8 grid plus one roster per color.
///
/// A square is occupied if and only if it belongs to exactly one roster, the
/// roster of the occupant's color. Every mutation goes through [`place`] and
/// [`clear`], which keep the grid and the rosters in step.
///
/// The board is a plain `Copy` value: the live game board and the boards a
/// search branches on are the same type, and a copy never shares a piece
/// with the original.
///
/// [`place`]: Board::place
/// [`clear`]: Board::clear
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Occupants indexed by square index (a1 = 0, h8 = 63).
    squares: [Option<Piece>; 64],
    /// Occupied squares per color, indexed by `Color::index`.
    rosters: [Bitboard; 2],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
            rosters: [Bitboard::EMPTY; 2],
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_placement(&Placement::default())
    }

    /// Creates a board holding the given pieces.
    ///
    /// # Panics
    ///
    /// Panics if any piece stands off the board.
    pub fn from_pieces<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut board = Board::empty();
        for piece in pieces {
            board.place(piece);
        }
        board
    }

    /// Creates a board from a parsed placement.
    pub fn from_placement(placement: &Placement) -> Self {
        Self::from_pieces(placement.pieces.iter().copied())
    }

    /// Creates a random "pandemonium" setup.
    ///
    /// Each square is filled with probability `probability` by a piece of
    /// uniformly random kind and color. Either side may end up with any
    /// number of kings, including none. Pawns off their start rank are
    /// marked as moved, as in [`Placement::parse`].
    ///
    /// # Panics
    ///
    /// Panics if `probability` is outside `0.0..=1.0`.
    pub fn pandemonium<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> Self {
        let mut board = Board::empty();
        for sq in Square::all() {
            if !rng.gen_bool(probability) {
                continue;
            }
            let kind = PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())];
            let color = if rng.gen_bool(0.5) {
                Color::White
            } else {
                Color::Black
            };
            let mut piece = Piece::new(color, kind, sq);
            piece.has_moved = kind == PieceKind::Pawn && sq.rank() != color.pawn_start_rank();
            board.place(piece);
        }
        board
    }

    /// Returns true if `0 <= file, rank <= 7`.
    #[inline]
    pub fn is_on_board(&self, sq: Square) -> bool {
        sq.is_on_board()
    }

    /// Returns the occupant of `sq`. Empty and off-board squares yield `None`.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        if sq.is_on_board() {
            self.squares[sq.index() as usize].as_ref()
        } else {
            None
        }
    }

    /// Returns true if `sq` is on the board and empty.
    #[inline]
    pub fn is_empty_square(&self, sq: Square) -> bool {
        sq.is_on_board() && self.squares[sq.index() as usize].is_none()
    }

    /// Writes `piece` into the slot at `piece.square` and its roster.
    ///
    /// Any previous occupant of that slot is dropped from its roster and
    /// returned. The caller is responsible for clearing the piece's old
    /// square first, otherwise the piece would be duplicated.
    ///
    /// # Panics
    ///
    /// Panics if `piece.square` is off the board.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        assert!(
            piece.square.is_on_board(),
            "cannot place {} {} off the board at {}",
            piece.color,
            piece.kind,
            piece.square
        );
        let idx = piece.square.index() as usize;
        let displaced = self.squares[idx].take();
        if let Some(old) = displaced {
            self.rosters[old.color.index()].clear(piece.square);
        }
        self.squares[idx] = Some(piece);
        self.rosters[piece.color.index()].set(piece.square);
        displaced
    }

    /// Empties `sq`, removing its occupant from its roster.
    pub fn clear(&mut self, sq: Square) -> Option<Piece> {
        if !sq.is_on_board() {
            return None;
        }
        let removed = self.squares[sq.index() as usize].take();
        if let Some(piece) = removed {
            self.rosters[piece.color.index()].clear(sq);
        }
        removed
    }

    /// Iterates over the surviving pieces of `color`.
    pub fn roster(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.rosters[color.index()]
            .into_iter()
            .filter_map(move |sq| self.squares[sq.index() as usize].as_ref())
    }

    /// Returns the squares occupied by `color`.
    #[inline]
    pub fn roster_squares(&self, color: Color) -> Bitboard {
        self.rosters[color.index()]
    }

    /// Returns the number of surviving pieces of `color`.
    #[inline]
    pub fn roster_len(&self, color: Color) -> usize {
        self.rosters[color.index()].count() as usize
    }

    /// Returns all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.rosters[0] | self.rosters[1]
    }

    /// Iterates over every piece on the board, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten()
    }

    /// Returns true if `color` still has a king.
    pub fn has_king(&self, color: Color) -> bool {
        self.roster(color).any(|p| p.kind == PieceKind::King)
    }

    /// Returns an independent copy of this board.
    ///
    /// Pieces are stored by value, so the copy shares nothing with `self`.
    #[inline]
    pub fn clone_deep(&self) -> Board {
        *self
    }

    /// Checks the grid/roster invariants: every occupant sits in the slot
    /// named by its own square and in its color's roster only.
    pub fn is_consistent(&self) -> bool {
        Square::all().all(|sq| {
            let white = self.rosters[Color::White.index()].contains(sq);
            let black = self.rosters[Color::Black.index()].contains(sq);
            match self.squares[sq.index() as usize] {
                Some(piece) => {
                    piece.square == sq
                        && match piece.color {
                            Color::White => white && !black,
                            Color::Black => black && !white,
                        }
                }
                None => !white && !black,
            }
        })
    }

    /// Returns the piece placement field of a FEN record for this board.
    pub fn to_placement(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            out.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{} ", piece.to_fen_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
