//! Board square representation.

use std::fmt;

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: i8 = 8;

/// A square on the board, addressed by `(file, rank)`.
///
/// Files run a..h as 0..7 and ranks 1..8 as 0..7. Coordinates are signed so
/// that offset arithmetic during move generation can step off the edge; use
/// [`Square::is_on_board`] before indexing anything with the result.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: i8,
    rank: i8,
}

impl Square {
    /// Creates a square from file and rank (not bounds checked).
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Square { file, rank }
    }

    /// Creates an on-board square from its index (0-63, a1 = 0, h8 = 63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square::new((index % 8) as i8, (index / 8) as i8))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square::new((file - b'a') as i8, (rank - b'1') as i8))
    }

    /// Returns the file (0 = a).
    #[inline]
    pub const fn file(self) -> i8 {
        self.file
    }

    /// Returns the rank (0 = rank 1).
    #[inline]
    pub const fn rank(self) -> i8 {
        self.rank
    }

    /// Returns true if `0 <= file, rank <= 7`.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.file >= 0 && self.file < BOARD_SIZE && self.rank >= 0 && self.rank < BOARD_SIZE
    }

    /// Returns the index (0-63).
    ///
    /// # Panics
    ///
    /// Panics if the square is off the board.
    #[inline]
    pub fn index(self) -> u8 {
        assert!(self.is_on_board(), "square {:?} is off the board", self);
        (self.rank * BOARD_SIZE + self.file) as u8
    }

    /// Returns the square displaced by `(file_step, rank_step)`. The result
    /// may be off the board.
    #[inline]
    pub const fn offset(self, file_step: i8, rank_step: i8) -> Self {
        Square::new(self.file + file_step, self.rank + rank_step)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        if self.is_on_board() {
            format!("{}{}", (b'a' + self.file as u8) as char, self.rank + 1)
        } else {
            format!("({},{})", self.file, self.rank)
        }
    }

    /// Iterates over all 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).filter_map(Square::from_index)
    }

    // Common squares
    pub const A1: Square = Square::new(0, 0);
    pub const E1: Square = Square::new(4, 0);
    pub const H1: Square = Square::new(7, 0);
    pub const A8: Square = Square::new(0, 7);
    pub const E8: Square = Square::new(4, 7);
    pub const H8: Square = Square::new(7, 7);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
