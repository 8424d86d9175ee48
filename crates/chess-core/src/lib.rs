//! Core types for the Bad Chess variant.
//!
//! This crate provides the plain data shared by the engine:
//! - [`Color`], [`PieceKind`] and [`Piece`] for board occupants
//! - [`Square`] for board coordinates
//! - [`MoveRecord`] for proposed and applied moves
//! - [`Placement`] for parsing starting setups

mod color;
mod mov;
mod piece;
mod placement;
mod square;

pub use color::Color;
pub use mov::MoveRecord;
pub use piece::{Piece, PieceKind};
pub use placement::{Placement, PlacementError};
pub use square::{Square, BOARD_SIZE};
