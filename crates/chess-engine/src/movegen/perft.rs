//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the pseudo-legal move tree, which can be
//! compared against known values to validate the generator. Kings may be
//! captured during the walk; a node missing a king is still expanded.

use super::generate_all;
use crate::execute::make_move;
use crate::Board;
use chess_core::Color;

/// Counts the number of leaf nodes at the given depth with `color` to move.
pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_all(board, color);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let child = make_move(board, m);
        nodes += perft(&child, color.opposite(), depth - 1);
    }
    nodes
}

/// Perft with divide - shows node count for each root move.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &Board, color: Color, depth: u32) -> Vec<(String, u64)> {
    let moves = generate_all(board, color);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let child = make_move(board, m);
        let nodes = if depth > 1 {
            perft(&child, color.opposite(), depth - 1)
        } else {
            1
        };
        results.push((m.to_coordinate(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
