//! Depth-limited minimax with alpha-beta pruning.
//!
//! White is always the maximizing side. Every child position is built on a
//! fresh copy of its parent, so siblings never observe each other's moves.

use super::eval::Evaluation;
use crate::execute::make_move;
use crate::movegen::generate_all;
use crate::Board;
use chess_core::Color;

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, including leaves.
    pub nodes: u64,
    /// Times a node stopped early on an alpha-beta cutoff.
    pub cutoffs: u64,
}

/// Search state.
#[derive(Debug, Clone)]
pub struct Searcher {
    evaluation: Evaluation,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(evaluation: Evaluation) -> Self {
        Searcher {
            evaluation,
            stats: SearchStats::default(),
        }
    }

    /// Returns the counters collected so far.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Scores `board` searching `depth` plies.
    ///
    /// `maximizing` is true when White is to move. A position is terminal at
    /// depth zero, when either king is gone, or when the side to move has no
    /// moves; terminal positions return the static evaluation.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.stats.nodes += 1;

        if depth == 0 || !board.has_king(Color::White) || !board.has_king(Color::Black) {
            return self.evaluation.evaluate(board);
        }

        let to_move = if maximizing { Color::White } else { Color::Black };
        let moves = generate_all(board, to_move);
        if moves.is_empty() {
            return self.evaluation.evaluate(board);
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in &moves {
                let child = make_move(board, mv);
                let score = self.minimax(&child, depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(best);
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut worst = i32::MAX;
            for mv in &moves {
                let child = make_move(board, mv);
                let score = self.minimax(&child, depth - 1, alpha, beta, true);
                worst = worst.min(score);
                beta = beta.min(worst);
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            worst
        }
    }
}

/// Scores `board` with a fresh [`Searcher`].
pub fn minimax(
    board: &Board,
    depth: u32,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    evaluation: Evaluation,
) -> i32 {
    Searcher::new(evaluation).minimax(board, depth, alpha, beta, maximizing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::eval::evaluate_material;
    use chess_core::{Piece, PieceKind, Placement, Square};
    use proptest::prelude::*;

    fn board(placement: &str) -> Board {
        Board::from_placement(&Placement::parse(placement).unwrap())
    }

    #[test]
    fn depth_zero_is_static_eval() {
        let board = board("k2q4/8/8/8/3R4/8/8/7K");
        let expected = evaluate_material(&board);
        assert_eq!(minimax(&board, 0, i32::MIN, i32::MAX, true, Evaluation::Material), expected);
        assert_eq!(minimax(&board, 0, i32::MIN, i32::MAX, false, Evaluation::Material), expected);
    }

    #[test]
    fn missing_king_is_terminal() {
        let board = board("3q4/8/8/8/8/8/8/4K3");
        let mut searcher = Searcher::new(Evaluation::Material);
        let score = searcher.minimax(&board, 3, i32::MIN, i32::MAX, false);
        assert_eq!(score, evaluate_material(&board));
        assert_eq!(searcher.stats().nodes, 1);
    }

    #[test]
    fn minimizer_takes_free_rook() {
        // Black to move can take the rook on d4 with the queen.
        let board = board("k2q4/8/8/8/3R4/8/8/7K");
        let score = minimax(&board, 1, i32::MIN, i32::MAX, false, Evaluation::Material);
        assert_eq!(score, -900);
    }

    #[test]
    fn maximizer_takes_king() {
        let board = board("3k4/3R4/8/8/8/8/8/4K3");
        let score = minimax(&board, 1, i32::MIN, i32::MAX, true, Evaluation::Material);
        assert_eq!(score, 9900 + 500);
    }

    /// Plain minimax over every child, with the same terminal rules.
    fn full_width(board: &Board, depth: u32, maximizing: bool, evaluation: Evaluation) -> i32 {
        if depth == 0 || !board.has_king(Color::White) || !board.has_king(Color::Black) {
            return evaluation.evaluate(board);
        }
        let to_move = if maximizing { Color::White } else { Color::Black };
        let scores = generate_all(board, to_move)
            .iter()
            .map(|mv| full_width(&make_move(board, mv), depth - 1, !maximizing, evaluation))
            .collect::<Vec<_>>();
        let best = if maximizing {
            scores.into_iter().max()
        } else {
            scores.into_iter().min()
        };
        best.unwrap_or_else(|| evaluation.evaluate(board))
    }

    #[test]
    fn pruning_agrees_with_full_width_from_startpos() {
        let board = Board::startpos();
        let mut searcher = Searcher::new(Evaluation::Material);
        let pruned = searcher.minimax(&board, 2, i32::MIN, i32::MAX, true);
        assert_eq!(pruned, full_width(&board, 2, true, Evaluation::Material));
        assert!(searcher.stats().nodes > 1);
        assert!(searcher.stats().nodes < 1 + 20 + 400);
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        let piece = (0u8..64, any::<bool>(), 0usize..6).prop_map(|(index, white, kind)| {
            let color = if white { Color::White } else { Color::Black };
            let square = Square::from_index(index).unwrap();
            Piece::new(color, PieceKind::ALL[kind], square)
        });
        (
            prop::collection::vec(piece, 0..6),
            prop::sample::select(vec![Square::E1, Square::new(3, 0), Square::A1]),
            prop::sample::select(vec![Square::E8, Square::new(3, 7), Square::H8]),
        )
            .prop_map(|(pieces, white_king, black_king)| {
                let mut board = Board::from_pieces(pieces);
                board.place(Piece::new(Color::White, PieceKind::King, white_king));
                board.place(Piece::new(Color::Black, PieceKind::King, black_king));
                board
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn pruning_agrees_with_full_width(
            board in arb_board(),
            depth in 1u32..=3,
            maximizing in any::<bool>(),
            piece_square in any::<bool>(),
        ) {
            let evaluation = if piece_square {
                Evaluation::PieceSquare
            } else {
                Evaluation::Material
            };
            let mut searcher = Searcher::new(evaluation);
            let pruned = searcher.minimax(&board, depth, i32::MIN, i32::MAX, maximizing);
            prop_assert_eq!(pruned, full_width(&board, depth, maximizing, evaluation));
        }
    }
}
