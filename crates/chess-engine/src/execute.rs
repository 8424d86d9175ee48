//! Move execution.
//!
//! [`execute_move`] is the only function that moves pieces on a board. The
//! live board in [`Game`](crate::Game) and every search board go through it.

use crate::rules::WinCondition;
use crate::Board;
use chess_core::{Color, MoveRecord, Piece, PieceKind};

/// What happened when a move was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The enemy piece removed from the destination, if any.
    pub captured: Option<Piece>,
    /// True if a pawn became a queen.
    pub promoted: bool,
    /// Set when the capture decided the game.
    pub winner: Option<Color>,
    /// The color to move next.
    pub next_to_move: Color,
}

/// Applies `mv` to `board` in place.
///
/// # Panics
///
/// Panics if the origin square is empty, if the destination is off the
/// board, or if a castle's rook is not where the record says it is.
pub fn execute_move(board: &mut Board, mv: &MoveRecord, condition: WinCondition) -> MoveOutcome {
    assert!(
        board.is_on_board(mv.to),
        "move {} has an off-board destination",
        mv
    );
    let mover = match board.clear(mv.from) {
        Some(piece) => piece,
        None => panic!("move {} starts from empty square {}", mv, mv.from),
    };

    let mut captured = None;
    let mut winner = None;

    if mv.castle {
        let rook_from = match mv.target {
            Some(rook) => rook.square,
            None => panic!("castle {} has no rook", mv),
        };
        let rook = match board.clear(rook_from) {
            Some(rook) => rook,
            None => panic!("castle {} lost its rook on {}", mv, rook_from),
        };
        let step = (rook_from.file() - mv.to.file()).signum();
        let mut rook = rook.moved();
        rook.square = mv.to.offset(-step, 0);
        board.place(rook);
    } else if let Some(victim) = board.clear(mv.to) {
        winner = condition.winner_after_capture(board, &victim);
        captured = Some(victim);
    }

    let mut piece = mover.moved();
    piece.square = mv.to;
    let promoted = piece.kind == PieceKind::Pawn && mv.to.rank() == piece.color.promotion_rank();
    if promoted {
        piece.kind = PieceKind::Queen;
    }
    board.place(piece);

    MoveOutcome {
        captured,
        promoted,
        winner,
        next_to_move: mover.color.opposite(),
    }
}

/// Returns a copy of `board` with `mv` applied. `board` itself is untouched.
pub fn make_move(board: &Board, mv: &MoveRecord) -> Board {
    let mut child = board.clone_deep();
    execute_move(&mut child, mv, WinCondition::default());
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::generate_moves;
    use chess_core::{Placement, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(placement: &str) -> Board {
        Board::from_placement(&Placement::parse(placement).unwrap())
    }

    fn find(board: &Board, from: &str, to: &str) -> MoveRecord {
        *generate_moves(board, sq(from))
            .iter()
            .find(|m| m.to == sq(to))
            .unwrap()
    }

    #[test]
    fn quiet_move() {
        let mut board = Board::startpos();
        let mv = find(&board, "e2", "e4");
        let outcome = execute_move(&mut board, &mv, WinCondition::CaptureAll);

        assert_eq!(outcome.captured, None);
        assert_eq!(outcome.winner, None);
        assert!(!outcome.promoted);
        assert_eq!(outcome.next_to_move, Color::Black);
        assert!(board.piece_at(sq("e2")).is_none());
        let pawn = board.piece_at(sq("e4")).unwrap();
        assert!(pawn.has_moved);
        assert_eq!(pawn.square, sq("e4"));
        assert!(board.is_consistent());
    }

    #[test]
    fn capture_removes_victim_from_roster() {
        let mut board = board("k2q4/8/8/8/3R4/8/8/7K b");
        let mv = find(&board, "d8", "d4");
        let outcome = execute_move(&mut board, &mv, WinCondition::CaptureAll);

        assert_eq!(outcome.captured.map(|p| p.kind), Some(PieceKind::Rook));
        assert_eq!(outcome.winner, None);
        assert_eq!(board.roster_len(Color::White), 1);
        assert_eq!(board.piece_at(sq("d4")).map(|p| p.kind), Some(PieceKind::Queen));
        assert!(board.is_consistent());
    }

    #[test]
    fn capturing_king_wins_under_capture_king() {
        let start = board("3k4/3R4/8/8/8/8/8/4K3");
        let mv = find(&start, "d7", "d8");

        let mut board = start;
        let outcome = execute_move(&mut board, &mv, WinCondition::CaptureKing);
        assert_eq!(outcome.winner, Some(Color::White));

        // The same capture also empties Black's roster.
        let mut board = start;
        let outcome = execute_move(&mut board, &mv, WinCondition::CaptureAll);
        assert_eq!(outcome.winner, Some(Color::White));
    }

    #[test]
    fn capture_all_ends_on_king_while_pieces_remain() {
        let mut board = board("3k4/3R4/8/8/8/8/p7/4K3");
        let mv = find(&board, "d7", "d8");
        let outcome = execute_move(&mut board, &mv, WinCondition::CaptureAll);
        assert_eq!(outcome.winner, Some(Color::White));
        assert!(!board.has_king(Color::Black));
        assert_eq!(board.roster_len(Color::Black), 1);
    }

    #[test]
    fn castle_kingside_moves_both_pieces() {
        let mut board = board("4k3/8/8/8/8/8/8/4K2R");
        let mv = *generate_moves(&board, Square::E1)
            .iter()
            .find(|m| m.castle)
            .unwrap();
        let outcome = execute_move(&mut board, &mv, WinCondition::CaptureAll);

        assert_eq!(outcome.captured, None);
        let king = board.piece_at(sq("g1")).unwrap();
        let rook = board.piece_at(sq("f1")).unwrap();
        assert_eq!(king.kind, PieceKind::King);
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(king.has_moved && rook.has_moved);
        assert!(board.piece_at(Square::E1).is_none());
        assert!(board.piece_at(Square::H1).is_none());
        assert!(board.is_consistent());
    }

    #[test]
    fn castle_queenside_puts_rook_beyond_king() {
        let mut board = board("r3k3/8/8/8/8/8/8/4K3 b");
        let mv = *generate_moves(&board, Square::E8)
            .iter()
            .find(|m| m.castle)
            .unwrap();
        assert_eq!(mv.to, sq("b8"));
        execute_move(&mut board, &mv, WinCondition::CaptureAll);

        assert_eq!(board.piece_at(sq("b8")).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(board.piece_at(sq("c8")).map(|p| p.kind), Some(PieceKind::Rook));
        assert_eq!(board.roster_len(Color::Black), 2);
    }

    #[test]
    fn pawn_promotes_to_queen() {
        let mut board = board("4k3/1P6/8/8/8/8/8/4K3");
        let mv = find(&board, "b7", "b8");
        let outcome = execute_move(&mut board, &mv, WinCondition::CaptureAll);
        assert!(outcome.promoted);
        assert_eq!(board.piece_at(sq("b8")).map(|p| p.kind), Some(PieceKind::Queen));
    }

    #[test]
    fn black_pawn_promotes_on_first_rank() {
        let mut board = board("4k3/8/8/8/8/8/6p1/K6R b");
        let mv = find(&board, "g2", "h1");
        let outcome = execute_move(&mut board, &mv, WinCondition::CaptureAll);
        assert!(outcome.promoted);
        assert_eq!(outcome.captured.map(|p| p.kind), Some(PieceKind::Rook));
        let queen = board.piece_at(sq("h1")).unwrap();
        assert_eq!((queen.color, queen.kind), (Color::Black, PieceKind::Queen));
    }

    #[test]
    fn make_move_leaves_original_untouched() {
        let board = Board::startpos();
        let mv = find(&board, "g1", "f3");
        let child = make_move(&board, &mv);
        assert_eq!(board, Board::startpos());
        assert!(child.piece_at(sq("f3")).is_some());
        assert!(child.piece_at(sq("g1")).is_none());
    }

    #[test]
    #[should_panic(expected = "empty square")]
    fn empty_origin_panics() {
        let mut board = Board::startpos();
        let ghost = Piece::new(Color::White, PieceKind::Knight, sq("e4"));
        let mv = MoveRecord::new(ghost, sq("e5"), None);
        execute_move(&mut board, &mv, WinCondition::CaptureAll);
    }

    #[test]
    #[should_panic(expected = "off-board destination")]
    fn off_board_destination_panics() {
        let mut board = Board::startpos();
        let rook = *board.piece_at(Square::A1).unwrap();
        let mv = MoveRecord::new(rook, Square::A1.offset(-1, 0), None);
        execute_move(&mut board, &mv, WinCondition::CaptureAll);
    }
}
