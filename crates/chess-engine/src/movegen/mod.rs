//! Move generation.
//!
//! Moves are pseudo-legal: they follow each piece kind's movement rules but
//! are never checked against king safety, since this variant has no notion
//! of check. Generation is a set of free functions keyed on [`PieceKind`].

mod offsets;
pub mod perft;

use crate::Board;
use chess_core::{Color, MoveRecord, Piece, PieceKind, Square};

/// A growable list of candidate moves.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<MoveRecord>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: MoveRecord) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, MoveRecord> {
        self.moves.iter()
    }

    /// Returns the move matching `m`'s origin, destination and castle flag.
    pub fn find(&self, m: &MoveRecord) -> Option<&MoveRecord> {
        self.moves.iter().find(|candidate| candidate.same_move(m))
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&MoveRecord) -> bool,
    {
        self.moves.retain(f);
    }

    /// Appends every move of `other`.
    pub fn extend(&mut self, other: MoveList) {
        self.moves.extend(other.moves);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = MoveRecord;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a MoveRecord;
    type IntoIter = std::slice::Iter<'a, MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = MoveRecord;
    type IntoIter = std::vec::IntoIter<MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates every candidate move for the piece standing on `sq`.
///
/// # Panics
///
/// Panics if `sq` is empty or off the board.
pub fn generate_moves(board: &Board, sq: Square) -> MoveList {
    let piece = match board.piece_at(sq) {
        Some(piece) => *piece,
        None => panic!("cannot generate moves for empty square {}", sq),
    };
    let mut moves = MoveList::new();
    generate_piece_moves(board, &piece, &mut moves);
    moves
}

/// Generates every candidate move for all pieces of `color`.
pub fn generate_all(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for piece in board.roster(color) {
        generate_piece_moves(board, piece, &mut moves);
    }
    moves
}

fn generate_piece_moves(board: &Board, piece: &Piece, moves: &mut MoveList) {
    match piece.kind {
        PieceKind::King => {
            generate_step_moves(board, piece, &offsets::KING, moves);
            generate_castling_moves(board, piece, moves);
        }
        PieceKind::Queen => {
            generate_sliding_moves(board, piece, &offsets::ORTHOGONAL, moves);
            generate_sliding_moves(board, piece, &offsets::DIAGONAL, moves);
        }
        PieceKind::Rook => generate_sliding_moves(board, piece, &offsets::ORTHOGONAL, moves),
        PieceKind::Bishop => generate_sliding_moves(board, piece, &offsets::DIAGONAL, moves),
        PieceKind::Knight => generate_step_moves(board, piece, &offsets::KNIGHT, moves),
        PieceKind::Pawn => generate_pawn_moves(board, piece, moves),
    }
}

/// Pushes a move to `to` if it is on the board and not held by a friend.
fn push_if_open(board: &Board, piece: &Piece, to: Square, moves: &mut MoveList) {
    if !board.is_on_board(to) {
        return;
    }
    match board.piece_at(to) {
        None => moves.push(MoveRecord::new(*piece, to, None)),
        Some(occupant) if occupant.color != piece.color => {
            moves.push(MoveRecord::new(*piece, to, Some(*occupant)))
        }
        Some(_) => {}
    }
}

/// Generates knight and king steps.
fn generate_step_moves(board: &Board, piece: &Piece, steps: &[(i8, i8)], moves: &mut MoveList) {
    for &(df, dr) in steps {
        push_if_open(board, piece, piece.square.offset(df, dr), moves);
    }
}

/// Generates rook, bishop and queen rays. Each ray stops at the first
/// occupied square, which is included only if it holds an enemy.
fn generate_sliding_moves(
    board: &Board,
    piece: &Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut to = piece.square.offset(df, dr);
        while board.is_empty_square(to) {
            moves.push(MoveRecord::new(*piece, to, None));
            to = to.offset(df, dr);
        }
        if let Some(blocker) = board.piece_at(to) {
            if blocker.color != piece.color {
                moves.push(MoveRecord::new(*piece, to, Some(*blocker)));
            }
        }
    }
}

/// Generates pawn pushes and diagonal captures. There is no en passant.
fn generate_pawn_moves(board: &Board, piece: &Piece, moves: &mut MoveList) {
    let dir = piece.color.pawn_direction();
    let from = piece.square;

    let single = from.offset(0, dir);
    if board.is_empty_square(single) {
        moves.push(MoveRecord::new(*piece, single, None));

        let double = single.offset(0, dir);
        if !piece.has_moved
            && from.rank() == piece.color.pawn_start_rank()
            && board.is_empty_square(double)
        {
            moves.push(MoveRecord::new(*piece, double, None));
        }
    }

    for df in [1, -1] {
        let to = from.offset(df, dir);
        if let Some(target) = board.piece_at(to) {
            if target.color != piece.color {
                moves.push(MoveRecord::new(*piece, to, Some(*target)));
            }
        }
    }
}

/// Generates castles for an unmoved king.
///
/// Along each direction of the king's rank the first piece found must be an
/// unmoved rook of the king's color, and the square just before it must be
/// empty. The king's destination is that square.
fn generate_castling_moves(board: &Board, king: &Piece, moves: &mut MoveList) {
    if king.has_moved {
        return;
    }
    for step in offsets::CASTLING {
        let mut sq = king.square.offset(step, 0);
        while board.is_empty_square(sq) {
            sq = sq.offset(step, 0);
        }
        let Some(rook) = board.piece_at(sq) else {
            continue;
        };
        if rook.kind != PieceKind::Rook || rook.color != king.color || rook.has_moved {
            continue;
        }
        let king_to = sq.offset(-step, 0);
        if board.is_empty_square(king_to) {
            moves.push(MoveRecord::castle(*king, king_to, *rook));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Placement;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(placement: &str) -> Board {
        Board::from_placement(&Placement::parse(placement).unwrap())
    }

    fn destinations(moves: &MoveList) -> Vec<String> {
        let mut out: Vec<String> = moves.iter().map(|m| m.to.to_algebraic()).collect();
        out.sort();
        out
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let pawn = Piece::new(Color::White, PieceKind::Pawn, sq("e2"));
        let m1 = MoveRecord::new(pawn, sq("e3"), None);
        let m2 = MoveRecord::new(pawn, sq("e4"), None);
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert_eq!(list.find(&m2.with_score(7)), Some(&m2));

        list.retain(|m| m.to == sq("e4"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn generate_all_startpos() {
        let board = Board::startpos();
        assert_eq!(generate_all(&board, Color::White).len(), 20);
        assert_eq!(generate_all(&board, Color::Black).len(), 20);
    }

    #[test]
    fn knight_on_start_square() {
        let board = Board::startpos();
        let moves = generate_moves(&board, sq("g1"));
        assert_eq!(destinations(&moves), vec!["f3", "h3"]);
        assert!(moves.iter().all(|m| m.from == sq("g1")));
    }

    #[test]
    fn knight_captures_enemy_not_friend() {
        let board = board("4k3/8/8/8/8/2p1P3/8/3N1K2");
        let moves = generate_moves(&board, sq("d1"));
        assert_eq!(destinations(&moves), vec!["b2", "c3", "f2"]);
        let capture = moves.iter().find(|m| m.to == sq("c3")).unwrap();
        assert_eq!(capture.target.map(|p| p.kind), Some(PieceKind::Pawn));
    }

    #[test]
    #[should_panic(expected = "empty square")]
    fn generating_for_empty_square_panics() {
        generate_moves(&Board::startpos(), sq("e4"));
    }

    #[test]
    fn rook_rays_stop_at_blockers() {
        // Rook d4, friendly pawn d6, enemy pawn f4.
        let board = board("4k3/8/3P4/8/3R1p2/8/8/4K3");
        let moves = generate_moves(&board, sq("d4"));
        assert_eq!(
            destinations(&moves),
            vec!["a4", "b4", "c4", "d1", "d2", "d3", "d5", "e4", "f4"]
        );
        let captures: Vec<_> = moves.iter().filter(|m| m.is_capture()).collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to, sq("f4"));
    }

    #[test]
    fn bishop_and_queen_directions() {
        let board = board("4k3/8/8/8/3B4/8/8/4K3");
        assert_eq!(generate_moves(&board, sq("d4")).len(), 13);

        let board = board_with_queen();
        assert_eq!(generate_moves(&board, sq("d4")).len(), 27);
    }

    fn board_with_queen() -> Board {
        board("k7/8/8/8/3Q4/8/8/7K")
    }

    #[test]
    fn king_steps() {
        let board = board("4k3/8/8/8/3K4/8/8/8");
        assert_eq!(generate_moves(&board, sq("d4")).len(), 8);

        let board = self::board("4k3/8/8/8/8/8/8/K7");
        assert_eq!(destinations(&generate_moves(&board, sq("a1"))), vec!["a2", "b1", "b2"]);
    }

    #[test]
    fn pawn_single_and_double_push() {
        let board = Board::startpos();
        assert_eq!(destinations(&generate_moves(&board, sq("e2"))), vec!["e3", "e4"]);
        assert_eq!(destinations(&generate_moves(&board, sq("d7"))), vec!["d5", "d6"]);
    }

    #[test]
    fn pawn_double_push_needs_both_squares_empty() {
        let blocked_far = board("4k3/8/8/8/4p3/8/4P3/4K3");
        assert_eq!(destinations(&generate_moves(&blocked_far, sq("e2"))), vec!["e3"]);

        let blocked_near = board("4k3/8/8/8/8/4p3/4P3/4K3");
        assert!(generate_moves(&blocked_near, sq("e2")).is_empty());
    }

    #[test]
    fn moved_pawn_has_no_double_push() {
        let mut board = Board::startpos();
        let pawn = board.clear(sq("e2")).unwrap();
        board.place(pawn.moved());
        assert_eq!(destinations(&generate_moves(&board, sq("e2"))), vec!["e3"]);
    }

    #[test]
    fn pawn_captures_diagonally_only_enemies() {
        let board = board("4k3/8/8/3p1P2/4P3/8/8/4K3");
        assert_eq!(destinations(&generate_moves(&board, sq("e4"))), vec!["d5", "e5"]);
        let board = self::board("4k3/8/8/8/4p3/3P1P2/8/4K3 b");
        assert_eq!(
            destinations(&generate_moves(&board, sq("e4"))),
            vec!["d3", "e3", "f3"]
        );
    }

    #[test]
    fn pawn_on_last_rank_has_no_moves() {
        let board = board("3Pk3/8/8/8/8/8/8/4K3");
        assert!(generate_moves(&board, sq("d8")).is_empty());
    }

    #[test]
    fn castling_kingside() {
        let board = board("4k3/8/8/8/8/8/8/4K2R");
        let moves = generate_moves(&board, Square::E1);
        let castles: Vec<_> = moves.iter().filter(|m| m.castle).collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to, sq("g1"));
        assert_eq!(castles[0].target.map(|r| r.square), Some(Square::H1));
    }

    #[test]
    fn castling_queenside_lands_next_to_rook() {
        let board = board("4k3/8/8/8/8/8/8/R3K3");
        let castles: Vec<_> = generate_moves(&board, Square::E1)
            .into_iter()
            .filter(|m| m.castle)
            .collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to, sq("b1"));
    }

    #[test]
    fn no_castling_when_blocked_or_moved() {
        let blocked = board("4k3/8/8/8/8/8/8/4KB1R");
        assert!(generate_moves(&blocked, Square::E1).iter().all(|m| !m.castle));

        let mut moved_rook = board("4k3/8/8/8/8/8/8/4K2R");
        let rook = moved_rook.clear(Square::H1).unwrap();
        moved_rook.place(rook.moved());
        assert!(generate_moves(&moved_rook, Square::E1).iter().all(|m| !m.castle));

        let mut moved_king = board("4k3/8/8/8/8/8/8/4K2R");
        let king = moved_king.clear(Square::E1).unwrap();
        moved_king.place(king.moved());
        assert!(generate_moves(&moved_king, Square::E1).iter().all(|m| !m.castle));
    }

    #[test]
    fn no_castling_with_adjacent_or_enemy_rook() {
        let adjacent = board("4k3/8/8/8/8/8/8/4KR2");
        assert!(generate_moves(&adjacent, Square::E1).iter().all(|m| !m.castle));

        let enemy = board("4k3/8/8/8/8/8/8/4K2r");
        assert!(generate_moves(&enemy, Square::E1).iter().all(|m| !m.castle));
    }

    #[test]
    fn generation_is_repeatable() {
        let board = Board::startpos();
        assert_eq!(generate_all(&board, Color::White), generate_all(&board, Color::White));
    }
}
