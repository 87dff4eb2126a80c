// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation. Every piece kind has its own generator; `possible_moves`
//! dispatches on the kind. None of the generators check whether a move leaves the mover's own
//! king in check.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{PieceKind, Position, BOARD_SIZE};

/// Destinations of a single piece. A queen in the middle of an empty board has 27 targets, which
/// is the most any piece can produce.
pub type MoveList = ArrayVec<[Position; 32]>;

type Targets = ArrayVec<[Position; 8]>;

pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Column of the king-side and queen-side rooks at the start of the game.
pub const KINGSIDE_ROOK_FILE: i8 = BOARD_SIZE - 1;
pub const QUEENSIDE_ROOK_FILE: i8 = 0;

/// On-board targets of a fixed-offset piece, indexed by source square.
struct JumpTable {
    table: Vec<Targets>,
}

impl JumpTable {
    fn new(offsets: &[(i8, i8)]) -> JumpTable {
        let mut table = Vec::with_capacity(64);
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let source = Position::new(x, y);
                let targets: Targets = offsets
                    .iter()
                    .filter_map(|&(dx, dy)| source.offset(dx, dy))
                    .collect();
                table.push(targets);
            }
        }

        JumpTable { table }
    }

    fn targets(&self, pos: Position) -> &[Position] {
        &self.table[pos.index()]
    }
}

lazy_static! {
    static ref KNIGHT_TABLE: JumpTable = JumpTable::new(&KNIGHT_OFFSETS);
    static ref KING_TABLE: JumpTable = JumpTable::new(&KING_OFFSETS);
}

/// Pseudo-legal destinations of `piece` on `board`.
pub fn possible_moves(piece: &Piece, board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    if !piece.position.is_on_board() {
        return moves;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_moves(piece, board, &mut moves),
        PieceKind::Knight => jump_moves(piece, board, KNIGHT_TABLE.targets(piece.position), &mut moves),
        PieceKind::Bishop => slide_moves(piece, board, &BISHOP_DIRS, &mut moves),
        PieceKind::Rook => slide_moves(piece, board, &ROOK_DIRS, &mut moves),
        PieceKind::Queen => slide_moves(piece, board, &QUEEN_DIRS, &mut moves),
        PieceKind::King => {
            jump_moves(piece, board, KING_TABLE.targets(piece.position), &mut moves);
            castle_moves(piece, board, &mut moves);
        }
    }

    moves
}

fn pawn_moves(pawn: &Piece, board: &Board, moves: &mut MoveList) {
    let forward = pawn.color.forward();
    let from = pawn.position;

    if let Some(single) = from.offset(0, forward) {
        if board.occupant_at(single).is_none() {
            moves.push(single);

            // Double pushes are only available from the starting rank and only if the single
            // push square was also free.
            if from.y() == pawn.color.pawn_rank() {
                if let Some(double) = single.offset(0, forward) {
                    if board.occupant_at(double).is_none() {
                        moves.push(double);
                    }
                }
            }
        }
    }

    for &dx in &[-1, 1] {
        if let Some(target) = from.offset(dx, forward) {
            match board.occupant_at(target) {
                Some(occupant) if occupant.is_enemy_of(pawn) => moves.push(target),
                _ => {}
            }
        }
    }
}

fn jump_moves(piece: &Piece, board: &Board, targets: &[Position], moves: &mut MoveList) {
    for &target in targets {
        match board.occupant_at(target) {
            Some(occupant) if !occupant.is_enemy_of(piece) => {}
            _ => moves.push(target),
        }
    }
}

fn slide_moves(piece: &Piece, board: &Board, dirs: &[(i8, i8)], moves: &mut MoveList) {
    for &(dx, dy) in dirs {
        let mut cursor = piece.position;
        while let Some(next) = cursor.offset(dx, dy) {
            cursor = next;
            if let Some(occupant) = board.occupant_at(cursor) {
                if occupant.is_enemy_of(piece) {
                    moves.push(cursor);
                }
                break;
            }

            moves.push(cursor);
        }
    }
}

fn castle_moves(king: &Piece, board: &Board, moves: &mut MoveList) {
    if king.has_moved {
        return;
    }

    for &rook_file in &[KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE] {
        if let Some(target) = castle_destination(king, board, rook_file) {
            moves.push(target);
        }
    }
}

/// The square an unmoved king lands on when castling with the rook on `rook_file`, if that
/// castle is available. The path between king and rook must be empty and the destination must
/// lie strictly between them.
///
/// The rook's color is not checked. An enemy rook with a clear path gives check, so strict mode
/// never castles with one.
pub fn castle_destination(king: &Piece, board: &Board, rook_file: i8) -> Option<Position> {
    let from = king.position;
    let rook_pos = Position::new(rook_file, from.y());
    let rook = board.occupant_at(rook_pos)?;
    if rook.kind != PieceKind::Rook || rook.has_moved {
        return None;
    }

    let step = if rook_file > from.x() { 1 } else { -1 };
    if (rook_file - from.x()).abs() < 3 {
        return None;
    }

    let mut x = from.x() + step;
    while x != rook_file {
        if board.occupant_at(Position::new(x, from.y())).is_some() {
            return None;
        }
        x += step;
    }

    from.offset(2 * step, 0)
}

#[cfg(test)]
mod tests {
    use super::{possible_moves, MoveList};
    use crate::board::Board;
    use crate::types::Position;

    fn sq(name: &str) -> Position {
        name.parse().unwrap()
    }

    fn moves_at(layout: &str, square: &str) -> MoveList {
        let board = Board::from_layout(layout).unwrap();
        let piece = *board.occupant_at(sq(square)).unwrap();
        possible_moves(&piece, &board)
    }

    fn assert_same_squares(moves: &MoveList, expected: &[&str]) {
        let mut got: Vec<String> = moves.iter().map(|p| p.to_string()).collect();
        let mut want: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        got.sort();
        want.sort();
        assert_eq!(want, got);
    }

    #[test]
    fn knight_in_corner() {
        let moves = moves_at("8/8/8/8/8/8/8/N7", "a1");
        assert_same_squares(&moves, &["b3", "c2"]);
    }

    #[test]
    fn knight_skips_own_pieces() {
        let moves = moves_at("8/8/8/8/8/1P6/2p5/N7", "a1");
        assert_same_squares(&moves, &["c2"]);
    }

    #[test]
    fn queen_on_empty_board() {
        let moves = moves_at("8/8/8/8/3Q4/8/8/8", "d4");
        assert_eq!(27, moves.len());
    }

    #[test]
    fn rook_ray_stops_at_blockers() {
        let moves = moves_at("8/8/3p4/8/3R1P2/8/8/8", "d4");
        assert_same_squares(
            &moves,
            &["d5", "d6", "e4", "c4", "b4", "a4", "d3", "d2", "d1"],
        );
    }

    #[test]
    fn bishop_ray_stops_at_blockers() {
        let moves = moves_at("8/8/8/2p5/3B4/4P3/8/8", "d4");
        assert_same_squares(&moves, &["c5", "e5", "f6", "g7", "h8", "c3", "b2", "a1"]);
    }

    #[test]
    fn white_pawn_from_start() {
        let moves = moves_at("8/8/8/8/8/8/4P3/8", "e2");
        assert_same_squares(&moves, &["e3", "e4"]);
    }

    #[test]
    fn black_pawn_from_start() {
        let moves = moves_at("8/4p3/8/8/8/8/8/8", "e7");
        assert_same_squares(&moves, &["e6", "e5"]);
    }

    #[test]
    fn pawn_double_push_blocked_by_far_square() {
        let moves = moves_at("8/8/8/8/4n3/8/4P3/8", "e2");
        assert_same_squares(&moves, &["e3"]);
    }

    #[test]
    fn pawn_blocked_entirely() {
        let moves = moves_at("8/8/8/8/8/4n3/4P3/8", "e2");
        assert!(moves.is_empty());
    }

    #[test]
    fn pawn_off_start_rank_single_step() {
        let moves = moves_at("8/8/8/8/8/4P3/8/8", "e3");
        assert_same_squares(&moves, &["e4"]);
    }

    #[test]
    fn pawn_captures_only_enemies() {
        let moves = moves_at("8/8/8/8/8/3p1N2/4P3/8", "e2");
        assert_same_squares(&moves, &["e3", "e4", "d3"]);
    }

    #[test]
    fn pawn_on_last_rank_has_no_moves() {
        let moves = moves_at("4P3/8/8/8/8/8/8/8", "e8");
        assert!(moves.is_empty());
    }

    #[test]
    fn king_castles_both_sides() {
        let moves = moves_at("8/8/8/8/8/8/8/R3K2R", "e1");
        assert!(moves.contains(&sq("g1")));
        assert!(moves.contains(&sq("c1")));
    }

    #[test]
    fn king_castle_blocked_by_piece_between() {
        let moves = moves_at("8/8/8/8/8/8/8/RN2K1NR", "e1");
        assert!(!moves.contains(&sq("g1")));
        assert!(!moves.contains(&sq("c1")));
    }

    #[test]
    fn king_castles_toward_unmoved_enemy_rook() {
        let moves = moves_at("8/8/8/8/8/8/8/r3K2r", "e1");
        assert!(moves.contains(&sq("g1")));
        assert!(moves.contains(&sq("c1")));
    }

    #[test]
    fn king_next_to_rook_does_not_castle_off_board() {
        let moves = moves_at("8/8/8/8/8/8/8/6KR", "g1");
        for mov in &moves {
            assert!(mov.is_on_board());
        }
        assert_same_squares(&moves, &["f1", "f2", "g2", "h2"]);
    }
}
