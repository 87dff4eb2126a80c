// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::config::{LegalityMode, RulesConfig};
use crate::error::{Error, Result};
use crate::movegen::{MoveList, KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::piece::{Piece, PieceFactory};
use crate::types::{Color, PieceKind, Position};

bitflags! {
    pub struct MoveFlags: u8 {
        const QUIET = 0;
        const CAPTURE = 0b0000_0001;
        const CASTLE = 0b0000_0010;
    }
}

/// Result of asking the game to execute a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was out of turn, not generated for the piece, or the piece was not where the
    /// caller said it was. Nothing changed.
    Rejected,
    /// The move landed. `captured` is the piece removed from the destination, if any.
    Completed {
        flags: MoveFlags,
        captured: Option<Piece>,
    },
    /// A pawn reached the far rank on `square`. The move landed, but no further move is accepted
    /// until `complete_promotion` is called for this square.
    RequiresPromotionChoice {
        square: Position,
        flags: MoveFlags,
        captured: Option<Piece>,
    },
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        match self {
            MoveOutcome::Rejected => false,
            _ => true,
        }
    }
}

/// State of a single game: the board, whose turn it is, and whether the game has ended.
///
/// The turn only changes through `toggle_turn`. Executing a move never flips it, so callers decide
/// when a move counts as the end of a turn.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    turn: Color,
    game_over: bool,
    pending_promotion: Option<Position>,
    config: RulesConfig,
}

//
// Setup and state getters
//

impl GameState {
    pub fn new(config: RulesConfig, layout: Board) -> GameState {
        GameState {
            board: layout,
            turn: Color::White,
            game_over: false,
            pending_promotion: None,
            config,
        }
    }

    pub fn standard(config: RulesConfig) -> GameState {
        GameState::new(config, Board::standard())
    }

    /// Replaces the board with the given layout and starts a fresh game with white to move.
    pub fn initialize_game(&mut self, layout: Board) {
        self.board = layout;
        self.turn = Color::White;
        self.game_over = false;
        self.pending_promotion = None;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> RulesConfig {
        self.config
    }

    pub fn get_current_turn(&self) -> Color {
        self.turn
    }

    pub fn toggle_turn(&mut self) {
        self.turn = self.turn.toggle();
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn pending_promotion(&self) -> Option<Position> {
        self.pending_promotion
    }

    pub fn king_position(&self, color: Color) -> Result<Position> {
        self.board
            .king_position(color)
            .ok_or(Error::MissingKing(color))
    }
}

//
// Move legality and execution
//

impl GameState {
    /// Destinations available to `piece`. In pseudo-legal mode this is exactly the piece's own
    /// move generation; in strict mode moves that leave the mover's king in check are removed.
    pub fn get_possible_moves(&self, piece: &Piece) -> MoveList {
        let moves = piece.possible_moves(&self.board);
        match self.config.legality {
            LegalityMode::PseudoLegal => moves,
            LegalityMode::Strict => self.without_self_check(piece, moves),
        }
    }

    pub fn is_move_allowed(&self, piece: &Piece, destination: Position) -> bool {
        if piece.color != self.turn {
            return false;
        }

        self.get_possible_moves(piece).contains(&destination)
    }

    /// Moves `piece` from `from` to `to` if the move is allowed, capturing whatever stands on
    /// `to`. Castling moves the rook along with the king. The turn is not changed.
    pub fn execute_move(&mut self, piece: &Piece, from: Position, to: Position) -> MoveOutcome {
        if let Some(pending) = self.pending_promotion {
            debug!(
                "rejecting {} -> {}: promotion pending on {}",
                from, to, pending
            );
            return MoveOutcome::Rejected;
        }

        let moving = match self.board.occupant_at(from) {
            Some(occupant) if occupant.kind == piece.kind && occupant.color == piece.color => {
                *occupant
            }
            _ => {
                debug!("rejecting {} -> {}: no {:?} on {}", from, to, piece.kind, from);
                return MoveOutcome::Rejected;
            }
        };

        if !self.is_move_allowed(&moving, to) {
            debug!("rejecting {} {} -> {}: not allowed", moving, from, to);
            return MoveOutcome::Rejected;
        }

        let (captured, castled) = apply_move(&mut self.board, from, to);
        debug!("{} {} -> {}", moving, from, to);
        let mut flags = MoveFlags::QUIET;
        if let Some(victim) = captured {
            debug!("{} captures {} on {}", moving, victim, to);
            flags |= MoveFlags::CAPTURE;
        }

        if castled {
            debug!("{} castles", moving.color);
            flags |= MoveFlags::CASTLE;
        }

        if moving.kind == PieceKind::Pawn && to.y() == moving.color.promotion_rank() {
            self.pending_promotion = Some(to);
            return MoveOutcome::RequiresPromotionChoice {
                square: to,
                flags,
                captured,
            };
        }

        MoveOutcome::Completed { flags, captured }
    }

    /// Replaces the pawn awaiting promotion on `position` with a piece of the chosen kind.
    pub fn complete_promotion(&mut self, position: Position, kind: PieceKind) -> Result<Piece> {
        if self.pending_promotion != Some(position) {
            return Err(Error::NoPendingPromotion(position));
        }

        if !kind.is_promotion_target() {
            return Err(Error::InvalidPromotion(kind));
        }

        let pawn = self
            .board
            .remove(position)
            .ok_or(Error::NoPendingPromotion(position))?;
        let mut promoted = PieceFactory::build(kind, position, pawn.color);
        promoted.has_moved = true;
        self.board.place(promoted);
        self.pending_promotion = None;
        info!("{} pawn on {} promoted to {}", pawn.color, position, kind.tag());
        Ok(promoted)
    }

    fn without_self_check(&self, piece: &Piece, moves: MoveList) -> MoveList {
        if self.board.king_position(piece.color).is_none() {
            return moves;
        }

        moves
            .into_iter()
            .filter(|&to| self.keeps_king_safe(piece, to))
            .collect()
    }

    // `without_self_check` only calls this when the mover has a king, so the `Err` arm of
    // `king_in_check` cannot be reached here.
    fn keeps_king_safe(&self, piece: &Piece, to: Position) -> bool {
        let from = piece.position;
        if is_castle(piece, from, to) {
            // No castling out of check, and the king may not pass through a checked square.
            if king_in_check(&self.board, piece.color).unwrap_or(false) {
                return false;
            }

            let transit = Position::new((from.x() + to.x()) / 2, from.y());
            let mut scratch = self.board.clone();
            scratch.relocate(from, transit);
            if king_in_check(&scratch, piece.color).unwrap_or(false) {
                return false;
            }
        }

        let mut scratch = self.board.clone();
        apply_move(&mut scratch, from, to);
        !king_in_check(&scratch, piece.color).unwrap_or(false)
    }
}

//
// Check and checkmate detection
//

impl GameState {
    /// Whether any enemy piece can move onto the king of the given color.
    pub fn is_king_in_check(&self, color: Color) -> Result<bool> {
        king_in_check(&self.board, color).map_err(|err| {
            warn!("{}", err);
            err
        })
    }

    /// Returns the square of `mover`'s opponent's king if that king is in check.
    pub fn checked_king(&self, mover: Color) -> Option<Position> {
        let opponent = mover.toggle();
        match king_in_check(&self.board, opponent) {
            Ok(true) => self.board.king_position(opponent),
            _ => None,
        }
    }

    /// Determines whether the king of `king_color` is checkmated after `moved_piece` landed on
    /// `new_position`.
    ///
    /// Every pseudo-legal move of every piece of `king_color` is tried on a copy of the board; if
    /// any of them leaves the king out of check, it is not mate. In strict mode castles are not
    /// tried. The live board is never touched.
    pub fn check_for_checkmate(
        &self,
        king_color: Color,
        moved_piece: &Piece,
        new_position: Position,
    ) -> Result<bool> {
        if !self.is_king_in_check(king_color)? {
            return Ok(false);
        }

        let mut scratch = self.board.clone();
        let landed = match scratch.occupant_at(new_position) {
            Some(occupant) => {
                occupant.kind == moved_piece.kind && occupant.color == moved_piece.color
            }
            None => false,
        };

        if !landed {
            apply_move(&mut scratch, moved_piece.position, new_position);
        }

        // The king is in check, and strict mode never castles out of check.
        let strict = self.config.legality == LegalityMode::Strict;
        let defenders: Vec<Piece> = scratch.pieces_of(king_color).cloned().collect();
        for defender in &defenders {
            for &to in defender.possible_moves(&scratch).iter() {
                if to == defender.position
                    || (strict && is_castle(defender, defender.position, to))
                {
                    continue;
                }

                let mut trial = scratch.clone();
                apply_move(&mut trial, defender.position, to);
                if !king_in_check(&trial, king_color)? {
                    debug!(
                        "{} escapes check with {} {} -> {}",
                        king_color, defender, defender.position, to
                    );
                    return Ok(false);
                }
            }
        }

        info!("{} is checkmated", king_color);
        Ok(true)
    }

    /// Checks whether the side to move has been checkmated by `piece` landing on `position`, and
    /// if so marks the game as over.
    pub fn check_game_over(&mut self, piece: &Piece, position: Position) -> Result<bool> {
        if self.check_for_checkmate(self.turn, piece, position)? {
            self.game_over = true;
            return Ok(true);
        }

        Ok(false)
    }
}

//
// Helper functions
//

fn king_in_check(board: &Board, color: Color) -> Result<bool> {
    let king = board
        .king_position(color)
        .ok_or(Error::MissingKing(color))?;
    Ok(board
        .pieces_of(color.toggle())
        .any(|enemy| enemy.possible_moves(board).contains(&king)))
}

fn is_castle(piece: &Piece, from: Position, to: Position) -> bool {
    piece.kind == PieceKind::King && from.y() == to.y() && (to.x() - from.x()).abs() == 2
}

/// Applies a move without any legality checks. A castling king brings its rook along if the rook
/// is its own; an enemy rook stays where it is. Returns the captured piece and whether a rook
/// came along.
fn apply_move(board: &mut Board, from: Position, to: Position) -> (Option<Piece>, bool) {
    let moving = match board.occupant_at(from) {
        Some(piece) => *piece,
        None => return (None, false),
    };

    let captured = board.relocate(from, to);
    if !is_castle(&moving, from, to) {
        return (captured, false);
    }

    let (rook_file, rook_dx) = if to.x() > from.x() {
        (KINGSIDE_ROOK_FILE, 1)
    } else {
        (QUEENSIDE_ROOK_FILE, -1)
    };

    let rook_pos = Position::new(rook_file, from.y());
    match board.occupant_at(rook_pos) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.color == moving.color => {
            board.relocate(rook_pos, Position::new(from.x() + rook_dx, from.y()));
            (captured, true)
        }
        _ => (captured, false),
    }
}
