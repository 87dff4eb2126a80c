// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::{self, Display, Write};

use crate::board::Board;
use crate::error::Result;
use crate::movegen::{self, MoveList};
use crate::types::{Color, PieceKind, Position};

/// A piece standing on the board. The piece records its own position, which the board keeps in
/// sync with the square it is stored under.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Position,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, position: Position) -> Piece {
        Piece {
            kind,
            color,
            position,
            has_moved: false,
        }
    }

    /// Pseudo-legal destinations of this piece on the given board. Moves that would leave this
    /// piece's own king in check are not filtered out.
    pub fn possible_moves(&self, board: &Board) -> MoveList {
        movegen::possible_moves(self, board)
    }

    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.color != other.color
    }

    /// Builds an unmoved piece from a layout letter: uppercase for white, lowercase for black.
    pub fn from_symbol(c: char, position: Position) -> Option<Piece> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };

        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color, position))
    }

    /// The piece letter used in layouts.
    pub fn symbol(&self) -> char {
        let chr = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        match self.color {
            Color::White => chr.to_ascii_uppercase(),
            Color::Black => chr,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// Constructs pieces from their kind tags.
pub struct PieceFactory;

impl PieceFactory {
    /// Creates a piece from a kind tag such as `"Queen"`. Fails with `UnknownPieceKind` if the tag
    /// does not name one of the six piece kinds.
    pub fn create(tag: &str, position: Position, color: Color) -> Result<Piece> {
        let kind = tag.parse::<PieceKind>()?;
        Ok(PieceFactory::build(kind, position, color))
    }

    pub fn build(kind: PieceKind, position: Position, color: Color) -> Piece {
        Piece::new(kind, color, position)
    }
}

#[cfg(test)]
mod tests {
    use super::{Piece, PieceFactory};
    use crate::error::Error;
    use crate::types::{Color, PieceKind, Position};

    #[test]
    fn factory_builds_every_kind() {
        let pos = Position::new(3, 3);
        for &(tag, kind) in &[
            ("Pawn", PieceKind::Pawn),
            ("Rook", PieceKind::Rook),
            ("Knight", PieceKind::Knight),
            ("Bishop", PieceKind::Bishop),
            ("Queen", PieceKind::Queen),
            ("King", PieceKind::King),
        ] {
            let piece = PieceFactory::create(tag, pos, Color::Black).unwrap();
            assert_eq!(kind, piece.kind);
            assert_eq!(Color::Black, piece.color);
            assert_eq!(pos, piece.position);
            assert!(!piece.has_moved);
        }
    }

    #[test]
    fn factory_rejects_unknown_tag() {
        match PieceFactory::create("Archbishop", Position::new(0, 0), Color::White) {
            Err(Error::UnknownPieceKind(tag)) => assert_eq!("Archbishop", tag),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn symbols_round_trip_through_layout_letters() {
        let piece = Piece::new(PieceKind::Knight, Color::White, Position::new(1, 0));
        assert_eq!('N', piece.symbol());
        assert_eq!(Some(piece), Piece::from_symbol('N', Position::new(1, 0)));

        let queen = Piece::from_symbol('q', Position::new(3, 7)).unwrap();
        assert_eq!(PieceKind::Queen, queen.kind);
        assert_eq!(Color::Black, queen.color);
        assert_eq!('q', queen.symbol());
        assert_eq!(None, Piece::from_symbol('x', Position::new(0, 0)));
    }
}
