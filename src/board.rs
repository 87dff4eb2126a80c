// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::{self, Write};
use std::iter::FromIterator;

use hashbrown::HashMap;

use crate::error::LayoutParseError;
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Position, FILES, RANKS};

/// Piece placement of the standard starting position.
pub const STANDARD_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Mapping from positions to the pieces standing on them. A position holds at most one piece.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    squares: HashMap<Position, Piece>,
}

//
// Occupancy queries and mutation
//

impl Board {
    pub fn new() -> Board {
        Board {
            squares: HashMap::new(),
        }
    }

    pub fn occupant_at(&self, pos: Position) -> Option<&Piece> {
        self.squares.get(&pos)
    }

    /// Puts a piece on the square named by its own position, returning whatever stood there
    /// before.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        debug_assert!(
            piece.position.is_on_board(),
            "placing piece off the board at {}",
            piece.position
        );
        self.squares.insert(piece.position, piece)
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.squares.remove(&pos)
    }

    /// Moves whatever stands on `from` to `to`, capturing any occupant of `to`. The moved piece's
    /// position is updated and it is marked as moved. Returns the captured piece.
    ///
    /// No legality checks are performed.
    pub fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let mut piece = self.squares.remove(&from)?;
        let captured = self.squares.remove(&to);
        piece.position = to;
        piece.has_moved = true;
        self.squares.insert(to, piece);
        captured
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.values()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.squares.values().filter(move |piece| piece.color == color)
    }

    /// Linear scan for the king of the given color.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|piece| piece.kind == PieceKind::King)
            .map(|piece| piece.position)
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

//
// Layout parsing and generation.
//
// Layouts use the piece placement field of FEN: ranks from eight down to one separated by '/',
// digits for runs of empty squares and piece letters for pieces.
//

impl Board {
    pub fn standard() -> Board {
        Board::from_layout(STANDARD_LAYOUT).expect("standard layout is well-formed")
    }

    /// Constructs a board from a layout string. Every piece starts out unmoved.
    pub fn from_layout<S: AsRef<str>>(layout: S) -> Result<Board, LayoutParseError> {
        let mut board = Board::new();
        let iter = &mut layout.as_ref().chars();
        for (idx, &rank) in RANKS.iter().rev().enumerate() {
            let mut file = 0usize;
            while file < FILES.len() {
                let c = match iter.next() {
                    Some(c) => c,
                    None => return Err(LayoutParseError::UnexpectedEnd),
                };

                // digits 1 through 8 indicate empty squares.
                if let Some(value) = c.to_digit(10) {
                    if value < 1 || value > 8 {
                        return Err(LayoutParseError::InvalidDigit);
                    }

                    file += value as usize;
                    if file > FILES.len() {
                        return Err(LayoutParseError::FileDoesNotSumToEight);
                    }

                    continue;
                }

                let pos = Position::of(FILES[file], rank);
                let piece = Piece::from_symbol(c, pos).ok_or(LayoutParseError::UnknownPiece)?;
                board.place(piece);
                file += 1;
            }

            if idx + 1 < RANKS.len() {
                match iter.next() {
                    Some('/') => {}
                    Some(c) => return Err(LayoutParseError::UnexpectedChar(c)),
                    None => return Err(LayoutParseError::UnexpectedEnd),
                }
            }
        }

        match iter.next() {
            None => Ok(board),
            Some(c) => Err(LayoutParseError::UnexpectedChar(c)),
        }
    }

    pub fn as_layout(&self) -> String {
        let mut buf = String::new();
        for (idx, &rank) in RANKS.iter().rev().enumerate() {
            let mut empty_squares = 0;
            for &file in &FILES {
                if let Some(piece) = self.occupant_at(Position::of(file, rank)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    buf.push(piece.symbol());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if idx + 1 < RANKS.len() {
                buf.push('/');
            }
        }

        buf
    }
}

//
// Trait implementations
//

impl FromIterator<Piece> for Board {
    fn from_iter<I: IntoIterator<Item = Piece>>(iter: I) -> Board {
        let mut board = Board::new();
        for piece in iter {
            board.place(piece);
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                if let Some(piece) = self.occupant_at(Position::of(file, rank)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}
