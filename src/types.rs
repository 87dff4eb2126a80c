// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

use crate::error::Error;

/// The width and height of the board.
pub const BOARD_SIZE: i8 = 8;

/// A coordinate on the board. `x` is the column (file a through h) and `y` is the row (rank 1
/// through 8), both zero-based.
///
/// Positions are not validated on construction: off-board coordinates are representable so that
/// move generators can step off the edge and test the result, but they must never be used as a
/// board key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    x: i8,
    y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Position {
        Position { x, y }
    }

    pub fn of(file: File, rank: Rank) -> Position {
        Position::new(file.to_i8().unwrap_or(-1), rank.to_i8().unwrap_or(-1))
    }

    pub fn x(self) -> i8 {
        self.x
    }

    pub fn y(self) -> i8 {
        self.y
    }

    pub fn is_on_board(self) -> bool {
        self.x >= 0 && self.x < BOARD_SIZE && self.y >= 0 && self.y < BOARD_SIZE
    }

    pub fn file(self) -> Option<File> {
        FromPrimitive::from_i8(self.x)
    }

    pub fn rank(self) -> Option<Rank> {
        FromPrimitive::from_i8(self.y)
    }

    /// Returns the position shifted by the given deltas, or `None` if it would fall off the
    /// board.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Position> {
        let target = Position::new(self.x + dx, self.y + dy);
        if target.is_on_board() {
            Some(target)
        } else {
            None
        }
    }

    /// Index of this position into a 64-entry table. Only meaningful for on-board positions.
    pub(crate) fn index(self) -> usize {
        debug_assert!(self.is_on_board());
        (self.y as usize) * (BOARD_SIZE as usize) + self.x as usize
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.file(), self.rank()) {
            (Some(file), Some(rank)) => write!(f, "{}{}", file, rank),
            _ => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Position, Error> {
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(Error::InvalidSquare(s.to_owned())),
        };

        let file = File::try_from(file).map_err(|_| Error::InvalidSquare(s.to_owned()))?;
        let rank = Rank::try_from(rank).map_err(|_| Error::InvalidSquare(s.to_owned()))?;
        Ok(Position::of(file, rank))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Rank::One => '1',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            '1' => Rank::One,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static RANKS: [Rank; 8] = [
    Rank::One,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            File::A => 'a',
            File::B => 'b',
            File::C => 'c',
            File::D => 'd',
            File::E => 'e',
            File::F => 'f',
            File::G => 'g',
            File::H => 'h',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for File {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            'a' => File::A,
            'b' => File::B,
            'c' => File::C,
            'd' => File::D,
            'e' => File::E,
            'f' => File::F,
            'g' => File::G,
            'h' => File::H,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step for this color.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row of this color's pieces at the start of the game.
    pub fn back_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => BOARD_SIZE - 1,
        }
    }

    /// Row of this color's pawns at the start of the game.
    pub fn pawn_rank(self) -> i8 {
        self.back_rank() + self.forward()
    }

    /// Row on which this color's pawns promote.
    pub fn promotion_rank(self) -> i8 {
        self.toggle().back_rank()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The tag naming this kind, as accepted by `PieceFactory::create`.
    pub fn tag(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Whether a pawn may be promoted to this kind.
    pub fn is_promotion_target(self) -> bool {
        match self {
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => true,
            PieceKind::Pawn | PieceKind::King => false,
        }
    }
}

impl FromStr for PieceKind {
    type Err = Error;

    fn from_str(tag: &str) -> Result<PieceKind, Error> {
        PIECE_KINDS
            .iter()
            .cloned()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| Error::UnknownPieceKind(tag.to_owned()))
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

#[cfg(test)]
mod tests {
    use super::{Color, PieceKind, Position};
    use crate::error::Error;

    #[test]
    fn position_parses_algebraic() {
        assert_eq!(Position::new(4, 3), "e4".parse::<Position>().unwrap());
        assert_eq!(Position::new(0, 7), "a8".parse::<Position>().unwrap());
        assert_eq!(Position::new(7, 0), "h1".parse::<Position>().unwrap());
    }

    #[test]
    fn position_rejects_garbage() {
        for text in &["", "e", "e9", "i1", "e44", "E4"] {
            match text.parse::<Position>() {
                Err(Error::InvalidSquare(s)) => assert_eq!(*text, s),
                other => panic!("unexpected result for {:?}: {:?}", text, other),
            }
        }
    }

    #[test]
    fn position_display() {
        assert_eq!("c6", Position::new(2, 5).to_string());
        assert_eq!("(8, -1)", Position::new(8, -1).to_string());
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Position::new(7, 7);
        assert_eq!(None, corner.offset(1, 0));
        assert_eq!(None, corner.offset(0, 1));
        assert_eq!(Some(Position::new(6, 6)), corner.offset(-1, -1));
    }

    #[test]
    fn color_ranks() {
        assert_eq!(0, Color::White.back_rank());
        assert_eq!(1, Color::White.pawn_rank());
        assert_eq!(7, Color::White.promotion_rank());
        assert_eq!(7, Color::Black.back_rank());
        assert_eq!(6, Color::Black.pawn_rank());
        assert_eq!(0, Color::Black.promotion_rank());
    }

    #[test]
    fn piece_kind_tags() {
        assert_eq!(PieceKind::Queen, "Queen".parse::<PieceKind>().unwrap());
        assert_eq!(PieceKind::Knight, "knight".parse::<PieceKind>().unwrap());
        assert!("Wizard".parse::<PieceKind>().is_err());
    }
}
