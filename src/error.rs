// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use thiserror::Error;

use crate::types::{Color, PieceKind, Position};

/// Possible errors that can arise when parsing a board layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutParseError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of layout")]
    UnexpectedEnd,
    #[error("invalid digit")]
    InvalidDigit,
    #[error("rank does not sum to eight squares")]
    FileDoesNotSumToEight,
    #[error("unknown piece")]
    UnknownPiece,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown piece kind: {0}")]
    UnknownPieceKind(String),

    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("no promotion pending at {0}")]
    NoPendingPromotion(Position),

    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutParseError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
