// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rule engine for a two-player chess game: move generation, turn management, move legality,
//! captures, and check and checkmate detection.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod board;
mod config;
mod error;
mod game;
pub mod movegen;
mod piece;
mod session;
mod types;

pub use board::{Board, STANDARD_LAYOUT};
pub use config::{LegalityMode, RulesConfig};
pub use error::{Error, LayoutParseError, Result};
pub use game::{GameState, MoveFlags, MoveOutcome};
pub use movegen::MoveList;
pub use piece::{Piece, PieceFactory};
pub use session::Session;
pub use types::{Color, File, PieceKind, Position, Rank};
