// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::{self, BufRead, Write};

use crate::board::Board;
use crate::config::RulesConfig;
use crate::game::{GameState, MoveOutcome};
use crate::piece::Piece;
use crate::types::{PieceKind, Position};

/// Line-oriented text front end for a game. Reads one command per line and answers on the writer.
/// All chess logic is delegated to `GameState`; the session only decides when a turn ends.
pub struct Session {
    game: GameState,
}

impl Session {
    pub fn new(config: RulesConfig) -> Session {
        Session {
            game: GameState::standard(config),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn run<R, W>(&mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            let components: Vec<_> = line.split_whitespace().collect();
            match components.split_first().unwrap_or((&"", &[])) {
                (&"", []) => {}
                (&"quit", []) => break,
                (&"board", []) => write!(&mut writer, "{}", self.game.board())?,
                (&"layout", []) => writeln!(&mut writer, "{}", self.game.board().as_layout())?,
                (&"turn", []) => writeln!(&mut writer, "{}", self.game.get_current_turn())?,
                (&"new", []) => {
                    self.game.initialize_game(Board::standard());
                    writeln!(&mut writer, "ok")?;
                }
                (&"setup", args) => self.handle_setup(&mut writer, args)?,
                (&"moves", [square]) => self.handle_moves(&mut writer, square)?,
                (&"move", [from, to]) => self.handle_move(&mut writer, from, to)?,
                (&"promote", [kind]) => self.handle_promote(&mut writer, kind)?,
                (&word, []) if word.len() == 4 => {
                    let (from, to) = word.split_at(2);
                    self.handle_move(&mut writer, from, to)?
                }
                _ => writeln!(&mut writer, "unrecognized command")?,
            }
        }

        Ok(())
    }

    fn handle_setup<W: Write>(&mut self, w: &mut W, args: &[&str]) -> io::Result<()> {
        let (layout, side) = match args {
            [layout] => (layout, "w"),
            [layout, side] => (layout, *side),
            _ => return writeln!(w, "invalid setup command"),
        };

        let board = match Board::from_layout(layout) {
            Ok(board) => board,
            Err(err) => return writeln!(w, "invalid layout: {}", err),
        };

        self.game.initialize_game(board);
        match side {
            "w" => {}
            "b" => self.game.toggle_turn(),
            _ => return writeln!(w, "invalid side to move"),
        }

        writeln!(w, "ok")
    }

    fn handle_moves<W: Write>(&mut self, w: &mut W, square: &str) -> io::Result<()> {
        let pos = match square.parse::<Position>() {
            Ok(pos) => pos,
            Err(err) => return writeln!(w, "{}", err),
        };

        let piece = match self.game.board().occupant_at(pos) {
            Some(piece) => *piece,
            None => return writeln!(w, "empty"),
        };

        let moves = self.game.get_possible_moves(&piece);
        if moves.is_empty() {
            return writeln!(w, "none");
        }

        let names: Vec<String> = moves.iter().map(|mov| mov.to_string()).collect();
        writeln!(w, "{}", names.join(" "))
    }

    fn handle_move<W: Write>(&mut self, w: &mut W, from: &str, to: &str) -> io::Result<()> {
        if self.game.is_game_over() {
            return writeln!(w, "game over");
        }

        let (from, to) = match (from.parse::<Position>(), to.parse::<Position>()) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(err), _) | (_, Err(err)) => return writeln!(w, "{}", err),
        };

        let piece = match self.game.board().occupant_at(from) {
            Some(piece) => *piece,
            None => return writeln!(w, "illegal move"),
        };

        match self.game.execute_move(&piece, from, to) {
            MoveOutcome::Rejected => writeln!(w, "illegal move"),
            MoveOutcome::RequiresPromotionChoice { .. } => writeln!(w, "promote?"),
            MoveOutcome::Completed { .. } => self.finish_turn(w, &piece, to),
        }
    }

    fn handle_promote<W: Write>(&mut self, w: &mut W, kind: &str) -> io::Result<()> {
        let pos = match self.game.pending_promotion() {
            Some(pos) => pos,
            None => return writeln!(w, "no promotion pending"),
        };

        let kind = match kind.parse::<PieceKind>() {
            Ok(kind) => kind,
            Err(err) => return writeln!(w, "{}", err),
        };

        match self.game.complete_promotion(pos, kind) {
            Ok(promoted) => self.finish_turn(w, &promoted, pos),
            Err(err) => writeln!(w, "{}", err),
        }
    }

    fn finish_turn<W: Write>(&mut self, w: &mut W, piece: &Piece, to: Position) -> io::Result<()> {
        writeln!(w, "ok")?;
        if let Some(king) = self.game.checked_king(piece.color) {
            writeln!(w, "check {}", king)?;
        }

        self.game.toggle_turn();
        match self.game.check_game_over(piece, to) {
            Ok(true) => writeln!(w, "checkmate {}", self.game.get_current_turn()),
            Ok(false) => Ok(()),
            Err(err) => writeln!(w, "{}", err),
        }
    }
}
