// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io;
use std::process;

use clap::{App, Arg, ArgMatches, SubCommand};
use gambit::{Board, GameState, LegalityMode, Position, RulesConfig, Session};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("config")
                .help("JSON file with rule settings")
                .value_name("FILE")
                .short("-c")
                .long("--config")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("legality")
                .help("Move validation mode, overrides the config file")
                .value_name("MODE")
                .short("-l")
                .long("--legality")
                .possible_values(&["pseudo-legal", "strict"])
                .takes_value(true),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the moves of the piece on a square")
                .arg(
                    Arg::with_name("LAYOUT")
                        .help("Piece placement of a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("SQUARE")
                        .help("Square of the piece, such as e2")
                        .required(true)
                        .index(2),
                ),
        )
        .get_matches();

    let config = load_config(&matches);
    if let Some(sub) = matches.subcommand_matches("moves") {
        run_moves(config, sub);
    }

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = session.run(stdin.lock(), stdout.lock()) {
        eprintln!("i/o error: {}", err);
        process::exit(1);
    }
}

fn load_config(matches: &ArgMatches) -> RulesConfig {
    let mut config = match matches.value_of("config") {
        Some(path) => match RulesConfig::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to load {}: {}", path, err);
                process::exit(1);
            }
        },
        None => RulesConfig::default(),
    };

    if matches.is_present("legality") {
        config.legality = value_t_or_exit!(matches, "legality", LegalityMode);
    }

    config
}

fn run_moves(config: RulesConfig, matches: &ArgMatches) -> ! {
    let layout = matches.value_of("LAYOUT").unwrap();
    let square = matches.value_of("SQUARE").unwrap();
    let board = match Board::from_layout(layout) {
        Ok(board) => board,
        Err(err) => {
            println!("invalid layout: {}", err);
            process::exit(1);
        }
    };

    let pos = match square.parse::<Position>() {
        Ok(pos) => pos,
        Err(err) => {
            println!("{}", err);
            process::exit(1);
        }
    };

    println!("layout: {}", layout);
    println!("rules:  {}", config.legality);
    println!();
    println!("{}", board);
    println!();

    let game = GameState::new(config, board);
    let piece = match game.board().occupant_at(pos) {
        Some(piece) => *piece,
        None => {
            println!("no piece on {}", pos);
            process::exit(1);
        }
    };

    let moves = game.get_possible_moves(&piece);
    let names: Vec<String> = moves.iter().map(|mov| mov.to_string()).collect();
    println!("{} on {}: {}", piece.kind.tag(), pos, names.join(" "));
    process::exit(0);
}
