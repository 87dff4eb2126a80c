// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::error::Result;

/// How strictly moves are validated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegalityMode {
    /// Any move that fits the piece's movement pattern is allowed, even if it leaves the mover's
    /// own king in check, and castling ignores attacked squares.
    PseudoLegal,
    /// Moves that leave the mover's own king in check are rejected, as are castles out of or
    /// through check.
    Strict,
}

impl Default for LegalityMode {
    fn default() -> LegalityMode {
        LegalityMode::PseudoLegal
    }
}

impl FromStr for LegalityMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<LegalityMode, String> {
        match s {
            "pseudo-legal" => Ok(LegalityMode::PseudoLegal),
            "strict" => Ok(LegalityMode::Strict),
            _ => Err(format!("unknown legality mode: {}", s)),
        }
    }
}

impl fmt::Display for LegalityMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LegalityMode::PseudoLegal => f.write_str("pseudo-legal"),
            LegalityMode::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    pub legality: LegalityMode,
}

impl RulesConfig {
    pub fn strict() -> RulesConfig {
        RulesConfig {
            legality: LegalityMode::Strict,
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RulesConfig> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RulesConfig> {
        let file = File::open(path)?;
        RulesConfig::from_reader(file)
    }
}
