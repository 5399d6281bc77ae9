//! Game options (options.c)
//!
//! Read from `OPTIONS=key:value,...` lines. Comments start with `#`.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MESSAGE_HISTORY;
use crate::player::PlayerClass;
use crate::world::difficulty::Difficulty;

/// Default hp percentage below which auto-explore hands control back
pub const DEFAULT_EXPLORE_STOP: u32 = 40;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),
    #[error("Missing value for option: {0}")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    pub class: PlayerClass,
    pub difficulty: Difficulty,
    /// Fixed seed; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Auto-explore stops below this hp percentage
    pub explore_stop: u32,
    pub msghistory: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            class: PlayerClass::default(),
            difficulty: Difficulty::default(),
            seed: None,
            explore_stop: DEFAULT_EXPLORE_STOP,
            msghistory: MESSAGE_HISTORY,
        }
    }
}

impl GameOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;
        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }
        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if opt.is_empty() {
            return Ok(());
        }
        match opt.split_once(':').or_else(|| opt.split_once('=')) {
            Some((key, value)) => self.set_option(key.trim(), value.trim()),
            None => Err(OptionsError::MissingValue(opt.to_string())),
        }
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());
        match name {
            "class" | "role" => self.class = PlayerClass::from_str(value).map_err(|_| invalid())?,
            "difficulty" => self.difficulty = Difficulty::from_str(value).map_err(|_| invalid())?,
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            "explore_stop" => {
                let pct: u32 = value.parse().map_err(|_| invalid())?;
                if pct > 100 {
                    return Err(invalid());
                }
                self.explore_stop = pct;
            }
            "msghistory" => self.msghistory = value.parse().map_err(|_| invalid())?,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Render back into config form
    pub fn to_config_string(&self) -> String {
        let mut parts = vec![
            format!("class:{}", self.class),
            format!("difficulty:{}", self.difficulty),
            format!("explore_stop:{}", self.explore_stop),
            format!("msghistory:{}", self.msghistory),
        ];
        if let Some(seed) = self.seed {
            parts.push(format!("seed:{}", seed));
        }
        format!("OPTIONS={}\n", parts.join(","))
    }
}
