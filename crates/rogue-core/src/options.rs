//! Generator options and configuration
//!
//! Options are read from a nethackrc-style file:
//!
//! ```text
//! # comment
//! OPTIONS=width:70,height:40,rooms:10
//! OPTIONS=seed:42,format:json,rooms_json
//! ```

use std::path::Path;

use thiserror::Error;

use crate::{DEFAULT_HEIGHT, DEFAULT_ROOM_NUM, DEFAULT_WIDTH};

/// How a generated map is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line of symbols per row
    #[default]
    Text,
    /// Flat JSON document with the mesh as cell codes
    Json,
}

/// User-configurable generator options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub width: i32,
    pub height: i32,
    pub room_num: i32,
    /// Fixed seed; `None` draws one at random
    pub seed: Option<i64>,
    pub format: OutputFormat,
    /// Include the room list in JSON output
    pub include_rooms: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            room_num: DEFAULT_ROOM_NUM,
            seed: None,
            format: OutputFormat::Text,
            include_rooms: false,
        }
    }
}

impl GeneratorOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                    options.parse_option(opt)?;
                }
            }
        }

        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        // Handle negation
        let (negated, name) = if let Some(name) = opt.strip_prefix('!') {
            (true, name)
        } else if let Some(name) = opt.strip_prefix("no") {
            (true, name)
        } else {
            (false, opt)
        };
        self.set_bool_option(name, !negated)
    }

    /// Set a boolean option
    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "rooms_json" => self.include_rooms = value,
            "seed" if !value => self.seed = None,
            "width" | "height" | "rooms" | "room_num" | "format" | "seed" => {
                return Err(OptionsError::MissingValue(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Set an option with a value
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "width" => self.width = value.parse().map_err(|_| invalid())?,
            "height" => self.height = value.parse().map_err(|_| invalid())?,
            "rooms" | "room_num" => self.room_num = value.parse().map_err(|_| invalid())?,
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            "format" => {
                self.format = match value.to_lowercase().as_str() {
                    "text" | "txt" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    _ => return Err(invalid()),
                };
            }
            "rooms_json" => {
                self.include_rooms = match value.to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(invalid()),
                };
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        std::fs::write(path, self.to_config_string())?;
        Ok(())
    }

    /// Write the options back out in config file form
    pub fn to_config_string(&self) -> String {
        let mut lines = vec!["# rogue generator options".to_string()];

        let mut opts = vec![
            format!("width:{}", self.width),
            format!("height:{}", self.height),
            format!("rooms:{}", self.room_num),
        ];
        if let Some(seed) = self.seed {
            opts.push(format!("seed:{seed}"));
        }
        lines.push(format!("OPTIONS={}", opts.join(",")));

        let format = match self.format {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        let rooms_json = if self.include_rooms { "rooms_json" } else { "!rooms_json" };
        lines.push(format!("OPTIONS=format:{format},{rooms_json}"));

        lines.join("\n") + "\n"
    }
}

/// Error type for options parsing
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}
