//! Optional `froth.toml` overrides for `froth-core`'s [`Limits`].
//!
//! The core's sizes (heap, stacks, slot table) default to reasonable
//! example values (`Limits::default`); a `froth.toml` in the working
//! directory can override any subset of them, parsed through a
//! `serde::Deserialize` struct with `toml::from_str` rather than
//! hand-rolling a parser.

use std::fmt;
use std::path::Path;

use froth_core::interpreter::Limits;
use serde::Deserialize;

/// All fields optional: an absent key in `froth.toml` leaves the
/// corresponding `Limits::default()` value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub heap_size: Option<usize>,
    pub ds_capacity: Option<usize>,
    pub rs_capacity: Option<usize>,
    pub cs_capacity: Option<usize>,
    pub slot_table_size: Option<usize>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(e) => write!(f, "failed to read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigFile {
    /// Load and parse `path` as a `froth.toml` document.
    pub fn load(path: &Path) -> Result<ConfigFile, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        toml::from_str(&text).map_err(ConfigError::Parse)
    }

    /// Apply this file's overrides on top of `base`, leaving unset fields
    /// at their `base` value.
    #[must_use]
    pub fn apply(&self, base: Limits) -> Limits {
        Limits {
            heap_size: self.heap_size.unwrap_or(base.heap_size),
            ds_capacity: self.ds_capacity.unwrap_or(base.ds_capacity),
            rs_capacity: self.rs_capacity.unwrap_or(base.rs_capacity),
            cs_capacity: self.cs_capacity.unwrap_or(base.cs_capacity),
            slot_table_size: self.slot_table_size.unwrap_or(base.slot_table_size),
        }
    }
}
