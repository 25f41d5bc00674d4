//! froth's platform layer, line REPL, stack-print rendering, and optional
//! `froth.toml` configuration, built on top of `froth-core` and
//! `froth-compiler`.
//!
//! # Modules
//!
//! - `platform`: the byte-level I/O trait the REPL drives against
//! - `repl`: the read/eval/print loop
//! - `format`: the stack-print rendering rules
//! - `config`: optional `froth.toml` overrides for `froth_core::Limits`

pub mod config;
pub mod format;
pub mod platform;
pub mod repl;

pub use config::ConfigFile;
pub use platform::{Platform, StdioPlatform};
pub use repl::Repl;
