//! froth - a line REPL for the froth concatenative language.
//!
//! Reads whitespace-separated tokens from stdin, evaluates them against a
//! shared data stack, and prints the stack after each line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use froth_core::interpreter::{Interpreter, Limits};
use froth_repl::config::ConfigFile;
use froth_repl::platform::StdioPlatform;
use froth_repl::repl::Repl;

#[derive(Parser)]
#[command(name = "froth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Line REPL for the froth concatenative language", long_about = None)]
struct Args {
    /// Path to a froth.toml overriding the default heap/stack/slot-table sizes
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let limits = match load_limits(args.config.as_deref()) {
        Ok(limits) => limits,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let interp = match Interpreter::new(limits) {
        Ok(interp) => interp,
        Err(err) => {
            eprintln!("failed to initialize interpreter: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut repl = Repl::new(StdioPlatform::new(), interp);
    match repl.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => {
            // `run` only returns once the platform reports an I/O error
            // (e.g. stdin closed), which ends the session, not the process
            // abnormally.
            ExitCode::SUCCESS
        }
    }
}

fn load_limits(config_path: Option<&std::path::Path>) -> Result<Limits, String> {
    match config_path {
        Some(path) => {
            let file = ConfigFile::load(path).map_err(|e| e.to_string())?;
            tracing::debug!(path = %path.display(), "loaded froth.toml");
            Ok(file.apply(Limits::default()))
        }
        None => Ok(Limits::default()),
    }
}
