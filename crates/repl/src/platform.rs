//! The platform layer: byte-level I/O the REPL drives against.
//!
//! `emit` writes one byte, `key` reads one byte (blocking), `key_ready`
//! polls without blocking. Kept as a trait so the REPL loop itself has no
//! direct stdio dependency.

use froth_core::FrothError;
use std::io::{Read, Write};

pub trait Platform {
    fn emit(&mut self, byte: u8) -> Result<(), FrothError>;
    fn key(&mut self) -> Result<u8, FrothError>;
    fn key_ready(&mut self) -> bool;
}

/// `Platform` over process stdin/stdout.
///
/// `key_ready` is best-effort: without a portable non-blocking stdin poll
/// in the standard library, this always reports `true`. Readiness is
/// advisory rather than a contract the reader depends on; the REPL's line
/// reader never calls it, only `key`.
pub struct StdioPlatform {
    stdin: std::io::Stdin,
    stdout: std::io::Stdout,
}

impl StdioPlatform {
    #[must_use]
    pub fn new() -> StdioPlatform {
        StdioPlatform {
            stdin: std::io::stdin(),
            stdout: std::io::stdout(),
        }
    }
}

impl Default for StdioPlatform {
    fn default() -> StdioPlatform {
        StdioPlatform::new()
    }
}

impl Platform for StdioPlatform {
    fn emit(&mut self, byte: u8) -> Result<(), FrothError> {
        self.stdout.write_all(&[byte]).map_err(|_| FrothError::Io)?;
        self.stdout.flush().map_err(|_| FrothError::Io)
    }

    fn key(&mut self) -> Result<u8, FrothError> {
        let mut buf = [0u8; 1];
        match self.stdin.read(&mut buf) {
            Ok(0) => Err(FrothError::Io),
            Ok(_) => Ok(buf[0]),
            Err(_) => Err(FrothError::Io),
        }
    }

    fn key_ready(&mut self) -> bool {
        true
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::BufferPlatform;
    use super::*;

    #[test]
    fn buffer_platform_round_trips() {
        let mut platform = BufferPlatform::new("ab");
        assert!(platform.key_ready());
        assert_eq!(platform.key().unwrap(), b'a');
        assert_eq!(platform.key().unwrap(), b'b');
        assert_eq!(platform.key(), Err(FrothError::Io));
        platform.emit(b'x').unwrap();
        assert_eq!(platform.output, vec![b'x']);
    }
}
