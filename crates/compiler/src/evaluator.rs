//! The evaluator: consumes a token stream and drives its effects onto the
//! data stack and heap.
//!
//! Top-level dispatch pushes immediate cells (`Number`), resolves or
//! creates slots for bare words (`Identifier`, `TickIdentifier`), and
//! recurses into a quotation builder on `[` that forward-patches the
//! quotation's length cell once its closing `]` is found.

use froth_core::cell::{Cell, Tag};
use froth_core::error::FrothError;
use froth_core::interpreter::Interpreter;
use froth_core::slot_table::SlotIndex;

use crate::reader::{Reader, Token};

/// Called instead of pushing a `Call` cell for a top-level bare word, when
/// set. No execution engine exists in this crate, so by default (no
/// invoker registered) a top-level `Identifier` still just pushes its
/// `Call` cell, a provisional behavior documented rather than silently
/// changed. Registering an invoker is the seam a future execution engine
/// plugs into.
pub type Invoker = Box<dyn FnMut(&mut Interpreter, SlotIndex) -> Result<(), FrothError>>;

/// Holds the optional invoker hook across a sequence of `evaluate` calls
/// (e.g. successive REPL lines sharing one evaluator).
#[derive(Default)]
pub struct Evaluator {
    invoker: Option<Invoker>,
}

impl Evaluator {
    #[must_use]
    pub fn new() -> Evaluator {
        Evaluator { invoker: None }
    }

    /// Register a hook to call instead of pushing a `Call` cell for
    /// top-level bare words. Pass `None` to restore the default
    /// push-as-`Call` behavior.
    pub fn set_invoker(&mut self, invoker: Option<Invoker>) {
        self.invoker = invoker;
    }

    /// Evaluate `input` against `interp`, start to finish.
    pub fn evaluate(&mut self, input: &str, interp: &mut Interpreter) -> Result<(), FrothError> {
        let mut reader = Reader::new(input);

        loop {
            let token = reader.next_token()?;
            match token {
                Token::Eof => return Ok(()),
                Token::Number(n) => {
                    let cell = Cell::new(n, Tag::Number)?;
                    interp.data_stack.push(cell)?;
                }
                Token::Identifier(name) => {
                    let index = interp.resolve_or_create(&name)?;
                    if let Some(invoker) = self.invoker.as_mut() {
                        invoker(interp, index)?;
                    } else {
                        let cell = Interpreter::call_cell(index)?;
                        interp.data_stack.push(cell)?;
                    }
                }
                Token::TickIdentifier(name) => {
                    let index = interp.resolve_or_create(&name)?;
                    let cell = Interpreter::slot_ref_cell(index)?;
                    interp.data_stack.push(cell)?;
                }
                Token::OpenBracket => {
                    let quote_cell = build_quotation(&mut reader, interp)?;
                    interp.data_stack.push(quote_cell)?;
                }
                Token::CloseBracket => {
                    // No quotation is open at top level. Treated as a lexical error.
                    return Err(FrothError::UnterminatedQuotation);
                }
            }
        }
    }
}

/// Build one quotation body, having already consumed its opening `[`.
/// Recurses for nested quotations; the reader's position is shared across
/// nesting levels, so this is single-pass regardless of nesting depth.
fn build_quotation(reader: &mut Reader, interp: &mut Interpreter) -> Result<Cell, FrothError> {
    let quote_start = interp.heap.alloc_cells(1)?;
    let mut length: usize = 0;

    loop {
        let token = reader.next_token()?;
        match token {
            Token::CloseBracket => {
                interp
                    .heap
                    .write_cell(quote_start, Cell::from_index(length, Tag::Number)?);
                return Cell::new(quote_start as froth_core::cell::Raw, Tag::QuoteRef);
            }
            Token::Eof => {
                return Err(FrothError::UnterminatedQuotation);
            }
            Token::Number(n) => {
                let offset = interp.heap.alloc_cells(1)?;
                interp.heap.write_cell(offset, Cell::new(n, Tag::Number)?);
                length += 1;
            }
            Token::Identifier(name) => {
                let offset = interp.heap.alloc_cells(1)?;
                let index = interp.resolve_or_create(&name)?;
                interp
                    .heap
                    .write_cell(offset, Interpreter::call_cell(index)?);
                length += 1;
            }
            Token::TickIdentifier(name) => {
                let offset = interp.heap.alloc_cells(1)?;
                let index = interp.resolve_or_create(&name)?;
                interp
                    .heap
                    .write_cell(offset, Interpreter::slot_ref_cell(index)?);
                length += 1;
            }
            Token::OpenBracket => {
                let nested = build_quotation(reader, interp)?;
                let offset = interp.heap.alloc_cells(1)?;
                interp.heap.write_cell(offset, nested);
                length += 1;
            }
        }
    }
}
