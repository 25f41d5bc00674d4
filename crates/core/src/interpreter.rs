//! The interpreter context: the heap, the three stacks, and the slot table
//! bundled behind one `&mut` value.
//!
//! A process-wide singleton implementation would keep all of this as static
//! storage. Instead, every size is threaded through explicitly as a
//! [`Limits`] value passed to [`Interpreter::new`], giving process-wide
//! mutable state a Rust-native home as a plain value callers own.

use crate::cell::{Cell, Tag};
use crate::error::{FrothError, StackKind};
use crate::heap::Heap;
use crate::slot_table::{SlotIndex, SlotTable};
use crate::stack::Stack;

/// Capacities for every bounded resource the interpreter owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub heap_size: usize,
    pub ds_capacity: usize,
    pub rs_capacity: usize,
    pub cs_capacity: usize,
    pub slot_table_size: usize,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            heap_size: 65536,
            ds_capacity: 256,
            rs_capacity: 256,
            cs_capacity: 256,
            slot_table_size: 128,
        }
    }
}

/// The machine state: heap, data/return/call stacks, slot table.
pub struct Interpreter {
    pub heap: Heap,
    pub data_stack: Stack,
    pub return_stack: Stack,
    pub call_stack: Stack,
    pub slots: SlotTable,
}

impl Interpreter {
    pub fn new(limits: Limits) -> Result<Interpreter, FrothError> {
        Ok(Interpreter {
            heap: Heap::new(limits.heap_size)?,
            data_stack: Stack::new(StackKind::Data, limits.ds_capacity),
            return_stack: Stack::new(StackKind::Return, limits.rs_capacity),
            call_stack: Stack::new(StackKind::Call, limits.cs_capacity),
            slots: SlotTable::new(limits.slot_table_size),
        })
    }

    /// Find a slot by name, creating it if absent. Unifies the
    /// find-then-create pattern needed at every identifier-resolution call
    /// site (top level, inside the quotation builder, for both
    /// `Identifier` and `TickIdentifier` tokens).
    pub fn resolve_or_create(&mut self, name: &str) -> Result<SlotIndex, FrothError> {
        match self.slots.find_name(name, &self.heap) {
            Ok(index) => Ok(index),
            Err(FrothError::SlotNameNotFound) => self.slots.create(name, &mut self.heap),
            Err(other) => Err(other),
        }
    }

    /// Build a `Call` cell for `index`, checked against the cell payload
    /// range, the same style of check `Heap::new` applies to the
    /// heap-offset range.
    pub fn call_cell(index: SlotIndex) -> Result<Cell, FrothError> {
        Cell::from_index(index.0, Tag::Call)
    }

    /// Build a `SlotRef` cell for `index`.
    pub fn slot_ref_cell(index: SlotIndex) -> Result<Cell, FrothError> {
        Cell::from_index(index.0, Tag::SlotRef)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_spec_example_values() {
        let limits = Limits::default();
        assert_eq!(limits.heap_size, 65536);
        assert_eq!(limits.ds_capacity, 256);
        assert_eq!(limits.rs_capacity, 256);
        assert_eq!(limits.cs_capacity, 256);
        assert_eq!(limits.slot_table_size, 128);
    }

    #[test]
    fn resolve_or_create_is_idempotent() {
        let mut interp = Interpreter::new(Limits::default()).unwrap();
        let a = interp.resolve_or_create("dup").unwrap();
        let b = interp.resolve_or_create("dup").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn resolve_or_create_distinguishes_names() {
        let mut interp = Interpreter::new(Limits::default()).unwrap();
        let a = interp.resolve_or_create("dup").unwrap();
        let b = interp.resolve_or_create("swap").unwrap();
        assert_ne!(a, b);
    }
}
