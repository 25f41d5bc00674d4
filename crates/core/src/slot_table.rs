//! Name → slot-index binding.
//!
//! A slot's name lives in the heap (copied in by [`SlotTable::create`]), so
//! the table itself only stores an offset into it plus an `impl` cell
//! (typically a `QuoteRef` written in by the evaluator) and an optional
//! primitive function pointer for built-ins implemented natively rather
//! than as froth quotations.

use crate::cell::Cell;
use crate::error::FrothError;
use crate::heap::Heap;

/// A primitive's native implementation, a function-pointer field analogous
/// to a C vtable entry. Unlike `impl`, which is interpreted by the (future)
/// execution engine, a primitive has no froth representation and is called
/// directly.
pub type PrimitiveFn = fn(&mut crate::interpreter::Interpreter) -> Result<(), FrothError>;

/// A slot-table index. Newtype so it can't be confused with a raw `usize`
/// offset elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(pub usize);

struct Slot {
    name_offset: usize,
    name_len: usize,
    populated: bool,
    implementation: Cell,
    prim: Option<PrimitiveFn>,
}

/// Linear-scan name → index table, bounded to `capacity` entries.
pub struct SlotTable {
    slots: Vec<Slot>,
    capacity: usize,
}

impl SlotTable {
    #[must_use]
    pub fn new(capacity: usize) -> SlotTable {
        SlotTable {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Linear scan for a slot by name. `heap` is needed to read back the
    /// stored names.
    pub fn find_name(&self, name: &str, heap: &Heap) -> Result<SlotIndex, FrothError> {
        for (i, slot) in self.slots.iter().enumerate() {
            let stored = heap.read_bytes(slot.name_offset, slot.name_len);
            if stored == name.as_bytes() {
                return Ok(SlotIndex(i));
            }
        }
        Err(FrothError::SlotNameNotFound)
    }

    /// Copy `name` into the heap and create a new, unpopulated slot for it.
    /// Does not check for an existing slot with the same name. Callers
    /// wanting idempotence must `find_name` first (see
    /// [`crate::interpreter::Interpreter::resolve_or_create`]).
    pub fn create(&mut self, name: &str, heap: &mut Heap) -> Result<SlotIndex, FrothError> {
        if self.slots.len() >= self.capacity {
            return Err(FrothError::SlotTableFull);
        }
        let bytes = name.as_bytes();
        let mut buf = Vec::with_capacity(bytes.len() + 1);
        buf.extend_from_slice(bytes);
        buf.push(0);
        let name_offset = heap.alloc_bytes(buf.len())?;
        heap.write_bytes(name_offset, &buf);

        let index = SlotIndex(self.slots.len());
        self.slots.push(Slot {
            name_offset,
            name_len: bytes.len(),
            populated: true,
            implementation: Cell::default(),
            prim: None,
        });
        Ok(index)
    }

    fn slot(&self, index: SlotIndex) -> Result<&Slot, FrothError> {
        let slot = self
            .slots
            .get(index.0)
            .ok_or(FrothError::SlotIndexEmpty)?;
        if !slot.populated {
            return Err(FrothError::SlotIndexEmpty);
        }
        Ok(slot)
    }

    fn slot_mut(&mut self, index: SlotIndex) -> Result<&mut Slot, FrothError> {
        let slot = self
            .slots
            .get_mut(index.0)
            .ok_or(FrothError::SlotIndexEmpty)?;
        if !slot.populated {
            return Err(FrothError::SlotIndexEmpty);
        }
        Ok(slot)
    }

    pub fn get_impl(&self, index: SlotIndex) -> Result<Cell, FrothError> {
        Ok(self.slot(index)?.implementation)
    }

    pub fn set_impl(&mut self, index: SlotIndex, implementation: Cell) -> Result<(), FrothError> {
        self.slot_mut(index)?.implementation = implementation;
        Ok(())
    }

    pub fn get_prim(&self, index: SlotIndex) -> Result<Option<PrimitiveFn>, FrothError> {
        Ok(self.slot(index)?.prim)
    }

    pub fn set_prim(&mut self, index: SlotIndex, prim: PrimitiveFn) -> Result<(), FrothError> {
        self.slot_mut(index)?.prim = Some(prim);
        Ok(())
    }

    /// Read a slot's name back out of the heap.
    pub fn get_name<'h>(&self, index: SlotIndex, heap: &'h Heap) -> Result<&'h str, FrothError> {
        let slot = self.slot(index)?;
        let bytes = heap.read_bytes(slot.name_offset, slot.name_len);
        core::str::from_utf8(bytes).map_err(|_| FrothError::SlotIndexEmpty)
    }
}
