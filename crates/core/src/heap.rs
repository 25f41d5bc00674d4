//! The bump-pointer heap.
//!
//! Froth never frees; a quotation body, once built, lives for the rest of
//! the run. The heap is a fixed-size byte array with a single monotonic
//! pointer, and two allocation entry points: [`Heap::alloc_bytes`] for raw,
//! unaligned byte ranges (name strings copied in from tokens) and
//! [`Heap::alloc_cells`] for cell-aligned ranges (quotation bodies, so that
//! later indexing by cell offset never straddles a byte boundary).

use crate::cell::{Cell, Raw};
use crate::error::FrothError;

const CELL_SIZE: usize = core::mem::size_of::<Raw>();

/// Fixed-capacity bump-pointer heap.
pub struct Heap {
    data: Box<[u8]>,
    pointer: usize,
}

impl Heap {
    /// Create a heap of `size` bytes.
    ///
    /// Fails with [`FrothError::ValueOverflow`] if `size` exceeds what a
    /// `QuoteRef`/`StringRef` payload can address: every byte offset up to
    /// `Cell::max_payload()` must fit in a cell payload, so the heap itself
    /// can never be larger than `Cell::max_payload() + 1` bytes.
    pub fn new(size: usize) -> Result<Heap, FrothError> {
        let max_addressable = (Cell::max_payload() as i128) + 1;
        if (size as i128) > max_addressable {
            return Err(FrothError::ValueOverflow);
        }
        Ok(Heap {
            data: vec![0u8; size].into_boxed_slice(),
            pointer: 0,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn used(&self) -> usize {
        self.pointer
    }

    /// Allocate `size` unaligned bytes. Returns the byte offset of the
    /// first byte.
    pub fn alloc_bytes(&mut self, size: usize) -> Result<usize, FrothError> {
        let end = self
            .pointer
            .checked_add(size)
            .ok_or(FrothError::HeapOutOfMemory)?;
        if end > self.data.len() {
            return Err(FrothError::HeapOutOfMemory);
        }
        let start = self.pointer;
        self.pointer = end;
        Ok(start)
    }

    /// Allocate `count` cells, aligned to `CELL_SIZE`. Returns the byte
    /// offset of the first cell.
    pub fn alloc_cells(&mut self, count: usize) -> Result<usize, FrothError> {
        let aligned = (self.pointer + (CELL_SIZE - 1)) & !(CELL_SIZE - 1);
        let size = count
            .checked_mul(CELL_SIZE)
            .ok_or(FrothError::HeapOutOfMemory)?;
        let end = aligned.checked_add(size).ok_or(FrothError::HeapOutOfMemory)?;
        if end > self.data.len() {
            return Err(FrothError::HeapOutOfMemory);
        }
        self.pointer = end;
        Ok(aligned)
    }

    /// Copy `bytes` into the heap starting at `offset`. Caller must have
    /// already reserved that range via [`Heap::alloc_bytes`].
    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Read a byte slice back out of the heap.
    #[must_use]
    pub fn read_bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Read a heap-resident name as a UTF-8 string slice, up to (but not
    /// including) the first NUL byte, following the null-terminated
    /// convention slot names are stored under.
    #[must_use]
    pub fn read_c_str(&self, offset: usize) -> &str {
        let rest = &self.data[offset..];
        let len = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        core::str::from_utf8(&rest[..len]).unwrap_or("")
    }

    /// Write a single cell at a byte offset previously reserved via
    /// [`Heap::alloc_cells`] (or an offset within such a reservation).
    pub fn write_cell(&mut self, byte_offset: usize, cell: Cell) {
        let bytes = cell.raw().to_ne_bytes();
        self.data[byte_offset..byte_offset + CELL_SIZE].copy_from_slice(bytes.as_ref());
    }

    /// Read a single cell at a byte offset.
    #[must_use]
    pub fn read_cell(&self, byte_offset: usize) -> Cell {
        let mut bytes = [0u8; CELL_SIZE];
        bytes.copy_from_slice(&self.data[byte_offset..byte_offset + CELL_SIZE]);
        Cell::from_raw(Raw::from_ne_bytes(bytes))
    }

    /// Write `count` cells starting at `byte_offset`, in order.
    pub fn write_cells(&mut self, byte_offset: usize, cells: &[Cell]) {
        for (i, cell) in cells.iter().enumerate() {
            self.write_cell(byte_offset + i * CELL_SIZE, *cell);
        }
    }

    /// Cell offset arithmetic: the byte offset of the `index`-th cell
    /// starting at `base`.
    #[must_use]
    pub fn cell_offset(base: usize, index: usize) -> usize {
        base + index * CELL_SIZE
    }
}
