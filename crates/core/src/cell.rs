//! The tagged cell: froth's universal machine word.
//!
//! A [`Cell`] packs a 3-bit tag into the low bits of a signed integer, the
//! rest being the payload. Tag 0 (`Number`) leaves the tag bits clear so
//! that two packed `Number` cells add/subtract as raw integers and still
//! decode as a `Number` holding the arithmetic result, as long as the sum
//! doesn't overflow the payload range (Invariant C-1).
//!
//! The integer width backing a `Cell` is chosen at compile time via the
//! `cell8`/`cell16`/`cell32`/`cell64` features, so a single build swaps the
//! runtime's value representation without touching call sites.

use crate::error::FrothError;

#[cfg(feature = "cell8")]
mod width {
    pub type Raw = i8;
    pub const BITS: u32 = 8;
}
#[cfg(all(feature = "cell16", not(feature = "cell8")))]
mod width {
    pub type Raw = i16;
    pub const BITS: u32 = 16;
}
#[cfg(all(
    feature = "cell32",
    not(any(feature = "cell8", feature = "cell16"))
))]
mod width {
    pub type Raw = i32;
    pub const BITS: u32 = 32;
}
#[cfg(all(
    feature = "cell64",
    not(any(feature = "cell8", feature = "cell16", feature = "cell32"))
))]
mod width {
    pub type Raw = i64;
    pub const BITS: u32 = 64;
}
#[cfg(not(any(
    feature = "cell8",
    feature = "cell16",
    feature = "cell32",
    feature = "cell64"
)))]
compile_error!(
    "froth-core requires exactly one of the `cell8`, `cell16`, `cell32`, `cell64` features"
);

/// The signed integer type backing [`Cell`] for this build.
pub use width::Raw;
/// Width of [`Raw`] in bits.
pub use width::BITS as CELL_SIZE_BITS;

/// Width of the tag field, in bits. Fixed by the ABI, not configurable.
pub const TAG_BITS: u32 = 3;

const TAG_MASK: Raw = 0x7;

/// The tag of a [`Cell`].
///
/// `Reserved` is tag value 7. Decoding never fails on it, since there is
/// nowhere to bubble an error to for a bare tag read, but every consumer
/// that renders or interprets a cell must treat it as unrepresentable, the
/// same way the REPL's stack-print format falls back to `<?>` for anything
/// it doesn't recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Number = 0,
    QuoteRef = 1,
    SlotRef = 2,
    PatternRef = 3,
    StringRef = 4,
    ContractRef = 5,
    Call = 6,
    Reserved = 7,
}

impl Tag {
    /// Decode a tag from its raw 3-bit value. `bits` is masked to 3 bits,
    /// so this is infallible.
    #[must_use]
    pub fn from_bits(bits: u8) -> Tag {
        match bits & 0x7 {
            0 => Tag::Number,
            1 => Tag::QuoteRef,
            2 => Tag::SlotRef,
            3 => Tag::PatternRef,
            4 => Tag::StringRef,
            5 => Tag::ContractRef,
            6 => Tag::Call,
            _ => Tag::Reserved,
        }
    }

    #[must_use]
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// A single tagged machine word: the universal unit of the data stack,
/// return stack, call stack, and heap contents.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Cell(Raw);

impl Cell {
    /// Maximum signed payload value that fits in the `CELL_SIZE_BITS -
    /// TAG_BITS` bits left over once the tag is packed in, i.e. a signed
    /// field of that width has range `±2^((CELL_SIZE_BITS - TAG_BITS) - 1)`.
    #[must_use]
    pub fn max_payload() -> Raw {
        (1 as Raw << (CELL_SIZE_BITS - TAG_BITS - 1)) - 1
    }

    /// Minimum signed payload value that fits in the `CELL_SIZE_BITS -
    /// TAG_BITS` bits left over once the tag is packed in.
    #[must_use]
    pub fn min_payload() -> Raw {
        -(1 as Raw << (CELL_SIZE_BITS - TAG_BITS - 1))
    }

    /// Pack `value` and `tag` into a cell.
    ///
    /// Fails with [`FrothError::ValueOverflow`] when `value` doesn't fit in
    /// the `CELL_SIZE_BITS - TAG_BITS` signed payload bits (leaving the top
    /// bit free so `value << TAG_BITS` itself never overflows `Raw`).
    /// Reference tags (`QuoteRef`, `SlotRef`, ...) carry unsigned
    /// offsets/indices in practice; callers are responsible for only ever
    /// handing in non-negative values for those tags; this function itself
    /// applies the signed range uniformly to preserve `Number`'s sign-bit
    /// behavior. `Tag::Reserved` is never constructible through this
    /// function; it fails with [`FrothError::ValueOverflow`] regardless of
    /// `value`, since tag 7 is reserved and must be rejected, not built.
    pub fn new(value: Raw, tag: Tag) -> Result<Cell, FrothError> {
        if tag == Tag::Reserved {
            return Err(FrothError::ValueOverflow);
        }
        if value < Self::min_payload() || value > Self::max_payload() {
            return Err(FrothError::ValueOverflow);
        }
        Ok(Cell((value << TAG_BITS) | (tag.bits() as Raw)))
    }

    /// Pack an unsigned offset/index into a cell, checking it fits.
    ///
    /// Convenience wrapper over [`Cell::new`] for the common case of
    /// building a `QuoteRef`/`SlotRef`/`Call` cell from a `usize` offset or
    /// index, rejecting values that don't fit in `Raw` or in the payload
    /// range.
    pub fn from_index(index: usize, tag: Tag) -> Result<Cell, FrothError> {
        let value = Raw::try_from(index).map_err(|_| FrothError::ValueOverflow)?;
        Cell::new(value, tag)
    }

    /// Reinterpret a raw bit pattern as a cell without validation. Used when
    /// reading a word already stored on the heap or a stack, where the bits
    /// are known-valid by construction (Invariant H-1).
    #[must_use]
    pub fn from_raw(raw: Raw) -> Cell {
        Cell(raw)
    }

    /// The cell's raw bit pattern.
    #[must_use]
    pub fn raw(self) -> Raw {
        self.0
    }

    /// The low 3 bits: the cell's tag.
    #[must_use]
    pub fn tag(self) -> Tag {
        Tag::from_bits((self.0 & TAG_MASK) as u8)
    }

    /// The payload, recovered by arithmetic (sign-extending) right shift.
    /// For reference tags this is a signed view of what is conventionally
    /// an unsigned offset/index; callers must validate non-negativity
    /// before treating it as one.
    #[must_use]
    pub fn payload(self) -> Raw {
        self.0 >> TAG_BITS
    }

    /// The payload as a `usize` offset/index. Fails if the payload is
    /// negative (not a valid offset/index) or doesn't fit in `usize`.
    pub fn payload_as_index(self) -> Result<usize, FrothError> {
        usize::try_from(self.payload()).map_err(|_| FrothError::ValueOverflow)
    }

    #[must_use]
    pub fn is_number(self) -> bool {
        self.tag() == Tag::Number
    }
}

impl core::fmt::Debug for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cell")
            .field("tag", &self.tag())
            .field("payload", &self.payload())
            .finish()
    }
}

/// Raw bit-pattern addition of two cells.
///
/// Only meaningful when both operands are `Number` cells (Invariant C-1):
/// the tag bits stay zero through the add, so the sum decodes as a `Number`
/// holding `x + y`, as long as it doesn't overflow the payload range. This
/// operation does not check that; callers that need the checked form should
/// go through `Cell::new(a.payload() + b.payload(), Tag::Number)` instead.
impl core::ops::Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell(self.0.wrapping_add(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn payload_range() -> core::ops::RangeInclusive<Raw> {
        Cell::min_payload()..=Cell::max_payload()
    }

    fn any_tag() -> impl Strategy<Value = Tag> {
        prop_oneof![
            Just(Tag::Number),
            Just(Tag::QuoteRef),
            Just(Tag::SlotRef),
            Just(Tag::PatternRef),
            Just(Tag::StringRef),
            Just(Tag::ContractRef),
            Just(Tag::Call),
        ]
    }

    proptest! {
        /// Property 1: pack/unpack round-trips for every in-range value and tag.
        #[test]
        fn pack_unpack_round_trips(v in payload_range(), tag in any_tag()) {
            let cell = Cell::new(v, tag).expect("value is in range");
            prop_assert_eq!(cell.tag(), tag);
            prop_assert_eq!(cell.payload(), v);
        }

        /// Property 2: Number arithmetic on packed cells matches raw bit addition.
        #[test]
        fn number_addition_matches_raw_bits(
            x in Cell::min_payload() / 2..=Cell::max_payload() / 2,
            y in Cell::min_payload() / 2..=Cell::max_payload() / 2,
        ) {
            let a = Cell::new(x, Tag::Number).unwrap();
            let b = Cell::new(y, Tag::Number).unwrap();
            let sum = Cell::new(x + y, Tag::Number).unwrap();
            prop_assert_eq!((a + b).raw(), sum.raw());
        }
    }

    #[test]
    fn overflow_above_max_rejected() {
        let over = Cell::max_payload() + 1;
        assert_eq!(Cell::new(over, Tag::Number), Err(FrothError::ValueOverflow));
    }

    #[test]
    fn overflow_below_min_rejected() {
        let under = Cell::min_payload() - 1;
        assert_eq!(
            Cell::new(under, Tag::Number),
            Err(FrothError::ValueOverflow)
        );
    }

    #[test]
    fn boundary_values_accepted() {
        assert!(Cell::new(Cell::max_payload(), Tag::Number).is_ok());
        assert!(Cell::new(Cell::min_payload(), Tag::Number).is_ok());
    }

    #[test]
    fn boundary_values_round_trip_not_just_accept() {
        let max_cell = Cell::new(Cell::max_payload(), Tag::Number).unwrap();
        assert_eq!(max_cell.payload(), Cell::max_payload());
        let min_cell = Cell::new(Cell::min_payload(), Tag::Number).unwrap();
        assert_eq!(min_cell.payload(), Cell::min_payload());
    }

    #[test]
    fn reserved_tag_is_never_constructible() {
        assert_eq!(
            Cell::new(0, Tag::Reserved),
            Err(FrothError::ValueOverflow)
        );
        assert_eq!(
            Cell::from_index(0, Tag::Reserved),
            Err(FrothError::ValueOverflow)
        );
    }

    #[test]
    fn tag_round_trips_through_bits() {
        for tag in [
            Tag::Number,
            Tag::QuoteRef,
            Tag::SlotRef,
            Tag::PatternRef,
            Tag::StringRef,
            Tag::ContractRef,
            Tag::Call,
        ] {
            assert_eq!(Tag::from_bits(tag.bits()), tag);
        }
        assert_eq!(Tag::from_bits(7), Tag::Reserved);
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        let too_big = (Cell::max_payload() as i128 + 1) as usize;
        assert_eq!(
            Cell::from_index(too_big, Tag::QuoteRef),
            Err(FrothError::ValueOverflow)
        );
    }
}
