//! REPL stack-print rendering.
//!
//! `[` followed by space-separated cell renderings, `]`, and a trailing
//! newline. A `Number` renders as a decimal integer; `QuoteRef` as
//! `Q:<offset>`; `SlotRef`/`Call` as `S:`/`C:` plus the slot's name (or its
//! raw index if the name can't be looked up); `PatternRef`/`StringRef`/
//! `ContractRef` as `P:`/`Str:`/`Con:` plus the raw payload; any other tag
//! as `<?>`.

use froth_core::cell::{Cell, Tag};
use froth_core::slot_table::SlotTable;
use froth_core::{Heap, Stack};

fn render_named(prefix: &str, cell: Cell, slots: &SlotTable, heap: &Heap) -> String {
    match cell.payload_as_index() {
        Ok(index) => match slots.get_name(froth_core::slot_table::SlotIndex(index), heap) {
            Ok(name) => format!("{prefix}:{name}"),
            Err(_) => format!("{prefix}:{index}"),
        },
        Err(_) => "<?>".to_string(),
    }
}

/// Render a single cell per the format above.
#[must_use]
pub fn render_cell(cell: Cell, slots: &SlotTable, heap: &Heap) -> String {
    match cell.tag() {
        Tag::Number => cell.payload().to_string(),
        Tag::QuoteRef => match cell.payload_as_index() {
            Ok(offset) => format!("Q:{offset}"),
            Err(_) => "<?>".to_string(),
        },
        Tag::SlotRef => render_named("S", cell, slots, heap),
        Tag::Call => render_named("C", cell, slots, heap),
        Tag::PatternRef => format!("P:{}", cell.payload()),
        Tag::StringRef => format!("Str:{}", cell.payload()),
        Tag::ContractRef => format!("Con:{}", cell.payload()),
        Tag::Reserved => "<?>".to_string(),
    }
}

/// Render an entire stack bottom-to-top as `[c0 c1 ... cn]\n`.
#[must_use]
pub fn render_stack(stack: &Stack, slots: &SlotTable, heap: &Heap) -> String {
    let mut out = String::from("[");
    for (i, cell) in stack.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&render_cell(*cell, slots, heap));
    }
    out.push_str("]\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use froth_core::cell::Raw;
    use froth_core::interpreter::{Interpreter, Limits};

    fn number(n: Raw) -> Cell {
        Cell::new(n, Tag::Number).unwrap()
    }

    #[test]
    fn scenario_e1_numbers() {
        let interp = Interpreter::new(Limits::default()).unwrap();
        let mut stack = Stack::new(froth_core::StackKind::Data, 8);
        stack.push(number(1)).unwrap();
        stack.push(number(2)).unwrap();
        stack.push(number(3)).unwrap();
        assert_eq!(
            render_stack(&stack, &interp.slots, &interp.heap),
            "[1 2 3]\n"
        );
    }

    #[test]
    fn scenario_e2_negative_number() {
        let interp = Interpreter::new(Limits::default()).unwrap();
        let mut stack = Stack::new(froth_core::StackKind::Data, 8);
        stack.push(number(-7)).unwrap();
        assert_eq!(render_stack(&stack, &interp.slots, &interp.heap), "[-7]\n");
    }

    #[test]
    fn call_cell_renders_with_name() {
        let mut interp = Interpreter::new(Limits::default()).unwrap();
        let index = interp.resolve_or_create("foo").unwrap();
        let cell = Interpreter::call_cell(index).unwrap();
        let mut stack = Stack::new(froth_core::StackKind::Data, 8);
        stack.push(cell).unwrap();
        assert_eq!(
            render_stack(&stack, &interp.slots, &interp.heap),
            "[C:foo]\n"
        );
    }

    #[test]
    fn quote_ref_renders_with_offset() {
        let interp = Interpreter::new(Limits::default()).unwrap();
        let cell = Cell::new(8, Tag::QuoteRef).unwrap();
        assert_eq!(render_cell(cell, &interp.slots, &interp.heap), "Q:8");
    }

    #[test]
    fn reserved_tag_renders_as_unknown() {
        let interp = Interpreter::new(Limits::default()).unwrap();
        let cell = Cell::from_raw(7 as Raw);
        assert_eq!(cell.tag(), Tag::Reserved);
        assert_eq!(render_cell(cell, &interp.slots, &interp.heap), "<?>");
    }
}
