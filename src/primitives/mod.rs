//! The primitive table: the engine's native ISA.
//!
//! Each primitive is a plain `fn(&mut Engine) -> Result<(), ForthError>`,
//! looked up by a tagged index rather than a raw function pointer (see
//! the module doc on `dictionary` for the tagging scheme). Index 0 is
//! always `docol`, index 1 is always `exit` — everything else is
//! assembled from the submodules below in registration order.
use crate::engine::Engine;
use crate::error::ForthError;

pub mod arithmetic;
pub mod compile;
pub mod introspect;
pub mod io;
pub mod memory;
pub mod stack;

pub type PrimitiveFn = fn(&mut Engine) -> Result<(), ForthError>;

pub struct PrimitiveEntry {
    pub name: &'static str,
    pub immediate: bool,
    pub doc: &'static str,
    pub func: PrimitiveFn,
}

impl PrimitiveEntry {
    pub const fn new(name: &'static str, immediate: bool, doc: &'static str, func: PrimitiveFn) -> Self {
        PrimitiveEntry { name, immediate, doc, func }
    }
}

const PRIMITIVE_TAG: i64 = 1 << 62;

/// Encodes a primitive-table index as a codeword cell value.
pub fn tag(index: usize) -> i64 {
    PRIMITIVE_TAG | index as i64
}

/// Decodes a codeword cell back into a primitive-table index, or `None`
/// if the cell does not carry the primitive tag at all (a malformed
/// dictionary, which is an engine bug rather than a user error).
pub fn untag(cell: i64) -> Option<usize> {
    if cell & PRIMITIVE_TAG != 0 {
        Some((cell & !PRIMITIVE_TAG) as usize)
    } else {
        None
    }
}

pub const DOCOL_INDEX: usize = 0;
pub const EXIT_INDEX: usize = 1;

/// Assembles the full primitive table in registration order. The position
/// of each entry in this vector IS its tagged dictionary index, so this
/// order must never change once a dictionary has been built against it.
pub fn builtin_table() -> Vec<PrimitiveEntry> {
    let mut table = vec![
        PrimitiveEntry::new("docol", false, "shared dispatcher for colon-word bodies", crate::engine::docol),
        PrimitiveEntry::new("exit", false, "restores the saved continuation", crate::engine::exit_word),
    ];
    table.extend(arithmetic::entries());
    table.extend(stack::entries());
    table.extend(memory::entries());
    table.extend(io::entries());
    table.extend(compile::entries());
    table.extend(introspect::entries());
    table
}
