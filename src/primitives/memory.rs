//! Memory-access primitives over the dictionary arena.
//!
//! `@`/`!` are cell-granular; `c@`/`c!` are byte-granular, needed for
//! string/name inspection and for building records by hand. `here`
//! and `latest` push the raw cursor value, not a further indirection
//! through a Forth variable cell — this engine keeps HERE and LATEST
//! as native fields on Dictionary, not as in-arena variables.
use super::PrimitiveEntry;
use crate::engine::Engine;
use crate::error::ForthError;

fn fetch(e: &mut Engine) -> Result<(), ForthError> {
    let addr = e.params.pop("@")?;
    let val = e.dict.read_cell(addr as usize);
    e.params.push("@", val)
}

fn store(e: &mut Engine) -> Result<(), ForthError> {
    let addr = e.params.pop("!")?;
    let val = e.params.pop("!")?;
    e.dict.write_cell(addr as usize, val)
}

fn c_fetch(e: &mut Engine) -> Result<(), ForthError> {
    let addr = e.params.pop("c@")?;
    let val = e.dict.read_byte(addr as usize);
    e.params.push("c@", val as i64)
}

fn c_store(e: &mut Engine) -> Result<(), ForthError> {
    let addr = e.params.pop("c!")?;
    let val = e.params.pop("c!")?;
    e.dict.write_byte(addr as usize, val as u8)
}

fn here(e: &mut Engine) -> Result<(), ForthError> {
    let addr = e.dict.here() as i64;
    e.params.push("here", addr)
}

fn latest(e: &mut Engine) -> Result<(), ForthError> {
    let addr = e.dict.latest().map(|a| a as i64).unwrap_or(-1);
    e.params.push("latest", addr)
}

fn comma(e: &mut Engine) -> Result<(), ForthError> {
    let val = e.params.pop(",")?;
    e.dict.comma(val)
}

pub fn entries() -> Vec<PrimitiveEntry> {
    vec![
        PrimitiveEntry::new("@", false, "( addr -- v )", fetch),
        PrimitiveEntry::new("!", false, "( v addr -- )", store),
        PrimitiveEntry::new("c@", false, "( addr -- byte )", c_fetch),
        PrimitiveEntry::new("c!", false, "( byte addr -- )", c_store),
        PrimitiveEntry::new("here", false, "( -- addr )", here),
        PrimitiveEntry::new("latest", false, "( -- addr )", latest),
        PrimitiveEntry::new(",", false, "( v -- ) append a cell at HERE", comma),
    ]
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;

    #[test]
    fn store_then_fetch_round_trips() {
        let mut e = Engine::new();
        e.interpret_line("here").unwrap();
        let addr = e.params.pop("test").unwrap();
        e.params.push("test", addr).unwrap();
        e.interpret_line("99 swap !").unwrap();
        e.params.push("test", addr).unwrap();
        e.interpret_line("@").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 99);
    }

    #[test]
    fn comma_advances_here() {
        let mut e = Engine::new();
        e.interpret_line("here").unwrap();
        let before = e.params.pop("test").unwrap();
        e.interpret_line("7 ,").unwrap();
        e.interpret_line("here").unwrap();
        let after = e.params.pop("test").unwrap();
        assert_eq!(after - before, 8);
    }
}
