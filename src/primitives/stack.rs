//! Stack-manipulation and return-stack-transfer primitives.

use super::PrimitiveEntry;
use crate::engine::Engine;
use crate::error::ForthError;

fn dup(e: &mut Engine) -> Result<(), ForthError> {
    let a = e.params.top("dup")?;
    e.params.push("dup", a)
}

fn drop_(e: &mut Engine) -> Result<(), ForthError> {
    e.params.pop("drop").map(|_| ())
}

fn swap(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("swap")?;
    let a = e.params.pop("swap")?;
    e.params.push("swap", b)?;
    e.params.push("swap", a)
}

fn over(e: &mut Engine) -> Result<(), ForthError> {
    let a = e.params.peek("over", 1)?;
    e.params.push("over", a)
}

fn rot(e: &mut Engine) -> Result<(), ForthError> {
    let c = e.params.pop("rot")?;
    let b = e.params.pop("rot")?;
    let a = e.params.pop("rot")?;
    e.params.push("rot", b)?;
    e.params.push("rot", c)?;
    e.params.push("rot", a)
}

/// `pick` ( ... n -- ... x ): copies the nth item below the top (0 = the
/// item that was directly below n on the stack) to the top.
fn pick(e: &mut Engine) -> Result<(), ForthError> {
    let n = e.params.pop("pick")?;
    if n < 0 {
        return Err(ForthError::ExplicitError("pick: negative index".to_string()));
    }
    let x = e.params.peek("pick", n as usize)?;
    e.params.push("pick", x)
}

/// `roll` ( ... n -- ... ): moves the nth item below the top to the top,
/// shifting the intervening items down by one.
fn roll(e: &mut Engine) -> Result<(), ForthError> {
    let n = e.params.pop("roll")?;
    if n < 0 {
        return Err(ForthError::ExplicitError("roll: negative index".to_string()));
    }
    let n = n as usize;
    let x = e.params.peek("roll", n)?;
    for depth in (0..n).rev() {
        let below = e.params.peek("roll", depth)?;
        e.params.set_from_top("roll", depth + 1, below)?;
    }
    e.params.set_from_top("roll", 0, x)
}

fn stack_size(e: &mut Engine) -> Result<(), ForthError> {
    let n = e.params.len() as i64;
    e.params.push("stack-size", n)
}

fn to_r(e: &mut Engine) -> Result<(), ForthError> {
    let v = e.params.pop(">r")?;
    e.retstack.push(">r", v)
}

fn r_from(e: &mut Engine) -> Result<(), ForthError> {
    let v = e.retstack.pop("r>")?;
    e.params.push("r>", v)
}

fn r_get(e: &mut Engine) -> Result<(), ForthError> {
    let v = e.retstack.top("r@")?;
    e.params.push("r@", v)
}

/// `i` ( -- n ): the innermost loop index, conventionally kept on the
/// return stack by a user-level `do`/`loop` pair built atop `>r`/`r>`.
fn i_index(e: &mut Engine) -> Result<(), ForthError> {
    let v = e.retstack.top("i")?;
    e.params.push("i", v)
}

/// `j` ( -- n ): the next loop index out, one frame below `i`.
fn j_index(e: &mut Engine) -> Result<(), ForthError> {
    let v = e.retstack.peek("j", 1)?;
    e.params.push("j", v)
}

pub fn entries() -> Vec<PrimitiveEntry> {
    vec![
        PrimitiveEntry::new("dup", false, "( a -- a a )", dup),
        PrimitiveEntry::new("drop", false, "( a -- )", drop_),
        PrimitiveEntry::new("swap", false, "( a b -- b a )", swap),
        PrimitiveEntry::new("over", false, "( a b -- a b a )", over),
        PrimitiveEntry::new("rot", false, "( a b c -- b c a )", rot),
        PrimitiveEntry::new("pick", false, "( ... n -- ... x )", pick),
        PrimitiveEntry::new("roll", false, "( ... n -- ... )", roll),
        PrimitiveEntry::new("stack-size", false, "( -- n )", stack_size),
        PrimitiveEntry::new(">r", false, "( a -- ) (R: -- a )", to_r),
        PrimitiveEntry::new("r>", false, "( -- a ) (R: a -- )", r_from),
        PrimitiveEntry::new("r@", false, "( -- a ) (R: a -- a )", r_get),
        PrimitiveEntry::new("i", false, "( -- n ) innermost loop index", i_index),
        PrimitiveEntry::new("j", false, "( -- n ) next loop index out", j_index),
    ]
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;

    #[test]
    fn dup_drop_swap_over() {
        let mut e = Engine::new();
        e.interpret_line("1 2 swap").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 1);
        assert_eq!(e.params.pop("test").unwrap(), 2);

        e.interpret_line("5 dup").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 5);
        assert_eq!(e.params.pop("test").unwrap(), 5);

        e.interpret_line("1 2 over").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 1);
        assert_eq!(e.params.pop("test").unwrap(), 2);
        assert_eq!(e.params.pop("test").unwrap(), 1);
    }

    #[test]
    fn rot_rotates_third_to_top() {
        let mut e = Engine::new();
        e.interpret_line("1 2 3 rot").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 1);
        assert_eq!(e.params.pop("test").unwrap(), 3);
        assert_eq!(e.params.pop("test").unwrap(), 2);
    }

    #[test]
    fn return_stack_transfer() {
        let mut e = Engine::new();
        e.interpret_line("42 >r r@ r>").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 42);
        assert_eq!(e.params.pop("test").unwrap(), 42);
    }

    #[test]
    fn dup_on_empty_stack_is_underflow() {
        let mut e = Engine::new();
        assert!(e.interpret_line("dup").is_err());
    }
}
