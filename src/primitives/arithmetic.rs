//! Arithmetic, comparison, and logic primitives.

use super::PrimitiveEntry;
use crate::engine::Engine;
use crate::error::ForthError;

fn flag(b: bool) -> i64 {
    if b {
        1
    } else {
        0
    }
}

fn plus(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("+")?;
    let a = e.params.pop("+")?;
    e.params.push("+", a + b)
}

fn minus(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("-")?;
    let a = e.params.pop("-")?;
    e.params.push("-", a - b)
}

fn times(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("*")?;
    let a = e.params.pop("*")?;
    e.params.push("*", a * b)
}

/// `divmod` ( a b -- q r ), truncating toward zero, matching Rust's `/`/`%`
/// on signed integers.
fn divmod(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("divmod")?;
    let a = e.params.pop("divmod")?;
    if b == 0 {
        return Err(ForthError::ExplicitError("divmod: division by zero".to_string()));
    }
    e.params.push("divmod", a / b)?;
    e.params.push("divmod", a % b)
}

fn modulo(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("mod")?;
    let a = e.params.pop("mod")?;
    if b == 0 {
        return Err(ForthError::ExplicitError("mod: division by zero".to_string()));
    }
    e.params.push("mod", a % b)
}

fn equal(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("=")?;
    let a = e.params.pop("=")?;
    e.params.push("=", flag(a == b))
}

fn less(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("<")?;
    let a = e.params.pop("<")?;
    e.params.push("<", flag(a < b))
}

fn greater(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop(">")?;
    let a = e.params.pop(">")?;
    e.params.push(">", flag(a > b))
}

fn less_equal(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("<=")?;
    let a = e.params.pop("<=")?;
    e.params.push("<=", flag(a <= b))
}

fn greater_equal(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop(">=")?;
    let a = e.params.pop(">=")?;
    e.params.push(">=", flag(a >= b))
}

fn zero_equal(e: &mut Engine) -> Result<(), ForthError> {
    let a = e.params.pop("0=")?;
    e.params.push("0=", flag(a == 0))
}

fn zero_less(e: &mut Engine) -> Result<(), ForthError> {
    let a = e.params.pop("0<")?;
    e.params.push("0<", flag(a < 0))
}

fn not(e: &mut Engine) -> Result<(), ForthError> {
    let a = e.params.pop("not")?;
    e.params.push("not", flag(a == 0))
}

fn and(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("and")?;
    let a = e.params.pop("and")?;
    e.params.push("and", flag(a != 0 && b != 0))
}

fn or(e: &mut Engine) -> Result<(), ForthError> {
    let b = e.params.pop("or")?;
    let a = e.params.pop("or")?;
    e.params.push("or", flag(a != 0 || b != 0))
}

pub fn entries() -> Vec<PrimitiveEntry> {
    vec![
        PrimitiveEntry::new("+", false, "( a b -- a+b )", plus),
        PrimitiveEntry::new("-", false, "( a b -- a-b )", minus),
        PrimitiveEntry::new("*", false, "( a b -- a*b )", times),
        PrimitiveEntry::new("divmod", false, "( a b -- q r ), truncating toward zero", divmod),
        PrimitiveEntry::new("mod", false, "( a b -- r ), truncating toward zero", modulo),
        PrimitiveEntry::new("=", false, "( a b -- flag )", equal),
        PrimitiveEntry::new("<", false, "( a b -- flag )", less),
        PrimitiveEntry::new(">", false, "( a b -- flag )", greater),
        PrimitiveEntry::new("<=", false, "( a b -- flag )", less_equal),
        PrimitiveEntry::new(">=", false, "( a b -- flag )", greater_equal),
        PrimitiveEntry::new("0=", false, "( a -- flag )", zero_equal),
        PrimitiveEntry::new("0<", false, "( a -- flag )", zero_less),
        PrimitiveEntry::new("not", false, "( a -- flag )", not),
        PrimitiveEntry::new("and", false, "( a b -- flag )", and),
        PrimitiveEntry::new("or", false, "( a b -- flag )", or),
    ]
}
