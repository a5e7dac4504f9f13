//! Colon-definition and control-flow primitives.
//!
//! `lit`, `branch`, `0branch`, and `'` all read the inline cell that
//! follows their own call site and advance `next` past it themselves
//! — the NEXT loop never interprets a body cell as an operand on
//! their behalf. `'` is implemented identically to `lit`: per
//! the recorded decision (see DESIGN.md), it yields whatever raw
//! cell follows it, which is how compiled code most often wants a
//! codeword reference for metaprogramming.
use super::PrimitiveEntry;
use crate::engine::Engine;
use crate::error::ForthError;

/// `:` in COMPILE state is a malformed nested definition (spec.md §4.11:
/// "`:` is a programmer error in COMPILE"), so it's rejected up front
/// rather than silently starting a colon header mid-body.
fn colon(e: &mut Engine) -> Result<(), ForthError> {
    if e.is_compiling() {
        return Err(ForthError::MalformedState(": while already compiling a definition"));
    }
    let name = e.read_token_as_name(":")?;
    e.dict.append_colon_header(&name, super::DOCOL_INDEX, super::tag)?;
    e.set_compile_mode();
    Ok(())
}

/// `;` in NORMAL state is likewise a programmer error (spec.md §4.11):
/// there's no definition under construction to terminate.
fn semicolon(e: &mut Engine) -> Result<(), ForthError> {
    if !e.is_compiling() {
        return Err(ForthError::MalformedState("; outside a colon definition"));
    }
    let exit_addr = e.exit_codeword_addr();
    e.dict.comma(exit_addr as i64)?;
    e.set_normal_mode();
    Ok(())
}

fn immediate(e: &mut Engine) -> Result<(), ForthError> {
    let latest = e
        .dict
        .latest()
        .ok_or_else(|| ForthError::MalformedState("immediate: no word has been defined yet"))?;
    e.dict.set_immediate(latest, true);
    Ok(())
}

fn left_bracket(e: &mut Engine) -> Result<(), ForthError> {
    e.set_normal_mode();
    Ok(())
}

fn right_bracket(e: &mut Engine) -> Result<(), ForthError> {
    e.set_compile_mode();
    Ok(())
}

fn lit(e: &mut Engine) -> Result<(), ForthError> {
    let n = e
        .next
        .ok_or_else(|| ForthError::MalformedState("lit: no inline operand"))?;
    let val = e.dict.read_cell(n);
    e.params.push("lit", val)?;
    e.next = Some(n + crate::dictionary::CELL_SIZE);
    Ok(())
}

fn tick(e: &mut Engine) -> Result<(), ForthError> {
    lit(e)
}

/// `branch` — unconditional; the inline offset is counted in cells from
/// the cell immediately after the offset itself.
fn branch(e: &mut Engine) -> Result<(), ForthError> {
    let n = e
        .next
        .ok_or_else(|| ForthError::MalformedState("branch: no inline offset"))?;
    let offset = e.dict.read_cell(n);
    let after_offset = n + crate::dictionary::CELL_SIZE;
    e.next = Some(apply_offset(after_offset, offset));
    Ok(())
}

fn zero_branch(e: &mut Engine) -> Result<(), ForthError> {
    let n = e
        .next
        .ok_or_else(|| ForthError::MalformedState("0branch: no inline offset"))?;
    let offset = e.dict.read_cell(n);
    let after_offset = n + crate::dictionary::CELL_SIZE;
    let flag = e.params.pop("0branch")?;
    e.next = Some(if flag == 0 { apply_offset(after_offset, offset) } else { after_offset });
    Ok(())
}

fn apply_offset(cell_addr: usize, offset_in_cells: i64) -> usize {
    (cell_addr as i64 + offset_in_cells * crate::dictionary::CELL_SIZE as i64) as usize
}

pub fn entries() -> Vec<PrimitiveEntry> {
    vec![
        PrimitiveEntry::new(":", false, "reads a name, begins a colon definition", colon),
        PrimitiveEntry::new(";", true, "ends a colon definition", semicolon),
        PrimitiveEntry::new("immediate", true, "marks the most recent word IMMEDIATE", immediate),
        PrimitiveEntry::new("[", true, "state := NORMAL", left_bracket),
        PrimitiveEntry::new("]", false, "state := COMPILE", right_bracket),
        PrimitiveEntry::new("lit", false, "( -- n ) pushes the following inline cell", lit),
        PrimitiveEntry::new("'", false, "( -- x ) pushes the following inline cell", tick),
        PrimitiveEntry::new("branch", false, "unconditional jump by inline cell offset", branch),
        PrimitiveEntry::new("0branch", false, "( flag -- ) jump by inline offset if flag is 0", zero_branch),
    ]
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;

    #[test]
    fn colon_definition_runs_its_body() {
        let mut e = Engine::new();
        e.interpret_line(": sq dup * ;").unwrap();
        e.interpret_line("5 sq").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 25);
    }

    #[test]
    fn immediate_word_runs_during_compilation() {
        let mut e = Engine::new();
        e.interpret_line(": foo 1 ; immediate").unwrap();
        assert!(e.dict.is_immediate(e.dict.find_word("foo").unwrap()));
    }

    #[test]
    fn recursive_definition_can_call_itself() {
        // Inline branch offsets can't be written as bare number tokens —
        // in COMPILE state a number compiles as `lit`+value, not a raw
        // cell. `[ n , ]` drops to NORMAL just long enough to push n and
        // have `,` (executed, not compiled, since we're in NORMAL) append
        // it directly as the offset cell `0branch`/`branch` expect.
        //
        // Body layout (cell index: contents), offsets counted in cells
        // from the cell after the offset itself:
        //   0 dup | 1 lit 2:1 | 3 <= | 4 0branch 5:5 | 6 drop 7 lit 8:1
        //   9 branch 10:6 | 11 dup 12 lit 13:1 14 - 15 fact 16 * | 17 exit
        // 0branch(idx4) jumps to idx11 (the recursive branch) when flag==0:
        // offset = 11 - 6 = 5. branch(idx9) jumps to idx17 (exit) to skip
        // the recursive branch after the base case: offset = 17 - 11 = 6.
        let mut e = Engine::new();
        e.interpret_line(
            ": fact dup 1 <= 0branch [ 5 , ] drop 1 branch [ 6 , ] dup 1 - fact * ;",
        )
        .unwrap();
        e.interpret_line("5 fact").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 120);
    }
}
