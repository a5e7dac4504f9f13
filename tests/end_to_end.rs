//! End-to-end scenarios from the interpreter's scenario table, driven
//! entirely through the public `Engine` API — no internal module access.

use f3::{Engine, ForthError};

#[test]
fn addition_leaves_sum_on_stack() {
    let mut e = Engine::new();
    e.interpret_line("3 4 +").unwrap();
    assert_eq!(e.params.pop("test").unwrap(), 7);
    assert!(e.params.is_empty());
}

#[test]
fn colon_definition_squares_its_argument() {
    let mut e = Engine::new();
    e.interpret_line(": sq dup * ;").unwrap();
    e.interpret_line("5 sq").unwrap();
    assert_eq!(e.params.pop("test").unwrap(), 25);
}

#[test]
fn recursive_factorial_via_hand_patched_branches() {
    let mut e = Engine::new();
    e.interpret_line(": fact dup 1 <= 0branch [ 5 , ] drop 1 branch [ 6 , ] dup 1 - fact * ;")
        .unwrap();
    e.interpret_line("5 fact").unwrap();
    assert_eq!(e.params.pop("test").unwrap(), 120);
    e.interpret_line("0 fact").unwrap();
    assert_eq!(e.params.pop("test").unwrap(), 1);
}

#[test]
fn repeated_increment() {
    let mut e = Engine::new();
    e.interpret_line(": inc 1 + ;").unwrap();
    e.interpret_line("10 inc inc inc").unwrap();
    assert_eq!(e.params.pop("test").unwrap(), 13);
}

#[test]
fn emit_and_tell_do_not_error() {
    let mut e = Engine::new();
    assert!(e.interpret_line("42 emit").is_ok());
    assert!(e.interpret_line(": greet 72 emit 105 emit ; greet").is_ok());
}

/// A `begin ... until`-shaped loop, hand-assembled from `0branch` and a
/// backpatched offset the way spec.md §4.7 describes higher-level control
/// constructs being built from the primitive set alone: the loop index
/// lives on the return stack (`>r`/`r@`/`r>`), the accumulator on the
/// parameter stack, and the backward jump target is captured at the loop
/// top with `here` and turned into a cell offset with ordinary arithmetic,
/// all of it running at compile time inside `[ ... ]`.
#[test]
fn hand_built_counted_loop_sums_zero_through_nine() {
    let mut e = Engine::new();
    e.interpret_line(
        ": sum0to9 0 0 >r [ here ] r@ + r> 1 + dup >r 10 = \
             0branch [ here - 8 - 8 divmod drop , ] r> drop ;",
    )
    .unwrap();
    e.interpret_line("sum0to9").unwrap();
    assert_eq!(e.params.pop("test").unwrap(), 45);
    assert!(e.retstack.is_empty());
}

#[test]
fn redefinition_shadows_but_keeps_prior_record_reachable_by_link() {
    let mut e = Engine::new();
    e.interpret_line(": greeting 1 ;").unwrap();
    let first = e.dict.find_word("greeting").unwrap();
    e.interpret_line(": greeting 2 ;").unwrap();
    let second = e.dict.find_word("greeting").unwrap();
    assert_ne!(first, second);
    e.interpret_line("greeting").unwrap();
    assert_eq!(e.params.pop("test").unwrap(), 2);
    // The shadowed record is still linked in and still executable directly.
    e.execute_record(first).unwrap();
    assert_eq!(e.params.pop("test").unwrap(), 1);
}

#[test]
fn dup_on_empty_stack_is_a_detected_underflow() {
    let mut e = Engine::new();
    assert!(matches!(e.interpret_line("dup"), Err(ForthError::StackUnderflow { .. })));
}

#[test]
fn semicolon_in_normal_state_is_malformed() {
    let mut e = Engine::new();
    assert!(e.interpret_line(";").is_err());
}

#[test]
fn unknown_word_halts_with_diagnostic() {
    let mut e = Engine::new();
    match e.interpret_line("totally-unknown-word") {
        Err(ForthError::UnknownWord(name)) => assert_eq!(name, "totally-unknown-word"),
        other => panic!("expected UnknownWord, got {other:?}"),
    }
}

#[test]
fn quit_runs_a_whole_buffered_program_to_a_clean_eof() {
    let mut e = Engine::new();
    let handle =
        e.streams.open(Box::new(f3::BufferStream::new(b": sq dup * ; 6 sq".to_vec())));
    e.streams.set_active(handle);
    assert!(e.quit());
    assert_eq!(e.params.pop("test").unwrap(), 36);
}
