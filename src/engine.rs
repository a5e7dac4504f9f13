//! The engine: dictionary + stacks + primitive table + NEXT loop, fused
//! with the outer interpreter/compiler (the REPL, `quit`).
//!
//! The threaded-code inner loop and the read-eval-compile classification
//! live together here deliberately: dispatch and compilation share too
//! much state (the current word, the next cell, the stacks) to stay
//! coherent split across files.
use crate::dictionary::{Dictionary, CELL_SIZE, DEFAULT_ARENA_CAPACITY};
use crate::error::ForthError;
use crate::kernel::{decode_addr, encode_addr, Stack, DEFAULT_PARAM_CAPACITY, DEFAULT_RETURN_CAPACITY};
use crate::messages::{DebugLevel, Msg};
use crate::primitives::{self, builtin_table, PrimitiveEntry};
use crate::stream::{BufferStream, FileStream, StreamRegistry};
use crate::tokenizer::{self, parse_number};

/// Where the outer interpreter is in the classic Forth state machine
/// (spec.md §4.11): NORMAL executes every token immediately, COMPILE
/// appends most of them to the word under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Normal,
    Compile,
}

pub struct Engine {
    pub params: Stack,
    pub retstack: Stack,
    pub dict: Dictionary,
    pub streams: StreamRegistry,
    pub msg: Msg,
    /// The codeword address the inner loop is currently dispatching.
    pub(crate) current: Option<usize>,
    /// The next body cell to fetch, or nil at the outermost frame. Public
    /// because `lit`/`branch`/`0branch`/`'` all advance it directly as
    /// they consume their inline operand.
    pub next: Option<usize>,
    table: Vec<PrimitiveEntry>,
    state: State,
}

impl Engine {
    pub fn new() -> Engine {
        Engine::with_capacities(DEFAULT_PARAM_CAPACITY, DEFAULT_RETURN_CAPACITY, DEFAULT_ARENA_CAPACITY)
    }

    pub fn with_capacities(param_cap: usize, return_cap: usize, arena_cap: usize) -> Engine {
        let mut engine = Engine {
            params: Stack::new(param_cap),
            retstack: Stack::new(return_cap),
            dict: Dictionary::new(arena_cap),
            streams: StreamRegistry::new(),
            msg: Msg::new(),
            current: None,
            next: None,
            table: builtin_table(),
            state: State::Normal,
        };
        engine.install_primitives();
        engine
    }

    /// Gives every primitive a dictionary record, so compiled bodies can
    /// reference `dup`, `exit`, `lit`, and friends the same way they
    /// reference any colon word: by the byte offset of its codeword cell.
    fn install_primitives(&mut self) {
        let entries: Vec<(usize, &'static str, bool)> =
            self.table.iter().enumerate().map(|(i, e)| (i, e.name, e.immediate)).collect();
        for (index, name, immediate) in entries {
            self.dict
                .append_primitive(name, immediate, index, primitives::tag)
                .expect("default arena capacity holds the builtin primitive set");
        }
    }

    pub fn set_debug_level(&mut self, level: DebugLevel) {
        self.msg.set_level(level);
    }

    pub fn is_compiling(&self) -> bool {
        self.state == State::Compile
    }

    pub fn set_compile_mode(&mut self) {
        self.state = State::Compile;
    }

    pub fn set_normal_mode(&mut self) {
        self.state = State::Normal;
    }

    pub fn primitive_name(&self, index: usize) -> &'static str {
        self.table[index].name
    }

    /// The address of `exit`'s own codeword cell — what `;` appends to
    /// terminate a colon body, and the EXIT_INDEX sentinel cannot occur
    /// anywhere in the dictionary except there.
    pub fn exit_codeword_addr(&self) -> usize {
        let record = self.dict.find_word("exit").expect("exit is always registered");
        self.dict.codeword_addr(record)
    }

    /// Reads the next token from the active stream and returns it as an
    /// owned `String`, for primitives (`:`) that consume a name rather
    /// than dispatching on it.
    pub fn read_token_as_name(&mut self, word: &'static str) -> Result<String, ForthError> {
        match tokenizer::next_token(&mut self.streams)? {
            Some(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            None => Err(ForthError::IoFailure(format!("{word}: end of stream, expected a name"))),
        }
    }

    /// The NEXT loop (spec.md §4.1): runs from a starting codeword address
    /// until the outermost continuation returns to nil.
    pub fn run_from(&mut self, start_codeword_addr: usize) -> Result<(), ForthError> {
        self.current = Some(start_codeword_addr);
        self.next = None;
        loop {
            let current = self.current.expect("NEXT loop: current is nil mid-dispatch");
            let codeword = self.dict.read_cell(current);
            let index = primitives::untag(codeword)
                .unwrap_or_else(|| panic!("corrupted codeword at {current}: {codeword:#x}"));
            let func = self.table[index].func;
            func(self)?;
            match self.next {
                None => break,
                Some(n) => {
                    self.current = Some(self.dict.read_cell(n) as usize);
                    self.next = Some(n + CELL_SIZE);
                }
            }
        }
        Ok(())
    }

    /// Executes a word immediately, regardless of engine state — what the
    /// outer interpreter does for a recognized word in NORMAL state, and
    /// what it does for an IMMEDIATE word even while COMPILE-ing.
    pub fn execute_record(&mut self, record_start: usize) -> Result<(), ForthError> {
        self.run_from(self.dict.codeword_addr(record_start))
    }

    /// Classifies and dispatches one token per spec.md §4.5: a number is
    /// pushed (NORMAL) or compiled as `lit`+value (COMPILE); a known word
    /// is executed (NORMAL, or COMPILE when IMMEDIATE) or else has its
    /// codeword address appended to the definition under construction.
    fn interpret_token(&mut self, token: &[u8]) -> Result<(), ForthError> {
        let text = String::from_utf8_lossy(token).into_owned();
        if let Some(n) = parse_number(&text) {
            if self.is_compiling() {
                self.compile_literal(n)
            } else {
                self.params.push("literal", n)
            }
        } else {
            let record = self.dict.find_word(&text).ok_or(ForthError::UnknownWord(text))?;
            if self.is_compiling() && !self.dict.is_immediate(record) {
                let addr = self.dict.codeword_addr(record);
                self.dict.comma(addr as i64)
            } else {
                self.execute_record(record)
            }
        }
    }

    fn compile_literal(&mut self, value: i64) -> Result<(), ForthError> {
        let lit_record = self.dict.find_word("lit").expect("lit is always registered");
        let lit_addr = self.dict.codeword_addr(lit_record);
        self.dict.comma(lit_addr as i64)?;
        self.dict.comma(value)
    }

    /// Drains the active stream to EOF, interpreting/compiling each token
    /// in turn. Returns once the stream reports end-of-stream (spec.md
    /// §4.3's "stop reading from the current stream" signal).
    fn run_active_stream(&mut self) -> Result<(), ForthError> {
        loop {
            match tokenizer::next_token(&mut self.streams)? {
                None => return Ok(()),
                Some(token) => self.interpret_token(&token)?,
            }
        }
    }

    /// Runs one line of source text as a nested input stream, then
    /// restores whichever stream was active beforehand. Used by tests and
    /// by any `eval`-style primitive built atop the engine.
    pub fn interpret_line(&mut self, line: &str) -> Result<(), ForthError> {
        let saved_active = self.streams.active();
        let handle = self.streams.open(Box::new(BufferStream::new(line.as_bytes().to_vec())));
        self.streams.set_active(handle);
        let result = self.run_active_stream();
        self.streams.close(handle);
        self.streams.set_active(saved_active);
        result
    }

    /// Opens `path` as a new nested stream, runs it to completion, then
    /// restores the caller's stream — the mechanism `startup.f` and any
    /// user-level `include-file` word are built on (spec.md §6 supplement).
    pub fn interpret_file(&mut self, path: &str) -> Result<(), ForthError> {
        let saved_active = self.streams.active();
        let stream = FileStream::open(path)?;
        let handle = self.streams.open(Box::new(stream));
        self.streams.set_active(handle);
        let result = self.run_active_stream();
        self.streams.close(handle);
        self.streams.set_active(saved_active);
        result
    }

    /// The top-level read-eval-compile loop (`quit`, spec.md §4.12/§7):
    /// reads from the active stream until EOF, reporting any fatal error
    /// through `Msg` and halting. Per spec.md §4.12, every error here is
    /// genuinely unrecoverable at this layer — "there is no exception
    /// -style recovery"; a `quit` word that resets the stacks and
    /// re-enters the REPL is something user Forth code layers on top of
    /// `error`/`set-input-stream`, not something this loop does itself.
    pub fn quit(&mut self) -> bool {
        match self.run_active_stream() {
            Ok(()) => true,
            Err(ForthError::ExplicitError(detail)) => {
                self.msg.error("error", "program requested termination", Some(detail));
                false
            }
            Err(e) => {
                self.msg.error("quit", "halted", Some(e));
                false
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared dispatcher for colon words (`docol`). Saves the caller's
/// continuation on the return stack and starts walking the callee's body.
pub(crate) fn docol(e: &mut Engine) -> Result<(), ForthError> {
    let callee_codeword_addr =
        e.current.ok_or(ForthError::MalformedState("docol: no current codeword"))?;
    e.retstack.push("docol", encode_addr(e.next))?;
    e.next = Some(callee_codeword_addr + CELL_SIZE);
    Ok(())
}

/// Restores the continuation saved by the matching `docol` (or nil, at
/// the outermost frame), ending the current colon body.
pub(crate) fn exit_word(e: &mut Engine) -> Result<(), ForthError> {
    let saved = e.retstack.pop("exit")?;
    e.next = decode_addr(saved);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pushes_in_normal_state() {
        let mut e = Engine::new();
        e.interpret_line("42").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 42);
    }

    #[test]
    fn unknown_word_is_reported() {
        let mut e = Engine::new();
        assert!(matches!(e.interpret_line("bogus-word"), Err(ForthError::UnknownWord(_))));
    }

    #[test]
    fn colon_definition_then_call() {
        let mut e = Engine::new();
        e.interpret_line(": sq dup * ;").unwrap();
        e.interpret_line("5 sq").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 25);
    }

    #[test]
    fn semicolon_outside_compile_mode_errors() {
        let mut e = Engine::new();
        assert!(e.interpret_line(";").is_err());
    }

    #[test]
    fn end_to_end_factorial_scenario() {
        let mut e = Engine::new();
        e.interpret_line(
            ": fact dup 1 <= 0branch [ 5 , ] drop 1 branch [ 6 , ] dup 1 - fact * ;",
        )
        .unwrap();
        e.interpret_line("5 fact").unwrap();
        assert_eq!(e.params.pop("test").unwrap(), 120);
    }

    #[test]
    fn quit_halts_cleanly_on_eof() {
        let mut e = Engine::new();
        let handle = e.streams.open(Box::new(BufferStream::new(b"3 4 +".to_vec())));
        e.streams.set_active(handle);
        assert!(e.quit());
        assert_eq!(e.params.pop("test").unwrap(), 7);
    }

    #[test]
    fn quit_reports_explicit_error_and_halts() {
        // `word` consumes the following token ("oops") into the shared pad
        // and pushes its address; `error` then pops that address and
        // reports it as the fatal diagnostic.
        let mut e = Engine::new();
        let handle = e.streams.open(Box::new(BufferStream::new(b"word oops error".to_vec())));
        e.streams.set_active(handle);
        assert!(!e.quit());
    }
}
