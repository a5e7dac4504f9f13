//! I/O and stream primitives.
//!
//! `word` writes its token into the shared pad and pushes the pad's
//! address, matching `@`/`c@`-style address-valued primitives rather
//! than returning a Rust value directly. Stream handles are plain
//! indices into the engine's stream registry.
use super::PrimitiveEntry;
use crate::engine::Engine;
use crate::error::ForthError;
use crate::stream::FileStream;
use crate::tokenizer;
use std::io::Write;

fn key(e: &mut Engine) -> Result<(), ForthError> {
    match e.streams.read_active_byte()? {
        Some(b) => e.params.push("key", b as i64),
        None => Err(ForthError::IoFailure("key: end of stream".to_string())),
    }
}

fn emit(e: &mut Engine) -> Result<(), ForthError> {
    let c = e.params.pop("emit")?;
    let mut stdout = std::io::stdout();
    stdout.write_all(&[c as u8])?;
    stdout.flush()?;
    Ok(())
}

fn word(e: &mut Engine) -> Result<(), ForthError> {
    match tokenizer::next_token(&mut e.streams)? {
        Some(token) => {
            e.dict.write_pad(&token);
            e.params.push("word", e.dict.pad_addr() as i64)
        }
        None => Err(ForthError::IoFailure("word: end of stream without a token".to_string())),
    }
}

/// `tell` ( addr -- ): prints a NUL-terminated string starting at `addr`.
fn tell(e: &mut Engine) -> Result<(), ForthError> {
    let addr = e.params.pop("tell")? as usize;
    let mut out = Vec::new();
    let mut cursor = addr;
    loop {
        let b = e.dict.read_byte(cursor);
        if b == 0 {
            break;
        }
        out.push(b);
        cursor += 1;
    }
    let mut stdout = std::io::stdout();
    stdout.write_all(&out)?;
    stdout.flush()?;
    Ok(())
}

fn stdin_word(e: &mut Engine) -> Result<(), ForthError> {
    let handle = e.streams.stdin_handle() as i64;
    e.params.push("stdin", handle)
}

fn get_input_stream(e: &mut Engine) -> Result<(), ForthError> {
    let handle = e.streams.active() as i64;
    e.params.push("get-input-stream", handle)
}

fn set_input_stream(e: &mut Engine) -> Result<(), ForthError> {
    let handle = e.params.pop("set-input-stream")?;
    e.streams.set_active(handle as usize);
    Ok(())
}

/// `open-read-file` ( addr -- s ): opens the NUL-terminated path at `addr`
/// for reading and returns a new stream handle. Does not switch the
/// active stream; callers do that with `set-input-stream`.
fn open_read_file(e: &mut Engine) -> Result<(), ForthError> {
    let addr = e.params.pop("open-read-file")? as usize;
    let mut path_bytes = Vec::new();
    let mut cursor = addr;
    loop {
        let b = e.dict.read_byte(cursor);
        if b == 0 {
            break;
        }
        path_bytes.push(b);
        cursor += 1;
    }
    let path = String::from_utf8_lossy(&path_bytes).into_owned();
    let stream = FileStream::open(&path)?;
    let handle = e.streams.open(Box::new(stream));
    e.params.push("open-read-file", handle as i64)
}

fn close_file(e: &mut Engine) -> Result<(), ForthError> {
    let handle = e.params.pop("close-file")?;
    e.streams.close(handle as usize);
    Ok(())
}

/// `error` ( addr -- ): process-terminating failure, reporting the
/// NUL-terminated message at `addr`. User-level recovery (resetting the
/// stacks and re-entering a REPL loop) is built atop this and
/// `set-input-stream`, not provided by the engine itself.
fn error(e: &mut Engine) -> Result<(), ForthError> {
    let addr = e.params.pop("error")? as usize;
    let mut out = Vec::new();
    let mut cursor = addr;
    loop {
        let b = e.dict.read_byte(cursor);
        if b == 0 {
            break;
        }
        out.push(b);
        cursor += 1;
    }
    Err(ForthError::ExplicitError(String::from_utf8_lossy(&out).into_owned()))
}

pub fn entries() -> Vec<PrimitiveEntry> {
    vec![
        PrimitiveEntry::new("key", false, "( -- c ) read one byte from the input stream", key),
        PrimitiveEntry::new("emit", false, "( c -- ) write one byte to stdout", emit),
        PrimitiveEntry::new("word", false, "( -- addr ) next whitespace-delimited token", word),
        PrimitiveEntry::new("tell", false, "( addr -- ) print a NUL-terminated string", tell),
        PrimitiveEntry::new("stdin", false, "( -- s ) the standard-input stream handle", stdin_word),
        PrimitiveEntry::new("get-input-stream", false, "( -- s )", get_input_stream),
        PrimitiveEntry::new("set-input-stream", false, "( s -- )", set_input_stream),
        PrimitiveEntry::new("open-read-file", false, "( addr -- s )", open_read_file),
        PrimitiveEntry::new("close-file", false, "( s -- )", close_file),
    ]
}
