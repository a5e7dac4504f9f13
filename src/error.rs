//! Errors a running Forth program can trigger.
//!
//! Every one of these corresponds to a halt-with-diagnostic condition from
//! the failure semantics table: stack and arena limits, unresolved names,
//! and malformed state transitions. A corrupted codeword tag that cannot
//! correspond to any primitive is not represented here — that is an engine
//! bug, not a program error, and is left to panic.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForthError {
    StackUnderflow { word: &'static str, needed: usize, have: usize },
    StackOverflow { word: &'static str },
    ReturnStackUnderflow { word: &'static str },
    ReturnStackOverflow { word: &'static str },
    ArenaExhausted,
    UnknownWord(String),
    MalformedState(&'static str),
    TokenTooLong,
    IoFailure(String),
    ExplicitError(String),
}

impl fmt::Display for ForthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForthError::StackUnderflow { word, needed, have } => {
                write!(f, "{word}: stack underflow: need {needed}, have {have}")
            }
            ForthError::StackOverflow { word } => write!(f, "{word}: stack overflow"),
            ForthError::ReturnStackUnderflow { word } => {
                write!(f, "{word}: return stack underflow")
            }
            ForthError::ReturnStackOverflow { word } => write!(f, "{word}: return stack overflow"),
            ForthError::ArenaExhausted => write!(f, "dictionary arena exhausted"),
            ForthError::UnknownWord(name) => write!(f, "failed to find {name}"),
            ForthError::MalformedState(what) => write!(f, "malformed state: {what}"),
            ForthError::TokenTooLong => write!(f, "token exceeds the 63-byte identifier limit"),
            ForthError::IoFailure(detail) => write!(f, "i/o failure: {detail}"),
            ForthError::ExplicitError(detail) => write!(f, "error: {detail}"),
        }
    }
}

impl std::error::Error for ForthError {}

impl From<std::io::Error> for ForthError {
    fn from(e: std::io::Error) -> Self {
        ForthError::IoFailure(e.to_string())
    }
}
