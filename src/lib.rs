//! A small interactive Forth core, modelled on JONESFORTH: parameter and
//! return stacks, a growable dictionary of threaded-code word records, and
//! a read-eval-compile loop capable of extending its own syntax.
//!
//! The engine is a library; the process entry point, CLI flag parsing,
//! and the concrete input source (file, terminal, buffer) are external
//! collaborators supplied by the `forth` binary crate (`main.rs`).
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod kernel;
pub mod messages;
pub mod primitives;
pub mod stream;
pub mod tokenizer;

pub use engine::Engine;
pub use error::ForthError;
pub use messages::DebugLevel;
pub use stream::{BufferStream, FileStream, InputStream, StdinStream};
