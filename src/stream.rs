//! Input stream abstraction.
//!
//! The tokenizer consumes a byte source satisfying InputStream; it
//! never knows whether that source is stdin, a file, or an in-memory
//! buffer. Primitives can open new streams and switch the active one,
//! supporting `open-read-file` loading a script that itself loads
//! another, resuming the caller's stream at EOF.
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};

pub trait InputStream: std::fmt::Debug {
    /// Reads one byte, or `None` at end-of-stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    fn at_eof(&self) -> bool;
}

#[derive(Debug)]
pub struct StdinStream {
    stdin: io::Stdin,
    eof: bool,
}

impl StdinStream {
    pub fn new() -> StdinStream {
        StdinStream { stdin: io::stdin(), eof: false }
    }
}

impl Default for StdinStream {
    fn default() -> Self {
        Self::new()
    }
}

impl InputStream for StdinStream {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        let mut lock = self.stdin.lock();
        match lock.read(&mut buf)? {
            0 => {
                self.eof = true;
                Ok(None)
            }
            _ => Ok(Some(buf[0])),
        }
    }

    fn at_eof(&self) -> bool {
        self.eof
    }
}

#[derive(Debug)]
pub struct FileStream {
    reader: BufReader<File>,
    eof: bool,
}

impl FileStream {
    pub fn open(path: &str) -> io::Result<FileStream> {
        let file = File::open(path)?;
        Ok(FileStream { reader: BufReader::new(file), eof: false })
    }
}

impl InputStream for FileStream {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf)? {
            0 => {
                self.eof = true;
                Ok(None)
            }
            _ => Ok(Some(buf[0])),
        }
    }

    fn at_eof(&self) -> bool {
        self.eof
    }
}

/// An in-memory byte source, useful for tests and for `eval`-style words.
#[derive(Debug)]
pub struct BufferStream {
    cursor: Cursor<Vec<u8>>,
    eof: bool,
}

impl BufferStream {
    pub fn new(contents: impl Into<Vec<u8>>) -> BufferStream {
        BufferStream { cursor: Cursor::new(contents.into()), eof: false }
    }
}

impl InputStream for BufferStream {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.cursor.read(&mut buf)? {
            0 => {
                self.eof = true;
                Ok(None)
            }
            _ => Ok(Some(buf[0])),
        }
    }

    fn at_eof(&self) -> bool {
        self.eof
    }
}

/// A small registry of open streams, indexed by the cell pushed for
/// `stdin`/`open-read-file`. Slot 0 is always standard input.
#[derive(Debug)]
pub struct StreamRegistry {
    streams: Vec<Option<Box<dyn InputStream>>>,
    active: usize,
}

impl StreamRegistry {
    pub fn new() -> StreamRegistry {
        StreamRegistry { streams: vec![Some(Box::new(StdinStream::new()))], active: 0 }
    }

    pub fn stdin_handle(&self) -> usize {
        0
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn set_active(&mut self, handle: usize) {
        self.active = handle;
    }

    pub fn open(&mut self, stream: Box<dyn InputStream>) -> usize {
        self.streams.push(Some(stream));
        self.streams.len() - 1
    }

    pub fn close(&mut self, handle: usize) {
        if handle < self.streams.len() {
            self.streams[handle] = None;
        }
    }

    pub fn read_active_byte(&mut self) -> io::Result<Option<u8>> {
        match self.streams.get_mut(self.active).and_then(|s| s.as_mut()) {
            Some(stream) => stream.read_byte(),
            None => Ok(None),
        }
    }

    pub fn active_at_eof(&self) -> bool {
        match self.streams.get(self.active).and_then(|s| s.as_ref()) {
            Some(stream) => stream.at_eof(),
            None => true,
        }
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}
