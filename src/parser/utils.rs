use std::io::{self, BufRead};

use memchr::memchr;

use crate::errors::ParseError;

pub(crate) const BUFSIZE: usize = 64 * 1024;

/// Remove a final '\r' from a byte slice
#[inline]
pub(crate) fn trim_cr(line: &[u8]) -> &[u8] {
    if let Some((&b'\r', remaining)) = line.split_last() {
        remaining
    } else {
        line
    }
}

/// Strip leading and trailing ASCII whitespace (which includes `\r`)
#[inline]
pub(crate) fn trim(line: &[u8]) -> &[u8] {
    let start = match line.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(i) => i,
        None => return &[],
    };
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(line.len(), |i| i + 1);
    &line[start..end]
}

/// What a producer hands to its consumer: either one more item, or the
/// terminal signal saying whether the stream ended cleanly.
///
/// A well-behaved source yields any number of `Item`s followed by exactly one
/// `Finished`, and nothing after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T> {
    Item(T),
    Finished(Result<(), ParseError>),
}

impl<T> Event<T> {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Finished(_))
    }
}

/// Holds line number and byte offset of our current state in a parser
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub(crate) line: u64,
    pub(crate) byte: u64,
}

impl Position {
    pub fn new(line: u64, byte: u64) -> Self {
        Self { line, byte }
    }

    /// Line number (starting with 1)
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Byte offset within the input
    pub fn byte(&self) -> u64 {
        self.byte
    }
}

/// Whether it uses \r\n or only \n
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum LineEnding {
    Windows,
    Unix,
}

impl Default for LineEnding {
    fn default() -> Self {
        LineEnding::Unix
    }
}

impl LineEnding {
    pub fn to_bytes(self) -> &'static [u8] {
        match self {
            Self::Windows => b"\r\n",
            Self::Unix => b"\n",
        }
    }
}

/// Splits a reader into physical lines, one at a time, reusing a single line
/// buffer. Lines are returned without their `\n`; a `\r` before it is kept
/// and left to the caller.
pub(crate) struct LineBuffer<R: io::Read> {
    buf_reader: buffer_redux::BufReader<R>,
    line: Vec<u8>,
    /// Position of the start of the line currently held in `line`
    position: Position,
    /// Offset of the first byte not handed out yet
    next_byte: u64,
    line_ending: Option<LineEnding>,
}

impl<R: io::Read> LineBuffer<R> {
    pub(crate) fn with_capacity(reader: R, capacity: usize) -> Self {
        assert!(capacity > 0);
        LineBuffer {
            buf_reader: buffer_redux::BufReader::with_capacity(capacity, reader),
            line: Vec::with_capacity(256),
            position: Position::new(0, 0),
            next_byte: 0,
            line_ending: None,
        }
    }

    /// The last line read
    #[inline]
    pub(crate) fn line(&self) -> &[u8] {
        &self.line
    }

    #[inline]
    pub(crate) fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub(crate) fn line_ending(&self) -> Option<LineEnding> {
        self.line_ending
    }

    /// Reads the next line. Returns `Ok(false)` once the input is exhausted;
    /// a final line without a terminator still counts as a line.
    pub(crate) fn read_line(&mut self) -> io::Result<bool> {
        self.line.clear();
        self.position = Position::new(self.position.line + 1, self.next_byte);
        loop {
            if self.buf_reader.buffer().is_empty() {
                // everything handed out; rewind so the whole capacity is usable again
                self.buf_reader.make_room();
            }
            let available = match self.buf_reader.fill_buf() {
                Ok(b) => b,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.position.line -= 1;
                    return Err(e);
                }
            };
            if available.is_empty() {
                if self.line.is_empty() {
                    self.position.line -= 1;
                    return Ok(false);
                }
                return Ok(true);
            }
            match memchr(b'\n', available) {
                Some(i) => {
                    self.line.extend_from_slice(&available[..i]);
                    self.buf_reader.consume(i + 1);
                    self.next_byte += (i + 1) as u64;
                    if self.line_ending.is_none() {
                        self.line_ending = Some(if self.line.last() == Some(&b'\r') {
                            LineEnding::Windows
                        } else {
                            LineEnding::Unix
                        });
                    }
                    return Ok(true);
                }
                None => {
                    let n = available.len();
                    self.line.extend_from_slice(available);
                    self.buf_reader.consume(n);
                    self.next_byte += n as u64;
                }
            }
        }
    }
}
