//! Line-level view of FASTA input, for consumers that do not need whole
//! records.
use std::io;

use log::{debug, warn};

use crate::errors::ParseError;
use crate::parser::utils::{trim_cr, Event, LineBuffer, BUFSIZE};

/// One physical line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The line without its line ending
    pub text: Vec<u8>,
    /// True if the line is non-empty and its first byte is `>`
    pub is_name: bool,
}

/// Yields every line of the input, blank ones included, as an
/// [`Event::Item`], followed by exactly one [`Event::Finished`].
pub struct LineReader<R: io::Read> {
    lines: Option<LineBuffer<R>>,
    finished: bool,
}

impl<R: io::Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader {
            lines: Some(LineBuffer::with_capacity(reader, BUFSIZE)),
            finished: false,
        }
    }
}

impl<R: io::Read> Iterator for LineReader<R> {
    type Item = Event<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let lines = self.lines.as_mut()?;
        let result = match lines.read_line() {
            Ok(true) => {
                let text = trim_cr(lines.line()).to_vec();
                let is_name = text.first() == Some(&b'>');
                return Some(Event::Item(Line { text, is_name }));
            }
            Ok(false) => {
                debug!("line stream finished after {} lines", lines.position().line());
                Ok(())
            }
            Err(e) => {
                let err = ParseError::new_read_failure(&e, lines.position().line() + 1);
                warn!("line stream failed: {}", err);
                Err(err)
            }
        };
        self.lines = None;
        self.finished = true;
        Some(Event::Finished(result))
    }
}

impl<R: io::Read> std::iter::FusedIterator for LineReader<R> {}
