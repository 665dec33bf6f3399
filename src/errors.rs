//! The errors fastago can return, either while reading FASTA input or while
//! running an operation over its records

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Represents where we were in the input when an error occurred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorPosition {
    /// Line number where the error occurred (starting with 1, 0 if unknown)
    pub line: u64,
}

impl fmt::Display for ErrorPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}", self.line)
    }
}

/// The type of error that occurred
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Reading from the input stream failed
    ReadFailure,
    /// Writing the output of an operation failed
    WriteFailure,
    /// A caller-supplied value is out of range or malformed (line width, map line...)
    InvalidArgument,
}

/// The only error type that fastago returns
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// A description of what went wrong
    pub msg: String,
    /// The type of error that occurred
    pub kind: ParseErrorKind,
    /// Position within the input, when relevant
    pub position: ErrorPosition,
}

impl ParseError {
    pub fn new_read_failure(err: &io::Error, line: u64) -> Self {
        Self {
            msg: err.to_string(),
            kind: ParseErrorKind::ReadFailure,
            position: ErrorPosition { line },
        }
    }

    pub fn new_write_failure(err: &io::Error) -> Self {
        Self {
            msg: err.to_string(),
            kind: ParseErrorKind::WriteFailure,
            position: ErrorPosition::default(),
        }
    }

    pub fn new_invalid_width(width: i64) -> Self {
        Self {
            msg: format!("width of fasta line must be > 0 (got {})", width),
            kind: ParseErrorKind::InvalidArgument,
            position: ErrorPosition::default(),
        }
    }

    pub fn new_invalid_argument(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ParseErrorKind::InvalidArgument,
            position: ErrorPosition::default(),
        }
    }

    /// The producer went away without handing over its terminal signal
    pub fn new_producer_lost() -> Self {
        Self {
            msg: String::from("record producer stopped before signalling the end of the stream"),
            kind: ParseErrorKind::ReadFailure,
            position: ErrorPosition::default(),
        }
    }

    /// The event source ran dry but never delivered its terminal signal
    pub fn new_missing_terminal() -> Self {
        Self {
            msg: String::from("record stream ended without a terminal signal"),
            kind: ParseErrorKind::ReadFailure,
            position: ErrorPosition::default(),
        }
    }

    pub fn with_line(mut self, line: u64) -> Self {
        self.position.line = line;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ParseErrorKind::ReadFailure if self.position.line > 0 => {
                write!(f, "I/O error while reading: {} ({})", self.msg, self.position)
            }
            ParseErrorKind::ReadFailure => write!(f, "I/O error while reading: {}", self.msg),
            ParseErrorKind::WriteFailure => write!(f, "I/O error while writing: {}", self.msg),
            ParseErrorKind::InvalidArgument => write!(f, "invalid argument: {}", self.msg),
        }
    }
}

/// Errors coming out of a writer. Reads go through `new_read_failure` so that
/// they carry their position.
impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self::new_write_failure(&err)
    }
}

impl StdError for ParseError {}
