//! Operations over a record stream.
//!
//! Each operation takes the events of a producer (a [`FastaReader`] or an
//! [`EventStream`]), the options it needs and, when it prints something, the
//! writer to print to. They are all built on [`drain`], so they all stop at
//! the first read or write failure and never report success without the
//! producer's terminal signal.
//!
//! [`FastaReader`]: crate::parser::FastaReader
//! [`EventStream`]: crate::stream::EventStream
use std::io::Write;

use crate::drain::drain;
use crate::errors::ParseError;
use crate::parser::{Event, LineEnding, SeqRecord};
use crate::sequence::{check_line_width, DEFAULT_LINE_WIDTH};

mod rename;
mod stats;
mod subset;
mod transform;

pub use rename::{read_rename_map, rename_from_map, rename_from_regex, RenameMap};
pub use stats::{count, freqs, lengths, FreqsMode, LengthMode};
pub use subset::{read_names, subset, Selector};
pub use transform::{add_id, replace, upper};

/// How records are written back out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Sequence line width, always > 0
    line_width: usize,
    pub line_ending: LineEnding,
}

impl WriteOptions {
    /// Fails on a width that is not strictly positive
    pub fn new(line_width: i64) -> Result<Self, ParseError> {
        Ok(WriteOptions {
            line_width: check_line_width(line_width)?,
            line_ending: LineEnding::Unix,
        })
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            line_width: DEFAULT_LINE_WIDTH,
            line_ending: LineEnding::Unix,
        }
    }
}

/// Writes out every record `map` returns; records it maps to `None` are
/// skipped. Returns how many records were written.
pub(crate) fn write_mapped<I, F>(
    events: I,
    writer: &mut dyn Write,
    options: &WriteOptions,
    mut map: F,
) -> Result<usize, ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
    F: FnMut(SeqRecord) -> Option<SeqRecord>,
{
    drain(
        events,
        (writer, 0),
        |(writer, written), record| {
            if let Some(record) = map(record) {
                record.write(&mut **writer, options.line_width, options.line_ending)?;
                *written += 1;
            }
            Ok(())
        },
        |(writer, written)| {
            writer.flush()?;
            Ok(written)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use crate::parser::parse_fasta_bytes;

    #[test]
    fn test_write_options() {
        assert_eq!(WriteOptions::default().line_width(), 80);
        assert_eq!(WriteOptions::new(3).unwrap().line_width(), 3);
        assert_eq!(
            WriteOptions::new(0).unwrap_err().kind,
            ParseErrorKind::InvalidArgument
        );
        assert_eq!(
            WriteOptions::new(-5).unwrap_err().kind,
            ParseErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_write_mapped_identity() {
        let mut out = Vec::new();
        let n = write_mapped(
            parse_fasta_bytes(b">a\nACGT\nAC\n>b\nTTTT\n"),
            &mut out,
            &WriteOptions::new(3).unwrap(),
            Some,
        )
        .unwrap();
        assert_eq!(n, 2);
        assert_eq!(out, b">a\nACG\nTAC\n>b\nTTT\nT\n");
    }
}
