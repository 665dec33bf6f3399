//! Handles all the FASTA parsing
use std::io::{self, Read};
use std::path::Path;

use crate::compression::{open_input, Compression};
use crate::errors::ParseError;
use crate::stream::{spawn, EventStream};

pub use crate::parser::fasta::Reader as FastaReader;
pub use crate::parser::lines::{Line, LineReader};

mod record;
mod utils;

mod fasta;
mod lines;

pub use record::{write_fasta, SeqRecord};
pub use utils::{Event, LineEnding, Position};

#[cfg(test)]
pub(crate) use utils::test_utils;

/// Parses FASTA records out of any `Read` stream on a producer thread.
/// The reader is used as is; wrap it with
/// [`decompress`](crate::compression::decompress) first if it may be
/// compressed.
pub fn parse_fasta_reader<R>(reader: R) -> EventStream<SeqRecord>
where
    R: Read + Send + 'static,
{
    spawn(FastaReader::new(reader))
}

/// The main entry point of fastago.
/// Opens the file at `path` and parses its records on a producer thread.
/// Unless `compression` forces a codec, gzip, bzip2 and xz input is detected
/// from the file extension or from its first bytes (the latter needs the
/// `compression` feature).
pub fn parse_fasta_file<P: AsRef<Path>>(
    path: P,
    compression: Option<Compression>,
) -> Result<EventStream<SeqRecord>, ParseError> {
    let reader = open_input(Some(path.as_ref()), compression)?;
    Ok(parse_fasta_reader(reader))
}

/// Same as [`parse_fasta_file`], reading from stdin
pub fn parse_fasta_stdin(
    compression: Option<Compression>,
) -> Result<EventStream<SeqRecord>, ParseError> {
    let reader = open_input(None, compression)?;
    Ok(parse_fasta_reader(reader))
}

/// Parses a complete in-memory buffer without spawning a thread
pub fn parse_fasta_bytes(data: &[u8]) -> FastaReader<io::Cursor<&[u8]>> {
    FastaReader::new(io::Cursor::new(data))
}
