//! Streaming FASTA parsing and record operations.
//!
//! A FASTA source is turned into a sequence of [`parser::Event`]s: one
//! `Item` per record, then a single `Finished` carrying the outcome of the
//! parse. [`FastaReader`] produces them on the caller's thread, while
//! [`parse_fasta_reader`] and friends move the parse to a producer thread
//! that hands records over one at a time. Consumers fold the events with
//! [`drain`]; the ready-made ones live in [`ops`].
//!
//! ```
//! use fastago::{collect_records, parse_fasta_bytes, Sequence};
//!
//! let records = collect_records(parse_fasta_bytes(b">a\nACGT\nAC\n>b\nTTTT\n")).unwrap();
//! assert_eq!(records[0].id(), b"a");
//! assert_eq!(records[0].wrapped(3).unwrap(), b"ACG\nTAC");
//! ```
#![crate_name = "fastago"]
pub mod compression;
pub mod drain;
pub mod errors;
pub mod ops;
pub mod parser;
pub mod sequence;
pub mod stream;

pub use compression::Compression;
pub use drain::{collect_records, drain};
pub use errors::{ParseError, ParseErrorKind};
pub use parser::{
    parse_fasta_bytes, parse_fasta_file, parse_fasta_reader, parse_fasta_stdin, Event,
    FastaReader, SeqRecord,
};
pub use sequence::{format_seq, Seq, Sequence};
pub use stream::EventStream;
