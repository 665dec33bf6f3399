use std::borrow::Cow;
use std::io::Write;

use crate::errors::ParseError;
use crate::ops::{write_mapped, WriteOptions};
use crate::parser::{Event, SeqRecord};
use crate::sequence::{Seq, Sequence};

/// Swaps in the sequence returned by `f`, keeping the record as is when `f`
/// only borrows
fn map_seq<F>(record: SeqRecord, f: F) -> SeqRecord
where
    F: for<'a> FnOnce(&'a Seq) -> Cow<'a, [u8]>,
{
    let changed = match f(record.seq()) {
        Cow::Owned(seq) => Some(seq),
        Cow::Borrowed(_) => None,
    };
    match changed {
        Some(seq) => record.with_seq(Seq::from(seq)),
        None => record,
    }
}

/// Writes every record with its sequence uppercased
pub fn upper<I>(events: I, writer: &mut dyn Write, options: &WriteOptions) -> Result<usize, ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    write_mapped(events, writer, options, |record| {
        Some(map_seq(record, |seq| seq.to_upper()))
    })
}

/// Writes every record with each occurrence of `from` in its sequence
/// replaced by `to`. Replacement happens before the sequence is wrapped, so a
/// pattern never matches across a line break.
pub fn replace<I>(
    events: I,
    from: &[u8],
    to: &[u8],
    writer: &mut dyn Write,
    options: &WriteOptions,
) -> Result<usize, ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    if from.is_empty() {
        return Err(ParseError::new_invalid_argument(
            "the pattern to replace must not be empty",
        ));
    }
    write_mapped(events, writer, options, |record| {
        Some(map_seq(record, |seq| seq.replace_all(from, to)))
    })
}

/// Writes every record renamed to `prefix + name + suffix`
pub fn add_id<I>(
    events: I,
    prefix: &[u8],
    suffix: &[u8],
    writer: &mut dyn Write,
    options: &WriteOptions,
) -> Result<usize, ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    write_mapped(events, writer, options, |record| {
        let mut id = Vec::with_capacity(prefix.len() + record.id().len() + suffix.len());
        id.extend_from_slice(prefix);
        id.extend_from_slice(record.id());
        id.extend_from_slice(suffix);
        Some(record.with_id(id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use crate::parser::parse_fasta_bytes;
    use crate::parser::test_utils::FailingReader;
    use crate::parser::FastaReader;

    fn opts(width: i64) -> WriteOptions {
        WriteOptions::new(width).unwrap()
    }

    #[test]
    fn test_upper() {
        let mut out = Vec::new();
        let n = upper(parse_fasta_bytes(b">a\nacgt\nAc\n>b\nTTTT\n"), &mut out, &opts(4)).unwrap();
        assert_eq!(n, 2);
        assert_eq!(out, b">a\nACGT\nAC\n>b\nTTTT\n");
    }

    #[test]
    fn test_upper_keeps_name() {
        let mut out = Vec::new();
        upper(parse_fasta_bytes(b">lower name\nac\n"), &mut out, &opts(80)).unwrap();
        assert_eq!(out, b">lower name\nAC\n");
    }

    #[test]
    fn test_replace() {
        let mut out = Vec::new();
        replace(
            parse_fasta_bytes(b">a\nAC-GT\n--\n"),
            b"-",
            b"N",
            &mut out,
            &opts(80),
        )
        .unwrap();
        assert_eq!(out, b">a\nACNGTNN\n");
    }

    #[test]
    fn test_replace_before_wrapping() {
        // "GT" spans the original line break and the output one
        let mut out = Vec::new();
        replace(parse_fasta_bytes(b">a\nACG\nTAC\n"), b"GT", b"", &mut out, &opts(2)).unwrap();
        assert_eq!(out, b">a\nAC\nAC\n");
    }

    #[test]
    fn test_replace_empty_pattern() {
        let mut out = Vec::new();
        let e = replace(parse_fasta_bytes(b">a\nAC\n"), b"", b"N", &mut out, &opts(80)).unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidArgument);
        assert!(out.is_empty());
    }

    #[test]
    fn test_add_id() {
        let mut out = Vec::new();
        add_id(
            parse_fasta_bytes(b">a\nAC\n>b\nGT\n"),
            b"pre_",
            b"_suf",
            &mut out,
            &opts(80),
        )
        .unwrap();
        assert_eq!(out, b">pre_a_suf\nAC\n>pre_b_suf\nGT\n");
    }

    #[test]
    fn test_output_stops_at_read_failure() {
        let mut out = Vec::new();
        let e = upper(
            FastaReader::new(FailingReader::new(b">a\nac\n>b\nTT")),
            &mut out,
            &opts(80),
        )
        .unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::ReadFailure);
        assert_eq!(out, b">a\nAC\n");
    }
}
