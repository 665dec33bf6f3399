use std::borrow::Cow;
use std::io::Write;

use crate::errors::ParseError;
use crate::parser::utils::{LineEnding, Position};
use crate::sequence::{Seq, Sequence};

/// A named FASTA sequence, owned by whoever received it from the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    id: Vec<u8>,
    seq: Seq,
    position: Position,
}

impl SeqRecord {
    pub fn new(id: Vec<u8>, seq: Seq, position: Position) -> Self {
        SeqRecord { id, seq, position }
    }

    /// Returns the name of the record, without the `>` and surrounding whitespace
    #[inline]
    pub fn id(&self) -> &[u8] {
        &self.id
    }

    /// The name as text, with invalid UTF-8 replaced
    pub fn id_lossy(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.id)
    }

    /// Returns the sequence, with every line break and surrounding whitespace removed
    #[inline]
    pub fn seq(&self) -> &Seq {
        &self.seq
    }

    /// Return the line number of the name line of this record. 0 for the
    /// anonymous record built from content preceding any name line.
    pub fn start_line_number(&self) -> u64 {
        self.position.line
    }

    /// Return the line/byte position of the name line of this record
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Same record under another name
    pub fn with_id(self, id: Vec<u8>) -> Self {
        SeqRecord { id, ..self }
    }

    /// Same record with another sequence
    pub fn with_seq(self, seq: Seq) -> Self {
        SeqRecord { seq, ..self }
    }

    pub fn into_parts(self) -> (Vec<u8>, Seq) {
        (self.id, self.seq)
    }

    /// Write the record to a `Write` instance as FASTA, wrapping the sequence
    /// every `width` characters
    pub fn write(
        &self,
        writer: &mut dyn Write,
        width: usize,
        line_ending: LineEnding,
    ) -> Result<(), ParseError> {
        write_fasta(&self.id, &self.seq, width, writer, line_ending)
    }
}

impl<'a> Sequence<'a> for SeqRecord {
    fn sequence(&'a self) -> &'a [u8] {
        &self.seq
    }
}

/// Write a FASTA record: the name line, then the sequence wrapped the same way
/// as [`format_seq`](crate::sequence::format_seq), then a final line ending.
///
/// A `width` of 0 is rejected before anything is written.
pub fn write_fasta(
    id: &[u8],
    seq: &[u8],
    width: usize,
    writer: &mut dyn Write,
    line_ending: LineEnding,
) -> Result<(), ParseError> {
    if width == 0 {
        return Err(ParseError::new_invalid_width(0));
    }
    let ending = line_ending.to_bytes();
    writer.write_all(b">")?;
    writer.write_all(id)?;
    writer.write_all(ending)?;
    for (i, chunk) in seq.chunks(width).enumerate() {
        if i > 0 {
            writer.write_all(ending)?;
        }
        writer.write_all(chunk)?;
    }
    writer.write_all(ending)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::ParseErrorKind;
    use crate::sequence::format_seq;

    #[test]
    fn test_write_fasta() {
        let mut out = Vec::new();
        write_fasta(b"a", b"ACGTAC", 3, &mut out, LineEnding::Unix).unwrap();
        assert_eq!(out, b">a\nACG\nTAC\n");

        let mut out = Vec::new();
        write_fasta(b"b", b"TTTT", 3, &mut out, LineEnding::Windows).unwrap();
        assert_eq!(out, b">b\r\nTTT\r\nT\r\n");

        // empty sequences still get their (empty) sequence line
        let mut out = Vec::new();
        write_fasta(b"empty", b"", 80, &mut out, LineEnding::Unix).unwrap();
        assert_eq!(out, b">empty\n\n");
    }

    #[test]
    fn test_write_matches_formatter() {
        let seq = b"ACGTTGCAAGGCTTAACCGGTAA";
        for width in 1..30 {
            let mut out = Vec::new();
            write_fasta(b"x", seq, width, &mut out, LineEnding::Unix).unwrap();
            let mut expected = b">x\n".to_vec();
            expected.extend(format_seq(seq, width).unwrap());
            expected.push(b'\n');
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_write_zero_width() {
        let mut out = Vec::new();
        let e = write_fasta(b"a", b"ACGT", 0, &mut out, LineEnding::Unix).unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidArgument);
        assert!(out.is_empty());
    }

    #[test]
    fn test_record_accessors() {
        let rec = SeqRecord::new(b"seq1".to_vec(), Seq::from("acgt"), Position::new(3, 10));
        assert_eq!(rec.id(), b"seq1");
        assert_eq!(rec.id_lossy(), "seq1");
        assert_eq!(rec.num_bases(), 4);
        assert_eq!(rec.start_line_number(), 3);
        assert_eq!(rec.position().byte(), 10);

        let rec = rec.with_id(b"renamed".to_vec());
        let upper = rec.to_upper().into_owned();
        let rec = rec.with_seq(Seq::from(upper));
        assert_eq!(rec.id(), b"renamed");
        assert_eq!(rec.seq().as_bytes(), b"ACGT");

        let mut out = Vec::new();
        rec.write(&mut out, 2, LineEnding::Unix).unwrap();
        assert_eq!(out, b">renamed\nAC\nGT\n");
    }
}
