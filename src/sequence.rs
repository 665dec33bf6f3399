//! The sequence value carried by records, and the functions that reflow it
//! into fixed-width lines.
use std::borrow::Cow;
use std::convert::TryFrom;
use std::fmt;
use std::ops::Deref;

use memchr::memmem;

use crate::errors::ParseError;

/// Default width of sequence lines when writing FASTA
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// An immutable run of sequence characters.
///
/// The content is opaque: no alphabet is enforced, and the length is the
/// number of bytes. Only the parser can grow a `Seq`, one line at a time.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Seq(Vec<u8>);

impl Seq {
    #[inline]
    pub(crate) fn push_line(&mut self, line: &[u8]) {
        self.0.extend_from_slice(line);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Seq {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Seq {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Seq {
    fn from(v: Vec<u8>) -> Self {
        Seq(v)
    }
}

impl From<&[u8]> for Seq {
    fn from(v: &[u8]) -> Self {
        Seq(v.to_vec())
    }
}

impl From<&str> for Seq {
    fn from(v: &str) -> Self {
        Seq(v.as_bytes().to_vec())
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Seq({:?})", String::from_utf8_lossy(&self.0))
    }
}

/// Split `seq` into consecutive chunks of `width` bytes joined by `\n`.
///
/// Every chunk but the last is exactly `width` long; the last one holds the
/// remainder, so a sequence whose length is a multiple of `width` does not get
/// a trailing empty line. An empty sequence gives a single empty line, i.e. an
/// empty buffer. A `width` of 0 is rejected before anything is produced.
///
/// ```
/// use fastago::sequence::format_seq;
///
/// assert_eq!(format_seq(b"ACGTAC", 3).unwrap(), b"ACG\nTAC");
/// assert_eq!(format_seq(b"TTTT", 3).unwrap(), b"TTT\nT");
/// assert!(format_seq(b"TTTT", 0).is_err());
/// ```
pub fn format_seq(seq: &[u8], width: usize) -> Result<Vec<u8>, ParseError> {
    if width == 0 {
        return Err(ParseError::new_invalid_width(0));
    }
    let mut buf = Vec::with_capacity(seq.len() + seq.len() / width);
    for (i, chunk) in seq.chunks(width).enumerate() {
        if i > 0 {
            buf.push(b'\n');
        }
        buf.extend_from_slice(chunk);
    }
    Ok(buf)
}

/// Turns a signed, user-supplied line width into one `format_seq` accepts.
pub fn check_line_width(width: i64) -> Result<usize, ParseError> {
    match usize::try_from(width) {
        Ok(w) if w > 0 => Ok(w),
        _ => Err(ParseError::new_invalid_width(width)),
    }
}

/// Anything that exposes sequence bytes, along with the few transformations
/// the record operations need.
pub trait Sequence<'a> {
    fn sequence(&'a self) -> &'a [u8];

    /// Number of characters (bytes) in the sequence
    fn num_bases(&'a self) -> usize {
        self.sequence().len()
    }

    /// See [`format_seq`]
    fn wrapped(&'a self, width: usize) -> Result<Vec<u8>, ParseError> {
        format_seq(self.sequence(), width)
    }

    /// ASCII-uppercased copy of the sequence; borrows when nothing changes.
    ///
    /// ```
    /// use fastago::Sequence;
    ///
    /// assert_eq!(b"acGt"[..].to_upper().as_ref(), b"ACGT");
    /// ```
    fn to_upper(&'a self) -> Cow<'a, [u8]> {
        let seq = self.sequence();
        if seq.iter().any(u8::is_ascii_lowercase) {
            seq.to_ascii_uppercase().into()
        } else {
            seq.into()
        }
    }

    /// Replace every non-overlapping occurrence of `from` by `to`, scanning
    /// left to right. An empty `from` leaves the sequence untouched.
    fn replace_all(&'a self, from: &[u8], to: &[u8]) -> Cow<'a, [u8]> {
        let seq = self.sequence();
        if from.is_empty() {
            return seq.into();
        }
        let mut matches = memmem::find_iter(seq, from).peekable();
        if matches.peek().is_none() {
            return seq.into();
        }
        let mut new_buf = Vec::with_capacity(seq.len());
        let mut last = 0;
        for pos in matches {
            new_buf.extend_from_slice(&seq[last..pos]);
            new_buf.extend_from_slice(to);
            last = pos + from.len();
        }
        new_buf.extend_from_slice(&seq[last..]);
        new_buf.into()
    }
}

impl<'a> Sequence<'a> for &'a [u8] {
    fn sequence(&'a self) -> &'a [u8] {
        self
    }
}

impl<'a> Sequence<'a> for [u8] {
    fn sequence(&'a self) -> &'a [u8] {
        self
    }
}

impl<'a> Sequence<'a> for Seq {
    fn sequence(&'a self) -> &'a [u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;

    #[test]
    fn test_format_seq() {
        assert_eq!(format_seq(b"ACGTAC", 3).unwrap(), b"ACG\nTAC");
        assert_eq!(format_seq(b"TTTT", 3).unwrap(), b"TTT\nT");
        // shorter than the width
        assert_eq!(format_seq(b"AC", 80).unwrap(), b"AC");
        // exact multiple: no trailing empty line
        assert_eq!(format_seq(b"ACGTAC", 2).unwrap(), b"AC\nGT\nAC");
        assert_eq!(format_seq(b"ACGT", 4).unwrap(), b"ACGT");
        assert_eq!(format_seq(b"ACGT", 1).unwrap(), b"A\nC\nG\nT");
        // empty sequence is one empty line
        assert_eq!(format_seq(b"", 5).unwrap(), b"");
    }

    #[test]
    fn test_format_seq_zero_width() {
        let e = format_seq(b"ACGT", 0).unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidArgument);
        let e = format_seq(b"", 0).unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidArgument);
    }

    #[test]
    fn test_format_seq_chunks_and_rejoin() {
        let seq = b"ACGTTGCAAGGCTTAACCGGTA";
        for width in 1..=seq.len() + 2 {
            let out = format_seq(seq, width).unwrap();
            let lines: Vec<&[u8]> = out.split(|b| *b == b'\n').collect();
            let (last, init) = lines.split_last().unwrap();
            assert!(init.iter().all(|l| l.len() == width), "width {}", width);
            assert!(!last.is_empty() && last.len() <= width, "width {}", width);
            let rejoined: Vec<u8> = lines.concat();
            assert_eq!(&rejoined[..], &seq[..], "width {}", width);
        }
    }

    #[test]
    fn test_check_line_width() {
        assert_eq!(check_line_width(80).unwrap(), 80);
        assert_eq!(check_line_width(1).unwrap(), 1);
        for bad in &[0, -1, i64::MIN] {
            let e = check_line_width(*bad).unwrap_err();
            assert_eq!(e.kind, ParseErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_to_upper() {
        let seq = Seq::from("acgtN");
        assert_eq!(seq.to_upper().as_ref(), b"ACGTN");
        let seq = b"ACGT";
        assert!(matches!(seq[..].to_upper(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(b"ACGTA"[..].replace_all(b"A", b"N").as_ref(), b"NCGTN");
        assert_eq!(b"AAAA"[..].replace_all(b"AA", b"T").as_ref(), b"TT");
        assert_eq!(b"ACGT"[..].replace_all(b"CG", b"").as_ref(), b"AT");
        assert!(matches!(b"ACGT"[..].replace_all(b"U", b"T"), Cow::Borrowed(_)));
        assert_eq!(b"ACGT"[..].replace_all(b"", b"T").as_ref(), b"ACGT");
    }

    #[test]
    fn test_seq_value() {
        let mut seq = Seq::default();
        assert!(seq.is_empty());
        seq.push_line(b"ACGT");
        seq.push_line(b"AC");
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.num_bases(), 6);
        assert_eq!(&seq[..], b"ACGTAC");
        assert_eq!(format!("{:?}", seq), "Seq(\"ACGTAC\")");
    }
}
