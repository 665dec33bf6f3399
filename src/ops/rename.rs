use std::collections::HashMap;
use std::io::{Read, Write};

use log::debug;
use memchr::memchr;
use regex::bytes::Regex;

use crate::errors::ParseError;
use crate::ops::{write_mapped, WriteOptions};
use crate::parser::{Event, LineReader, SeqRecord};

/// Old name to new name
pub type RenameMap = HashMap<Vec<u8>, Vec<u8>>;

/// Reads a rename map: one `old<TAB>new` pair per line. Anything after a
/// second tab is ignored and blank lines are skipped. A later line for the
/// same old name overrides an earlier one.
pub fn read_rename_map<R: Read>(reader: R) -> Result<RenameMap, ParseError> {
    let mut map = RenameMap::new();
    for (idx, event) in LineReader::new(reader).enumerate() {
        let line = match event {
            Event::Item(line) => line,
            Event::Finished(res) => {
                res?;
                break;
            }
        };
        if line.text.is_empty() {
            continue;
        }
        let old_end = memchr(b'\t', &line.text).ok_or_else(|| {
            ParseError::new_invalid_argument(format!(
                "rename map line has no tab separating old and new names: '{}'",
                String::from_utf8_lossy(&line.text)
            ))
            .with_line(idx as u64 + 1)
        })?;
        let rest = &line.text[old_end + 1..];
        let new_end = memchr(b'\t', rest).unwrap_or(rest.len());
        map.insert(line.text[..old_end].to_vec(), rest[..new_end].to_vec());
    }
    debug!("read {} renaming rules", map.len());
    Ok(map)
}

/// Writes every record, renamed when its name is in `map`
pub fn rename_from_map<I>(
    events: I,
    map: &RenameMap,
    writer: &mut dyn Write,
    options: &WriteOptions,
) -> Result<usize, ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    write_mapped(events, writer, options, |record| match map.get(record.id()) {
        Some(new) => Some(record.with_id(new.clone())),
        None => Some(record),
    })
}

/// Writes every record with all matches of `regex` in its name replaced by
/// `replacement`, which may refer to capture groups (`$1`, `${name}`).
pub fn rename_from_regex<I>(
    events: I,
    regex: &Regex,
    replacement: &[u8],
    writer: &mut dyn Write,
    options: &WriteOptions,
) -> Result<usize, ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    write_mapped(events, writer, options, |record| {
        let id = regex.replace_all(record.id(), replacement).into_owned();
        Some(record.with_id(id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseErrorKind;
    use crate::parser::parse_fasta_bytes;
    use std::io::Cursor;

    #[test]
    fn test_read_rename_map() {
        let map = read_rename_map(Cursor::new(&b"a\tx\r\n\nb\ty\textra\nc\t\n"[..])).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map[&b"a".to_vec()], b"x");
        assert_eq!(map[&b"b".to_vec()], b"y");
        assert_eq!(map[&b"c".to_vec()], b"");
    }

    #[test]
    fn test_read_rename_map_missing_tab() {
        let e = read_rename_map(Cursor::new(&b"a\tx\nbroken\n"[..])).unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidArgument);
        assert_eq!(e.position.line, 2);
    }

    #[test]
    fn test_rename_from_map() {
        let mut map = RenameMap::new();
        map.insert(b"a".to_vec(), b"alpha".to_vec());
        let mut out = Vec::new();
        let n = rename_from_map(
            parse_fasta_bytes(b">a\nAC\n>b\nGT\n"),
            &map,
            &mut out,
            &WriteOptions::default(),
        )
        .unwrap();
        assert_eq!(n, 2);
        assert_eq!(out, b">alpha\nAC\n>b\nGT\n");
    }

    #[test]
    fn test_rename_from_regex() {
        let regex = Regex::new(r"seq_(\d+)").unwrap();
        let mut out = Vec::new();
        rename_from_regex(
            parse_fasta_bytes(b">seq_1 seq_22\nAC\n>other\nGT\n"),
            &regex,
            b"s$1",
            &mut out,
            &WriteOptions::default(),
        )
        .unwrap();
        assert_eq!(out, b">s1 s22\nAC\n>other\nGT\n");
    }
}
