use std::collections::HashSet;
use std::io::{Read, Write};

use log::debug;
use regex::bytes::Regex;

use crate::errors::ParseError;
use crate::ops::{write_mapped, WriteOptions};
use crate::parser::{Event, LineReader, SeqRecord};

/// Which records `subset` keeps
#[derive(Debug, Clone)]
pub enum Selector {
    /// Records whose whole name is in the set
    Names(HashSet<Vec<u8>>),
    /// Records whose name contains a match of the pattern
    Pattern(Regex),
}

impl Selector {
    pub fn matches(&self, id: &[u8]) -> bool {
        match self {
            Selector::Names(names) => names.contains(id),
            Selector::Pattern(regex) => regex.is_match(id),
        }
    }
}

impl<'a> std::iter::FromIterator<&'a str> for Selector {
    fn from_iter<I: IntoIterator<Item = &'a str>>(names: I) -> Self {
        Selector::Names(names.into_iter().map(|n| n.as_bytes().to_vec()).collect())
    }
}

/// Reads one name per line. Lines are taken verbatim apart from their line
/// ending, so surrounding spaces are part of the name.
pub fn read_names<R: Read>(reader: R) -> Result<HashSet<Vec<u8>>, ParseError> {
    let mut names = HashSet::new();
    for event in LineReader::new(reader) {
        match event {
            Event::Item(line) => {
                names.insert(line.text);
            }
            Event::Finished(res) => {
                res?;
                break;
            }
        }
    }
    debug!("read {} names", names.len());
    Ok(names)
}

/// Writes the records `selector` matches, or the ones it does not match when
/// `exclude` is set. Returns how many records were written.
pub fn subset<I>(
    events: I,
    selector: &Selector,
    exclude: bool,
    writer: &mut dyn Write,
    options: &WriteOptions,
) -> Result<usize, ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    write_mapped(events, writer, options, |record| {
        if selector.matches(record.id()) != exclude {
            Some(record)
        } else {
            None
        }
    })
}
