use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::drain::drain;
use crate::errors::ParseError;
use crate::parser::{Event, SeqRecord};

/// Number of records in the stream
pub fn count<I>(events: I) -> Result<usize, ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    drain(
        events,
        0,
        |n, _| {
            *n += 1;
            Ok(())
        },
        Ok,
    )
}

/// What `lengths` reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMode {
    /// `name\tlength` for every record
    Each,
    /// Mean length over all records (`NaN` without records)
    Average,
    /// Shortest length (`-1` without records)
    Min,
    /// Longest length (`-1` without records)
    Max,
}

impl FromStr for LengthMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "each" => Ok(LengthMode::Each),
            "average" | "mean" => Ok(LengthMode::Average),
            "min" | "minimum" => Ok(LengthMode::Min),
            "max" | "maximum" => Ok(LengthMode::Max),
            _ => Err(ParseError::new_invalid_argument(format!(
                "mode '{}' not recognized. The mode must be one of the following values: \
                 'each' 'average' 'mean' 'min' 'minimum' 'max' 'maximum'",
                s
            ))),
        }
    }
}

impl Default for LengthMode {
    fn default() -> Self {
        LengthMode::Each
    }
}

/// Prints sequence lengths according to `mode`
pub fn lengths<I>(events: I, mode: LengthMode, writer: &mut dyn Write) -> Result<(), ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    match mode {
        LengthMode::Each => drain(
            events,
            writer,
            |writer, record| {
                writer.write_all(record.id())?;
                writeln!(writer, "\t{}", record.seq().len())?;
                Ok(())
            },
            |writer| Ok(writer.flush()?),
        ),
        LengthMode::Average => {
            let (total, n) = drain(
                events,
                (0usize, 0usize),
                |(total, n), record| {
                    *total += record.seq().len();
                    *n += 1;
                    Ok(())
                },
                Ok,
            )?;
            writeln!(writer, "{}", total as f32 / n as f32)?;
            Ok(writer.flush()?)
        }
        LengthMode::Min | LengthMode::Max => {
            let extreme = drain(
                events,
                None,
                |extreme: &mut Option<usize>, record| {
                    let len = record.seq().len();
                    *extreme = Some(match (*extreme, mode) {
                        (None, _) => len,
                        (Some(cur), LengthMode::Min) => cur.min(len),
                        (Some(cur), _) => cur.max(len),
                    });
                    Ok(())
                },
                Ok,
            )?;
            match extreme {
                Some(len) => writeln!(writer, "{}", len)?,
                None => writeln!(writer, "-1")?,
            }
            Ok(writer.flush()?)
        }
    }
}

/// How `freqs` groups its counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreqsMode {
    /// One line per record
    Each,
    /// One table for the whole stream
    Average,
}

impl FromStr for FreqsMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "each" => Ok(FreqsMode::Each),
            "" | "average" | "mean" => Ok(FreqsMode::Average),
            _ => Err(ParseError::new_invalid_argument(format!(
                "mode '{}' not recognized. The mode must be one of the following values: \
                 'each' 'average' 'mean'",
                s
            ))),
        }
    }
}

impl Default for FreqsMode {
    fn default() -> Self {
        FreqsMode::Average
    }
}

/// Occurrences of each (uppercased) symbol
struct SymbolCounts {
    counts: [u64; 256],
    total: u64,
}

impl SymbolCounts {
    fn new() -> Self {
        SymbolCounts {
            counts: [0; 256],
            total: 0,
        }
    }

    fn add(&mut self, seq: &[u8]) {
        for b in seq {
            self.counts[b.to_ascii_uppercase() as usize] += 1;
        }
        self.total += seq.len() as u64;
    }

    /// Writes `symbol sep frequency end` for every symbol seen, in byte order
    fn write(&self, writer: &mut dyn Write, sep: &str, end: &str) -> Result<(), ParseError> {
        for (symbol, &n) in self.counts.iter().enumerate() {
            if n > 0 {
                let freq = Frequency(n as f64 / self.total as f64);
                write!(writer, "{}{}{}{}", symbol as u8 as char, sep, freq, end)?;
            }
        }
        Ok(())
    }
}

struct Frequency(f64);

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Prints symbol frequencies according to `mode`. Symbols are counted
/// case-insensitively and listed in byte order.
pub fn freqs<I>(events: I, mode: FreqsMode, writer: &mut dyn Write) -> Result<(), ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    match mode {
        FreqsMode::Each => drain(
            events,
            writer,
            |writer, record| {
                let mut counts = SymbolCounts::new();
                counts.add(record.seq());
                writer.write_all(record.id())?;
                writer.write_all(b"\t")?;
                counts.write(&mut **writer, "  ", "\t\t")?;
                writer.write_all(b"\n")?;
                Ok(())
            },
            |writer| Ok(writer.flush()?),
        ),
        FreqsMode::Average => {
            let counts = drain(
                events,
                SymbolCounts::new(),
                |counts, record| {
                    counts.add(record.seq());
                    Ok(())
                },
                Ok,
            )?;
            counts.write(writer, "\t", "\n")?;
            Ok(writer.flush()?)
        }
    }
}
