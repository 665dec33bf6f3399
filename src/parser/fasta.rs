//! The FASTA record producer.
//!
//! This is a line-oriented state machine: a name line (first non-blank byte
//! `>`) opens a record, every other non-blank line is trimmed and appended to
//! the open record's sequence, blank lines are skipped. It never rejects
//! content; the only failure it reports is a read error from the underlying
//! stream.
use std::fs::File;
use std::io;
use std::mem;
use std::path::Path;

use log::{debug, trace, warn};

use crate::errors::ParseError;
use crate::parser::record::SeqRecord;
use crate::parser::utils::{trim, Event, LineBuffer, LineEnding, Position, BUFSIZE};
use crate::sequence::Seq;

#[derive(Debug)]
enum State {
    /// No name line seen yet; sequence lines build an anonymous record
    Seeking,
    /// A name line was seen and its record is being built
    Accumulating { id: Vec<u8>, position: Position },
}

/// Parser for FASTA input.
///
/// Yields an [`Event::Item`] per record and then exactly one
/// [`Event::Finished`], after which it yields nothing and the input has been
/// dropped. Only records that are complete are ever yielded: if reading
/// fails, the record being built is discarded and the error is reported as
/// the terminal event.
///
/// Records are only emitted when their name is non-empty, except for the last
/// one: a `>` line without a name opens a record that is silently dropped when
/// another name line follows, yet emitted at the end of the input. Sequence
/// lines before the first name line are collected under an empty name and
/// follow the same rule, so they only come out when the input has no name
/// line at all.
pub struct Reader<R: io::Read> {
    lines: Option<LineBuffer<R>>,
    state: State,
    seq: Seq,
    count: usize,
    finished: bool,
    line_ending: Option<LineEnding>,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Creates a new reader with the default buffer size of 64 KiB
    ///
    /// # Example:
    ///
    /// ```
    /// use fastago::parser::{Event, FastaReader};
    /// let fasta = b">id\nSEQU\nENCE";
    ///
    /// let mut reader = FastaReader::new(&fasta[..]);
    /// match reader.next() {
    ///     Some(Event::Item(record)) => assert_eq!(record.seq().as_bytes(), b"SEQUENCE"),
    ///     _ => unreachable!(),
    /// }
    /// assert_eq!(reader.next(), Some(Event::Finished(Ok(()))));
    /// assert_eq!(reader.next(), None);
    /// ```
    #[inline]
    pub fn new(reader: R) -> Reader<R> {
        Reader::with_capacity(reader, BUFSIZE)
    }

    /// Creates a new reader with a given buffer capacity. Lines longer than
    /// the capacity are fine, they only take several reads.
    #[inline]
    pub fn with_capacity(reader: R, capacity: usize) -> Reader<R> {
        debug!("starting FASTA parse (buffer capacity {})", capacity);
        Reader {
            lines: Some(LineBuffer::with_capacity(reader, capacity)),
            state: State::Seeking,
            seq: Seq::default(),
            count: 0,
            finished: false,
            line_ending: None,
        }
    }

    /// Whether the input uses Windows or Unix style line endings, as seen on
    /// the first line. `None` until a full line has been read.
    pub fn line_ending(&self) -> Option<LineEnding> {
        match &self.lines {
            Some(lines) => lines.line_ending(),
            None => self.line_ending,
        }
    }

    /// Number of records emitted so far
    pub fn records_emitted(&self) -> usize {
        self.count
    }

    #[inline]
    fn emit(&mut self, record: SeqRecord) -> Option<Event<SeqRecord>> {
        self.count += 1;
        trace!(
            "record {} '{}' ({} bases, line {})",
            self.count,
            record.id_lossy(),
            record.seq().len(),
            record.start_line_number()
        );
        Some(Event::Item(record))
    }

    /// Drop the input; the stream is never read again after this
    fn release(&mut self) {
        if let Some(lines) = self.lines.take() {
            self.line_ending = lines.line_ending();
        }
    }

    fn finish(&mut self, result: Result<(), ParseError>) -> Option<Event<SeqRecord>> {
        self.release();
        self.finished = true;
        match &result {
            Ok(()) => debug!("FASTA parse finished: {} records", self.count),
            Err(e) => warn!("FASTA parse failed after {} records: {}", self.count, e),
        }
        Some(Event::Finished(result))
    }
}

impl Reader<File> {
    /// Creates a reader from a file path. The file is read as is; see
    /// [`parse_fasta_file`](crate::parser::parse_fasta_file) for
    /// decompression.
    ///
    /// # Example:
    ///
    /// ```no_run
    /// use fastago::parser::FastaReader;
    ///
    /// let mut reader = FastaReader::from_path("seqs.fasta").unwrap();
    ///
    /// // (... do something with the reader)
    /// ```
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Reader<File>> {
        File::open(path).map(Reader::new)
    }
}

impl<R: io::Read> Iterator for Reader<R> {
    type Item = Event<SeqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let lines = match self.lines.as_mut() {
            Some(lines) => lines,
            // the last record went out on the previous call
            None => return self.finish(Ok(())),
        };

        loop {
            match lines.read_line() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    let err = ParseError::new_read_failure(&e, lines.position().line() + 1);
                    return self.finish(Err(err));
                }
            }

            let line = trim(lines.line());
            if line.is_empty() {
                continue;
            }
            if line[0] == b'>' {
                let opened = State::Accumulating {
                    id: trim(&line[1..]).to_vec(),
                    position: lines.position().clone(),
                };
                let seq = mem::take(&mut self.seq);
                if let State::Accumulating { id, position } = mem::replace(&mut self.state, opened)
                {
                    if !id.is_empty() {
                        return self.emit(SeqRecord::new(id, seq, position));
                    }
                }
            } else {
                self.seq.push_line(line);
            }
        }

        // end of input: flush whatever is pending, the terminal event comes next
        self.release();
        let seq = mem::take(&mut self.seq);
        match mem::replace(&mut self.state, State::Seeking) {
            State::Accumulating { id, position } => self.emit(SeqRecord::new(id, seq, position)),
            State::Seeking if !seq.is_empty() => {
                self.emit(SeqRecord::new(Vec::new(), seq, Position::default()))
            }
            State::Seeking => self.finish(Ok(())),
        }
    }
}

impl<R: io::Read> std::iter::FusedIterator for Reader<R> {}
