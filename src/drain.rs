//! The one loop every record consumer is built on.
use crate::errors::ParseError;
use crate::parser::{Event, SeqRecord};

/// Consumes `events` until the terminal signal.
///
/// Every item is folded into `state` by `reducer`; once the producer signals
/// a clean end, `finalizer` turns the state into the result. A failed read is
/// returned as is, as is the first error from `reducer`, in which case the
/// remaining events are dropped unread (for a threaded producer this releases
/// it). Nothing is reduced after the terminal signal, and an event source that
/// runs out without one is reported as a read failure rather than a success.
///
/// ```
/// use fastago::drain::drain;
/// use fastago::parser::parse_fasta_bytes;
///
/// let events = parse_fasta_bytes(b">a\nACGT\n>b\nTT\n");
/// let bases = drain(
///     events,
///     0,
///     |total, record| {
///         *total += record.seq().len();
///         Ok(())
///     },
///     Ok,
/// );
/// assert_eq!(bases, Ok(6));
/// ```
pub fn drain<I, T, A, O, F, G>(
    events: I,
    mut state: A,
    mut reducer: F,
    finalizer: G,
) -> Result<O, ParseError>
where
    I: IntoIterator<Item = Event<T>>,
    F: FnMut(&mut A, T) -> Result<(), ParseError>,
    G: FnOnce(A) -> Result<O, ParseError>,
{
    for event in events {
        match event {
            Event::Item(item) => reducer(&mut state, item)?,
            Event::Finished(Ok(())) => return finalizer(state),
            Event::Finished(Err(e)) => return Err(e),
        }
    }
    Err(ParseError::new_missing_terminal())
}

/// Gathers all the records of a stream in memory
pub fn collect_records<I>(events: I) -> Result<Vec<SeqRecord>, ParseError>
where
    I: IntoIterator<Item = Event<SeqRecord>>,
{
    drain(
        events,
        Vec::new(),
        |records, record| {
            records.push(record);
            Ok(())
        },
        Ok,
    )
}
