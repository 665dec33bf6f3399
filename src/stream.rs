//! Running a producer on its own thread.
//!
//! [`spawn`] moves an event source (usually a [`FastaReader`]) to a dedicated
//! thread and hands its events over a zero-capacity channel: the producer
//! blocks on every handoff until the consumer takes the event, so at most one
//! record is ever in flight. The consumer side, [`EventStream`], is itself an
//! iterator of the same events, ending with exactly one [`Event::Finished`].
//!
//! Dropping an `EventStream` before its end hangs up the channel, which makes
//! the producer stop at its next handoff instead of blocking forever.
//!
//! [`FastaReader`]: crate::parser::FastaReader
use std::sync::mpsc::{sync_channel, Receiver};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::errors::ParseError;
use crate::parser::Event;

/// Consumer end of a producer thread
pub struct EventStream<T> {
    receiver: Receiver<Event<T>>,
    handle: Option<JoinHandle<()>>,
    finished: bool,
}

/// Starts `source` on a new thread and returns the stream of its events.
///
/// ```
/// use fastago::parser::{Event, FastaReader};
/// use fastago::stream::spawn;
///
/// let input: &'static [u8] = b">a\nACGT\n>b\nTT\n";
/// let events: Vec<_> = spawn(FastaReader::new(input)).collect();
/// assert_eq!(events.len(), 3);
/// assert_eq!(events[2], Event::Finished(Ok(())));
/// ```
pub fn spawn<S, T>(source: S) -> EventStream<T>
where
    S: IntoIterator<Item = Event<T>> + Send + 'static,
    T: Send + 'static,
{
    let (sender, receiver) = sync_channel(0);
    let handle = thread::spawn(move || {
        for event in source {
            let terminal = event.is_terminal();
            if sender.send(event).is_err() {
                debug!("consumer hung up, stopping producer");
                return;
            }
            if terminal {
                return;
            }
        }
    });
    EventStream {
        receiver,
        handle: Some(handle),
        finished: false,
    }
}

impl<T> EventStream<T> {
    /// Waits for the producer thread, returns true if it panicked
    fn join(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => handle.join().is_err(),
            None => false,
        }
    }
}

impl<T> Iterator for EventStream<T> {
    type Item = Event<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.receiver.recv() {
            Ok(event) => {
                if event.is_terminal() {
                    self.finished = true;
                    self.join();
                }
                Some(event)
            }
            Err(_) => {
                // the producer is gone without saying how it ended
                self.finished = true;
                let panicked = self.join();
                warn!("record producer exited early (panicked: {})", panicked);
                Some(Event::Finished(Err(ParseError::new_producer_lost())))
            }
        }
    }
}

impl<T> std::iter::FusedIterator for EventStream<T> {}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::errors::ParseErrorKind;
    use crate::parser::FastaReader;

    #[test]
    fn test_records_then_terminal() {
        let input = Cursor::new(b">a\nACGT\nAC\n>b\nTTTT\n".to_vec());
        let events: Vec<_> = spawn(FastaReader::new(input)).collect();
        assert_eq!(events.len(), 3);
        match (&events[0], &events[1]) {
            (Event::Item(a), Event::Item(b)) => {
                assert_eq!(a.id(), b"a");
                assert_eq!(a.seq().as_bytes(), b"ACGTAC");
                assert_eq!(b.id(), b"b");
                assert_eq!(b.seq().as_bytes(), b"TTTT");
            }
            e => panic!("unexpected events {:?}", e),
        }
        assert_eq!(events[2], Event::Finished(Ok(())));
    }

    #[test]
    fn test_empty_input() {
        let events: Vec<_> = spawn(FastaReader::new(Cursor::new(Vec::new()))).collect();
        assert_eq!(events, vec![Event::Finished(Ok(()))]);
    }

    /// Counts how many events the producer managed to hand over
    struct Counted {
        produced: Arc<AtomicUsize>,
        remaining: usize,
    }

    impl Iterator for Counted {
        type Item = Event<usize>;

        fn next(&mut self) -> Option<Self::Item> {
            if self.remaining == 0 {
                return Some(Event::Finished(Ok(())));
            }
            self.remaining -= 1;
            Some(Event::Item(self.produced.fetch_add(1, Ordering::SeqCst)))
        }
    }

    #[test]
    fn test_backpressure() {
        let produced = Arc::new(AtomicUsize::new(0));
        let mut stream = spawn(Counted {
            produced: Arc::clone(&produced),
            remaining: 1000,
        });
        assert_eq!(stream.next(), Some(Event::Item(0)));
        assert_eq!(stream.next(), Some(Event::Item(1)));
        // give the producer a chance to run ahead if it could
        thread::sleep(std::time::Duration::from_millis(50));
        // the item being handed over right now has been produced, nothing further
        assert!(produced.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_drop_releases_producer() {
        let produced = Arc::new(AtomicUsize::new(0));
        let mut stream = spawn(Counted {
            produced: Arc::clone(&produced),
            remaining: usize::MAX,
        });
        assert_eq!(stream.next(), Some(Event::Item(0)));
        let handle = stream.handle.take().unwrap();
        drop(stream);
        // would hang forever if the producer kept waiting on the handoff
        handle.join().unwrap();
    }

    #[test]
    fn test_terminal_only_once() {
        let mut stream = spawn(Counted {
            produced: Arc::new(AtomicUsize::new(0)),
            remaining: 0,
        });
        assert_eq!(stream.next(), Some(Event::Finished(Ok(()))));
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn test_producer_panic() {
        let source = (0..2).map(|i| {
            if i == 1 {
                panic!("producer blew up");
            }
            Event::Item(i)
        });
        let events: Vec<_> = spawn(source).collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Event::Item(0));
        match &events[1] {
            Event::Finished(Err(e)) => assert_eq!(e.kind, ParseErrorKind::ReadFailure),
            e => panic!("unexpected event {:?}", e),
        }
    }

    #[test]
    fn test_source_without_terminal() {
        let events: Vec<_> = spawn(vec![Event::Item(1u8)]).collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], Event::Finished(Err(_))));
    }
}
