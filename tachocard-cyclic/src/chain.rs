//! Backward walk over a ring of variable-length, length-chained records.
//!
//! ```text
//! [prev_length: u16 BE][length: u16 BE][payload: length - 4]
//! ```
//!
//! `length` counts the whole record including its header. `prev_length` is
//! the length of the record written immediately before this one, so the
//! older neighbour starts `prev_length` bytes earlier (modulo the ring).

use crate::ring::read_wrapped;
use crate::CyclicError;
use log::{debug, warn};
use std::borrow::Cow;

/// Size of the per-record chain header.
pub const CHAIN_HEADER_SIZE: usize = 4;

/// Iteration ceiling for one walk: a year of daily records plus one.
pub const MAX_CHAIN_RECORDS: usize = 366;

/// Position of one chained record inside the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSpan {
    pub start: usize,
    pub length: u16,
    pub prev_length: u16,
}

impl ChainSpan {
    /// Header bytes as stored on the card.
    #[must_use]
    pub fn header(&self) -> [u8; CHAIN_HEADER_SIZE] {
        let [p0, p1] = self.prev_length.to_be_bytes();
        let [l0, l1] = self.length.to_be_bytes();
        [p0, p1, l0, l1]
    }
}

/// One record yielded by [`ChainWalker`]: its span and its bytes (header
/// included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSlot<'a> {
    pub span: ChainSpan,
    pub bytes: Cow<'a, [u8]>,
}

/// Walks a record ring from the newest record back to the oldest.
///
/// The walk ends without error when the cursor cannot hold a header, when a
/// record declares length 0 (unused space), or after the record whose
/// `prev_length` is 0. After yielding an error the walker is exhausted.
pub struct ChainWalker<'a> {
    ring: &'a [u8],
    pos: usize,
    yielded: usize,
    done: bool,
}

impl<'a> ChainWalker<'a> {
    /// Start a walk at byte offset `start` of `ring`.
    #[must_use]
    pub fn new(ring: &'a [u8], start: usize) -> Self {
        Self {
            ring,
            pos: start,
            yielded: 0,
            done: false,
        }
    }

    /// Number of records yielded so far.
    #[must_use]
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    fn fail(&mut self, err: CyclicError) -> Option<Result<ChainSlot<'a>, CyclicError>> {
        warn!("Chain walk aborted after {} records: {err}", self.yielded);
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for ChainWalker<'a> {
    type Item = Result<ChainSlot<'a>, CyclicError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let ring_len = self.ring.len();
        let pos = self.pos;
        if ring_len < CHAIN_HEADER_SIZE || pos > ring_len - CHAIN_HEADER_SIZE {
            debug!("Chain walk stopped: no room for a header at offset {pos}");
            self.done = true;
            return None;
        }

        let prev_length = u16::from_be_bytes([self.ring[pos], self.ring[pos + 1]]);
        let length = u16::from_be_bytes([self.ring[pos + 2], self.ring[pos + 3]]);

        if length == 0 {
            debug!("Chain walk stopped: empty record at offset {pos}");
            self.done = true;
            return None;
        }
        let record_len = usize::from(length);
        if record_len < CHAIN_HEADER_SIZE || record_len > ring_len {
            return self.fail(CyclicError::CorruptChain {
                offset: pos,
                length,
            });
        }

        if self.yielded == MAX_CHAIN_RECORDS {
            return self.fail(CyclicError::ChainTooLong {
                limit: MAX_CHAIN_RECORDS,
            });
        }

        let bytes = read_wrapped(self.ring, pos, record_len);
        self.yielded += 1;

        if prev_length == 0 {
            self.done = true;
        } else {
            let back = usize::from(prev_length) % ring_len;
            self.pos = (pos + ring_len - back) % ring_len;
        }

        Some(Ok(ChainSlot {
            span: ChainSpan {
                start: pos,
                length,
                prev_length,
            },
            bytes,
        }))
    }
}

impl std::iter::FusedIterator for ChainWalker<'_> {}

/// Walk the whole chain and return the spans, newest first.
///
/// # Errors
///
/// Propagates [`CyclicError::CorruptChain`] and [`CyclicError::ChainTooLong`].
pub fn chain_spans(ring: &[u8], start: usize) -> Result<Vec<ChainSpan>, CyclicError> {
    ChainWalker::new(ring, start)
        .map(|slot| slot.map(|slot| slot.span))
        .collect()
}
