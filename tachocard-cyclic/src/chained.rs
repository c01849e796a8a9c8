//! Decoder and painter for length-chained record rings.
//!
//! ```text
//! [oldest: u16 BE][newest: u16 BE][ring ...]
//! ```
//!
//! Both pointers are byte offsets into the ring. Only `newest` drives the
//! walk; `oldest` is carried through untouched.

use crate::chain::{chain_spans, ChainWalker};
use crate::codec::{
    decode_chained_slot, encode_chained_slot, out_of_order, ChainedRecord, SlotRecord,
};
use crate::records::CardActivityDailyRecord;
use crate::ring::{fill_wrapped, read_wrapped, write_wrapped};
use crate::CyclicError;
use log::debug;
use serde::Serialize;

/// Width of the oldest/newest pointer header in front of the ring.
pub const CHAINED_POINTER_SIZE: usize = 4;

/// `EF Driver_Activity_Data`.
pub type ActivityBuffer = ChainedBuffer<CardActivityDailyRecord>;

/// A decoded chained ring together with the bytes it was decoded from.
///
/// `records` is in chronological order, oldest first, and may be edited in
/// place. [`ChainedBuffer::encode`] paints the edits back over a copy of the
/// original bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainedBuffer<R> {
    #[serde(skip)]
    raw: Vec<u8>,
    oldest_pointer: usize,
    newest_pointer: usize,
    pub records: Vec<SlotRecord<R>>,
}

impl<R: ChainedRecord> ChainedBuffer<R> {
    /// Decode the value bytes of a chained elementary file.
    ///
    /// # Errors
    ///
    /// Returns [`CyclicError::Truncated`] for a value without room for the
    /// pointer header and one record header,
    /// [`CyclicError::PointerOutOfRange`] for pointers outside the ring, and
    /// any chain error raised by the walk.
    pub fn decode(value: &[u8]) -> Result<Self, CyclicError> {
        if value.len() <= CHAINED_POINTER_SIZE {
            return Err(CyclicError::Truncated {
                needed: CHAINED_POINTER_SIZE + 1,
                available: value.len(),
            });
        }
        let oldest_pointer = usize::from(u16::from_be_bytes([value[0], value[1]]));
        let newest_pointer = usize::from(u16::from_be_bytes([value[2], value[3]]));
        let ring = &value[CHAINED_POINTER_SIZE..];
        for pointer in [oldest_pointer, newest_pointer] {
            if pointer >= ring.len() {
                return Err(CyclicError::PointerOutOfRange {
                    pointer,
                    limit: ring.len(),
                });
            }
        }

        let records = decode_chain(ring, newest_pointer)?;
        debug!(
            "Decoded {} {} records ({} invalid) from a {}-byte ring",
            records.len(),
            R::NAME,
            records.iter().filter(|r| !r.is_valid()).count(),
            ring.len()
        );

        Ok(Self {
            raw: value.to_vec(),
            oldest_pointer,
            newest_pointer,
            records,
        })
    }

    /// Paint `records` over a copy of the original value.
    ///
    /// The original is left untouched; on error nothing is returned.
    ///
    /// # Errors
    ///
    /// See [`paint_chain`].
    pub fn encode(&self) -> Result<Vec<u8>, CyclicError> {
        let mut canvas = self.raw.clone();
        paint_chain(
            &mut canvas[CHAINED_POINTER_SIZE..],
            self.newest_pointer,
            &self.records,
        )?;
        Ok(canvas)
    }

    /// Value bytes as captured at decode time.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Byte offset of the newest record inside the ring.
    #[must_use]
    pub fn newest_pointer(&self) -> usize {
        self.newest_pointer
    }

    /// Byte offset of the oldest record inside the ring, as stored.
    #[must_use]
    pub fn oldest_pointer(&self) -> usize {
        self.oldest_pointer
    }

    /// Records that decoded, oldest first.
    pub fn valid_records(&self) -> impl Iterator<Item = &R> {
        self.records.iter().filter_map(SlotRecord::as_valid)
    }
}

/// Walk the ring from `newest` and decode every record, oldest first.
///
/// # Errors
///
/// Propagates chain errors from the walk.
pub fn decode_chain<R: ChainedRecord>(
    ring: &[u8],
    newest: usize,
) -> Result<Vec<SlotRecord<R>>, CyclicError> {
    let mut records = ChainWalker::new(ring, newest)
        .map(|slot| slot.map(|slot| decode_chained_slot::<R>(&slot.bytes)))
        .collect::<Result<Vec<_>, _>>()?;
    records.reverse();
    out_of_order(R::NAME, &records, R::timestamp);
    Ok(records)
}

/// Paint chronologically ordered `records` back onto their original slots in
/// `ring`.
///
/// Slot positions are replayed by walking `ring` from `newest` before any
/// byte is written, so headers are always read from the unedited canvas.
/// Valid records that differ from what their slot decodes to are re-encoded
/// behind the slot's original header and the remainder of the slot is
/// zero-filled. Unchanged and invalid records, slack and unused space keep
/// their bytes. On error `ring` is not modified.
///
/// # Errors
///
/// Returns chain errors from the replay, [`CyclicError::RecordCountMismatch`]
/// when `records` does not match the walk, [`CyclicError::RecordTooLarge`]
/// when an edit outgrows its slot, and [`CyclicError::Encode`] when an edited
/// field has no encoding.
pub fn paint_chain<R: ChainedRecord>(
    ring: &mut [u8],
    newest: usize,
    records: &[SlotRecord<R>],
) -> Result<(), CyclicError> {
    let spans = chain_spans(ring, newest)?;
    if spans.len() != records.len() {
        return Err(CyclicError::RecordCountMismatch {
            slots: spans.len(),
            records: records.len(),
        });
    }

    // newest slot pairs with the last record
    let mut writes = Vec::new();
    for (span, record) in spans.iter().zip(records.iter().rev()) {
        let SlotRecord::Valid(record) = record else {
            continue;
        };
        let slot_len = usize::from(span.length);
        let original = read_wrapped(ring, span.start, slot_len);
        if matches!(decode_chained_slot::<R>(&original), SlotRecord::Valid(ref o) if o == record) {
            continue;
        }

        let encoded = encode_chained_slot(span, record)?;
        if encoded.len() > slot_len {
            return Err(CyclicError::RecordTooLarge {
                offset: span.start,
                slot: slot_len,
                encoded: encoded.len(),
            });
        }
        writes.push((*span, encoded));
    }

    for (span, encoded) in &writes {
        write_wrapped(ring, span.start, encoded);
        fill_wrapped(
            ring,
            span.start + encoded.len(),
            usize::from(span.length) - encoded.len(),
            0,
        );
    }
    debug!(
        "Painted {} of {} {} records",
        writes.len(),
        records.len(),
        R::NAME
    );
    Ok(())
}
