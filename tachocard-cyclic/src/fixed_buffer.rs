//! Decoder and painter for fixed-slot record rings.

use crate::codec::{decode_fixed_slot, encode_fixed_slot, out_of_order, FixedRecord, SlotRecord};
use crate::fixed::FixedSlots;
use crate::CyclicError;
use log::debug;
use serde::Serialize;

/// A decoded fixed-slot ring together with the bytes it was decoded from.
///
/// `records` holds one entry per slot, oldest first; unused slots are
/// [`SlotRecord::Invalid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixedBuffer<R> {
    #[serde(skip)]
    raw: Vec<u8>,
    newest_pointer: usize,
    pub records: Vec<SlotRecord<R>>,
}

impl<R: FixedRecord> FixedBuffer<R> {
    /// Decode the value bytes of a fixed-slot elementary file.
    ///
    /// # Errors
    ///
    /// Returns [`CyclicError::Truncated`] when the value has no whole slot
    /// and [`CyclicError::PointerOutOfRange`] when the newest pointer is not
    /// a slot index.
    pub fn decode(value: &[u8]) -> Result<Self, CyclicError> {
        let newest_pointer = R::LAYOUT.read_pointer(value)?;
        let slots = FixedSlots::new(R::LAYOUT, value.len(), newest_pointer)?;
        let records: Vec<SlotRecord<R>> = slots
            .rev()
            .map(|range| decode_fixed_slot(&value[range]))
            .collect();
        out_of_order(R::NAME, &records, R::timestamp);
        debug!(
            "Decoded {} {} slots ({} in use), newest at {newest_pointer}",
            records.len(),
            R::NAME,
            records.iter().filter(|r| r.is_valid()).count()
        );
        Ok(Self {
            raw: value.to_vec(),
            newest_pointer,
            records,
        })
    }

    /// Paint `records` over a copy of the original value.
    ///
    /// # Errors
    ///
    /// See [`paint_fixed`].
    pub fn encode(&self) -> Result<Vec<u8>, CyclicError> {
        let mut canvas = self.raw.clone();
        paint_fixed(&mut canvas, self.newest_pointer, &self.records)?;
        Ok(canvas)
    }

    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Slot index of the newest record.
    #[must_use]
    pub fn newest_pointer(&self) -> usize {
        self.newest_pointer
    }

    pub fn valid_records(&self) -> impl Iterator<Item = &R> {
        self.records.iter().filter_map(SlotRecord::as_valid)
    }
}

/// Paint chronologically ordered `records` onto the slots of `value`, and
/// store `newest` in its pointer field.
///
/// Offsets come straight from slot arithmetic. Valid records that differ
/// from what their slot decodes to are re-encoded in place; everything else
/// keeps its bytes. On error `value` is not modified.
///
/// # Errors
///
/// Returns addressing errors from [`FixedSlots::new`],
/// [`CyclicError::RecordCountMismatch`] when `records` does not have one
/// entry per slot, and [`CyclicError::Encode`] when an edited field has no
/// encoding.
pub fn paint_fixed<R: FixedRecord>(
    value: &mut [u8],
    newest: usize,
    records: &[SlotRecord<R>],
) -> Result<(), CyclicError> {
    let slots = FixedSlots::new(R::LAYOUT, value.len(), newest)?;
    if slots.len() != records.len() {
        return Err(CyclicError::RecordCountMismatch {
            slots: slots.len(),
            records: records.len(),
        });
    }

    let mut writes = Vec::new();
    for (range, record) in slots.rev().zip(records) {
        let SlotRecord::Valid(record) = record else {
            continue;
        };
        if matches!(decode_fixed_slot::<R>(&value[range.clone()]), SlotRecord::Valid(ref o) if o == record)
        {
            continue;
        }
        writes.push((range.start, encode_fixed_slot(record, range.start)?));
    }

    R::LAYOUT.write_pointer(value, newest)?;
    for (start, encoded) in &writes {
        value[*start..*start + encoded.len()].copy_from_slice(encoded);
    }
    debug!(
        "Painted {} of {} {} slots",
        writes.len(),
        records.len(),
        R::NAME
    );
    Ok(())
}
