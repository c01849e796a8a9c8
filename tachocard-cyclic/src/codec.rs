//! Slot codecs: one physical record's bytes to a semantic value and back.
//!
//! Record kinds plug in through [`FixedRecord`] (uniform slots) or
//! [`ChainedRecord`] (length-chained slots). Neither knows about the ring it
//! lives in.

use crate::chain::{ChainSpan, CHAIN_HEADER_SIZE};
use crate::fixed::BufferLayout;
use crate::CyclicError;
use deku::prelude::*;
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use tachocard_dd::{FieldError, TimeReal};

/// A decoded slot: structured fields, or the exact bytes of a slot that did
/// not parse (unused, zeroed, corrupt).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotRecord<T> {
    Valid(T),
    Invalid(#[serde(with = "hex::serde")] Vec<u8>),
}

impl<T> SlotRecord<T> {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    pub fn as_valid(&self) -> Option<&T> {
        match self {
            Self::Valid(record) => Some(record),
            Self::Invalid(_) => None,
        }
    }

    #[must_use]
    pub fn as_valid_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Valid(record) => Some(record),
            Self::Invalid(_) => None,
        }
    }

    /// Raw bytes of an invalid slot.
    #[must_use]
    pub fn raw(&self) -> Option<&[u8]> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(bytes) => Some(bytes),
        }
    }
}

/// A record kind stored in uniform slots.
pub trait FixedRecord: Sized + PartialEq {
    /// Name used in logs and errors.
    const NAME: &'static str;
    /// Pointer header and slot width of the elementary file.
    const LAYOUT: BufferLayout;

    /// Decode exactly `LAYOUT.slot_width` bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] when a field does not parse.
    fn decode(bytes: &[u8]) -> Result<Self, FieldError>;

    /// Encode into exactly `LAYOUT.slot_width` bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] when a field has no encoding.
    fn encode(&self, out: &mut [u8]) -> Result<(), FieldError>;

    /// The time the record refers to, for ordering.
    fn timestamp(&self) -> TimeReal;
}

/// A record kind stored in length-chained slots.
///
/// Codecs see only the body after the 4-byte chain header; the header
/// belongs to the slot, not to the record.
pub trait ChainedRecord: Sized + PartialEq {
    const NAME: &'static str;

    /// Decode a record body of any length.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] when the body does not parse.
    fn decode(body: &[u8]) -> Result<Self, FieldError>;

    /// Encode the record body.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] when a field has no encoding.
    fn encode(&self) -> Result<Vec<u8>, FieldError>;

    fn timestamp(&self) -> TimeReal;
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0x00) || bytes.iter().all(|&b| b == 0xff)
}

/// Decode one fixed slot. All-zero and all-ones slots are unused.
pub fn decode_fixed_slot<R: FixedRecord>(bytes: &[u8]) -> SlotRecord<R> {
    if is_blank(bytes) {
        return SlotRecord::Invalid(bytes.to_vec());
    }
    match R::decode(bytes) {
        Ok(record) => SlotRecord::Valid(record),
        Err(e) => {
            trace!("{} slot kept raw: {e}", R::NAME);
            SlotRecord::Invalid(bytes.to_vec())
        }
    }
}

/// Encode one fixed record into a fresh slot-sized buffer.
///
/// # Errors
///
/// Returns [`CyclicError::Encode`] when a field has no encoding.
pub fn encode_fixed_slot<R: FixedRecord>(record: &R, offset: usize) -> Result<Vec<u8>, CyclicError> {
    let mut out = vec![0u8; R::LAYOUT.slot_width];
    record
        .encode(&mut out)
        .map_err(|source| CyclicError::Encode { offset, source })?;
    Ok(out)
}

/// Decode one chained slot (header included).
pub fn decode_chained_slot<R: ChainedRecord>(bytes: &[u8]) -> SlotRecord<R> {
    let Some(body) = bytes.get(CHAIN_HEADER_SIZE..) else {
        return SlotRecord::Invalid(bytes.to_vec());
    };
    match R::decode(body) {
        Ok(record) => SlotRecord::Valid(record),
        Err(e) => {
            trace!("{} record kept raw: {e}", R::NAME);
            SlotRecord::Invalid(bytes.to_vec())
        }
    }
}

/// Encode one chained record behind the header of its original slot.
///
/// # Errors
///
/// Returns [`CyclicError::Encode`] when a field has no encoding.
pub fn encode_chained_slot<R: ChainedRecord>(
    span: &ChainSpan,
    record: &R,
) -> Result<Vec<u8>, CyclicError> {
    let body = record.encode().map_err(|source| CyclicError::Encode {
        offset: span.start,
        source,
    })?;
    let mut out = Vec::with_capacity(CHAIN_HEADER_SIZE + body.len());
    out.extend_from_slice(&span.header());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Count adjacent valid records whose timestamps go backwards, warning for
/// each. Invalid records are skipped over.
pub(crate) fn out_of_order<T>(
    name: &str,
    records: &[SlotRecord<T>],
    timestamp: impl Fn(&T) -> TimeReal,
) -> usize {
    let mut count = 0;
    let mut previous: Option<TimeReal> = None;
    for (index, record) in records.iter().enumerate() {
        let Some(record) = record.as_valid() else {
            continue;
        };
        let time = timestamp(record);
        if let Some(prev) = previous.filter(|&prev| time < prev) {
            warn!("{name} record {index} at {time} is older than its predecessor at {prev}");
            count += 1;
        }
        previous = Some(time);
    }
    count
}

/// Parse a deku wire struct occupying exactly `width` bytes.
pub(crate) fn read_wire<'a, T>(name: &'static str, bytes: &'a [u8], width: usize) -> Result<T, FieldError>
where
    T: DekuContainerRead<'a>,
{
    tachocard_dd::expect_len(name, bytes, width)?;
    T::from_bytes((bytes, 0))
        .map(|(_, wire)| wire)
        .map_err(|_| FieldError::Length {
            field: name,
            expected: width,
            found: bytes.len(),
        })
}

/// Serialize a deku wire struct into `out`, which must match its width.
pub(crate) fn write_wire<T>(name: &'static str, wire: &T, out: &mut [u8]) -> Result<(), FieldError>
where
    T: DekuContainerWrite,
{
    let bytes = wire.to_bytes().map_err(|_| FieldError::Length {
        field: name,
        expected: out.len(),
        found: 0,
    })?;
    tachocard_dd::expect_len(name, &bytes, out.len())?;
    out.copy_from_slice(&bytes);
    Ok(())
}
