use derive_more::{Display, Error};
use tachocard_dd::FieldError;

/// Errors raised while walking, decoding or painting a cyclic buffer.
///
/// Every variant is fatal for the elementary file it was raised on: there is
/// no meaningful partial result for a cyclic structure that cannot be
/// trusted. A single slot failing field-level decoding is not an error; the
/// slot becomes [`SlotRecord::Invalid`](crate::SlotRecord::Invalid) instead.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CyclicError {
    /// The value is too short for its pointer header or a single slot.
    #[display("buffer holds {available} bytes, at least {needed} required")]
    Truncated { needed: usize, available: usize },
    /// A newest/oldest pointer outside the addressable range.
    #[display("pointer {pointer} outside [0, {limit})")]
    PointerOutOfRange { pointer: usize, limit: usize },
    /// A chained record header declares a length below its own header size
    /// or beyond the ring.
    #[display("corrupt chain at offset {offset}: record length {length}")]
    CorruptChain { offset: usize, length: u16 },
    /// The backward walk did not reach the oldest record within the
    /// iteration ceiling.
    #[display("chain exceeds {limit} records")]
    ChainTooLong { limit: usize },
    /// An edited record no longer fits its original slot.
    #[display("record at offset {offset} encodes to {encoded} bytes, slot holds {slot}")]
    RecordTooLarge {
        offset: usize,
        slot: usize,
        encoded: usize,
    },
    /// The record sequence does not line up with the pointer-derived slots.
    #[display("{records} records supplied for {slots} slots")]
    RecordCountMismatch { slots: usize, records: usize },
    /// An edited field has no encoding.
    #[display("cannot encode record at offset {offset}: {source}")]
    Encode { offset: usize, source: FieldError },
}
