//! Codec for the cyclic elementary files of a tachograph driver card.
//!
//! A driver card keeps its history in rings that overwrite the oldest
//! entries once full. Two shapes exist.
//!
//! # Chained ring
//!
//! Used by `EF Driver_Activity_Data`. Records have variable length and
//! link backwards to their predecessor.
//!
//! ```text
//! [oldest: u16 BE][newest: u16 BE][ring: N bytes]
//! ```
//!
//! Each record inside the ring is:
//! - `prev_length`: u16 BE, length of the previous record (0 for the oldest)
//! - `length`: u16 BE, length of this record including the header
//! - `body`: `[u8; length - 4]`
//!
//! Records may straddle the end of the ring and continue at its start.
//!
//! # Fixed-slot ring
//!
//! Used by every other cyclic file. Records have the same width and are
//! addressed by slot index.
//!
//! ```text
//! [newest: 1 or 2 bytes BE][slot 0]...[slot n-1][slack]
//! ```
//!
//! Decoding a buffer keeps the original bytes. Encoding paints the records
//! back onto a copy of them, so unused slots and slack survive untouched.

pub mod chain;
pub mod chained;
pub mod codec;
pub mod ef;
mod error;
pub mod fixed;
pub mod fixed_buffer;
pub mod records;
pub mod ring;

pub use chain::{ChainSlot, ChainSpan, ChainWalker, CHAIN_HEADER_SIZE, MAX_CHAIN_RECORDS};
pub use chained::{decode_chain, paint_chain, ActivityBuffer, ChainedBuffer, CHAINED_POINTER_SIZE};
pub use codec::{ChainedRecord, FixedRecord, SlotRecord};
pub use ef::{BufferSummary, CyclicEf, EfKind};
pub use error::CyclicError;
pub use fixed::{BufferLayout, FixedSlots};
pub use fixed_buffer::{paint_fixed, FixedBuffer};
pub use records::{
    CardActivityDailyRecord, CardVehicleRecord, GnssAccumulatedDrivingRecord, PlaceRecord,
    PlaceRecordGen2, SpecificConditionRecord,
};
