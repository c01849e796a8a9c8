//! Daily activity records of `EF Driver_Activity_Data`.
//!
//! Body layout after the chain header:
//!
//! ```text
//! [date: TimeReal 4][presence counter: BCD 2][distance: u16 BE]
//! [change 0: 2][change 1: 2]... until the declared record length
//! ```
//!
//! Change entries holding `0x0000` or `0xFFFF` are padding. They consume two
//! bytes each but produce no entry.

use crate::codec::{read_wire, write_wire, ChainedRecord};
use deku::prelude::*;
use serde::{Deserialize, Serialize};
use tachocard_dd::{
    decode_bcd_number, encode_bcd_number, ActivityChangeInfo, FieldError, TimeReal,
};

#[derive(Debug, Clone, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
struct ActivityDayWire {
    date: u32,
    presence_counter: [u8; 2],
    distance: u16,
}

/// Fixed part of the body, before the change entries.
pub const ACTIVITY_DAY_FIXED_SIZE: usize = 8;

/// Everything the card recorded for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardActivityDailyRecord {
    /// Midnight UTC of the recorded day.
    pub date: TimeReal,
    /// Days the card was in use, modulo 10 000.
    pub presence_counter: u16,
    /// Kilometres travelled that day.
    pub distance: u16,
    /// Activity changes in order, padding entries removed.
    pub changes: Vec<ActivityChangeInfo>,
}

impl CardActivityDailyRecord {
    /// Body length this record encodes to.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        ACTIVITY_DAY_FIXED_SIZE + ActivityChangeInfo::SIZE * self.changes.len()
    }
}

impl ChainedRecord for CardActivityDailyRecord {
    const NAME: &'static str = "CardActivityDailyRecord";

    fn decode(body: &[u8]) -> Result<Self, FieldError> {
        if body.len() < ACTIVITY_DAY_FIXED_SIZE {
            return Err(FieldError::Length {
                field: Self::NAME,
                expected: ACTIVITY_DAY_FIXED_SIZE,
                found: body.len(),
            });
        }
        let (fixed, tail) = body.split_at(ACTIVITY_DAY_FIXED_SIZE);
        // an odd tail leaves the whole day undecodable
        if tail.len() % ActivityChangeInfo::SIZE != 0 {
            return Err(FieldError::Length {
                field: "activityChangeInfo",
                expected: tail.len() / ActivityChangeInfo::SIZE * ActivityChangeInfo::SIZE,
                found: tail.len(),
            });
        }

        let wire: ActivityDayWire = read_wire(Self::NAME, fixed, ACTIVITY_DAY_FIXED_SIZE)?;
        let presence_counter =
            decode_bcd_number("activityDailyPresenceCounter", &wire.presence_counter)?;

        let changes = tail
            .chunks_exact(ActivityChangeInfo::SIZE)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .filter(|&raw| !ActivityChangeInfo::is_sentinel(raw))
            .map(ActivityChangeInfo::decode)
            .collect();

        Ok(Self {
            date: TimeReal(wire.date),
            presence_counter: u16::try_from(presence_counter).unwrap_or(u16::MAX),
            distance: wire.distance,
            changes,
        })
    }

    fn encode(&self) -> Result<Vec<u8>, FieldError> {
        let mut presence_counter = [0u8; 2];
        encode_bcd_number(
            "activityDailyPresenceCounter",
            u32::from(self.presence_counter),
            &mut presence_counter,
        )?;
        let wire = ActivityDayWire {
            date: self.date.seconds(),
            presence_counter,
            distance: self.distance,
        };

        let mut out = vec![0u8; self.encoded_len()];
        write_wire(Self::NAME, &wire, &mut out[..ACTIVITY_DAY_FIXED_SIZE])?;
        for (slot, change) in out[ACTIVITY_DAY_FIXED_SIZE..]
            .chunks_exact_mut(ActivityChangeInfo::SIZE)
            .zip(&self.changes)
        {
            slot.copy_from_slice(&change.encode()?.to_be_bytes());
        }
        Ok(out)
    }

    fn timestamp(&self) -> TimeReal {
        self.date
    }
}

impl std::fmt::Display for CardActivityDailyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let day = self
            .date
            .to_datetime()
            .map_or_else(|| self.date.to_string(), |dt| dt.format("%Y-%m-%d").to_string());
        write!(
            f,
            "{day}  #{:04}  {:>4} km  {} changes",
            self.presence_counter,
            self.distance,
            self.changes.len()
        )
    }
}
