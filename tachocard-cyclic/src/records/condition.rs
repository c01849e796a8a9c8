//! Specific condition records (out of scope, ferry/train crossing).

use crate::codec::{read_wire, write_wire, FixedRecord};
use crate::fixed::BufferLayout;
use deku::prelude::*;
use serde::{Deserialize, Serialize};
use tachocard_dd::{FieldError, SpecificConditionType, TimeReal};

#[derive(Debug, Clone, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
struct ConditionWire {
    entry_time: u32,
    condition_type: u8,
}

/// 5 bytes: when the condition was entered and which one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificConditionRecord {
    pub entry_time: TimeReal,
    pub condition_type: SpecificConditionType,
}

impl FixedRecord for SpecificConditionRecord {
    const NAME: &'static str = "SpecificConditionRecord";
    const LAYOUT: BufferLayout = BufferLayout::new(2, 5);

    fn decode(bytes: &[u8]) -> Result<Self, FieldError> {
        let wire: ConditionWire = read_wire(Self::NAME, bytes, Self::LAYOUT.slot_width)?;
        Ok(Self {
            entry_time: TimeReal(wire.entry_time),
            condition_type: SpecificConditionType::decode(wire.condition_type)?,
        })
    }

    fn encode(&self, out: &mut [u8]) -> Result<(), FieldError> {
        let wire = ConditionWire {
            entry_time: self.entry_time.seconds(),
            condition_type: self.condition_type.protocol_value(),
        };
        write_wire(Self::NAME, &wire, out)
    }

    fn timestamp(&self) -> TimeReal {
        self.entry_time
    }
}

impl std::fmt::Display for SpecificConditionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  {}", self.entry_time, self.condition_type.label())
    }
}
