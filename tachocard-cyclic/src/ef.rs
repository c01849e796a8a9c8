//! Dispatch over the cyclic elementary files a driver card carries.

use crate::chained::ActivityBuffer;
use crate::codec::{FixedRecord, SlotRecord};
use crate::fixed::BufferLayout;
use crate::fixed_buffer::FixedBuffer;
use crate::records::{
    CardVehicleRecord, GnssAccumulatedDrivingRecord, PlaceRecord, PlaceRecordGen2,
    SpecificConditionRecord,
};
use crate::CyclicError;
use serde::{Deserialize, Serialize};

/// Cyclic elementary files understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EfKind {
    DriverActivity,
    Places,
    PlacesGen2,
    VehiclesUsed,
    SpecificConditions,
    GnssAccumulatedDriving,
}

impl EfKind {
    pub const ALL: [Self; 6] = [
        Self::DriverActivity,
        Self::Places,
        Self::PlacesGen2,
        Self::VehiclesUsed,
        Self::SpecificConditions,
        Self::GnssAccumulatedDriving,
    ];

    /// Name of the elementary file.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::DriverActivity => "EF Driver_Activity_Data",
            Self::Places | Self::PlacesGen2 => "EF Places",
            Self::VehiclesUsed => "EF Vehicles_Used",
            Self::SpecificConditions => "EF Specific_Conditions",
            Self::GnssAccumulatedDriving => "EF GNSS_Places",
        }
    }

    /// Fixed-slot geometry, or `None` for the chained activity ring.
    #[must_use]
    pub fn layout(self) -> Option<BufferLayout> {
        match self {
            Self::DriverActivity => None,
            Self::Places => Some(PlaceRecord::LAYOUT),
            Self::PlacesGen2 => Some(PlaceRecordGen2::LAYOUT),
            Self::VehiclesUsed => Some(CardVehicleRecord::LAYOUT),
            Self::SpecificConditions => Some(SpecificConditionRecord::LAYOUT),
            Self::GnssAccumulatedDriving => Some(GnssAccumulatedDrivingRecord::LAYOUT),
        }
    }
}

/// A decoded cyclic elementary file of any supported kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "buffer")]
pub enum CyclicEf {
    DriverActivity(ActivityBuffer),
    Places(FixedBuffer<PlaceRecord>),
    PlacesGen2(FixedBuffer<PlaceRecordGen2>),
    VehiclesUsed(FixedBuffer<CardVehicleRecord>),
    SpecificConditions(FixedBuffer<SpecificConditionRecord>),
    GnssAccumulatedDriving(FixedBuffer<GnssAccumulatedDrivingRecord>),
}

macro_rules! each_buffer {
    ($ef:expr, $buffer:ident => $body:expr) => {
        match $ef {
            CyclicEf::DriverActivity($buffer) => $body,
            CyclicEf::Places($buffer) => $body,
            CyclicEf::PlacesGen2($buffer) => $body,
            CyclicEf::VehiclesUsed($buffer) => $body,
            CyclicEf::SpecificConditions($buffer) => $body,
            CyclicEf::GnssAccumulatedDriving($buffer) => $body,
        }
    };
}

/// Slot counts of a decoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BufferSummary {
    pub records: usize,
    pub valid: usize,
}

impl BufferSummary {
    fn of<T>(records: &[SlotRecord<T>]) -> Self {
        Self {
            records: records.len(),
            valid: records.iter().filter(|r| r.is_valid()).count(),
        }
    }

    #[must_use]
    pub fn invalid(&self) -> usize {
        self.records - self.valid
    }
}

impl CyclicEf {
    /// Decode the value bytes of an elementary file of `kind`.
    ///
    /// # Errors
    ///
    /// Returns any structural error of the underlying buffer.
    pub fn decode(kind: EfKind, value: &[u8]) -> Result<Self, CyclicError> {
        Ok(match kind {
            EfKind::DriverActivity => Self::DriverActivity(ActivityBuffer::decode(value)?),
            EfKind::Places => Self::Places(FixedBuffer::decode(value)?),
            EfKind::PlacesGen2 => Self::PlacesGen2(FixedBuffer::decode(value)?),
            EfKind::VehiclesUsed => Self::VehiclesUsed(FixedBuffer::decode(value)?),
            EfKind::SpecificConditions => Self::SpecificConditions(FixedBuffer::decode(value)?),
            EfKind::GnssAccumulatedDriving => {
                Self::GnssAccumulatedDriving(FixedBuffer::decode(value)?)
            }
        })
    }

    /// Paint the records back over the original value bytes.
    ///
    /// # Errors
    ///
    /// Returns any paint error of the underlying buffer.
    pub fn encode(&self) -> Result<Vec<u8>, CyclicError> {
        each_buffer!(self, buffer => buffer.encode())
    }

    #[must_use]
    pub fn kind(&self) -> EfKind {
        match self {
            Self::DriverActivity(_) => EfKind::DriverActivity,
            Self::Places(_) => EfKind::Places,
            Self::PlacesGen2(_) => EfKind::PlacesGen2,
            Self::VehiclesUsed(_) => EfKind::VehiclesUsed,
            Self::SpecificConditions(_) => EfKind::SpecificConditions,
            Self::GnssAccumulatedDriving(_) => EfKind::GnssAccumulatedDriving,
        }
    }

    /// Value bytes as captured at decode time.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        each_buffer!(self, buffer => buffer.raw())
    }

    #[must_use]
    pub fn newest_pointer(&self) -> usize {
        each_buffer!(self, buffer => buffer.newest_pointer())
    }

    #[must_use]
    pub fn summary(&self) -> BufferSummary {
        each_buffer!(self, buffer => BufferSummary::of(&buffer.records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_record_widths() {
        let widths: Vec<_> = EfKind::ALL
            .iter()
            .filter_map(|kind| kind.layout())
            .map(|layout| (layout.pointer_size, layout.slot_width))
            .collect();
        assert_eq!(widths, [(1, 10), (2, 21), (2, 31), (2, 5), (2, 18)]);
    }

    #[test]
    fn dispatch_roundtrip() {
        let mut value = vec![0u8; 2 + 3 * 5];
        value[1] = 2;
        value[12..17].copy_from_slice(&[0x65, 0x92, 0x00, 0x80, 0x01]);
        let ef = CyclicEf::decode(EfKind::SpecificConditions, &value).expect("valid buffer");
        assert_eq!(ef.kind(), EfKind::SpecificConditions);
        assert_eq!(ef.newest_pointer(), 2);
        assert_eq!(ef.summary(), BufferSummary { records: 3, valid: 1 });
        assert_eq!(ef.summary().invalid(), 2);
        assert_eq!(ef.encode().expect("paints"), value);
        assert_eq!(ef.raw(), value.as_slice());
    }

    #[test]
    fn kind_tag_in_json() {
        let value = [0u8, 0, 0, 0, 0, 0, 0];
        let ef = CyclicEf::decode(EfKind::SpecificConditions, &value).expect("valid buffer");
        let json = serde_json::to_value(&ef).expect("serializable");
        assert_eq!(json["kind"], "SpecificConditions");
        assert_eq!(json["buffer"]["newest_pointer"], 0);
        assert_eq!(json["buffer"]["records"][0]["Invalid"], "0000000000");
    }
}
