//! Place records of `EF Places`: where daily work periods began and ended.

use crate::codec::{read_wire, write_wire, FixedRecord};
use crate::fixed::BufferLayout;
use deku::prelude::*;
use serde::{Deserialize, Serialize};
use tachocard_dd::{
    EntryTypeDailyWorkPeriod, FieldError, GnssPlace, NationNumeric, OdometerShort, TimeReal,
};

#[derive(Debug, Clone, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
struct PlaceWire {
    entry_time: u32,
    entry_type: u8,
    country: u8,
    region: u8,
    odometer: [u8; 3],
}

/// First-generation place record, 10 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub entry_time: TimeReal,
    pub entry_type: EntryTypeDailyWorkPeriod,
    pub country: NationNumeric,
    /// `RegionNumeric`, only meaningful for Spain.
    pub region: u8,
    pub odometer: OdometerShort,
}

impl FixedRecord for PlaceRecord {
    const NAME: &'static str = "PlaceRecord";
    const LAYOUT: BufferLayout = BufferLayout::new(1, 10);

    fn decode(bytes: &[u8]) -> Result<Self, FieldError> {
        let wire: PlaceWire = read_wire(Self::NAME, bytes, Self::LAYOUT.slot_width)?;
        Ok(Self {
            entry_time: TimeReal(wire.entry_time),
            entry_type: EntryTypeDailyWorkPeriod::decode(wire.entry_type)?,
            country: NationNumeric::decode(wire.country)?,
            region: wire.region,
            odometer: OdometerShort::decode(wire.odometer),
        })
    }

    fn encode(&self, out: &mut [u8]) -> Result<(), FieldError> {
        let wire = PlaceWire {
            entry_time: self.entry_time.seconds(),
            entry_type: self.entry_type.protocol_value(),
            country: self.country.protocol_value(),
            region: self.region,
            odometer: self.odometer.encode()?,
        };
        write_wire(Self::NAME, &wire, out)
    }

    fn timestamp(&self) -> TimeReal {
        self.entry_time
    }
}

impl std::fmt::Display for PlaceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let edge = if self.entry_type.is_begin() { "begin" } else { "end" };
        write!(
            f,
            "{}  {edge:<5}  {:<3}  {}",
            self.entry_time,
            self.country.code(),
            self.odometer
        )
    }
}

/// Second-generation place record with the GNSS position, 21 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecordGen2 {
    #[serde(flatten)]
    pub place: PlaceRecord,
    pub gnss_place: GnssPlace,
}

impl FixedRecord for PlaceRecordGen2 {
    const NAME: &'static str = "PlaceAuthRecord";
    const LAYOUT: BufferLayout = BufferLayout::new(2, 21);

    fn decode(bytes: &[u8]) -> Result<Self, FieldError> {
        tachocard_dd::expect_len(Self::NAME, bytes, Self::LAYOUT.slot_width)?;
        let (place, gnss) = bytes.split_at(PlaceRecord::LAYOUT.slot_width);
        Ok(Self {
            place: PlaceRecord::decode(place)?,
            gnss_place: GnssPlace::decode(gnss)?,
        })
    }

    fn encode(&self, out: &mut [u8]) -> Result<(), FieldError> {
        tachocard_dd::expect_len(Self::NAME, out, Self::LAYOUT.slot_width)?;
        let (place, gnss) = out.split_at_mut(PlaceRecord::LAYOUT.slot_width);
        self.place.encode(place)?;
        self.gnss_place.encode(gnss)
    }

    fn timestamp(&self) -> TimeReal {
        self.place.entry_time
    }
}

impl std::fmt::Display for PlaceRecordGen2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let coords = self.gnss_place.coordinates;
        write!(
            f,
            "{}  ({:.4}, {:.4})",
            self.place,
            coords.latitude_degrees(),
            coords.longitude_degrees()
        )
    }
}
