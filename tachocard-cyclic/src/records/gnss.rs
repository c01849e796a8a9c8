//! GNSS positions recorded every three hours of accumulated driving.

use crate::codec::{read_wire, write_wire, FixedRecord};
use crate::fixed::BufferLayout;
use deku::prelude::*;
use serde::{Deserialize, Serialize};
use tachocard_dd::{FieldError, GnssPlace, OdometerShort, TimeReal};

#[derive(Debug, Clone, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
struct GnssDrivingWire {
    timestamp: u32,
    gnss_place: [u8; 11],
    odometer: [u8; 3],
}

/// 18 bytes: when the threshold was reached, where, and the odometer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GnssAccumulatedDrivingRecord {
    pub timestamp: TimeReal,
    pub gnss_place: GnssPlace,
    pub odometer: OdometerShort,
}

impl FixedRecord for GnssAccumulatedDrivingRecord {
    const NAME: &'static str = "GNSSAccumulatedDrivingRecord";
    const LAYOUT: BufferLayout = BufferLayout::new(2, 18);

    fn decode(bytes: &[u8]) -> Result<Self, FieldError> {
        let wire: GnssDrivingWire = read_wire(Self::NAME, bytes, Self::LAYOUT.slot_width)?;
        Ok(Self {
            timestamp: TimeReal(wire.timestamp),
            gnss_place: GnssPlace::decode(&wire.gnss_place)?,
            odometer: OdometerShort::decode(wire.odometer),
        })
    }

    fn encode(&self, out: &mut [u8]) -> Result<(), FieldError> {
        let mut gnss_place = [0u8; GnssPlace::SIZE];
        self.gnss_place.encode(&mut gnss_place)?;
        let wire = GnssDrivingWire {
            timestamp: self.timestamp.seconds(),
            gnss_place,
            odometer: self.odometer.encode()?,
        };
        write_wire(Self::NAME, &wire, out)
    }

    fn timestamp(&self) -> TimeReal {
        self.timestamp
    }
}

impl std::fmt::Display for GnssAccumulatedDrivingRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let coords = self.gnss_place.coordinates;
        write!(
            f,
            "{}  ({:.4}, {:.4})  {}",
            self.timestamp,
            coords.latitude_degrees(),
            coords.longitude_degrees(),
            self.odometer
        )
    }
}
