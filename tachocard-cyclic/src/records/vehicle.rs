//! Vehicle records of `EF Vehicles_Used`.

use crate::codec::{read_wire, write_wire, FixedRecord};
use crate::fixed::BufferLayout;
use deku::prelude::*;
use serde::{Deserialize, Serialize};
use tachocard_dd::{
    decode_bcd_number, encode_bcd_number, FieldError, OdometerShort, TimeReal,
    VehicleRegistration,
};

#[derive(Debug, Clone, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
struct VehicleWire {
    odometer_begin: [u8; 3],
    odometer_end: [u8; 3],
    first_use: u32,
    last_use: u32,
    registration: [u8; 15],
    vu_data_block_counter: [u8; 2],
}

/// One period of use of one vehicle, 31 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVehicleRecord {
    pub odometer_begin: OdometerShort,
    pub odometer_end: OdometerShort,
    pub first_use: TimeReal,
    pub last_use: TimeReal,
    pub registration: VehicleRegistration,
    /// Vehicle unit's data block counter at first use (4 BCD digits).
    pub vu_data_block_counter: u16,
}

impl CardVehicleRecord {
    /// Kilometres driven with the card in this vehicle.
    #[must_use]
    pub fn distance(&self) -> u32 {
        self.odometer_end.0.saturating_sub(self.odometer_begin.0)
    }
}

impl FixedRecord for CardVehicleRecord {
    const NAME: &'static str = "CardVehicleRecord";
    const LAYOUT: BufferLayout = BufferLayout::new(2, 31);

    fn decode(bytes: &[u8]) -> Result<Self, FieldError> {
        let wire: VehicleWire = read_wire(Self::NAME, bytes, Self::LAYOUT.slot_width)?;
        let counter = decode_bcd_number("vuDataBlockCounter", &wire.vu_data_block_counter)?;
        Ok(Self {
            odometer_begin: OdometerShort::decode(wire.odometer_begin),
            odometer_end: OdometerShort::decode(wire.odometer_end),
            first_use: TimeReal(wire.first_use),
            last_use: TimeReal(wire.last_use),
            registration: VehicleRegistration::decode(&wire.registration)?,
            vu_data_block_counter: u16::try_from(counter).unwrap_or(u16::MAX),
        })
    }

    fn encode(&self, out: &mut [u8]) -> Result<(), FieldError> {
        let mut registration = [0u8; VehicleRegistration::SIZE];
        self.registration.encode(&mut registration)?;
        let mut vu_data_block_counter = [0u8; 2];
        encode_bcd_number(
            "vuDataBlockCounter",
            u32::from(self.vu_data_block_counter),
            &mut vu_data_block_counter,
        )?;
        let wire = VehicleWire {
            odometer_begin: self.odometer_begin.encode()?,
            odometer_end: self.odometer_end.encode()?,
            first_use: self.first_use.seconds(),
            last_use: self.last_use.seconds(),
            registration,
            vu_data_block_counter,
        };
        write_wire(Self::NAME, &wire, out)
    }

    fn timestamp(&self) -> TimeReal {
        self.first_use
    }
}

impl std::fmt::Display for CardVehicleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} .. {}  {:<18}  {} km",
            self.first_use,
            self.last_use,
            self.registration.to_string(),
            self.distance()
        )
    }
}
