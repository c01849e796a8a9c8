use crate::{expect_len, FieldError, TimeReal};
use serde::{Deserialize, Serialize};

const COORD_MIN: i32 = -0x0080_0000;
const COORD_MAX: i32 = 0x007f_ffff;

/// Latitude and longitude as signed 24-bit integers in the `±DDMM.M × 10`
/// notation (`GeoCoordinates`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: i32,
    pub longitude: i32,
}

impl GeoCoordinates {
    pub const SIZE: usize = 6;

    #[must_use]
    pub fn decode(bytes: [u8; Self::SIZE]) -> Self {
        Self {
            latitude: decode_i24([bytes[0], bytes[1], bytes[2]]),
            longitude: decode_i24([bytes[3], bytes[4], bytes[5]]),
        }
    }

    /// # Errors
    ///
    /// Returns [`FieldError::OutOfRange`] for a value outside 24 bits.
    pub fn encode(self) -> Result<[u8; Self::SIZE], FieldError> {
        let [a, b, c] = encode_i24("latitude", self.latitude)?;
        let [d, e, f] = encode_i24("longitude", self.longitude)?;
        Ok([a, b, c, d, e, f])
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn latitude_degrees(self) -> f64 {
        to_degrees(self.latitude)
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn longitude_degrees(self) -> f64 {
        to_degrees(self.longitude)
    }
}

fn decode_i24(bytes: [u8; 3]) -> i32 {
    // sign-extend through the top byte
    i32::from_be_bytes([bytes[0], bytes[1], bytes[2], 0]) >> 8
}

fn encode_i24(field: &'static str, value: i32) -> Result<[u8; 3], FieldError> {
    if !(COORD_MIN..=COORD_MAX).contains(&value) {
        return Err(FieldError::OutOfRange {
            field,
            value: i64::from(value),
            max: i64::from(COORD_MAX),
        });
    }
    let [_, a, b, c] = value.to_be_bytes();
    Ok([a, b, c])
}

fn to_degrees(value: i32) -> f64 {
    let tenths = f64::from(value.abs());
    let degrees = (tenths / 1000.0).trunc();
    let minutes = (tenths - degrees * 1000.0) / 10.0;
    let result = degrees + minutes / 60.0;
    if value < 0 {
        -result
    } else {
        result
    }
}

/// A position with its acquisition time and accuracy (`GNSSPlaceRecord`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GnssPlace {
    pub timestamp: TimeReal,
    /// Horizontal dilution of precision, tenths.
    pub accuracy: u8,
    pub coordinates: GeoCoordinates,
}

impl GnssPlace {
    pub const SIZE: usize = 11;

    /// # Errors
    ///
    /// Returns [`FieldError::Length`] for a slice that is not 11 bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, FieldError> {
        expect_len("GNSSPlaceRecord", bytes, Self::SIZE)?;
        Ok(Self {
            timestamp: TimeReal::decode([bytes[0], bytes[1], bytes[2], bytes[3]]),
            accuracy: bytes[4],
            coordinates: GeoCoordinates::decode([
                bytes[5], bytes[6], bytes[7], bytes[8], bytes[9], bytes[10],
            ]),
        })
    }

    /// # Errors
    ///
    /// Returns [`FieldError::Length`] for a slice that is not 11 bytes, or
    /// [`FieldError::OutOfRange`] for coordinates outside 24 bits.
    pub fn encode(&self, out: &mut [u8]) -> Result<(), FieldError> {
        expect_len("GNSSPlaceRecord", out, Self::SIZE)?;
        out[0..4].copy_from_slice(&self.timestamp.encode());
        out[4] = self.accuracy;
        out[5..11].copy_from_slice(&self.coordinates.encode()?);
        Ok(())
    }
}
