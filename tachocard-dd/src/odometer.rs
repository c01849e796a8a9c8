use crate::FieldError;
use serde::{Deserialize, Serialize};

/// Vehicle odometer value in kilometres, 3 bytes (`OdometerShort`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OdometerShort(pub u32);

impl OdometerShort {
    pub const SIZE: usize = 3;
    pub const MAX: u32 = 0x00ff_ffff;

    #[must_use]
    pub fn decode(bytes: [u8; Self::SIZE]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// # Errors
    ///
    /// Returns [`FieldError::OutOfRange`] above 24 bits.
    pub fn encode(self) -> Result<[u8; Self::SIZE], FieldError> {
        if self.0 > Self::MAX {
            return Err(FieldError::OutOfRange {
                field: "OdometerShort",
                value: i64::from(self.0),
                max: i64::from(Self::MAX),
            });
        }
        let [_, a, b, c] = self.0.to_be_bytes();
        Ok([a, b, c])
    }
}

impl std::fmt::Display for OdometerShort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} km", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_byte_value() {
        let odo = OdometerShort::decode([0x01, 0xe2, 0x40]);
        assert_eq!(odo, OdometerShort(123_456));
        assert_eq!(odo.encode(), Ok([0x01, 0xe2, 0x40]));
        assert_eq!(odo.to_string(), "123456 km");
    }

    #[test]
    fn overflow_rejected() {
        assert!(OdometerShort(0x0100_0000).encode().is_err());
        assert_eq!(OdometerShort(OdometerShort::MAX).encode(), Ok([0xff; 3]));
    }
}
