use crate::{expect_len, FieldError, NationNumeric};
use serde::{Deserialize, Serialize};

/// Registering nation and registration number of a vehicle
/// (`VehicleRegistrationIdentification`).
///
/// ```text
/// [nation: 1][code page: 1][number: 13, space padded]
/// ```
///
/// The number bytes are mapped one-to-one onto `U+0000..=U+00FF`, which is
/// exact for code page 1 (ISO 8859-1) and lossless for the others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleRegistration {
    pub nation: NationNumeric,
    pub code_page: u8,
    /// Registration number without trailing padding.
    pub number: String,
}

impl VehicleRegistration {
    /// Field width in bytes.
    pub const SIZE: usize = 15;
    /// Width of the number text.
    pub const NUMBER_LEN: usize = 13;

    const FIELD: &'static str = "VehicleRegistrationNumber";

    /// # Errors
    ///
    /// Returns [`FieldError::Length`] for a slice that is not 15 bytes, or
    /// [`FieldError::UnknownValue`] for a reserved nation.
    pub fn decode(bytes: &[u8]) -> Result<Self, FieldError> {
        expect_len("VehicleRegistrationIdentification", bytes, Self::SIZE)?;
        let nation = NationNumeric::decode(bytes[0])?;
        let code_page = bytes[1];
        let number: String = bytes[2..].iter().copied().map(char::from).collect();
        Ok(Self {
            nation,
            code_page,
            number: number.trim_end_matches(' ').to_string(),
        })
    }

    /// Encode into a 15-byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::TooLong`] for more than 13 characters or
    /// [`FieldError::Unencodable`] for characters above `U+00FF`.
    pub fn encode(&self, out: &mut [u8]) -> Result<(), FieldError> {
        expect_len("VehicleRegistrationIdentification", out, Self::SIZE)?;
        let count = self.number.chars().count();
        if count > Self::NUMBER_LEN {
            return Err(FieldError::TooLong {
                field: Self::FIELD,
                max: Self::NUMBER_LEN,
                found: count,
            });
        }

        out[0] = self.nation.protocol_value();
        out[1] = self.code_page;
        let text = &mut out[2..];
        text.fill(b' ');
        for (slot, ch) in text.iter_mut().zip(self.number.chars()) {
            *slot = u8::try_from(u32::from(ch)).map_err(|_| FieldError::Unencodable {
                field: Self::FIELD,
                ch,
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Display for VehicleRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.nation.code(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration_bytes(nation: u8, text: &[u8]) -> [u8; VehicleRegistration::SIZE] {
        let mut bytes = [b' '; VehicleRegistration::SIZE];
        bytes[0] = nation;
        bytes[1] = 0x01;
        bytes[2..2 + text.len()].copy_from_slice(text);
        bytes
    }

    #[test]
    fn decode_trims_padding() {
        let reg = VehicleRegistration::decode(&registration_bytes(0x26, b"BX-123-Z"))
            .expect("valid registration");
        assert_eq!(reg.nation, NationNumeric::Netherlands);
        assert_eq!(reg.number, "BX-123-Z");
        assert_eq!(reg.to_string(), "NL BX-123-Z");
    }

    #[test]
    fn encode_pads_with_spaces() {
        let reg = VehicleRegistration {
            nation: NationNumeric::Germany,
            code_page: 1,
            number: "M-AB 1234".to_string(),
        };
        let mut out = [0u8; VehicleRegistration::SIZE];
        reg.encode(&mut out).expect("fits");
        assert_eq!(out, registration_bytes(0x0d, b"M-AB 1234"));
    }

    #[test]
    fn latin1_characters_survive() {
        let reg = VehicleRegistration::decode(&registration_bytes(0x2c, &[b'A', 0xc5, b'1']))
            .expect("valid registration");
        assert_eq!(reg.number, "A\u{c5}1");
        let mut out = [0u8; VehicleRegistration::SIZE];
        reg.encode(&mut out).expect("fits");
        assert_eq!(out[3], 0xc5);
    }

    #[test]
    fn oversized_number_rejected() {
        let reg = VehicleRegistration {
            nation: NationNumeric::France,
            code_page: 1,
            number: "ABCDEFGHIJKLMN".to_string(),
        };
        let mut out = [0u8; VehicleRegistration::SIZE];
        assert!(matches!(
            reg.encode(&mut out),
            Err(FieldError::TooLong { max: 13, found: 14, .. })
        ));

        let reg = VehicleRegistration {
            number: "\u{20ac}1".to_string(),
            ..reg
        };
        assert!(matches!(
            reg.encode(&mut out),
            Err(FieldError::Unencodable { ch: '\u{20ac}', .. })
        ));
    }
}
