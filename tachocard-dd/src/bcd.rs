//! Binary-coded decimal strings, two digits per byte, high nibble first.

use crate::FieldError;

/// Decode a BCD string into its decimal digits.
///
/// # Errors
///
/// Returns [`FieldError::InvalidBcd`] if any nibble is above 9.
pub fn decode_bcd(field: &'static str, bytes: &[u8]) -> Result<String, FieldError> {
    let mut digits = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        let (hi, lo) = (byte >> 4, byte & 0x0f);
        if hi > 9 || lo > 9 {
            return Err(FieldError::InvalidBcd { field, byte });
        }
        digits.push(char::from(b'0' + hi));
        digits.push(char::from(b'0' + lo));
    }
    Ok(digits)
}

/// Encode decimal digits into `out`, left-padding with zeros.
///
/// # Errors
///
/// Returns [`FieldError::TooLong`] if `digits` does not fit in `out`, or
/// [`FieldError::Unencodable`] for a non-digit character.
pub fn encode_bcd(field: &'static str, digits: &str, out: &mut [u8]) -> Result<(), FieldError> {
    let capacity = out.len() * 2;
    let count = digits.chars().count();
    if count > capacity {
        return Err(FieldError::TooLong {
            field,
            max: capacity,
            found: count,
        });
    }

    let mut nibbles = vec![0u8; capacity - count];
    for ch in digits.chars() {
        let Some(d) = ch.to_digit(10) else {
            return Err(FieldError::Unencodable { field, ch });
        };
        #[allow(clippy::cast_possible_truncation)] // to_digit(10) is below 10
        nibbles.push(d as u8);
    }

    for (byte, pair) in out.iter_mut().zip(nibbles.chunks_exact(2)) {
        *byte = (pair[0] << 4) | pair[1];
    }
    Ok(())
}

/// Decode a BCD field as an unsigned number.
///
/// # Errors
///
/// Returns [`FieldError::InvalidBcd`] if any nibble is above 9.
pub fn decode_bcd_number(field: &'static str, bytes: &[u8]) -> Result<u32, FieldError> {
    let mut value = 0u32;
    for &byte in bytes {
        let (hi, lo) = (byte >> 4, byte & 0x0f);
        if hi > 9 || lo > 9 {
            return Err(FieldError::InvalidBcd { field, byte });
        }
        value = value * 100 + u32::from(hi) * 10 + u32::from(lo);
    }
    Ok(value)
}

/// Encode an unsigned number as a BCD field filling `out`.
///
/// # Errors
///
/// Returns [`FieldError::OutOfRange`] if `value` has more digits than `out`
/// holds.
pub fn encode_bcd_number(field: &'static str, value: u32, out: &mut [u8]) -> Result<(), FieldError> {
    let digits = u32::try_from(out.len() * 2).unwrap_or(u32::MAX);
    let max = 10u64.saturating_pow(digits).saturating_sub(1);
    if u64::from(value) > max {
        return Err(FieldError::OutOfRange {
            field,
            value: i64::from(value),
            max: i64::try_from(max).unwrap_or(i64::MAX),
        });
    }

    let mut rest = value;
    for byte in out.iter_mut().rev() {
        #[allow(clippy::cast_possible_truncation)] // each step is below 100
        let pair = (rest % 100) as u8;
        *byte = ((pair / 10) << 4) | (pair % 10);
        rest /= 100;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_roundtrip() {
        assert_eq!(decode_bcd("t", &[0x12, 0x09]).expect("valid"), "1209");

        let mut out = [0u8; 3];
        encode_bcd("t", "1209", &mut out).expect("fits");
        assert_eq!(out, [0x00, 0x12, 0x09]);
    }

    #[test]
    fn invalid_nibble_rejected() {
        let err = decode_bcd("counter", &[0x1a]).unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidBcd {
                field: "counter",
                byte: 0x1a
            }
        );
        assert!(decode_bcd_number("counter", &[0xff, 0xff]).is_err());
    }

    #[test]
    fn number_fields() {
        assert_eq!(decode_bcd_number("n", &[0x04, 0x21]).expect("valid"), 421);

        let mut out = [0u8; 2];
        encode_bcd_number("n", 9999, &mut out).expect("fits");
        assert_eq!(out, [0x99, 0x99]);

        let err = encode_bcd_number("n", 10_000, &mut out).unwrap_err();
        assert!(matches!(err, FieldError::OutOfRange { max: 9999, .. }));
    }

    #[test]
    fn too_many_digits() {
        let mut out = [0u8; 1];
        assert!(matches!(
            encode_bcd("t", "123", &mut out),
            Err(FieldError::TooLong { max: 2, found: 3, .. })
        ));
        assert!(matches!(
            encode_bcd("t", "1x", &mut out),
            Err(FieldError::Unencodable { ch: 'x', .. })
        ));
    }
}
