use derive_more::{Display, Error};

/// Errors raised by field-level decoding and encoding.
///
/// A decode failure means the bytes do not hold a value of the field's
/// domain; callers owning a whole record usually keep such a record as raw
/// bytes instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum FieldError {
    /// The slice handed to a codec has the wrong width.
    #[display("{field}: expected {expected} bytes, got {found}")]
    Length {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// A protocol value outside the enumeration's domain.
    #[display("{domain}: no value for protocol byte 0x{value:02x}")]
    UnknownValue { domain: &'static str, value: u8 },
    /// A nibble above 9 inside a BCD field.
    #[display("{field}: invalid BCD byte 0x{byte:02x}")]
    InvalidBcd { field: &'static str, byte: u8 },
    /// A numeric value that does not fit the field width.
    #[display("{field}: value {value} exceeds maximum {max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },
    /// A character with no single-byte representation.
    #[display("{field}: cannot encode character {ch:?}")]
    Unencodable { field: &'static str, ch: char },
    /// Text or digits longer than the field holds.
    #[display("{field}: {found} characters, at most {max} fit")]
    TooLong {
        field: &'static str,
        max: usize,
        found: usize,
    },
}
