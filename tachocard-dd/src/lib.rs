//! Data-dictionary field codecs for EU tachograph card elementary files.
//!
//! Each type in this crate converts between a fixed number of card bytes and
//! a structured value. Codecs are pure functions: decoding never looks past
//! the slice it is given, and encoding writes exactly the field width.
//!
//! All multi-byte integers on a card are big-endian.
//!
//! | Type | Bytes |
//! |------|-------|
//! | [`TimeReal`] | 4 |
//! | BCD string / number | n |
//! | [`NationNumeric`] | 1 |
//! | [`EntryTypeDailyWorkPeriod`] | 1 |
//! | [`SpecificConditionType`] | 1 |
//! | [`VehicleRegistration`] | 15 |
//! | [`OdometerShort`] | 3 |
//! | [`GeoCoordinates`] | 6 |
//! | [`GnssPlace`] | 11 |
//! | [`ActivityChangeInfo`] | 2 |

pub mod activity;
pub mod bcd;
pub mod enums;
pub mod error;
pub mod gnss;
pub mod nation;
pub mod odometer;
pub mod time;
pub mod vehicle;

pub use activity::{Activity, ActivityChangeInfo, CardSlot};
pub use bcd::{decode_bcd, decode_bcd_number, encode_bcd, encode_bcd_number};
pub use enums::{EntryTypeDailyWorkPeriod, SpecificConditionType};
pub use error::FieldError;
pub use gnss::{GeoCoordinates, GnssPlace};
pub use nation::NationNumeric;
pub use odometer::OdometerShort;
pub use time::TimeReal;
pub use vehicle::VehicleRegistration;

/// Check that `bytes` is exactly `expected` long.
///
/// # Errors
///
/// Returns [`FieldError::Length`] naming `field` when the length differs.
pub fn expect_len(field: &'static str, bytes: &[u8], expected: usize) -> Result<(), FieldError> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(FieldError::Length {
            field,
            expected,
            found: bytes.len(),
        })
    }
}
