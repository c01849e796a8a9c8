//! Single-byte enumerations used by fixed-width card records.

use crate::FieldError;
use serde::{Deserialize, Serialize};

/// Code qualifying a place record (`EntryTypeDailyWorkPeriod`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntryTypeDailyWorkPeriod {
    /// Begin, related time = card insertion time or time of entry.
    BeginCardInsertion = 0,
    /// End, related time = card withdrawal time or time of entry.
    EndCardWithdrawal = 1,
    /// Begin, related time manually entered (start time).
    BeginManualEntry = 2,
    /// End, related time manually entered (end of work period).
    EndManualEntry = 3,
    /// Begin, related time assumed by the vehicle unit.
    BeginAssumedByVu = 4,
    /// End, related time assumed by the vehicle unit.
    EndAssumedByVu = 5,
}

impl EntryTypeDailyWorkPeriod {
    pub const DOMAIN: &'static str = "EntryTypeDailyWorkPeriod";

    #[must_use]
    pub fn from_protocol_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::BeginCardInsertion),
            1 => Some(Self::EndCardWithdrawal),
            2 => Some(Self::BeginManualEntry),
            3 => Some(Self::EndManualEntry),
            4 => Some(Self::BeginAssumedByVu),
            5 => Some(Self::EndAssumedByVu),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// Returns [`FieldError::UnknownValue`] outside `0..=5`.
    pub fn decode(value: u8) -> Result<Self, FieldError> {
        Self::from_protocol_value(value).ok_or(FieldError::UnknownValue {
            domain: Self::DOMAIN,
            value,
        })
    }

    #[must_use]
    pub const fn protocol_value(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn is_begin(self) -> bool {
        matches!(
            self,
            Self::BeginCardInsertion | Self::BeginManualEntry | Self::BeginAssumedByVu
        )
    }
}

/// Code for a specific condition (`SpecificConditionType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpecificConditionType {
    OutOfScopeBegin = 1,
    OutOfScopeEnd = 2,
    FerryTrainCrossingBegin = 3,
    FerryTrainCrossingEnd = 4,
}

impl SpecificConditionType {
    pub const DOMAIN: &'static str = "SpecificConditionType";

    #[must_use]
    pub fn from_protocol_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::OutOfScopeBegin),
            2 => Some(Self::OutOfScopeEnd),
            3 => Some(Self::FerryTrainCrossingBegin),
            4 => Some(Self::FerryTrainCrossingEnd),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// Returns [`FieldError::UnknownValue`] for `0` and anything above `4`.
    pub fn decode(value: u8) -> Result<Self, FieldError> {
        Self::from_protocol_value(value).ok_or(FieldError::UnknownValue {
            domain: Self::DOMAIN,
            value,
        })
    }

    #[must_use]
    pub const fn protocol_value(self) -> u8 {
        self as u8
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OutOfScopeBegin => "out of scope, begin",
            Self::OutOfScopeEnd => "out of scope, end",
            Self::FerryTrainCrossingBegin => "ferry/train crossing, begin",
            Self::FerryTrainCrossingEnd => "ferry/train crossing, end",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_type_domain() {
        for value in 0..=5 {
            let entry = EntryTypeDailyWorkPeriod::decode(value).expect("in domain");
            assert_eq!(entry.protocol_value(), value);
        }
        assert!(EntryTypeDailyWorkPeriod::decode(6).is_err());
        assert!(EntryTypeDailyWorkPeriod::BeginManualEntry.is_begin());
        assert!(!EntryTypeDailyWorkPeriod::EndCardWithdrawal.is_begin());
    }

    #[test]
    fn condition_zero_is_reserved() {
        assert!(matches!(
            SpecificConditionType::decode(0),
            Err(FieldError::UnknownValue { value: 0, .. })
        ));
        assert_eq!(
            SpecificConditionType::decode(3),
            Ok(SpecificConditionType::FerryTrainCrossingBegin)
        );
    }
}
