use crate::FieldError;
use serde::{Deserialize, Serialize};

/// Which card reader slot the change refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSlot {
    Driver,
    CoDriver,
}

/// Activity code (bits `aa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    BreakRest,
    Availability,
    Work,
    Driving,
}

impl Activity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::BreakRest => "break/rest",
            Self::Availability => "availability",
            Self::Work => "work",
            Self::Driving => "driving",
        }
    }
}

/// One activity change, 2 bytes (`ActivityChangeInfo`).
///
/// ```text
/// bit 15     s  slot (0 driver, 1 co-driver)
/// bit 14     c  crew (card inserted) / following activity known (withdrawn)
/// bit 13     p  card not inserted
/// bits 12-11 aa activity
/// bits 10-0  t  minutes since 00:00 UTC
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityChangeInfo {
    pub slot: CardSlot,
    /// Crew driving while the card is inserted; otherwise marks the
    /// following activity as known.
    pub crew: bool,
    pub card_inserted: bool,
    pub activity: Activity,
    /// Minutes since midnight UTC.
    pub minutes: u16,
}

impl ActivityChangeInfo {
    pub const SIZE: usize = 2;
    pub const MAX_MINUTES: u16 = 0x07ff;

    /// Entries with these raw values are padding, not changes.
    #[must_use]
    pub const fn is_sentinel(raw: u16) -> bool {
        raw == 0x0000 || raw == 0xffff
    }

    #[must_use]
    pub fn decode(raw: u16) -> Self {
        let slot = if raw & 0x8000 == 0 {
            CardSlot::Driver
        } else {
            CardSlot::CoDriver
        };
        let activity = match (raw >> 11) & 0b11 {
            0 => Activity::BreakRest,
            1 => Activity::Availability,
            2 => Activity::Work,
            _ => Activity::Driving,
        };
        Self {
            slot,
            crew: raw & 0x4000 != 0,
            card_inserted: raw & 0x2000 == 0,
            activity,
            minutes: raw & Self::MAX_MINUTES,
        }
    }

    /// # Errors
    ///
    /// Returns [`FieldError::OutOfRange`] if `minutes` needs more than 11 bits.
    pub fn encode(&self) -> Result<u16, FieldError> {
        if self.minutes > Self::MAX_MINUTES {
            return Err(FieldError::OutOfRange {
                field: "ActivityChangeInfo.minutes",
                value: i64::from(self.minutes),
                max: i64::from(Self::MAX_MINUTES),
            });
        }
        let mut raw = self.minutes;
        if self.slot == CardSlot::CoDriver {
            raw |= 0x8000;
        }
        if self.crew {
            raw |= 0x4000;
        }
        if !self.card_inserted {
            raw |= 0x2000;
        }
        let code: u16 = match self.activity {
            Activity::BreakRest => 0,
            Activity::Availability => 1,
            Activity::Work => 2,
            Activity::Driving => 3,
        };
        Ok(raw | (code << 11))
    }
}

impl std::fmt::Display for ActivityChangeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02} {}",
            self.minutes / 60,
            self.minutes % 60,
            self.activity.label()
        )?;
        if self.slot == CardSlot::CoDriver {
            f.write_str(" (co-driver)")?;
        }
        if !self.card_inserted {
            f.write_str(" (card withdrawn)")?;
        } else if self.crew {
            f.write_str(" (crew)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_driving_crew() {
        // s=0 c=1 p=0 aa=11 t=480
        let raw = 0x4000 | (0b11 << 11) | 480;
        let change = ActivityChangeInfo::decode(raw);
        assert_eq!(change.slot, CardSlot::Driver);
        assert!(change.crew);
        assert!(change.card_inserted);
        assert_eq!(change.activity, Activity::Driving);
        assert_eq!(change.minutes, 480);
        assert_eq!(change.encode(), Ok(raw));
        assert_eq!(change.to_string(), "08:00 driving (crew)");
    }

    #[test]
    fn every_raw_value_reencodes() {
        for raw in 0..=u16::MAX {
            assert_eq!(ActivityChangeInfo::decode(raw).encode(), Ok(raw));
        }
    }

    #[test]
    fn sentinels() {
        assert!(ActivityChangeInfo::is_sentinel(0x0000));
        assert!(ActivityChangeInfo::is_sentinel(0xffff));
        assert!(!ActivityChangeInfo::is_sentinel(0x0001));
    }

    #[test]
    fn minutes_overflow_rejected() {
        let mut change = ActivityChangeInfo::decode(0x1000);
        change.minutes = 2048;
        assert!(change.encode().is_err());
    }
}
