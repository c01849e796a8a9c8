use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds since 1970-01-01 00:00:00 UTC, stored as a 4-byte big-endian
/// integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeReal(pub u32);

impl TimeReal {
    /// Field width in bytes.
    pub const SIZE: usize = 4;

    #[must_use]
    pub fn decode(bytes: [u8; Self::SIZE]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    #[must_use]
    pub fn encode(self) -> [u8; Self::SIZE] {
        self.0.to_be_bytes()
    }

    /// The instant as a `chrono` UTC timestamp.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.0), 0)
    }

    /// Seconds since the epoch.
    #[must_use]
    pub const fn seconds(self) -> u32 {
        self.0
    }
}

impl From<DateTime<Utc>> for TimeReal {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp().clamp(0, i64::from(u32::MAX)) as u32)
    }
}

impl fmt::Display for TimeReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "@{}", self.0),
        }
    }
}
