use crate::FieldError;
use serde::{Deserialize, Serialize};

macro_rules! nations {
    ($($variant:ident = $value:literal, $code:literal;)*) => {
        /// Numerical reference to a country (`NationNumeric`).
        ///
        /// Values `0x38..=0xFC` are reserved and do not decode.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum NationNumeric {
            $($variant = $value,)*
        }

        impl NationNumeric {
            /// Look up a nation by its protocol byte.
            #[must_use]
            pub fn from_protocol_value(value: u8) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Distinguishing sign used on vehicles.
            #[must_use]
            pub fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }
        }
    };
}

nations! {
    NoInformation = 0x00, "";
    Austria = 0x01, "A";
    Albania = 0x02, "AL";
    Andorra = 0x03, "AND";
    Armenia = 0x04, "ARM";
    Azerbaijan = 0x05, "AZ";
    Belgium = 0x06, "B";
    Bulgaria = 0x07, "BG";
    BosniaHerzegovina = 0x08, "BIH";
    Belarus = 0x09, "BY";
    Switzerland = 0x0a, "CH";
    Cyprus = 0x0b, "CY";
    CzechRepublic = 0x0c, "CZ";
    Germany = 0x0d, "D";
    Denmark = 0x0e, "DK";
    Spain = 0x0f, "E";
    Estonia = 0x10, "EST";
    France = 0x11, "F";
    Finland = 0x12, "FIN";
    Liechtenstein = 0x13, "FL";
    FaroeIslands = 0x14, "FR";
    UnitedKingdom = 0x15, "UK";
    Georgia = 0x16, "GE";
    Greece = 0x17, "GR";
    Hungary = 0x18, "H";
    Croatia = 0x19, "HR";
    Italy = 0x1a, "I";
    Ireland = 0x1b, "IRL";
    Iceland = 0x1c, "IS";
    Kazakhstan = 0x1d, "KZ";
    Luxembourg = 0x1e, "L";
    Lithuania = 0x1f, "LT";
    Latvia = 0x20, "LV";
    Malta = 0x21, "M";
    Monaco = 0x22, "MC";
    Moldova = 0x23, "MD";
    NorthMacedonia = 0x24, "MK";
    Norway = 0x25, "N";
    Netherlands = 0x26, "NL";
    Portugal = 0x27, "P";
    Poland = 0x28, "PL";
    Romania = 0x29, "RO";
    SanMarino = 0x2a, "RSM";
    RussianFederation = 0x2b, "RUS";
    Sweden = 0x2c, "S";
    Slovakia = 0x2d, "SK";
    Slovenia = 0x2e, "SLO";
    Turkmenistan = 0x2f, "TM";
    Turkey = 0x30, "TR";
    Ukraine = 0x31, "UA";
    VaticanCity = 0x32, "V";
    Yugoslavia = 0x33, "YU";
    Montenegro = 0x34, "MNE";
    Serbia = 0x35, "SRB";
    Uzbekistan = 0x36, "UZ";
    Tajikistan = 0x37, "TJ";
    EuropeanCommunity = 0xfd, "EC";
    RestOfEurope = 0xfe, "EUR";
    RestOfTheWorld = 0xff, "WLD";
}

impl NationNumeric {
    pub const DOMAIN: &'static str = "NationNumeric";

    /// Decode the protocol byte.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownValue`] for reserved values.
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
}
