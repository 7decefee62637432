//! One decimal component of an IPv4 address.

use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidArgument, InvalidArgumentKind, ParseError, ParseErrorKind};

/// An integer in the range 0-255, written in decimal.
///
/// # Examples
///
/// ```rust
/// use urin::Octet;
///
/// let octet = Octet::parse("192").unwrap();
/// assert_eq!(octet.value(), 192);
/// assert!(Octet::parse("012").is_err());
/// assert!(Octet::try_from(256_u32).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Octet(u8);

impl Octet {
    /// Creates an octet.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Parses a `dec-octet`: decimal digits with no leading zero, except
    /// for `0` itself.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `input` is not a `dec-octet`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_dec_octet(input).ok_or_else(|| {
            ParseError::new(
                input,
                ParseErrorKind::InvalidNumber {
                    component: "octet",
                    value: input.to_string(),
                },
            )
        })
    }

    pub(crate) fn parse_dec_octet(input: &str) -> Option<Self> {
        let bytes = input.as_bytes();
        let valid_shape = matches!(bytes.len(), 1..=3)
            && bytes.iter().all(u8::is_ascii_digit)
            && (bytes[0] != b'0' || bytes.len() == 1);
        if !valid_shape {
            return None;
        }
        input.parse::<u8>().ok().map(Self)
    }
}

impl TryFrom<u32> for Octet {
    type Error = InvalidArgument;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value).map(Self).map_err(|_| {
            InvalidArgument::new(
                "octet",
                value.to_string(),
                InvalidArgumentKind::OutOfRange { range: "0-255" },
            )
        })
    }
}

impl From<u8> for Octet {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Octet> for u8 {
    fn from(octet: Octet) -> Self {
        octet.0
    }
}

impl fmt::Display for Octet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Octet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Octet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Octet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
