//! One 16-bit group of an IPv6 address.

use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidArgument, InvalidArgumentKind, ParseError, ParseErrorKind};

/// An integer in the range 0-0xFFFF, written in lower-case hex without
/// leading zeros.
///
/// # Examples
///
/// ```rust
/// use urin::Hexadectet;
///
/// assert_eq!(Hexadectet::parse("0DB8").unwrap().to_string(), "db8");
/// assert_eq!(Hexadectet::ZERO.to_string(), "0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hexadectet(u16);

impl Hexadectet {
    /// The zero group, the one elided by `::`.
    pub const ZERO: Self = Self(0);

    /// Creates a hexadectet.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Returns true for the zero group.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parses one to four hex digits, in either case.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `input` is not `1*4HEXDIG`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_h16(input).ok_or_else(|| {
            ParseError::new(
                input,
                ParseErrorKind::InvalidNumber {
                    component: "hexadectet",
                    value: input.to_string(),
                },
            )
        })
    }

    pub(crate) fn parse_h16(input: &str) -> Option<Self> {
        if !matches!(input.len(), 1..=4) || !input.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u16::from_str_radix(input, 16).ok().map(Self)
    }
}

impl TryFrom<u32> for Hexadectet {
    type Error = InvalidArgument;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value).map(Self).map_err(|_| {
            InvalidArgument::new(
                "hexadectet",
                format!("{value:#X}"),
                InvalidArgumentKind::OutOfRange { range: "0x0-0xFFFF" },
            )
        })
    }
}

impl From<u16> for Hexadectet {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Hexadectet> for u16 {
    fn from(hexadectet: Hexadectet) -> Self {
        hexadectet.0
    }
}

impl fmt::Display for Hexadectet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl FromStr for Hexadectet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Hexadectet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Hexadectet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
