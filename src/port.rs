//! Port subcomponent of an authority.

use std::fmt;
use std::str::FromStr;

use crate::charset::CharacterSet;
use crate::error::{InvalidArgument, ParseError, ParseErrorKind};

/// A port: a string of decimal digits, possibly empty.
///
/// RFC 3986 puts no upper bound on a port, so any digit string is accepted.
/// Leading zeros are dropped, making `080` and `80` the same port.
///
/// # Examples
///
/// ```rust
/// use urin::Port;
///
/// assert_eq!(Port::from_digits("0080").unwrap(), Port::new(80));
/// assert_eq!(Port::from_digits("").unwrap().to_string(), "");
/// assert!(Port::from_digits("8o").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port(String);

impl Port {
    /// A port with a numeric value.
    #[must_use]
    pub fn new(port: u16) -> Self {
        Self(port.to_string())
    }

    /// A port from its decimal digits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the first character that is not a
    /// digit, e.g. `Character 3 must be 0-9 in port [80a]`.
    pub fn from_digits(digits: &str) -> Result<Self, InvalidArgument> {
        CharacterSet::DIGIT.verify(digits, "port")?;
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() && !digits.is_empty() {
            Ok(Self("0".to_string()))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Parses a port, without the leading `:`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` with kind `InvalidPort` if `input` is not all digits.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::from_digits(input).map_err(|e| ParseError::new(input, ParseErrorKind::InvalidPort(e)))
    }

    /// The digits of the port.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the empty port of `host:`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The port as a `u16`, if it is non-empty and fits.
    #[must_use]
    pub fn as_u16(&self) -> Option<u16> {
        self.0.parse().ok()
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self::new(port)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Port {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Port {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Port {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
