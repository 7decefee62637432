//! Fragment component of a URI reference.

use std::fmt;
use std::str::FromStr;

use crate::charset::CharacterSet;
use crate::encoding::{Encoding, StringEncoding};
use crate::error::{DecodingError, InvalidArgument, InvalidArgumentKind, ParseError, ParseErrorKind};
use crate::percent::{self, PercentEncoder};

const FRAGMENT_CHARACTERS: PercentEncoder = PercentEncoder::new(CharacterSet::QUERY_AND_FRAGMENT);

/// The fragment of a URI reference, the part after `#`.
///
/// Stored encoded, like [`Query`](crate::Query).
///
/// # Examples
///
/// ```
/// use urin::Fragment;
///
/// let fragment = Fragment::new("section 2");
/// assert_eq!(fragment.to_string(), "section%202");
///
/// let parsed = Fragment::parse("section%202").unwrap();
/// assert_eq!(parsed, fragment);
/// assert_eq!(parsed.value(), "section 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fragment(String);

impl Fragment {
    /// Creates a fragment holding `value`, percent-encoding as needed.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(StringEncoding::QUERY_AND_FRAGMENT.encode(&value.to_string()))
    }

    /// Creates a fragment from a value encoded by `encoding`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the encoding produces text a fragment
    /// may not carry.
    pub fn encode_with<T, E: Encoding<T>>(value: &T, encoding: &E) -> Result<Self, InvalidArgument> {
        let encoded = encoding.encode(value);
        FRAGMENT_CHARACTERS
            .canonicalise(&encoded)
            .map(Self)
            .map_err(|e| InvalidArgument::new("fragment", encoded, InvalidArgumentKind::NotEncodable(e)))
    }

    /// Parses an encoded fragment, without the leading `#`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the fragment contains invalid characters.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        FRAGMENT_CHARACTERS.canonicalise(input).map(Self).map_err(|error| {
            ParseError::new(
                input,
                ParseErrorKind::InvalidEncoding {
                    component: "fragment",
                    error,
                },
            )
        })
    }

    /// The decoded fragment text.
    #[must_use]
    pub fn value(&self) -> String {
        percent::decode_validated(&self.0)
    }

    /// Decodes the fragment with `encoding`.
    ///
    /// # Errors
    ///
    /// Returns `DecodingError` if `encoding` rejects the stored text.
    pub fn decode_with<T, E: Encoding<T>>(&self, encoding: &E) -> Result<T, DecodingError> {
        encoding.decode(&self.0)
    }

    /// Returns the fragment as an encoded string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fragment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Fragment {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fragment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fragment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
