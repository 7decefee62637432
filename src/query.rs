//! Query component of a URI reference.

use std::fmt;
use std::str::FromStr;

use crate::charset::CharacterSet;
use crate::encoding::{Encoding, StringEncoding};
use crate::error::{DecodingError, InvalidArgument, InvalidArgumentKind, ParseError, ParseErrorKind};
use crate::percent::{self, PercentEncoder};

const QUERY_CHARACTERS: PercentEncoder = PercentEncoder::new(CharacterSet::QUERY_AND_FRAGMENT);

/// The query of a URI reference, the part after `?`.
///
/// A query is stored in its encoded form, with percent-escapes written in
/// upper-case hex. A plain string goes in through [`Query::new`]; structured
/// values go through an [`Encoding`].
///
/// # Examples
///
/// ```
/// use urin::{DelimitedEncoding, Encoding, Query, StringEncoding};
///
/// let query = Query::new("a=b c");
/// assert_eq!(query.as_str(), "a=b%20c");
/// assert_eq!(query.value(), "a=b c");
///
/// let pairs = DelimitedEncoding::new('&', StringEncoding::QUERY_AND_FRAGMENT);
/// let values = vec!["x&y".to_string(), "z".to_string()];
/// let query = Query::encode_with(&values, &pairs).unwrap();
/// assert_eq!(query.as_str(), "x%26y&z");
/// assert_eq!(query.decode_with(&pairs).unwrap(), values);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Query(String);

impl Query {
    /// Creates a query holding `value`, percent-encoding as needed.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(StringEncoding::QUERY_AND_FRAGMENT.encode(&value.to_string()))
    }

    /// Creates a query from a value encoded by `encoding`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the encoding produces text a query may
    /// not carry, such as a raw `#`.
    pub fn encode_with<T, E: Encoding<T>>(value: &T, encoding: &E) -> Result<Self, InvalidArgument> {
        let encoded = encoding.encode(value);
        QUERY_CHARACTERS
            .canonicalise(&encoded)
            .map(Self)
            .map_err(|e| InvalidArgument::new("query", encoded, InvalidArgumentKind::NotEncodable(e)))
    }

    /// Parses an encoded query, without the leading `?`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `input` holds a raw `#`, a character outside
    /// `pchar / "/" / "?"`, or a malformed escape.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        QUERY_CHARACTERS.canonicalise(input).map(Self).map_err(|error| {
            ParseError::new(
                input,
                ParseErrorKind::InvalidEncoding {
                    component: "query",
                    error,
                },
            )
        })
    }

    /// The decoded query text.
    #[must_use]
    pub fn value(&self) -> String {
        percent::decode_validated(&self.0)
    }

    /// Decodes the query with `encoding`.
    ///
    /// # Errors
    ///
    /// Returns `DecodingError` if the stored text is not something `encoding`
    /// produces.
    pub fn decode_with<T, E: Encoding<T>>(&self, encoding: &E) -> Result<T, DecodingError> {
        encoding.decode(&self.0)
    }

    /// The encoded query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Query {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Query {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Query {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Query {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
