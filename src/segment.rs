//! Path segments, including the `.` and `..` sentinels.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::charset::CharacterSet;
use crate::encoding::{Encoding, LiteralOverrideEncoding, StringEncoding};
use crate::error::{DecodingError, InvalidArgument, InvalidArgumentKind, ParseError, ParseErrorKind};
use crate::percent::{self, PercentEncoder};

type SegmentEncoding = LiteralOverrideEncoding<LiteralOverrideEncoding<StringEncoding>>;

static SEGMENT_ENCODING: LazyLock<SegmentEncoding> =
    LazyLock::new(|| LiteralOverrideEncoding::new(".", LiteralOverrideEncoding::new("..", StringEncoding::P_CHAR)));

const SEGMENT_CHARACTERS: PercentEncoder = PercentEncoder::new(CharacterSet::P_CHAR);

/// One segment of a path.
///
/// A segment is either one of the `.` and `..` sentinels that dot-segment
/// removal acts on, or a value. Values are held percent-encoded. A value
/// whose text would read as `.` or `..` is written fully escaped, so it
/// cannot be mistaken for a sentinel.
///
/// # Examples
///
/// ```
/// use urin::Segment;
///
/// assert_eq!(Segment::new("a b").to_string(), "a%20b");
/// assert_eq!(Segment::new("..").to_string(), "%2E%2E");
/// assert_eq!(Segment::dot_dot().to_string(), "..");
///
/// assert_eq!(Segment::parse("..").unwrap(), Segment::dot_dot());
/// assert_eq!(Segment::parse("%2e%2e").unwrap(), Segment::new(".."));
/// ```
///
/// Typed values go through an [`Encoding`]:
///
/// ```
/// use urin::{DelimitedEncoding, Segment, StringEncoding};
///
/// let list = DelimitedEncoding::new(',', StringEncoding::P_CHAR);
/// let segment = Segment::encode_with(&vec!["a,b".to_string(), "c".to_string()], &list).unwrap();
///
/// assert_eq!(segment.to_string(), "a%2Cb,c");
/// assert_eq!(segment.decode_with(&list).unwrap(), vec!["a,b", "c"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment(Kind);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Kind {
    Dot,
    DotDot,
    Value(String),
}

impl Segment {
    /// A segment holding `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Kind::Value(SEGMENT_ENCODING.encode(&value.into())))
    }

    /// The empty segment, as between the slashes of `a//b`.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Kind::Value(String::new()))
    }

    /// The `.` sentinel.
    #[must_use]
    pub const fn dot() -> Self {
        Self(Kind::Dot)
    }

    /// The `..` sentinel.
    #[must_use]
    pub const fn dot_dot() -> Self {
        Self(Kind::DotDot)
    }

    /// Encodes `value` with `encoding` and checks the result is valid in a
    /// segment.
    ///
    /// Text that would read as `.` or `..` is stored fully escaped, as for
    /// [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `encoding` produces a character a segment
    /// may not carry raw, such as `/`, or a malformed escape.
    pub fn encode_with<T, E: Encoding<T>>(value: &T, encoding: &E) -> Result<Self, InvalidArgument> {
        let encoded = encoding.encode(value);
        SEGMENT_CHARACTERS
            .normalise(&encoded)
            .map(Self::from_encoded)
            .map_err(|e| InvalidArgument::new("segment", encoded, InvalidArgumentKind::NotEncodable(e)))
    }

    /// Decodes the value with `encoding`.
    ///
    /// # Errors
    ///
    /// Returns `DecodingError::DotSegment` for the `.` and `..` sentinels,
    /// and whatever `encoding` reports for a value it cannot decode.
    pub fn decode_with<T, E: Encoding<T>>(&self, encoding: &E) -> Result<T, DecodingError> {
        match &self.0 {
            Kind::Value(text) => encoding.decode(text),
            Kind::Dot | Kind::DotDot => Err(DecodingError::DotSegment),
        }
    }

    /// Parses one percent-encoded segment.
    ///
    /// Escaped unreserved characters are decoded, so `%7E` and `~` parse to
    /// the same segment. Other escapes are kept, with upper-case hex digits.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `input` holds a `/` or another character a
    /// segment may not carry raw, or a malformed escape.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match input {
            "." => Ok(Self::dot()),
            ".." => Ok(Self::dot_dot()),
            _ => SEGMENT_CHARACTERS.normalise(input).map(Self::from_encoded).map_err(|error| {
                ParseError::new(
                    input,
                    ParseErrorKind::InvalidEncoding {
                        component: "segment",
                        error,
                    },
                )
            }),
        }
    }

    fn from_encoded(text: String) -> Self {
        if text == "." {
            Self(Kind::Value("%2E".to_owned()))
        } else if text == ".." {
            Self(Kind::Value("%2E%2E".to_owned()))
        } else {
            Self(Kind::Value(text))
        }
    }

    /// Returns the decoded value, or `None` for a sentinel.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        match &self.0 {
            Kind::Value(text) => Some(percent::decode_validated(text)),
            Kind::Dot | Kind::DotDot => None,
        }
    }

    /// The segment as it appears in a path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Kind::Dot => ".",
            Kind::DotDot => "..",
            Kind::Value(text) => text,
        }
    }

    /// Returns true for the empty value segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(&self.0, Kind::Value(text) if text.is_empty())
    }

    /// Returns true for the `.` sentinel.
    #[must_use]
    pub const fn is_dot(&self) -> bool {
        matches!(self.0, Kind::Dot)
    }

    /// Returns true for the `..` sentinel.
    #[must_use]
    pub const fn is_dot_dot(&self) -> bool {
        matches!(self.0, Kind::DotDot)
    }

    /// Returns true for either sentinel.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self.0, Kind::Dot | Kind::DotDot)
    }

    pub(crate) fn contains_colon(&self) -> bool {
        matches!(&self.0, Kind::Value(text) if text.contains(':'))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Segment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Segment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Segment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
