//! Error types for URI construction, parsing, decoding and part access.
//!
//! The crate keeps three channels apart:
//!
//! - [`InvalidArgument`] is returned by constructors when a value violates a
//!   type's invariant.
//! - [`ParseError`] is returned by `parse` when text does not match the
//!   grammar. It always carries the whole input.
//! - [`PartAbsent`] is returned by accessors such as `query()` when the value
//!   has no such part.
//!
//! [`DecodingError`] describes a percent-decoding failure and appears on its
//! own from [`Encoding::decode`](crate::Encoding::decode) or wrapped inside a
//! [`ParseError`].

use std::fmt;

/// A constructor was given a value that violates the type's invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgument {
    /// Name of the offending field, e.g. `"scheme"` or `"port"`
    pub field: &'static str,
    /// The value as supplied
    pub value: String,
    /// What was wrong with it
    pub kind: InvalidArgumentKind,
}

/// Specific construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgumentKind {
    /// Value must contain at least one character
    Empty,
    /// A character outside the permitted set
    IllegalCharacter {
        /// 1-based character position
        position: usize,
        /// Description of the permitted characters
        allowed: String,
    },
    /// Numeric value outside the type's bounds
    OutOfRange {
        /// The permitted range, as displayed
        range: &'static str,
    },
    /// An encoding produced text that is not valid for the component
    NotEncodable(DecodingError),
}

impl InvalidArgument {
    pub(crate) fn new(field: &'static str, value: impl Into<String>, kind: InvalidArgumentKind) -> Self {
        Self {
            field,
            value: value.into(),
            kind,
        }
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { field, value, kind } = self;
        match kind {
            InvalidArgumentKind::Empty => {
                write!(f, "{field} must contain at least one character")
            }
            InvalidArgumentKind::IllegalCharacter { position, allowed } => {
                write!(f, "Character {position} must be {allowed} in {field} [{value}]")
            }
            InvalidArgumentKind::OutOfRange { range } => {
                write!(f, "Argument must be in the range {range} but was [{value}]")
            }
            InvalidArgumentKind::NotEncodable(e) => {
                write!(f, "encoded {field} [{value}] is not valid: {e}")
            }
        }
    }
}

impl std::error::Error for InvalidArgument {}

/// Percent-decoding failures.
///
/// Positions are 1-based character offsets into the text being decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodingError {
    /// `%` not followed by two hex digits
    MalformedEscape {
        /// Position of the `%`
        position: usize,
    },
    /// Escaped bytes do not form valid UTF-8
    InvalidUtf8 {
        /// Position of the first `%` in the offending run
        position: usize,
    },
    /// A raw character the component does not allow unescaped
    IllegalCharacter {
        /// The character found
        character: char,
        /// Position in the input
        position: usize,
        /// Description of the characters permitted raw
        allowed: String,
    },
    /// A `.` or `..` segment, which carries no value to decode
    DotSegment,
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEscape { position } => {
                write!(f, "'%' at position {position} must be followed by two hex digits")
            }
            Self::InvalidUtf8 { position } => {
                write!(f, "percent-encoded octets starting at position {position} are not UTF-8")
            }
            Self::IllegalCharacter {
                character,
                position,
                allowed,
            } => write!(
                f,
                "invalid character '{character}' at position {position}; must be {allowed}"
            ),
            Self::DotSegment => f.write_str("'.' and '..' segments have no value to decode"),
        }
    }
}

impl std::error::Error for DecodingError {}

/// Text did not match the grammar of the value being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The complete input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input does not have the shape `scheme ":" hier-part [ "?" query ] [ "#" fragment ]`
    NotAUri,
    /// Input does not have the shape of a relative reference
    NotARelativeReference,
    /// Input is neither a URI nor a relative reference
    NotAUrinReference,
    /// Scheme name is invalid
    InvalidScheme(InvalidArgument),
    /// Host is not a registered name, IPv4, IPv6 or `IPvFuture` literal
    InvalidHost {
        /// The host text
        host: String,
    },
    /// Port is not a digit string
    InvalidPort(InvalidArgument),
    /// A component failed percent-decoding
    InvalidEncoding {
        /// Which component
        component: &'static str,
        /// Why decoding failed
        error: DecodingError,
    },
    /// A numeric component is malformed or out of range
    InvalidNumber {
        /// Which component
        component: &'static str,
        /// The text found
        value: String,
    },
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAUri => write!(f, "not a valid URI"),
            Self::NotARelativeReference => write!(f, "not a valid relative reference"),
            Self::NotAUrinReference => {
                write!(f, "neither a valid URI nor a valid relative reference")
            }
            Self::InvalidScheme(e) => write!(f, "invalid scheme: {e}"),
            Self::InvalidHost { host } => write!(f, "Not a valid host :{host}"),
            Self::InvalidPort(e) => write!(f, "invalid port: {e}"),
            Self::InvalidEncoding { component, error } => write!(f, "invalid {component}: {error}"),
            Self::InvalidNumber { component, value } => write!(f, "invalid {component} [{value}]"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::InvalidHost { host } if *host == self.input => {
                write!(f, "{}", self.kind)
            }
            kind => write!(f, "failed to parse [{}]: {kind}", self.input),
        }
    }
}

impl std::error::Error for ParseError {}

/// An accessor was called for a part the value does not have.
///
/// Check `has_authority()`, `has_query()` or `has_fragment()` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartAbsent {
    /// The part that was requested
    pub part: &'static str,
}

impl fmt::Display for PartAbsent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempt to get {part} from a reference without one; check has_{part}() first",
            part = self.part
        )
    }
}

impl std::error::Error for PartAbsent {}
