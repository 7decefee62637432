//! Convenient re-exports for glob imports.
//!
//! This module provides a single import for all common types, making it easy
//! to get started with the crate:
//!
//! ```rust
//! use urin::prelude::*;
//!
//! let uri = Urin::parse("http://example.com/index.html").unwrap();
//! let reference = UrinReference::parse("about.html#team").unwrap();
//! assert_eq!(uri.resolve(&reference).to_string(), "http://example.com/about.html#team");
//! ```
//!
//! Builder state markers (`Empty`, `HasAuthority`, `HasPath`) are
//! intentionally excluded as they are implementation details.

pub use crate::{
    // Core types
    AbsolutePath, Authority, Fragment, Hexadectet, HierarchicalPart, Host, Octet, Path, Port, Query,
    RelativeReference, RootlessPath, Scheme, Segment, Urin, UrinReference, UserInfo,
    // Builder
    UrinBuilder,
    // Encodings
    CharacterSet, DelimitedEncoding, Encoding, LiteralOverrideEncoding, PercentEncoder, PrefixPolicy,
    StringEncoding, SubstitutedEncoding,
    // Errors
    DecodingError, InvalidArgument, InvalidArgumentKind, ParseError, ParseErrorKind, PartAbsent,
};
