//! Immutable, validated RFC 3986 URIs and URI references.
//!
//! This crate models every part of a URI as its own type, so that a value
//! that exists is always valid and always renders in normalized form.
//!
//! # Overview
//!
//! A URI is built from, or parsed into, these parts:
//!
//! ```text
//! scheme ":" [ "//" authority ] path [ "?" query ] [ "#" fragment ]
//!                 │
//!                 └── [ user-info "@" ] host [ ":" port ]
//! ```
//!
//! Values are normalized as they are built: schemes and registered names
//! are lower-cased, percent escapes are upper-cased, dot segments are
//! removed and IPv6 addresses are rendered in their shortest form. When a
//! [`Scheme`] knows its default port, a port equal to it is dropped.
//!
//! # Quick Start
//!
//! ```rust
//! use urin::Urin;
//!
//! let uri = Urin::parse("HTTP://Example.COM:80/a/./b/../c?x=1#top").unwrap();
//!
//! assert_eq!(uri.scheme().name(), "http");
//! assert_eq!(uri.authority().unwrap().host().to_string(), "example.com");
//! assert_eq!(uri.path().to_string(), "/a/c");
//! assert_eq!(uri.query().unwrap().value(), "x=1");
//! assert_eq!(uri.fragment().unwrap().value(), "top");
//! ```
//!
//! # Builder Pattern
//!
//! The typestate builder only accepts an absolute path after an authority:
//!
//! ```rust
//! use urin::{AbsolutePath, Authority, Host, Port, Query, Scheme, Segment, Urin};
//!
//! let uri = Urin::builder(Scheme::https())
//!     .authority(Authority::new(Host::registered_name("example.com")).with_port(Port::new(443)))
//!     .path(AbsolutePath::new(["docs", "a b"].map(Segment::from)))
//!     .query(Query::new("lang=en"))
//!     .build();
//!
//! assert_eq!(uri.to_string(), "https://example.com/docs/a%20b?lang=en");
//! ```
//!
//! # Resolution
//!
//! References are resolved against a base URI as described in RFC 3986
//! section 5.2:
//!
//! ```rust
//! use urin::{Urin, UrinReference};
//!
//! let base = Urin::parse("http://a/b/c/d;p?q").unwrap();
//! let reference = UrinReference::parse("../g?y").unwrap();
//!
//! assert_eq!(base.resolve(&reference).to_string(), "http://a/b/g?y");
//! ```
//!
//! # Scheme-Specific Parsing
//!
//! A [`Scheme`] with a default port acts as a parser for its own URIs, and
//! drops the default port from every authority it sees:
//!
//! ```rust
//! use urin::{Port, Scheme};
//!
//! let scheme = Scheme::with_default_port("ws", Port::new(80)).unwrap();
//! let uri = scheme.parse_urin("ws://example.com:80/chat").unwrap();
//!
//! assert_eq!(uri.to_string(), "ws://example.com/chat");
//! ```
//!
//! # Encodings
//!
//! Queries and fragments carry arbitrary values through composable
//! [`Encoding`]s:
//!
//! ```rust
//! use urin::{DelimitedEncoding, Query, StringEncoding};
//!
//! let pairs = DelimitedEncoding::new('&', StringEncoding::QUERY_AND_FRAGMENT);
//! let query = Query::encode_with(&vec!["a=1".to_string(), "b&c".to_string()], &pairs).unwrap();
//!
//! assert_eq!(query.as_str(), "a=1&b%26c");
//! assert_eq!(query.decode_with(&pairs).unwrap(), vec!["a=1", "b&c"]);
//! ```
//!
//! # Errors
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | [`InvalidArgument`] | constructors given a value outside their domain |
//! | [`ParseError`] | `parse` functions given text that is not in the grammar |
//! | [`DecodingError`] | decoding a value whose encoding is malformed |
//! | [`PartAbsent`] | accessors for an optional part that is not present |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod authority;
mod builder;
mod charset;
mod encoding;
mod error;
mod fragment;
mod hexadectet;
mod hierarchical_part;
mod host;
#[cfg(kani)]
mod kani_impls;
mod octet;
mod path;
mod percent;
mod port;
pub mod prelude;
mod query;
mod relative_reference;
mod scheme;
mod segment;
mod urin;
mod urin_reference;
mod user_info;

pub use authority::Authority;
pub use builder::{Empty, HasAuthority, HasPath, UrinBuilder};
pub use charset::CharacterSet;
pub use encoding::{DelimitedEncoding, Encoding, LiteralOverrideEncoding, StringEncoding, SubstitutedEncoding};
pub use error::{DecodingError, InvalidArgument, InvalidArgumentKind, ParseError, ParseErrorKind, PartAbsent};
pub use fragment::Fragment;
pub use hexadectet::Hexadectet;
pub use hierarchical_part::HierarchicalPart;
pub use host::Host;
pub use octet::Octet;
pub use path::{AbsolutePath, Path, PrefixPolicy, RootlessPath};
pub use percent::PercentEncoder;
pub use port::Port;
pub use query::Query;
pub use relative_reference::RelativeReference;
pub use scheme::Scheme;
pub use segment::Segment;
pub use urin::Urin;
pub use urin_reference::UrinReference;
pub use user_info::UserInfo;
