//! URI schemes, and the scheme-aware construction and parsing entry points.

use std::fmt;
use std::str::FromStr;

use crate::authority::Authority;
use crate::charset::{self, CharacterSet};
use crate::error::{InvalidArgument, InvalidArgumentKind, ParseError, ParseErrorKind};
use crate::fragment::Fragment;
use crate::hierarchical_part::HierarchicalPart;
use crate::port::Port;
use crate::query::Query;
use crate::relative_reference::RelativeReference;
use crate::urin::Urin;
use crate::urin_reference::UrinReference;

/// A scheme name, optionally with the port its protocol uses by default.
///
/// The name is case-insensitive and stored in lower case. A default port
/// changes how authorities are normalized: a port equal to the default is
/// dropped, so `http://example.com:80/` and `http://example.com/` are the
/// same URI when built or parsed through [`Scheme::http`].
///
/// # Examples
///
/// ```
/// use urin::Scheme;
///
/// let http = Scheme::http();
/// let urin = http.parse_urin("HTTP://Example.com:80/index.html").unwrap();
/// assert_eq!(urin.to_string(), "http://example.com/index.html");
///
/// assert!(Scheme::new("1http").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scheme {
    name: String,
    default_port: Option<Port>,
}

impl Scheme {
    /// A scheme with no default port.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is empty, does not start with a
    /// letter, or contains a character other than a letter, digit, `+`, `-`
    /// or `.`.
    pub fn new(name: &str) -> Result<Self, InvalidArgument> {
        validate(name)?;
        Ok(Self {
            name: name.to_ascii_lowercase(),
            default_port: None,
        })
    }

    /// A scheme whose authorities drop `default_port`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is not a valid scheme name.
    pub fn with_default_port(name: &str, default_port: Port) -> Result<Self, InvalidArgument> {
        validate(name)?;
        Ok(Self {
            name: name.to_ascii_lowercase(),
            default_port: Some(default_port),
        })
    }

    /// `http`, default port 80.
    #[must_use]
    pub fn http() -> Self {
        Self {
            name: "http".to_string(),
            default_port: Some(Port::new(80)),
        }
    }

    /// `https`, default port 443.
    #[must_use]
    pub fn https() -> Self {
        Self {
            name: "https".to_string(),
            default_port: Some(Port::new(443)),
        }
    }

    /// Parses a scheme name, without the trailing `:`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` with kind `InvalidScheme` if `input` is not a
    /// valid scheme name.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::new(input).map_err(|e| ParseError::new(input, ParseErrorKind::InvalidScheme(e)))
    }

    /// The scheme name, in lower case.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The default port, if the scheme has one.
    #[must_use]
    pub const fn default_port(&self) -> Option<&Port> {
        self.default_port.as_ref()
    }

    /// `authority` with its port removed if it equals the default port.
    #[must_use]
    pub fn normalise(&self, authority: &Authority) -> Authority {
        match &self.default_port {
            Some(default_port) => authority.without_port_if(default_port),
            None => authority.clone(),
        }
    }

    pub(crate) fn normalise_part(&self, authority: Option<Authority>) -> Option<Authority> {
        authority.map(|authority| self.normalise(&authority))
    }

    pub(crate) fn without_default_port(&self) -> Self {
        Self {
            name: self.name.clone(),
            default_port: None,
        }
    }

    /// Builds a URI with this scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use urin::{AbsolutePath, Authority, HierarchicalPart, Host, Port, Query, Scheme, Segment};
    ///
    /// let authority = Authority::new(Host::registered_name("example.com")).with_port(Port::new(443));
    /// let path = AbsolutePath::new(["docs"].map(Segment::from));
    /// let urin = Scheme::https().urin(
    ///     HierarchicalPart::with_authority_and_path(authority, path),
    ///     Some(Query::new("q=1")),
    ///     None,
    /// );
    /// assert_eq!(urin.to_string(), "https://example.com/docs?q=1");
    /// ```
    #[must_use]
    pub fn urin(&self, hierarchical_part: HierarchicalPart, query: Option<Query>, fragment: Option<Fragment>) -> Urin {
        Urin::new(self, hierarchical_part, query, fragment)
    }

    /// Builds a relative reference whose authority is normalized by this
    /// scheme's default port.
    #[must_use]
    pub fn relative_reference(
        &self,
        hierarchical_part: HierarchicalPart,
        query: Option<Query>,
        fragment: Option<Fragment>,
    ) -> RelativeReference {
        let (authority, path) = hierarchical_part.into_parts();
        RelativeReference::from_parts(self.normalise_part(authority), path, query, fragment)
    }

    /// Parses a URI, normalizing its authority by this scheme's default
    /// port when the parsed scheme name matches this one.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `input` is not a valid URI.
    pub fn parse_urin(&self, input: &str) -> Result<Urin, ParseError> {
        Urin::parse(input).map(|urin| self.adopt_urin(urin))
    }

    /// Parses a relative reference, normalizing its authority by this
    /// scheme's default port.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `input` is not a valid relative reference.
    pub fn parse_relative_reference(&self, input: &str) -> Result<RelativeReference, ParseError> {
        RelativeReference::parse(input).map(|reference| reference.normalised_by(self))
    }

    /// Parses a URI or relative reference, normalizing as
    /// [`parse_urin`](Self::parse_urin) and
    /// [`parse_relative_reference`](Self::parse_relative_reference) do.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `input` is neither.
    pub fn parse_urin_reference(&self, input: &str) -> Result<UrinReference, ParseError> {
        UrinReference::parse(input).map(|reference| match reference {
            UrinReference::Urin(urin) => UrinReference::Urin(self.adopt_urin(urin)),
            UrinReference::RelativeReference(relative) => {
                UrinReference::RelativeReference(relative.normalised_by(self))
            }
        })
    }

    fn adopt_urin(&self, urin: Urin) -> Urin {
        if urin.scheme().name == self.name {
            urin.normalised_by(self)
        } else {
            urin
        }
    }
}

fn validate(name: &str) -> Result<(), InvalidArgument> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(InvalidArgument::new("scheme", name, InvalidArgumentKind::Empty));
    };
    if !CharacterSet::ALPHA.contains(first) {
        return Err(illegal_character(name, 1, &CharacterSet::ALPHA));
    }
    match chars.position(|c| !charset::SCHEME_TRAILING.contains(c)) {
        Some(index) => Err(illegal_character(name, index + 2, &charset::SCHEME_TRAILING)),
        None => Ok(()),
    }
}

fn illegal_character(name: &str, position: usize, allowed: &CharacterSet) -> InvalidArgument {
    InvalidArgument::new(
        "scheme",
        name,
        InvalidArgumentKind::IllegalCharacter {
            position,
            allowed: allowed.describe().to_string(),
        },
    )
}

/// Returns true if `input` starts with `scheme ":"` before any `/`, `?` or `#`.
pub(crate) fn has_scheme_prefix(input: &str) -> bool {
    match input.find([':', '/', '?', '#']) {
        Some(index) if input[index..].starts_with(':') => validate(&input[..index]).is_ok(),
        _ => false,
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Scheme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Scheme {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Scheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Scheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Host;

    #[test]
    fn name_is_lower_cased() {
        assert_eq!(Scheme::new("HtTp").unwrap().name(), "http");
    }

    #[test]
    fn valid_names() {
        for name in ["a", "svn+ssh", "x-y.z", "urn", "h2"] {
            assert!(Scheme::new(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn empty_name_fails() {
        let err = Scheme::new("").unwrap_err();
        assert_eq!(err.kind, InvalidArgumentKind::Empty);
        assert_eq!(err.to_string(), "scheme must contain at least one character");
    }

    #[test]
    fn leading_digit_fails() {
        let err = Scheme::new("1a").unwrap_err();
        assert_eq!(err.to_string(), "Character 1 must be a-z, or A-Z in scheme [1a]");
    }

    #[test]
    fn bad_trailing_character_position() {
        let err = Scheme::new("ab_c").unwrap_err();
        assert!(matches!(
            err.kind,
            InvalidArgumentKind::IllegalCharacter { position: 3, .. }
        ));
    }

    #[test]
    fn well_known_default_ports() {
        assert_eq!(Scheme::http().default_port(), Some(&Port::new(80)));
        assert_eq!(Scheme::https().default_port(), Some(&Port::new(443)));
        assert_eq!(Scheme::new("ftp").unwrap().default_port(), None);
    }

    #[test]
    fn normalise_drops_default_port_only() {
        let http = Scheme::http();
        let host = Host::registered_name("example.com");
        let default = Authority::new(host.clone()).with_port(Port::new(80));
        let other = Authority::new(host.clone()).with_port(Port::new(8080));
        assert_eq!(http.normalise(&default), Authority::new(host));
        assert_eq!(http.normalise(&other), other);
    }

    #[test]
    fn normalise_compares_port_digits() {
        let http = Scheme::http();
        let authority = Authority::parse("example.com:0080").unwrap();
        assert!(!http.normalise(&authority).has_port());
    }

    #[test]
    fn parse_urin_applies_matching_default_port() {
        let http = Scheme::http();
        assert_eq!(http.parse_urin("http://a:80/").unwrap().to_string(), "http://a/");
        assert_eq!(http.parse_urin("https://a:80/").unwrap().to_string(), "https://a:80/");
    }

    #[test]
    fn plain_parse_keeps_port() {
        assert_eq!(Urin::parse("http://a:80/").unwrap().to_string(), "http://a:80/");
    }

    #[test]
    fn parse_relative_reference_applies_default_port() {
        let reference = Scheme::https().parse_relative_reference("//a:443/b").unwrap();
        assert_eq!(reference.to_string(), "//a/b");
    }

    #[test]
    fn scheme_prefix_detection() {
        assert!(has_scheme_prefix("http:x"));
        assert!(has_scheme_prefix("a+b.c-d:"));
        assert!(!has_scheme_prefix("/a:b"));
        assert!(!has_scheme_prefix("1a:b"));
        assert!(!has_scheme_prefix("a?b:c"));
        assert!(!has_scheme_prefix(":a"));
        assert!(!has_scheme_prefix("abc"));
    }
}
