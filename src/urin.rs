//! The main URI type.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::authority::Authority;
use crate::builder::UrinBuilder;
use crate::error::{ParseError, ParseErrorKind, PartAbsent};
use crate::fragment::Fragment;
use crate::hierarchical_part::HierarchicalPart;
use crate::path::{AbsolutePath, Path, PrefixPolicy};
use crate::query::Query;
use crate::relative_reference::{self, RelativeReference};
use crate::scheme::Scheme;
use crate::urin_reference::UrinReference;

/// A parsed and validated URI.
///
/// # Structure
///
/// ```text
/// scheme:[//authority]path[?query][#fragment]
/// ```
///
/// Every part is normalized on the way in: the scheme and registered names
/// are lower-cased, dot segments are removed and percent-escapes are written
/// in upper case. A URI built from a [`Scheme`] with a default port drops a
/// port equal to it.
///
/// # Examples
///
/// ```
/// use urin::Urin;
///
/// let uri = Urin::parse("HTTP://www.Example.com/a/./b/../c?x=1#frag").unwrap();
/// assert_eq!(uri.scheme().name(), "http");
/// assert_eq!(uri.authority().unwrap().to_string(), "www.example.com");
/// assert_eq!(uri.path().to_string(), "/a/c");
/// assert_eq!(uri.query().unwrap().as_str(), "x=1");
/// assert_eq!(uri.to_string(), "http://www.example.com/a/c?x=1#frag");
///
/// // A URI without an authority
/// let uri = Urin::parse("mailto:John.Doe@example.com").unwrap();
/// assert!(!uri.has_authority());
/// assert_eq!(uri.path().to_string(), "John.Doe@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Urin {
    scheme: Scheme,
    authority: Option<Authority>,
    path: Path,
    query: Option<Query>,
    fragment: Option<Fragment>,
    /// Rendered text
    normalized: String,
}

impl Urin {
    /// Creates a URI from its components.
    ///
    /// The authority is normalized by `scheme`'s default port, and the
    /// scheme is stored without it.
    #[must_use]
    pub fn new(
        scheme: &Scheme,
        hierarchical_part: HierarchicalPart,
        query: Option<Query>,
        fragment: Option<Fragment>,
    ) -> Self {
        let (authority, path) = hierarchical_part.into_parts();
        Self::from_parts(
            scheme.without_default_port(),
            scheme.normalise_part(authority),
            path,
            query,
            fragment,
        )
    }

    /// Starts building a URI with `scheme`.
    ///
    /// # Examples
    ///
    /// ```
    /// use urin::{AbsolutePath, Authority, Host, Scheme, Segment, Urin};
    ///
    /// let uri = Urin::builder(Scheme::https())
    ///     .authority(Authority::new(Host::registered_name("example.com")))
    ///     .path(AbsolutePath::new(["index.html"].map(Segment::from)))
    ///     .build();
    /// assert_eq!(uri.to_string(), "https://example.com/index.html");
    /// ```
    #[must_use]
    pub fn builder(scheme: Scheme) -> UrinBuilder {
        UrinBuilder::new(scheme)
    }

    fn from_parts(
        scheme: Scheme,
        authority: Option<Authority>,
        path: Path,
        query: Option<Query>,
        fragment: Option<Fragment>,
    ) -> Self {
        let mut normalized = format!("{scheme}:");
        match &authority {
            Some(authority) => {
                normalized.push_str("//");
                normalized.push_str(&authority.to_string());
                normalized.push_str(&path.render(PrefixPolicy::Never));
            }
            None => normalized.push_str(&path.render(PrefixPolicy::IfFirstIsEmpty)),
        }
        relative_reference::push_query_and_fragment(&mut normalized, query.as_ref(), fragment.as_ref());
        Self {
            scheme,
            authority,
            path,
            query,
            fragment,
            normalized,
        }
    }

    /// Parses a URI from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - There is no `scheme:` before the first `/`, `?` or `#`
    /// - The scheme name is invalid
    /// - Any component (authority, path, query, fragment) is invalid
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| {
            debug!("rejected URI [{}]: {}", input, kind);
            ParseError::new(input, kind)
        })
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        let colon = match input.find([':', '/', '?', '#']) {
            Some(index) if index > 0 && input[index..].starts_with(':') => index,
            _ => return Err(ParseErrorKind::NotAUri),
        };
        let scheme = Scheme::new(&input[..colon]).map_err(ParseErrorKind::InvalidScheme)?;

        let (hierarchy, query, fragment) = relative_reference::split_query_and_fragment(&input[colon + 1..])?;
        let (authority, path) = relative_reference::parse_hierarchy(hierarchy)?;

        Ok(Self::from_parts(scheme, authority, path, query, fragment))
    }

    /// Returns the scheme, without its default port.
    #[must_use]
    pub const fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Returns the authority.
    ///
    /// # Errors
    ///
    /// Returns `PartAbsent` if the URI has no authority.
    pub fn authority(&self) -> Result<&Authority, PartAbsent> {
        self.authority.as_ref().ok_or(PartAbsent { part: "authority" })
    }

    /// Returns the path.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the query.
    ///
    /// # Errors
    ///
    /// Returns `PartAbsent` if the URI has no query.
    pub fn query(&self) -> Result<&Query, PartAbsent> {
        self.query.as_ref().ok_or(PartAbsent { part: "query" })
    }

    /// Returns the fragment.
    ///
    /// # Errors
    ///
    /// Returns `PartAbsent` if the URI has no fragment.
    pub fn fragment(&self) -> Result<&Fragment, PartAbsent> {
        self.fragment.as_ref().ok_or(PartAbsent { part: "fragment" })
    }

    /// Returns true if the URI has an authority.
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.authority.is_some()
    }

    /// Returns true if the URI has a query, even an empty one.
    #[must_use]
    pub const fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// Returns true if the URI has a fragment, even an empty one.
    #[must_use]
    pub const fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    /// Returns a new URI with the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use urin::{AbsolutePath, Segment, Urin};
    ///
    /// let uri = Urin::parse("http://example.com/old?q").unwrap();
    /// let updated = uri.with_path(AbsolutePath::new(["new"].map(Segment::from)));
    /// assert_eq!(updated.to_string(), "http://example.com/new?q");
    /// ```
    #[must_use]
    pub fn with_path(&self, path: AbsolutePath) -> Self {
        Self::from_parts(
            self.scheme.clone(),
            self.authority.clone(),
            Path::Absolute(path),
            self.query.clone(),
            self.fragment.clone(),
        )
    }

    /// Returns a new URI with the given query.
    #[must_use]
    pub fn with_query(&self, query: Query) -> Self {
        Self::from_parts(
            self.scheme.clone(),
            self.authority.clone(),
            self.path.clone(),
            Some(query),
            self.fragment.clone(),
        )
    }

    /// Returns a new URI without a query.
    ///
    /// # Examples
    ///
    /// ```
    /// use urin::Urin;
    ///
    /// let uri = Urin::parse("http://example.com/?version=2.0").unwrap();
    /// let updated = uri.without_query();
    /// assert!(!updated.has_query());
    /// ```
    #[must_use]
    pub fn without_query(&self) -> Self {
        Self::from_parts(
            self.scheme.clone(),
            self.authority.clone(),
            self.path.clone(),
            None,
            self.fragment.clone(),
        )
    }

    /// Returns a new URI with the given fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use urin::{Fragment, Urin};
    ///
    /// let uri = Urin::parse("http://example.com/").unwrap();
    /// let updated = uri.with_fragment(Fragment::new("summary"));
    /// assert_eq!(updated.fragment().map(Fragment::as_str), Ok("summary"));
    /// ```
    #[must_use]
    pub fn with_fragment(&self, fragment: Fragment) -> Self {
        Self::from_parts(
            self.scheme.clone(),
            self.authority.clone(),
            self.path.clone(),
            self.query.clone(),
            Some(fragment),
        )
    }

    /// Returns a new URI without a fragment.
    #[must_use]
    pub fn without_fragment(&self) -> Self {
        Self::from_parts(
            self.scheme.clone(),
            self.authority.clone(),
            self.path.clone(),
            self.query.clone(),
            None,
        )
    }

    /// Resolves `reference` against this URI (RFC 3986 §5.2.2).
    ///
    /// A reference that is itself a URI is returned as it is, so `http:g`
    /// is not treated as relative to an `http` base.
    ///
    /// # Examples
    ///
    /// ```
    /// use urin::{Urin, UrinReference};
    ///
    /// let base = Urin::parse("http://a/b/c/d;p?q").unwrap();
    /// let resolve = |r: &str| base.resolve(&UrinReference::parse(r).unwrap()).to_string();
    /// assert_eq!(resolve("../g"), "http://a/b/g");
    /// assert_eq!(resolve("//g"), "http://g");
    /// assert_eq!(resolve("?y"), "http://a/b/c/d;p?y");
    /// assert_eq!(resolve(""), "http://a/b/c/d;p?q");
    /// ```
    #[must_use]
    pub fn resolve(&self, reference: &UrinReference) -> Self {
        let resolved = match reference {
            UrinReference::Urin(urin) => urin.clone(),
            UrinReference::RelativeReference(relative) => self.resolve_relative(relative),
        };
        trace!("resolved [{}] against [{}] to [{}]", reference, self, resolved);
        resolved
    }

    fn resolve_relative(&self, reference: &RelativeReference) -> Self {
        if let Ok(authority) = reference.authority() {
            return Self::from_parts(
                self.scheme.clone(),
                Some(authority.clone()),
                reference.path().clone(),
                reference.query_part().cloned(),
                reference.fragment_part().cloned(),
            );
        }

        let path = match reference.path() {
            Path::Rootless(rootless) if self.authority.is_none() && self.path.is_empty() => {
                rootless.merge_rootless(&[])
            }
            path => path.resolve_relative_to(&self.path),
        };
        let query = match (reference.query_part(), reference.path()) {
            (Some(query), _) => Some(query.clone()),
            (None, Path::Empty) => self.query.clone(),
            (None, _) => None,
        };

        Self::from_parts(
            self.scheme.clone(),
            self.authority.clone(),
            path,
            query,
            reference.fragment_part().cloned(),
        )
    }

    /// Returns the URI as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub(crate) fn normalised_by(self, scheme: &Scheme) -> Self {
        Self::from_parts(
            self.scheme,
            scheme.normalise_part(self.authority),
            self.path,
            self.query,
            self.fragment,
        )
    }
}

impl fmt::Display for Urin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

impl FromStr for Urin {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Urin {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl TryFrom<&str> for Urin {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for Urin {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Urin {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Urin {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Urin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
