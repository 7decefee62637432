//! Relative references: URI references without a scheme.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::authority::Authority;
use crate::error::{ParseError, ParseErrorKind, PartAbsent};
use crate::fragment::Fragment;
use crate::hierarchical_part::HierarchicalPart;
use crate::path::{Path, PrefixPolicy};
use crate::query::Query;
use crate::scheme::Scheme;

/// A parsed and validated relative reference.
///
/// # Structure
///
/// ```text
/// [//authority]path[?query][#fragment]
/// ```
///
/// A relative reference has no meaning on its own; resolve it against a
/// base [`Urin`](crate::Urin) to get one.
///
/// # Examples
///
/// ```
/// use urin::RelativeReference;
///
/// let reference = RelativeReference::parse("../img/logo.png?size=2#top").unwrap();
/// assert_eq!(reference.path().to_string(), "../img/logo.png");
/// assert_eq!(reference.query().unwrap().as_str(), "size=2");
/// assert!(!reference.has_authority());
///
/// // A colon in the first segment would read as a scheme, so it gets a `./`
/// let reference = RelativeReference::parse("./a:b").unwrap();
/// assert_eq!(reference.to_string(), "./a:b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeReference {
    authority: Option<Authority>,
    path: Path,
    query: Option<Query>,
    fragment: Option<Fragment>,
    /// Rendered text
    normalized: String,
}

impl RelativeReference {
    /// Creates a relative reference from its components.
    #[must_use]
    pub fn new(hierarchical_part: HierarchicalPart, query: Option<Query>, fragment: Option<Fragment>) -> Self {
        let (authority, path) = hierarchical_part.into_parts();
        Self::from_parts(authority, path, query, fragment)
    }

    pub(crate) fn from_parts(
        authority: Option<Authority>,
        path: Path,
        query: Option<Query>,
        fragment: Option<Fragment>,
    ) -> Self {
        let mut normalized = String::new();
        match &authority {
            Some(authority) => {
                normalized.push_str("//");
                normalized.push_str(&authority.to_string());
                normalized.push_str(&path.render(PrefixPolicy::Never));
            }
            None => normalized.push_str(&path.render(PrefixPolicy::IfFirstIsEmptyOrContainsColon)),
        }
        push_query_and_fragment(&mut normalized, query.as_ref(), fragment.as_ref());
        Self {
            authority,
            path,
            query,
            fragment,
            normalized,
        }
    }

    /// Parses a relative reference.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - A component (authority, path, query, fragment) is invalid
    /// - The first path segment contains a colon and there is no authority
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| {
            debug!("rejected relative reference [{}]: {}", input, kind);
            ParseError::new(input, kind)
        })
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        let (hierarchy, query, fragment) = split_query_and_fragment(input)?;
        let (authority, path) = parse_hierarchy(hierarchy)?;
        if authority.is_none() && hierarchy.split('/').next().is_some_and(|first| first.contains(':')) {
            return Err(ParseErrorKind::NotARelativeReference);
        }
        Ok(Self::from_parts(authority, path, query, fragment))
    }

    /// Returns the authority.
    ///
    /// # Errors
    ///
    /// Returns `PartAbsent` if the reference has no authority.
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
    /// Returns `PartAbsent` if the reference has no query.
    pub fn query(&self) -> Result<&Query, PartAbsent> {
        self.query.as_ref().ok_or(PartAbsent { part: "query" })
    }

    /// Returns the fragment.
    ///
    /// # Errors
    ///
    /// Returns `PartAbsent` if the reference has no fragment.
    pub fn fragment(&self) -> Result<&Fragment, PartAbsent> {
        self.fragment.as_ref().ok_or(PartAbsent { part: "fragment" })
    }

    /// Returns true if the reference has an authority.
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.authority.is_some()
    }

    /// Returns true if the reference has a query, even an empty one.
    #[must_use]
    pub const fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// Returns true if the reference has a fragment, even an empty one.
    #[must_use]
    pub const fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    /// Returns a new reference with the given query.
    #[must_use]
    pub fn with_query(&self, query: Query) -> Self {
        Self::from_parts(self.authority.clone(), self.path.clone(), Some(query), self.fragment.clone())
    }

    /// Returns a new reference without a query.
    #[must_use]
    pub fn without_query(&self) -> Self {
        Self::from_parts(self.authority.clone(), self.path.clone(), None, self.fragment.clone())
    }

    /// Returns a new reference with the given fragment.
    #[must_use]
    pub fn with_fragment(&self, fragment: Fragment) -> Self {
        Self::from_parts(self.authority.clone(), self.path.clone(), self.query.clone(), Some(fragment))
    }

    /// Returns a new reference without a fragment.
    #[must_use]
    pub fn without_fragment(&self) -> Self {
        Self::from_parts(self.authority.clone(), self.path.clone(), self.query.clone(), None)
    }

    /// Returns the reference as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub(crate) fn normalised_by(self, scheme: &Scheme) -> Self {
        Self::from_parts(scheme.normalise_part(self.authority), self.path, self.query, self.fragment)
    }

    pub(crate) fn query_part(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub(crate) fn fragment_part(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }
}

/// Splits `input` at the first `#`, then what precedes it at the first `?`.
pub(crate) fn split_query_and_fragment(
    input: &str,
) -> Result<(&str, Option<Query>, Option<Fragment>), ParseErrorKind> {
    let (rest, fragment) = match input.split_once('#') {
        Some((rest, fragment)) => (rest, Some(Fragment::parse(fragment).map_err(|e| e.kind)?)),
        None => (input, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((rest, query)) => (rest, Some(Query::parse(query).map_err(|e| e.kind)?)),
        None => (rest, None),
    };
    Ok((rest, query, fragment))
}

/// Parses `["//" authority] path`.
pub(crate) fn parse_hierarchy(text: &str) -> Result<(Option<Authority>, Path), ParseErrorKind> {
    match text.strip_prefix("//") {
        Some(rest) => {
            let end = rest.find('/').unwrap_or(rest.len());
            let authority = Authority::parse_inner(&rest[..end])?;
            let path = Path::parse(&rest[end..]).map_err(|e| e.kind)?;
            Ok((Some(authority), path))
        }
        None => Ok((None, Path::parse(text).map_err(|e| e.kind)?)),
    }
}

pub(crate) fn push_query_and_fragment(out: &mut String, query: Option<&Query>, fragment: Option<&Fragment>) {
    if let Some(query) = query {
        out.push('?');
        out.push_str(query.as_str());
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment.as_str());
    }
}

impl fmt::Display for RelativeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

impl FromStr for RelativeReference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for RelativeReference {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl TryFrom<&str> for RelativeReference {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for RelativeReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RelativeReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RelativeReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RelativeReference {
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
    use crate::path::AbsolutePath;
    use crate::segment::Segment;

    #[test]
    fn parse_network_path_reference() {
        let reference = RelativeReference::parse("//example.com:8042/over/there?name=ferret#nose").unwrap();
        assert_eq!(reference.authority().unwrap().host(), &Host::registered_name("example.com"));
        assert_eq!(reference.path().to_string(), "/over/there");
        assert_eq!(reference.query().unwrap().as_str(), "name=ferret");
        assert_eq!(reference.fragment().unwrap().as_str(), "nose");
    }

    #[test]
    fn parse_empty() {
        let reference = RelativeReference::parse("").unwrap();
        assert!(reference.path().is_empty());
        assert!(!reference.has_query());
        assert!(!reference.has_fragment());
        assert_eq!(reference.to_string(), "");
    }

    #[test]
    fn empty_query_and_fragment_are_present() {
        let reference = RelativeReference::parse("?#").unwrap();
        assert!(reference.has_query());
        assert!(reference.has_fragment());
        assert_eq!(reference.to_string(), "?#");
    }

    #[test]
    fn question_mark_inside_fragment_stays_in_fragment() {
        let reference = RelativeReference::parse("a#b?c").unwrap();
        assert!(!reference.has_query());
        assert_eq!(reference.fragment().unwrap().as_str(), "b?c");
    }

    #[test]
    fn absent_parts_report_part_absent() {
        let reference = RelativeReference::parse("a/b").unwrap();
        assert_eq!(reference.authority().unwrap_err(), PartAbsent { part: "authority" });
        assert_eq!(reference.query().unwrap_err(), PartAbsent { part: "query" });
        assert_eq!(reference.fragment().unwrap_err(), PartAbsent { part: "fragment" });
    }

    #[test]
    fn colon_in_first_segment_fails() {
        let result = RelativeReference::parse("a:b/c");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ParseErrorKind::NotARelativeReference,
                ..
            })
        ));
        assert!(RelativeReference::parse("b/a:c").is_ok());
        assert!(RelativeReference::parse("//h/a:c").is_ok());
    }

    #[test]
    fn colon_segment_renders_with_dot_prefix() {
        let reference = RelativeReference::new(
            HierarchicalPart::new(Path::rootless([Segment::new("a:b")])),
            None,
            None,
        );
        assert_eq!(reference.to_string(), "./a:b");
        assert_eq!(RelativeReference::parse(reference.as_str()).unwrap(), reference);
    }

    #[test]
    fn leading_empty_segment_renders_with_dot_prefix() {
        let reference = RelativeReference::new(
            HierarchicalPart::new(Path::absolute([Segment::empty(), Segment::new("a")])),
            None,
            None,
        );
        assert_eq!(reference.to_string(), "/.//a");
        assert_eq!(RelativeReference::parse("/.//a").unwrap(), reference);
    }

    #[test]
    fn authority_with_leading_empty_segment() {
        let reference = RelativeReference::new(
            HierarchicalPart::with_authority_and_path(
                Authority::new(Host::local_host()),
                AbsolutePath::new([Segment::empty(), Segment::new("a")]),
            ),
            None,
            None,
        );
        assert_eq!(reference.to_string(), "//localhost//a");
        assert_eq!(RelativeReference::parse(reference.as_str()).unwrap(), reference);
    }

    #[test]
    fn dot_segments_are_removed_on_parse() {
        let reference = RelativeReference::parse("a/./b/../c").unwrap();
        assert_eq!(reference.to_string(), "a/c");
    }

    #[test]
    fn invalid_host_keeps_full_input() {
        let err = RelativeReference::parse("//[::1/x").unwrap_err();
        assert_eq!(err.input, "//[::1/x");
        assert!(matches!(err.kind, ParseErrorKind::InvalidHost { .. }));
    }

    #[test]
    fn with_and_without_modifiers() {
        let reference = RelativeReference::parse("a?x#y").unwrap();
        assert_eq!(reference.without_query().to_string(), "a#y");
        assert_eq!(reference.without_fragment().to_string(), "a?x");
        assert_eq!(reference.with_query(Query::new("z")).to_string(), "a?z#y");
        assert_eq!(reference.with_fragment(Fragment::new("w")).to_string(), "a?x#w");
    }
}
