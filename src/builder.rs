//! Typestate builder for constructing [`Urin`] instances.
//!
//! This module provides a builder that uses phantom types to enforce at
//! compile-time that a path following an authority is absolute.

use std::marker::PhantomData;

use crate::authority::Authority;
use crate::fragment::Fragment;
use crate::hierarchical_part::HierarchicalPart;
use crate::path::{AbsolutePath, Path};
use crate::query::Query;
use crate::scheme::Scheme;
use crate::urin::Urin;

/// Marker: Only the scheme has been set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// Marker: An authority has been set; any path must be absolute.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasAuthority;

/// Marker: The path has been set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasPath;

/// A typestate builder for constructing [`Urin`] instances.
///
/// Authority and path are optional, but the authority comes first, and
/// once it is set only an [`AbsolutePath`] is accepted. Query and fragment
/// can be added at any point, and `build()` is available in every state.
///
/// # Type State
///
/// - [`Empty`]: Initial state, only the scheme is set
/// - [`HasAuthority`]: An authority has been set
/// - [`HasPath`]: A path has been set
///
/// # Examples
///
/// ```
/// use urin::{Authority, Fragment, Host, Path, Scheme, Segment, Urin};
///
/// let uri = Urin::builder(Scheme::new("urn").unwrap())
///     .path(Path::rootless(["isbn:0451450523"].map(Segment::from)))
///     .build();
/// assert_eq!(uri.to_string(), "urn:isbn:0451450523");
///
/// let uri = Urin::builder(Scheme::http())
///     .authority(Authority::new(Host::registered_name("example.com")))
///     .fragment(Fragment::new("top"))
///     .build();
/// assert_eq!(uri.to_string(), "http://example.com#top");
/// ```
///
/// # Compile-Time Safety
///
/// A rootless path cannot follow an authority:
///
/// ```compile_fail
/// use urin::{Authority, Host, Path, Scheme, Segment, Urin};
///
/// let uri = Urin::builder(Scheme::http())
///     .authority(Authority::new(Host::local_host()))
///     .path(Path::rootless([Segment::new("a")]))  // Compile error!
///     .build();
/// ```
///
/// ```compile_fail
/// use urin::{AbsolutePath, Authority, Host, Scheme, Urin};
///
/// // Error: cannot set the authority after the path
/// let uri = Urin::builder(Scheme::http())
///     .path(AbsolutePath::default())
///     .authority(Authority::new(Host::local_host()))  // Compile error!
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct UrinBuilder<State = Empty> {
    scheme: Scheme,
    authority: Option<Authority>,
    path: Path,
    query: Option<Query>,
    fragment: Option<Fragment>,
    _state: PhantomData<State>,
}

impl UrinBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub const fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            authority: None,
            path: Path::Empty,
            query: None,
            fragment: None,
            _state: PhantomData,
        }
    }

    /// Sets the authority and advances to the [`HasAuthority`] state.
    #[must_use]
    pub fn authority(self, authority: Authority) -> UrinBuilder<HasAuthority> {
        UrinBuilder {
            scheme: self.scheme,
            authority: Some(authority),
            path: self.path,
            query: self.query,
            fragment: self.fragment,
            _state: PhantomData,
        }
    }

    /// Sets a path of any kind and advances to the [`HasPath`] state.
    #[must_use]
    pub fn path(self, path: impl Into<Path>) -> UrinBuilder<HasPath> {
        UrinBuilder {
            scheme: self.scheme,
            authority: None,
            path: path.into(),
            query: self.query,
            fragment: self.fragment,
            _state: PhantomData,
        }
    }
}

impl UrinBuilder<HasAuthority> {
    /// Sets the absolute path after the authority and advances to the
    /// [`HasPath`] state.
    #[must_use]
    pub fn path(self, path: AbsolutePath) -> UrinBuilder<HasPath> {
        UrinBuilder {
            scheme: self.scheme,
            authority: self.authority,
            path: Path::Absolute(path),
            query: self.query,
            fragment: self.fragment,
            _state: PhantomData,
        }
    }
}

/// Methods available in all states.
impl<State> UrinBuilder<State> {
    /// Sets the optional query.
    ///
    /// If called multiple times, the last value wins.
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the optional fragment.
    ///
    /// If called multiple times, the last value wins.
    #[must_use]
    pub fn fragment(mut self, fragment: Fragment) -> Self {
        self.fragment = Some(fragment);
        self
    }

    /// Sets or clears the query from an `Option`.
    #[must_use]
    pub fn maybe_query(mut self, query: Option<Query>) -> Self {
        self.query = query;
        self
    }

    /// Sets or clears the fragment from an `Option`.
    #[must_use]
    pub fn maybe_fragment(mut self, fragment: Option<Fragment>) -> Self {
        self.fragment = fragment;
        self
    }

    /// Builds the final [`Urin`], normalizing the authority by the scheme's
    /// default port.
    #[must_use]
    pub fn build(self) -> Urin {
        let hierarchical_part = match (self.authority, self.path) {
            (Some(authority), Path::Absolute(path)) => HierarchicalPart::with_authority_and_path(authority, path),
            (Some(authority), _) => HierarchicalPart::with_authority(authority),
            (None, path) => HierarchicalPart::new(path),
        };
        Urin::new(&self.scheme, hierarchical_part, self.query, self.fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Host;
    use crate::port::Port;
    use crate::segment::Segment;

    fn sample_authority() -> Authority {
        Authority::new(Host::registered_name("example.com"))
    }

    fn sample_path() -> AbsolutePath {
        AbsolutePath::new(["a", "b"].map(Segment::from))
    }

    #[test]
    fn scheme_only() {
        let uri = UrinBuilder::new(Scheme::new("about").unwrap()).build();
        assert_eq!(uri.to_string(), "about:");
    }

    #[test]
    fn authority_transitions_to_has_authority() {
        let builder: UrinBuilder<HasAuthority> = Urin::builder(Scheme::http()).authority(sample_authority());
        assert_eq!(builder.build().to_string(), "http://example.com");
    }

    #[test]
    fn path_after_authority() {
        let uri = Urin::builder(Scheme::http())
            .authority(sample_authority())
            .path(sample_path())
            .build();
        assert_eq!(uri.to_string(), "http://example.com/a/b");
    }

    #[test]
    fn path_without_authority() {
        let uri = Urin::builder(Scheme::new("file").unwrap()).path(sample_path()).build();
        assert_eq!(uri.to_string(), "file:/a/b");
    }

    #[test]
    fn build_normalizes_default_port() {
        let uri = Urin::builder(Scheme::https())
            .authority(sample_authority().with_port(Port::new(443)))
            .build();
        assert_eq!(uri.to_string(), "https://example.com");
    }

    #[test]
    fn query_can_be_set_at_any_state() {
        let early = Urin::builder(Scheme::http())
            .query(Query::new("q"))
            .authority(sample_authority())
            .path(sample_path())
            .build();
        let late = Urin::builder(Scheme::http())
            .authority(sample_authority())
            .path(sample_path())
            .query(Query::new("q"))
            .build();
        assert_eq!(early, late);
        assert_eq!(late.to_string(), "http://example.com/a/b?q");
    }

    #[test]
    fn fragment_last_value_wins() {
        let uri = Urin::builder(Scheme::http())
            .fragment(Fragment::new("one"))
            .fragment(Fragment::new("two"))
            .build();
        assert_eq!(uri.fragment().map(Fragment::as_str), Ok("two"));
    }

    #[test]
    fn maybe_setters_clear() {
        let uri = Urin::builder(Scheme::http())
            .query(Query::new("q"))
            .maybe_query(None)
            .maybe_fragment(Some(Fragment::new("f")))
            .build();
        assert!(!uri.has_query());
        assert!(uri.has_fragment());
    }

    #[test]
    fn clone_preserves_state() {
        let builder = Urin::builder(Scheme::http()).authority(sample_authority());
        let cloned = builder.clone();
        assert_eq!(builder.build(), cloned.build());
    }

    #[test]
    fn debug_output_is_useful() {
        let builder = Urin::builder(Scheme::http());
        let debug = format!("{builder:?}");
        assert!(debug.contains("UrinBuilder"));
        assert!(debug.contains("http"));
    }
}
