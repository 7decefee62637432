//! The `hier-part` of a URI: an optional authority and a path.

use crate::authority::Authority;
use crate::path::{AbsolutePath, Path};

/// An optional authority together with a path.
///
/// A path following an authority must be empty or absolute, so the
/// constructors only accept those combinations.
///
/// # Examples
///
/// ```
/// use urin::{AbsolutePath, Authority, HierarchicalPart, Host, Path, Segment};
///
/// let part = HierarchicalPart::with_authority_and_path(
///     Authority::new(Host::registered_name("example.com")),
///     AbsolutePath::new(["a", "b"].map(Segment::from)),
/// );
/// assert!(part.authority().is_some());
///
/// let part = HierarchicalPart::new(Path::rootless(["isbn:0451450523"].map(Segment::from)));
/// assert!(part.authority().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HierarchicalPart {
    authority: Option<Authority>,
    path: Path,
}

impl HierarchicalPart {
    /// A path with no authority.
    #[must_use]
    pub const fn new(path: Path) -> Self {
        Self { authority: None, path }
    }

    /// An authority with an empty path.
    #[must_use]
    pub const fn with_authority(authority: Authority) -> Self {
        Self {
            authority: Some(authority),
            path: Path::Empty,
        }
    }

    /// An authority followed by an absolute path.
    #[must_use]
    pub const fn with_authority_and_path(authority: Authority, path: AbsolutePath) -> Self {
        Self {
            authority: Some(authority),
            path: Path::Absolute(path),
        }
    }

    /// The authority, if present.
    #[must_use]
    pub const fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    /// The path.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn into_parts(self) -> (Option<Authority>, Path) {
        (self.authority, self.path)
    }
}

impl From<Path> for HierarchicalPart {
    fn from(path: Path) -> Self {
        Self::new(path)
    }
}

impl From<Authority> for HierarchicalPart {
    fn from(authority: Authority) -> Self {
        Self::with_authority(authority)
    }
}
