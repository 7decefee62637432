//! URI references: either a URI or a relative reference.

use std::fmt;
use std::str::FromStr;

use crate::authority::Authority;
use crate::error::{ParseError, ParseErrorKind, PartAbsent};
use crate::fragment::Fragment;
use crate::path::Path;
use crate::query::Query;
use crate::relative_reference::RelativeReference;
use crate::scheme;
use crate::urin::Urin;

/// A URI reference, as found in documents: a full URI or a relative
/// reference to be resolved against a base.
///
/// # Examples
///
/// ```
/// use urin::UrinReference;
///
/// assert!(UrinReference::parse("http://example.com/").unwrap().is_urin());
/// assert!(!UrinReference::parse("../index.html").unwrap().is_urin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UrinReference {
    /// A reference with a scheme.
    Urin(Urin),
    /// A reference without a scheme.
    RelativeReference(RelativeReference),
}

impl UrinReference {
    /// Parses a URI reference.
    ///
    /// Text starting with a valid `scheme:` before any `/`, `?` or `#` is
    /// parsed as a URI; anything else as a relative reference.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `input` is neither a valid URI nor a valid
    /// relative reference.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if scheme::has_scheme_prefix(input) {
            Urin::parse(input).map(Self::Urin)
        } else {
            RelativeReference::parse(input)
                .map(Self::RelativeReference)
                .map_err(|e| match e.kind {
                    ParseErrorKind::NotARelativeReference => {
                        ParseError::new(input, ParseErrorKind::NotAUrinReference)
                    }
                    _ => e,
                })
        }
    }

    /// Returns true if this reference has a scheme.
    #[must_use]
    pub const fn is_urin(&self) -> bool {
        matches!(self, Self::Urin(_))
    }

    /// Returns the authority.
    ///
    /// # Errors
    ///
    /// Returns `PartAbsent` if the reference has no authority.
    pub fn authority(&self) -> Result<&Authority, PartAbsent> {
        match self {
            Self::Urin(urin) => urin.authority(),
            Self::RelativeReference(reference) => reference.authority(),
        }
    }

    /// Returns the path.
    #[must_use]
    pub const fn path(&self) -> &Path {
        match self {
            Self::Urin(urin) => urin.path(),
            Self::RelativeReference(reference) => reference.path(),
        }
    }

    /// Returns the query.
    ///
    /// # Errors
    ///
    /// Returns `PartAbsent` if the reference has no query.
    pub fn query(&self) -> Result<&Query, PartAbsent> {
        match self {
            Self::Urin(urin) => urin.query(),
            Self::RelativeReference(reference) => reference.query(),
        }
    }

    /// Returns the fragment.
    ///
    /// # Errors
    ///
    /// Returns `PartAbsent` if the reference has no fragment.
    pub fn fragment(&self) -> Result<&Fragment, PartAbsent> {
        match self {
            Self::Urin(urin) => urin.fragment(),
            Self::RelativeReference(reference) => reference.fragment(),
        }
    }

    /// Returns true if the reference has an authority.
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        match self {
            Self::Urin(urin) => urin.has_authority(),
            Self::RelativeReference(reference) => reference.has_authority(),
        }
    }

    /// Returns true if the reference has a query.
    #[must_use]
    pub const fn has_query(&self) -> bool {
        match self {
            Self::Urin(urin) => urin.has_query(),
            Self::RelativeReference(reference) => reference.has_query(),
        }
    }

    /// Returns true if the reference has a fragment.
    #[must_use]
    pub const fn has_fragment(&self) -> bool {
        match self {
            Self::Urin(urin) => urin.has_fragment(),
            Self::RelativeReference(reference) => reference.has_fragment(),
        }
    }

    /// Returns the reference as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Urin(urin) => urin.as_str(),
            Self::RelativeReference(reference) => reference.as_str(),
        }
    }
}

impl From<Urin> for UrinReference {
    fn from(urin: Urin) -> Self {
        Self::Urin(urin)
    }
}

impl From<RelativeReference> for UrinReference {
    fn from(reference: RelativeReference) -> Self {
        Self::RelativeReference(reference)
    }
}

impl fmt::Display for UrinReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrinReference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for UrinReference {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for UrinReference {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UrinReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UrinReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
