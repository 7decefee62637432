//! User information subcomponent of an authority.

use std::fmt;
use std::str::FromStr;

use crate::charset;
use crate::error::{ParseError, ParseErrorKind};
use crate::percent::PercentEncoder;

const USER_INFO_ENCODER: PercentEncoder = PercentEncoder::new(charset::USER_INFO);

/// The user information before `@` in an authority.
///
/// Holds the decoded text. Anything outside unreserved, sub-delims and `:`
/// is percent-encoded when written.
///
/// # Examples
///
/// ```rust
/// use urin::UserInfo;
///
/// let user_info = UserInfo::new("joe@home:secret");
/// assert_eq!(user_info.to_string(), "joe%40home:secret");
/// assert_eq!(UserInfo::parse("joe%40home:secret").unwrap(), user_info);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserInfo(String);

impl UserInfo {
    /// User information holding `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parses encoded user information.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `input` contains `@`, `/` or another character
    /// user information may not carry raw, or a malformed escape.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        USER_INFO_ENCODER.decode(input).map(Self).map_err(|error| {
            ParseError::new(
                input,
                ParseErrorKind::InvalidEncoding {
                    component: "user info",
                    error,
                },
            )
        })
    }

    /// The decoded value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&USER_INFO_ENCODER.encode(&self.0))
    }
}

impl FromStr for UserInfo {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UserInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UserInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
