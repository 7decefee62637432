//! Authority component: `[ userinfo "@" ] host [ ":" port ]`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind};
use crate::host::Host;
use crate::port::Port;
use crate::user_info::UserInfo;

/// The authority of a URI: a host, optionally preceded by user information
/// and followed by a port.
///
/// # Examples
///
/// ```
/// use urin::{Authority, Host, Port, UserInfo};
///
/// let authority = Authority::new(Host::ipv4(192, 168, 0, 1))
///     .with_user_info(UserInfo::new("admin"))
///     .with_port(Port::new(8080));
/// assert_eq!(authority.to_string(), "admin@192.168.0.1:8080");
/// assert_eq!(Authority::parse("admin@192.168.0.1:8080").unwrap(), authority);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority {
    user_info: Option<UserInfo>,
    host: Host,
    port: Option<Port>,
}

impl Authority {
    /// An authority with just a host.
    #[must_use]
    pub const fn new(host: Host) -> Self {
        Self {
            user_info: None,
            host,
            port: None,
        }
    }

    /// This authority with `user_info` in front of the host.
    #[must_use]
    pub fn with_user_info(self, user_info: UserInfo) -> Self {
        Self {
            user_info: Some(user_info),
            ..self
        }
    }

    /// This authority with `port` after the host.
    #[must_use]
    pub fn with_port(self, port: Port) -> Self {
        Self {
            port: Some(port),
            ..self
        }
    }

    /// This authority without its port, if the port equals `port`.
    #[must_use]
    pub fn without_port_if(&self, port: &Port) -> Self {
        if self.port.as_ref() == Some(port) {
            Self {
                port: None,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }

    /// Parses an authority.
    ///
    /// User information runs to the last `@`. A host starting with `[` runs
    /// to the matching `]`; any other host runs to the first `:`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the user information, host or port is invalid.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| ParseError::new(input, kind))
    }

    pub(crate) fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        let (user_info, host_and_port) = match input.rfind('@') {
            Some(at) => {
                let user_info = UserInfo::parse(&input[..at]).map_err(|e| e.kind)?;
                (Some(user_info), &input[at + 1..])
            }
            None => (None, input),
        };

        let (host_text, port_text) = split_host_and_port(host_and_port)?;
        let host = Host::parse_host(host_text).ok_or_else(|| ParseErrorKind::InvalidHost {
            host: host_text.to_string(),
        })?;
        let port = port_text
            .map(Port::from_digits)
            .transpose()
            .map_err(ParseErrorKind::InvalidPort)?;

        Ok(Self { user_info, host, port })
    }

    /// The user information, if present.
    #[must_use]
    pub const fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// The port, if present.
    #[must_use]
    pub const fn port(&self) -> Option<&Port> {
        self.port.as_ref()
    }

    /// Returns true if the authority has user information.
    #[must_use]
    pub const fn has_user_info(&self) -> bool {
        self.user_info.is_some()
    }

    /// Returns true if the authority has a port.
    #[must_use]
    pub const fn has_port(&self) -> bool {
        self.port.is_some()
    }
}

fn split_host_and_port(input: &str) -> Result<(&str, Option<&str>), ParseErrorKind> {
    if input.starts_with('[') {
        let Some(close) = input.find(']') else {
            return Err(ParseErrorKind::InvalidHost {
                host: input.to_string(),
            });
        };
        let (host, rest) = input.split_at(close + 1);
        if rest.is_empty() {
            Ok((host, None))
        } else if let Some(port) = rest.strip_prefix(':') {
            Ok((host, Some(port)))
        } else {
            Err(ParseErrorKind::InvalidHost {
                host: input.to_string(),
            })
        }
    } else {
        match input.split_once(':') {
            Some((host, port)) => Ok((host, Some(port))),
            None => Ok((input, None)),
        }
    }
}

impl From<Host> for Authority {
    fn from(host: Host) -> Self {
        Self::new(host)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user_info) = &self.user_info {
            write!(f, "{user_info}@")?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = &self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

impl FromStr for Authority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Authority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Authority {
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

    #[test]
    fn parse_host_only() {
        let authority = Authority::parse("Example.COM").unwrap();
        assert_eq!(authority.host(), &Host::registered_name("example.com"));
        assert!(!authority.has_user_info());
        assert!(!authority.has_port());
    }

    #[test]
    fn user_info_splits_at_last_at() {
        let err = Authority::parse("a%40b@c@host").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidEncoding { .. }));

        let authority = Authority::parse("user:pw@host:21").unwrap();
        assert_eq!(authority.user_info().map(UserInfo::value), Some("user:pw"));
        assert_eq!(authority.port(), Some(&Port::new(21)));
    }

    #[test]
    fn ipv6_host_with_port() {
        let authority = Authority::parse("[::1]:8080").unwrap();
        assert_eq!(authority.host(), &Host::loopback_ipv6());
        assert_eq!(authority.port().and_then(Port::as_u16), Some(8080));
        assert_eq!(authority.to_string(), "[::1]:8080");
    }

    #[test]
    fn ipv6_host_without_port() {
        let authority = Authority::parse("[2001:db8::7]").unwrap();
        assert!(!authority.has_port());
    }

    #[test]
    fn unterminated_ip_literal_fails() {
        let err = Authority::parse("[::1").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::InvalidHost {
                host: "[::1".to_string()
            }
        );
    }

    #[test]
    fn junk_after_ip_literal_fails() {
        assert!(Authority::parse("[::1]x").is_err());
    }

    #[test]
    fn empty_port_is_kept() {
        let authority = Authority::parse("host:").unwrap();
        assert!(authority.port().is_some_and(Port::is_empty));
        assert_eq!(authority.to_string(), "host:");
    }

    #[test]
    fn bad_port_fails() {
        assert!(matches!(
            Authority::parse("host:8o").unwrap_err().kind,
            ParseErrorKind::InvalidPort(_)
        ));
        assert!(Authority::parse("host:80:80").is_err());
    }

    #[test]
    fn empty_host_is_registered_name() {
        let authority = Authority::parse("").unwrap();
        assert_eq!(authority.host().as_registered_name(), Some(""));
    }

    #[test]
    fn without_port_if_matches_value() {
        let authority = Authority::parse("host:443").unwrap();
        assert!(!authority.without_port_if(&Port::new(443)).has_port());
        assert!(authority.without_port_if(&Port::new(80)).has_port());
    }
}
