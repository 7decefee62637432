//! The host component of an authority.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::charset::{self, CharacterSet};
use crate::error::{InvalidArgument, InvalidArgumentKind, ParseError, ParseErrorKind};
use crate::hexadectet::Hexadectet;
use crate::octet::Octet;
use crate::percent::PercentEncoder;

/// A host: a registered name or an IP literal.
///
/// Hosts are compared structurally, and every host renders in the canonical
/// form RFC 3986 prescribes:
///
/// | Variant | Rendered as |
/// |---------|-------------|
/// | `RegisteredName` | lower case, percent-encoded over `unreserved / sub-delims` |
/// | `Ipv4` | `192.0.2.1` |
/// | `Ipv6` | `[2001:db8::1]`, lower-case hex, first longest zero run elided |
/// | `Ipv6WithTrailingIpv4` | `[::ffff:192.0.2.1]` |
/// | `IpvFuture` | `[v7.address]` |
///
/// A registered name that reads as a dotted-decimal IPv4 address is the
/// IPv4 host:
///
/// ```rust
/// use urin::Host;
///
/// assert_eq!(Host::registered_name("127.0.0.1"), Host::ipv4(127, 0, 0, 1));
/// assert_eq!(Host::registered_name("Example.COM").to_string(), "example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    /// A registered name, decoded and lower-cased. Built by [`Host::registered_name`].
    #[non_exhaustive]
    RegisteredName(String),
    /// An IPv4 address.
    Ipv4([Octet; 4]),
    /// An IPv6 address.
    Ipv6([Hexadectet; 8]),
    /// An IPv6 address whose last 32 bits are written as IPv4.
    Ipv6WithTrailingIpv4([Hexadectet; 6], [Octet; 4]),
    /// An `IPvFuture` literal. Built by [`Host::ipv_future`].
    #[non_exhaustive]
    IpvFuture {
        /// Version, upper-case hex
        version: String,
        /// Address, lower-cased
        address: String,
    },
}

impl Host {
    /// A registered name.
    ///
    /// The name is case-folded to lower case. A name that is a dotted-decimal
    /// IPv4 address gives the `Ipv4` variant.
    #[must_use]
    pub fn registered_name(name: &str) -> Self {
        match parse_ipv4(name) {
            Some(octets) => Self::Ipv4(octets),
            None => Self::RegisteredName(name.to_lowercase()),
        }
    }

    /// An IPv4 address.
    #[must_use]
    pub const fn ipv4(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self::Ipv4([Octet::new(a), Octet::new(b), Octet::new(c), Octet::new(d)])
    }

    /// An IPv6 address from its eight groups.
    #[must_use]
    #[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
    pub const fn ipv6(a: u16, b: u16, c: u16, d: u16, e: u16, f: u16, g: u16, h: u16) -> Self {
        Self::Ipv6([
            Hexadectet::new(a),
            Hexadectet::new(b),
            Hexadectet::new(c),
            Hexadectet::new(d),
            Hexadectet::new(e),
            Hexadectet::new(f),
            Hexadectet::new(g),
            Hexadectet::new(h),
        ])
    }

    /// An IPv6 address written with six groups and a trailing IPv4 address.
    #[must_use]
    pub const fn ipv6_with_trailing_ipv4(groups: [Hexadectet; 6], ipv4: [Octet; 4]) -> Self {
        Self::Ipv6WithTrailingIpv4(groups, ipv4)
    }

    /// An `IPvFuture` literal, `"[v" version "." address "]"`.
    ///
    /// The version is stored upper case and the address lower case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `version` is empty or not hex, or if
    /// `address` is empty or holds characters other than
    /// `unreserved / sub-delims / ":"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urin::Host;
    ///
    /// let host = Host::ipv_future("7", "Some:Address").unwrap();
    /// assert_eq!(host.to_string(), "[v7.some:address]");
    /// assert!(Host::ipv_future("", "address").is_err());
    /// ```
    pub fn ipv_future(version: &str, address: &str) -> Result<Self, InvalidArgument> {
        if version.is_empty() {
            return Err(InvalidArgument::new("version", version, InvalidArgumentKind::Empty));
        }
        let version = version.to_ascii_uppercase();
        CharacterSet::HEX_DIGIT.verify(&version, "version")?;
        if address.is_empty() {
            return Err(InvalidArgument::new("address", address, InvalidArgumentKind::Empty));
        }
        charset::IPV_FUTURE_ADDRESS.verify(address, "address")?;
        Ok(Self::IpvFuture {
            version,
            address: address.to_lowercase(),
        })
    }

    /// `localhost`
    #[must_use]
    pub fn local_host() -> Self {
        Self::RegisteredName("localhost".to_string())
    }

    /// `127.0.0.1`
    #[must_use]
    pub const fn loopback_ipv4() -> Self {
        Self::ipv4(127, 0, 0, 1)
    }

    /// `[::1]`
    #[must_use]
    pub const fn loopback_ipv6() -> Self {
        Self::ipv6(0, 0, 0, 0, 0, 0, 0, 1)
    }

    /// `[::]`
    #[must_use]
    pub const fn unspecified_ipv6() -> Self {
        Self::ipv6(0, 0, 0, 0, 0, 0, 0, 0)
    }

    /// Parses a host as it appears in an authority.
    ///
    /// Bracketed text must be an `IPvFuture` or IPv6 literal. Anything else
    /// is read as a dotted-decimal IPv4 address if it is one, and otherwise
    /// as a percent-encoded registered name.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` with kind `InvalidHost` if `input` is not a host.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urin::Host;
    ///
    /// let host = Host::parse("[2001:DB8:0:0:0:0:0:1]").unwrap();
    /// assert_eq!(host.to_string(), "[2001:db8::1]");
    /// assert!(Host::parse("[::1::2]").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_host(input).ok_or_else(|| {
            ParseError::new(
                input,
                ParseErrorKind::InvalidHost {
                    host: input.to_string(),
                },
            )
        })
    }

    pub(crate) fn parse_host(input: &str) -> Option<Self> {
        if let Some(literal) = input.strip_prefix('[') {
            let literal = literal.strip_suffix(']')?;
            return match literal.strip_prefix(['v', 'V']) {
                Some(future) => parse_ipv_future(future),
                None => parse_ipv6(literal),
            };
        }
        let name = PercentEncoder::new(charset::REGISTERED_NAME).decode(input).ok()?;
        Some(Self::registered_name(&name))
    }

    /// Returns the registered name, if this is one.
    #[must_use]
    pub fn as_registered_name(&self) -> Option<&str> {
        match self {
            Self::RegisteredName(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for IPv4, IPv6 and `IPvFuture` literals.
    #[must_use]
    pub const fn is_ip_literal(&self) -> bool {
        !matches!(self, Self::RegisteredName(..))
    }

    /// Converts to a standard library address, for IPv4 and IPv6 hosts.
    #[must_use]
    pub fn to_ip_addr(&self) -> Option<IpAddr> {
        match self {
            Self::Ipv4(octets) => Some(IpAddr::V4(Ipv4Addr::from(octets.map(Octet::value)))),
            Self::Ipv6(groups) => Some(IpAddr::V6(Ipv6Addr::from(groups.map(Hexadectet::value)))),
            Self::Ipv6WithTrailingIpv4(groups, octets) => {
                let [a, b, c, d] = octets.map(Octet::value);
                let [e, f, g, h, i, j] = groups.map(Hexadectet::value);
                let seventh = u16::from_be_bytes([a, b]);
                let eighth = u16::from_be_bytes([c, d]);
                Some(IpAddr::V6(Ipv6Addr::new(e, f, g, h, i, j, seventh, eighth)))
            }
            Self::RegisteredName(..) | Self::IpvFuture { .. } => None,
        }
    }
}

fn parse_ipv4(text: &str) -> Option<[Octet; 4]> {
    let mut octets = [Octet::new(0); 4];
    let mut parts = text.split('.');
    for octet in &mut octets {
        *octet = Octet::parse_dec_octet(parts.next()?)?;
    }
    match parts.next() {
        None => Some(octets),
        Some(_) => None,
    }
}

fn parse_ipv_future(text: &str) -> Option<Host> {
    let (version, address) = text.split_once('.')?;
    Host::ipv_future(version, address).ok()
}

fn parse_ipv6(text: &str) -> Option<Host> {
    if !text.contains('.') {
        return parse_groups(text).map(Host::Ipv6);
    }
    let split = text.rfind(':')?;
    let ipv4 = parse_ipv4(&text[split + 1..])?;
    let groups = parse_groups(&format!("{}0:0", &text[..=split]))?;
    let mut six = [Hexadectet::ZERO; 6];
    six.copy_from_slice(&groups[..6]);
    Some(Host::Ipv6WithTrailingIpv4(six, ipv4))
}

fn parse_group_list(text: &str) -> Option<Vec<Hexadectet>> {
    if text.is_empty() {
        return Some(Vec::new());
    }
    text.split(':').map(Hexadectet::parse_h16).collect()
}

fn parse_groups(text: &str) -> Option<[Hexadectet; 8]> {
    let mut groups = [Hexadectet::ZERO; 8];
    match text.split_once("::") {
        None => {
            let all = parse_group_list(text)?;
            if all.len() != 8 {
                return None;
            }
            groups.copy_from_slice(&all);
        }
        Some((left, right)) => {
            if right.contains("::") {
                return None;
            }
            let left = parse_group_list(left)?;
            let right = parse_group_list(right)?;
            if left.len() + right.len() > 7 {
                return None;
            }
            groups[..left.len()].copy_from_slice(&left);
            groups[8 - right.len()..].copy_from_slice(&right);
        }
    }
    Some(groups)
}

/// Writes `groups` colon-separated, eliding the first longest run of two or
/// more zero groups. Returns true if the output ends with `::`.
fn write_elided(f: &mut fmt::Formatter<'_>, groups: &[Hexadectet]) -> Result<bool, fmt::Error> {
    let (mut run_start, mut run_length) = (0, 0);
    let mut i = 0;
    while i < groups.len() {
        if groups[i].is_zero() {
            let start = i;
            while i < groups.len() && groups[i].is_zero() {
                i += 1;
            }
            if i - start > run_length {
                run_start = start;
                run_length = i - start;
            }
        } else {
            i += 1;
        }
    }
    if run_length < 2 {
        write_joined(f, groups)?;
        return Ok(false);
    }
    write_joined(f, &groups[..run_start])?;
    f.write_str("::")?;
    write_joined(f, &groups[run_start + run_length..])?;
    Ok(run_start + run_length == groups.len())
}

fn write_joined(f: &mut fmt::Formatter<'_>, groups: &[Hexadectet]) -> fmt::Result {
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            f.write_str(":")?;
        }
        write!(f, "{group}")?;
    }
    Ok(())
}

fn write_ipv4(f: &mut fmt::Formatter<'_>, [a, b, c, d]: &[Octet; 4]) -> fmt::Result {
    write!(f, "{a}.{b}.{c}.{d}")
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegisteredName(name) => {
                f.write_str(&PercentEncoder::new(charset::REGISTERED_NAME).encode(name))
            }
            Self::Ipv4(octets) => write_ipv4(f, octets),
            Self::Ipv6(groups) => {
                f.write_str("[")?;
                write_elided(f, groups)?;
                f.write_str("]")
            }
            Self::Ipv6WithTrailingIpv4(groups, octets) => {
                f.write_str("[")?;
                if !write_elided(f, groups)? {
                    f.write_str(":")?;
                }
                write_ipv4(f, octets)?;
                f.write_str("]")
            }
            Self::IpvFuture { version, address } => write!(f, "[v{version}.{address}]"),
        }
    }
}

impl FromStr for Host {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Host {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Ipv4Addr> for Host {
    fn from(address: Ipv4Addr) -> Self {
        Self::Ipv4(address.octets().map(Octet::new))
    }
}

impl From<Ipv6Addr> for Host {
    fn from(address: Ipv6Addr) -> Self {
        Self::Ipv6(address.segments().map(Hexadectet::new))
    }
}

impl From<IpAddr> for Host {
    fn from(address: IpAddr) -> Self {
        match address {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Host {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Host {
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

    fn h(values: [u16; 8]) -> Host {
        let [a, b, c, d, e, f, g, i] = values;
        Host::ipv6(a, b, c, d, e, f, g, i)
    }

    #[test]
    fn elide_first_of_two_equal_runs() {
        assert_eq!(h([1, 0, 0, 2, 0, 0, 3, 4]).to_string(), "[1::2:0:0:3:4]");
    }

    #[test]
    fn elide_strictly_longest_run() {
        assert_eq!(h([1, 0, 0, 2, 0, 0, 0, 3]).to_string(), "[1:0:0:2::3]");
    }

    #[test]
    fn single_zero_group_not_elided() {
        assert_eq!(h([1, 0, 2, 3, 4, 5, 6, 7]).to_string(), "[1:0:2:3:4:5:6:7]");
    }

    #[test]
    fn elide_leading_trailing_and_all() {
        assert_eq!(Host::loopback_ipv6().to_string(), "[::1]");
        assert_eq!(h([1, 0, 0, 0, 0, 0, 0, 0]).to_string(), "[1::]");
        assert_eq!(Host::unspecified_ipv6().to_string(), "[::]");
    }

    #[test]
    fn groups_lower_case_without_leading_zeros() {
        assert_eq!(h([0xABCD, 0x0DB8, 1, 2, 3, 4, 5, 6]).to_string(), "[abcd:db8:1:2:3:4:5:6]");
    }

    #[test]
    fn trailing_ipv4_rendering() {
        let mapped = Host::ipv6_with_trailing_ipv4(
            [0, 0, 0, 0, 0, 0xFFFF].map(Hexadectet::new),
            [192, 0, 2, 1].map(Octet::new),
        );
        assert_eq!(mapped.to_string(), "[::ffff:192.0.2.1]");
        let compatible = Host::ipv6_with_trailing_ipv4([Hexadectet::ZERO; 6], [1, 2, 3, 4].map(Octet::new));
        assert_eq!(compatible.to_string(), "[::1.2.3.4]");
        let full = Host::ipv6_with_trailing_ipv4([1, 2, 3, 4, 5, 6].map(Hexadectet::new), [1, 2, 3, 4].map(Octet::new));
        assert_eq!(full.to_string(), "[1:2:3:4:5:6:1.2.3.4]");
    }

    #[test]
    fn parse_ipv6_forms() {
        assert_eq!(Host::parse("[::1]").unwrap(), Host::loopback_ipv6());
        assert_eq!(Host::parse("[::]").unwrap(), Host::unspecified_ipv6());
        assert_eq!(Host::parse("[1:2:3:4:5:6:7:8]").unwrap(), h([1, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(Host::parse("[1::8]").unwrap(), h([1, 0, 0, 0, 0, 0, 0, 8]));
        assert_eq!(Host::parse("[1:2:3:4:5:6:7::]").unwrap(), h([1, 2, 3, 4, 5, 6, 7, 0]));
    }

    #[test]
    fn parse_ipv6_with_trailing_ipv4() {
        let host = Host::parse("[::FFFF:192.0.2.1]").unwrap();
        assert!(matches!(host, Host::Ipv6WithTrailingIpv4(..)));
        assert_eq!(host.to_string(), "[::ffff:192.0.2.1]");
        assert!(Host::parse("[1:2:3:4:5:6:1.2.3.4]").is_ok());
    }

    #[test]
    fn parse_ipv6_rejects_malformed() {
        for bad in [
            "[::1::2]", "[1:2:3:4:5:6:7]", "[1:2:3:4:5:6:7:8:9]", "[12345::]", "[::1", "[:1]",
            "[1:2:3:4:5:6:7::8]", "[]", "[1.2.3.4]", "[::1.2.3]", "[::01.2.3.4]",
        ] {
            let result = Host::parse(bad);
            assert!(
                matches!(result, Err(ParseError { kind: ParseErrorKind::InvalidHost { .. }, .. })),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn parse_ipv4_is_strict() {
        assert_eq!(Host::parse("192.168.0.1").unwrap(), Host::ipv4(192, 168, 0, 1));
        assert!(matches!(Host::parse("192.168.0.01").unwrap(), Host::RegisteredName(..)));
        assert!(matches!(Host::parse("256.1.1.1").unwrap(), Host::RegisteredName(..)));
        assert!(matches!(Host::parse("1.2.3").unwrap(), Host::RegisteredName(..)));
    }

    #[test]
    fn parse_registered_name_decodes_and_folds_case() {
        let host = Host::parse("EXAMPLE%2eCom").unwrap();
        assert_eq!(host.as_registered_name(), Some("example.com"));
        let host = Host::parse("caf%C3%A9").unwrap();
        assert_eq!(host.to_string(), "caf%C3%A9");
    }

    #[test]
    fn encoded_ipv4_is_ipv4() {
        assert_eq!(Host::parse("%31%32%37.0.0.1").unwrap(), Host::loopback_ipv4());
    }

    #[test]
    fn parse_empty_registered_name() {
        assert_eq!(Host::parse("").unwrap().as_registered_name(), Some(""));
    }

    #[test]
    fn parse_rejects_bad_registered_name() {
        let err = Host::parse("a b").unwrap_err();
        assert_eq!(err.to_string(), "Not a valid host :a b");
        assert!(Host::parse("a%zz").is_err());
    }

    #[test]
    fn ipv_future_round_trip() {
        let host = Host::parse("[vAb.Hello:World]").unwrap();
        assert_eq!(host, Host::ipv_future("ab", "hello:world").unwrap());
        assert_eq!(host.to_string(), "[vAB.hello:world]");
        assert_eq!(Host::parse(&host.to_string()).unwrap(), host);
    }

    #[test]
    fn ipv_future_validation_messages() {
        let err = Host::ipv_future("", "a").unwrap_err();
        assert_eq!(err.to_string(), "version must contain at least one character");
        let err = Host::ipv_future("1G", "a").unwrap_err();
        assert_eq!(err.to_string(), "Character 2 must be 0-9, or A-F in version [1G]");
        let err = Host::ipv_future("1", "").unwrap_err();
        assert!(matches!(err.kind, InvalidArgumentKind::Empty));
        let err = Host::ipv_future("1", "a/b").unwrap_err();
        assert!(matches!(
            err.kind,
            InvalidArgumentKind::IllegalCharacter { position: 2, .. }
        ));
    }

    #[test]
    fn ipv_future_parse_failures() {
        assert!(Host::parse("[v.a]").is_err());
        assert!(Host::parse("[v1.]").is_err());
        assert!(Host::parse("[v1]").is_err());
        assert!(Host::parse("[vg.a]").is_err());
    }

    #[test]
    fn registered_name_round_trips_reserved_characters() {
        let host = Host::registered_name("a b[c]");
        assert_eq!(host.to_string(), "a%20b%5Bc%5D");
        assert_eq!(Host::parse(&host.to_string()).unwrap(), host);
    }

    #[test]
    fn std_net_conversions() {
        let host = Host::from(Ipv6Addr::LOCALHOST);
        assert_eq!(host, Host::loopback_ipv6());
        assert_eq!(host.to_ip_addr(), Some(IpAddr::V6(Ipv6Addr::LOCALHOST)));
        assert_eq!(Host::from(Ipv4Addr::new(10, 0, 0, 1)), Host::ipv4(10, 0, 0, 1));
        let mapped = Host::parse("[::ffff:192.0.2.1]").unwrap();
        assert_eq!(
            mapped.to_ip_addr(),
            Some(IpAddr::V6(Ipv4Addr::new(192, 0, 2, 1).to_ipv6_mapped()))
        );
        assert_eq!(Host::local_host().to_ip_addr(), None);
    }
}
