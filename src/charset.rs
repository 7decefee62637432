//! Character-class predicates from the RFC 3986 grammar.

use std::borrow::Cow;
use std::fmt;

use crate::error::{InvalidArgument, InvalidArgumentKind};

const fn range_mask(first: u8, last: u8) -> u128 {
    let mut mask = 0;
    let mut c = first;
    while c <= last {
        mask |= 1u128 << c;
        c += 1;
    }
    mask
}

const fn members_mask(members: &[u8]) -> u128 {
    let mut mask = 0;
    let mut i = 0;
    while i < members.len() {
        mask |= 1u128 << members[i];
        i += 1;
    }
    mask
}

const LOWER: u128 = range_mask(b'a', b'z');
const UPPER: u128 = range_mask(b'A', b'Z');
const DIGITS: u128 = range_mask(b'0', b'9');
const UNRESERVED_MASK: u128 = LOWER | UPPER | DIGITS | members_mask(b"-._~");
const SUB_DELIMITERS_MASK: u128 = members_mask(b"!$&'()*+,;=");
const P_CHAR_MASK: u128 = UNRESERVED_MASK | SUB_DELIMITERS_MASK | members_mask(b":@");

/// `reg-name` characters, excluding the escapes.
pub(crate) const REGISTERED_NAME: CharacterSet = CharacterSet::constant(
    UNRESERVED_MASK | SUB_DELIMITERS_MASK,
    "a-z, A-Z, 0-9, -, ., _, or ~, or !, $, &, ', (, ), *, +, ,, ;, or =",
);

/// Characters after the version in an `IPvFuture` literal.
pub(crate) const IPV_FUTURE_ADDRESS: CharacterSet = CharacterSet::constant(
    UNRESERVED_MASK | SUB_DELIMITERS_MASK | members_mask(b":"),
    "a-z, A-Z, 0-9, -, ., _, or ~, !, $, &, ', (, ), *, +, ,, ;, or =, or :",
);

/// `userinfo` characters, excluding the escapes.
pub(crate) const USER_INFO: CharacterSet = IPV_FUTURE_ADDRESS;

/// Characters after the first in a scheme name.
pub(crate) const SCHEME_TRAILING: CharacterSet =
    CharacterSet::constant(LOWER | UPPER | DIGITS | members_mask(b"+-."), "a-z, A-Z, 0-9, +, -, or .");

/// A set of characters, used to decide which characters a URI component may
/// carry without percent-encoding.
///
/// Membership of ASCII characters is tracked individually. Non-ASCII
/// characters are either all members or all non-members, which is all the
/// RFC 3986 grammar needs.
///
/// Every set carries a description used in error messages, such as
/// `"a-z, A-Z, 0-9, -, ., _, or ~"`.
///
/// # Examples
///
/// ```rust
/// use urin::CharacterSet;
///
/// let set = CharacterSet::DIGIT.or(&CharacterSet::single('.'));
/// assert!(set.contains_all("127.0.0.1"));
/// assert!(!set.contains('a'));
/// assert_eq!(set.describe(), "0-9, or .");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterSet {
    ascii: u128,
    non_ascii: bool,
    description: Cow<'static, str>,
}

impl CharacterSet {
    /// `a-z`
    pub const ALPHA_LOWERCASE: Self = Self::constant(LOWER, "a-z");

    /// `A-Z`
    pub const ALPHA_UPPERCASE: Self = Self::constant(UPPER, "A-Z");

    /// `ALPHA` from RFC 5234.
    pub const ALPHA: Self = Self::constant(LOWER | UPPER, "a-z, or A-Z");

    /// `DIGIT` from RFC 5234.
    pub const DIGIT: Self = Self::constant(DIGITS, "0-9");

    /// Upper-case hex digits.
    pub const HEX_DIGIT: Self = Self::constant(DIGITS | range_mask(b'A', b'F'), "0-9, or A-F");

    /// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
    pub const UNRESERVED: Self = Self::constant(UNRESERVED_MASK, "a-z, A-Z, 0-9, -, ., _, or ~");

    /// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
    pub const SUB_DELIMITERS: Self =
        Self::constant(SUB_DELIMITERS_MASK, "!, $, &, ', (, ), *, +, ,, ;, or =");

    /// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`, excluding the escapes.
    pub const P_CHAR: Self = Self::constant(
        P_CHAR_MASK,
        "a-z, A-Z, 0-9, -, ., _, or ~, !, $, &, ', (, ), *, +, ,, ;, or =, :, or @",
    );

    /// Characters a query or fragment may carry raw: `pchar / "/" / "?"`.
    pub const QUERY_AND_FRAGMENT: Self = Self::constant(
        P_CHAR_MASK | members_mask(b"/?"),
        "a-z, A-Z, 0-9, -, ., _, or ~, !, $, &, ', (, ), *, +, ,, ;, or =, :, or @, /, or ?",
    );

    /// Every character.
    pub const ALL: Self = Self {
        ascii: u128::MAX,
        non_ascii: true,
        description: Cow::Borrowed("any character"),
    };

    /// No character at all.
    pub const NONE: Self = Self::constant(0, "no character");

    const fn constant(ascii: u128, description: &'static str) -> Self {
        Self {
            ascii,
            non_ascii: false,
            description: Cow::Borrowed(description),
        }
    }

    /// A set containing exactly one ASCII character.
    ///
    /// # Panics
    ///
    /// Panics if `member` is not ASCII.
    #[must_use]
    pub fn single(member: char) -> Self {
        assert!(member.is_ascii(), "single-member sets hold ASCII characters only");
        Self {
            ascii: 1u128 << (member as u32),
            non_ascii: false,
            description: Cow::Owned(member.to_string()),
        }
    }

    /// Union of `self` and `other`.
    #[must_use]
    pub fn or(&self, other: &Self) -> Self {
        Self::any_of(&[self.clone(), other.clone()])
    }

    /// Union of all `sets`, described as `"a, b, or c"`.
    ///
    /// An empty slice gives [`CharacterSet::NONE`].
    #[must_use]
    pub fn any_of(sets: &[Self]) -> Self {
        let Some((head, tail)) = sets.split_first() else {
            return Self::NONE;
        };
        let mut result = head.clone();
        let mut description = head.description.to_string();
        for (index, set) in tail.iter().enumerate() {
            result.ascii |= set.ascii;
            result.non_ascii |= set.non_ascii;
            description.push_str(", ");
            if index + 1 == tail.len() {
                description.push_str("or ");
            }
            description.push_str(&set.description);
        }
        result.description = Cow::Owned(description);
        result
    }

    /// This set with one ASCII character removed.
    ///
    /// # Panics
    ///
    /// Panics if `excluded` is not ASCII.
    #[must_use]
    pub fn excluding(&self, excluded: char) -> Self {
        assert!(excluded.is_ascii(), "only ASCII characters can be excluded");
        Self {
            ascii: self.ascii & !(1u128 << (excluded as u32)),
            non_ascii: self.non_ascii,
            description: Cow::Owned(format!("not {excluded} and {}", self.description)),
        }
    }

    /// Returns true if `c` is a member.
    #[must_use]
    pub const fn contains(&self, c: char) -> bool {
        if c.is_ascii() {
            self.ascii & (1u128 << (c as u32)) != 0
        } else {
            self.non_ascii
        }
    }

    /// Returns true if every character of `value` is a member.
    #[must_use]
    pub fn contains_all(&self, value: &str) -> bool {
        value.chars().all(|c| self.contains(c))
    }

    /// Human-readable description of the members.
    #[must_use]
    pub fn describe(&self) -> &str {
        &self.description
    }

    /// Checks that every character of `value` is a member.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the first non-member, as in
    /// `Character 3 must be 0-9 in port [80a]`.
    pub fn verify(&self, value: &str, field: &'static str) -> Result<(), InvalidArgument> {
        match value.chars().position(|c| !self.contains(c)) {
            None => Ok(()),
            Some(index) => Err(InvalidArgument::new(
                field,
                value,
                InvalidArgumentKind::IllegalCharacter {
                    position: index + 1,
                    allowed: self.description.to_string(),
                },
            )),
        }
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
