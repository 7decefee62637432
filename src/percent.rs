//! Percent-encoding and decoding over a [`CharacterSet`].

use crate::charset::CharacterSet;
use crate::error::DecodingError;

const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Encodes and decodes text against a set of characters permitted raw.
///
/// Characters outside the set are written as the `%XX` escapes of their
/// UTF-8 bytes, using upper-case hex digits. `%` is always escaped, whatever
/// the set says, so decoding an encoder's output gives back the input.
///
/// # Examples
///
/// ```rust
/// use urin::{CharacterSet, PercentEncoder};
///
/// let encoder = PercentEncoder::new(CharacterSet::UNRESERVED);
/// assert_eq!(encoder.encode("a b/ü"), "a%20b%2F%C3%BC");
/// assert_eq!(encoder.decode("a%20b%2f%C3%BC").unwrap(), "a b/ü");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PercentEncoder {
    allowed: CharacterSet,
}

impl PercentEncoder {
    /// Leaves every character except `%` unescaped.
    pub const ENCODE_NOTHING: Self = Self::new(CharacterSet::ALL);

    /// Escapes every character.
    pub const ENCODE_EVERYTHING: Self = Self::new(CharacterSet::NONE);

    /// Creates an encoder that leaves members of `allowed` unescaped.
    #[must_use]
    pub const fn new(allowed: CharacterSet) -> Self {
        Self { allowed }
    }

    /// The characters this encoder leaves unescaped.
    #[must_use]
    pub const fn allowed(&self) -> &CharacterSet {
        &self.allowed
    }

    /// An encoder that also escapes `c`.
    #[must_use]
    pub fn additionally_encoding(&self, c: char) -> Self {
        Self::new(self.allowed.excluding(c))
    }

    /// Percent-encodes `raw`. Never fails.
    #[must_use]
    pub fn encode(&self, raw: &str) -> String {
        let mut encoded = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c != '%' && self.allowed.contains(c) {
                encoded.push(c);
            } else {
                let mut buffer = [0u8; 4];
                for &byte in c.encode_utf8(&mut buffer).as_bytes() {
                    push_escape(&mut encoded, byte);
                }
            }
        }
        encoded
    }

    /// Decodes percent-encoded text.
    ///
    /// Escapes may use either case of hex digit.
    ///
    /// # Errors
    ///
    /// Returns `DecodingError` if a `%` is not followed by two hex digits,
    /// if escaped octets are not UTF-8, or if a raw character is outside
    /// this encoder's set.
    pub fn decode(&self, encoded: &str) -> Result<String, DecodingError> {
        scan(encoded, Some(&self.allowed))
    }

    /// Returns true if [`decode`](Self::decode) would accept `encoded`.
    #[must_use]
    pub fn is_encoded(&self, encoded: &str) -> bool {
        self.decode(encoded).is_ok()
    }

    /// Validates `encoded` and rewrites its escapes with upper-case hex digits.
    pub(crate) fn canonicalise(&self, encoded: &str) -> Result<String, DecodingError> {
        self.decode(encoded)?;
        let mut result = String::with_capacity(encoded.len());
        let mut escape_digits = 0;
        for c in encoded.chars() {
            if escape_digits > 0 {
                result.push(c.to_ascii_uppercase());
                escape_digits -= 1;
            } else {
                if c == '%' {
                    escape_digits = 2;
                }
                result.push(c);
            }
        }
        Ok(result)
    }

    /// As [`canonicalise`](Self::canonicalise), and also writes escaped
    /// unreserved characters raw (RFC 3986 §6.2.2.2).
    pub(crate) fn normalise(&self, encoded: &str) -> Result<String, DecodingError> {
        let canonical = self.canonicalise(encoded)?;
        let mut result = String::with_capacity(canonical.len());
        let mut rest = canonical.as_str();
        while let Some(index) = rest.find('%') {
            result.push_str(&rest[..index]);
            let escape = &rest[index..index + 3];
            match u8::from_str_radix(&escape[1..], 16) {
                Ok(byte) if CharacterSet::UNRESERVED.contains(char::from(byte)) => result.push(char::from(byte)),
                _ => result.push_str(escape),
            }
            rest = &rest[index + 3..];
        }
        result.push_str(rest);
        Ok(result)
    }
}

/// Decodes text that was validated when it was stored.
///
/// Malformed input is decoded on a best-effort basis rather than rejected.
pub(crate) fn decode_validated(encoded: &str) -> String {
    scan(encoded, None).unwrap_or_else(|_| String::from_utf8_lossy(&lossy_bytes(encoded)).into_owned())
}

fn lossy_bytes(encoded: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let raw = encoded.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        let escaped = if raw[i] == b'%' {
            encoded
                .get(i + 1..i + 3)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        } else {
            None
        };
        match escaped {
            Some(byte) => {
                bytes.push(byte);
                i += 3;
            }
            None => {
                bytes.push(raw[i]);
                i += 1;
            }
        }
    }
    bytes
}

fn push_escape(out: &mut String, byte: u8) {
    out.push('%');
    out.push(char::from(UPPER_HEX[usize::from(byte >> 4)]));
    out.push(char::from(UPPER_HEX[usize::from(byte & 0x0F)]));
}

fn scan(encoded: &str, allowed: Option<&CharacterSet>) -> Result<String, DecodingError> {
    let mut decoded = String::with_capacity(encoded.len());
    let mut run: Vec<u8> = Vec::new();
    let mut run_start = 0;
    let mut position = 0;
    let mut chars = encoded.char_indices();
    while let Some((offset, c)) = chars.next() {
        position += 1;
        if c == '%' {
            let byte = encoded
                .get(offset + 1..offset + 3)
                .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or(DecodingError::MalformedEscape { position })?;
            chars.next();
            chars.next();
            if run.is_empty() {
                run_start = position;
            }
            run.push(byte);
            position += 2;
        } else {
            flush(&mut run, &mut decoded, run_start)?;
            if let Some(allowed) = allowed {
                if !allowed.contains(c) {
                    return Err(DecodingError::IllegalCharacter {
                        character: c,
                        position,
                        allowed: allowed.describe().to_string(),
                    });
                }
            }
            decoded.push(c);
        }
    }
    flush(&mut run, &mut decoded, run_start)?;
    Ok(decoded)
}

fn flush(run: &mut Vec<u8>, decoded: &mut String, run_start: usize) -> Result<(), DecodingError> {
    if !run.is_empty() {
        let text = String::from_utf8(std::mem::take(run))
            .map_err(|_| DecodingError::InvalidUtf8 { position: run_start })?;
        decoded.push_str(&text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreserved() -> PercentEncoder {
        PercentEncoder::new(CharacterSet::UNRESERVED)
    }

    #[test]
    fn encode_leaves_members_raw() {
        assert_eq!(unreserved().encode("abc-._~"), "abc-._~");
    }

    #[test]
    fn encode_escapes_utf8_bytes_upper_case() {
        assert_eq!(unreserved().encode("é"), "%C3%A9");
        assert_eq!(unreserved().encode(" "), "%20");
        assert_eq!(unreserved().encode("\u{1F600}"), "%F0%9F%98%80");
    }

    #[test]
    fn encode_everything() {
        assert_eq!(PercentEncoder::ENCODE_EVERYTHING.encode(".."), "%2E%2E");
    }

    #[test]
    fn encode_nothing_still_escapes_percent() {
        assert_eq!(PercentEncoder::ENCODE_NOTHING.encode("100% é"), "100%25 é");
        assert_eq!(
            PercentEncoder::ENCODE_NOTHING.decode("100%25 é").unwrap(),
            "100% é"
        );
    }

    #[test]
    fn decode_accepts_lower_case_hex() {
        assert_eq!(unreserved().decode("%c3%a9").unwrap(), "é");
    }

    #[test]
    fn decode_truncated_escape_fails() {
        assert_eq!(
            unreserved().decode("ab%4"),
            Err(DecodingError::MalformedEscape { position: 3 })
        );
        assert!(matches!(
            unreserved().decode("%"),
            Err(DecodingError::MalformedEscape { position: 1 })
        ));
    }

    #[test]
    fn decode_non_hex_escape_fails() {
        assert!(matches!(
            unreserved().decode("%GG"),
            Err(DecodingError::MalformedEscape { .. })
        ));
        assert!(matches!(
            unreserved().decode("%+1"),
            Err(DecodingError::MalformedEscape { .. })
        ));
    }

    #[test]
    fn decode_escape_followed_by_multibyte_char_fails() {
        assert!(matches!(
            PercentEncoder::ENCODE_NOTHING.decode("%é"),
            Err(DecodingError::MalformedEscape { .. })
        ));
    }

    #[test]
    fn decode_invalid_utf8_fails() {
        assert_eq!(
            unreserved().decode("a%C3"),
            Err(DecodingError::InvalidUtf8 { position: 2 })
        );
        assert!(matches!(
            unreserved().decode("%FF%FF"),
            Err(DecodingError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn decode_rejects_raw_non_member() {
        let result = unreserved().decode("a b");
        assert!(matches!(
            result,
            Err(DecodingError::IllegalCharacter {
                character: ' ',
                position: 2,
                ..
            })
        ));
    }

    #[test]
    fn additionally_encoding_escapes_extra_character() {
        let encoder = PercentEncoder::new(CharacterSet::SUB_DELIMITERS).additionally_encoding('&');
        assert_eq!(encoder.encode("a=b&c"), "%61=%62%26%63");
        assert!(!encoder.is_encoded("&"));
    }

    #[test]
    fn canonicalise_upper_cases_escapes_only() {
        let encoder = PercentEncoder::new(CharacterSet::QUERY_AND_FRAGMENT);
        assert_eq!(encoder.canonicalise("ab%2fcd%c3%a9").unwrap(), "ab%2Fcd%C3%A9");
        assert!(encoder.canonicalise("a b").is_err());
    }

    #[test]
    fn normalise_unescapes_unreserved_only() {
        let encoder = PercentEncoder::new(CharacterSet::P_CHAR);
        assert_eq!(encoder.normalise("%7ea%2c%2E%c3%a9").unwrap(), "~a%2C.%C3%A9");
        assert_eq!(encoder.normalise("").unwrap(), "");
        assert!(encoder.normalise("a/b").is_err());
    }

    #[test]
    fn decode_validated_matches_decode() {
        assert_eq!(decode_validated("a%20b%C3%A9"), "a b\u{e9}");
        assert_eq!(decode_validated("%FF"), "\u{FFFD}");
    }
}
