//! Typed encodings layered over [`PercentEncoder`].
//!
//! An [`Encoding<T>`] turns a value of type `T` into percent-encoded text and
//! back. The building block is [`StringEncoding`], and the other encodings
//! wrap it:
//!
//! | Encoding | Encodes | Purpose |
//! |----------|---------|---------|
//! | [`StringEncoding`] | `String` | plain text over a character set |
//! | [`DelimitedEncoding`] | `Vec<T>` | elements joined by a delimiter |
//! | [`SubstitutedEncoding`] | `String` | one raw character written as another, e.g. space as `+` |
//! | [`LiteralOverrideEncoding`] | `String` | a sentinel literal fully escaped |
//!
//! Wrapping encodings escape the characters they give meaning to, so a
//! delimiter inside an element can never be confused with a real one.
//!
//! ```rust
//! use urin::{DelimitedEncoding, Encoding, StringEncoding};
//!
//! let pairs = DelimitedEncoding::new('&', DelimitedEncoding::new('=', StringEncoding::QUERY_AND_FRAGMENT));
//! let value = vec![
//!     vec!["q".to_string(), "a&b".to_string()],
//!     vec!["lang".to_string(), "en".to_string()],
//! ];
//! let encoded = pairs.encode(&value);
//! assert_eq!(encoded, "q=a%26b&lang=en");
//! assert_eq!(pairs.decode(&encoded).unwrap(), value);
//! ```

use crate::charset::CharacterSet;
use crate::error::DecodingError;
use crate::percent::PercentEncoder;

/// Converts values of type `T` to and from percent-encoded text.
pub trait Encoding<T> {
    /// Encodes `value`. Never fails.
    fn encode(&self, value: &T) -> String;

    /// Decodes text produced by [`encode`](Encoding::encode).
    ///
    /// # Errors
    ///
    /// Returns `DecodingError` if `encoded` is not valid for this encoding.
    fn decode(&self, encoded: &str) -> Result<T, DecodingError>;

    /// The same encoding, additionally escaping `c` wherever it would
    /// otherwise appear raw.
    #[must_use]
    fn additionally_encoding(&self, c: char) -> Self
    where
        Self: Sized;
}

/// Plain string encoding over one [`PercentEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringEncoding {
    encoder: PercentEncoder,
}

impl StringEncoding {
    /// Encoding for query and fragment payloads.
    pub const QUERY_AND_FRAGMENT: Self = Self::new(PercentEncoder::new(CharacterSet::QUERY_AND_FRAGMENT));

    /// Encoding for path segment values.
    pub const P_CHAR: Self = Self::new(PercentEncoder::new(CharacterSet::P_CHAR));

    /// Creates a string encoding backed by `encoder`.
    #[must_use]
    pub const fn new(encoder: PercentEncoder) -> Self {
        Self { encoder }
    }

    /// The underlying percent-encoder.
    #[must_use]
    pub const fn encoder(&self) -> &PercentEncoder {
        &self.encoder
    }
}

impl Encoding<String> for StringEncoding {
    fn encode(&self, value: &String) -> String {
        self.encoder.encode(value)
    }

    fn decode(&self, encoded: &str) -> Result<String, DecodingError> {
        self.encoder.decode(encoded)
    }

    fn additionally_encoding(&self, c: char) -> Self {
        Self::new(self.encoder.additionally_encoding(c))
    }
}

/// Encodes a sequence by encoding each element and joining with a delimiter.
///
/// The element encoding escapes the delimiter. An empty sequence and a
/// sequence holding one empty element both encode to empty text, which
/// decodes as the latter: decoding always yields one more element than
/// there are delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelimitedEncoding<E> {
    delimiter: char,
    element: E,
}

impl<E> DelimitedEncoding<E> {
    /// Creates a delimited encoding whose elements use `element`.
    #[must_use]
    pub fn new<T>(delimiter: char, element: E) -> Self
    where
        E: Encoding<T>,
    {
        Self {
            delimiter,
            element: element.additionally_encoding(delimiter),
        }
    }

    /// The delimiter placed between elements.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl<T, E: Encoding<T>> Encoding<Vec<T>> for DelimitedEncoding<E> {
    fn encode(&self, value: &Vec<T>) -> String {
        let mut encoded = String::new();
        for (index, element) in value.iter().enumerate() {
            if index > 0 {
                encoded.push(self.delimiter);
            }
            encoded.push_str(&self.element.encode(element));
        }
        encoded
    }

    fn decode(&self, encoded: &str) -> Result<Vec<T>, DecodingError> {
        encoded
            .split(self.delimiter)
            .map(|element| self.element.decode(element))
            .collect()
    }

    fn additionally_encoding(&self, c: char) -> Self {
        Self {
            delimiter: self.delimiter,
            element: self.element.additionally_encoding(c),
        }
    }
}

/// Writes every `original` character as the literal `replacement`.
///
/// The inner encoding escapes any `replacement` that occurs in the value,
/// so decoding maps raw `replacement`s back to `original`. This is the
/// space-as-`+` convention of HTML form queries.
///
/// ```rust
/// use urin::{Encoding, StringEncoding, SubstitutedEncoding};
///
/// let form = SubstitutedEncoding::new(' ', '+', StringEncoding::QUERY_AND_FRAGMENT);
/// assert_eq!(form.encode(&"1 + 1".to_string()), "1+%2B+1");
/// assert_eq!(form.decode("1+%2B+1").unwrap(), "1 + 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubstitutedEncoding<E> {
    original: char,
    replacement: char,
    inner: E,
}

impl<E: Encoding<String>> SubstitutedEncoding<E> {
    /// Creates an encoding that writes `original` as `replacement`.
    #[must_use]
    pub fn new(original: char, replacement: char, inner: E) -> Self {
        Self {
            original,
            replacement,
            inner: inner.additionally_encoding(replacement),
        }
    }
}

impl<E: Encoding<String>> Encoding<String> for SubstitutedEncoding<E> {
    fn encode(&self, value: &String) -> String {
        let mut encoded = String::with_capacity(value.len());
        for (index, part) in value.split(self.original).enumerate() {
            if index > 0 {
                encoded.push(self.replacement);
            }
            encoded.push_str(&self.inner.encode(&part.to_string()));
        }
        encoded
    }

    fn decode(&self, encoded: &str) -> Result<String, DecodingError> {
        let mut decoded = String::with_capacity(encoded.len());
        for (index, part) in encoded.split(self.replacement).enumerate() {
            if index > 0 {
                decoded.push(self.original);
            }
            decoded.push_str(&self.inner.decode(part)?);
        }
        Ok(decoded)
    }

    fn additionally_encoding(&self, c: char) -> Self {
        Self {
            original: self.original,
            replacement: self.replacement,
            inner: self.inner.additionally_encoding(c),
        }
    }
}

/// Escapes every character of a value equal to `literal`, and delegates
/// anything else to the inner encoding.
///
/// Path segments use this so a segment whose value is `.` is written `%2E`
/// and never read back as the dot sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteralOverrideEncoding<E> {
    literal: String,
    inner: E,
}

impl<E: Encoding<String>> LiteralOverrideEncoding<E> {
    /// Creates an encoding that fully escapes `literal`.
    #[must_use]
    pub fn new(literal: impl Into<String>, inner: E) -> Self {
        Self {
            literal: literal.into(),
            inner,
        }
    }
}

impl<E: Encoding<String>> Encoding<String> for LiteralOverrideEncoding<E> {
    fn encode(&self, value: &String) -> String {
        if *value == self.literal {
            PercentEncoder::ENCODE_EVERYTHING.encode(value)
        } else {
            self.inner.encode(value)
        }
    }

    fn decode(&self, encoded: &str) -> Result<String, DecodingError> {
        self.inner.decode(encoded)
    }

    fn additionally_encoding(&self, c: char) -> Self {
        Self {
            literal: self.literal.clone(),
            inner: self.inner.additionally_encoding(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn string_encoding_round_trip() {
        let encoding = StringEncoding::P_CHAR;
        let encoded = encoding.encode(&"a/b c".to_string());
        assert_eq!(encoded, "a%2Fb%20c");
        assert_eq!(encoding.decode(&encoded).unwrap(), "a/b c");
    }

    #[test]
    fn delimited_escapes_delimiter_in_elements() {
        let encoding = DelimitedEncoding::new(';', StringEncoding::P_CHAR);
        let encoded = encoding.encode(&strings(&["a;b", "c"]));
        assert_eq!(encoded, "a%3Bb;c");
        assert_eq!(encoding.decode(&encoded).unwrap(), strings(&["a;b", "c"]));
    }

    #[test]
    fn delimited_empty_text_is_one_empty_element() {
        let encoding = DelimitedEncoding::new(',', StringEncoding::P_CHAR);
        assert_eq!(encoding.encode(&Vec::new()), "");
        assert_eq!(encoding.encode(&strings(&[""])), "");
        assert_eq!(encoding.decode("").unwrap(), strings(&[""]));
    }

    #[test]
    fn delimited_keeps_empty_elements() {
        let encoding = DelimitedEncoding::new(',', StringEncoding::P_CHAR);
        assert_eq!(encoding.decode("a,,b,").unwrap(), strings(&["a", "", "b", ""]));
    }

    #[test]
    fn nested_delimiters_escape_both() {
        let encoding = DelimitedEncoding::new('&', DelimitedEncoding::new('=', StringEncoding::QUERY_AND_FRAGMENT));
        let value = vec![strings(&["a=", "&b"])];
        assert_eq!(encoding.encode(&value), "a%3D=%26b");
    }

    #[test]
    fn delimited_decode_propagates_element_error() {
        let encoding = DelimitedEncoding::new(',', StringEncoding::P_CHAR);
        assert!(matches!(
            encoding.decode("a,%ZZ"),
            Err(DecodingError::MalformedEscape { .. })
        ));
    }

    #[test]
    fn substituted_space_as_plus() {
        let encoding = SubstitutedEncoding::new(' ', '+', StringEncoding::QUERY_AND_FRAGMENT);
        assert_eq!(encoding.encode(&"a b+c".to_string()), "a+b%2Bc");
        assert_eq!(encoding.decode("a+b%2Bc").unwrap(), "a b+c");
    }

    #[test]
    fn substituted_keeps_trailing_replacements() {
        let encoding = SubstitutedEncoding::new(' ', '+', StringEncoding::QUERY_AND_FRAGMENT);
        assert_eq!(encoding.encode(&"  ".to_string()), "++");
        assert_eq!(encoding.decode("++").unwrap(), "  ");
    }

    #[test]
    fn literal_override_escapes_only_the_literal() {
        let encoding = LiteralOverrideEncoding::new(".", StringEncoding::P_CHAR);
        assert_eq!(encoding.encode(&".".to_string()), "%2E");
        assert_eq!(encoding.encode(&"..".to_string()), "..");
        assert_eq!(encoding.decode("%2E").unwrap(), ".");
    }

    #[test]
    fn additionally_encoding_reaches_innermost() {
        let encoding = LiteralOverrideEncoding::new("x", StringEncoding::P_CHAR).additionally_encoding('a');
        assert_eq!(encoding.encode(&"bab".to_string()), "b%61b");
    }
}
