//! Paths: empty, absolute and rootless, with dot-segment removal.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::segment::Segment;

/// A path, normalized once at construction.
///
/// `Absolute` paths start with `/`. `Rootless` paths do not, and may keep
/// leading `..` segments, which only gain meaning once the path is resolved
/// against a base.
///
/// # Examples
///
/// ```
/// use urin::{Path, Segment};
///
/// let path = Path::absolute(["a", "b", "c"].map(Segment::from).into_iter().chain([
///     Segment::dot(),
///     Segment::dot_dot(),
///     Segment::dot_dot(),
///     Segment::new("g"),
/// ]));
/// assert_eq!(path.to_string(), "/a/g");
///
/// let relative = Path::parse("../d").unwrap();
/// let base = Path::parse("/a/b/c").unwrap();
/// assert_eq!(relative.resolve_relative_to(&base).to_string(), "/a/d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Path {
    /// The empty path.
    #[default]
    Empty,
    /// A path starting with `/`.
    Absolute(AbsolutePath),
    /// A non-empty path not starting with `/`.
    Rootless(RootlessPath),
}

/// A path starting with `/`, with all dot segments removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AbsolutePath {
    segments: Vec<Segment>,
}

/// A non-empty path not starting with `/`.
///
/// The only sentinels it can hold are leading `..` segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootlessPath {
    segments: Vec<Segment>,
}

/// When to write `./` in front of a path so it cannot be misread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixPolicy {
    /// After an authority, where the leading `/` is unambiguous.
    Never,
    /// After `scheme:` with no authority, where `//` would start one.
    IfFirstIsEmpty,
    /// At the start of a relative reference, where a colon in the first
    /// segment would read as a scheme.
    IfFirstIsEmptyOrContainsColon,
}

impl PrefixPolicy {
    fn prefixes_absolute(self, first: Option<&Segment>) -> bool {
        self != Self::Never && first.is_some_and(Segment::is_empty)
    }

    fn prefixes_rootless(self, first: Option<&Segment>) -> bool {
        match self {
            Self::Never => false,
            Self::IfFirstIsEmpty => first.is_some_and(Segment::is_empty),
            Self::IfFirstIsEmptyOrContainsColon => {
                first.is_some_and(|segment| segment.is_empty() || segment.contains_colon())
            }
        }
    }
}

/// RFC 3986 §5.2.4 over a segment list.
///
/// A trailing `.` or `..` leaves a trailing empty segment, so `a/b/..` and
/// `a/` agree. `..` segments with nothing to pop are kept when
/// `keep_unmatched_parents` is set and dropped otherwise.
fn remove_dot_segments(segments: Vec<Segment>, keep_unmatched_parents: bool) -> Vec<Segment> {
    let count = segments.len();
    let mut output: Vec<Segment> = Vec::with_capacity(count);
    for (index, segment) in segments.into_iter().enumerate() {
        let is_last = index + 1 == count;
        if segment.is_dot() {
            if is_last {
                output.push(Segment::empty());
            }
        } else if segment.is_dot_dot() {
            if output.last().is_some_and(|previous| !previous.is_dot_dot()) {
                output.pop();
                if is_last {
                    output.push(Segment::empty());
                }
            } else if keep_unmatched_parents {
                output.push(segment);
            } else if is_last {
                output.push(Segment::empty());
            }
        } else {
            output.push(segment);
        }
    }
    output
}

fn write_segments<W: fmt::Write>(out: &mut W, segments: &[Segment]) -> fmt::Result {
    for (index, segment) in segments.iter().enumerate() {
        if index > 0 {
            out.write_char('/')?;
        }
        write!(out, "{segment}")?;
    }
    Ok(())
}

fn parse_segments<'a>(pieces: impl Iterator<Item = &'a str>, input: &str) -> Result<Vec<Segment>, ParseError> {
    pieces
        .map(|piece| {
            Segment::parse(piece).map_err(|e| ParseError {
                input: input.to_string(),
                kind: e.kind,
            })
        })
        .collect()
}

impl AbsolutePath {
    /// Creates an absolute path from `segments`, removing dot segments.
    #[must_use]
    pub fn new(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut segments = remove_dot_segments(segments.into_iter().collect(), false);
        if segments.len() == 1 && segments[0].is_empty() {
            segments.clear();
        }
        Self { segments }
    }

    /// Parses a path that starts with `/`.
    pub(crate) fn parse_absolute(input: &str) -> Result<Self, ParseError> {
        if input == "/" {
            return Ok(Self::default());
        }
        let mut pieces = input.split('/');
        pieces.next();
        Ok(Self::new(parse_segments(pieces, input)?))
    }

    /// The segments after the leading `/`.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn write_to<W: fmt::Write>(&self, out: &mut W, policy: PrefixPolicy) -> fmt::Result {
        out.write_char('/')?;
        if policy.prefixes_absolute(self.segments.first()) {
            out.write_str("./")?;
        }
        write_segments(out, &self.segments)
    }
}

impl RootlessPath {
    /// Creates a rootless path, or `None` if `segments` is empty.
    #[must_use]
    pub fn new(segments: impl IntoIterator<Item = Segment>) -> Option<Self> {
        let segments: Vec<Segment> = segments.into_iter().collect();
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: remove_dot_segments(segments, true),
        })
    }

    /// The segments, first to last.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn write_to<W: fmt::Write>(&self, out: &mut W, policy: PrefixPolicy) -> fmt::Result {
        if policy.prefixes_rootless(self.segments.first()) {
            out.write_str("./")?;
        }
        write_segments(out, &self.segments)
    }

    /// Appends this path to `base` minus its last segment and removes dot
    /// segments, leaving the result rootless.
    ///
    /// A merge that leaves nothing, or a lone empty segment, is the empty
    /// path.
    pub(crate) fn merge_rootless(&self, base: &[Segment]) -> Path {
        let mut merged = base[..base.len().saturating_sub(1)].to_vec();
        merged.extend(self.segments.iter().cloned());
        let segments = remove_dot_segments(merged, false);
        let nothing_left = match segments.as_slice() {
            [] => true,
            [only] => only.is_empty(),
            _ => false,
        };
        if nothing_left {
            Path::Empty
        } else {
            Path::Rootless(Self { segments })
        }
    }
}

impl Path {
    /// The empty path.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// An absolute path.
    #[must_use]
    pub fn absolute(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self::Absolute(AbsolutePath::new(segments))
    }

    /// A rootless path, or the empty path if there are no segments.
    #[must_use]
    pub fn rootless(segments: impl IntoIterator<Item = Segment>) -> Self {
        RootlessPath::new(segments).map_or(Self::Empty, Self::Rootless)
    }

    /// Parses a path: empty, absolute if it starts with `/`, otherwise rootless.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if a segment is not validly percent-encoded.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            Ok(Self::Empty)
        } else if input.starts_with('/') {
            AbsolutePath::parse_absolute(input).map(Self::Absolute)
        } else {
            Ok(Self::rootless(parse_segments(input.split('/'), input)?))
        }
    }

    /// The segments of the path.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        match self {
            Self::Empty => &[],
            Self::Absolute(path) => path.segments(),
            Self::Rootless(path) => path.segments(),
        }
    }

    /// Returns true for the empty path.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns true for an absolute path.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        matches!(self, Self::Absolute(_))
    }

    /// Resolves this path, taken as a reference, against `base`
    /// (RFC 3986 §5.2.2-5.2.4).
    ///
    /// - An empty path resolves to `base`.
    /// - An absolute path resolves to itself.
    /// - A rootless path replaces the last segment of `base`. The result is
    ///   absolute unless `base` is rootless.
    #[must_use]
    pub fn resolve_relative_to(&self, base: &Self) -> Self {
        match (self, base) {
            (Self::Empty, _) => base.clone(),
            (Self::Absolute(_), _) => self.clone(),
            (Self::Rootless(reference), Self::Rootless(base)) => reference.merge_rootless(base.segments()),
            (Self::Rootless(reference), _) => {
                let base = base.segments();
                let mut merged = base[..base.len().saturating_sub(1)].to_vec();
                merged.extend(reference.segments().iter().cloned());
                Self::absolute(merged)
            }
        }
    }

    /// Writes the path using `policy` to decide on a `./` prefix.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn write_to<W: fmt::Write>(&self, out: &mut W, policy: PrefixPolicy) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Absolute(path) => path.write_to(out, policy),
            Self::Rootless(path) => path.write_to(out, policy),
        }
    }

    /// The path as text under `policy`.
    #[must_use]
    pub fn render(&self, policy: PrefixPolicy) -> String {
        let mut rendered = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_to(&mut rendered, policy);
        rendered
    }
}

impl From<AbsolutePath> for Path {
    fn from(path: AbsolutePath) -> Self {
        Self::Absolute(path)
    }
}

impl From<RootlessPath> for Path {
    fn from(path: RootlessPath) -> Self {
        Self::Rootless(path)
    }
}

impl fmt::Display for AbsolutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, PrefixPolicy::IfFirstIsEmpty)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, PrefixPolicy::IfFirstIsEmpty)
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Path {
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

    fn segments(values: &[&str]) -> Vec<Segment> {
        values
            .iter()
            .map(|v| match *v {
                "." => Segment::dot(),
                ".." => Segment::dot_dot(),
                other => Segment::new(other),
            })
            .collect()
    }

    #[test]
    fn absolute_dot_segment_removal() {
        let path = Path::absolute(segments(&["a", "b", "c", ".", "..", "..", "g"]));
        assert_eq!(path.segments(), segments(&["a", "g"]).as_slice());
    }

    #[test]
    fn rootless_dot_segment_removal() {
        let path = Path::rootless(segments(&["a", "b", "c", ".", "..", "..", "g"]));
        assert_eq!(path.segments(), segments(&["a", "g"]).as_slice());
    }

    #[test]
    fn parent_of_root_is_root() {
        assert_eq!(Path::absolute(segments(&["..", "..", "a"])).to_string(), "/a");
        assert_eq!(Path::absolute(segments(&[".."])).to_string(), "/");
    }

    #[test]
    fn trailing_dots_keep_trailing_slash() {
        assert_eq!(Path::absolute(segments(&["a", "b", ".."])).to_string(), "/a/");
        assert_eq!(Path::absolute(segments(&["a", "b", "."])).to_string(), "/a/b/");
        assert_eq!(Path::absolute(segments(&["a", "b", "..", ""])).to_string(), "/a/");
    }

    #[test]
    fn single_empty_segment_is_root() {
        assert_eq!(Path::absolute(segments(&[""])), Path::absolute(Vec::new()));
        assert_eq!(Path::parse("/").unwrap().to_string(), "/");
    }

    #[test]
    fn rootless_keeps_leading_parents() {
        let path = Path::parse("../../a").unwrap();
        assert_eq!(path.segments(), segments(&["..", "..", "a"]).as_slice());
        let path = Path::parse("a/../../b").unwrap();
        assert_eq!(path.segments(), segments(&["..", "b"]).as_slice());
    }

    #[test]
    fn rootless_drops_leading_dot() {
        assert_eq!(Path::parse("./a").unwrap(), Path::parse("a").unwrap());
        assert_eq!(Path::parse(".").unwrap().segments(), segments(&[""]).as_slice());
    }

    #[test]
    fn normalisation_is_idempotent() {
        for text in ["/a/./b/../c/", "../a/./../../b", "a/b/c/./../../g", "/../x/.."] {
            let once = Path::parse(text).unwrap();
            let twice = match &once {
                Path::Absolute(p) => Path::absolute(p.segments().to_vec()),
                other => Path::rootless(other.segments().to_vec()),
            };
            assert_eq!(once, twice, "{text}");
        }
    }

    #[test]
    fn rootless_without_segments_is_empty() {
        assert_eq!(Path::rootless(Vec::new()), Path::Empty);
        assert!(RootlessPath::new(Vec::new()).is_none());
    }

    #[test]
    fn parse_kinds() {
        assert_eq!(Path::parse("").unwrap(), Path::Empty);
        assert!(Path::parse("/a").unwrap().is_absolute());
        assert!(matches!(Path::parse("a/b").unwrap(), Path::Rootless(_)));
    }

    #[test]
    fn parse_keeps_empty_segments() {
        assert_eq!(Path::parse("/a//b/").unwrap().segments(), segments(&["a", "", "b", ""]).as_slice());
    }

    #[test]
    fn parse_reports_whole_path_on_bad_segment() {
        let err = Path::parse("/a/b%ZZ/c").unwrap_err();
        assert_eq!(err.input, "/a/b%ZZ/c");
    }

    #[test]
    fn prefix_policies() {
        let leading_empty = Path::absolute(segments(&["", "a"]));
        assert_eq!(leading_empty.render(PrefixPolicy::Never), "//a");
        assert_eq!(leading_empty.render(PrefixPolicy::IfFirstIsEmpty), "/.//a");

        let colon = Path::rootless(segments(&["a:b", "c"]));
        assert_eq!(colon.render(PrefixPolicy::IfFirstIsEmpty), "a:b/c");
        assert_eq!(colon.render(PrefixPolicy::IfFirstIsEmptyOrContainsColon), "./a:b/c");

        let absolute_colon = Path::absolute(segments(&["a:b"]));
        assert_eq!(absolute_colon.render(PrefixPolicy::IfFirstIsEmptyOrContainsColon), "/a:b");

        let rootless_empty = Path::rootless(segments(&["", "a"]));
        assert_eq!(rootless_empty.render(PrefixPolicy::IfFirstIsEmpty), ".//a");
    }

    #[test]
    fn display_round_trips() {
        for text in ["/", "/a/b", "/.//a", "a/b", "./", ".//a", "../a", "a:b", "/a%2Fb", "%2E%2E/x"] {
            let path = Path::parse(text).unwrap();
            assert_eq!(Path::parse(&path.to_string()).unwrap(), path, "{text}");
        }
    }

    #[test]
    fn resolve_empty_and_absolute() {
        let base = Path::parse("/b/c/d;p").unwrap();
        assert_eq!(Path::Empty.resolve_relative_to(&base), base);
        let absolute = Path::parse("/g").unwrap();
        assert_eq!(absolute.resolve_relative_to(&base), absolute);
    }

    #[test]
    fn resolve_rootless_against_absolute() {
        let base = Path::parse("/b/c/d;p").unwrap();
        let resolve = |r: &str| Path::parse(r).unwrap().resolve_relative_to(&base).to_string();
        assert_eq!(resolve("g"), "/b/c/g");
        assert_eq!(resolve("./g"), "/b/c/g");
        assert_eq!(resolve("g/"), "/b/c/g/");
        assert_eq!(resolve("."), "/b/c/");
        assert_eq!(resolve(".."), "/b/");
        assert_eq!(resolve("../g"), "/b/g");
        assert_eq!(resolve("../.."), "/");
        assert_eq!(resolve("../../../g"), "/g");
    }

    #[test]
    fn resolve_rootless_against_empty_is_absolute() {
        let resolved = Path::parse("g").unwrap().resolve_relative_to(&Path::Empty);
        assert_eq!(resolved.to_string(), "/g");
    }

    #[test]
    fn resolve_rootless_against_rootless_stays_rootless() {
        let base = Path::parse("a/b").unwrap();
        let resolved = Path::parse("../../c").unwrap().resolve_relative_to(&base);
        assert_eq!(resolved, Path::parse("c").unwrap());
        let resolved = Path::parse("..").unwrap().resolve_relative_to(&base);
        assert_eq!(resolved, Path::Empty);
    }

    #[test]
    fn rootless_merge_to_nothing_is_empty() {
        let base = Path::parse("a").unwrap();
        for reference in [".", "..", "./", "../", "b/.."] {
            let resolved = Path::parse(reference).unwrap().resolve_relative_to(&base);
            assert_eq!(resolved, Path::Empty, "{reference}");
        }
        let resolved = Path::parse("b/").unwrap().resolve_relative_to(&base);
        assert_eq!(resolved.to_string(), "b/");
    }
}
