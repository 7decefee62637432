//! Reference resolution against the examples of RFC 3986 section 5.4.

use urin::{Urin, UrinReference};

const BASE: &str = "http://a/b/c/d;p?q";

fn resolve_against(base: &str, reference: &str) -> String {
    let base = Urin::parse(base).unwrap();
    let reference = UrinReference::parse(reference).unwrap();
    base.resolve(&reference).to_string()
}

fn assert_resolves(cases: &[(&str, &str)]) {
    for (reference, expected) in cases {
        assert_eq!(&resolve_against(BASE, reference), expected, "resolving {reference:?}");
    }
}

#[test]
fn normal_examples() {
    assert_resolves(&[
        ("g:h", "g:h"),
        ("g", "http://a/b/c/g"),
        ("./g", "http://a/b/c/g"),
        ("g/", "http://a/b/c/g/"),
        ("/g", "http://a/g"),
        ("//g", "http://g"),
        ("?y", "http://a/b/c/d;p?y"),
        ("g?y", "http://a/b/c/g?y"),
        ("#s", "http://a/b/c/d;p?q#s"),
        ("g#s", "http://a/b/c/g#s"),
        ("g?y#s", "http://a/b/c/g?y#s"),
        (";x", "http://a/b/c/;x"),
        ("g;x", "http://a/b/c/g;x"),
        ("g;x?y#s", "http://a/b/c/g;x?y#s"),
        ("", "http://a/b/c/d;p?q"),
        (".", "http://a/b/c/"),
        ("./", "http://a/b/c/"),
        ("..", "http://a/b/"),
        ("../", "http://a/b/"),
        ("../g", "http://a/b/g"),
        ("../..", "http://a/"),
        ("../../", "http://a/"),
        ("../../g", "http://a/g"),
    ]);
}

#[test]
fn abnormal_examples() {
    assert_resolves(&[
        ("../../../g", "http://a/g"),
        ("../../../../g", "http://a/g"),
        ("/./g", "http://a/g"),
        ("/../g", "http://a/g"),
        ("g.", "http://a/b/c/g."),
        (".g", "http://a/b/c/.g"),
        ("g..", "http://a/b/c/g.."),
        ("..g", "http://a/b/c/..g"),
        ("./../g", "http://a/b/g"),
        ("./g/.", "http://a/b/c/g/"),
        ("g/./h", "http://a/b/c/g/h"),
        ("g/../h", "http://a/b/c/h"),
        ("g;x=1/./y", "http://a/b/c/g;x=1/y"),
        ("g;x=1/../y", "http://a/b/c/y"),
        ("g?y/./x", "http://a/b/c/g?y/./x"),
        ("g?y/../x", "http://a/b/c/g?y/../x"),
        ("g#s/./x", "http://a/b/c/g#s/./x"),
        ("g#s/../x", "http://a/b/c/g#s/../x"),
    ]);
}

#[test]
fn scheme_qualified_reference_is_not_relative() {
    assert_eq!(resolve_against(BASE, "http:g"), "http:g");
}

#[test]
fn rootless_base_stays_rootless() {
    assert_eq!(resolve_against("urn:a/b/c", "d"), "urn:a/b/d");
    assert_eq!(resolve_against("urn:a/b/c", "../d"), "urn:a/d");
    assert_eq!(resolve_against("urn:a/b/c", "../../../d"), "urn:d");
}

#[test]
fn rootless_base_collapsing_to_nothing_is_empty() {
    assert_eq!(resolve_against("urn:a", "."), "urn:");
    assert_eq!(resolve_against("urn:a", ".."), "urn:");
    assert_eq!(resolve_against("urn:a/b", "..?q"), "urn:?q");
    assert_eq!(resolve_against("urn:a/b", "."), "urn:a/");
    assert_eq!(resolve_against("s:", "."), "s:");
}

#[test]
fn empty_base_path_without_authority() {
    assert_eq!(resolve_against("s:", "a/b"), "s:a/b");
    assert_eq!(resolve_against("s:?q", "#f"), "s:?q#f");
}

#[test]
fn absolute_base_without_authority() {
    assert_eq!(resolve_against("file:/x/y", "../z"), "file:/z");
    assert_eq!(resolve_against("file:/x/y", "z"), "file:/x/z");
}

#[test]
fn empty_base_path_with_authority() {
    assert_eq!(resolve_against("http://a", "g"), "http://a/g");
    assert_eq!(resolve_against("http://a?q", "#f"), "http://a?q#f");
}

#[test]
fn resolved_path_keeps_a_leading_empty_segment_unambiguous() {
    let resolved = resolve_against("s:/b", ".//c");
    assert_eq!(resolved, "s:/.//c");
    assert_eq!(Urin::parse(&resolved).unwrap().to_string(), resolved);
}
