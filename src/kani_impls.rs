//! Kani Arbitrary implementations and proof harnesses for property verification.
//!
//! This module provides `kani::Arbitrary` trait implementations for the
//! numeric and host types, enabling bounded verification of their
//! parse/render round trips with the Kani model checker.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{Hexadectet, Host, Octet, Port, Segment};

/// Characters a segment value may hold, including ones that must be escaped
const SEGMENT_CHARS: &[u8] = b"az09-._~!$&'()*+,;=:@/?# %";

fn arbitrary_segment_char() -> char {
    let idx: usize = kani::any();
    let idx = idx % SEGMENT_CHARS.len();
    SEGMENT_CHARS[idx] as char
}

impl kani::Arbitrary for Octet {
    fn any() -> Self {
        Octet::new(kani::any())
    }
}

impl kani::Arbitrary for Hexadectet {
    fn any() -> Self {
        Hexadectet::new(kani::any())
    }
}

impl kani::Arbitrary for Segment {
    fn any() -> Self {
        // 0-4 chars for tractability
        let len: usize = kani::any();
        let len = len % 5;

        let value: String = (0..len).map(|_| arbitrary_segment_char()).collect();
        Segment::new(value)
    }
}

impl kani::Arbitrary for Host {
    fn any() -> Self {
        // Only the IP forms; registered names are covered by proptest
        if kani::any() {
            Host::Ipv4([kani::any(), kani::any(), kani::any(), kani::any()])
        } else {
            // Groups drawn from {0, 1} keep the elision search small while
            // still producing every run layout
            let groups = [(); 8].map(|()| Hexadectet::new(u16::from(kani::any::<bool>())));
            Host::Ipv6(groups)
        }
    }
}

// ============================================================================
// Kani Proof Harnesses
// ============================================================================

/// Proof: Every octet renders as a `dec-octet` that parses back to itself
#[kani::proof]
#[kani::unwind(5)]
fn proof_octet_roundtrip() {
    let octet: Octet = kani::any();
    let rendered = octet.to_string();
    let reparsed = Octet::parse(&rendered).expect("rendered octet should parse");
    assert_eq!(reparsed, octet);
}

/// Proof: Every hexadectet renders as lower-case `h16` that parses back to itself
#[kani::proof]
#[kani::unwind(6)]
fn proof_hexadectet_roundtrip() {
    let group: Hexadectet = kani::any();
    let rendered = group.to_string();
    assert!(!rendered.bytes().any(|b| b.is_ascii_uppercase()));
    let reparsed = Hexadectet::parse(&rendered).expect("rendered group should parse");
    assert_eq!(reparsed, group);
}

/// Proof: Rendered IP hosts, with zero runs elided, parse back to the same host
#[kani::proof]
#[kani::unwind(10)]
fn proof_ip_host_roundtrip() {
    let host: Host = kani::any();
    let rendered = host.to_string();
    assert!(rendered.matches("::").count() <= 1);
    let reparsed = Host::parse(&rendered).expect("rendered host should parse");
    assert_eq!(reparsed, host);
}

/// Proof: Segment values survive encoding and decoding
#[kani::proof]
#[kani::unwind(8)]
fn proof_segment_roundtrip() {
    let segment: Segment = kani::any();
    let rendered = segment.to_string();
    assert!(!rendered.contains('/'));
    let reparsed = Segment::parse(&rendered).expect("rendered segment should parse");
    assert_eq!(reparsed, segment);
}

/// Proof: A port built from a number renders as that number's digits
#[kani::proof]
#[kani::unwind(7)]
fn proof_port_digits() {
    let number: u16 = kani::any();
    let port = Port::new(number);
    assert_eq!(port.as_u16(), Some(number));
    let reparsed = Port::parse(port.as_str()).expect("port digits should parse");
    assert_eq!(reparsed, port);
}
