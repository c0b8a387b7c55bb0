//! Address family classification.
//!
//! Purely syntactic: the family only selects which lookup program is asked.
//! Malformed input is not rejected here, it just takes the IPv4 path.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Up to seven colon separators between groups of at most four hex digits,
/// anchored at the start so IPv4-mapped tails (`::ffff:1.2.3.4`) still match.
const IPV6_SHAPE: &str = r"^[0-9A-Fa-f]{0,4}(?::[0-9A-Fa-f]{0,4}){1,7}";

fn ipv6_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The pattern is a compile-time constant covered by tests
    RE.get_or_init(|| Regex::new(IPV6_SHAPE).expect("IPV6_SHAPE is a valid regex"))
}

/// Which resolver variant an address is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

/// Classify an address by its textual shape.
///
/// # Examples
/// ```
/// use geogate::classify::{classify, AddressFamily};
/// assert_eq!(classify("2001:db8::1"), AddressFamily::V6);
/// assert_eq!(classify("8.8.8.8"), AddressFamily::V4);
/// assert_eq!(classify("not-an-address"), AddressFamily::V4);
/// ```
pub fn classify(address: &str) -> AddressFamily {
    if ipv6_shape().is_match(address) {
        AddressFamily::V6
    } else {
        AddressFamily::V4
    }
}
