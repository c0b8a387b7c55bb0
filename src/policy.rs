//! Country policy evaluation.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::{Config, PolicyMode};

/// Final decision for one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Allow => "ALLOW",
            Verdict::Deny => "DENY",
        }
    }

    /// Process exit status the connection-gating layer expects (0 allow, 1 deny)
    pub fn exit_status(&self) -> u8 {
        match self {
            Verdict::Allow => 0,
            Verdict::Deny => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable allow/deny policy over uppercase country codes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    country_codes: BTreeSet<String>,
    mode: PolicyMode,
}

impl Policy {
    pub fn new<I, S>(codes: I, mode: PolicyMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            country_codes: codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_ascii_uppercase())
                .collect(),
            mode,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.country_codes, config.mode)
    }

    /// Whether `code` is in the configured set, ignoring case
    pub fn matches(&self, code: &str) -> bool {
        self.country_codes.contains(&code.trim().to_ascii_uppercase())
    }
}

/// Decide a connection from its country code.
///
/// With no resolver the answer is always [`Verdict::Allow`], whatever the
/// mode: a missing GeoIP install must not lock everyone out.
///
/// # Examples
/// ```
/// use geogate::config::PolicyMode;
/// use geogate::policy::{evaluate, Policy, Verdict};
///
/// let policy = Policy::new(["GB"], PolicyMode::DenyListed);
/// assert_eq!(evaluate("gb", &policy, true), Verdict::Deny);
/// assert_eq!(evaluate("gb", &policy, false), Verdict::Allow);
/// ```
pub fn evaluate(code: &str, policy: &Policy, resolver_available: bool) -> Verdict {
    if !resolver_available {
        return Verdict::Allow;
    }

    let matched = policy.matches(code);
    match (policy.mode, matched) {
        (PolicyMode::DenyListed, true) | (PolicyMode::AllowListed, false) => Verdict::Deny,
        (PolicyMode::DenyListed, false) | (PolicyMode::AllowListed, true) => Verdict::Allow,
    }
}
