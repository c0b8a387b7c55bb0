//! The per-connection decision: classify, resolve, evaluate, report.

use tracing::{debug, warn};

use crate::classify::{classify, AddressFamily};
use crate::notify::Notifier;
use crate::policy::{evaluate, Policy, Verdict};
use crate::resolver::{CountryResolver, Resolution};

/// Shown instead of an address when none was supplied
const NO_ADDRESS: &str = "<unknown>";

/// Arguments of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub remote_address: String,
    pub is_chained_call: bool,
}

impl InvocationContext {
    /// Build the context from the positional arguments.
    ///
    /// Returns `None` when the address is missing or blank.
    pub fn from_args(address: Option<&str>, chained: Option<&str>) -> Option<Self> {
        let remote_address = address.map(str::trim).filter(|a| !a.is_empty())?;
        Some(Self {
            remote_address: remote_address.to_string(),
            is_chained_call: chained.is_some_and(|c| !c.is_empty()),
        })
    }
}

/// Everything that went into one verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub family: AddressFamily,
    pub resolution: Resolution,
    pub verdict: Verdict,
}

/// Notification line for a decided connection
pub fn decision_message(verdict: Verdict, service: &str, address: &str, code: &str) -> String {
    format!("{} {} connection from {} ({})", verdict, service, address, code)
}

pub struct Gate<'a, R, N> {
    policy: Policy,
    service: &'a str,
    resolver: R,
    notifier: N,
}

impl<'a, R: CountryResolver, N: Notifier> Gate<'a, R, N> {
    pub fn new(policy: Policy, service: &'a str, resolver: R, notifier: N) -> Self {
        Self {
            policy,
            service,
            resolver,
            notifier,
        }
    }

    /// Decide a connection from its raw arguments.
    ///
    /// A missing address is allowed without consulting the resolver.
    pub fn check(&self, address: Option<&str>, chained: Option<&str>) -> Verdict {
        match InvocationContext::from_args(address, chained) {
            Some(ctx) => self.decide(&ctx).verdict,
            None => {
                self.notifier.notify(&format!(
                    "{} {} connection from {} (no remote address supplied)",
                    Verdict::Allow,
                    self.service,
                    NO_ADDRESS
                ));
                Verdict::Allow
            }
        }
    }

    /// Run the pipeline for one connection and report a denial
    pub fn decide(&self, ctx: &InvocationContext) -> Decision {
        let address = ctx.remote_address.as_str();
        let family = classify(address);
        let resolution = self.resolver.resolve(family, address);

        if !resolution.is_available() {
            warn!(
                "No usable {} GeoIP resolver, allowing {} without a lookup",
                family, address
            );
        }

        let code = resolution.country_code();
        let verdict = evaluate(code, &self.policy, resolution.is_available());

        if verdict == Verdict::Deny {
            self.notifier
                .notify(&decision_message(verdict, self.service, address, code));
        } else {
            debug!(
                "{} {} ({}, {}, chained: {})",
                verdict, address, code, family, ctx.is_chained_call
            );
        }

        Decision {
            family,
            resolution,
            verdict,
        }
    }
}
