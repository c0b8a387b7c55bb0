//! # geogate - Country-based connection gate
//!
//! Decides whether an inbound connection may proceed based on the country of
//! its remote address. It is meant to be called once per connection by a TCP
//! Wrapper hook (or a dispatcher that chains several such gates) and answers
//! through its exit status: 0 allows, 1 denies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        geogate                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)            geogate [ADDRESS] [CHAINED]          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)   mode + country codes, immutable      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Gate                                                       │
//! │    ├── classify   IPv4 / IPv6 by textual shape              │
//! │    ├── resolver   geoiplookup / geoiplookup6 -> code        │
//! │    └── policy     allow-listed / deny-listed -> verdict     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Notify (file + fs2 lock, or logger)  + stderr echo         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail-open
//!
//! When no lookup program is installed for the address family, the
//! configuration cannot be read, or no address is supplied, the connection is
//! allowed. A broken GeoIP install must never lock the operator out.
//!
//! ## Example
//!
//! ```no_run
//! use geogate::config::Config;
//! use geogate::gate::Gate;
//! use geogate::notify::{DurableLog, LogNotifier};
//! use geogate::policy::{Policy, Verdict};
//! use geogate::resolver::GeoIpLookupResolver;
//!
//! let config = Config::load("/etc/geogate/config.yaml").unwrap();
//! let gate = Gate::new(
//!     Policy::from_config(&config),
//!     &config.service,
//!     GeoIpLookupResolver::from_config(&config.resolver),
//!     LogNotifier::new(DurableLog::from(&config.log), false),
//! );
//! if gate.check(Some("203.0.113.9"), None) == Verdict::Deny {
//!     std::process::exit(1);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`classify`] - Address family detection
//! - [`cli`] - Command-line interface definitions
//! - [`cmd_abstraction`] - Mockable process execution
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Error types
//! - [`gate`] - Per-connection decision pipeline
//! - [`notify`] - Decision log and operator echo
//! - [`policy`] - Allow/deny evaluation
//! - [`resolver`] - GeoIP lookup adapter
//! - [`validation`] - Country code validation

pub mod classify;
pub mod cli;
pub mod cmd_abstraction;
pub mod commands;
pub mod config;
pub mod error;
pub mod gate;
pub mod notify;
pub mod policy;
pub mod resolver;
pub mod validation;

pub use cli::Cli;
pub use config::Config;
pub use policy::Verdict;
