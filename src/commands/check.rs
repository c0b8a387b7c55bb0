//! Check command implementation: decide one connection and exit.

use std::path::Path;
use std::process::ExitCode;
use tracing::warn;

use crate::cli::Cli;
use crate::config::Config;
use crate::gate::{Gate, InvocationContext};
use crate::notify::{is_interactive, DurableLog, LogNotifier};
use crate::policy::{Policy, Verdict};
use crate::resolver::GeoIpLookupResolver;

/// Run the check for the connection described by `cli`.
///
/// Every failure before a verdict exists resolves to [`Verdict::Allow`].
pub fn run(cli: &Cli) -> ExitCode {
    let verdict = check(
        &cli.config,
        cli.address.as_deref(),
        cli.chained.as_deref(),
    );
    ExitCode::from(verdict.exit_status())
}

/// Load the configuration and decide the connection
pub fn check(config_path: &Path, address: Option<&str>, chained: Option<&str>) -> Verdict {
    let config = match Config::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{:#}; allowing connection", e);
            return Verdict::Allow;
        }
    };

    let chained_call = InvocationContext::from_args(address, chained)
        .is_some_and(|ctx| ctx.is_chained_call);
    let notifier = LogNotifier::new(
        DurableLog::from(&config.log),
        chained_call || is_interactive(),
    );
    let resolver = GeoIpLookupResolver::from_config(&config.resolver);

    let gate = Gate::new(
        Policy::from_config(&config),
        &config.service,
        resolver,
        notifier,
    );
    gate.check(address, chained)
}
