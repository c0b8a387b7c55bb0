//! geogate - Country-based connection gate for TCP Wrapper hooks
//!
//! Exit status 0 allows the connection, 1 denies it.

use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use geogate::cli::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Covers --help and --version too; a bad command line must not deny
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    // Quiet allows are the common case, so the default level stays at WARN
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    geogate::commands::check::run(&cli)
}
