//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// Arguments as passed by the TCP Wrapper hook, e.g.
/// `sshd: ALL: aclexec /usr/local/bin/geogate %a`
#[derive(Parser, Debug)]
#[command(name = "geogate")]
#[command(
    version,
    about = "Country-based connection gate for TCP Wrapper hooks",
    long_about = "Allows or denies a connection by the country of its remote address.\n\
                  Exit status 0 allows the connection, 1 denies it."
)]
pub struct Cli {
    /// Remote address of the connection (IPv4 or IPv6)
    pub address: Option<String>,

    /// Any non-empty value marks a call chained from a dispatcher
    pub chained: Option<String>,

    /// Further hook tokens, accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,

    /// Config file path
    #[arg(short, long, env = "GEOGATE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_address_only() {
        let cli = Cli::try_parse_from(["geogate", "203.0.113.9"]).unwrap();
        assert_eq!(cli.address.as_deref(), Some("203.0.113.9"));
        assert!(cli.chained.is_none());
    }

    #[test]
    fn test_cli_chained() {
        let cli = Cli::try_parse_from(["geogate", "2001:db8::1", "1"]).unwrap();
        assert_eq!(cli.address.as_deref(), Some("2001:db8::1"));
        assert_eq!(cli.chained.as_deref(), Some("1"));
    }

    #[test]
    fn test_cli_no_arguments() {
        let cli = Cli::try_parse_from(["geogate"]).unwrap();
        assert!(cli.address.is_none());
    }

    #[test]
    fn test_cli_config_flag() {
        let cli =
            Cli::try_parse_from(["geogate", "-c", "/tmp/geogate.yaml", "8.8.8.8"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/tmp/geogate.yaml"));
    }

    #[test]
    fn test_cli_ignores_extra_arguments() {
        let cli =
            Cli::try_parse_from(["geogate", "203.0.113.9", "1", "sshd", "-x", "--user=root"])
                .unwrap();
        assert_eq!(cli.address.as_deref(), Some("203.0.113.9"));
        assert_eq!(cli.chained.as_deref(), Some("1"));
        assert_eq!(cli.extra, vec!["sshd", "-x", "--user=root"]);
    }

    #[test]
    fn test_cli_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["geogate", "-q", "-v", "8.8.8.8"]).is_err());
    }
}
