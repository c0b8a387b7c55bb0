//! IP-to-country resolution through the GeoIP lookup programs.
//!
//! `geoiplookup` and `geoiplookup6` print a single line per database, e.g.
//!
//! ```text
//! GeoIP Country Edition: US, United States
//! GeoIP Country V6 Edition: IP Address not found
//! ```
//!
//! A missing program is a normal state ([`Resolution::Unavailable`]), not an
//! error: the gate fails open on it.

use std::ffi::{OsStr, OsString};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::classify::AddressFamily;
use crate::cmd_abstraction::{CommandExecutor, RealCommandExecutor};
use crate::config::ResolverConfig;
use crate::error::GeogateError;
use crate::validation::{is_valid_country_code, UNKNOWN_COUNTRY};

#[cfg(test)]
use mockall::automock;

/// Marker the lookup programs print when the address is not in the database
const NOT_FOUND_MARKER: &str = "IP Address not found";

/// Outcome of one lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No lookup program for this family; nothing was resolved
    Unavailable,
    /// The program ran but could not attribute the address
    Unknown,
    /// Uppercase two-letter country code
    Country(String),
}

impl Resolution {
    /// The code this outcome is evaluated as (`XX` unless a country was found)
    pub fn country_code(&self) -> &str {
        match self {
            Resolution::Country(code) => code,
            Resolution::Unknown | Resolution::Unavailable => UNKNOWN_COUNTRY,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Resolution::Unavailable)
    }
}

/// Source of country codes, one variant per address family
#[cfg_attr(test, automock)]
pub trait CountryResolver {
    fn resolve(&self, family: AddressFamily, address: &str) -> Resolution;
}

/// Resolver backed by the `geoiplookup`/`geoiplookup6` command line tools
pub struct GeoIpLookupResolver<E: CommandExecutor = RealCommandExecutor> {
    ipv4: String,
    ipv6: String,
    search_path: Option<OsString>,
    executor: E,
}

impl GeoIpLookupResolver<RealCommandExecutor> {
    /// Resolver using the configured programs and the process `PATH`
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::with_executor(config, std::env::var_os("PATH"), RealCommandExecutor::new())
    }
}

impl<E: CommandExecutor> GeoIpLookupResolver<E> {
    pub fn with_executor(
        config: &ResolverConfig,
        search_path: Option<OsString>,
        executor: E,
    ) -> Self {
        Self {
            ipv4: config.ipv4.clone(),
            ipv6: config.ipv6.clone(),
            search_path,
            executor,
        }
    }

    fn program_for(&self, family: AddressFamily) -> &str {
        match family {
            AddressFamily::V4 => &self.ipv4,
            AddressFamily::V6 => &self.ipv6,
        }
    }

    fn run_lookup(&self, program: &Path, address: &str) -> Result<String, GeogateError> {
        let output = self
            .executor
            .execute(program, &[address.to_string()])
            .map_err(|e| GeogateError::ResolverSpawn {
                program: program.to_path_buf(),
                source: e
                    .downcast::<std::io::Error>()
                    .unwrap_or_else(|e| std::io::Error::other(e.to_string())),
            })?;

        if !output.success {
            debug!(
                "{} exited with {:?}: {}",
                program.display(),
                output.code,
                output.stderr.trim()
            );
        }

        Ok(output.stdout)
    }
}

impl<E: CommandExecutor> CountryResolver for GeoIpLookupResolver<E> {
    fn resolve(&self, family: AddressFamily, address: &str) -> Resolution {
        let name = self.program_for(family);
        let Some(program) = find_program(name, self.search_path.as_deref()) else {
            debug!("{} resolver {:?} is not installed", family, name);
            return Resolution::Unavailable;
        };

        match self.run_lookup(&program, address) {
            Ok(stdout) => parse_lookup_output(&stdout),
            Err(e) => {
                warn!("{}", e);
                Resolution::Unavailable
            }
        }
    }
}

/// Parse the first line of lookup output into a resolution.
///
/// Anything that does not yield a two-letter code degrades to
/// [`Resolution::Unknown`].
///
/// # Examples
/// ```
/// use geogate::resolver::{parse_lookup_output, Resolution};
/// assert_eq!(
///     parse_lookup_output("Country Edition: US, United States"),
///     Resolution::Country("US".to_string())
/// );
/// assert_eq!(parse_lookup_output("IP Address not found"), Resolution::Unknown);
/// ```
pub fn parse_lookup_output(output: &str) -> Resolution {
    let line = output.lines().next().unwrap_or_default();

    if line.contains(NOT_FOUND_MARKER) {
        return Resolution::Unknown;
    }

    let code = line
        .split_once(':')
        .map(|(_, rest)| rest.split(',').next().unwrap_or_default().trim())
        .unwrap_or_default();

    if is_valid_country_code(code) {
        Resolution::Country(code.to_ascii_uppercase())
    } else {
        Resolution::Unknown
    }
}

/// Locate an executable by name.
///
/// Names containing a `/` are checked as given; bare names are searched in
/// `search_path` (a `PATH`-style list).
pub fn find_program(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    if name.contains('/') {
        let path = PathBuf::from(name);
        return is_executable(&path).then_some(path);
    }

    std::env::split_paths(search_path?)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
