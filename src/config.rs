//! Configuration management for geogate.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::error::GeogateError;
use crate::validation::{normalize_country_code, parse_country_list};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/geogate/config.yaml";

/// Default location of the durable decision log
pub const DEFAULT_LOG_FILE: &str = "/var/log/geogate.log";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How `country_codes` is interpreted
    pub mode: PolicyMode,

    /// Country codes the mode applies to (uppercase, `XX` = unknown)
    #[serde(deserialize_with = "deserialize_country_codes")]
    pub country_codes: Vec<String>,

    /// Service name used in notification lines
    pub service: String,

    /// Lookup programs per address family
    pub resolver: ResolverConfig,

    /// Durable log destination
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: PolicyMode::DenyListed,
            country_codes: Vec::new(),
            service: "sshd".to_string(),
            resolver: ResolverConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the configuration, or fall back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), GeogateError> {
        for code in &self.country_codes {
            normalize_country_code(code)?;
        }

        if self.service.trim().is_empty() {
            return Err(GeogateError::Config("service name cannot be empty".into()));
        }

        if self.resolver.ipv4.trim().is_empty() || self.resolver.ipv6.trim().is_empty() {
            return Err(GeogateError::Config(
                "resolver program names cannot be empty".into(),
            ));
        }

        if !self.log.syslog && self.log.file.as_os_str().is_empty() {
            return Err(GeogateError::Config(
                "log.file must be set when syslog is disabled".into(),
            ));
        }

        Ok(())
    }
}

/// Policy mode: whether the configured codes are the only ones let in,
/// or the ones kept out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMode {
    /// Only listed countries are allowed
    #[serde(alias = "ALLOW_LISTED", alias = "allow")]
    AllowListed,
    /// Listed countries are denied, everything else allowed
    #[default]
    #[serde(alias = "DENY_LISTED", alias = "deny")]
    DenyListed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Program used for IPv4 (and unclassified) addresses
    pub ipv4: String,
    /// Program used for IPv6 addresses
    pub ipv6: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ipv4: "geoiplookup".to_string(),
            ipv6: "geoiplookup6".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Append-only decision log
    pub file: PathBuf,
    /// Send lines to syslog through logger(1) instead of the file
    pub syslog: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
            syslog: false,
        }
    }
}

/// Accept codes either as a space-separated string or as a YAML list,
/// normalizing them to uppercase.
fn deserialize_country_codes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Codes {
        Spaced(String),
        List(Vec<String>),
    }

    let codes = match Option::<Codes>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Codes::Spaced(s)) => parse_country_list(&s).map_err(serde::de::Error::custom)?,
        Some(Codes::List(list)) => list
            .iter()
            .map(|c| normalize_country_code(c))
            .collect::<Result<_, _>>()
            .map_err(serde::de::Error::custom)?,
    };

    Ok(codes)
}
