//! Error types for geogate.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeogateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid country code: {0:?}")]
    InvalidCountryCode(String),

    #[error("Failed to run resolver {program:?}: {source}")]
    ResolverSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Notification sink error: {0}")]
    Notify(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_country_code_message() {
        let err = GeogateError::InvalidCountryCode("USA".to_string());
        assert_eq!(err.to_string(), "Invalid country code: \"USA\"");
    }

    #[test]
    fn test_resolver_spawn_keeps_source() {
        let err = GeogateError::ResolverSpawn {
            program: PathBuf::from("/usr/bin/geoiplookup"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/usr/bin/geoiplookup"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
