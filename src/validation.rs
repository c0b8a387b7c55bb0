//! Centralized validation functions for geogate.
//!
//! This module provides unified validation for:
//! - ISO 3166-1 alpha-2 country codes (and the `XX` unknown sentinel)
//! - Space-separated code lists as written in the configuration

use crate::error::GeogateError;

/// Code used when an address cannot be attributed to a country.
pub const UNKNOWN_COUNTRY: &str = "XX";

/// Check that a string has the shape of a country code (two ASCII letters).
///
/// # Examples
/// ```
/// use geogate::validation::is_valid_country_code;
/// assert!(is_valid_country_code("US"));
/// assert!(is_valid_country_code("gb"));
/// assert!(!is_valid_country_code("USA"));
/// assert!(!is_valid_country_code("1A"));
/// ```
pub fn is_valid_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Validate a country code and return its uppercase form.
///
/// # Examples
/// ```
/// use geogate::validation::normalize_country_code;
/// assert_eq!(normalize_country_code("cn").unwrap(), "CN");
/// assert!(normalize_country_code("").is_err());
/// ```
pub fn normalize_country_code(code: &str) -> Result<String, GeogateError> {
    let trimmed = code.trim();
    if !is_valid_country_code(trimmed) {
        return Err(GeogateError::InvalidCountryCode(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Split a whitespace-separated list of codes, normalizing each one.
///
/// # Examples
/// ```
/// use geogate::validation::parse_country_list;
/// assert_eq!(parse_country_list("cn  RU xx").unwrap(), vec!["CN", "RU", "XX"]);
/// assert!(parse_country_list("").unwrap().is_empty());
/// ```
pub fn parse_country_list(list: &str) -> Result<Vec<String>, GeogateError> {
    list.split_whitespace().map(normalize_country_code).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_codes() {
        assert!(is_valid_country_code("US"));
        assert!(is_valid_country_code("xx"));
        assert!(is_valid_country_code("Fr"));
    }

    #[test]
    fn test_invalid_codes() {
        assert!(!is_valid_country_code(""));
        assert!(!is_valid_country_code("U"));
        assert!(!is_valid_country_code("USA"));
        assert!(!is_valid_country_code("U1"));
        assert!(!is_valid_country_code("--"));
        // Non-ASCII letters are rejected even when the char count is two
        assert!(!is_valid_country_code("ÉS"));
    }

    #[test]
    fn test_normalize_trims_and_uppercases() {
        assert_eq!(normalize_country_code(" de ").unwrap(), "DE");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let err = normalize_country_code("China").unwrap_err();
        assert!(matches!(err, GeogateError::InvalidCountryCode(ref s) if s == "China"));
    }

    #[test]
    fn test_parse_country_list_stops_on_first_error() {
        assert!(parse_country_list("CN RUS").is_err());
    }

    #[test]
    fn test_unknown_sentinel_is_a_valid_code() {
        assert!(is_valid_country_code(UNKNOWN_COUNTRY));
    }
}
