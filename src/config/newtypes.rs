//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated API base URL.
///
/// This newtype ensures the base URL uses an `http` or `https` scheme and has
/// a non-empty host. A trailing slash is stripped so paths can be appended
/// uniformly. All API routes are rooted at `<base_url>/api`.
///
/// # Example
///
/// ```rust
/// use workforce_api::BaseUrl;
///
/// let url = BaseUrl::new("https://hr.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://hr.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not start with
    /// `http://` or `https://`, or has an empty host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));

        let valid = rest.is_some_and(|rest| {
            let host = rest.split('/').next().unwrap_or_default();
            !host.is_empty()
        });

        if !valid {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed.trim_end_matches('/').to_string()))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_accepts_https() {
        let url = BaseUrl::new("https://hr.example.com").unwrap();
        assert_eq!(url.as_ref(), "https://hr.example.com");
    }

    #[test]
    fn test_base_url_accepts_http_with_port() {
        let url = BaseUrl::new("http://localhost:8000").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8000");
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://hr.example.com/").unwrap();
        assert_eq!(url.as_ref(), "https://hr.example.com");
    }

    #[test]
    fn test_base_url_rejects_missing_scheme() {
        assert!(matches!(
            BaseUrl::new("hr.example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_base_url_rejects_empty_host() {
        assert!(matches!(
            BaseUrl::new("https://"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            BaseUrl::new(""),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_base_url_display_matches_value() {
        let url = BaseUrl::new("https://hr.example.com").unwrap();
        assert_eq!(url.to_string(), "https://hr.example.com");
    }
}
