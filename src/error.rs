//! Error types for the Workforce API SDK.
//!
//! This module contains the configuration error type and the failure
//! taxonomy surfaced by [`ApiClient`](crate::ApiClient) methods.
//!
//! # Error Handling
//!
//! Configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. API calls return `Result<T, ApiError>`, where the
//! variant tells the caller whether the failure was a rejected login, an
//! expired session, a transport problem, or a server-side error. Messages
//! carry the server-provided `detail`/`error` text when present, and a fixed
//! per-operation fallback otherwise.
//!
//! # Example
//!
//! ```rust
//! use workforce_api::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not-a-url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// Unified error type for API operations.
///
/// Authentication and session failures are handled centrally by the client's
/// request interceptor; callers receive the final outcome through one of
/// these variants. Use pattern matching to react to specific failures.
///
/// # Example
///
/// ```rust,ignore
/// use workforce_api::ApiError;
///
/// match client.list_companies().await {
///     Ok(companies) => { /* render */ }
///     Err(ApiError::SessionExpired(msg)) => { /* redirect to login */ }
///     Err(ApiError::Server { status, message }) => {
///         eprintln!("API error {status}: {message}");
///     }
///     Err(other) => eprintln!("{other}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login was rejected by the server.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The session could not be refreshed, or an already-retried request was
    /// rejected again.
    #[error("{0}")]
    SessionExpired(String),

    /// Network or connection error, distinct from an HTTP error response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A non-2xx, non-401 response from the server.
    #[error("{message}")]
    Server {
        /// The HTTP status code of the response.
        status: u16,
        /// The server-provided message, or a fixed per-operation fallback.
        message: String,
    },

    /// Client-side validation failed before the request was sent.
    #[error("{0}")]
    Validation(String),

    /// The response body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns `true` if this error means the caller should treat the user
    /// as logged out.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }
}
