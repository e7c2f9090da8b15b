//! Error types for the Authorize.Net client.
//!
//! All errors implement [`std::error::Error`] via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Network Errors** ([`AuthnetError::Connection`]): every POST attempt failed at the
//!   transport level
//! - **Response Errors** ([`AuthnetError::InvalidJson`],
//!   [`AuthnetError::TransactionResponseCall`]): the API answered with something that cannot
//!   be read the way the caller asked
//! - **Usage Errors** ([`AuthnetError::InvalidParameters`],
//!   [`AuthnetError::InvalidCredentials`], [`AuthnetError::InvalidServer`]): the request or
//!   client was built incorrectly
//! - **Setup Errors** ([`AuthnetError::Config`], [`AuthnetError::Transport`]): configuration
//!   or HTTP client construction failed
//!
//! Business-level failures (declines, `resultCode = "Error"`) are *not* errors of this type.
//! They arrive as a successfully parsed [`AuthnetResponse`](crate::AuthnetResponse) and are
//! inspected with [`is_error`](crate::AuthnetResponse::is_error).
//!
//! # Examples
//!
//! ```
//! use authnet_json::error::{AuthnetError, Result};
//!
//! fn require_login(login: &str) -> Result<&str> {
//!     if login.is_empty() {
//!         return Err(AuthnetError::InvalidCredentials("API login ID is empty".to_owned()));
//!     }
//!     Ok(login)
//! }
//!
//! assert!(require_login("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AuthnetError>;

/// Errors that can occur while talking to the Authorize.Net JSON API.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum AuthnetError {
    /// Every POST attempt failed at the transport level.
    ///
    /// Carries the message and code of the last failed attempt. Only connection-level
    /// failures produce this error; an HTTP error status with a body does not.
    ///
    /// # Recovery
    ///
    /// Check network connectivity and the endpoint URL. The call may be retried, but note
    /// that a transaction request may have reached the gateway before the connection broke.
    #[error("Connection error: {message} ({})", .code.map_or_else(String::new, |c| c.to_string()))]
    Connection {
        /// Message reported by the transport on the last attempt.
        message: String,
        /// Transport-specific error code of the last attempt, if any.
        code: Option<i64>,
    },

    /// The API returned a body that is not valid JSON.
    #[error("Invalid JSON returned by the API: {0}")]
    InvalidJson(String),

    /// The call parameters cannot be sent.
    ///
    /// Raised when the parameters do not serialize to a JSON object or when an API call name
    /// is not recognized.
    #[error("Invalid API call parameters: {0}")]
    InvalidParameters(String),

    /// Transaction data was requested from a response that carries none.
    #[error("This API call does not have any transaction response data: {0}")]
    TransactionResponseCall(String),

    /// The API login ID or transaction key is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use authnet_json::error::AuthnetError;
    ///
    /// let err = AuthnetError::InvalidCredentials("transaction key is empty".to_owned());
    /// assert!(err.to_string().contains("Invalid credentials"));
    /// ```
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The requested server environment does not exist, or a custom endpoint URL was
    /// rejected.
    #[error("Invalid server: {0}")]
    InvalidServer(String),

    /// Client configuration could not be read or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The HTTP transport could not be built or rejected the endpoint.
    #[error("Transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_display() {
        let error = AuthnetError::Connection {
            message: "Could not resolve host".to_owned(),
            code: Some(6),
        };
        assert_eq!(error.to_string(), "Connection error: Could not resolve host (6)");
    }

    #[test]
    fn test_connection_error_display_without_code() {
        let error = AuthnetError::Connection { message: "timed out".to_owned(), code: None };
        assert_eq!(error.to_string(), "Connection error: timed out ()");
    }

    #[test]
    fn test_invalid_json_error() {
        let error = AuthnetError::InvalidJson("expected value at line 1".to_owned());
        assert!(error.to_string().starts_with("Invalid JSON returned by the API"));
    }

    #[test]
    fn test_transaction_response_call_error() {
        let error = AuthnetError::TransactionResponseCall("getSettledBatchListRequest".to_owned());
        assert!(error.to_string().contains("does not have any transaction response data"));
    }

    #[test]
    fn test_invalid_server_error() {
        let error = AuthnetError::InvalidServer("endpoint must use HTTPS".to_owned());
        assert_eq!(error.to_string(), "Invalid server: endpoint must use HTTPS");
    }

    #[test]
    fn test_invalid_parameters_error() {
        let error = AuthnetError::InvalidParameters("params must be an object".to_owned());
        assert_eq!(error.to_string(), "Invalid API call parameters: params must be an object");
    }
}
