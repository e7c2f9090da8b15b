//! Transport abstraction for posting request envelopes.
//!
//! The client never talks to the network directly. It hands the serialized envelope to a
//! [`Transport`], which reports either a response body or a transport-level failure. Only
//! the latter is retried.
//!
//! [`HttpTransport`] is the production implementation. Tests and callers with special
//! networking needs can provide their own.
//!
//! # Examples
//!
//! A transport that answers every request with a canned body:
//!
//! ```
//! use authnet_json::transport::{Transport, TransportFailure, TransportResponse};
//!
//! #[derive(Debug)]
//! struct Canned(&'static str);
//!
//! impl Transport for Canned {
//!     async fn post<'a>(
//!         &'a self,
//!         _url: &'a str,
//!         _body: &'a [u8],
//!     ) -> Result<TransportResponse, TransportFailure> {
//!         Ok(TransportResponse { status: 200, body: self.0.as_bytes().to_vec() })
//!     }
//!
//!     fn protocol_name(&self) -> &'static str {
//!         "canned"
//!     }
//! }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

pub mod config;
pub mod http;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// Response from a transport that completed the exchange.
///
/// Any HTTP status counts as completed; the status is kept for diagnostics only.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

/// Transport-level failure of a single POST attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportFailure {
    /// Transport-specific error code, if the transport has one.
    pub code: Option<i64>,
    /// Human-readable failure description.
    pub message: String,
}

impl TransportFailure {
    /// Creates a failure with a message and no code.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, message: message.into() }
    }

    /// Creates a failure with a message and a code.
    #[must_use]
    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self { code: Some(code), message: message.into() }
    }
}

/// Posts a request body to a URL.
///
/// Implementations return `Err` only when the exchange itself failed (DNS, connect, TLS,
/// timeout, broken body). A response with any HTTP status is `Ok`.
pub trait Transport: Send + Sync {
    /// Posts `body` to `url` with a JSON content type.
    ///
    /// # Errors
    ///
    /// Returns [`TransportFailure`] if no response could be obtained.
    fn post<'a>(
        &'a self,
        url: &'a str,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse, TransportFailure>> + Send + 'a;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}

impl<T: Transport> Transport for Arc<T> {
    fn post<'a>(
        &'a self,
        url: &'a str,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse, TransportFailure>> + Send + 'a {
        (**self).post(url, body)
    }

    fn protocol_name(&self) -> &'static str {
        (**self).protocol_name()
    }
}
