//! HTTPS transport implementation.
//!
//! Posts request envelopes with reqwest. Any HTTP status is handed back to the caller as a
//! completed exchange; only failures to obtain a response become [`TransportFailure`].

use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use tracing::instrument;
use url::Url;

use super::config::{HttpConfig, HttpVersion};
use crate::{
    error::{AuthnetError, Result},
    transport::{Transport, TransportFailure, TransportResponse},
};

/// Validates an API endpoint URL.
///
/// The endpoint must parse, use HTTPS, and not point to localhost.
///
/// # Errors
///
/// Returns [`AuthnetError::Transport`] if any check fails.
///
/// # Examples
///
/// ```
/// use authnet_json::transport::http::validate_endpoint;
///
/// assert!(validate_endpoint("https://apitest.authorize.net/xml/v1/request.api").is_ok());
/// assert!(validate_endpoint("http://apitest.authorize.net/xml/v1/request.api").is_err());
/// ```
pub fn validate_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| AuthnetError::Transport(format!("invalid endpoint '{endpoint}': {e}")))?;

    if url.scheme() != "https" {
        return Err(AuthnetError::Transport("Only HTTPS endpoints are allowed".to_owned()));
    }

    match url.host_str() {
        None => {
            return Err(AuthnetError::Transport(format!("endpoint missing host: {endpoint}")));
        }
        Some(host)
            if host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]" =>
        {
            return Err(AuthnetError::Transport("Localhost endpoints are not allowed".to_owned()));
        }
        Some(_) => {}
    }

    Ok(url)
}

impl From<reqwest::Error> for TransportFailure {
    fn from(error: reqwest::Error) -> Self {
        Self {
            code: error.status().map(|status| i64::from(status.as_u16())),
            message: error.to_string(),
        }
    }
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// # Examples
///
/// ```
/// use authnet_json::transport::{HttpConfig, HttpTransport, HttpVersion, Transport};
///
/// let config = HttpConfig { http_version: HttpVersion::Http1, ..Default::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// assert_eq!(transport.protocol_name(), "http/1.1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built (e.g. TLS backend failure).
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates HTTP transport with custom configuration.
    ///
    /// The configuration is validated first.
    ///
    /// # Errors
    ///
    /// Returns error if validation or HTTP client creation fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder
            .build()
            .map_err(|e| AuthnetError::Transport(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client, http_version: config.http_version })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, body), fields(body_len = body.len(), protocol = self.protocol_name()))]
    async fn post<'a>(
        &'a self,
        url: &'a str,
        body: &'a [u8],
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body.to_vec())
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            tracing::debug!(status, "endpoint answered with non-success status");
        }

        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse { status, body })
    }

    fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Http2 => "http/2",
            HttpVersion::Auto => "http",
        }
    }
}
