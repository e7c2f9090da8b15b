//! The API client.
//!
//! [`AuthnetClient`] turns an [`ApiCall`] and its parameters into a request envelope, posts
//! it through a [`Transport`] and parses the answer into an [`AuthnetResponse`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use authnet_json::{ApiCall, AuthnetClient, Environment};
//! use serde_json::json;
//!
//! # async fn example() -> authnet_json::Result<()> {
//! let client = AuthnetClient::builder("5KP3u95bQpv", "346HZ32z3fP4hTG2")?
//!     .environment(Environment::Sandbox)
//!     .build()?;
//!
//! let exchange = client
//!     .invoke(
//!         ApiCall::CreateTransaction,
//!         &json!({
//!             "refId": "123456",
//!             "transactionRequest": {
//!                 "transactionType": "authCaptureTransaction",
//!                 "amount": "5.00",
//!                 "payment": {
//!                     "creditCard": {
//!                         "cardNumber": "4111111111111111",
//!                         "expirationDate": "2030-12",
//!                         "cardCode": "999"
//!                     }
//!                 }
//!             }
//!         }),
//!     )
//!     .await?;
//!
//! let response = exchange.response();
//! if response.is_approved() {
//!     println!("approved: {:?}", response.get_str("transactionResponse.transId"));
//! } else if response.is_error() {
//!     println!("{}: {}", response.error_code(), response.error_text());
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use tracing::instrument;

use crate::{
    api::ApiCall,
    config::{ClientConfig, Environment},
    error::{AuthnetError, Result},
    reliability::{RetryPolicy, retry_with_backoff},
    request::{Credentials, build_envelope, redact_envelope},
    response::AuthnetResponse,
    transport::{HttpConfig, HttpTransport, Transport, TransportFailure, http::validate_endpoint},
};

/// Result of one API call: the request that was sent and the parsed response.
#[derive(Debug, Clone)]
pub struct Exchange {
    request: String,
    response: AuthnetResponse,
}

impl Exchange {
    /// Returns the serialized request envelope, credentials included.
    ///
    /// Treat this value as secret. Log it only after masking `transactionKey`.
    #[must_use]
    pub fn raw_request(&self) -> &str {
        &self.request
    }

    /// Returns the parsed response.
    #[must_use]
    pub fn response(&self) -> &AuthnetResponse {
        &self.response
    }

    /// Consumes the exchange, returning the parsed response.
    #[must_use]
    pub fn into_response(self) -> AuthnetResponse {
        self.response
    }

    /// Consumes the exchange, returning the raw request and the parsed response.
    #[must_use]
    pub fn into_parts(self) -> (String, AuthnetResponse) {
        (self.request, self.response)
    }
}

/// Authorize.Net JSON API client.
///
/// The client holds no per-call state and can be shared between tasks.
#[derive(Debug)]
pub struct AuthnetClient<T = HttpTransport> {
    credentials: Credentials,
    endpoint: String,
    transport: T,
    retry_policy: RetryPolicy,
}

impl AuthnetClient {
    /// Starts building a client.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidCredentials`] if `login` or `transaction_key` is blank.
    pub fn builder(
        login: impl Into<String>,
        transaction_key: impl Into<String>,
    ) -> Result<AuthnetClientBuilder> {
        Ok(AuthnetClientBuilder::new(Credentials::new(login, transaction_key)?))
    }

    /// Creates a client for `environment` with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidCredentials`] if a credential is blank, or
    /// [`AuthnetError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        login: impl Into<String>,
        transaction_key: impl Into<String>,
        environment: Environment,
    ) -> Result<Self> {
        Self::builder(login, transaction_key)?.environment(environment).build()
    }

    /// Creates a client from configuration, reading credentials from the environment
    /// variables it names.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::Config`] if the configuration is invalid, or
    /// [`AuthnetError::InvalidCredentials`] if the credential variables are unset or blank.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let credentials = config.credentials_from_env()?;

        let mut builder = AuthnetClientBuilder::new(credentials)
            .environment(config.environment)
            .retry_policy(RetryPolicy::with_max_attempts(config.max_attempts))
            .http_config(config.http.clone());
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint(endpoint.clone());
        }
        builder.build()
    }
}

impl<T: Transport> AuthnetClient<T> {
    /// Sends an API call.
    ///
    /// `params` must serialize to a JSON object (or `null` for calls without parameters).
    /// Credentials are added by the client; a `merchantAuthentication` key in `params` is
    /// ignored.
    ///
    /// The POST is retried only when the transport fails to obtain a response. Any answer
    /// from the gateway, including an HTTP error status, ends the retry loop.
    ///
    /// # Errors
    ///
    /// - [`AuthnetError::InvalidParameters`] if `params` cannot be turned into a request
    /// - [`AuthnetError::Connection`] if every attempt failed at the transport level
    /// - [`AuthnetError::InvalidJson`] if the response body is not a JSON object
    #[instrument(skip(self, call, params), fields(call = %call, endpoint = %self.endpoint, protocol = self.transport.protocol_name()))]
    pub async fn invoke<P>(&self, call: ApiCall, params: &P) -> Result<Exchange>
    where
        P: Serialize + ?Sized,
    {
        let params = serde_json::to_value(params)
            .map_err(|e| AuthnetError::InvalidParameters(format!("cannot serialize parameters: {e}")))?;
        let envelope = build_envelope(call, &self.credentials, params)?;
        let request = envelope.to_string();

        tracing::debug!(request = %redact_envelope(&envelope), "sending API request");

        let transport = &self.transport;
        let endpoint = self.endpoint.as_str();
        let body = request.as_bytes();
        let response = retry_with_backoff(&self.retry_policy, move || transport.post(endpoint, body))
            .await
            .map_err(|TransportFailure { code, message }| AuthnetError::Connection { message, code })?;

        tracing::debug!(status = response.status, body_len = response.body.len(), "received API response");

        let response = AuthnetResponse::from_bytes(&response.body)?;
        tracing::info!(
            result_code = response.result_code().unwrap_or_default(),
            "API call completed"
        );

        Ok(Exchange { request, response })
    }

    /// Sends an API call given by its wire name, e.g. `"getMerchantDetailsRequest"`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidParameters`] if `name` is not a known API call, plus
    /// every error of [`invoke`](Self::invoke).
    pub async fn invoke_named<P>(&self, name: &str, params: &P) -> Result<Exchange>
    where
        P: Serialize + ?Sized,
    {
        let call: ApiCall = name.parse()?;
        self.invoke(call, params).await
    }

    /// Returns the endpoint URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the merchant credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Builder for [`AuthnetClient`].
#[derive(Debug, Clone)]
#[must_use]
pub struct AuthnetClientBuilder {
    credentials: Credentials,
    environment: Environment,
    endpoint: Option<String>,
    retry_policy: RetryPolicy,
    http_config: HttpConfig,
}

impl AuthnetClientBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            environment: Environment::default(),
            endpoint: None,
            retry_policy: RetryPolicy::default(),
            http_config: HttpConfig::default(),
        }
    }

    /// Selects the server environment (default: production).
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Posts to a custom endpoint URL instead of the environment's.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the retry policy (default: 3 attempts with exponential backoff).
    pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Sets HTTP transport settings used by [`build`](Self::build).
    pub fn http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Builds a client with the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidServer`] if the endpoint is not an acceptable HTTPS URL,
    /// or [`AuthnetError::Transport`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<AuthnetClient> {
        let transport = HttpTransport::with_config(&self.http_config)?;
        self.build_with_transport(transport)
    }

    /// Builds a client that posts through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidServer`] if the endpoint is not an acceptable HTTPS URL.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<AuthnetClient<T>> {
        let endpoint = self.endpoint.unwrap_or_else(|| self.environment.endpoint().to_owned());
        validate_endpoint(&endpoint).map_err(|e| AuthnetError::InvalidServer(e.to_string()))?;

        Ok(AuthnetClient {
            credentials: self.credentials,
            endpoint,
            transport,
            retry_policy: self.retry_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicU32, Ordering},
    };

    use serde_json::{Value, json};

    use super::*;
    use crate::transport::TransportResponse;

    #[derive(Debug, Default)]
    struct Recording {
        calls: AtomicU32,
        last_body: Mutex<Vec<u8>>,
    }

    impl Transport for Recording {
        async fn post<'a>(
            &'a self,
            _url: &'a str,
            body: &'a [u8],
        ) -> std::result::Result<TransportResponse, TransportFailure> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            *self.last_body.lock().unwrap() = body.to_vec();
            Ok(TransportResponse {
                status: 200,
                body: br#"{"messages":{"resultCode":"Ok","message":[{"code":"I00001","text":"Successful."}]}}"#
                    .to_vec(),
            })
        }

        fn protocol_name(&self) -> &'static str {
            "recording"
        }
    }

    fn client() -> AuthnetClient<Recording> {
        AuthnetClient::builder("login-id", "secret-key")
            .unwrap()
            .environment(Environment::Sandbox)
            .build_with_transport(Recording::default())
            .unwrap()
    }

    #[test]
    fn test_builder_rejects_blank_credentials() {
        assert!(matches!(AuthnetClient::builder("", "key"), Err(AuthnetError::InvalidCredentials(_))));
        assert!(matches!(AuthnetClient::builder("login", " "), Err(AuthnetError::InvalidCredentials(_))));
    }

    #[test]
    fn test_builder_environment_endpoint() {
        assert_eq!(client().endpoint(), Environment::Sandbox.endpoint());

        let client = AuthnetClient::builder("login-id", "secret-key")
            .unwrap()
            .build_with_transport(Recording::default())
            .unwrap();
        assert_eq!(client.endpoint(), Environment::Production.endpoint());
    }

    #[test]
    fn test_builder_custom_endpoint() {
        let client = AuthnetClient::builder("login-id", "secret-key")
            .unwrap()
            .endpoint("https://gateway.example.com/xml/v1/request.api")
            .build_with_transport(Recording::default())
            .unwrap();
        assert_eq!(client.endpoint(), "https://gateway.example.com/xml/v1/request.api");
    }

    #[test]
    fn test_builder_rejects_insecure_endpoint() {
        for endpoint in ["http://gateway.example.com/api", "https://localhost/api", "nope"] {
            let result = AuthnetClient::builder("login-id", "secret-key")
                .unwrap()
                .endpoint(endpoint)
                .build_with_transport(Recording::default());
            assert!(matches!(result, Err(AuthnetError::InvalidServer(_))), "{endpoint}");
        }
    }

    #[test]
    fn test_build_with_http_transport() {
        let client = AuthnetClient::new("login-id", "secret-key", Environment::Cdn).unwrap();
        assert_eq!(client.endpoint(), Environment::Cdn.endpoint());
        assert_eq!(client.transport().protocol_name(), "http");
    }

    #[test]
    fn test_client_debug_redacts_key() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("login-id"));
        assert!(!debug.contains("secret-key"));
    }

    #[tokio::test]
    async fn test_invoke_returns_request_and_response() {
        let client = client();

        let exchange = client.invoke(ApiCall::AuthenticateTest, &Value::Null).await.unwrap();

        assert!(exchange.response().is_successful());
        assert_eq!(
            exchange.raw_request(),
            r#"{"authenticateTestRequest":{"merchantAuthentication":{"name":"login-id","transactionKey":"secret-key"}}}"#
        );
        assert_eq!(
            client.transport().last_body.lock().unwrap().as_slice(),
            exchange.raw_request().as_bytes()
        );
        assert_eq!(client.transport().calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_invoke_with_struct_params() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GetTransactionDetails<'a> {
            trans_id: &'a str,
        }

        let exchange = client()
            .invoke(ApiCall::GetTransactionDetails, &GetTransactionDetails { trans_id: "2162566217" })
            .await
            .unwrap();

        let (request, response) = exchange.into_parts();
        assert!(request.ends_with(r#""transId":"2162566217"}}"#));
        assert!(response.is_successful());
    }

    #[tokio::test]
    async fn test_invoke_rejects_non_object_params() {
        let client = client();

        let result = client.invoke(ApiCall::CreateTransaction, &json!(["a", "b"])).await;

        assert!(matches!(result, Err(AuthnetError::InvalidParameters(_))));
        assert_eq!(client.transport().calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_invoke_named() {
        let client = client();

        let exchange = client.invoke_named("getMerchantDetailsRequest", &json!({})).await.unwrap();
        assert!(exchange.raw_request().starts_with(r#"{"getMerchantDetailsRequest":"#));

        let result = client.invoke_named("noSuchRequest", &json!({})).await;
        assert!(matches!(result, Err(AuthnetError::InvalidParameters(_))));
    }
}
