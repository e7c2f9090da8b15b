//! authnet-json: a client for the Authorize.Net JSON API
//!
//! Every Authorize.Net API call is a POST of a JSON document keyed by the call name, with the
//! merchant's credentials merged in. This crate builds that document, posts it with bounded
//! retries, and wraps the answer in a response type that knows how to read the gateway's
//! loosely structured payloads.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐
//! │   Your code        │  ApiCall + serde-serializable parameters
//! └─────────┬──────────┘
//!           │ invoke()
//! ┌─────────▼──────────────────────────────────────┐
//! │           AuthnetClient (this crate)           │
//! │  ┌──────────────┐    ┌─────────────────────┐   │
//! │  │  Envelope    │────│  Retry (3 attempts, │   │
//! │  │  + creds     │    │  transport errors)  │   │
//! │  └──────────────┘    └──────────┬──────────┘   │
//! │                      ┌──────────▼──────────┐   │
//! │                      │  Transport (reqwest)│   │
//! │                      └──────────┬──────────┘   │
//! └─────────────────────────────────┼──────────────┘
//!           ▲ AuthnetResponse       │ HTTPS POST
//! ┌─────────┴──────────┐  ┌─────────▼──────────┐
//! │  Exchange          │◄─│  Authorize.Net     │
//! └────────────────────┘  └────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use authnet_json::{ApiCall, AuthnetClient, Environment};
//! use serde_json::json;
//!
//! # async fn example() -> authnet_json::Result<()> {
//! let client = AuthnetClient::new("5KP3u95bQpv", "346HZ32z3fP4hTG2", Environment::Sandbox)?;
//!
//! let exchange = client
//!     .invoke(
//!         ApiCall::CreateCustomerProfile,
//!         &json!({
//!             "profile": {
//!                 "merchantCustomerId": "12345",
//!                 "email": "user@example.com",
//!                 "paymentProfiles": {
//!                     "billTo": { "firstName": "John", "lastName": "Smith" },
//!                     "payment": {
//!                         "creditCard": { "cardNumber": "4111111111111111", "expirationDate": "2030-12" }
//!                     }
//!                 }
//!             },
//!             "validationMode": "liveMode"
//!         }),
//!     )
//!     .await?;
//!
//! let response = exchange.response();
//! if response.is_successful() {
//!     println!("profile: {:?}", response.get_str("customerProfileId"));
//!     for result in response.transaction_responses() {
//!         println!("validation: {:?}", result.field("ResponseReasonText"));
//!     }
//! } else {
//!     println!("{}: {}", response.error_code(), response.error_text());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the client, its builder and the per-call [`Exchange`]
//! - [`api`]: supported API call names
//! - [`request`]: credentials and request envelopes
//! - [`response`]: response parsing and status checks
//! - [`config`]: server environments and TOML configuration
//! - [`transport`]: transport abstraction and the reqwest implementation
//! - [`reliability`]: retry with exponential backoff
//! - [`error`]: error types
//!
//! # Error Handling
//!
//! Calls return [`Result<T, AuthnetError>`](error::Result) for failures of the exchange
//! itself. A declined card or a gateway-reported error is a successful call: inspect the
//! response.
//!
//! ```rust,no_run
//! use authnet_json::{ApiCall, AuthnetClient, AuthnetError, Environment};
//! use serde_json::Value;
//!
//! # async fn example() -> authnet_json::Result<()> {
//! let client = AuthnetClient::new("5KP3u95bQpv", "346HZ32z3fP4hTG2", Environment::Sandbox)?;
//!
//! match client.invoke(ApiCall::AuthenticateTest, &Value::Null).await {
//!     Ok(exchange) if exchange.response().is_error() => {
//!         eprintln!("rejected: {}", exchange.response().error_text());
//!     }
//!     Ok(_) => println!("credentials accepted"),
//!     Err(AuthnetError::Connection { message, .. }) => eprintln!("gateway unreachable: {message}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod reliability;
pub mod request;
pub mod response;
pub mod transport;

pub use api::ApiCall;
pub use client::{AuthnetClient, AuthnetClientBuilder, Exchange};
pub use config::{ClientConfig, Environment};
pub use error::{AuthnetError, Result};
pub use request::Credentials;
pub use response::AuthnetResponse;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _ = std::marker::PhantomData::<(AuthnetClient, AuthnetResponse, AuthnetError)>;
        assert_eq!(ApiCall::AuthenticateTest.as_str(), "authenticateTestRequest");
    }
}
