//! Merchant credentials and request envelopes.
//!
//! Every request body has the same shape: a single top-level key naming the API call,
//! whose value holds `merchantAuthentication` followed by the call parameters.
//!
//! ```json
//! {
//!   "createTransactionRequest": {
//!     "merchantAuthentication": { "name": "...", "transactionKey": "..." },
//!     "refId": "123456",
//!     "transactionRequest": { ... }
//!   }
//! }
//! ```

use std::fmt;

use serde_json::{Map, Value, json};
use zeroize::Zeroizing;

use crate::{
    api::ApiCall,
    error::{AuthnetError, Result},
};

/// Key under which credentials are merged into every call.
pub const MERCHANT_AUTHENTICATION: &str = "merchantAuthentication";

const REDACTED: &str = "[REDACTED]";

/// API login ID and transaction key.
///
/// Credentials cannot be changed once built. The transaction key is wiped from memory when
/// the value is dropped and never appears in `Debug` output.
///
/// # Examples
///
/// ```
/// use authnet_json::Credentials;
///
/// let credentials = Credentials::new("5KP3u95bQpv", "346HZ32z3fP4hTG2").unwrap();
/// assert_eq!(credentials.login(), "5KP3u95bQpv");
/// assert!(!format!("{credentials:?}").contains("346HZ32z3fP4hTG2"));
///
/// assert!(Credentials::new("", "346HZ32z3fP4hTG2").is_err());
/// ```
#[derive(Clone)]
pub struct Credentials {
    login: String,
    transaction_key: Zeroizing<String>,
}

impl Credentials {
    /// Creates credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidCredentials`] if either value is empty or only
    /// whitespace.
    pub fn new(login: impl Into<String>, transaction_key: impl Into<String>) -> Result<Self> {
        let login = login.into();
        let transaction_key = Zeroizing::new(transaction_key.into());

        if login.trim().is_empty() {
            return Err(AuthnetError::InvalidCredentials("API login ID is empty".to_owned()));
        }
        if transaction_key.trim().is_empty() {
            return Err(AuthnetError::InvalidCredentials("transaction key is empty".to_owned()));
        }

        Ok(Self { login, transaction_key })
    }

    /// Returns the API login ID.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    pub(crate) fn transaction_key(&self) -> &str {
        &self.transaction_key
    }

    fn to_json(&self) -> Value {
        json!({ "name": self.login, "transactionKey": self.transaction_key() })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("transaction_key", &REDACTED)
            .finish()
    }
}

/// Builds the request envelope for `call`.
///
/// `params` must be a JSON object, or `null` for calls without parameters. Its keys keep
/// their order after `merchantAuthentication`. The client's credentials always win: a
/// `merchantAuthentication` key in `params` is dropped.
///
/// # Errors
///
/// Returns [`AuthnetError::InvalidParameters`] if `params` is neither an object nor `null`.
pub fn build_envelope(call: ApiCall, credentials: &Credentials, params: Value) -> Result<Value> {
    let params = match params {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        other => {
            return Err(AuthnetError::InvalidParameters(format!(
                "parameters for {call} must be a JSON object, got {other}"
            )));
        }
    };

    let mut body = Map::with_capacity(params.len() + 1);
    body.insert(MERCHANT_AUTHENTICATION.to_owned(), credentials.to_json());
    for (key, value) in params {
        if key == MERCHANT_AUTHENTICATION {
            tracing::warn!(%call, "ignoring caller-supplied merchantAuthentication");
            continue;
        }
        body.insert(key, value);
    }

    let mut envelope = Map::with_capacity(1);
    envelope.insert(call.as_str().to_owned(), Value::Object(body));
    Ok(Value::Object(envelope))
}

/// Returns a copy of `envelope` with the transaction key masked, for logging.
#[must_use]
pub fn redact_envelope(envelope: &Value) -> Value {
    let mut redacted = envelope.clone();
    if let Value::Object(calls) = &mut redacted {
        for body in calls.values_mut() {
            if let Some(Value::Object(auth)) = body.get_mut(MERCHANT_AUTHENTICATION)
                && let Some(key) = auth.get_mut("transactionKey")
            {
                *key = Value::String(REDACTED.to_owned());
            }
        }
    }
    redacted
}
