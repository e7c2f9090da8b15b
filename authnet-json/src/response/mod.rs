//! Parsed API responses.
//!
//! Authorize.Net responses are schema-loose: which fields appear depends on the API call and
//! on the outcome. [`AuthnetResponse`] keeps the whole JSON tree and answers questions about
//! it (did the call succeed, was the card approved, what went wrong) without failing on
//! missing fields.
//!
//! # Examples
//!
//! ```
//! use authnet_json::AuthnetResponse;
//!
//! let response = AuthnetResponse::from_json(
//!     r#"{"messages":{"resultCode":"Error","message":[{"code":"E00027","text":"bad"}]}}"#,
//! )
//! .unwrap();
//!
//! assert!(response.is_error());
//! assert_eq!(response.error_code(), "E00027");
//! assert_eq!(response.error_text(), "bad");
//! ```

mod transaction;

use std::{fmt, str::FromStr};

use serde_json::Value;
pub use transaction::{TransactionField, TransactionResponse};

use crate::error::{AuthnetError, Result};

/// Response code of an approved transaction.
pub const STATUS_APPROVED: i64 = 1;
/// Response code of a declined transaction.
pub const STATUS_DECLINED: i64 = 2;
/// Response code of a transaction that encountered an error.
pub const STATUS_ERROR: i64 = 3;
/// Response code of a transaction held for review.
pub const STATUS_HELD: i64 = 4;
/// Response code of a PayPal transaction waiting for buyer consent.
pub const STATUS_PAYPAL_NEED_CONSENT: i64 = 5;

// Fields that carry delimited transaction results, in lookup order.
const DIRECT_RESPONSE: &str = "directResponse";
const VALIDATION_DIRECT_RESPONSE_LIST: &str = "validationDirectResponseList";
const VALIDATION_DIRECT_RESPONSE: &str = "validationDirectResponse";

/// Transaction results carried by a response.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TransactionInfo {
    None,
    Single(TransactionResponse),
    List(Vec<TransactionResponse>),
}

/// A parsed Authorize.Net API response.
#[derive(Debug, Clone)]
pub struct AuthnetResponse {
    raw: String,
    tree: Value,
    transaction_info: TransactionInfo,
}

impl AuthnetResponse {
    /// Parses a response body.
    ///
    /// Control bytes (`0x00-0x1F`) and bytes outside ASCII (`0x80-0xFF`, which includes the
    /// UTF-8 byte order mark some gateway hosts prepend) are stripped before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidJson`] if the sanitized text is not a JSON object.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        let raw: String =
            body.iter().copied().filter(|b| (0x20..0x80).contains(b)).map(char::from).collect();

        let tree: Value =
            serde_json::from_str(&raw).map_err(|e| AuthnetError::InvalidJson(e.to_string()))?;
        if !tree.is_object() {
            return Err(AuthnetError::InvalidJson(format!(
                "expected a JSON object, got {}",
                kind_of(&tree)
            )));
        }

        let transaction_info = extract_transaction_info(&tree);
        Ok(Self { raw, tree, transaction_info })
    }

    /// Parses a response body given as text.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidJson`] if the sanitized text is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self> {
        Self::from_bytes(body.as_bytes())
    }

    /// Looks up a field by dotted path.
    ///
    /// Object keys and array indices are separated by `.`, e.g. `messages.message.0.code`.
    /// An empty path returns the whole tree. Missing fields and JSON `null` resolve to
    /// `None`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.tree, path)
    }

    /// Looks up a string field by dotted path.
    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Returns the parsed JSON tree.
    #[must_use]
    pub fn json(&self) -> &Value {
        &self.tree
    }

    /// Returns `messages.resultCode`, typically `"Ok"` or `"Error"`.
    #[must_use]
    pub fn result_code(&self) -> Option<&str> {
        self.get_str("messages.resultCode")
    }

    /// Checks if the API call is not in an error state.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.result_code().is_some_and(|code| code.eq_ignore_ascii_case("ok"))
    }

    /// Checks if the API is reporting an error with the API call.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.result_code().is_some_and(|code| code.eq_ignore_ascii_case("error"))
    }

    /// Checks if a transaction was approved.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.is_successful() && self.transaction_status() == Some(STATUS_APPROVED)
    }

    /// Checks if a transaction was declined.
    #[must_use]
    pub fn is_declined(&self) -> bool {
        self.is_successful() && self.transaction_status() == Some(STATUS_DECLINED)
    }

    /// Checks if a transaction was held for review.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.is_successful() && self.transaction_status() == Some(STATUS_HELD)
    }

    /// Checks if a transaction was completed using a prepaid card.
    #[must_use]
    pub fn is_pre_paid_card(&self) -> bool {
        self.get("transactionResponse.prePaidCard").is_some()
    }

    /// Returns the transaction response code.
    ///
    /// Read from the delimited transaction result when the response carries exactly one,
    /// otherwise from `transactionResponse.responseCode`.
    #[must_use]
    pub fn transaction_status(&self) -> Option<i64> {
        if let TransactionInfo::Single(info) = &self.transaction_info {
            return info.response_code();
        }
        match self.get("transactionResponse.responseCode")? {
            Value::String(code) => code.trim().parse().ok(),
            Value::Number(code) => code.as_i64(),
            _ => None,
        }
    }

    /// Returns the error code, or `""` if the call is not in an error state.
    ///
    /// Prefers `transactionResponse.errors[0].errorCode` and falls back to
    /// `messages.message[0].code`.
    #[must_use]
    pub fn error_code(&self) -> &str {
        self.error_detail("errorCode", "code")
    }

    /// Returns the error text, or `""` if the call is not in an error state.
    ///
    /// Prefers `transactionResponse.errors[0].errorText` and falls back to
    /// `messages.message[0].text`.
    #[must_use]
    pub fn error_text(&self) -> &str {
        self.error_detail("errorText", "text")
    }

    /// Alias of [`error_text`](Self::error_text).
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.error_text()
    }

    fn error_detail(&self, transaction_key: &str, message_key: &str) -> &str {
        if !self.is_error() {
            return "";
        }
        let per_transaction = self
            .get("transactionResponse.errors.0")
            .and_then(|error| error.get(transaction_key))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty());

        per_transaction
            .or_else(|| {
                self.get("messages.message.0")
                    .and_then(|message| message.get(message_key))
                    .and_then(Value::as_str)
            })
            .unwrap_or("")
    }

    /// Looks up a field of the delimited transaction result.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::TransactionResponseCall`] if the response does not carry
    /// exactly one delimited transaction result. Responses with a list of results are read
    /// through [`transaction_responses`](Self::transaction_responses).
    pub fn transaction_response_field<'f>(
        &self,
        field: impl Into<TransactionField<'f>>,
    ) -> Result<Option<&str>> {
        match &self.transaction_info {
            TransactionInfo::Single(info) => Ok(info.field(field)),
            TransactionInfo::List(_) => Err(AuthnetError::TransactionResponseCall(
                "response carries a list of transaction results".to_owned(),
            )),
            TransactionInfo::None => Err(AuthnetError::TransactionResponseCall(
                "response carries no delimited transaction result".to_owned(),
            )),
        }
    }

    /// Returns every delimited transaction result, e.g. one per payment profile validated
    /// by `createCustomerProfileRequest`.
    ///
    /// A single result is exposed as a one-element slice. Responses without transaction
    /// results yield an empty slice.
    #[must_use]
    pub fn transaction_responses(&self) -> &[TransactionResponse] {
        match &self.transaction_info {
            TransactionInfo::None => &[],
            TransactionInfo::Single(info) => std::slice::from_ref(info),
            TransactionInfo::List(infos) => infos,
        }
    }

    /// Returns the sanitized response body, for logging.
    #[must_use]
    pub fn raw_response(&self) -> &str {
        &self.raw
    }
}

impl FromStr for AuthnetResponse {
    type Err = AuthnetError;

    fn from_str(body: &str) -> Result<Self> {
        Self::from_json(body)
    }
}

impl fmt::Display for AuthnetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    let found = if path.is_empty() {
        root
    } else {
        path.split('.').try_fold(root, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })?
    };
    (!found.is_null()).then_some(found)
}

/// Empty strings, `"0"`, empty arrays, zero, `false` and `null` count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn extract_transaction_info(tree: &Value) -> TransactionInfo {
    let source = [DIRECT_RESPONSE, VALIDATION_DIRECT_RESPONSE_LIST]
        .into_iter()
        .filter_map(|key| tree.get(key))
        .find(|value| is_truthy(value))
        .or_else(|| tree.get(VALIDATION_DIRECT_RESPONSE).filter(|value| !value.is_null()));

    match source {
        None => TransactionInfo::None,
        Some(Value::Array(items)) => TransactionInfo::List(
            items.iter().map(|item| TransactionResponse::new(text_of(item))).collect(),
        ),
        Some(value) => TransactionInfo::Single(TransactionResponse::new(text_of(value))),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
