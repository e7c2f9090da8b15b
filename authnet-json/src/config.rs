//! Server environments and client configuration.
//!
//! A client is usually configured from a TOML file:
//!
//! ```toml
//! environment = "sandbox"
//! login_env = "AUTHNET_LOGIN"
//! transaction_key_env = "AUTHNET_TRANSACTION_KEY"
//! max_attempts = 3
//!
//! [http]
//! timeout_secs = 30
//! ```
//!
//! Credentials are never stored in the file. The configuration names the environment
//! variables that hold them.

use std::{fmt, path::Path, str::FromStr};

use serde::Deserialize;

use crate::{
    error::{AuthnetError, Result},
    request::Credentials,
    transport::{HttpConfig, http::validate_endpoint},
};

/// Production endpoint.
pub const PRODUCTION_ENDPOINT: &str = "https://api2.authorize.net/xml/v1/request.api";
/// Sandbox endpoint.
pub const SANDBOX_ENDPOINT: &str = "https://apitest.authorize.net/xml/v1/request.api";
/// Production endpoint served through the CDN.
pub const CDN_ENDPOINT: &str = "https://api.authorize.net/xml/v1/request.api";

const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Authorize.Net server environment.
///
/// # Examples
///
/// ```
/// use authnet_json::Environment;
///
/// let env: Environment = "development".parse().unwrap();
/// assert_eq!(env, Environment::Sandbox);
/// assert_eq!(env.endpoint(), "https://apitest.authorize.net/xml/v1/request.api");
///
/// assert!("staging".parse::<Environment>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    /// Live transactions.
    #[default]
    Production,
    /// Test account server.
    Sandbox,
    /// Live transactions through the CDN host.
    Cdn,
}

impl Environment {
    /// Returns the API endpoint URL of this environment.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_ENDPOINT,
            Self::Sandbox => SANDBOX_ENDPOINT,
            Self::Cdn => CDN_ENDPOINT,
        }
    }

    /// Returns the canonical environment name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Sandbox => "sandbox",
            Self::Cdn => "cdn",
        }
    }
}

impl FromStr for Environment {
    type Err = AuthnetError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" | "live" => Ok(Self::Production),
            "sandbox" | "development" => Ok(Self::Sandbox),
            "cdn" | "akamai" => Ok(Self::Cdn),
            _ => Err(AuthnetError::InvalidServer(format!("unknown environment: {name}"))),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = AuthnetError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client configuration.
///
/// # Examples
///
/// ```
/// use authnet_json::{ClientConfig, Environment};
///
/// let config = ClientConfig::from_toml(r#"environment = "sandbox""#).unwrap();
/// assert_eq!(config.environment, Environment::Sandbox);
/// assert_eq!(config.max_attempts, 3);
/// assert_eq!(config.resolved_endpoint(), Environment::Sandbox.endpoint());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Server environment (default: production).
    #[serde(default)]
    pub environment: Environment,

    /// Endpoint URL overriding the environment's.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Environment variable holding the API login ID.
    #[serde(default = "default_login_env")]
    pub login_env: String,

    /// Environment variable holding the transaction key.
    #[serde(default = "default_transaction_key_env")]
    pub transaction_key_env: String,

    /// Maximum POST attempts per call, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            endpoint: None,
            login_env: default_login_env(),
            transaction_key_env: default_transaction_key_env(),
            max_attempts: default_max_attempts(),
            http: HttpConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// `environment` accepts the same names as [`Environment::from_str`], in any case.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidServer`] if `environment` names no known server, or
    /// [`AuthnetError::Config`] if the TOML is malformed or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(toml_str)
            .map_err(|e| AuthnetError::Config(format!("invalid TOML config: {e}")))?;
        if let Some(name) = table.get("environment").and_then(toml::Value::as_str) {
            name.parse::<Environment>()?;
        }

        let config: Self = toml::Value::Table(table)
            .try_into()
            .map_err(|e| AuthnetError::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::Config`] if the file cannot be read or is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AuthnetError::Config(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the configuration.
    ///
    /// Checks that:
    /// - environment variable names are alphanumeric with underscores
    /// - `max_attempts` is between 1 and 10
    /// - a custom endpoint is an HTTPS URL that is not localhost
    /// - HTTP settings are within bounds
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::Config`] describing the first failed check.
    pub fn validate(&self) -> Result<()> {
        validate_env_var_name(&self.login_env)?;
        validate_env_var_name(&self.transaction_key_env)?;

        if self.max_attempts == 0 || self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(AuthnetError::Config(format!(
                "max_attempts must be between 1 and {MAX_ATTEMPTS_LIMIT}"
            )));
        }

        if let Some(endpoint) = &self.endpoint {
            validate_endpoint(endpoint).map_err(|e| AuthnetError::Config(e.to_string()))?;
        }

        self.http.validate().map_err(|e| AuthnetError::Config(e.to_string()))
    }

    /// Returns the custom endpoint if set, else the environment's.
    #[must_use]
    pub fn resolved_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or_else(|| self.environment.endpoint())
    }

    /// Reads credentials from the configured environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AuthnetError::InvalidCredentials`] if a variable is unset or blank.
    pub fn credentials_from_env(&self) -> Result<Credentials> {
        let login = read_env(&self.login_env)?;
        let transaction_key = read_env(&self.transaction_key_env)?;
        Credentials::new(login, transaction_key)
    }
}

fn read_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|e| {
        AuthnetError::InvalidCredentials(format!("cannot read environment variable {name}: {e}"))
    })
}

fn default_login_env() -> String {
    "AUTHNET_LOGIN".to_owned()
}

fn default_transaction_key_env() -> String {
    "AUTHNET_TRANSACTION_KEY".to_owned()
}

const fn default_max_attempts() -> u32 {
    crate::reliability::DEFAULT_MAX_ATTEMPTS
}

/// Validates an environment variable name.
fn validate_env_var_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        return Err(AuthnetError::Config("environment variable name cannot be empty".to_owned()));
    };

    // Must be alphanumeric with underscores, starting with letter or underscore
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(AuthnetError::Config(format!(
            "environment variable name must start with letter or underscore: {name}"
        )));
    }

    if let Some(ch) = name.chars().find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_') {
        return Err(AuthnetError::Config(format!(
            "environment variable name contains invalid character '{ch}': {name}"
        )));
    }

    Ok(())
}
