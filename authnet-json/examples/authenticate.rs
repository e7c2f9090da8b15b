//! Checks merchant credentials against the sandbox, then runs a test charge.
//!
//! # Running this example
//!
//! ```bash
//! export AUTHNET_LOGIN=<api login id>
//! export AUTHNET_TRANSACTION_KEY=<transaction key>
//! RUST_LOG=authnet_json=debug cargo run --example authenticate
//! ```
//!
//! Pass a TOML file to override the defaults:
//!
//! ```bash
//! cargo run --example authenticate -- authnet.toml
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use authnet_json::{ApiCall, AuthnetClient, ClientConfig, Environment};
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig { environment: Environment::Sandbox, ..ClientConfig::default() },
    };
    let client = AuthnetClient::from_config(&config)?;
    println!("Posting to {}", client.endpoint());

    let auth = client.invoke(ApiCall::AuthenticateTest, &Value::Null).await?;
    if auth.response().is_error() {
        eprintln!(
            "Credentials rejected: {} {}",
            auth.response().error_code(),
            auth.response().error_text()
        );
        return Ok(());
    }
    println!("Credentials accepted");

    let charge = client
        .invoke(
            ApiCall::CreateTransaction,
            &json!({
                "refId": "example-1",
                "transactionRequest": {
                    "transactionType": "authCaptureTransaction",
                    "amount": "1.00",
                    "payment": {
                        "creditCard": {
                            "cardNumber": "4111111111111111",
                            "expirationDate": "2030-12",
                            "cardCode": "999"
                        }
                    }
                }
            }),
        )
        .await?;

    let response = charge.response();
    if response.is_approved() {
        println!(
            "Approved, transaction {}",
            response.get_str("transactionResponse.transId").unwrap_or("?")
        );
    } else if response.is_declined() {
        println!("Declined");
    } else {
        println!("Failed: {} {}", response.error_code(), response.error_text());
    }
    println!("{response}");

    Ok(())
}
