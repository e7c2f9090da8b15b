//! Reliability patterns for gateway communication.
//!
//! Provides the bounded retry loop used for transport-level failures.

mod retry;

pub use retry::{DEFAULT_MAX_ATTEMPTS, RetryPolicy, retry_with_backoff};
