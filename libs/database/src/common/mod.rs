//! Common utilities shared across all database implementations

pub mod connector;
pub mod error;
pub mod retry;

pub use connector::{Connector, connect_with_retry};
pub use error::{DatabaseError, DatabaseResult, RetryError, Retryable};
pub use retry::{
    ConnectionAttempt, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, RetryPolicy, retry_fixed,
};
