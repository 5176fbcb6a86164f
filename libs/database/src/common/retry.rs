use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{RetryError, Retryable};

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse};

/// Attempts made before giving up on a connection
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Fixed wait between two attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(4);

/// Fixed-delay retry policy for connection bootstrap
///
/// There is no backoff and no jitter: every failed attempt except the last
/// is followed by the same `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one (at least 1)
    pub max_attempts: u32,

    /// Wait between consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with the defaults (5 attempts, 4 seconds apart)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total number of attempts. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Load RetryPolicy from environment variables
///
/// - `DB_CONNECT_MAX_ATTEMPTS` (optional, default: 5, must be >= 1)
/// - `DB_CONNECT_RETRY_DELAY_SECS` (optional, default: 4)
#[cfg(feature = "config")]
impl FromEnv for RetryPolicy {
    fn from_env() -> Result<Self, ConfigError> {
        let max_attempts: u32 = env_parse("DB_CONNECT_MAX_ATTEMPTS", "5")?;
        if max_attempts == 0 {
            return Err(ConfigError::parse(
                "DB_CONNECT_MAX_ATTEMPTS",
                "must be at least 1",
            ));
        }

        let delay_secs: u64 = env_parse("DB_CONNECT_RETRY_DELAY_SECS", "4")?;

        Ok(Self {
            max_attempts,
            delay: Duration::from_secs(delay_secs),
        })
    }
}

/// One attempt within a retry loop.
///
/// `index` is 0-based and always below `max_attempts`; [`number`](Self::number)
/// is the 1-based value shown in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionAttempt {
    pub index: u32,
    pub max_attempts: u32,
    pub delay: Duration,
}

impl ConnectionAttempt {
    /// The first attempt under `policy`
    pub fn first(policy: &RetryPolicy) -> Self {
        Self {
            index: 0,
            max_attempts: policy.max_attempts.max(1),
            delay: policy.delay,
        }
    }

    pub fn number(&self) -> u32 {
        self.index + 1
    }

    pub fn is_last(&self) -> bool {
        self.number() >= self.max_attempts
    }

    /// The attempt that follows this one, if the policy allows another
    pub fn next(&self) -> Option<Self> {
        if self.is_last() {
            None
        } else {
            Some(Self {
                index: self.index + 1,
                ..*self
            })
        }
    }
}

/// Retry an async operation with a fixed delay between attempts
///
/// The operation receives the current [`ConnectionAttempt`]. On success the
/// value is returned at once. A retryable failure is logged and, if attempts
/// remain, followed by `policy.delay`; the final failure is not followed by a
/// wait. A non-retryable failure ends the loop immediately.
///
/// # Example
/// ```ignore
/// use database::common::{retry_fixed, RetryPolicy};
///
/// let db = retry_fixed(&RetryPolicy::default(), |_attempt| {
///     sea_orm::Database::connect(db_url.as_str())
/// })
/// .await?;
/// ```
pub async fn retry_fixed<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, RetryError<E>>
where
    F: FnMut(ConnectionAttempt) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::error::Error + 'static,
{
    let mut attempt = ConnectionAttempt::first(policy);

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt.index > 0 {
                    debug!(attempts = attempt.number(), "Operation succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => {
                warn!(
                    attempt = attempt.number(),
                    error = %e,
                    "Operation failed with a non-retryable error"
                );
                return Err(RetryError::Permanent {
                    attempt: attempt.number(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(
                    attempt = attempt.number(),
                    max_attempts = attempt.max_attempts,
                    error = %e,
                    "Waiting for database... ({}/{})",
                    attempt.number(),
                    attempt.max_attempts
                );

                match attempt.next() {
                    Some(next) => {
                        tokio::time::sleep(attempt.delay).await;
                        attempt = next;
                    }
                    None => {
                        return Err(RetryError::Exhausted {
                            attempts: attempt.number(),
                            source: e,
                        });
                    }
                }
            }
        }
    }
}
