use async_trait::async_trait;
use tracing::info;

use super::error::{RetryError, Retryable};
use super::retry::{RetryPolicy, retry_fixed};

/// Opens one connection to a datastore.
///
/// Implementations make a single attempt per call; retrying is the job of
/// [`connect_with_retry`].
#[async_trait]
pub trait Connector: Send + Sync {
    /// Caller-owned handle to an established connection
    type Handle: Send;

    type Error: Retryable + std::error::Error + Send + Sync + 'static;

    /// Human-readable backend name used in logs (never the DSN)
    fn backend(&self) -> &'static str;

    async fn open(&self) -> Result<Self::Handle, Self::Error>;
}

/// Open a connection through `connector`, retrying transient failures
/// according to `policy`.
///
/// # Example
/// ```ignore
/// use database::common::{connect_with_retry, RetryPolicy};
/// use database::postgres::PostgresConnector;
///
/// let connector = PostgresConnector::new(&db_url)?;
/// let db = connect_with_retry(&connector, &RetryPolicy::default()).await?;
/// ```
pub async fn connect_with_retry<C>(
    connector: &C,
    policy: &RetryPolicy,
) -> Result<C::Handle, RetryError<C::Error>>
where
    C: Connector + ?Sized,
{
    let handle = retry_fixed(policy, |_attempt| connector.open()).await?;
    info!(backend = connector.backend(), "Successfully connected to database");
    Ok(handle)
}
