/// Classifies an error as transient (worth another attempt) or permanent.
///
/// Only transient failures are retried by [`retry_fixed`](super::retry::retry_fixed);
/// a permanent one stops the loop on the attempt that produced it.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

#[cfg(feature = "postgres")]
impl Retryable for sea_orm::DbErr {
    /// Connection-level failures are retried. This covers an unreachable
    /// server as well as rejected credentials, which look the same from here.
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_)
        )
    }
}

/// Outcome of a retry loop that never produced a value
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Every allowed attempt failed with a retryable error
    #[error("gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },

    /// An attempt failed with an error that is not worth retrying
    #[error("attempt {attempt} failed with a non-retryable error: {source}")]
    Permanent {
        attempt: u32,
        #[source]
        source: E,
    },
}

impl<E> RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Number of attempts made before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::Permanent { attempt, .. } => *attempt,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    /// The error returned by the last attempt
    pub fn into_source(self) -> E {
        match self {
            RetryError::Exhausted { source, .. } | RetryError::Permanent { source, .. } => source,
        }
    }
}

/// Unified database error type for all database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// PostgreSQL-specific errors (SeaORM)
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Could not connect within the allowed number of attempts
    #[cfg(feature = "postgres")]
    #[error("Unable to connect to database after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Configuration error, never retried
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DatabaseError {
    /// Whether this error means the connect loop ran out of attempts
    pub fn is_retries_exhausted(&self) -> bool {
        #[cfg(feature = "postgres")]
        {
            matches!(self, DatabaseError::RetriesExhausted { .. })
        }
        #[cfg(not(feature = "postgres"))]
        {
            false
        }
    }
}

#[cfg(feature = "postgres")]
impl From<RetryError<sea_orm::DbErr>> for DatabaseError {
    fn from(err: RetryError<sea_orm::DbErr>) -> Self {
        match err {
            RetryError::Exhausted { attempts, source } => {
                DatabaseError::RetriesExhausted { attempts, source }
            }
            RetryError::Permanent { source, .. } => DatabaseError::Postgres(source),
        }
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
