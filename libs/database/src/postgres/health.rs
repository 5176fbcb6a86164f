use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::time::Instant;
use tracing::debug;

use crate::common::DatabaseError;

/// Probe query; cheap and valid on every PostgreSQL server
const HEALTH_QUERY: &str = "SELECT 1";

/// Check that an established connection still answers queries
///
/// # Example
/// ```ignore
/// use database::postgres::{connect_from_config, check_health};
///
/// let db = connect_from_config(config).await?;
/// check_health(&db).await?;
/// ```
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, HEALTH_QUERY.to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Health check result for detailed status reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,

    /// Error message if unhealthy
    pub message: Option<String>,

    pub response_time_ms: u64,
}

impl HealthStatus {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: String, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message),
            response_time_ms,
        }
    }
}

/// Run [`check_health`] and report the outcome with its latency
pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let start = Instant::now();
    let result = check_health(db).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthStatus::healthy(elapsed),
        Err(e) => HealthStatus::unhealthy(e.to_string(), elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, MockDatabase, RuntimeErr};
    use std::collections::BTreeMap;

    fn select_one_row() -> BTreeMap<&'static str, sea_orm::Value> {
        BTreeMap::from([("?column?", sea_orm::Value::Int(Some(1)))])
    }

    #[test]
    fn test_health_status_constructors() {
        let status = HealthStatus::healthy(42);
        assert!(status.healthy);
        assert_eq!(status.response_time_ms, 42);
        assert!(status.message.is_none());

        let status = HealthStatus::unhealthy("connection failed".to_string(), 100);
        assert!(!status.healthy);
        assert_eq!(status.message.as_deref(), Some("connection failed"));
    }

    #[tokio::test]
    async fn test_check_health_against_mock() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![select_one_row()]])
            .into_connection();

        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_health_detailed_reports_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
                "server closed the connection".to_string(),
            ))])
            .into_connection();

        let status = check_health_detailed(&db).await;
        assert!(!status.healthy);
        let message = status.message.unwrap_or_default();
        assert!(message.contains("health check failed"));
    }
}
