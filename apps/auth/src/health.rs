//! Drives the gRPC health status from periodic database health checks.

use std::time::Duration;

use database::postgres::{DatabaseConnection, HealthStatus, check_health_detailed};
use tokio::task::JoinHandle;
use tonic_health::ServingStatus;
use tonic_health::server::HealthReporter;
use tracing::{debug, info, warn};

/// Empty service name: the overall server status queried by k8s probes
pub const OVERALL: &str = "";

pub fn serving_status(status: &HealthStatus) -> ServingStatus {
    if status.healthy {
        ServingStatus::Serving
    } else {
        ServingStatus::NotServing
    }
}

/// Check the database once and publish the result
pub async fn check_once(db: &DatabaseConnection, reporter: &HealthReporter) -> ServingStatus {
    let status = check_health_detailed(db).await;
    let serving = serving_status(&status);

    match &status.message {
        None => {
            debug!(response_time_ms = status.response_time_ms, "Database health check ok");
        }
        Some(message) => {
            warn!(
                response_time_ms = status.response_time_ms,
                error = %message,
                "Database health check failed"
            );
        }
    }

    reporter.set_service_status(OVERALL, serving).await;
    serving
}

/// Spawn the health check loop. The first check runs immediately.
pub fn spawn_health_monitor(
    db: DatabaseConnection,
    reporter: HealthReporter,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        let mut last = None;

        loop {
            ticker.tick().await;
            let serving = check_once(&db, &reporter).await;
            if last != Some(serving) {
                info!(status = ?serving, "Health status changed");
                last = Some(serving);
            }
        }
    })
}
