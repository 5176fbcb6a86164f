use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use database::postgres::DatabaseConnection;
use tonic::transport::Server;
use tracing::info;

use crate::health;

/// Serve the gRPC health endpoint until `shutdown` resolves.
///
/// The overall status starts as NOT_SERVING and follows the database health check.
pub async fn serve<F>(
    addr: SocketAddr,
    db: DatabaseConnection,
    check_interval: Duration,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()> + Send,
{
    let (reporter, health_service) = tonic_health::server::health_reporter();
    reporter
        .set_service_status(health::OVERALL, tonic_health::ServingStatus::NotServing)
        .await;

    let monitor = health::spawn_health_monitor(db, reporter, check_interval);

    info!(%addr, "Auth gRPC service started");

    let result = Server::builder()
        .add_service(health_service)
        .serve_with_shutdown(addr, shutdown)
        .await;

    monitor.abort();
    result
}
