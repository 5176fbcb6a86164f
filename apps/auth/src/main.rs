use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::FromEnv;
use tracing::{error, info, warn};

mod config;
mod health;
mod server;
mod shutdown;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    // A missing .env file is fine; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        max_attempts = config.database.retry.max_attempts,
        delay_secs = config.database.retry.delay.as_secs(),
        "Connecting to database..."
    );

    let db = match database::postgres::connect_from_config(config.database.clone()).await {
        Ok(db) => db,
        Err(e) if e.is_retries_exhausted() => {
            error!(error = %e, "Unable to connect to database");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let addr = config.server.socket_addr()?;
    server::serve(
        addr,
        db.clone(),
        config.health_check_interval,
        shutdown::shutdown_signal(),
    )
    .await?;

    if let Err(e) = db.close().await {
        warn!(error = %e, "Failed to close database connections");
    }

    info!("Auth gRPC service stopped");
    Ok(())
}
