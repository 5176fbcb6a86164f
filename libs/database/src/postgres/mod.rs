//! PostgreSQL database connector and utilities
//!
//! Provides retrying connection bootstrap and health checks.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{PostgresConnector, connect, connect_from_config, connect_with_retry};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
