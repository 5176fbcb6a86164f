use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Service configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    /// How often the database is checked to drive the gRPC health status
    pub health_check_interval: Duration,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let server = ServerConfig::from_env()?; // GRPC_HOST=0.0.0.0, GRPC_PORT=50051

        let interval_secs: u64 = env_parse("HEALTH_CHECK_INTERVAL_SECS", "10")?;
        if interval_secs == 0 {
            return Err(ConfigError::parse(
                "HEALTH_CHECK_INTERVAL_SECS",
                "must be at least 1",
            ));
        }

        Ok(Self {
            environment,
            database,
            server,
            health_check_interval: Duration::from_secs(interval_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "postgres://auth:auth@db:5432/auth";

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some(URL)),
                ("APP_ENV", None),
                ("GRPC_HOST", None),
                ("GRPC_PORT", None),
                ("HEALTH_CHECK_INTERVAL_SECS", None),
                ("DB_CONNECT_MAX_ATTEMPTS", None),
                ("DB_CONNECT_RETRY_DELAY_SECS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.database.url(), URL);
                assert_eq!(config.database.retry.max_attempts, 5);
                assert_eq!(config.database.retry.delay, Duration::from_secs(4));
                assert_eq!(config.server.address(), "0.0.0.0:50051");
                assert_eq!(config.health_check_interval, Duration::from_secs(10));
            },
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_config_rejects_zero_health_interval() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some(URL)),
                ("HEALTH_CHECK_INTERVAL_SECS", Some("0")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("HEALTH_CHECK_INTERVAL_SECS"));
            },
        );
    }
}
