use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for environment variable {0}")]
    Invalid(&'static str),
}

/// Application configuration, read once at startup and passed explicitly to
/// the components that need it. Absence of any required value is fatal.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiry_days: i64,
    pub bcrypt_cost: u32,
    pub bucket_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            port: optional_parsed("PORT", 7002)?,
            jwt_secret: require("JWT_SECRET")?,
            jwt_expiry_days: optional_parsed("JWT_EXPIRY_DAYS", 5)?,
            bcrypt_cost: optional_parsed("BCRYPT_COST", 7)?,
            bucket_name: require("AWS_S3_BUCKET_NAME")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn optional_parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so parallel test threads never race on process env.
    #[test]
    fn from_env_reads_required_values_and_defaults() {
        env::set_var("DATABASE_URL", "postgres://localhost/dockside");
        env::set_var("JWT_SECRET", "test-secret");
        env::set_var("AWS_S3_BUCKET_NAME", "dockside-test");
        env::remove_var("PORT");
        env::remove_var("JWT_EXPIRY_DAYS");
        env::remove_var("BCRYPT_COST");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 7002);
        assert_eq!(config.jwt_expiry_days, 5);
        assert_eq!(config.bcrypt_cost, 7);
        assert_eq!(config.bucket_name, "dockside-test");

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Invalid("PORT"))
        ));
        env::remove_var("PORT");
    }
}
