//! Configuration module
//!
//! Environment-driven configuration for the API server. Values are read once
//! at startup via [`Config::from_env`] and validated before any service is
//! constructed.

use std::env;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_RATE_FILE_SIZE_MB: usize = 5;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Transport-level ceiling for uploaded rate files. Enforced by the HTTP
    /// layer before the ingestion pipeline sees the content.
    pub max_rate_file_size_bytes: usize,
    pub rate_file_allowed_extensions: Vec<String>,
    pub rate_file_allowed_content_types: Vec<String>,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(MAX_CONNECTIONS);

        let db_timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(CONNECTION_TIMEOUT_SECS);

        let max_rate_file_size_bytes = env::var("MAX_RATE_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_RATE_FILE_SIZE_MB)
            * 1024
            * 1024;

        let rate_file_allowed_extensions = env::var("RATE_FILE_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "csv".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let rate_file_allowed_content_types = env::var("RATE_FILE_ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| "text/csv,application/csv,application/vnd.ms-excel".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            server_port,
            database_url,
            db_max_connections,
            db_timeout_seconds,
            cors_origins,
            environment,
            max_rate_file_size_bytes,
            rate_file_allowed_extensions,
            rate_file_allowed_content_types,
        })
    }

    /// Fail fast on misconfiguration before any service is constructed.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database_url.trim().is_empty() {
            return Err(anyhow::anyhow!("DATABASE_URL must not be empty"));
        }
        if self.max_rate_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_RATE_FILE_SIZE_MB must be at least 1"));
        }
        if self.rate_file_allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "RATE_FILE_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 8080,
            database_url: "postgres://localhost/freightdesk".to_string(),
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            max_rate_file_size_bytes: MAX_RATE_FILE_SIZE_MB * 1024 * 1024,
            rate_file_allowed_extensions: vec!["csv".to_string()],
            rate_file_allowed_content_types: vec!["text/csv".to_string()],
        }
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_ok() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_size_limit() {
        let mut config = test_config();
        config.max_rate_file_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut config = test_config();
        config.rate_file_allowed_extensions.clear();
        assert!(config.validate().is_err());
    }
}
