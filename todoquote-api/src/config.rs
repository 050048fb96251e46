/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `DATABASE_ACQUIRE_TIMEOUT_SECONDS`: Wait for a free connection (default: 5)
/// - `DATABASE_STATEMENT_TIMEOUT_MS`: Per-statement limit, 0 disables (default: 5000)
/// - `PUSH_GATEWAY_URL`: Push endpoint (default: FCM legacy HTTP endpoint)
/// - `PUSH_SERVER_KEY`: Push server key (optional, broadcasts fail without it)
/// - `PUSH_TIMEOUT_SECONDS`: Push request timeout (default: 10)
/// - `RUST_LOG`, `LOG_FORMAT`: read by the binary's tracing setup
///
/// # Example
///
/// ```no_run
/// use todoquote_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::{env, str::FromStr};

use todoquote_shared::{db::pool::DatabaseConfig, push::PushConfig};

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database pool configuration
    pub database: DatabaseConfig,

    /// Push gateway configuration
    pub push: PushConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Reads `name`, falling back to `default` when unset.
fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or any variable has a
    /// value that does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let pool_defaults = DatabaseConfig::default();
        let push_defaults = PushConfig::default();

        let statement_timeout_ms = env_or(
            "DATABASE_STATEMENT_TIMEOUT_MS",
            pool_defaults.statement_timeout_ms.unwrap_or(0),
        )?;

        let server_key = env::var("PUSH_SERVER_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            api: ApiConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_or("API_PORT", 8080)?,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", pool_defaults.max_connections)?,
                acquire_timeout_seconds: env_or(
                    "DATABASE_ACQUIRE_TIMEOUT_SECONDS",
                    pool_defaults.acquire_timeout_seconds,
                )?,
                statement_timeout_ms: (statement_timeout_ms > 0).then_some(statement_timeout_ms),
                ..pool_defaults
            },
            push: PushConfig {
                endpoint: env::var("PUSH_GATEWAY_URL").unwrap_or(push_defaults.endpoint),
                server_key,
                timeout_seconds: env_or("PUSH_TIMEOUT_SECONDS", push_defaults.timeout_seconds)?,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                ..DatabaseConfig::default()
            },
            push: PushConfig::default(),
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_env_or_uses_default_when_unset() {
        let value: u16 = env_or("TODOQUOTE_TEST_SURELY_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_env_or_rejects_garbage() {
        env::set_var("TODOQUOTE_TEST_BAD_PORT", "eighty");
        let result: anyhow::Result<u16> = env_or("TODOQUOTE_TEST_BAD_PORT", 8080);
        env::remove_var("TODOQUOTE_TEST_BAD_PORT");

        let message = result.unwrap_err().to_string();
        assert!(message.contains("TODOQUOTE_TEST_BAD_PORT"));
    }

    #[test]
    fn test_push_defaults() {
        let config = test_config();
        assert_eq!(config.push.endpoint, "https://fcm.googleapis.com/fcm/send");
        assert!(config.push.server_key.is_none());
    }
}
