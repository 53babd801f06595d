/**
 * Server Configuration
 *
 * Loads the server configuration from environment variables (a `.env` file
 * is read by the binary before this runs), with sensible defaults for local
 * development.
 *
 * # Variables
 *
 * | Variable                        | Default                  |
 * |---------------------------------|--------------------------|
 * | `DATABASE_URL`                  | `sqlite://storyforge.db` |
 * | `DATABASE_MAX_CONNECTIONS`      | `10`                     |
 * | `DATABASE_ACQUIRE_TIMEOUT_SECS` | `30`                     |
 * | `JWT_SECRET`                    | required in release      |
 * | `TOKEN_TTL_HOURS`               | `24`                     |
 * | `BCRYPT_COST`                   | `bcrypt::DEFAULT_COST`   |
 * | `UPLOAD_DIR`                    | `uploads`                |
 * | `SERVER_HOST` / `SERVER_PORT`   | `0.0.0.0` / `5000`       |
 * | `CORS_ORIGIN`                   | `http://localhost:3000`  |
 */

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEV_JWT_SECRET: &str = "storyforge-development-secret";

/// Lowest cost bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest cost bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// How long a request waits for a pooled connection before failing
    pub acquire_timeout: Duration,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
    pub upload_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(max) = env_parse::<u32>("DATABASE_MAX_CONNECTIONS")? {
            builder = builder.max_connections(max);
        }
        if let Some(secs) = env_parse::<u64>("DATABASE_ACQUIRE_TIMEOUT_SECS")? {
            builder = builder.acquire_timeout(Duration::from_secs(secs));
        }
        match std::env::var("JWT_SECRET") {
            Ok(secret) => builder = builder.jwt_secret(secret),
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                builder = builder.jwt_secret(DEV_JWT_SECRET);
            }
            Err(_) => return Err(ConfigError::MissingValue("JWT_SECRET")),
        }
        if let Some(hours) = env_parse::<i64>("TOKEN_TTL_HOURS")? {
            builder = builder.token_ttl(chrono::Duration::hours(hours));
        }
        if let Some(cost) = env_parse::<u32>("BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }
        if let Ok(dir) = std::env::var("UPLOAD_DIR") {
            builder = builder.upload_dir(dir);
        }
        let host = env_parse::<IpAddr>("SERVER_HOST")?.unwrap_or(IpAddr::from([0, 0, 0, 0]));
        let port = env_parse::<u16>("SERVER_PORT")?.unwrap_or(5000);
        builder = builder.bind_addr(SocketAddr::new(host, port));
        if let Ok(origin) = std::env::var("CORS_ORIGIN") {
            builder = builder.cors_origin(origin);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.token_ttl <= chrono::Duration::zero() {
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_HOURS",
                value: self.token_ttl.num_hours().to_string(),
            });
        }
        if axum::http::HeaderValue::from_str(&self.cors_origin).is_err() {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGIN",
                value: self.cors_origin.clone(),
            });
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Builder for ServerConfig
#[derive(Debug)]
pub struct ServerConfigBuilder {
    database_url: String,
    max_connections: u32,
    acquire_timeout: Duration,
    jwt_secret: Option<String>,
    token_ttl: chrono::Duration,
    bcrypt_cost: u32,
    upload_dir: PathBuf,
    bind_addr: SocketAddr,
    cors_origin: String,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            database_url: "sqlite://storyforge.db".to_string(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            jwt_secret: None,
            token_ttl: chrono::Duration::hours(24),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            upload_dir: PathBuf::from("uploads"),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            cors_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl ServerConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let config = ServerConfig {
            database_url: self.database_url,
            max_connections: self.max_connections,
            acquire_timeout: self.acquire_timeout,
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            token_ttl: self.token_ttl,
            bcrypt_cost: self.bcrypt_cost,
            upload_dir: self.upload_dir,
            bind_addr: self.bind_addr,
            cors_origin: self.cors_origin,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
