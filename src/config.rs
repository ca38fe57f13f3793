use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

/// Upper bound for the `per_page` query parameter of the HTML station list.
pub const MAX_PAGE_SIZE: u64 = 200;

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,
    pub request_body_limit_bytes: usize,

    // Rate limiting
    pub disable_rate_limiting: bool,
    pub trust_forwarded_headers: bool,
    pub rate_limit_read_per_second: u64,
    pub rate_limit_read_burst: u32,
    pub rate_limit_write_per_second: u64,
    pub rate_limit_write_burst: u32,

    // HTML views
    pub stations_page_size: u64,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env_or("API_PORT", 3000),
            request_body_limit_bytes: env_or("REQUEST_BODY_LIMIT_BYTES", 64 * 1024),

            // Rate limiting
            disable_rate_limiting: env_or("DISABLE_RATE_LIMITING", false),
            trust_forwarded_headers: env_or("TRUST_FORWARDED_HEADERS", false),
            rate_limit_read_per_second: env_or::<u64>("RATE_LIMIT_READ_PER_SECOND", 10).max(1),
            rate_limit_read_burst: env_or::<u32>("RATE_LIMIT_READ_BURST", 60).max(1),
            rate_limit_write_per_second: env_or::<u64>("RATE_LIMIT_WRITE_PER_SECOND", 1).max(1),
            rate_limit_write_burst: env_or::<u32>("RATE_LIMIT_WRITE_BURST", 10).max(1),

            // HTML views
            stations_page_size: env_or::<u64>("STATIONS_PAGE_SIZE", 25).clamp(1, MAX_PAGE_SIZE),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    /// Settings for a locally run instance: rate limiting off, defaults elsewhere.
    #[must_use]
    pub fn local(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            api_host: "127.0.0.1".to_string(),
            api_port: 3000,
            request_body_limit_bytes: 64 * 1024,
            disable_rate_limiting: true,
            trust_forwarded_headers: false,
            rate_limit_read_per_second: 10,
            rate_limit_read_burst: 60,
            rate_limit_write_per_second: 1,
            rate_limit_write_burst: 10,
            stations_page_size: 25,
            deployment: Deployment::Local,
        }
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Parse an optional variable, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
