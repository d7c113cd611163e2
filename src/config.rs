//! Runtime configuration
//!
//! All settings come from environment variables (optionally loaded from a
//! `.env` file by `dotenvy` in `main`). Missing or unparseable values fall
//! back to the defaults below.

use std::env;
use std::time::Duration;

/// Webhook queried for search results when the admin has not configured one.
pub const DEFAULT_WEBHOOK_URL: &str = "https://beautechflow.store/webhook/search";

#[derive(Clone, Debug)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,

    /// Path to the redb database file
    pub database_path: String,

    /// HS256 secret used to sign access tokens
    pub jwt_secret: String,

    /// Lifetime of issued access tokens
    pub token_ttl: Duration,

    /// bcrypt work factor for stored passwords
    pub password_cost: u32,

    pub admin_login: String,
    pub admin_password: String,

    /// Used until an admin stores a webhook URL
    pub default_webhook_url: String,

    /// Upper bound on a single webhook request
    pub webhook_timeout: Duration,

    /// Rewrite ports, container types, cargo types and routes on every start
    pub refresh_reference_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            database_path: "data.db".to_string(),
            jwt_secret: "cargosearch-dev-secret".to_string(),
            token_ttl: Duration::from_secs(30 * 60),
            password_cost: bcrypt::DEFAULT_COST,
            admin_login: "admin".to_string(),
            admin_password: "admin123".to_string(),
            default_webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            webhook_timeout: Duration::from_secs(30),
            refresh_reference_data: true,
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment
    ///
    /// # Environment Variables
    ///
    /// - `PORT` - Server port number (default: 8080)
    /// - `DATABASE_URL` - Path to database file (default: "data.db")
    /// - `JWT_SECRET` - Token signing secret
    /// - `TOKEN_TTL_MINUTES` - Access token lifetime (default: 30)
    /// - `PASSWORD_HASH_COST` - bcrypt cost, 4 to 31 (default: 12)
    /// - `ADMIN_LOGIN` / `ADMIN_PASSWORD` - Back office credentials
    /// - `DEFAULT_WEBHOOK_URL` - Search webhook used until one is configured
    /// - `WEBHOOK_TIMEOUT_SECS` - Webhook request timeout (default: 30)
    /// - `REFRESH_REFERENCE_DATA` - Reseed reference tables on start (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: parse_var("PORT").unwrap_or(defaults.port),
            database_path: env::var("DATABASE_URL").unwrap_or(defaults.database_path),
            jwt_secret: non_empty_var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_ttl: parse_var::<u64>("TOKEN_TTL_MINUTES")
                .map(|minutes| Duration::from_secs(minutes * 60))
                .unwrap_or(defaults.token_ttl),
            password_cost: parse_var::<u32>("PASSWORD_HASH_COST")
                .filter(|cost| (4..=31).contains(cost))
                .unwrap_or(defaults.password_cost),
            admin_login: non_empty_var("ADMIN_LOGIN").unwrap_or(defaults.admin_login),
            admin_password: non_empty_var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            default_webhook_url: non_empty_var("DEFAULT_WEBHOOK_URL")
                .unwrap_or(defaults.default_webhook_url),
            webhook_timeout: parse_var::<u64>("WEBHOOK_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.webhook_timeout),
            refresh_reference_data: parse_var("REFRESH_REFERENCE_DATA")
                .unwrap_or(defaults.refresh_reference_data),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
