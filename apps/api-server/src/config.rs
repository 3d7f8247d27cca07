//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use chirp_core::services::{DEFAULT_GLOBAL_FEED_LIMIT, DEFAULT_TIMELINE_LIMIT};
use chirp_infra::JwtConfig;

#[cfg(feature = "postgres")]
use chirp_infra::DatabaseConfig;

/// Page sizes for feed endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedLimits {
    pub timeline_default: usize,
    pub global_default: usize,
    /// Upper bound applied to any `?limit=` a client sends.
    pub max: usize,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            timeline_default: DEFAULT_TIMELINE_LIMIT,
            global_default: DEFAULT_GLOBAL_FEED_LIMIT,
            max: 200,
        }
    }
}

impl FeedLimits {
    pub fn timeline(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.timeline_default).min(self.max)
    }

    pub fn global(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.global_default).min(self.max)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub feed: FeedLimits,
    pub load_test_data: bool,
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 100),
            min_connections: parsed("DB_MIN_CONNECTIONS", 10),
        });

        let jwt_defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET").unwrap_or(jwt_defaults.secret),
            expiration_hours: parsed("JWT_EXPIRATION_HOURS", jwt_defaults.expiration_hours),
            issuer: env::var("JWT_ISSUER").unwrap_or(jwt_defaults.issuer),
        };

        let feed_defaults = FeedLimits::default();
        let feed = FeedLimits {
            timeline_default: parsed("TIMELINE_DEFAULT_LIMIT", feed_defaults.timeline_default),
            global_default: parsed("GLOBAL_FEED_DEFAULT_LIMIT", feed_defaults.global_default),
            max: parsed("TIMELINE_MAX_LIMIT", feed_defaults.max),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            #[cfg(feature = "postgres")]
            database,
            jwt,
            feed,
            load_test_data: env::var("LOAD_TEST_DATA")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
