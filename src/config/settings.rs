//! Application settings loaded from environment variables.

use std::env;

use super::constants::DEFAULT_DATABASE_URL;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Optional path to a JSON file with static resource descriptors.
    /// When unset, the built-in defaults are served.
    pub descriptors_path: Option<String>,
}

/// Redacts the database URL; everything else prints as-is.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("descriptors_path", &self.descriptors_path)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            descriptors_path: env::var("DESCRIPTORS_PATH").ok(),
        }
    }
}
