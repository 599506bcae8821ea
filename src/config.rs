use std::env;

use thiserror::Error;

const DEFAULT_CLUSTER: &str = "cluster0.exiwnj2.mongodb.net";
const DEFAULT_ORIGINS: &str = "http://localhost:5173,https://bistro-boss-e6319.web.app";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("PORT must be a number, got {0:?}")]
    InvalidPort(String),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_name: String,
    pub token_secret: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Loads `.env` (when present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
                let pass = lookup("DB_PASS").ok_or(ConfigError::Missing("DB_PASS"))?;
                let cluster = lookup("DB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
                format!("mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority", user, pass, cluster)
            }
        };

        let token_secret = lookup("ACCESS_TOKEN_SECRET").ok_or(ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 5000,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            database_name: lookup("DB_NAME").unwrap_or_else(|| "bistroDB".to_string()),
            token_secret,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            allowed_origins,
        })
    }
}
