use anyhow::Context;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

const DEFAULT_DB_URL: &str = "sqlite://ecocycle.db?mode=rwc";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5555";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub db_url: String,
    pub app_name: String,
    pub deployment: String,
    pub bind_address: String,
    /// Empty means any origin is accepted
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load from .env file if available

        Ok(Config {
            db_url: Self::db_url_from_env()?,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "ecocycle-api".to_string()),
            deployment: env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }

    /// `DB_URL` wins; otherwise a Postgres URL is assembled when `DB_HOST` is
    /// set, and a local SQLite file is used as the last resort.
    fn db_url_from_env() -> anyhow::Result<String> {
        if let Ok(url) = env::var("DB_URL") {
            return Ok(url);
        }
        let Ok(host) = env::var("DB_HOST") else {
            return Ok(DEFAULT_DB_URL.to_string());
        };

        Ok(format!(
            "{}://{}:{}@{}:{}/{}",
            env::var("DB_PREFIX").unwrap_or_else(|_| "postgresql".to_string()),
            env::var("DB_USER").context("DB_USER must be set when DB_HOST is used")?,
            env::var("DB_PASSWORD").context("DB_PASSWORD must be set when DB_HOST is used")?,
            host,
            env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string()),
            env::var("DB_NAME").context("DB_NAME must be set when DB_HOST is used")?,
        ))
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            db_url: "sqlite::memory:".to_string(),
            app_name: "ecocycle-api-test".to_string(),
            deployment: "test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(ToString::to_string)
        .collect()
}
