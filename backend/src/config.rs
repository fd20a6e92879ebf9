//! Process configuration read from the environment.
//!
//! An optional `.env` file in the working directory is loaded first, so local
//! setups can keep the API password out of the shell history.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "bafa.sqlite";
const DEFAULT_EDITOR_URL: &str = "https://docs.google.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub api_password: String,
    /// Base under which this service is reachable from browsers.
    pub public_url: String,
    /// Base of the open-for-edit links handed back after generation.
    pub editor_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case in production.
        let _ = dotenvy::dotenv();

        let host = env::var("BAFA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("BAFA_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "BAFA_PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };
        let db_path = env::var("BAFA_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));
        let api_password = env::var("BAFA_API_PASSWORD")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .ok_or(ConfigError::Missing("BAFA_API_PASSWORD"))?;
        let public_url = env::var("BAFA_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let editor_url =
            env::var("BAFA_EDITOR_URL").unwrap_or_else(|_| DEFAULT_EDITOR_URL.to_string());

        Ok(Self {
            host,
            port,
            db_path,
            api_password,
            public_url: public_url.trim_end_matches('/').to_string(),
            editor_url: editor_url.trim_end_matches('/').to_string(),
        })
    }

    /// Configuration for tests and embedding: everything default except the
    /// database location and password.
    pub fn new(db_path: impl Into<PathBuf>, api_password: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: db_path.into(),
            api_password: api_password.into(),
            public_url: format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT),
            editor_url: DEFAULT_EDITOR_URL.to_string(),
        }
    }
}
