//! Configuration: TOML file plus environment overrides, validated once at
//! startup and shared read-only through [`super::AppState`].

use serde::Deserialize;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_LOGS_PER_PAGE: u32 = 50;
pub const DEFAULT_KEEP_LOGS_DAYS: u32 = 360;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error: Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error: Config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Error: Database configuration missing. Check config file.")]
    DatabaseMissing,
    #[error("Error: Invalid database configuration. Check config file.")]
    DatabaseInvalid,
    #[error("Error: Auth configuration missing. Check config file.")]
    AuthMissing,
    #[error("Error: Auth configuration is invalid. Check config file.")]
    AuthInvalid,
    #[error("Error: Path to views missing in config. Check config file.")]
    ViewsPathMissing,
    #[error("Error: Paths to views is invalid. Check config file.")]
    ViewsPathInvalid,
}

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: String,
    pub path_views: PathBuf,
    pub logs_per_page: u32,
    pub keep_logs_days: u32,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Accepted credentials: API keys for ingestion, users for the web UI.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub api_keys: Vec<String>,
    /// username -> password hash (see `http::auth::hash_password`)
    pub users: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    listen: Option<String>,
    path_views: Option<String>,
    logs_per_page: Option<u32>,
    keep_logs_days: Option<u32>,
    database: Option<RawDatabase>,
    auth: Option<RawAuth>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDatabase {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAuth {
    api_keys: Option<Vec<String>>,
    users: Option<HashMap<String, String>>,
}

impl Config {
    /// Load configuration. The file is `path` if given, else
    /// `LOGPILE_CONFIG`, else `config.toml`. `LOGPILE_ADDR` and
    /// `LOGPILE_DATABASE` override the file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var("LOGPILE_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };
        tracing::debug!("loading configuration from {}", path.display());

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let mut raw: RawConfig = toml::from_str(&contents)?;

        if let Ok(addr) = std::env::var("LOGPILE_ADDR") {
            raw.listen = Some(addr);
        }
        if let Ok(url) = std::env::var("LOGPILE_DATABASE") {
            raw.database.get_or_insert_with(RawDatabase::default).url = Some(url);
        }

        Self::from_raw(raw)
    }

    /// Parse and validate configuration from TOML text, without env overrides.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::from_raw(toml::from_str(contents)?)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let db = raw.database.ok_or(ConfigError::DatabaseMissing)?;
        let url = db
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or(ConfigError::DatabaseInvalid)?;
        let database = DatabaseConfig {
            url,
            max_connections: db
                .max_connections
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };

        let auth = raw.auth.ok_or(ConfigError::AuthMissing)?;
        let auth = match (auth.api_keys, auth.users) {
            (Some(api_keys), Some(users)) => AuthConfig { api_keys, users },
            _ => return Err(ConfigError::AuthInvalid),
        };

        let path_views = validate_views_path(raw.path_views.as_deref())?;

        Ok(Config {
            listen: raw.listen.unwrap_or_else(|| DEFAULT_LISTEN.to_string()),
            path_views,
            logs_per_page: raw
                .logs_per_page
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_LOGS_PER_PAGE),
            keep_logs_days: raw
                .keep_logs_days
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_KEEP_LOGS_DAYS),
            database,
            auth,
        })
    }
}

fn validate_views_path(raw: Option<&str>) -> Result<PathBuf, ConfigError> {
    let raw = raw.unwrap_or_default();
    let trimmed = if raw == "/" { raw } else { raw.trim_end_matches('/') };
    if trimmed.is_empty() {
        return Err(ConfigError::ViewsPathMissing);
    }
    let path = PathBuf::from(trimmed);
    if !path.is_dir() {
        return Err(ConfigError::ViewsPathInvalid);
    }
    Ok(path)
}
