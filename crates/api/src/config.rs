use std::path::PathBuf;

use auriga_scripts::fetcher::{DEFAULT_API_BASE_URL, DEFAULT_RAW_BASE_URL};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        }
    }
}

/// Script acquisition configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    /// Base URL for raw script content.
    pub raw_base_url: String,
    /// Base URL for the script repository's commit API.
    pub api_base_url: String,
    /// Directory holding locally cached script templates.
    pub cache_dir: PathBuf,
    /// API token injected into generated scripts; absent means
    /// unauthenticated.
    pub token: Option<String>,
}

impl ScriptConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                               |
    /// |-----------------------|---------------------------------------|
    /// | `SCRIPT_RAW_BASE_URL` | canonical script repository (raw)     |
    /// | `SCRIPT_API_BASE_URL` | canonical script repository (commits) |
    /// | `SCRIPT_CACHE_DIR`    | `./script-cache`                      |
    /// | `GITHUB_API_TOKEN`    | unset                                 |
    pub fn from_env() -> Self {
        let raw_base_url = std::env::var("SCRIPT_RAW_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_RAW_BASE_URL.into());
        let api_base_url = std::env::var("SCRIPT_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
        let cache_dir = std::env::var("SCRIPT_CACHE_DIR")
            .unwrap_or_else(|_| "./script-cache".into())
            .into();
        let token = std::env::var("GITHUB_API_TOKEN").ok();

        Self {
            raw_base_url,
            api_base_url,
            cache_dir,
            token,
        }
    }
}
