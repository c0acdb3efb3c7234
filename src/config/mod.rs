use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::{ShipyardError, ShipyardResult};

pub const DEFAULT_FEEDS_CONFIG: &str = "rss-feeds.json";
pub const DEFAULT_CONTENT_DIR: &str = "htdocs/rsscontent";
pub const DEFAULT_PREVIEW_DIR: &str = "htdocs/previews";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_INJECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub feeds_config: PathBuf,
    pub content_dir: PathBuf,
    pub preview_dir: PathBuf,
    pub base_url: String,
    pub fetch_timeout: Duration,
    pub inject_timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> ShipyardResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let feeds_config = std::env::var("FEEDS_CONFIG")
            .unwrap_or_else(|_| DEFAULT_FEEDS_CONFIG.to_string());

        let content_dir = std::env::var("CONTENT_DIR")
            .unwrap_or_else(|_| DEFAULT_CONTENT_DIR.to_string());

        let preview_dir = std::env::var("PREVIEW_DIR")
            .unwrap_or_else(|_| DEFAULT_PREVIEW_DIR.to_string());

        let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&base_url)?;

        let fetch_timeout = timeout_from_env("FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?;
        let inject_timeout = timeout_from_env("INJECT_TIMEOUT_SECS", DEFAULT_INJECT_TIMEOUT_SECS)?;

        Ok(Self {
            feeds_config: PathBuf::from(feeds_config),
            content_dir: PathBuf::from(content_dir),
            preview_dir: PathBuf::from(preview_dir),
            base_url,
            fetch_timeout,
            inject_timeout,
        })
    }
}

/// Validate the site base URL and strip any trailing slash
pub fn normalize_base_url(raw: &str) -> ShipyardResult<String> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| ShipyardError::Config(format!("BASE_URL '{}': {}", raw, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ShipyardError::Config(format!(
            "BASE_URL must be http or https, got '{}'",
            raw
        )));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn timeout_from_env(name: &str, default_secs: u64) -> ShipyardResult<Duration> {
    match std::env::var(name) {
        Ok(value) => {
            let secs: u64 = value.trim().parse().map_err(|_| {
                ShipyardError::Config(format!("{} must be a whole number of seconds", name))
            })?;
            if secs == 0 {
                return Err(ShipyardError::Config(format!("{} must be greater than zero", name)));
            }
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://opulentshipyardmonaco.com/").unwrap(),
            "https://opulentshipyardmonaco.com"
        );
        assert_eq!(
            normalize_base_url("http://localhost:3000").unwrap(),
            "http://localhost:3000"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
    }
}
