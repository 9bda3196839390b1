//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Deployment environment ("development", "production", ...)
    pub environment: String,
    /// Origins allowed by CORS; `*` mirrors any origin
    pub cors_origins: Vec<String>,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
    /// Directory holding `episodes.json`, `about.md` and `faq.json`
    pub content_dir: PathBuf,
    /// Lifetime of cached API responses in seconds
    pub cache_ttl: u64,
    /// Interval between response cache sweeps in seconds
    pub cache_sweep_interval: u64,
    /// Requests admitted per client per window
    pub rate_limit: usize,
    /// Rate limit window in seconds
    pub rate_limit_window: u64,
    /// Interval between rate limiter sweeps in seconds
    pub rate_limit_sweep_interval: u64,
    /// Maximum time a request may take before a 408 in seconds
    pub request_timeout: u64,
    /// Grace period for in-flight requests on shutdown in seconds
    pub shutdown_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3001)
    /// - `APP_ENV` - Deployment environment (default: development)
    /// - `CORS_ORIGINS` - Comma-separated allowed origins (default: http://localhost:3000)
    /// - `LOG_LEVEL` - Default log level (default: info)
    /// - `CONTENT_DIR` - Content file directory (default: content)
    /// - `CACHE_TTL` - Response cache TTL in seconds (default: 300)
    /// - `CACHE_SWEEP_INTERVAL` - Cache sweep frequency in seconds (default: 300)
    /// - `RATE_LIMIT` - Requests per window per client (default: 100)
    /// - `RATE_LIMIT_WINDOW` - Window length in seconds (default: 60)
    /// - `RATE_LIMIT_SWEEP_INTERVAL` - Rate limiter sweep frequency in seconds (default: 300)
    /// - `REQUEST_TIMEOUT` - Per-request deadline in seconds (default: 15)
    /// - `SHUTDOWN_TIMEOUT` - Graceful shutdown deadline in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            environment: string_var("APP_ENV").unwrap_or(defaults.environment),
            cors_origins: string_var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or(defaults.cors_origins),
            log_level: string_var("LOG_LEVEL").unwrap_or(defaults.log_level),
            content_dir: string_var("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.content_dir),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_sweep_interval: parse_var("CACHE_SWEEP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cache_sweep_interval),
            rate_limit: parse_var("RATE_LIMIT").unwrap_or(defaults.rate_limit),
            rate_limit_window: parse_var("RATE_LIMIT_WINDOW").unwrap_or(defaults.rate_limit_window),
            rate_limit_sweep_interval: parse_var("RATE_LIMIT_SWEEP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.rate_limit_sweep_interval),
            request_timeout: parse_var("REQUEST_TIMEOUT")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout),
            shutdown_timeout: parse_var("SHUTDOWN_TIMEOUT").unwrap_or(defaults.shutdown_timeout),
        }
    }

    /// Returns true if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn episodes_path(&self) -> PathBuf {
        self.content_dir.join("episodes.json")
    }

    pub fn about_path(&self) -> PathBuf {
        self.content_dir.join("about.md")
    }

    pub fn faq_path(&self) -> PathBuf {
        self.content_dir.join("faq.json")
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3001,
            environment: "development".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            log_level: "info".to_string(),
            content_dir: PathBuf::from("content"),
            cache_ttl: 300,
            cache_sweep_interval: 300,
            rate_limit: 100,
            rate_limit_window: 60,
            rate_limit_sweep_interval: 300,
            request_timeout: 15,
            shutdown_timeout: 30,
        }
    }
}

fn string_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    string_var(key).and_then(|value| value.trim().parse().ok())
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.rate_limit, 100);
        assert_eq!(config.rate_limit_window, 60);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
        assert!(!config.is_production());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for key in [
            "PORT",
            "APP_ENV",
            "CORS_ORIGINS",
            "CACHE_TTL",
            "RATE_LIMIT",
            "RATE_LIMIT_WINDOW",
        ] {
            env::remove_var(key);
        }

        let config = Config::from_env();
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.environment, "development");
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.rate_limit, 100);
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_content_paths() {
        let config = Config {
            content_dir: PathBuf::from("/srv/site"),
            ..Config::default()
        };
        assert_eq!(config.episodes_path(), PathBuf::from("/srv/site/episodes.json"));
        assert_eq!(config.about_path(), PathBuf::from("/srv/site/about.md"));
        assert_eq!(config.faq_path(), PathBuf::from("/srv/site/faq.json"));
    }
}
