//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::call::JoinDetails;
use crate::endpoints;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub video: VideoConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote counseling API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Base URL without trailing slash
    pub fn base(&self) -> String {
        endpoints::normalize_base(&self.base_url)
    }
}

/// Hosted video SDK
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoConfig {
    #[serde(default)]
    pub app_id: String,
}

impl VideoConfig {
    /// Join details for `channel` under this SDK project
    pub fn join_details(&self, channel: &str, uid: &str, token: String) -> JoinDetails {
        JoinDetails {
            app_id: self.app_id.clone(),
            channel_name: channel.to_string(),
            uid: uid.to_string(),
            token,
        }
    }
}

/// Where the CLI keeps its session
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    pub file: Option<String>,
}

impl SessionConfig {
    pub fn path(&self) -> PathBuf {
        self.file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(crate::session::FileSessionStore::default_path)
    }
}

/// Static host for the built SPA
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_dist_dir() -> String {
    "counselhub-ui/dist".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dist_dir: default_dist_dir(),
        }
    }
}

impl WebConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over the configured level; `extra` adds directives for
    /// other crates (e.g. `tower_http=debug`).
    pub fn init(&self, extra: &[&str]) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let mut directives = vec![format!("counselhub={}", self.level)];
            directives.extend(extra.iter().map(|d| d.to_string()));
            EnvFilter::new(directives.join(","))
        });

        let registry = tracing_subscriber::registry().with(filter);
        if self.format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("counselhub").join("config.toml")),
            Some(PathBuf::from("/etc/counselhub/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("COUNSELHUB_API_URL") {
            self.api.base_url = url;
        }
        if let Some(app_id) = var("COUNSELHUB_VIDEO_APP_ID") {
            self.video.app_id = app_id;
        }
        if let Some(file) = var("COUNSELHUB_SESSION_FILE") {
            self.session.file = Some(file);
        }

        if let Some(host) = var("COUNSELHUB_WEB_HOST") {
            self.web.host = host;
        }
        if let Some(port) = var("COUNSELHUB_WEB_PORT") {
            if let Ok(p) = port.parse() {
                self.web.port = p;
            }
        }
        if let Some(dist) = var("COUNSELHUB_WEB_DIST") {
            self.web.dist_dir = dist;
        }

        if let Some(level) = var("COUNSELHUB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("COUNSELHUB_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# CounselHub Configuration
#
# Environment variables override these settings:
# - COUNSELHUB_API_URL
# - COUNSELHUB_VIDEO_APP_ID
# - COUNSELHUB_SESSION_FILE
# - COUNSELHUB_WEB_HOST
# - COUNSELHUB_WEB_PORT
# - COUNSELHUB_WEB_DIST
# - COUNSELHUB_LOG_LEVEL
# - COUNSELHUB_LOG_FORMAT

[api]
# Base URL of the counseling REST API
base_url = "http://localhost:5000/api"

# Request timeout in seconds
request_timeout_secs = 30

[video]
# App id of the hosted video SDK project
app_id = ""

[session]
# Where the CLI stores the login session
# file = "~/.local/share/counselhub/session.json"

[web]
# Static host for the built single-page app
host = "0.0.0.0"
port = 8084
dist_dir = "counselhub-ui/dist"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.web.port, 8084);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.session.file.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"https://x/api/\"\n").unwrap();
        assert_eq!(config.api.base(), "https://x/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.web.addr(), "0.0.0.0:8084");
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "COUNSELHUB_API_URL" => Some("https://api.example.com".to_string()),
            "COUNSELHUB_WEB_PORT" => Some("not-a-port".to_string()),
            "COUNSELHUB_SESSION_FILE" => Some("/tmp/s.json".to_string()),
            _ => None,
        });

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.web.port, 8084);
        assert_eq!(config.session.path(), PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_video_app_id_reaches_join_details() {
        let mut config = Config::default();
        assert!(!config
            .video
            .join_details("a1", "42", "tok".into())
            .has_app_id());

        config.apply_overrides(|key| {
            (key == "COUNSELHUB_VIDEO_APP_ID").then(|| "agora-app".to_string())
        });
        let details = config.video.join_details("a1", "42", "tok".into());
        assert_eq!(details.app_id, "agora-app");
        assert_eq!(details.channel_name, "a1");
        assert_eq!(details.token, "tok");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[web]\nport = \"eighty\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
