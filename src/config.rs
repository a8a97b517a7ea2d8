//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default backend used when `VITE_BACKEND_URL` is not set
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5001";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// View the client is sent to when the backend rejects the session
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
        }
    }
}

impl GatewayConfig {
    /// Create config pointing at a specific backend
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Base URL without trailing slashes
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

fn default_session_file() -> String {
    dirs::config_dir()
        .map(|p| {
            p.join("hospital-hub")
                .join("session.json")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

/// Debug database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("hospital-hub")
                .join("hospital_hub.db")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./hospital_hub.db".to_string())
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
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

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        config.expand_paths();

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

    /// Load from default locations or environment, logging what happened
    pub fn load_default() -> Self {
        let loaded = Self::discover();
        loaded.report();
        loaded.config
    }

    /// Search the default locations without logging
    ///
    /// Callers that install logging from the result call
    /// [`ConfigLoad::report`] once the subscriber is up.
    pub fn discover() -> ConfigLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("hospital-hub").join("config.toml")),
            Some(PathBuf::from("/etc/hospital-hub/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover_in(&config_paths)
    }

    /// First loadable file among `paths`, remembering every file that failed
    fn discover_in(paths: &[PathBuf]) -> ConfigLoad {
        let mut failures = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return ConfigLoad {
                        config,
                        source: Some(path.clone()),
                        failures,
                    }
                }
                Err(e) => failures.push(e),
            }
        }

        ConfigLoad {
            config: Self::from_env(),
            source: None,
            failures,
        }
    }

    /// Loaded from one explicit file
    pub fn load_reported(path: &Path) -> Result<ConfigLoad, ConfigError> {
        Ok(ConfigLoad {
            config: Self::load_with_env(path)?,
            source: Some(path.to_path_buf()),
            failures: Vec::new(),
        })
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (the process env in production)
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VITE_BACKEND_URL").filter(|u| !u.is_empty()) {
            self.gateway.base_url = url;
        }

        if let Some(file) = lookup("HOSPITAL_HUB_SESSION_FILE") {
            self.session.file = file;
        }

        if let Some(path) = lookup("HOSPITAL_HUB_DATABASE") {
            self.database.path = path;
        }

        if let Some(level) = lookup("HOSPITAL_HUB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("HOSPITAL_HUB_LOG_FORMAT") {
            self.logging.format = format;
        }

        self.expand_paths();
    }

    /// Resolve a leading `~` in file paths against the home directory
    fn expand_paths(&mut self) {
        let home = dirs::home_dir();
        self.session.file = expand_home(&self.session.file, home.as_deref());
        self.database.path = expand_home(&self.database.path, home.as_deref());
    }
}

/// Replace a leading `~` or `~/` with `home`; other paths pass through
fn expand_home(path: &str, home: Option<&Path>) -> String {
    let rest = if path == "~" {
        ""
    } else if let Some(rest) = path.strip_prefix("~/") {
        rest
    } else {
        return path.to_string();
    };

    match home {
        Some(home) if rest.is_empty() => home.to_string_lossy().into_owned(),
        Some(home) => home.join(rest).to_string_lossy().into_owned(),
        None => path.to_string(),
    }
}

/// Result of searching for a config file
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    /// File the config came from; `None` means defaults plus environment
    pub source: Option<PathBuf>,
    /// Files that existed but could not be loaded
    pub failures: Vec<ConfigError>,
}

impl ConfigLoad {
    /// Log the config source and every skipped file
    pub fn report(&self) {
        for failure in &self.failures {
            tracing::warn!("Skipping config file: {}", failure);
        }

        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::debug!("Using default config with environment overrides"),
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
    r#"# Hospital Hub Configuration
#
# Environment variables override these settings:
# - VITE_BACKEND_URL
# - HOSPITAL_HUB_SESSION_FILE
# - HOSPITAL_HUB_DATABASE
# - HOSPITAL_HUB_LOG_LEVEL
# - HOSPITAL_HUB_LOG_FORMAT

[gateway]
# Backend API base URL
base_url = "http://localhost:5001"

# Where the client goes when the backend rejects the session
login_path = "/login"

[session]
# Where the current login is kept between runs
file = "~/.config/hospital-hub/session.json"

[database]
# SQLite file used by hospital-debug
path = "~/.local/share/hospital-hub/hospital_hub.db"

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
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_backend_url() {
        let config = Config::default();
        assert_eq!(config.gateway.base_url, "http://localhost:5001");
        assert_eq!(config.gateway.login_path, "/login");
    }

    #[test]
    fn test_backend_url_override() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[("VITE_BACKEND_URL", "https://api.example.org")]));
        assert_eq!(config.gateway.base_url, "https://api.example.org");
    }

    #[test]
    fn test_empty_backend_url_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[("VITE_BACKEND_URL", "")]));
        assert_eq!(config.gateway.base_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_other_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("HOSPITAL_HUB_DATABASE", "/tmp/debug.db"),
            ("HOSPITAL_HUB_SESSION_FILE", "/tmp/session.json"),
            ("HOSPITAL_HUB_LOG_FORMAT", "json"),
        ]));
        assert_eq!(config.database.path, "/tmp/debug.db");
        assert_eq!(config.session.file, "/tmp/session.json");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_normalized_base_url() {
        let config = GatewayConfig::new("http://localhost:5001///");
        assert_eq!(config.normalized_base_url(), "http://localhost:5001");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.gateway.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway]\nbase_url = \"http://backend:9000\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.gateway.base_url, "http://backend:9000");
        assert_eq!(config.gateway.login_path, "/login");
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/nurse");
        assert_eq!(
            expand_home("~/.config/hospital-hub/session.json", Some(home)),
            "/home/nurse/.config/hospital-hub/session.json"
        );
        assert_eq!(expand_home("~", Some(home)), "/home/nurse");
        assert_eq!(expand_home("/var/lib/hub.db", Some(home)), "/var/lib/hub.db");
        assert_eq!(expand_home("~other/hub.db", Some(home)), "~other/hub.db");
        assert_eq!(expand_home("~/hub.db", None), "~/hub.db");
    }

    #[test]
    fn test_generated_config_paths_resolve_under_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, generate_default_config()).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(Path::new(&config.session.file).starts_with(&home));
        assert!(Path::new(&config.database.path).starts_with(&home));
        assert!(config.session.file.ends_with("hospital-hub/session.json"));
    }

    #[test]
    fn test_env_path_override_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[("HOSPITAL_HUB_DATABASE", "~/debug.db")]));
        assert_eq!(Path::new(&config.database.path), home.join("debug.db"));
    }

    #[test]
    fn test_broken_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[gateway\nbase_url = ").unwrap();
        std::fs::write(&good, "[gateway]\nbase_url = \"http://backend:9000\"\n").unwrap();

        let loaded = Config::discover_in(&[broken.clone(), dir.path().join("absent.toml"), good.clone()]);

        assert_eq!(loaded.source.as_deref(), Some(good.as_path()));
        assert_eq!(loaded.failures.len(), 1);
        assert!(matches!(&loaded.failures[0], ConfigError::Parse { path, .. } if path == &broken));
        assert!(loaded.failures[0].to_string().contains("broken.toml"));
    }

    #[test]
    fn test_only_broken_file_falls_back_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "not = [toml").unwrap();

        let loaded = Config::discover_in(&[broken]);

        assert!(loaded.source.is_none());
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.config.gateway.login_path, "/login");
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway\nbase_url = ").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }
}
