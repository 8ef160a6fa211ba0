//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `people.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values. The result is built once at startup and
//! passed by reference to whatever needs it.

use std::path::PathBuf;

use serde::Deserialize;

use people_adapter_http_axum::router::WebConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Static files and CORS.
    pub web: WebConfig,
    /// Deployment facts reported by `/api/meta`.
    pub app: AppSection,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Explicit database file path; wins over every heuristic.
    pub path: Option<PathBuf>,
    /// Running on the hosting platform (enables persistent-mount detection).
    pub hosted: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Deployment description.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Environment name, e.g. `production` or `development`.
    pub environment: String,
}

impl Config {
    /// Load configuration from `people.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("people.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("PORT") {
            if let Ok(port) = val.trim().parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("DATABASE_PATH").filter(|val| !val.trim().is_empty()) {
            self.database.path = Some(PathBuf::from(val));
        }
        if let Some(val) = var("RENDER") {
            self.database.hosted = !val.trim().is_empty();
        }
        if let Some(val) = var("ALLOWED_ORIGINS") {
            self.web.allowed_origins = parse_origins(&val);
        }
        if let Some(val) = var("STATIC_DIR") {
            self.web.static_dir = PathBuf::from(val);
        }
        if let Some(val) = var("APP_ENV") {
            self.app.environment = val;
        }
        if let Some(val) = var("PEOPLE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "peopled=info,people=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
