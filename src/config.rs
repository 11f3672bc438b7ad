//! Branch Office configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main Branch Office configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchOfficeConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl BranchOfficeConfig {
    /// Load configuration from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::Config("server.host must not be empty".to_string()));
        }
        if self.server.port == 0 {
            return Err(Error::Config("server.port must not be 0".to_string()));
        }
        Ok(())
    }

    /// Default configuration file location (~/.config/branch-office/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join("branch-office").join("config.toml"))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins (empty = any)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 18080,
            cors_origins: Vec::new(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory; holds `numbers.json`
    pub base_dir: PathBuf,

    /// Memorandum records directory
    pub memorandums_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs_next::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("branch-office");

        Self {
            memorandums_dir: base.join("memorandums"),
            base_dir: base,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BranchOfficeConfig::default();
        assert_eq!(config.server.port, 18080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.server.cors_origins.is_empty());
        assert!(config.storage.memorandums_dir.starts_with(&config.storage.base_dir));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let config = BranchOfficeConfig::load(None).unwrap();
        assert_eq!(config.server.port, 18080);
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000
cors_origins = ["http://localhost:5173"]

[logging]
json = true
"#
        )
        .unwrap();

        let config = BranchOfficeConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.cors_origins.len(), 1);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_rejects_port_zero() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 0").unwrap();
        assert!(matches!(
            BranchOfficeConfig::load(Some(file.path())),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = BranchOfficeConfig::load(Some(Path::new("/nonexistent/branch-office.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(matches!(
            BranchOfficeConfig::load(Some(file.path())),
            Err(Error::TomlDe(_))
        ));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = BranchOfficeConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: BranchOfficeConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.storage.base_dir, config.storage.base_dir);
    }
}
