//! Configuration management for the RAX file manager
//!
//! Everything here is startup configuration: it is read once, validated, and
//! never changes while the server runs.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Complete server configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    /// Environment: RAX_FM_BIND_ADDRESS
    pub bind_address: String,

    /// Port for the HTTP listener
    /// Environment: RAX_FM_PORT
    pub port: u16,

    /// Directory every operation is confined to
    /// Environment: RAX_FM_SANDBOX_ROOT
    pub sandbox_root: String,

    /// Label shown in front of browse paths (`data/docs/`)
    pub root_label: String,

    /// Create the sandbox root at startup when it is missing
    pub create_root: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8000,
            sandbox_root: "./data".to_string(),
            root_label: "data".to_string(),
            create_root: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from a specific file (extension optional); a missing file leaves defaults.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("sandbox_root", defaults.sandbox_root)?
            .set_default("root_label", defaults.root_label)?
            .set_default("create_root", defaults.create_root)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("RAX_FM"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Message("bind_address cannot be empty".into()));
        }

        if self.sandbox_root.trim().is_empty() {
            return Err(ConfigError::Message("sandbox_root cannot be empty".into()));
        }

        if self.root_label.is_empty() || self.root_label.contains('/') {
            return Err(ConfigError::Message(
                "root_label must be a non-empty name without '/'".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get sandbox root as PathBuf
    pub fn sandbox_root_path(&self) -> PathBuf {
        PathBuf::from(&self.sandbox_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr(), "127.0.0.1:8000");
        assert_eq!(config.sandbox_root_path(), PathBuf::from("./data"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            sandbox_root: "  ".into(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            root_label: "a/b".into(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("fm.toml");
        fs::write(
            &file,
            "bind_address = \"0.0.0.0\"\nport = 9100\nsandbox_root = \"/srv/files\"\nroot_label = \"files\"\n",
        )
        .unwrap();

        let config = ServerConfig::load_from(file.to_str().unwrap()).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.port, 9100);
        assert_eq!(config.sandbox_root, "/srv/files");
        assert_eq!(config.root_label, "files");
        assert!(config.create_root);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("bad.toml");
        fs::write(&file, "port = 0\n").unwrap();

        assert!(ServerConfig::load_from(file.to_str().unwrap()).is_err());
    }
}
