//! Configuration loading for the console.
//!
//! Settings come from a TOML file (path in `CONFIG_PATH`, default
//! `config.toml`) with environment overrides for secrets. A missing file is
//! not an error: every section has usable defaults.

/// Console screen settings
pub mod console;
/// SMS gateway settings
pub mod gateway;

pub use console::ConsoleConfig;
pub use gateway::GatewayConfig;

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// The entire application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Console screen settings
    pub console: ConsoleConfig,
    /// SMS gateway settings
    pub gateway: GatewayConfig,
}

/// Parses configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] when the file exists but cannot be read or
/// parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("failed to read config file: {e}"),
    })?;
    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("failed to parse config file: {e}"),
    })
}

/// Loads the application configuration: TOML file if present, defaults
/// otherwise, then environment overrides (`SMS_API_KEY`).
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

    let mut config = if Path::new(&path).exists() {
        let config = load_config(&path)?;
        info!("loaded configuration from {}", path);
        config
    } else {
        warn!("config file {} not found, using defaults", path);
        AppConfig::default()
    };

    if let Ok(api_key) = std::env::var("SMS_API_KEY") {
        config.gateway.api_key = api_key;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [console]
            page_size = 15
            form_link_base = "https://forms.test/install"
            export_prefix = "orders"

            [gateway]
            enabled = true
            base_url = "https://sms.test/send"
            sender_id = "TESTSD"
            success_marker = "OK"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.console.page_size, 15);
        assert_eq!(config.console.form_link_base, "https://forms.test/install");
        assert!(config.gateway.enabled);
        assert_eq!(config.gateway.success_marker, "OK");
    }

    #[test]
    fn test_empty_config_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.console.page_size, 10);
        assert!(!config.gateway.enabled);
    }
}
