//! Configuration file support
//!
//! Loads configuration from TOML file at ~/.config/dentreg/config.toml
//! Falls back to defaults if the file doesn't exist or can't be parsed.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants;
use crate::paths::config_file_path;

/// dentreg configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Registration backend settings
    pub backend: BackendConfig,

    /// Wizard behaviour
    pub wizard: WizardConfig,
}

/// Registration backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend, without trailing slash
    pub base_url: String,

    /// Route registrations are POSTed to
    pub registrations_path: String,

    /// Timeout for submission requests (seconds)
    pub timeout_secs: u64,

    /// User agent header value
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_API_BASE_URL.to_string(),
            registrations_path: constants::DEFAULT_REGISTRATIONS_PATH.to_string(),
            timeout_secs: constants::HTTP_CLIENT_TIMEOUT_SECS,
            user_agent: constants::USER_AGENT.to_string(),
        }
    }
}

impl BackendConfig {
    /// Full URL registrations are sent to
    pub fn registrations_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.registrations_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Wizard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Log submissions instead of sending them to the backend
    pub dry_run: bool,
}

impl AppConfig {
    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file, or return defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Apply command line overrides on top of the file values
    pub fn with_overrides(mut self, api_url: Option<String>, dry_run: bool) -> Self {
        if let Some(url) = api_url {
            self.backend.base_url = url;
        }
        if dry_run {
            self.wizard.dry_run = true;
        }
        self
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(!config.wizard.dry_run);
        assert_eq!(
            config.backend.registrations_url(),
            "http://localhost:5000/api/users"
        );
    }

    #[test]
    fn test_partial_config_parsing() {
        let toml_str = r#"
[backend]
base_url = "https://clinic.example.org/"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.backend.registrations_url(),
            "https://clinic.example.org/api/users"
        );
        // Other values should be defaults
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(!config.wizard.dry_run);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some("http://10.0.0.2:8080".to_string()), true);
        assert_eq!(config.backend.base_url, "http://10.0.0.2:8080");
        assert!(config.wizard.dry_run);
    }

    #[test]
    fn test_toml_output_is_valid() {
        let rendered = AppConfig::default().to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.backend.user_agent, "dentreg");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/dentreg/config.toml"));
        assert_eq!(config.backend.timeout_secs, 10);
    }
}
