//! Path resolution
//!
//! Centralized directory path resolution with consistent fallback strategies.

use std::path::PathBuf;

// =============================================================================
// Path Constants (relative to home directory)
// =============================================================================

/// Data directory relative to home (logs)
const DATA_SUBDIR: &str = ".local/share/dentreg";

/// Configuration directory relative to home
const CONFIG_SUBDIR: &str = ".config/dentreg";

/// Log filename prefix (the appender adds the date)
pub const LOG_FILE: &str = "dentreg.log";

/// Configuration filename
const CONFIG_FILE: &str = "config.toml";

// =============================================================================
// Fallback Paths
// =============================================================================

/// Fallback data directory when home is unavailable
const FALLBACK_DATA_DIR: &str = "/tmp/dentreg";

/// Fallback config file when home is unavailable
const FALLBACK_CONFIG_FILE: &str = "/tmp/dentreg-config.toml";

// =============================================================================
// Path Resolution Functions
// =============================================================================

/// Get the data directory path
/// Falls back to /tmp/dentreg if home directory is unavailable
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DATA_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

/// Get the configuration file path
pub fn config_file_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(CONFIG_SUBDIR).join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_contains_name() {
        let path = data_dir();
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("dentreg") || path_str == FALLBACK_DATA_DIR,
            "Data dir should contain 'dentreg' or be fallback"
        );
    }

    #[test]
    fn test_config_path_is_toml() {
        assert!(config_file_path().to_string_lossy().ends_with(".toml"));
    }
}
