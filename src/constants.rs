//! Application-wide constants

// =============================================================================
// Backend
// =============================================================================

/// Default base URL of the registration backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Route the backend mounts its user registration router on
pub const DEFAULT_REGISTRATIONS_PATH: &str = "/api/users";

/// Timeout for HTTP submission requests (seconds)
pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 10;

/// User agent sent with every submission
pub const USER_AGENT: &str = "dentreg";

// =============================================================================
// Terminal UI
// =============================================================================

/// Event poll timeout in milliseconds
pub const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Spinner animation interval in milliseconds
pub const SPINNER_TICK_MS: u128 = 100;

/// Channel buffer size for app messages
pub const MESSAGE_CHANNEL_SIZE: usize = 32;

/// Maximum length for user text input (prevents memory exhaustion)
pub const MAX_INPUT_LENGTH: usize = 200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrations_path_is_absolute() {
        assert!(DEFAULT_REGISTRATIONS_PATH.starts_with('/'));
        assert!(!DEFAULT_API_BASE_URL.ends_with('/'));
    }

    #[test]
    fn test_spinner_faster_than_poll() {
        assert!(SPINNER_TICK_MS <= EVENT_POLL_TIMEOUT_MS as u128);
    }
}
