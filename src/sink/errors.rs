//! Submission error categorization
//!
//! Turns a `SubmitError` into a user-friendly message with an actionable
//! suggestion, shown on the final wizard step so the user can retry.

use regex::Regex;
use std::sync::LazyLock;

use super::SubmitError;

/// Parsed error with user-friendly information
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedError {
    /// Short summary (one line)
    pub summary: String,
    /// Longer description if available
    pub detail: Option<String>,
    /// User-friendly suggestion
    pub suggestion: String,
}

// MongoDB duplicate key error, e.g.
// E11000 duplicate key error collection: clinic.users index: email_1 dup key: { email: "a@b.c" }
static DUPLICATE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"E11000 duplicate key error.*?index:\s*([A-Za-z0-9_]+?)(?:_-?1)?\s+dup key").unwrap()
});

// Mongoose validation error, e.g.
// User validation failed: email: Path `email` is required.
static VALIDATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"validation failed:\s*([A-Za-z0-9_]+):\s*(.*)").unwrap());

impl ParsedError {
    pub fn from_submit_error(err: &SubmitError) -> Self {
        match err {
            SubmitError::Transport(e) => parse_transport_error(e),
            SubmitError::Rejected { status, message } => parse_rejection(*status, message),
            SubmitError::Encode(e) => ParsedError {
                summary: "Could not prepare the registration".to_string(),
                detail: Some(e.to_string()),
                suggestion: "Check the attached file and entered values.".to_string(),
            },
            SubmitError::Unavailable(reason) => ParsedError {
                summary: "Registration service unavailable".to_string(),
                detail: Some(reason.clone()),
                suggestion: "Check the backend URL in config.toml or pass --api-url.".to_string(),
            },
        }
    }
}

fn parse_transport_error(err: &reqwest::Error) -> ParsedError {
    let (summary, suggestion) = if err.is_timeout() {
        (
            "Connection timed out",
            "The registration server did not answer in time. Try again.",
        )
    } else if err.is_connect() {
        (
            "Cannot reach the registration server",
            "Check your internet connection and the configured API URL.",
        )
    } else {
        (
            "Network error",
            "Something went wrong while sending. Try again.",
        )
    };

    ParsedError {
        summary: summary.to_string(),
        detail: Some(err.to_string()),
        suggestion: suggestion.to_string(),
    }
}

fn parse_rejection(status: u16, message: &str) -> ParsedError {
    if let Some(caps) = DUPLICATE_KEY_RE.captures(message) {
        let field = caps.get(1).map(|m| m.as_str().to_string());
        return ParsedError {
            summary: "Already registered".to_string(),
            detail: field.map(|f| format!("A registration with this {} already exists", f)),
            suggestion: "Use different contact details or contact the clinic team.".to_string(),
        };
    }

    if let Some(caps) = VALIDATION_RE.captures(message) {
        let field = caps.get(1).map_or("", |m| m.as_str());
        let reason = caps.get(2).map_or("", |m| m.as_str().trim());
        return ParsedError {
            summary: format!("Invalid value for {}", field),
            detail: Some(reason.to_string()),
            suggestion: "Go back and correct the highlighted field.".to_string(),
        };
    }

    let (summary, suggestion) = match status {
        400 | 422 => (
            "Registration was not accepted".to_string(),
            "Review the entered values and submit again.".to_string(),
        ),
        401 | 403 => (
            "Not allowed to register".to_string(),
            "The server refused the request. Contact the clinic team.".to_string(),
        ),
        404 => (
            "Registration endpoint not found".to_string(),
            "Check the configured API URL and registrations path.".to_string(),
        ),
        409 => (
            "Already registered".to_string(),
            "Use different contact details or contact the clinic team.".to_string(),
        ),
        502..=504 => (
            format!("Server temporarily unavailable (HTTP {})", status),
            "Try again in a few minutes.".to_string(),
        ),
        _ => (
            format!("Server error (HTTP {})", status),
            "Your answers are kept. Try submitting again.".to_string(),
        ),
    };

    ParsedError {
        summary,
        detail: if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        },
        suggestion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: u16, message: &str) -> ParsedError {
        ParsedError::from_submit_error(&SubmitError::Rejected {
            status,
            message: message.to_string(),
        })
    }

    #[test]
    fn test_duplicate_key() {
        let err = rejected(
            500,
            r#"E11000 duplicate key error collection: clinic.users index: email_1 dup key: { email: "jane@example.com" }"#,
        );
        assert_eq!(err.summary, "Already registered");
        assert_eq!(
            err.detail.as_deref(),
            Some("A registration with this email already exists")
        );
    }

    #[test]
    fn test_validation_error() {
        let err = rejected(400, "User validation failed: email: Path `email` is required.");
        assert_eq!(err.summary, "Invalid value for email");
        assert_eq!(err.detail.as_deref(), Some("Path `email` is required."));
    }

    #[test]
    fn test_generic_server_error() {
        let err = rejected(500, "Something went wrong!");
        assert_eq!(err.summary, "Server error (HTTP 500)");
        assert_eq!(err.detail.as_deref(), Some("Something went wrong!"));
    }

    #[test]
    fn test_gateway_error() {
        let err = rejected(503, "");
        assert!(err.summary.contains("503"));
        assert!(err.detail.is_none());
    }

    #[test]
    fn test_not_found() {
        assert_eq!(rejected(404, "Not Found").summary, "Registration endpoint not found");
    }

    #[test]
    fn test_unavailable() {
        let err = ParsedError::from_submit_error(&SubmitError::Unavailable("maintenance".into()));
        assert_eq!(err.detail.as_deref(), Some("maintenance"));
    }
}
