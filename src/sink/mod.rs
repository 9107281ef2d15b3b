//! Submission sinks
//!
//! A sink accepts a finished registration and reports success or failure.
//! The wizard does not know how a sink persists anything.

pub mod dry_run;
pub mod errors;
pub mod http;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

use crate::config::AppConfig;
use crate::wizard::{FormData, Variant};

pub use dry_run::DryRunSink;
pub use errors::ParsedError;
pub use http::HttpSink;

/// What gets handed to a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPayload")]
pub struct SubmissionPayload {
    pub variant: Variant,
    pub fields: FormData,
}

/// Wire form of a payload; `fields` is read as the type `variant` names
#[derive(Deserialize)]
struct RawPayload {
    variant: Variant,
    fields: serde_json::Value,
}

impl TryFrom<RawPayload> for SubmissionPayload {
    type Error = serde_json::Error;

    fn try_from(raw: RawPayload) -> Result<Self, Self::Error> {
        let fields = match raw.variant {
            Variant::Clinic => FormData::Clinic(serde_json::from_value(raw.fields)?),
            Variant::JobSeeker => FormData::JobSeeker(serde_json::from_value(raw.fields)?),
        };
        Ok(Self {
            variant: raw.variant,
            fields,
        })
    }
}

/// Acknowledgement returned by a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    /// Identifier the backend assigned, if it reported one
    pub id: Option<String>,
    pub message: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl Ack {
    pub fn new(id: Option<String>, message: Option<String>) -> Self {
        Self {
            id,
            message,
            received_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not reach the registration server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server rejected the registration (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("could not encode the registration: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("submission sink unavailable: {0}")]
    Unavailable(String),
}

/// Accepts a payload, returns success or failure
pub trait SubmissionSink {
    fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<Ack, SubmitError>> + Send;
}

/// Sink selected by configuration
#[derive(Debug, Clone)]
pub enum ConfiguredSink {
    Http(HttpSink),
    DryRun(DryRunSink),
}

impl ConfiguredSink {
    pub fn from_config(config: &AppConfig) -> Result<Self, SubmitError> {
        if config.wizard.dry_run {
            tracing::info!("Dry run enabled, registrations will only be logged");
            return Ok(ConfiguredSink::DryRun(DryRunSink));
        }
        Ok(ConfiguredSink::Http(HttpSink::new(&config.backend)?))
    }

    /// Where submissions end up, for display
    pub fn describe(&self) -> String {
        match self {
            ConfiguredSink::Http(sink) => sink.url().to_string(),
            ConfiguredSink::DryRun(_) => "dry run (log only)".to_string(),
        }
    }
}

impl SubmissionSink for ConfiguredSink {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<Ack, SubmitError> {
        match self {
            ConfiguredSink::Http(sink) => sink.submit(payload).await,
            ConfiguredSink::DryRun(sink) => sink.submit(payload).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_json_shape() {
        let payload = SubmissionPayload {
            variant: Variant::Clinic,
            fields: FormData::new(Variant::Clinic),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["variant"], "clinic");
        assert_eq!(json["fields"]["hiringPlans"], false);
        assert_eq!(json["fields"]["workingHours"]["start"], "");
        assert!(json["fields"]["specializations"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_payload_fields_must_match_variant() {
        let clinic = serde_json::to_value(FormData::new(Variant::Clinic)).unwrap();
        let mismatched = serde_json::json!({ "variant": "jobseeker", "fields": clinic.clone() });
        assert!(serde_json::from_value::<SubmissionPayload>(mismatched).is_err());

        let matching = serde_json::json!({ "variant": "clinic", "fields": clinic });
        let payload: SubmissionPayload = serde_json::from_value(matching).unwrap();
        assert_eq!(payload.variant, Variant::Clinic);
        assert_eq!(payload.fields.variant(), Variant::Clinic);
    }

    #[test]
    fn test_configured_sink_dry_run() {
        let mut config = AppConfig::default();
        config.wizard.dry_run = true;
        let sink = ConfiguredSink::from_config(&config).unwrap();
        assert!(matches!(sink, ConfiguredSink::DryRun(_)));
    }

    #[test]
    fn test_configured_sink_http_url() {
        let sink = ConfiguredSink::from_config(&AppConfig::default()).unwrap();
        assert_eq!(sink.describe(), "http://localhost:5000/api/users");
    }

    #[tokio::test]
    async fn test_configured_dry_run_acknowledges() {
        let sink = ConfiguredSink::DryRun(DryRunSink);
        let payload = SubmissionPayload {
            variant: Variant::JobSeeker,
            fields: FormData::new(Variant::JobSeeker),
        };
        let ack = sink.submit(&payload).await.unwrap();
        assert!(ack.id.is_none());
    }
}
