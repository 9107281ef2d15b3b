//! HTTP sink posting registrations to the clinic backend

use serde::Deserialize;

use super::{Ack, SubmissionPayload, SubmissionSink, SubmitError};
use crate::config::BackendConfig;

/// Body the backend answers with. Both success and error responses may
/// carry a `message`; created documents report their `_id`.
#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ResponseBody {
    /// Mongo documents may carry both `_id` and the `id` virtual
    fn id(&self) -> Option<String> {
        self.mongo_id.clone().or_else(|| self.id.clone())
    }
}

fn parse_body(body: &str) -> ResponseBody {
    serde_json::from_str(body).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
}

impl HttpSink {
    pub fn new(config: &BackendConfig) -> Result<Self, SubmitError> {
        let base = config.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(SubmitError::Unavailable(format!(
                "backend URL '{}' is not an http(s) URL",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.registrations_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SubmissionSink for HttpSink {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<Ack, SubmitError> {
        tracing::info!("Submitting {} registration to {}", payload.variant.tag(), self.url);

        let response = self.client.post(&self.url).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed = parse_body(&body);

        if !status.is_success() {
            let message = parsed
                .message
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "no reason given".to_string());
            tracing::warn!("Registration rejected with HTTP {}: {}", status.as_u16(), message);
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let id = parsed.id();
        tracing::info!("Registration accepted (id: {:?})", id);
        Ok(Ack::new(id, parsed.message))
    }
}
