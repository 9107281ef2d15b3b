//! Sink that only logs what would have been sent

use super::{Ack, SubmissionPayload, SubmissionSink, SubmitError};

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunSink;

impl SubmissionSink for DryRunSink {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<Ack, SubmitError> {
        let json = serde_json::to_string_pretty(payload)?;
        tracing::info!("Dry run {} registration:\n{}", payload.variant.tag(), json);
        Ok(Ack::new(None, Some("dry run, nothing sent".to_string())))
    }
}
