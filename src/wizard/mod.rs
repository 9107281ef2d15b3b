//! Registration wizard
//!
//! This module is split into:
//! - `variant.rs` - Variant and its fixed step list
//! - `schema.rs` - per-variant field tables and option catalogs
//! - `fields.rs` - stored values (`FormData`)
//! - `error.rs` - error types
//!
//! `WizardState` is the pure state (position + values). `WizardController`
//! wraps it with submission, disposal and the host's close callback.

pub mod error;
pub mod fields;
pub mod schema;
pub mod variant;

use std::fmt;

use crate::sink::{Ack, SubmissionPayload, SubmissionSink, SubmitError};

pub use error::{AttachmentError, WizardError};
pub use fields::{Attachment, ClinicFields, FieldValue, FormData, JobSeekerFields, WorkingHours};
pub use schema::{FieldKind, FieldSpec, SPECIALIZATIONS, WORKING_DAYS};
pub use variant::{Step, Variant};

/// Position and collected values of one wizard run
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    variant: Variant,
    steps: &'static [Step],
    current_index: usize,
    fields: FormData,
}

impl WizardState {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            steps: variant.steps(),
            current_index: 0,
            fields: FormData::new(variant),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn fields(&self) -> &FormData {
        &self.fields
    }

    pub fn current_step(&self) -> &'static Step {
        &self.steps[self.current_index]
    }

    pub fn is_first_step(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_final_step(&self) -> bool {
        self.current_index == self.steps.len() - 1
    }

    /// Advance one step; stays put on the last step
    pub fn next(&mut self) {
        self.current_index = (self.current_index + 1).min(self.steps.len() - 1);
    }

    /// Go back one step; stays put on the first step
    pub fn previous(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Schema entries shown on the current step
    pub fn step_fields(&self) -> Vec<&'static FieldSpec> {
        self.variant.fields_for_step(self.current_step().id)
    }

    pub fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields.get(name)
    }

    /// Replace the value of a schema field
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), WizardError> {
        let spec = self.spec(name)?;
        let value = normalize(spec, value)?;
        let variant = self.variant;
        let slot = self
            .fields
            .slot_mut(spec.name)
            .ok_or_else(|| unknown_field(variant, name))?;
        slot.assign(value).map_err(|_| WizardError::FieldTypeMismatch {
            field: spec.name.to_string(),
            expected: spec.kind,
        })
    }

    /// Add or remove one entry of a set field. Returns whether the entry is
    /// now present.
    pub fn toggle_option(&mut self, name: &str, option: &str) -> Result<bool, WizardError> {
        let spec = self.spec(name)?;
        let mut items = match self.fields.get(spec.name) {
            Some(FieldValue::Set(items)) => items,
            _ => {
                return Err(WizardError::FieldTypeMismatch {
                    field: spec.name.to_string(),
                    expected: spec.kind,
                })
            }
        };

        let selected = if let Some(pos) = items.iter().position(|i| i == option) {
            items.remove(pos);
            false
        } else {
            items.push(option.to_string());
            true
        };

        self.set_field(spec.name, FieldValue::Set(items))?;
        Ok(selected)
    }

    fn spec(&self, name: &str) -> Result<&'static FieldSpec, WizardError> {
        self.variant
            .field_spec(name)
            .ok_or_else(|| unknown_field(self.variant, name))
    }
}

fn unknown_field(variant: Variant, name: &str) -> WizardError {
    WizardError::UnknownField {
        variant: variant.tag().to_string(),
        field: name.to_string(),
    }
}

/// Check a value against its field spec and bring sets into canonical form:
/// catalog sets follow catalog order, free lists are trimmed and deduplicated.
fn normalize(spec: &FieldSpec, value: FieldValue) -> Result<FieldValue, WizardError> {
    let mismatch = || WizardError::FieldTypeMismatch {
        field: spec.name.to_string(),
        expected: spec.kind,
    };

    match (spec.kind, value) {
        (FieldKind::Text, v @ FieldValue::Text(_))
        | (FieldKind::Flag, v @ FieldValue::Flag(_))
        | (FieldKind::Hours, v @ FieldValue::Hours(_))
        | (FieldKind::Attachment, v @ FieldValue::Attachment(_)) => Ok(v),
        (FieldKind::Choices(catalog), FieldValue::Set(items)) => {
            if let Some(bad) = items.iter().find(|i| !catalog.iter().any(|c| *c == i.as_str())) {
                return Err(WizardError::InvalidOption {
                    field: spec.name.to_string(),
                    value: bad.clone(),
                });
            }
            Ok(FieldValue::Set(
                catalog
                    .iter()
                    .filter(|option| items.iter().any(|i| i == **option))
                    .map(|option| option.to_string())
                    .collect(),
            ))
        }
        (FieldKind::List, FieldValue::Set(items)) => {
            let mut cleaned: Vec<String> = Vec::with_capacity(items.len());
            for item in items {
                let item = item.trim();
                if !item.is_empty() && !cleaned.iter().any(|c| c == item) {
                    cleaned.push(item.to_string());
                }
            }
            Ok(FieldValue::Set(cleaned))
        }
        _ => Err(mismatch()),
    }
}

/// Host callback invoked once a submission succeeds
pub type CloseCallback = Box<dyn FnMut() + Send>;

/// Drives one wizard run from creation to submission
pub struct WizardController {
    state: WizardState,
    on_close: Option<CloseCallback>,
    closed: bool,
}

impl fmt::Debug for WizardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardController")
            .field("state", &self.state)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl WizardController {
    pub fn new(variant: Variant) -> Self {
        tracing::debug!("Opening {} wizard", variant.tag());
        Self {
            state: WizardState::new(variant),
            on_close: None,
            closed: false,
        }
    }

    /// Create from a textual registration type ("clinic", "jobseeker")
    pub fn create(tag: &str) -> Result<Self, WizardError> {
        Ok(Self::new(tag.parse()?))
    }

    /// Register the callback that dismisses the host UI after a successful submission
    pub fn on_close(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn variant(&self) -> Variant {
        self.state.variant()
    }

    pub fn current_step(&self) -> &'static Step {
        self.state.current_step()
    }

    pub fn is_final_step(&self) -> bool {
        self.state.is_final_step()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), WizardError> {
        self.ensure_open()?;
        self.state.set_field(name, value)
    }

    pub fn toggle_option(&mut self, name: &str, option: &str) -> Result<bool, WizardError> {
        self.ensure_open()?;
        self.state.toggle_option(name, option)
    }

    pub fn next(&mut self) {
        if !self.closed {
            self.state.next();
        }
    }

    pub fn previous(&mut self) {
        if !self.closed {
            self.state.previous();
        }
    }

    /// Dispose the wizard; late submission results are discarded
    pub fn close(&mut self) {
        if !self.closed {
            tracing::debug!("Closing {} wizard", self.variant().tag());
        }
        self.closed = true;
    }

    /// Check the wizard may submit and build the payload
    pub fn prepare_submission(&self) -> Result<SubmissionPayload, WizardError> {
        self.ensure_open()?;
        if !self.state.is_final_step() {
            return Err(WizardError::PrematureSubmit {
                current: self.state.current_index() + 1,
                total: self.state.steps().len(),
            });
        }

        Ok(SubmissionPayload {
            variant: self.state.variant(),
            fields: self.state.fields().clone(),
        })
    }

    /// Apply a sink's answer. On success the wizard closes and the host is
    /// told to dismiss it; on failure nothing changes so the user can retry.
    pub fn complete_submission(&mut self, result: Result<Ack, SubmitError>) -> Result<Ack, WizardError> {
        if self.closed {
            tracing::debug!("Ignoring submission result for closed wizard");
            return Err(WizardError::Closed);
        }

        match result {
            Ok(ack) => {
                tracing::info!("{} registration submitted", self.variant().tag());
                self.closed = true;
                if let Some(on_close) = self.on_close.as_mut() {
                    on_close();
                }
                Ok(ack)
            }
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                Err(WizardError::Submit(e))
            }
        }
    }

    /// Submit through `sink`. Only valid on the final step.
    pub async fn submit<S: SubmissionSink>(&mut self, sink: &S) -> Result<Ack, WizardError> {
        let payload = self.prepare_submission()?;
        let result = sink.submit(&payload).await;
        self.complete_submission(result)
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.closed {
            Err(WizardError::Closed)
        } else {
            Ok(())
        }
    }
}
