//! Wizard error types

use std::path::PathBuf;
use thiserror::Error;

use super::schema::FieldKind;
use crate::sink::SubmitError;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("unknown registration type '{0}' (expected 'clinic' or 'jobseeker')")]
    InvalidVariant(String),

    #[error("field '{field}' does not exist for {variant} registrations")]
    UnknownField { variant: String, field: String },

    #[error("field '{field}' expects a {expected} value")]
    FieldTypeMismatch { field: String, expected: FieldKind },

    #[error("'{value}' is not a valid option for '{field}'")]
    InvalidOption { field: String, value: String },

    #[error("cannot submit before the final step (currently on step {current} of {total})")]
    PrematureSubmit { current: usize, total: usize },

    #[error("the wizard has already been closed")]
    Closed,

    #[error("submission failed: {0}")]
    Submit(#[from] SubmitError),
}

/// Errors creating an attachment reference from a local path
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),
}
