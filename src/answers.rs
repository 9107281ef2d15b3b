//! Answers files for non-interactive submission
//!
//! An answers file is a JSON object keyed by schema field name:
//!
//! ```json
//! {
//!   "fullName": "Jane Doe",
//!   "specializations": ["Orthodontics"],
//!   "workingHours": { "start": "09:00", "end": "17:00" },
//!   "hiringPlans": true
//! }
//! ```
//!
//! Attachment paths are resolved relative to the answers file.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::wizard::{
    Attachment, AttachmentError, FieldKind, FieldValue, Variant, WizardController, WizardError,
    WorkingHours,
};

#[derive(Debug, Error)]
pub enum AnswersError {
    #[error("cannot read answers file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("answers file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("answers file must contain a JSON object")]
    NotAnObject,

    #[error("value for '{field}' should be {expected}")]
    InvalidValue { field: String, expected: FieldKind },

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// Parsed answers, ordered by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    pub entries: Vec<(String, FieldValue)>,
}

impl Answers {
    /// Read answers for `variant` from a JSON file
    pub fn load(variant: Variant, path: &Path) -> Result<Self, AnswersError> {
        let content = std::fs::read_to_string(path).map_err(|source| AnswersError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(variant, &content, base_dir)
    }

    pub fn parse(variant: Variant, json: &str, base_dir: &Path) -> Result<Self, AnswersError> {
        let object: Map<String, Value> = match serde_json::from_str(json)? {
            Value::Object(object) => object,
            _ => return Err(AnswersError::NotAnObject),
        };

        let mut entries = Vec::with_capacity(object.len());
        for (name, value) in object {
            let converted = match variant.field_spec(&name) {
                Some(spec) => convert(&name, spec.kind, value, base_dir)?,
                // Let the wizard report the unknown field
                None => loose(value),
            };
            entries.push((name, converted));
        }

        Ok(Self { entries })
    }

    /// Apply every answer to the wizard
    pub fn apply(&self, controller: &mut WizardController) -> Result<(), AnswersError> {
        for (name, value) in &self.entries {
            tracing::debug!("Applying answer for {}", name);
            controller.set_field(name, value.clone())?;
        }
        Ok(())
    }
}

fn convert(name: &str, kind: FieldKind, value: Value, base_dir: &Path) -> Result<FieldValue, AnswersError> {
    let invalid = || AnswersError::InvalidValue {
        field: name.to_string(),
        expected: kind,
    };

    let converted = match (kind, value) {
        (FieldKind::Text, Value::String(s)) => FieldValue::Text(s),
        (FieldKind::Text, Value::Number(n)) => FieldValue::Text(n.to_string()),
        (FieldKind::Text, Value::Null) => FieldValue::Text(String::new()),
        (FieldKind::Choices(_) | FieldKind::List, Value::String(s)) => FieldValue::Set(vec![s]),
        (FieldKind::Choices(_) | FieldKind::List, Value::Array(items)) => FieldValue::Set(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(invalid()),
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        (FieldKind::Flag, Value::Bool(b)) => FieldValue::Flag(b),
        (FieldKind::Hours, Value::String(s)) => {
            FieldValue::Hours(WorkingHours::parse(&s).ok_or_else(invalid)?)
        }
        (FieldKind::Hours, value @ Value::Object(_)) => {
            FieldValue::Hours(serde_json::from_value(value).map_err(|_| invalid())?)
        }
        (FieldKind::Attachment, Value::Null) => FieldValue::Attachment(None),
        (FieldKind::Attachment, Value::String(s)) => {
            let path = base_dir.join(s);
            FieldValue::Attachment(Some(Attachment::from_path(&path)?))
        }
        _ => return Err(invalid()),
    };

    Ok(converted)
}

fn loose(value: Value) -> FieldValue {
    match value {
        Value::String(s) => FieldValue::Text(s),
        Value::Bool(b) => FieldValue::Flag(b),
        Value::Array(items) => FieldValue::Set(
            items
                .into_iter()
                .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
                .collect(),
        ),
        other => FieldValue::Text(other.to_string()),
    }
}
