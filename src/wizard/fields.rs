//! Collected field values
//!
//! `FormData` is a sum type so a clinic registration can never carry
//! job-seeker fields and vice versa. Field names on the wire are camelCase.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::AttachmentError;
use super::variant::Variant;

/// Opening hours, free text as entered ("09:00")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl WorkingHours {
    /// Parse "09:00-17:00" (whitespace around the dash allowed)
    pub fn parse(input: &str) -> Option<Self> {
        let (start, end) = input.split_once('-')?;
        Some(Self {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }
}

/// Reference to a local file sent along with a registration. Only the name
/// and size go on the wire; the local path stays on this machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    #[serde(skip_serializing, default)]
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl Attachment {
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let metadata = std::fs::metadata(path).map_err(|source| AttachmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(AttachmentError::NotAFile(path.to_path_buf()));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            file_name,
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicFields {
    pub full_name: String,
    pub clinic_name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub experience: String,
    pub specializations: Vec<String>,
    pub pricing_method: String,
    pub treatment_duration: String,
    pub working_days: Vec<String>,
    pub working_hours: WorkingHours,
    pub staff_count: String,
    pub staff_roles: Vec<String>,
    pub hiring_plans: bool,
    pub clinic_count: String,
    pub software: String,
    pub challenges: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeekerFields {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub specializations: Vec<String>,
    pub preferred_locations: Vec<String>,
    pub expected_salary: String,
    pub availability: String,
    pub resume: Option<Attachment>,
}

/// A single field value, as passed to and read from the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Set(Vec<String>),
    Flag(bool),
    Hours(WorkingHours),
    Attachment(Option<Attachment>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::Set(values.into_iter().map(Into::into).collect())
    }

    /// Short human readable rendering for summaries
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Set(items) => items.join(", "),
            FieldValue::Flag(true) => "Yes".to_string(),
            FieldValue::Flag(false) => "No".to_string(),
            FieldValue::Hours(h) if h.is_empty() => String::new(),
            FieldValue::Hours(h) => format!("{} - {}", h.start, h.end),
            FieldValue::Attachment(Some(a)) => format!("{} ({} bytes)", a.file_name, a.size_bytes),
            FieldValue::Attachment(None) => String::new(),
        }
    }
}

/// Mutable view of one stored field
pub(crate) enum Slot<'a> {
    Text(&'a mut String),
    Set(&'a mut Vec<String>),
    Flag(&'a mut bool),
    Hours(&'a mut WorkingHours),
    Attachment(&'a mut Option<Attachment>),
}

impl Slot<'_> {
    /// Store `value` if it has the slot's shape, otherwise hand it back
    pub(crate) fn assign(self, value: FieldValue) -> Result<(), FieldValue> {
        match (self, value) {
            (Slot::Text(slot), FieldValue::Text(v)) => *slot = v,
            (Slot::Set(slot), FieldValue::Set(v)) => *slot = v,
            (Slot::Flag(slot), FieldValue::Flag(v)) => *slot = v,
            (Slot::Hours(slot), FieldValue::Hours(v)) => *slot = v,
            (Slot::Attachment(slot), FieldValue::Attachment(v)) => *slot = v,
            (_, value) => return Err(value),
        }
        Ok(())
    }
}

impl ClinicFields {
    fn slot_mut(&mut self, name: &str) -> Option<Slot<'_>> {
        Some(match name {
            "fullName" => Slot::Text(&mut self.full_name),
            "clinicName" => Slot::Text(&mut self.clinic_name),
            "address" => Slot::Text(&mut self.address),
            "city" => Slot::Text(&mut self.city),
            "country" => Slot::Text(&mut self.country),
            "experience" => Slot::Text(&mut self.experience),
            "specializations" => Slot::Set(&mut self.specializations),
            "pricingMethod" => Slot::Text(&mut self.pricing_method),
            "treatmentDuration" => Slot::Text(&mut self.treatment_duration),
            "workingDays" => Slot::Set(&mut self.working_days),
            "workingHours" => Slot::Hours(&mut self.working_hours),
            "staffCount" => Slot::Text(&mut self.staff_count),
            "staffRoles" => Slot::Set(&mut self.staff_roles),
            "hiringPlans" => Slot::Flag(&mut self.hiring_plans),
            "clinicCount" => Slot::Text(&mut self.clinic_count),
            "software" => Slot::Text(&mut self.software),
            "challenges" => Slot::Text(&mut self.challenges),
            _ => return None,
        })
    }

    fn get(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "fullName" => FieldValue::Text(self.full_name.clone()),
            "clinicName" => FieldValue::Text(self.clinic_name.clone()),
            "address" => FieldValue::Text(self.address.clone()),
            "city" => FieldValue::Text(self.city.clone()),
            "country" => FieldValue::Text(self.country.clone()),
            "experience" => FieldValue::Text(self.experience.clone()),
            "specializations" => FieldValue::Set(self.specializations.clone()),
            "pricingMethod" => FieldValue::Text(self.pricing_method.clone()),
            "treatmentDuration" => FieldValue::Text(self.treatment_duration.clone()),
            "workingDays" => FieldValue::Set(self.working_days.clone()),
            "workingHours" => FieldValue::Hours(self.working_hours.clone()),
            "staffCount" => FieldValue::Text(self.staff_count.clone()),
            "staffRoles" => FieldValue::Set(self.staff_roles.clone()),
            "hiringPlans" => FieldValue::Flag(self.hiring_plans),
            "clinicCount" => FieldValue::Text(self.clinic_count.clone()),
            "software" => FieldValue::Text(self.software.clone()),
            "challenges" => FieldValue::Text(self.challenges.clone()),
            _ => return None,
        })
    }
}

impl JobSeekerFields {
    fn slot_mut(&mut self, name: &str) -> Option<Slot<'_>> {
        Some(match name {
            "fullName" => Slot::Text(&mut self.full_name),
            "email" => Slot::Text(&mut self.email),
            "phone" => Slot::Text(&mut self.phone),
            "experience" => Slot::Text(&mut self.experience),
            "specializations" => Slot::Set(&mut self.specializations),
            "preferredLocations" => Slot::Set(&mut self.preferred_locations),
            "expectedSalary" => Slot::Text(&mut self.expected_salary),
            "availability" => Slot::Text(&mut self.availability),
            "resume" => Slot::Attachment(&mut self.resume),
            _ => return None,
        })
    }

    fn get(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "fullName" => FieldValue::Text(self.full_name.clone()),
            "email" => FieldValue::Text(self.email.clone()),
            "phone" => FieldValue::Text(self.phone.clone()),
            "experience" => FieldValue::Text(self.experience.clone()),
            "specializations" => FieldValue::Set(self.specializations.clone()),
            "preferredLocations" => FieldValue::Set(self.preferred_locations.clone()),
            "expectedSalary" => FieldValue::Text(self.expected_salary.clone()),
            "availability" => FieldValue::Text(self.availability.clone()),
            "resume" => FieldValue::Attachment(self.resume.clone()),
            _ => return None,
        })
    }
}

/// Variant-specific collection of field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormData {
    Clinic(ClinicFields),
    JobSeeker(JobSeekerFields),
}

impl FormData {
    /// Default (empty) field set for a variant
    pub fn new(variant: Variant) -> Self {
        match variant {
            Variant::Clinic => FormData::Clinic(ClinicFields::default()),
            Variant::JobSeeker => FormData::JobSeeker(JobSeekerFields::default()),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            FormData::Clinic(_) => Variant::Clinic,
            FormData::JobSeeker(_) => Variant::JobSeeker,
        }
    }

    pub fn get(&self, name: &str) -> Option<FieldValue> {
        match self {
            FormData::Clinic(fields) => fields.get(name),
            FormData::JobSeeker(fields) => fields.get(name),
        }
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<Slot<'_>> {
        match self {
            FormData::Clinic(fields) => fields.slot_mut(name),
            FormData::JobSeeker(fields) => fields.slot_mut(name),
        }
    }

    /// Names of all stored fields, in schema order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.variant()
            .schema()
            .iter()
            .filter(|spec| self.get(spec.name).is_some())
            .map(|spec| spec.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_schema_field_is_stored() {
        for variant in Variant::ALL {
            let mut data = FormData::new(*variant);
            for spec in variant.schema() {
                assert!(data.get(spec.name).is_some(), "missing getter for {}", spec.name);
                assert!(data.slot_mut(spec.name).is_some(), "missing slot for {}", spec.name);
            }
            assert_eq!(data.field_names().len(), variant.schema().len());
        }
    }

    #[test]
    fn test_serialized_keys_match_schema() {
        for variant in Variant::ALL {
            let json = serde_json::to_value(FormData::new(*variant)).unwrap();
            let object = json.as_object().unwrap();
            assert_eq!(object.len(), variant.schema().len());
            for spec in variant.schema() {
                assert!(object.contains_key(spec.name), "{} not serialized", spec.name);
            }
        }
    }

    #[test]
    fn test_clinic_defaults() {
        let data = FormData::new(Variant::Clinic);
        assert_eq!(data.get("hiringPlans"), Some(FieldValue::Flag(false)));
        assert_eq!(data.get("workingHours"), Some(FieldValue::Hours(WorkingHours::default())));
        assert_eq!(data.get("fullName"), Some(FieldValue::text("")));
    }

    #[test]
    fn test_job_seeker_resume_absent_by_default() {
        let data = FormData::new(Variant::JobSeeker);
        assert_eq!(data.get("resume"), Some(FieldValue::Attachment(None)));
        let json = serde_json::to_value(&data).unwrap();
        assert!(json["resume"].is_null());
    }

    #[test]
    fn test_slot_rejects_wrong_shape() {
        let mut data = FormData::new(Variant::Clinic);
        let slot = data.slot_mut("hiringPlans").unwrap();
        assert_eq!(
            slot.assign(FieldValue::text("yes")),
            Err(FieldValue::text("yes"))
        );
    }

    #[test]
    fn test_working_hours_parse() {
        let hours = WorkingHours::parse("09:00 - 17:30").unwrap();
        assert_eq!(hours.start, "09:00");
        assert_eq!(hours.end, "17:30");
        assert!(WorkingHours::parse("all day").is_none());
    }

    #[test]
    fn test_attachment_missing_file() {
        let err = Attachment::from_path(Path::new("/nonexistent/resume.pdf")).unwrap_err();
        assert!(matches!(err, AttachmentError::Io { .. }));
    }

    #[test]
    fn test_attachment_directory_rejected() {
        let dir = std::env::temp_dir();
        let err = Attachment::from_path(&dir).unwrap_err();
        assert!(matches!(err, AttachmentError::NotAFile(_)));
    }

    #[test]
    fn test_attachment_path_not_serialized() {
        let attachment = Attachment {
            file_name: "cv.pdf".to_string(),
            path: PathBuf::from("/home/jane/private/cv.pdf"),
            size_bytes: 2048,
        };
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["fileName"], "cv.pdf");
        assert_eq!(json["sizeBytes"], 2048);
        assert!(json.get("path").is_none());
    }

    #[test]
    fn test_untagged_roundtrip_picks_right_variant() {
        let original = FormData::new(Variant::JobSeeker);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: FormData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.variant(), Variant::JobSeeker);
    }
}
