//! Static field schemas per variant
//!
//! Every field a variant collects is listed here together with its kind and
//! the step it is shown on. The host renders from these tables; the
//! controller checks edits against them.

use std::fmt;

use super::variant::Variant;

/// Specializations a clinic offers or a job seeker practices
pub const SPECIALIZATIONS: &[&str] = &[
    "General Dentistry",
    "Orthodontics",
    "Periodontics",
    "Endodontics",
    "Oral Surgery",
    "Pediatric Dentistry",
    "Prosthodontics",
    "Cosmetic Dentistry",
];

pub const WORKING_DAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Shape of a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Subset of a fixed catalog
    Choices(&'static [&'static str]),
    /// Free-form list of entries
    List,
    Flag,
    Hours,
    Attachment,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Choices(_) => write!(f, "multiple-choice"),
            FieldKind::List => write!(f, "list"),
            FieldKind::Flag => write!(f, "yes/no"),
            FieldKind::Hours => write!(f, "working hours"),
            FieldKind::Attachment => write!(f, "file attachment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Id of the step the field is shown on
    pub step: &'static str,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind, step: &'static str) -> FieldSpec {
    FieldSpec { name, label, kind, step }
}

const CLINIC_SCHEMA: &[FieldSpec] = &[
    field("fullName", "Full Name", FieldKind::Text, "general"),
    field("clinicName", "Clinic Name", FieldKind::Text, "general"),
    field("address", "Address", FieldKind::Text, "general"),
    field("city", "City", FieldKind::Text, "general"),
    field("country", "Country", FieldKind::Text, "general"),
    field("experience", "Years of Experience", FieldKind::Text, "general"),
    field("specializations", "Specializations", FieldKind::Choices(SPECIALIZATIONS), "general"),
    field("pricingMethod", "Pricing Method", FieldKind::Text, "pricing"),
    field("treatmentDuration", "Average Treatment Duration", FieldKind::Text, "pricing"),
    field("workingDays", "Working Days", FieldKind::Choices(WORKING_DAYS), "pricing"),
    field("workingHours", "Working Hours", FieldKind::Hours, "pricing"),
    field("staffCount", "Number of Staff", FieldKind::Text, "staffing"),
    field("staffRoles", "Staff Roles", FieldKind::List, "staffing"),
    field("hiringPlans", "Planning to Hire", FieldKind::Flag, "staffing"),
    field("clinicCount", "Number of Clinics", FieldKind::Text, "management"),
    field("software", "Management Software", FieldKind::Text, "management"),
    field("challenges", "Biggest Challenges", FieldKind::Text, "management"),
];

const JOB_SEEKER_SCHEMA: &[FieldSpec] = &[
    field("fullName", "Full Name", FieldKind::Text, "personal"),
    field("email", "Email", FieldKind::Text, "personal"),
    field("phone", "Phone", FieldKind::Text, "personal"),
    field("experience", "Years of Experience", FieldKind::Text, "professional"),
    field("specializations", "Specializations", FieldKind::Choices(SPECIALIZATIONS), "professional"),
    field("resume", "Resume", FieldKind::Attachment, "professional"),
    field("preferredLocations", "Preferred Locations", FieldKind::List, "preferences"),
    field("expectedSalary", "Expected Salary", FieldKind::Text, "preferences"),
    field("availability", "Availability", FieldKind::Text, "preferences"),
];

impl Variant {
    /// All fields this variant collects, in display order
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            Variant::Clinic => CLINIC_SCHEMA,
            Variant::JobSeeker => JOB_SEEKER_SCHEMA,
        }
    }

    pub fn field_spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.schema().iter().find(|spec| spec.name == name)
    }

    /// Fields shown on the given step
    pub fn fields_for_step(&self, step_id: &str) -> Vec<&'static FieldSpec> {
        self.schema().iter().filter(|spec| spec.step == step_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(SPECIALIZATIONS.len(), 8);
        assert_eq!(WORKING_DAYS.len(), 7);
    }

    #[test]
    fn test_every_field_sits_on_a_real_step() {
        for variant in Variant::ALL {
            for spec in variant.schema() {
                assert!(
                    variant.steps().iter().any(|s| s.id == spec.step),
                    "{} has unknown step {}",
                    spec.name,
                    spec.step
                );
            }
        }
    }

    #[test]
    fn test_every_step_has_fields() {
        for variant in Variant::ALL {
            for step in variant.steps() {
                assert!(!variant.fields_for_step(step.id).is_empty());
            }
        }
    }

    #[test]
    fn test_field_lookup() {
        assert!(Variant::Clinic.field_spec("clinicName").is_some());
        assert!(Variant::JobSeeker.field_spec("clinicName").is_none());
        assert_eq!(
            Variant::JobSeeker.field_spec("resume").map(|s| s.kind),
            Some(FieldKind::Attachment)
        );
    }
}
