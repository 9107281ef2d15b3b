//! Registration variants and their fixed step lists

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::WizardError;

/// Who is registering. Fixed for the lifetime of a wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Clinic,
    JobSeeker,
}

/// One page of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub id: &'static str,
    pub title: &'static str,
}

const CLINIC_STEPS: &[Step] = &[
    Step { id: "general", title: "General Information" },
    Step { id: "pricing", title: "Pricing & Scheduling" },
    Step { id: "staffing", title: "Staffing" },
    Step { id: "management", title: "Clinic Management" },
];

const JOB_SEEKER_STEPS: &[Step] = &[
    Step { id: "personal", title: "Personal Information" },
    Step { id: "professional", title: "Professional Details" },
    Step { id: "preferences", title: "Job Preferences" },
];

impl Variant {
    pub const ALL: &'static [Variant] = &[Variant::Clinic, Variant::JobSeeker];

    /// Ordered steps for this variant
    pub fn steps(&self) -> &'static [Step] {
        match self {
            Variant::Clinic => CLINIC_STEPS,
            Variant::JobSeeker => JOB_SEEKER_STEPS,
        }
    }

    /// Wire tag, as the backend expects it
    pub fn tag(&self) -> &'static str {
        match self {
            Variant::Clinic => "clinic",
            Variant::JobSeeker => "jobseeker",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Clinic => "Register a clinic",
            Variant::JobSeeker => "Register as a job seeker",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Clinic => write!(f, "Clinic"),
            Variant::JobSeeker => write!(f, "Job seeker"),
        }
    }
}

impl FromStr for Variant {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clinic" => Ok(Variant::Clinic),
            "jobseeker" | "job-seeker" | "job_seeker" => Ok(Variant::JobSeeker),
            _ => Err(WizardError::InvalidVariant(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinic_steps_in_order() {
        let titles: Vec<&str> = Variant::Clinic.steps().iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "General Information",
                "Pricing & Scheduling",
                "Staffing",
                "Clinic Management"
            ]
        );
    }

    #[test]
    fn test_job_seeker_steps_in_order() {
        let ids: Vec<&str> = Variant::JobSeeker.steps().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["personal", "professional", "preferences"]);
    }

    #[test]
    fn test_step_ids_unique() {
        for variant in Variant::ALL {
            let steps = variant.steps();
            for (i, a) in steps.iter().enumerate() {
                assert!(steps[i + 1..].iter().all(|b| b.id != a.id));
            }
        }
    }

    #[test]
    fn test_parse_variant() {
        assert_eq!("clinic".parse::<Variant>().unwrap(), Variant::Clinic);
        assert_eq!("JobSeeker".parse::<Variant>().unwrap(), Variant::JobSeeker);
        assert_eq!("job-seeker".parse::<Variant>().unwrap(), Variant::JobSeeker);
    }

    #[test]
    fn test_parse_invalid_variant() {
        let err = "dentist".parse::<Variant>().unwrap_err();
        assert!(matches!(err, WizardError::InvalidVariant(ref tag) if tag == "dentist"));
    }

    #[test]
    fn test_serde_tag_matches_wire_tag() {
        for variant in Variant::ALL {
            let json = serde_json::to_string(variant).unwrap();
            assert_eq!(json, format!("\"{}\"", variant.tag()));
        }
    }
}
