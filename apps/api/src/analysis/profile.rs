use serde::Serialize;

use crate::analysis::experience::estimate_years;
use crate::analysis::normalize::SkillSet;

/// Per-request view of a resume: its text, estimated experience and skills.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeProfile {
    pub raw_text: String,
    pub years_experience: u32,
    pub skills: SkillSet,
}

impl ResumeProfile {
    /// Builds a profile, estimating experience from the text unless the caller supplies it.
    pub fn new(raw_text: String, skills: SkillSet, stated_years: Option<u32>) -> Self {
        let years_experience = stated_years.unwrap_or_else(|| estimate_years(&raw_text));
        ResumeProfile {
            raw_text,
            years_experience,
            skills,
        }
    }
}
