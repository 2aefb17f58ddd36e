//! Job requirement extraction: minimum years and per-tool years from a job description.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::normalize::SkillSet;

/// "<n>[+|-m] years|yrs ... experience|work". The gap before the keyword is unbounded
/// within a line, so unrelated text can still produce a match.
static MIN_EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)[\s\-+]*(?:\d+)?\s*(?:years|yrs).+?(?:experience|work)")
        .expect("minimum experience pattern is valid")
});

/// "<n>[+|-m] years|yrs ... with <tool>".
static TOOL_EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)[\s\-+]*(?:\d+)?\s*(?:years|yrs).+?with\s+([a-zA-Z\.\+#]+)")
        .expect("tool experience pattern is valid")
});

/// Requirements derived from one job description. Request-scoped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobRequirement {
    pub skills: SkillSet,
    pub min_years: u32,
    pub tool_experience: BTreeMap<String, u32>,
}

impl JobRequirement {
    pub fn from_text(job_text: &str, skills: SkillSet) -> Self {
        let lowered = job_text.to_lowercase();
        JobRequirement {
            skills,
            min_years: required_years(&lowered),
            tool_experience: tool_experience(&lowered),
        }
    }
}

/// Largest leading year count across all matches, 0 if none.
pub fn required_years(job_text: &str) -> u32 {
    MIN_EXPERIENCE
        .captures_iter(job_text)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Tool name → required years. A later mention of the same tool overwrites an earlier one.
pub fn tool_experience(job_text: &str) -> BTreeMap<String, u32> {
    let mut tools = BTreeMap::new();
    for caps in TOOL_EXPERIENCE.captures_iter(job_text) {
        let Ok(years) = caps[1].parse::<u32>() else {
            continue;
        };
        tools.insert(caps[2].to_lowercase(), years);
    }
    tools
}
