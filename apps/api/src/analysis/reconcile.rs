//! Skill reconciliation: overlap between a resume's skills and a job's skills.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::analysis::normalize::SkillSet;
use crate::analysis::profile::ResumeProfile;
use crate::analysis::requirements::JobRequirement;

/// Skill overlap between a resume and a job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// floor(100 × matched / job), 0 for an empty job set.
    pub score: u32,
}

/// Full comparison of a resume profile against a job requirement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub score: u32,
    pub experience_match: bool,
}

pub fn reconcile(resume: &SkillSet, job: &SkillSet) -> SkillMatch {
    let matched = resume.intersection(job);
    let missing = job.difference(resume);
    let score = if job.is_empty() {
        0
    } else {
        (matched.len() * 100 / job.len()) as u32
    };
    SkillMatch {
        matched,
        missing,
        score,
    }
}

pub fn match_profile(profile: &ResumeProfile, requirement: &JobRequirement) -> MatchResult {
    let SkillMatch {
        matched,
        missing,
        score,
    } = reconcile(&profile.skills, &requirement.skills);
    MatchResult {
        matched,
        missing,
        score,
        experience_match: profile.years_experience >= requirement.min_years,
    }
}

/// Job skills absent from the resume, compared after trimming and lowercasing.
/// Unlike `SkillSet`, tokens are otherwise kept as given ("c++" survives).
pub fn missing_skills(resume_skills: &[String], job_skills: &[String]) -> Vec<String> {
    let canon = |skills: &[String]| -> BTreeSet<String> {
        skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    };
    let resume = canon(resume_skills);
    canon(job_skills).difference(&resume).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn skills(tokens: &[&str]) -> SkillSet {
        SkillSet::from_tokens(tokens.iter().copied())
    }

    #[test]
    fn test_partial_overlap_truncates_score() {
        let result = reconcile(&skills(&["python", "sql"]), &skills(&["python", "java", "sql"]));
        assert_eq!(result.matched, vec!["python", "sql"]);
        assert_eq!(result.missing, vec!["java"]);
        assert_eq!(result.score, 66);
    }

    #[test]
    fn test_empty_job_set_scores_zero() {
        let result = reconcile(&skills(&["python"]), &SkillSet::default());
        assert_eq!(result.score, 0);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_full_overlap_is_100() {
        let job = skills(&["rust", "go"]);
        assert_eq!(reconcile(&skills(&["go", "rust", "zig"]), &job).score, 100);
    }

    #[test]
    fn test_score_uses_exact_integer_floor() {
        // 29/100 as a float times 100 is 28.999..., integer arithmetic keeps 29.
        let job = SkillSet::from_tokens((1..=100).map(|i| format!("s{}", "x".repeat(i))));
        assert_eq!(job.len(), 100);
        let resume = SkillSet::from_tokens(job.iter().take(29));
        assert_eq!(reconcile(&resume, &job).score, 29);
    }

    #[test]
    fn test_experience_match_is_inclusive() {
        let profile = ResumeProfile {
            raw_text: String::new(),
            years_experience: 5,
            skills: skills(&["python"]),
        };
        let mut requirement = JobRequirement {
            skills: skills(&["python", "java"]),
            min_years: 5,
            tool_experience: BTreeMap::new(),
        };
        let result = match_profile(&profile, &requirement);
        assert!(result.experience_match);
        assert_eq!(result.score, 50);

        requirement.min_years = 6;
        assert!(!match_profile(&profile, &requirement).experience_match);
    }

    #[test]
    fn test_missing_skills_is_sorted_and_case_insensitive() {
        let resume = vec!["Python".to_string(), " SQL ".to_string()];
        let job = vec![
            "sql".to_string(),
            "Kafka".to_string(),
            "C++".to_string(),
            "".to_string(),
        ];
        assert_eq!(missing_skills(&resume, &job), vec!["c++", "kafka"]);
    }
}
