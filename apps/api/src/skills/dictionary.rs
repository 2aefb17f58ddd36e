//! Known-skill dictionary, matched case-insensitively at word boundaries.

use std::collections::BTreeSet;

use aho_corasick::{AhoCorasick, MatchKind};
use anyhow::{Context, Result};

const KNOWN_SKILLS: &[&str] = &[
    // languages
    "python", "java", "javascript", "typescript", "c++", "c#", "golang", "rust", "ruby",
    "php", "swift", "kotlin", "scala", "matlab", "sql", "bash", "html", "css", "sas",
    // data & ml
    "machine learning", "deep learning", "data analysis", "data visualization",
    "statistics", "regression", "clustering", "classification", "a/b testing",
    "natural language processing", "computer vision", "pandas", "numpy", "scikit-learn",
    "tensorflow", "pytorch", "keras", "spark", "hadoop", "tableau", "power bi", "excel",
    "airflow", "etl", "data engineering", "big data",
    // web & backend
    "react", "angular", "vue", "node.js", "django", "flask", "fastapi", "spring boot",
    "graphql", "rest api", "microservices",
    // infrastructure
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "jenkins", "ci/cd",
    "linux", "git", "postgresql", "mysql", "mongodb", "redis", "kafka", "elasticsearch",
    // practice & soft skills
    "agile", "scrum", "jira", "project management", "product management", "leadership",
    "communication", "teamwork", "problem solving", "stakeholder management",
];

/// Finds dictionary skills mentioned in free text.
pub struct KeywordMatcher {
    matcher: AhoCorasick,
}

impl KeywordMatcher {
    pub fn new() -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(KNOWN_SKILLS)
            .context("Failed to build skill keyword matcher")?;
        Ok(Self { matcher })
    }

    /// Lowercase dictionary entries found in `text`. A hit counts only when it is not
    /// glued to a neighbouring letter or digit ("java" does not match inside "javanese").
    pub fn find(&self, text: &str) -> BTreeSet<String> {
        self.matcher
            .find_iter(text)
            .filter(|m| is_word_boundary(text, m.start(), m.end()))
            .map(|m| KNOWN_SKILLS[m.pattern().as_usize()].to_string())
            .collect()
    }
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
