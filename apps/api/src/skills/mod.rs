//! Skill extraction: LLM-extracted skills merged with dictionary hits.

use std::collections::BTreeSet;

use tracing::debug;

use crate::analysis::normalize::SkillSet;
use crate::errors::AppError;
use crate::llm_client::prompts::{render, COMMA_LIST_INSTRUCTION};
use crate::llm_client::{strip_json_fences, LlmClient};
use crate::skills::dictionary::KeywordMatcher;
use crate::skills::prompts::SKILL_EXTRACTION_PROMPT;

pub mod dictionary;
pub mod prompts;

fn skill_prompt(text: &str) -> String {
    render(
        SKILL_EXTRACTION_PROMPT,
        &[("list_instruction", COMMA_LIST_INSTRUCTION), ("text", text)],
    )
}

/// Asks the LLM for the skills in `text`, returned as a parsed, lowercase list.
pub async fn extract_skills_with_llm(text: &str, llm: &LlmClient) -> Result<Vec<String>, AppError> {
    let raw = llm.complete(&skill_prompt(text)).await?;
    let skills = parse_skill_list(&raw);
    debug!("LLM returned {} skills", skills.len());
    Ok(skills)
}

/// Normalized skills for comparing two texts: the LLM's delimited answer read as one
/// `SkillSet` string, plus dictionary hits. Multi-word and symbol skills drop out.
pub async fn extract_skill_set(
    text: &str,
    llm: &LlmClient,
    keywords: &KeywordMatcher,
) -> Result<SkillSet, AppError> {
    let raw = llm.complete(&skill_prompt(text)).await?;
    let mut skills = SkillSet::from_text(strip_json_fences(&raw));
    skills.extend(keywords.find(text));
    debug!("normalized skill set has {} entries", skills.len());
    Ok(skills)
}

/// LLM skills unioned with dictionary keyword hits, sorted and deduplicated.
pub async fn extract_skills(
    text: &str,
    llm: &LlmClient,
    keywords: &KeywordMatcher,
) -> Result<Vec<String>, AppError> {
    let mut skills: BTreeSet<String> = extract_skills_with_llm(text, llm).await?.into_iter().collect();
    skills.extend(keywords.find(text));
    Ok(skills.into_iter().collect())
}

/// Parses a comma-separated skill answer. Tolerates code fences, one-per-line
/// answers and list bullets; empty entries are dropped.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    strip_json_fences(raw)
        .split([',', '\n'])
        .map(|s| {
            s.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim()
                .to_lowercase()
        })
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Splits a user-supplied comma list ("Python, SQL ,") into trimmed lowercase entries.
pub fn split_skill_input(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{chain, ScriptedBackend};

    #[test]
    fn test_parse_plain_comma_list() {
        assert_eq!(
            parse_skill_list("Python, SQL, machine learning, , python"),
            vec!["machine learning", "python", "sql"]
        );
    }

    #[test]
    fn test_parse_fenced_bulleted_list() {
        let raw = "```\n- Rust\n- Docker\n* Kubernetes\n```";
        assert_eq!(parse_skill_list(raw), vec!["docker", "kubernetes", "rust"]);
    }

    #[test]
    fn test_parse_empty_answer() {
        assert!(parse_skill_list("   ").is_empty());
    }

    #[test]
    fn test_split_skill_input_keeps_order() {
        assert_eq!(split_skill_input("Python, SQL ,,"), vec!["python", "sql"]);
    }

    #[tokio::test]
    async fn test_extract_skills_unions_llm_and_dictionary() {
        let backend = ScriptedBackend::new("pro", vec![Ok("teamwork, python".to_string())]);
        let llm = chain(vec![backend.clone()]);
        let keywords = KeywordMatcher::new().unwrap();

        let skills = extract_skills("Built ETL jobs in Python with Docker", &llm, &keywords)
            .await
            .unwrap();
        assert_eq!(skills, vec!["docker", "etl", "python", "teamwork"]);
        assert!(backend.last_prompt().unwrap().contains("Built ETL jobs"));
    }

    #[tokio::test]
    async fn test_extract_skill_set_normalizes_delimited_answer() {
        let llm = chain(vec![ScriptedBackend::new(
            "pro",
            vec![Ok("```\nPython, C++, SQL, machine learning\n```".to_string())],
        )]);
        let keywords = KeywordMatcher::new().unwrap();

        let skills = extract_skill_set("Shipped Docker images and node.js services", &llm, &keywords)
            .await
            .unwrap();
        assert_eq!(Vec::<String>::from(skills), vec!["docker", "python", "sql"]);
    }

    #[tokio::test]
    async fn test_extract_skill_set_whitespace_answer() {
        let llm = chain(vec![ScriptedBackend::new("pro", vec![Ok("rust\ngo".to_string())])]);
        let keywords = KeywordMatcher::new().unwrap();

        let skills = extract_skill_set("nothing known here", &llm, &keywords).await.unwrap();
        assert_eq!(Vec::<String>::from(skills), vec!["go", "rust"]);
    }

    #[tokio::test]
    async fn test_extract_skills_propagates_llm_failure() {
        let llm = chain(vec![ScriptedBackend::new("pro", vec![])]);
        let keywords = KeywordMatcher::new().unwrap();
        assert!(extract_skills("python", &llm, &keywords).await.is_err());
    }
}
