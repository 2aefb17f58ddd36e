//! Career-path recommendations generated by the LLM.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::careers::prompts::CAREER_PATHS_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::{render, RAW_JSON_INSTRUCTION};
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub career: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Asks the LLM for career paths suited to `skills` at `experience_years`.
pub async fn generate_career_paths(
    skills: &[String],
    experience_years: u32,
    llm: &LlmClient,
) -> Result<Vec<CareerPath>, AppError> {
    let prompt = render(
        CAREER_PATHS_PROMPT,
        &[
            ("skills", skills.join(", ").as_str()),
            ("experience", experience_years.to_string().as_str()),
            ("raw_json_instruction", RAW_JSON_INSTRUCTION),
        ],
    );

    let paths: Vec<CareerPath> = llm.complete_json(&prompt).await?;
    info!("Generated {} career paths", paths.len());
    Ok(paths)
}
