//! Cover letter and LinkedIn message generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::prompts::DOCUMENTS_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::render;
use crate::llm_client::LlmClient;

pub mod prompts;

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRequest {
    pub resume_text: String,
    pub job_text: String,
    pub full_name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub degree: String,
    pub university: String,
    pub job_title: String,
    pub company_name: String,
    #[serde(default)]
    pub company_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocuments {
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub linkedin_message: String,
}

pub fn build_prompt(request: &DocumentRequest, today: NaiveDate) -> String {
    let company_address_line = if request.company_address.trim().is_empty() {
        String::new()
    } else {
        format!(" ({})", request.company_address.trim())
    };

    let today = today.format("%d %B %Y").to_string();
    render(
        DOCUMENTS_PROMPT,
        &[
            ("today", today.as_str()),
            ("company_address_line", company_address_line.as_str()),
            ("company_name", request.company_name.as_str()),
            ("degree", request.degree.as_str()),
            ("university", request.university.as_str()),
            ("job_title", request.job_title.as_str()),
            ("full_name", request.full_name.as_str()),
            ("location", request.location.as_str()),
            ("phone", request.phone.as_str()),
            ("email", request.email.as_str()),
            ("job_text", request.job_text.as_str()),
            ("resume_text", request.resume_text.as_str()),
        ],
    )
}

/// Generates both documents. The model's answer must embed one JSON object;
/// a missing object and an unparsable object are reported as distinct errors.
pub async fn generate_documents(
    request: &DocumentRequest,
    today: NaiveDate,
    llm: &LlmClient,
) -> Result<GeneratedDocuments, AppError> {
    let prompt = build_prompt(request, today);
    info!(
        "Generating documents for {} at {}",
        request.job_title, request.company_name
    );

    let docs: GeneratedDocuments = llm.complete_embedded_json(&prompt).await?;
    Ok(GeneratedDocuments {
        cover_letter: docs.cover_letter.trim().to_string(),
        linkedin_message: docs.linkedin_message.trim().to_string(),
    })
}
