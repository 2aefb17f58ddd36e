//! Resume upload, skill extraction and resume/job comparison handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, State},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::experience::estimate_years;
use crate::analysis::profile::ResumeProfile;
use crate::analysis::reconcile::{match_profile, missing_skills};
use crate::analysis::requirements::JobRequirement;
use crate::careers::matcher::CareerMatch;
use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::skills::{extract_skill_set, extract_skills, extract_skills_with_llm};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub text: String,
    pub experience: u32,
    pub skills: Vec<String>,
    pub careers: Vec<CareerMatch>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsForm {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MissingSkillsRequest {
    pub resume_skills: Vec<String>,
    pub job_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MissingSkillsResponse {
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareJobRequest {
    pub resume_text: String,
    pub job_text: String,
    /// Estimated from `resume_text` when omitted.
    pub experience: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CompareJobResponse {
    pub score: u32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub resume_experience: u32,
    pub job_required_experience: u32,
    pub experience_match: bool,
    pub tool_experience: BTreeMap<String, u32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload-resume
///
/// Multipart field `file` (.pdf or .docx). Returns the extracted text, estimated
/// experience, LLM-extracted skills and the top catalog career matches.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            upload = Some((filename, bytes));
            break;
        }
    }
    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    info!("Extracting text from upload '{filename}' ({} bytes)", bytes.len());
    let text = tokio::task::spawn_blocking(move || extract_text(&filename, &bytes))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let experience = estimate_years(&text);
    let skills = extract_skills_with_llm(&text, &state.llm).await?;
    let careers = state.careers.top_matches(&skills).await?;

    Ok(Json(UploadResumeResponse {
        text,
        experience,
        skills,
        careers,
    }))
}

/// POST /extract-skills
///
/// Form field `text`. LLM skills merged with dictionary keyword hits.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Form(form): Form<ExtractSkillsForm>,
) -> Result<Json<SkillsResponse>, AppError> {
    if form.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    let skills = extract_skills(&form.text, &state.llm, &state.keywords).await?;
    Ok(Json(SkillsResponse { skills }))
}

/// POST /missing-skills
pub async fn handle_missing_skills(
    Json(request): Json<MissingSkillsRequest>,
) -> Json<MissingSkillsResponse> {
    Json(MissingSkillsResponse {
        missing_skills: missing_skills(&request.resume_skills, &request.job_skills),
    })
}

/// POST /compare-job
///
/// Extracts skills from both texts, reconciles them, and checks the job's
/// experience requirements against the resume.
pub async fn handle_compare_job(
    State(state): State<AppState>,
    Json(request): Json<CompareJobRequest>,
) -> Result<Json<CompareJobResponse>, AppError> {
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }

    let (resume_skills, job_skills) = tokio::try_join!(
        extract_skill_set(&request.resume_text, &state.llm, &state.keywords),
        extract_skill_set(&request.job_text, &state.llm, &state.keywords),
    )?;

    let requirement = JobRequirement::from_text(&request.job_text, job_skills);
    let profile = ResumeProfile::new(request.resume_text, resume_skills, request.experience);
    let result = match_profile(&profile, &requirement);
    info!(
        "compare-job: score={} experience {}/{}",
        result.score, profile.years_experience, requirement.min_years
    );

    Ok(Json(CompareJobResponse {
        score: result.score,
        matched: result.matched,
        missing: result.missing,
        resume_experience: profile.years_experience,
        job_required_experience: requirement.min_years,
        experience_match: result.experience_match,
        tool_experience: requirement.tool_experience,
    }))
}
