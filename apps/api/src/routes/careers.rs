use axum::{
    extract::{Query, State},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::careers::paths::{generate_career_paths, CareerPath};
use crate::errors::AppError;
use crate::skills::split_skill_input;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendCareersForm {
    pub skills: String,
    #[serde(default)]
    pub experience: u32,
}

#[derive(Debug, Serialize)]
pub struct RecommendCareersResponse {
    pub careers: Vec<CareerPath>,
}

#[derive(Debug, Deserialize)]
pub struct SalaryQuery {
    pub job_title: String,
}

#[derive(Debug, Serialize)]
pub struct SalaryResponse {
    pub salaries: Vec<String>,
}

/// POST /recommend-careers
///
/// Form fields `skills` (comma-separated) and `experience` (years, default 0).
pub async fn handle_recommend_careers(
    State(state): State<AppState>,
    Form(form): Form<RecommendCareersForm>,
) -> Result<Json<RecommendCareersResponse>, AppError> {
    let skills = split_skill_input(&form.skills);
    let careers = generate_career_paths(&skills, form.experience, &state.llm).await?;
    Ok(Json(RecommendCareersResponse { careers }))
}

/// GET /salary?job_title=
pub async fn handle_salary(
    State(state): State<AppState>,
    Query(query): Query<SalaryQuery>,
) -> Result<Json<SalaryResponse>, AppError> {
    if query.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }
    let salaries = state
        .salary
        .fetch_salary_samples(query.job_title.trim())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;
    Ok(Json(SalaryResponse { salaries }))
}
