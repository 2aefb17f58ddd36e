use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat;
use crate::documents::{generate_documents, DocumentRequest, GeneratedDocuments};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// POST /generate-docs
pub async fn handle_generate_docs(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Result<Json<GeneratedDocuments>, AppError> {
    let today = chrono::Utc::now().date_naive();
    let docs = generate_documents(&request, today, &state.llm).await?;
    Ok(Json(docs))
}

/// POST /chatbot
pub async fn handle_chatbot(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let answer = chat::answer(request.message.as_deref(), &state.llm).await?;
    Ok(Json(ChatResponse { answer }))
}
