pub mod careers;
pub mod documents;
pub mod health;
pub mod resume;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Uploaded resumes above this size are rejected by the multipart extractor.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Resume analysis
        .route(
            "/upload-resume",
            post(resume::handle_upload_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/extract-skills", post(resume::handle_extract_skills))
        .route("/missing-skills", post(resume::handle_missing_skills))
        .route("/compare-job", post(resume::handle_compare_job))
        // Career guidance
        .route("/recommend-careers", post(careers::handle_recommend_careers))
        .route("/salary", get(careers::handle_salary))
        // Generated text
        .route("/generate-docs", post(documents::handle_generate_docs))
        .route("/chatbot", post(documents::handle_chatbot))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::careers::catalog::CareerEntry;
    use crate::careers::embedding::{Embedder, EmbeddingError};
    use crate::careers::matcher::CareerMatcher;
    use crate::llm_client::testing::{chain, ScriptedBackend};
    use crate::llm_client::LlmError;
    use crate::salary::SalaryClient;
    use crate::skills::dictionary::KeywordMatcher;

    const BOUNDARY: &str = "recommender-test-boundary";

    /// Embeds text as counts of a handful of marker words.
    struct WordCountEmbedder;

    #[async_trait]
    impl Embedder for WordCountEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let text = text.to_lowercase();
            Ok(["python", "sql", "docker", "figma"]
                .iter()
                .map(|w| text.matches(w).count() as f32)
                .collect())
        }
    }

    fn entry(title: &str, skills: &[&str]) -> CareerEntry {
        CareerEntry {
            title: title.to_string(),
            description: format!("{title} role"),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn test_state(responses: Vec<Result<String, LlmError>>) -> AppState {
        let catalog = vec![
            entry("Data Engineer", &["python", "sql"]),
            entry("Designer", &["figma"]),
            entry("Platform Engineer", &["docker"]),
        ];
        AppState {
            llm: chain(vec![ScriptedBackend::new("primary", responses)]),
            careers: CareerMatcher::new(catalog, Arc::new(WordCountEmbedder)),
            salary: SalaryClient::new("test-key".to_string(), "United States".to_string()),
            keywords: Arc::new(KeywordMatcher::new().unwrap()),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        write!(
            body,
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .unwrap();
        body.extend_from_slice(content);
        write!(body, "\r\n--{BOUNDARY}--\r\n").unwrap();

        Request::builder()
            .method("POST")
            .uri("/upload-resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let xml: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut cursor);
            zip.start_file("word/document.xml", zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(format!("<w:document><w:body>{xml}</w:body></w:document>").as_bytes())
                .unwrap();
            zip.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "AI Career Recommender API is running!");
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_skills_endpoint() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(json_request(
                "/missing-skills",
                json!({"resume_skills": ["Python"], "job_skills": ["python", "Kafka", "Go"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["missing_skills"], json!(["go", "kafka"]));
    }

    #[tokio::test]
    async fn test_chatbot_blank_message_skips_llm() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(json_request("/chatbot", json!({"message": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["answer"],
            "Please provide a valid question."
        );
    }

    #[tokio::test]
    async fn test_upload_unsupported_extension_is_415() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(multipart_request("resume.txt", b"plain text resume"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response).await["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_upload_docx_returns_profile_and_careers() {
        let app = build_router(test_state(vec![Ok("Python, SQL".to_string())]));
        let docx = docx_bytes(&[
            "Jane Doe",
            "Experience",
            "Data Analyst Jan 2019 - Dec 2021",
            "Education",
            "BSc Statistics",
        ]);
        let response = app
            .oneshot(multipart_request("resume.docx", &docx))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["text"].as_str().unwrap().contains("Data Analyst"));
        assert_eq!(body["experience"], 3);
        assert_eq!(body["skills"], json!(["python", "sql"]));
        assert_eq!(body["careers"].as_array().unwrap().len(), 3);
        assert_eq!(body["careers"][0]["title"], "Data Engineer");
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_400() {
        let app = build_router(test_state(vec![]));
        let body = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{BOUNDARY}--\r\n");
        let request = Request::builder()
            .method("POST")
            .uri("/upload-resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_skills_merges_dictionary_hits() {
        let app = build_router(test_state(vec![Ok("Python".to_string())]));
        let request = Request::builder()
            .method("POST")
            .uri("/extract-skills")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=Python+and+Docker+daily"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let skills = body_json(response).await["skills"].clone();
        let skills: Vec<String> = serde_json::from_value(skills).unwrap();
        assert!(skills.contains(&"python".to_string()));
        assert!(skills.contains(&"docker".to_string()));
    }

    #[tokio::test]
    async fn test_compare_job_scores_and_checks_experience() {
        let app = build_router(test_state(vec![
            Ok("python, sql".to_string()),
            Ok("python, java, sql".to_string()),
        ]));
        let response = app
            .oneshot(json_request(
                "/compare-job",
                json!({
                    "resume_text": "Analyst",
                    "job_text": "Requires 3+ years of experience.\n2 years experience with Java.",
                    "experience": 4
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["score"], 66);
        assert_eq!(body["matched"], json!(["python", "sql"]));
        assert_eq!(body["missing"], json!(["java"]));
        assert_eq!(body["resume_experience"], 4);
        assert_eq!(body["job_required_experience"], 3);
        assert_eq!(body["experience_match"], true);
        assert_eq!(body["tool_experience"]["java"], 2);
    }

    #[tokio::test]
    async fn test_generate_docs_without_json_is_502() {
        let app = build_router(test_state(vec![Ok("Sorry, I cannot help.".to_string())]));
        let response = app
            .oneshot(json_request(
                "/generate-docs",
                json!({
                    "full_name": "Jane Doe",
                    "location": "Austin, TX",
                    "phone": "555-0100",
                    "email": "jane@example.com",
                    "degree": "BSc",
                    "university": "UT",
                    "job_title": "Data Engineer",
                    "company_name": "Initech",
                    "resume_text": "resume",
                    "job_text": "job"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["code"], "LLM_MALFORMED_OUTPUT");
    }

    #[tokio::test]
    async fn test_salary_requires_job_title() {
        let app = build_router(test_state(vec![]));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/salary?job_title=%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
