//! Salary samples from SerpApi's Google Jobs engine.
//!
//! Each listing contributes one "<title> at <company>" line with its salary. Listings with no
//! discoverable salary are dropped.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

const SERPAPI_URL: &str = "https://serpapi.com/search.json";
/// Only the first listings of the result page are considered.
const MAX_LISTINGS: usize = 5;
const CURRENCY_MARKERS: [char; 2] = ['$', '₹'];

#[derive(Debug, Error)]
pub enum SalaryError {
    #[error("salary search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("salary search returned status {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub jobs_results: Vec<JobListing>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company_name: String,
    pub salary: Option<String>,
    pub detected_extensions: Option<DetectedExtensions>,
    /// Either `{category: [items]}` or `[{title, items: [..]}]` depending on the result.
    pub job_highlights: Option<Value>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetectedExtensions {
    pub salary: Option<String>,
}

impl JobListing {
    /// Explicit salary fields first, then highlight items, then description lines.
    pub fn discover_salary(&self) -> Option<String> {
        let explicit = self
            .salary
            .clone()
            .or_else(|| self.detected_extensions.as_ref()?.salary.clone())
            .filter(|s| !s.trim().is_empty());

        explicit
            .or_else(|| self.highlight_items().into_iter().find(|item| has_currency(item)))
            .or_else(|| {
                self.description
                    .as_deref()?
                    .lines()
                    .find(|line| has_currency(line))
                    .map(|line| line.trim().to_string())
            })
    }

    fn highlight_items(&self) -> Vec<String> {
        let item_strings = |items: &Value| -> Vec<String> {
            items
                .as_array()
                .map(|arr| arr.iter().filter_map(|i| i.as_str().map(String::from)).collect())
                .unwrap_or_default()
        };

        match &self.job_highlights {
            Some(Value::Object(categories)) => categories.values().flat_map(item_strings).collect(),
            Some(Value::Array(groups)) => groups
                .iter()
                .filter_map(|g| g.get("items"))
                .flat_map(item_strings)
                .collect(),
            _ => vec![],
        }
    }
}

fn has_currency(text: &str) -> bool {
    text.contains(CURRENCY_MARKERS)
}

/// Reduces a search response to salary sample strings.
pub fn salary_samples(response: &SearchResponse) -> Vec<String> {
    response
        .jobs_results
        .iter()
        .take(MAX_LISTINGS)
        .filter_map(|job| match job.discover_salary() {
            Some(salary) => Some(format!("{} at {} — {}", job.title, job.company_name, salary)),
            None => {
                debug!("dropping listing '{}' at '{}': no salary found", job.title, job.company_name);
                None
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct SalaryClient {
    client: Client,
    api_key: String,
    location: String,
}

impl SalaryClient {
    pub fn new(api_key: String, location: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key,
            location,
        }
    }

    pub async fn fetch_salary_samples(&self, job_title: &str) -> Result<Vec<String>, SalaryError> {
        let query = format!("{job_title} in {}", self.location);
        let response = self
            .client
            .get(SERPAPI_URL)
            .query(&[
                ("engine", "google_jobs"),
                ("q", query.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SalaryError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: SearchResponse = response.json().await?;
        let samples = salary_samples(&parsed);
        info!(
            "Salary search '{query}': {} listings, {} with salary",
            parsed.jobs_results.len(),
            samples.len()
        );
        Ok(samples)
    }
}
