use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Constructed once in `main` and handed to the clients that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub serpapi_key: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub embedding_model: String,
    pub career_catalog_path: String,
    pub salary_location: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            serpapi_key: require_env("SERPAPI_KEY")?,
            primary_model: env_or("PRIMARY_MODEL", "gemini-1.5-pro"),
            fallback_model: env_or("FALLBACK_MODEL", "gemini-1.5-flash"),
            embedding_model: env_or("EMBEDDING_MODEL", "text-embedding-004"),
            career_catalog_path: env_or("CAREER_CATALOG_PATH", "data/career_paths.json"),
            salary_location: env_or("SALARY_LOCATION", "United States"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
