use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One career in the fixed catalog the matcher ranks against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerEntry {
    #[serde(default = "untitled")]
    pub title: String,
    #[serde(default = "undescribed")]
    pub description: String,
    pub required_skills: Vec<String>,
}

fn untitled() -> String {
    "Untitled Role".to_string()
}

fn undescribed() -> String {
    "No description provided.".to_string()
}

/// Loads the career catalog (a JSON array of `CareerEntry`). Order is preserved.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<CareerEntry>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read career catalog '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Career catalog '{}' is not valid JSON", path.display()))
}
