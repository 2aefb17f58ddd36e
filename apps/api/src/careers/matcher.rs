//! Career matching: ranks the catalog against a user's skills by embedding similarity.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::careers::catalog::CareerEntry;
use crate::careers::embedding::{cosine_similarity, embed_skills, Embedder, EmbeddingError};
use crate::errors::AppError;

pub const TOP_MATCHES: usize = 3;

/// A catalog career scored against the user's skills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerMatch {
    pub title: String,
    pub description: String,
    /// Cosine similarity, rounded to 3 decimals.
    pub score: f64,
}

/// Holds the fixed catalog and lazily caches one embedding per entry for the process lifetime.
#[derive(Clone)]
pub struct CareerMatcher {
    catalog: Arc<Vec<CareerEntry>>,
    embedder: Arc<dyn Embedder>,
    catalog_vectors: Arc<OnceCell<Vec<Vec<f32>>>>,
}

impl CareerMatcher {
    pub fn new(catalog: Vec<CareerEntry>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            embedder,
            catalog_vectors: Arc::new(OnceCell::new()),
        }
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// The `TOP_MATCHES` best careers for `user_skills`, best first.
    pub async fn top_matches(&self, user_skills: &[String]) -> Result<Vec<CareerMatch>, AppError> {
        if user_skills.is_empty() || self.catalog.is_empty() {
            debug!("no skills or empty catalog; skipping career matching");
            return Ok(vec![]);
        }

        let user_vector = embed_skills(self.embedder.as_ref(), user_skills)
            .await
            .map_err(|e| AppError::Upstream(format!("Embedding failed: {e}")))?;
        let catalog_vectors = self.catalog_vectors().await?;

        Ok(rank(&user_vector, catalog_vectors, TOP_MATCHES)
            .into_iter()
            .map(|(index, score)| {
                let career = &self.catalog[index];
                CareerMatch {
                    title: career.title.clone(),
                    description: career.description.clone(),
                    score: round3(score),
                }
            })
            .collect())
    }

    async fn catalog_vectors(&self) -> Result<&Vec<Vec<f32>>, AppError> {
        self.catalog_vectors
            .get_or_try_init(|| async {
                let mut vectors = Vec::with_capacity(self.catalog.len());
                for career in self.catalog.iter() {
                    vectors.push(embed_skills(self.embedder.as_ref(), &career.required_skills).await?);
                }
                info!("Embedded {} catalog careers", vectors.len());
                Ok::<_, EmbeddingError>(vectors)
            })
            .await
            .map_err(|e| AppError::Upstream(format!("Catalog embedding failed: {e}")))
    }
}

/// Indices of the `k` most similar vectors with their scores, descending.
/// Equal scores keep catalog order.
pub fn rank(query: &[f32], candidates: &[Vec<f32>], k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = candidates
        .iter()
        .enumerate()
        .map(|(index, vector)| (index, cosine_similarity(query, vector)))
        .collect();
    // stable: ties stay in catalog order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(k);
    scored
}

fn round3(score: f32) -> f64 {
    (f64::from(score) * 1000.0).round() / 1000.0
}
