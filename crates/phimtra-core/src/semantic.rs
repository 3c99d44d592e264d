//! Semantic keyword fallback: embed the query and the catalog's category
//! names, then keep the categories closest to the query.

mod error;
mod handle;
mod http;

pub use error::SemanticError;
pub use handle::EncoderHandle;
pub use http::HttpEncoder;

/// Added to every vector norm so zero vectors score 0 instead of NaN.
const NORM_EPSILON: f32 = 1e-12;

/// Sentence encoder producing one embedding per input text.
pub trait TextEncoder: Send + Sync {
    /// Embed a batch of texts, returning vectors in input order.
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticError>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity between `query` and each candidate, in candidate order.
///
/// All vectors must share the query's dimensionality.
pub fn cosine_similarity(
    query: &[f32],
    candidates: &[Vec<f32>],
) -> Result<Vec<f32>, SemanticError> {
    let query_norm = norm(query) + NORM_EPSILON;

    candidates
        .iter()
        .map(|c| {
            if c.len() != query.len() {
                return Err(SemanticError::Dimension {
                    expected: query.len(),
                    found: c.len(),
                });
            }
            let dot: f32 = query.iter().zip(c).map(|(a, b)| a * b).sum();
            Ok(dot / (query_norm * (norm(c) + NORM_EPSILON)))
        })
        .collect()
}

/// Names of the `top_k` most similar categories, best first, keeping only
/// those whose similarity is strictly above `threshold`. Ties keep catalog
/// order.
pub fn rank_keywords(
    query: &[f32],
    names: &[String],
    vectors: &[Vec<f32>],
    threshold: f32,
    top_k: usize,
) -> Result<Vec<String>, SemanticError> {
    if names.len() != vectors.len() {
        return Err(SemanticError::Parse(format!(
            "{} category names but {} embeddings",
            names.len(),
            vectors.len()
        )));
    }

    let scores = cosine_similarity(query, vectors)?;
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    Ok(order
        .into_iter()
        .take(top_k)
        .filter(|&i| scores[i] > threshold)
        .map(|i| names[i].clone())
        .collect())
}
