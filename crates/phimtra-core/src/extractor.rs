use phimtra_parse::{normalize, ExtractionResult};

use crate::catalog::{CategoryCatalog, StaticCatalog};
use crate::config::{AppConfig, SemanticConfig};
use crate::error::PhimtraError;
use crate::semantic::{self, EncoderHandle, HttpEncoder, SemanticError, TextEncoder};

/// Similarity cut-off and result count for semantic keywords.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackSettings {
    pub threshold: f32,
    pub top_k: usize,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            top_k: 3,
        }
    }
}

impl From<&SemanticConfig> for FallbackSettings {
    fn from(config: &SemanticConfig) -> Self {
        Self {
            threshold: config.threshold,
            top_k: config.top_k,
        }
    }
}

/// Process-wide query understanding: lexical extraction plus the optional
/// semantic keyword fallback.
///
/// Build one at startup and share it; the encoder is constructed on the first
/// query that needs it.
pub struct QueryIntentExtractor {
    encoder: EncoderHandle,
    catalog: Box<dyn CategoryCatalog>,
    settings: FallbackSettings,
}

impl QueryIntentExtractor {
    pub fn new(
        encoder: EncoderHandle,
        catalog: impl CategoryCatalog + 'static,
        settings: FallbackSettings,
    ) -> Self {
        Self {
            encoder,
            catalog: Box::new(catalog),
            settings,
        }
    }

    /// An extractor that never calls an encoder.
    pub fn lexical_only() -> Self {
        Self::new(
            EncoderHandle::disabled(),
            StaticCatalog::genre_labels(),
            FallbackSettings::default(),
        )
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let encoder = if config.semantic.enabled {
            let semantic = config.semantic.clone();
            EncoderHandle::lazy(move || {
                HttpEncoder::from_config(&semantic).map(|e| Box::new(e) as Box<dyn TextEncoder>)
            })
        } else {
            EncoderHandle::disabled()
        };

        Self::new(
            encoder,
            StaticCatalog::from_config(&config.catalog),
            FallbackSettings::from(&config.semantic),
        )
    }

    pub fn settings(&self) -> FallbackSettings {
        self.settings
    }

    /// Classify `query` and extract its filters. When a natural-language
    /// query yields no genre, country, or title, category keywords are
    /// suggested by similarity; a failing fallback leaves them empty.
    #[tracing::instrument(name = "extract", skip_all, fields(query = %query))]
    pub fn extract(&self, query: &str) -> ExtractionResult {
        let mut result = phimtra_parse::extract(query);

        if result.needs_semantic_fallback() {
            match self.semantic_keywords(query) {
                Ok(keywords) => {
                    for keyword in keywords {
                        if !result.keywords.contains(&keyword) {
                            result.keywords.push(keyword);
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "semantic keyword fallback failed"),
            }
        }

        result
    }

    /// Category names most similar to `query`. Empty when the encoder is
    /// disabled, the query is blank, or the catalog has no categories.
    pub fn semantic_keywords(&self, query: &str) -> Result<Vec<String>, PhimtraError> {
        let text = normalize::prepare(query);
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let Some(encoder) = self.encoder.get() else {
            return Ok(Vec::new());
        };

        let names = self.catalog.category_names()?;
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut texts: Vec<&str> = Vec::with_capacity(names.len() + 1);
        texts.push(&text);
        texts.extend(names.iter().map(String::as_str));

        let mut vectors = encoder.encode(&texts)?;
        if vectors.len() != texts.len() {
            return Err(SemanticError::Parse(format!(
                "{} asked for {} embeddings, got {}",
                encoder.name(),
                texts.len(),
                vectors.len()
            ))
            .into());
        }
        let categories = vectors.split_off(1);
        let query_vec = vectors.pop().ok_or(SemanticError::EmptyResponse)?;

        let keywords = semantic::rank_keywords(
            &query_vec,
            &names,
            &categories,
            self.settings.threshold,
            self.settings.top_k,
        )?;
        tracing::debug!(encoder = encoder.name(), ?keywords, "semantic keywords ranked");
        Ok(keywords)
    }
}
