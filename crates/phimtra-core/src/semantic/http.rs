use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{SemanticError, TextEncoder};
use crate::config::SemanticConfig;

/// Encoder backed by an OpenAI-compatible `/v1/embeddings` endpoint.
pub struct HttpEncoder {
    endpoint: Url,
    model: String,
    api_key: Option<String>,
    http: Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

impl HttpEncoder {
    pub fn new(
        endpoint: Url,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SemanticError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            model: model.into(),
            api_key,
            http,
        })
    }

    /// Build from config, reading the bearer token from the configured
    /// environment variable.
    pub fn from_config(config: &SemanticConfig) -> Result<Self, SemanticError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            SemanticError::Init(format!("invalid endpoint {:?}: {e}", config.endpoint))
        })?;

        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::debug!(
                var = %config.api_key_env,
                "no API key set, sending unauthenticated requests"
            );
        }

        Self::new(
            endpoint,
            config.model.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Check the HTTP response for errors and return the body text on failure.
    fn check_response(resp: Response) -> Result<Response, SemanticError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            tracing::warn!(status, "embeddings API error");
            Err(SemanticError::Api {
                status,
                message: body,
            })
        }
    }
}

impl TextEncoder for HttpEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut req = self.http.post(self.endpoint.clone()).json(&EmbeddingRequest {
            model: &self.model,
            input: texts,
        });
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = Self::check_response(req.send()?)?;
        let body: EmbeddingResponse = resp
            .json()
            .map_err(|e| SemanticError::Parse(e.to_string()))?;

        tracing::debug!(inputs = texts.len(), model = %self.model, "embeddings received");
        into_vectors(body, texts.len())
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Reorder embeddings by `index` and check the count and dimensionality.
fn into_vectors(
    mut body: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, SemanticError> {
    if body.data.is_empty() {
        return Err(SemanticError::EmptyResponse);
    }
    if body.data.len() != expected {
        return Err(SemanticError::Parse(format!(
            "expected {expected} embeddings, got {}",
            body.data.len()
        )));
    }

    body.data.sort_by_key(|item| item.index);
    if body.data.iter().enumerate().any(|(i, item)| item.index != i) {
        return Err(SemanticError::Parse("embedding indices are not 0..n".into()));
    }

    let dim = body.data[0].embedding.len();
    if dim == 0 {
        return Err(SemanticError::EmptyResponse);
    }
    if let Some(bad) = body.data.iter().find(|item| item.embedding.len() != dim) {
        return Err(SemanticError::Dimension {
            expected: dim,
            found: bad.embedding.len(),
        });
    }

    Ok(body.data.into_iter().map(|item| item.embedding).collect())
}
