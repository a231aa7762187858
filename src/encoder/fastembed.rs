//! Local embedding model via fastembed (ONNX runtime).

use super::Embedder;
use crate::error::{AvskriftError, Result};
use fastembed::{EmbeddingModel, InitOptions, ModelInfo, TextEmbedding};
use tracing::debug;

/// Embedder backed by a pretrained sentence embedding model running
/// locally. The model is resolved by its published model code, and the
/// output dimension is taken from the model metadata rather than config.
pub struct FastembedEmbedder {
    model: TextEmbedding,
    model_code: String,
    dimension: usize,
}

impl std::fmt::Debug for FastembedEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastembedEmbedder")
            .field("model_code", &self.model_code)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl FastembedEmbedder {
    /// Load a supported model by name, downloading it on first use.
    pub fn load(model_name: &str) -> Result<Self> {
        let info = resolve_model(model_name).ok_or_else(|| {
            AvskriftError::Embedding(format!("Unknown embedding model '{}'", model_name))
        })?;

        let model = TextEmbedding::try_new(
            InitOptions::new(info.model.clone()).with_show_download_progress(false),
        )
        .map_err(|e| {
            AvskriftError::Embedding(format!("Failed to load '{}': {}", info.model_code, e))
        })?;

        debug!(
            "Loaded embedding model '{}' ({} dimensions)",
            info.model_code, info.dim
        );
        Ok(Self {
            model,
            model_code: info.model_code,
            dimension: info.dim,
        })
    }
}

/// Find a supported model by its model code. Exact match wins; otherwise
/// the name part after the repo prefix is matched, so that e.g.
/// "BAAI/bge-small-en-v1.5" resolves even when the hosted ONNX copy lives
/// under a different organization.
fn resolve_model(model_name: &str) -> Option<ModelInfo<EmbeddingModel>> {
    let wanted = model_name.to_lowercase();
    let models = TextEmbedding::list_supported_models();

    if let Some(pos) = models
        .iter()
        .position(|m| m.model_code.to_lowercase() == wanted)
    {
        return models.into_iter().nth(pos);
    }

    let short = wanted.rsplit('/').next()?.to_string();
    models
        .into_iter()
        .find(|m| m.model_code.to_lowercase().contains(&short))
}

impl Embedder for FastembedEmbedder {
    fn embed_batch(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Generating embeddings for {} texts", texts.len());
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| AvskriftError::Embedding(e.to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_name_is_an_error() {
        let err = FastembedEmbedder::load("not-a-real/model").unwrap_err();
        assert!(matches!(err, AvskriftError::Embedding(_)));
    }

    #[test]
    fn test_default_model_resolves() {
        let default = crate::config::EmbeddingSettings::default().model;
        let info = resolve_model(&default).unwrap();
        assert!(info.dim > 0);
    }
}
