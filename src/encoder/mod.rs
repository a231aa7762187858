//! Transcript encoding: text to fixed-length embedding vectors.

mod fastembed;

pub use fastembed::FastembedEmbedder;

use crate::dataset;
use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Trait for batch text embedding.
///
/// `embed_batch` must return exactly one vector per input text, in input
/// order, each with `dimension()` components.
pub trait Embedder: Send {
    /// Generate embeddings for multiple texts.
    fn embed_batch(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// The model's native output dimension.
    fn dimension(&self) -> usize;

    /// The model name/identifier.
    fn model_name(&self) -> &str;
}

/// Read the transcript dataset from `input`, embed every transcript, and
/// write the dataset joined with the embedding columns to `output`.
///
/// Row order is carried straight through from read to write so that row i
/// of the output holds the vector for row i of the input. Any failure is
/// fatal; no partial output is written.
pub fn encode_transcripts(
    input: &Path,
    output: &Path,
    embedder: &mut dyn Embedder,
) -> Result<usize> {
    let records = dataset::read_transcripts(input)?;
    info!(
        "Encoding {} transcripts with '{}' ({} dimensions)",
        records.len(),
        embedder.model_name(),
        embedder.dimension()
    );

    let transcripts: Vec<String> = records.iter().map(|r| r.transcript.clone()).collect();
    let embeddings = embedder.embed_batch(&transcripts)?;

    dataset::write_embeddings(output, &records, &embeddings, embedder.dimension())?;
    Ok(records.len())
}
