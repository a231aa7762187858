//! Pipeline coordination.
//!
//! Runs the two stages strictly in sequence: collect every configured
//! channel, persist the merged transcript dataset, then encode it. Nothing
//! here retries; the first fatal error aborts the run.

use crate::collector::Collector;
use crate::config::Settings;
use crate::dataset;
use crate::encoder::{self, Embedder, FastembedEmbedder};
use crate::error::{AvskriftError, Result};
use crate::record::VideoRecord;
use std::time::Instant;
use tracing::info;

/// Counts reported after a successful run.
#[derive(Debug)]
pub struct RunSummary {
    pub channels: usize,
    pub records: usize,
    pub dimension: usize,
}

/// Execute one full collect-then-encode run.
pub async fn run(settings: &Settings) -> Result<RunSummary> {
    let start = Instant::now();

    if settings.youtube.channel_ids.is_empty() {
        return Err(AvskriftError::Config(
            "No channels configured: set youtube.channel_ids in config.toml".to_string(),
        ));
    }
    let api_key = settings.api_key()?;
    std::fs::create_dir_all(settings.data_dir())?;

    let collector = Collector::new(api_key);
    let mut sequences = Vec::with_capacity(settings.youtube.channel_ids.len());
    for channel_id in &settings.youtube.channel_ids {
        sequences.push(
            collector
                .collect(channel_id, settings.youtube.max_results)
                .await?,
        );
    }
    let records = merge_channels(sequences);

    let transcripts_path = settings.data_dir().join(dataset::TRANSCRIPTS_FILE);
    dataset::write_transcripts(&transcripts_path, &records)?;

    let mut embedder = FastembedEmbedder::load(&settings.embedding.model)?;
    let embeddings_path = settings.data_dir().join(dataset::EMBEDDINGS_FILE);
    let encoded = encoder::encode_transcripts(&transcripts_path, &embeddings_path, &mut embedder)?;

    info!(
        "Finished! Encoded {} records in ~{:.2} minutes.",
        encoded,
        start.elapsed().as_secs_f64() / 60.0
    );
    Ok(RunSummary {
        channels: settings.youtube.channel_ids.len(),
        records: encoded,
        dimension: embedder.dimension(),
    })
}

/// Concatenate per-channel sequences and sort the whole dataset ascending
/// by publication time. The sort is stable, so records with equal
/// timestamps keep their channel order.
pub fn merge_channels(sequences: Vec<Vec<VideoRecord>>) -> Vec<VideoRecord> {
    let mut merged: Vec<VideoRecord> = sequences.into_iter().flatten().collect();
    merged.sort_by(|a, b| a.datetime.cmp(&b.datetime));
    merged
}
