//! Dataset persistence.
//!
//! Both outputs are flat CSV files: the transcript dataset, and the same
//! dataset horizontally joined with one column per embedding component.
//! Rows in the embeddings file are positionally aligned with the rows of
//! the transcripts file; nothing here re-sorts or re-filters.

use crate::error::{AvskriftError, Result};
use crate::record::VideoRecord;
use std::path::Path;
use tracing::info;

/// Output file for the collected transcript dataset.
pub const TRANSCRIPTS_FILE: &str = "video_transcripts.csv";

/// Output file for the transcript dataset joined with embedding columns.
pub const EMBEDDINGS_FILE: &str = "transcript_embeddings.csv";

/// Write the transcript dataset, overwriting any previous run's output.
pub fn write_transcripts(path: &Path, records: &[VideoRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Read the transcript dataset back, preserving row order.
pub fn read_transcripts(path: &Path) -> Result<Vec<VideoRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Write the transcript dataset extended with `embedding_1..embedding_D`
/// columns. `embeddings[i]` must be the vector for `records[i]`; any shape
/// mismatch is an error and nothing is written.
pub fn write_embeddings(
    path: &Path,
    records: &[VideoRecord],
    embeddings: &[Vec<f32>],
    dimension: usize,
) -> Result<()> {
    if records.len() != embeddings.len() {
        return Err(AvskriftError::Dataset(format!(
            "row mismatch: {} records but {} embeddings",
            records.len(),
            embeddings.len()
        )));
    }
    for (i, vector) in embeddings.iter().enumerate() {
        if vector.len() != dimension {
            return Err(AvskriftError::Dataset(format!(
                "embedding at row {} has {} components, expected {}",
                i,
                vector.len(),
                dimension
            )));
        }
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<String> = ["video_id", "datetime", "title", "transcript"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    header.extend((1..=dimension).map(|i| format!("embedding_{}", i)));
    writer.write_record(&header)?;

    for (record, vector) in records.iter().zip(embeddings) {
        let mut row: Vec<String> = vec![
            record.video_id.clone(),
            record.datetime.to_rfc3339(),
            record.title.clone(),
            record.transcript.clone(),
        ];
        row.extend(vector.iter().map(|v| v.to_string()));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    info!(
        "Wrote {} records with {} embedding columns to {}",
        records.len(),
        dimension,
        path.display()
    );
    Ok(())
}
