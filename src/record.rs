//! The row-level data model shared by the collector and the encoder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the transcript dataset: a single successfully transcribed video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Platform video ID, unique within the final dataset.
    pub video_id: String,
    /// Publication time, the global sort key.
    pub datetime: DateTime<Utc>,
    /// Video title, entity-decoded and whitespace-collapsed.
    pub title: String,
    /// All transcript segments joined with single spaces, entity-decoded
    /// and whitespace-collapsed.
    pub transcript: String,
}

impl VideoRecord {
    /// Build a record from raw API fields, normalizing the text columns.
    pub fn new(
        video_id: String,
        datetime: DateTime<Utc>,
        title: &str,
        transcript: &str,
    ) -> Self {
        Self {
            video_id,
            datetime,
            title: clean_text(title),
            transcript: clean_text(transcript),
        }
    }
}

/// HTML entities the YouTube API leaves encoded in titles and captions.
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&#39;", "'"),
    ("&quot;", "\""),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Decode the known HTML entities and collapse whitespace runs to single
/// spaces. Idempotent: cleaning already-clean text is a no-op.
pub fn clean_text(text: &str) -> String {
    let mut decoded = text.to_string();
    for (entity, replacement) in HTML_ENTITIES {
        decoded = decoded.replace(entity, replacement);
    }
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
