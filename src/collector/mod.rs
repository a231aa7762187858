//! Channel collection: listing, transcript resolution, and normalization.
//!
//! One `collect` call produces the cleaned, deduplicated, time-sorted record
//! sequence for a single channel. The caller concatenates sequences across
//! channels and applies the final global sort.

mod listing;
mod transcript;

pub use listing::{VideoEntry, VideoListing, YoutubeListing, MAX_RESULTS_CAP};
pub use transcript::{TranscriptError, TranscriptSegment, TranscriptSource, YoutubeTranscripts};

use crate::error::Result;
use crate::record::VideoRecord;
use std::collections::HashSet;
use tracing::{info, warn};

/// Collects transcribed video records for a channel.
pub struct Collector {
    listing: Box<dyn VideoListing>,
    transcripts: Box<dyn TranscriptSource>,
}

impl Collector {
    /// Create a collector backed by the real YouTube APIs.
    pub fn new(api_key: String) -> Self {
        Self {
            listing: Box::new(YoutubeListing::new(api_key)),
            transcripts: Box::new(YoutubeTranscripts::new()),
        }
    }

    /// Create a collector with injected sources.
    pub fn with_sources(
        listing: Box<dyn VideoListing>,
        transcripts: Box<dyn TranscriptSource>,
    ) -> Self {
        Self {
            listing,
            transcripts,
        }
    }

    /// Collect up to `max_results` recent videos for the channel, keeping
    /// only those with a transcript, deduplicated by video ID and sorted
    /// ascending by publication time.
    ///
    /// A listing failure aborts the whole call; a transcript failure drops
    /// only that video.
    pub async fn collect(&self, channel_id: &str, max_results: u32) -> Result<Vec<VideoRecord>> {
        info!("Collecting recent videos for channel '{}'", channel_id);
        let entries = self.listing.recent_videos(channel_id, max_results).await?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut records: Vec<VideoRecord> = Vec::with_capacity(entries.len());

        for entry in entries {
            if !seen.insert(entry.video_id.clone()) {
                continue;
            }

            match self.transcripts.fetch(&entry.video_id).await {
                Ok(segments) => {
                    let transcript = segments
                        .iter()
                        .map(|seg| seg.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    records.push(VideoRecord::new(
                        entry.video_id,
                        entry.published_at,
                        &entry.title,
                        &transcript,
                    ));
                }
                Err(TranscriptError::NotAvailable) => {
                    info!("Video '{}' has no transcript, skipping", entry.video_id);
                }
                Err(e) => {
                    warn!(
                        "Transcript lookup for video '{}' failed ({}), skipping",
                        entry.video_id, e
                    );
                }
            }
        }

        records.sort_by(|a, b| a.datetime.cmp(&b.datetime));
        info!(
            "Collected {} transcribed videos for channel '{}'",
            records.len(),
            channel_id
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;

    struct FakeListing {
        entries: Vec<VideoEntry>,
    }

    #[async_trait]
    impl VideoListing for FakeListing {
        async fn recent_videos(
            &self,
            _channel_id: &str,
            _max_results: u32,
        ) -> Result<Vec<VideoEntry>> {
            Ok(self.entries.clone())
        }
    }

    struct FakeTranscripts {
        by_id: HashMap<String, Vec<TranscriptSegment>>,
        fail_ids: Vec<String>,
    }

    #[async_trait]
    impl TranscriptSource for FakeTranscripts {
        async fn fetch(
            &self,
            video_id: &str,
        ) -> std::result::Result<Vec<TranscriptSegment>, TranscriptError> {
            if self.fail_ids.iter().any(|id| id == video_id) {
                return Err(TranscriptError::Fetch("boom".to_string()));
            }
            self.by_id
                .get(video_id)
                .cloned()
                .ok_or(TranscriptError::NotAvailable)
        }
    }

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn entry(id: &str, hour: u32, title: &str) -> VideoEntry {
        VideoEntry {
            video_id: id.to_string(),
            published_at: ts(hour),
            title: title.to_string(),
        }
    }

    fn segments(texts: &[&str]) -> Vec<TranscriptSegment> {
        texts
            .iter()
            .map(|t| TranscriptSegment {
                text: (*t).to_string(),
            })
            .collect()
    }

    fn collector(entries: Vec<VideoEntry>, transcripts: FakeTranscripts) -> Collector {
        Collector::with_sources(Box::new(FakeListing { entries }), Box::new(transcripts))
    }

    #[tokio::test]
    async fn test_video_without_transcript_is_dropped() {
        let c = collector(
            vec![
                entry("vid-with-txt", 10, "Bob&#39;s Video"),
                entry("vid-no-txt", 9, "Silent Video"),
            ],
            FakeTranscripts {
                by_id: HashMap::from([(
                    "vid-with-txt".to_string(),
                    segments(&["so today", "we&#39;re  live"]),
                )]),
                fail_ids: vec![],
            },
        );

        let records = c.collect("UCtest", 50).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "vid-with-txt");
        assert_eq!(records[0].title, "Bob's Video");
        assert_eq!(records[0].transcript, "so today we're live");
    }

    #[tokio::test]
    async fn test_failed_lookup_skips_only_that_video() {
        let c = collector(
            vec![entry("bad", 8, "a"), entry("good", 9, "b")],
            FakeTranscripts {
                by_id: HashMap::from([("good".to_string(), segments(&["hello"]))]),
                fail_ids: vec!["bad".to_string()],
            },
        );

        let records = c.collect("UCtest", 50).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "good");
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_collapsed() {
        let c = collector(
            vec![
                entry("dup", 10, "first"),
                entry("dup", 10, "second"),
                entry("other", 9, "other"),
            ],
            FakeTranscripts {
                by_id: HashMap::from([
                    ("dup".to_string(), segments(&["x"])),
                    ("other".to_string(), segments(&["y"])),
                ]),
                fail_ids: vec![],
            },
        );

        let records = c.collect("UCtest", 50).await.unwrap();
        let ids: HashSet<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[tokio::test]
    async fn test_result_is_sorted_ascending_by_datetime() {
        let c = collector(
            vec![
                entry("newest", 12, "n"),
                entry("middle", 11, "m"),
                entry("oldest", 10, "o"),
            ],
            FakeTranscripts {
                by_id: HashMap::from([
                    ("newest".to_string(), segments(&["a"])),
                    ("middle".to_string(), segments(&["b"])),
                    ("oldest".to_string(), segments(&["c"])),
                ]),
                fail_ids: vec![],
            },
        );

        let records = c.collect("UCtest", 50).await.unwrap();
        let times: Vec<_> = records.iter().map(|r| r.datetime).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);
        assert!(records.iter().all(|r| !r.transcript.is_empty()));
    }
}
