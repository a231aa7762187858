//! Per-video transcript lookup.
//!
//! YouTube does not expose captions through the Data API, so the lookup goes
//! through the watch page: the player config embedded in the page lists the
//! available caption tracks, and the first track's timedtext URL is fetched
//! in `json3` format.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Failure kinds for a single video's transcript lookup. All of them skip
/// the record rather than abort the channel, but they are logged
/// differently: a missing transcript is the expected common case, the other
/// kinds point at something worth looking into.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("no transcript available")]
    NotAvailable,

    #[error("transcript fetch failed: {0}")]
    Fetch(String),

    #[error("transcript response could not be parsed: {0}")]
    Parse(String),
}

/// One timed caption segment. Only the text matters to the dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
}

/// Source of per-video transcripts.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the ordered transcript segments for a video.
    async fn fetch(
        &self,
        video_id: &str,
    ) -> std::result::Result<Vec<TranscriptSegment>, TranscriptError>;
}

/// Transcript lookup against youtube.com watch pages.
pub struct YoutubeTranscripts {
    client: reqwest::Client,
    caption_tracks: Regex,
}

impl YoutubeTranscripts {
    pub fn new() -> Self {
        let caption_tracks =
            Regex::new(r#""captionTracks":(\[.+?\])"#).expect("Invalid regex");
        Self {
            client: reqwest::Client::new(),
            caption_tracks,
        }
    }

    /// Pull the caption track list out of the watch page HTML.
    fn extract_tracks(
        &self,
        page: &str,
    ) -> std::result::Result<Vec<CaptionTrack>, TranscriptError> {
        let Some(caps) = self.caption_tracks.captures(page) else {
            return Err(TranscriptError::NotAvailable);
        };
        let tracks: Vec<CaptionTrack> = serde_json::from_str(&caps[1])
            .map_err(|e| TranscriptError::Parse(format!("caption track list: {}", e)))?;
        if tracks.is_empty() {
            return Err(TranscriptError::NotAvailable);
        }
        Ok(tracks)
    }
}

impl Default for YoutubeTranscripts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscripts {
    async fn fetch(
        &self,
        video_id: &str,
    ) -> std::result::Result<Vec<TranscriptSegment>, TranscriptError> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        let page = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TranscriptError::Fetch(e.to_string()))?
            .text()
            .await
            .map_err(|e| TranscriptError::Fetch(e.to_string()))?;

        let tracks = self.extract_tracks(&page)?;
        let timedtext_url = format!("{}&fmt=json3", tracks[0].base_url);

        let timedtext: TimedText = self
            .client
            .get(&timedtext_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TranscriptError::Fetch(e.to_string()))?
            .json()
            .await
            .map_err(|e| TranscriptError::Parse(format!("timedtext: {}", e)))?;

        let segments = segments_from(timedtext);
        if segments.is_empty() {
            return Err(TranscriptError::NotAvailable);
        }
        Ok(segments)
    }
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

/// Flatten timedtext events into ordered segments, dropping the newline
/// filler events YouTube inserts between lines.
fn segments_from(timedtext: TimedText) -> Vec<TranscriptSegment> {
    timedtext
        .events
        .into_iter()
        .flat_map(|event| event.segs)
        .filter(|seg| !seg.utf8.trim().is_empty())
        .map(|seg| TranscriptSegment { text: seg.utf8 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tracks_from_player_config() {
        let source = YoutubeTranscripts::new();
        let page = r#"...,"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","name":{"simpleText":"English"},"languageCode":"en"}]}},"videoDetails":..."#;

        let tracks = source.extract_tracks(page).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(
            tracks[0].base_url,
            "https://www.youtube.com/api/timedtext?v=abc&lang=en"
        );
    }

    #[test]
    fn test_page_without_captions_is_not_available() {
        let source = YoutubeTranscripts::new();
        let result = source.extract_tracks("<html>no captions here</html>");
        assert!(matches!(result, Err(TranscriptError::NotAvailable)));
    }

    #[test]
    fn test_parse_timedtext_segments() {
        let payload = r#"{
            "events": [
                {"tStartMs": 0, "segs": [{"utf8": "so today"}, {"utf8": " we're"}]},
                {"tStartMs": 1000, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 2000, "segs": [{"utf8": "looking at"}]},
                {"tStartMs": 3000}
            ]
        }"#;
        let timedtext: TimedText = serde_json::from_str(payload).unwrap();
        let segments = segments_from(timedtext);

        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["so today", " we're", "looking at"]);
    }
}
