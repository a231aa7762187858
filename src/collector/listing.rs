//! YouTube Data API v3 video listing.

use crate::error::{AvskriftError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";

/// The YouTube search API caps `maxResults` at 50.
pub const MAX_RESULTS_CAP: u32 = 50;

/// One video entry returned by the listing API, before transcript lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoEntry {
    pub video_id: String,
    pub published_at: DateTime<Utc>,
    pub title: String,
}

/// Source of recent-video listings for a channel.
#[async_trait]
pub trait VideoListing: Send + Sync {
    /// Fetch up to `max_results` most recent videos for the channel,
    /// newest first. Any listing failure is fatal for the channel.
    async fn recent_videos(&self, channel_id: &str, max_results: u32) -> Result<Vec<VideoEntry>>;
}

/// Listing backed by the YouTube Data API v3 search endpoint.
pub struct YoutubeListing {
    client: reqwest::Client,
    api_key: String,
}

impl YoutubeListing {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl VideoListing for YoutubeListing {
    async fn recent_videos(&self, channel_id: &str, max_results: u32) -> Result<Vec<VideoEntry>> {
        let max_results = max_results.min(MAX_RESULTS_CAP).to_string();

        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("channelId", channel_id),
                ("part", "snippet,id"),
                ("order", "date"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AvskriftError::Listing(format!(
                "search request for channel '{}' returned {}",
                channel_id,
                response.status()
            )));
        }

        let search: SearchResponse = response.json().await?;
        Ok(entries_from(search))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    /// Absent when the search result is a channel or playlist.
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(rename = "publishedAt")]
    published_at: DateTime<Utc>,
    title: String,
}

/// Flatten the search payload into entries, dropping non-video results.
fn entries_from(search: SearchResponse) -> Vec<VideoEntry> {
    search
        .items
        .into_iter()
        .filter_map(|item| {
            item.id.video_id.map(|video_id| VideoEntry {
                video_id,
                published_at: item.snippet.published_at,
                title: item.snippet.title,
            })
        })
        .collect()
}
