use crate::Result;
use async_trait::async_trait;
use regex::Regex;
use std::{collections::HashSet, sync::LazyLock};
use tracing::debug;

pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"watch\?v=(\S{11})").expect("video id pattern is valid"));

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Returns up to `limit` watch URLs for `query`.
    async fn search_videos(&self, query: &str, limit: usize) -> Result<Vec<String>>;
}

/// Scrapes the YouTube results page.
pub struct YouTubeSearch {
    client: reqwest::Client,
    base_url: String,
}

impl YouTubeSearch {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl VideoSearch for YouTubeSearch {
    async fn search_videos(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let search_term = format!("{} recipe", query.trim());
        debug!("Searching videos for '{}'", search_term);

        let html = self
            .client
            .get(format!("{}/results", self.base_url))
            .query(&[("search_query", search_term.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let urls: Vec<String> = extract_video_ids(&html, limit)
            .into_iter()
            .map(|id| format!("{}{}", WATCH_URL, id))
            .collect();

        debug!("Found {} videos for '{}'", urls.len(), search_term);
        Ok(urls)
    }
}

/// Pulls watch identifiers out of a results page, deduplicated in first-seen
/// order, then capped to `limit`.
pub fn extract_video_ids(html: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();

    VIDEO_ID
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|id| seen.insert(*id))
        .take(limit)
        .map(str::to_string)
        .collect()
}
