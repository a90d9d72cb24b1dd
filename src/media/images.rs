use crate::Result;
use async_trait::async_trait;
use regex::Regex;
use std::{collections::HashSet, sync::LazyLock};
use tracing::debug;

static MEDIA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"murl&quot;:&quot;(.*?)&quot;").expect("media url pattern is valid")
});

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Returns up to `limit` image URLs for `query`.
    async fn search_images(&self, query: &str, limit: usize) -> Result<Vec<String>>;
}

/// Scrapes Bing's asynchronous image results page.
pub struct BingImageSearch {
    client: reqwest::Client,
    base_url: String,
}

impl BingImageSearch {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageSearch for BingImageSearch {
    async fn search_images(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let query = query.trim();
        debug!("Searching images for '{}'", query);

        let html = self
            .client
            .get(format!("{}/images/async", self.base_url))
            .query(&[
                ("q", query),
                ("first", "0"),
                ("count", "35"),
                ("adlt", "off"),
                ("qft", ""),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let urls = extract_image_urls(&html, limit);
        debug!("Found {} images for '{}'", urls.len(), query);
        Ok(urls)
    }
}

/// Pulls full-size image URLs out of a results page, deduplicated and capped
/// to `limit`. Only http(s) URLs are kept.
pub fn extract_image_urls(html: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();

    MEDIA_URL
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
        .filter(|url| seen.insert(*url))
        .take(limit)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tile(url: &str) -> String {
        format!(
            r#"<a class="iusc" m="{{&quot;cid&quot;:&quot;x&quot;,&quot;murl&quot;:&quot;{}&quot;,&quot;turl&quot;:&quot;t&quot;}}">"#,
            url
        )
    }

    #[test]
    fn test_extracts_and_caps() {
        let html: String = (1..=6)
            .map(|i| tile(&format!("https://img.example.com/{i}.jpg")))
            .collect();

        assert_eq!(
            extract_image_urls(&html, 4),
            vec![
                "https://img.example.com/1.jpg",
                "https://img.example.com/2.jpg",
                "https://img.example.com/3.jpg",
                "https://img.example.com/4.jpg",
            ]
        );
    }

    #[test]
    fn test_duplicates_and_non_http_dropped() {
        let html = [
            tile("https://a.example.com/dosa.jpg"),
            tile("https://a.example.com/dosa.jpg"),
            tile("data:image/png;base64,AAAA"),
            tile("https://b.example.com/dosa.png"),
        ]
        .concat();

        assert_eq!(
            extract_image_urls(&html, 4),
            vec![
                "https://a.example.com/dosa.jpg",
                "https://b.example.com/dosa.png",
            ]
        );
    }
}
