use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::content;
use crate::error::{GuidanceError, Result};
use crate::models::Religion;

/// Where a fetched value came from. Fallback marks degraded operation so
/// callers can tell live content from canned content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Live,
    Fallback,
}

/// Enrichment value plus its provenance.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Fetched<T> {
    fn live(value: T) -> Self {
        Self {
            value,
            source: Source::Live,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            source: Source::Fallback,
        }
    }
}

pub const NEWS_KEY_MISSING: &str = "News API key not found.";
pub const NEWS_UNAVAILABLE: &str = "Unable to fetch news at this time.";
pub const NEWS_EMPTY: &str = "No recent news found.";

#[derive(Debug, Deserialize)]
struct VerseResponse {
    verse: VerseDetailsWrapper,
}

#[derive(Debug, Deserialize)]
struct VerseDetailsWrapper {
    details: VerseDetails,
}

#[derive(Debug, Deserialize)]
struct VerseDetails {
    text: String,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsArticle {
    title: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct MusicResponse {
    music_url: String,
}

/// Thin clients for the verse, news and music endpoints.
///
/// Each fetch is a single bounded-timeout attempt; any failure degrades to
/// the static tables in [`content`] with a logged warning. No retries, no
/// caching.
pub struct ContentFetcher {
    client: Client,
    verse_url: String,
    news_url: String,
    news_key: Option<String>,
    news_page_size: u32,
    music_url: String,
}

impl ContentFetcher {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.request_timeout())
            .build()
            .map_err(GuidanceError::Request)?;

        Ok(Self {
            client,
            verse_url: cfg.verse.api_url.clone(),
            news_url: cfg.news.api_url.clone(),
            news_key: cfg.news.api_key.clone(),
            news_page_size: cfg.news.page_size,
            music_url: cfg.music.api_url.clone(),
        })
    }

    /// Daily verse. Only Christianity has a live feed; every other religion
    /// comes straight from the static table and is reported as Fallback.
    pub async fn daily_verse(&self, religion: Religion) -> Fetched<String> {
        if religion != Religion::Christianity {
            return Fetched::fallback(content::fallback_verse(religion).to_string());
        }

        match self.fetch_verse().await {
            Ok(text) => Fetched::live(text),
            Err(e) => {
                tracing::warn!(error = %e, "Verse fetch failed, using fallback verse");
                Fetched::fallback(content::fallback_verse(religion).to_string())
            }
        }
    }

    async fn fetch_verse(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.verse_url)
            .send()
            .await?
            .error_for_status()?;
        let parsed: VerseResponse = response.json().await?;
        Ok(parsed.verse.details.text)
    }

    /// Recent news headlines as markdown links. Without an API key the
    /// feature degrades to a fixed message rather than failing.
    pub async fn news(&self, religion: Religion) -> Fetched<Vec<String>> {
        let Some(key) = self.news_key.as_deref() else {
            return Fetched::fallback(vec![NEWS_KEY_MISSING.to_string()]);
        };

        match self.fetch_news(religion, key).await {
            Ok(items) if items.is_empty() => Fetched::live(vec![NEWS_EMPTY.to_string()]),
            Ok(items) => Fetched::live(items),
            Err(e) => {
                tracing::warn!(
                    religion = religion.as_str(),
                    error = %e,
                    "News fetch failed, using fixed message"
                );
                Fetched::fallback(vec![NEWS_UNAVAILABLE.to_string()])
            }
        }
    }

    async fn fetch_news(&self, religion: Religion, key: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.news_url)
            .query(&[
                ("q", religion.as_str()),
                ("apiKey", key),
                ("language", "en"),
                ("pageSize", &self.news_page_size.to_string()),
                ("sortBy", "relevancy"),
            ])
            .send()
            .await?
            .error_for_status()?;
        let parsed: NewsResponse = response.json().await?;
        Ok(parsed
            .articles
            .into_iter()
            .map(|a| format!("[{}]({})", a.title, a.url))
            .collect())
    }

    /// Background music URL for the religion, from the music endpoint with a
    /// static per-religion fallback.
    pub async fn background_music(&self, religion: Religion) -> Fetched<String> {
        match self.fetch_music(religion).await {
            Ok(url) => Fetched::live(url),
            Err(e) => {
                tracing::warn!(
                    religion = religion.as_str(),
                    error = %e,
                    "Music fetch failed, using fallback URL"
                );
                Fetched::fallback(content::fallback_music_url(religion).to_string())
            }
        }
    }

    async fn fetch_music(&self, religion: Religion) -> Result<String> {
        let response = self
            .client
            .get(&self.music_url)
            .query(&[("religion", religion.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let parsed: MusicResponse = response.json().await?;
        Ok(parsed.music_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher_with(cfg: Config) -> ContentFetcher {
        ContentFetcher::new(&cfg).expect("build fetcher")
    }

    fn unroutable_config() -> Config {
        let mut cfg = Config::default();
        cfg.chat.api_key = "test-key".to_string();
        cfg.verse.api_url = "http://127.0.0.1:1/verse".to_string();
        cfg.news.api_url = "http://127.0.0.1:1/news".to_string();
        cfg.music.api_url = "http://127.0.0.1:1/music".to_string();
        cfg
    }

    #[test]
    fn test_verse_response_json_path() {
        let parsed: VerseResponse = serde_json::from_str(
            r#"{"verse":{"details":{"text":"The Lord is my shepherd.","reference":"Psalm 23"}}}"#,
        )
        .expect("parse");
        assert_eq!(parsed.verse.details.text, "The Lord is my shepherd.");
    }

    #[test]
    fn test_news_response_json_path() {
        let parsed: NewsResponse = serde_json::from_str(
            r#"{"articles":[{"title":"Interfaith summit","url":"https://example.com/a","extra":1}]}"#,
        )
        .expect("parse");
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(parsed.articles[0].title, "Interfaith summit");
    }

    #[tokio::test]
    async fn test_non_christian_verse_is_static_fallback() {
        let fetcher = fetcher_with(unroutable_config());
        let verse = fetcher.daily_verse(Religion::Buddhism).await;
        assert_eq!(verse.source, Source::Fallback);
        assert_eq!(verse.value, content::fallback_verse(Religion::Buddhism));
    }

    #[tokio::test]
    async fn test_failed_verse_fetch_falls_back() {
        let fetcher = fetcher_with(unroutable_config());
        let verse = fetcher.daily_verse(Religion::Christianity).await;
        assert_eq!(verse.source, Source::Fallback);
        assert_eq!(verse.value, content::DEFAULT_VERSE);
    }

    #[tokio::test]
    async fn test_news_without_key_degrades() {
        let fetcher = fetcher_with(unroutable_config());
        let news = fetcher.news(Religion::Islam).await;
        assert_eq!(news.source, Source::Fallback);
        assert_eq!(news.value, vec![NEWS_KEY_MISSING.to_string()]);
    }

    #[tokio::test]
    async fn test_news_fetch_failure_uses_fixed_message() {
        let mut cfg = unroutable_config();
        cfg.news.api_key = Some("news-key".to_string());
        let fetcher = fetcher_with(cfg);
        let news = fetcher.news(Religion::Islam).await;
        assert_eq!(news.source, Source::Fallback);
        assert_eq!(news.value, vec![NEWS_UNAVAILABLE.to_string()]);
    }

    #[tokio::test]
    async fn test_failed_music_fetch_uses_static_table() {
        let fetcher = fetcher_with(unroutable_config());
        let music = fetcher.background_music(Religion::Taoism).await;
        assert_eq!(music.source, Source::Fallback);
        assert_eq!(music.value, content::fallback_music_url(Religion::Taoism));
    }
}
