use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::Config;
use crate::error::{GuidanceError, Result};
use crate::models::Language;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate English `text` into `target`. Never fails: when the target
    /// is English the call is skipped, and any upstream failure returns the
    /// original text unchanged with a logged warning.
    async fn translate(&self, text: &str, target: Language) -> String;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'static str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Adapter for a LibreTranslate-compatible endpoint. Source language is
/// always English.
pub struct LibreTranslator {
    client: Client,
    api_url: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl LibreTranslator {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.request_timeout())
            .build()
            .map_err(GuidanceError::Request)?;

        Ok(Self {
            client,
            api_url: cfg.translation.api_url.clone(),
            max_attempts: cfg.http.retry.max_attempts,
            retry_delay: Duration::from_millis(cfg.http.retry.initial_delay_ms),
        })
    }

    async fn request(&self, text: &str, target: Language) -> Result<String> {
        let body = TranslateRequest {
            q: text,
            source: "en",
            target: target.code(),
            format: "text",
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(GuidanceError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(GuidanceError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: TranslateResponse = response.json().await.map_err(GuidanceError::Request)?;
        Ok(parsed.translated_text)
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(&self, text: &str, target: Language) -> String {
        if target == Language::English {
            return text.to_string();
        }

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.request(text, target).await {
                Ok(translated) => return translated,
                Err(e) if attempts < self.max_attempts => {
                    tracing::warn!(
                        target = target.as_str(),
                        attempt = attempts,
                        error = %e,
                        "Translation attempt failed, retrying"
                    );
                    sleep(self.retry_delay).await;
                }
                Err(e) => {
                    tracing::warn!(
                        target = target.as_str(),
                        error = %e,
                        "Translation failed, returning original text"
                    );
                    return text.to_string();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_request_wire_shape() {
        let req = TranslateRequest {
            q: "Peace be with you.",
            source: "en",
            target: Language::Spanish.code(),
            format: "text",
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["q"], "Peace be with you.");
        assert_eq!(json["source"], "en");
        assert_eq!(json["target"], "es");
        assert_eq!(json["format"], "text");
    }

    #[test]
    fn test_translate_response_field_name() {
        let parsed: TranslateResponse =
            serde_json::from_str(r#"{"translatedText":"La paz sea contigo."}"#).expect("parse");
        assert_eq!(parsed.translated_text, "La paz sea contigo.");
    }

    #[tokio::test]
    async fn test_english_target_skips_the_call() {
        // Unroutable endpoint: if the adapter tried the network, this would
        // hang or fail rather than return immediately.
        let mut cfg = Config::default();
        cfg.translation.api_url = "http://127.0.0.1:1/translate".to_string();
        cfg.chat.api_key = "test-key".to_string();
        let translator = LibreTranslator::new(&cfg).expect("build translator");

        let out = translator.translate("unchanged", Language::English).await;
        assert_eq!(out, "unchanged");
    }

    #[tokio::test]
    async fn test_failed_translation_returns_original() {
        let mut cfg = Config::default();
        cfg.translation.api_url = "http://127.0.0.1:1/translate".to_string();
        cfg.http.retry.initial_delay_ms = 1;
        cfg.chat.api_key = "test-key".to_string();
        let translator = LibreTranslator::new(&cfg).expect("build translator");

        let out = translator.translate("Peace be with you.", Language::Spanish).await;
        assert_eq!(out, "Peace be with you.");
    }
}
