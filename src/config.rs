use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{GuidanceError, Result};

/// Main configuration structure for the guidance service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub verse: VerseConfig,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub api_url: String,
    /// Bearer token for the chat endpoint. Required; startup aborts without it.
    #[serde(default)]
    pub api_key: String,
    pub chat_model: String,
    pub prayer_model: String,
    pub max_tokens: u32,
    pub prayer_max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    pub api_url: String,
    /// Optional; the news feed degrades to a fixed message without it.
    #[serde(default)]
    pub api_key: Option<String>,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerseConfig {
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per call: the first try plus at most one retry.
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub jitter_factor: f64,
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    ///
    /// Every field except the chat API key falls back to a default with a
    /// logged warning; a missing chat key is fatal.
    pub fn load() -> Result<Self> {
        if dotenvy::dotenv().is_ok() {
            tracing::info!("Loaded .env from current directory");
        }

        let config_path =
            env::var("GUIDANCE_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::info!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = env::var("GUIDANCE_API_KEY") {
            self.chat.api_key = api_key;
        }
        if let Ok(url) = env::var("GUIDANCE_CHAT_URL") {
            self.chat.api_url = url;
        }
        if let Ok(model) = env::var("GUIDANCE_CHAT_MODEL") {
            self.chat.chat_model = model;
        }
        if let Ok(model) = env::var("GUIDANCE_PRAYER_MODEL") {
            self.chat.prayer_model = model;
        }

        if let Ok(url) = env::var("GUIDANCE_TRANSLATION_URL") {
            self.translation.api_url = url;
        }

        if let Ok(key) = env::var("NEWS_API_KEY") {
            self.news.api_key = Some(key);
        }
        if let Ok(url) = env::var("GUIDANCE_NEWS_URL") {
            self.news.api_url = url;
        }

        if let Ok(url) = env::var("GUIDANCE_VERSE_URL") {
            self.verse.api_url = url;
        }
        if let Ok(url) = env::var("GUIDANCE_MUSIC_URL") {
            self.music.api_url = url;
        }

        if let Ok(timeout) = env::var("GUIDANCE_HTTP_TIMEOUT_SECONDS") {
            if let Ok(secs) = timeout.parse() {
                self.http.timeout_seconds = secs;
            }
        }
    }

    /// Validate configuration. The chat API key is the only fatal check;
    /// the rest are sanity bounds.
    fn validate(&self) -> Result<()> {
        if self.chat.api_key.trim().is_empty() {
            return Err(GuidanceError::MissingApiKey);
        }
        if self.http.timeout_seconds == 0 {
            return Err(GuidanceError::Config(
                "http.timeout_seconds cannot be 0".to_string(),
            ));
        }
        if self.http.retry.max_attempts == 0 {
            return Err(GuidanceError::Config(
                "http.retry.max_attempts cannot be 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.http.retry.jitter_factor) {
            return Err(GuidanceError::Config(
                "http.retry.jitter_factor must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.news.page_size == 0 {
            return Err(GuidanceError::Config(
                "news.page_size cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat: ChatConfig::default(),
            translation: TranslationConfig::default(),
            news: NewsConfig::default(),
            verse: VerseConfig::default(),
            music: MusicConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.aimlapi.com/chat/completions".to_string(),
            api_key: String::new(),
            chat_model: "gpt-4".to_string(),
            prayer_model: "gpt-4o".to_string(),
            max_tokens: 500,
            prayer_max_tokens: 300,
            temperature: 0.7,
            top_p: 1.0,
            frequency_penalty: 0.0,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://libretranslate.de/translate".to_string(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://newsapi.org/v2/everything".to_string(),
            api_key: None,
            page_size: 5,
        }
    }
}

impl Default for VerseConfig {
    fn default() -> Self {
        Self {
            api_url: "https://beta.ourmanna.com/api/v1/get/?format=json&order=random".to_string(),
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.religiousmusicapi.com/get_music".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 20,
            retry: RetryConfig {
                max_attempts: 2,
                initial_delay_ms: 250,
                jitter_factor: 0.2,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_missing_api_key() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.validate(),
            Err(GuidanceError::MissingApiKey)
        ));
    }

    #[test]
    fn test_validate_accepts_key_with_defaults() {
        let mut cfg = Config::default();
        cfg.chat.api_key = "test-key".to_string();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut cfg = Config::default();
        cfg.chat.api_key = "test-key".to_string();
        cfg.http.timeout_seconds = 0;
        assert!(matches!(cfg.validate(), Err(GuidanceError::Config(_))));
    }

    #[test]
    fn test_env_override_wins_over_default() {
        unsafe { env::set_var("GUIDANCE_CHAT_MODEL", "gpt-4.1-mini") };
        let mut cfg = Config::default();
        cfg.apply_env_overrides();
        assert_eq!(cfg.chat.chat_model, "gpt-4.1-mini");
        unsafe { env::remove_var("GUIDANCE_CHAT_MODEL") };
    }

    #[test]
    fn test_yaml_partial_config_fills_defaults() {
        let yaml = r#"
chat:
  api_url: "https://example.test/chat"
  api_key: "k"
  chat_model: "gpt-4"
  prayer_model: "gpt-4o"
  max_tokens: 400
  prayer_max_tokens: 300
  temperature: 0.5
  top_p: 1.0
  frequency_penalty: 0.0
"#;
        let cfg: Config = serde_yaml::from_str(yaml).expect("parse yaml");
        assert_eq!(cfg.chat.max_tokens, 400);
        assert_eq!(cfg.news.page_size, 5);
        assert_eq!(cfg.http.retry.max_attempts, 2);
    }
}
