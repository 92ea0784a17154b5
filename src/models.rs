use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a transcript entry, serialized lowercase for the chat API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One transcript entry. Immutable after creation, session-local only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Closed set of supported religions.
///
/// Lookup tables are keyed on this enum rather than free-text names so the
/// selection list and the content tables cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Religion {
    Christianity,
    Islam,
    Hinduism,
    Buddhism,
    Judaism,
    Sikhism,
    Jainism,
    Bahai,
    Shinto,
    Taoism,
}

impl Religion {
    pub const ALL: [Religion; 10] = [
        Religion::Christianity,
        Religion::Islam,
        Religion::Hinduism,
        Religion::Buddhism,
        Religion::Judaism,
        Religion::Sikhism,
        Religion::Jainism,
        Religion::Bahai,
        Religion::Shinto,
        Religion::Taoism,
    ];

    /// Display name, also used verbatim in prompts and news queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Religion::Christianity => "Christianity",
            Religion::Islam => "Islam",
            Religion::Hinduism => "Hinduism",
            Religion::Buddhism => "Buddhism",
            Religion::Judaism => "Judaism",
            Religion::Sikhism => "Sikhism",
            Religion::Jainism => "Jainism",
            Religion::Bahai => "Baha'i",
            Religion::Shinto => "Shinto",
            Religion::Taoism => "Taoism",
        }
    }

    /// Case-insensitive parse of a user-supplied name. Accepts "Baha'i"
    /// with or without the apostrophe.
    pub fn parse(s: &str) -> Option<Religion> {
        match s.trim().to_lowercase().as_str() {
            "christianity" => Some(Religion::Christianity),
            "islam" => Some(Religion::Islam),
            "hinduism" => Some(Religion::Hinduism),
            "buddhism" => Some(Religion::Buddhism),
            "judaism" => Some(Religion::Judaism),
            "sikhism" => Some(Religion::Sikhism),
            "jainism" => Some(Religion::Jainism),
            "baha'i" | "bahai" => Some(Religion::Bahai),
            "shinto" => Some(Religion::Shinto),
            "taoism" => Some(Religion::Taoism),
            _ => None,
        }
    }
}

impl std::fmt::Display for Religion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of supported response languages. English is always the source
/// language; everything else goes through the translation adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Chinese,
    Hindi,
    Arabic,
    Portuguese,
    Russian,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
        Language::Hindi,
        Language::Arabic,
        Language::Portuguese,
        Language::Russian,
        Language::Japanese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Chinese => "Chinese",
            Language::Hindi => "Hindi",
            Language::Arabic => "Arabic",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Japanese => "Japanese",
        }
    }

    /// ISO 639-1 code expected by the translation endpoint.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Chinese => "zh",
            Language::Hindi => "hi",
            Language::Arabic => "ar",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Japanese => "ja",
        }
    }

    pub fn parse(s: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display theme. Stored with the session and echoed back to the front end;
/// this crate does no rendering with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
    Blue,
    Green,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Blue => "Blue",
            Theme::Green => "Green",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "blue" => Some(Theme::Blue),
            "green" => Some(Theme::Green),
            _ => None,
        }
    }
}

/// User-selected preferences driving every content lookup and prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Preferences {
    pub religion: Religion,
    pub language: Language,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            religion: Religion::Christianity,
            language: Language::English,
            theme: Theme::Light,
        }
    }
}

/// Minimal profile, mutated only by an explicit save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            username: "Guest".to_string(),
        }
    }
}

/// Wire-format message for the chat completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Request body for the chat completion endpoint. Field names are fixed by
/// the API; `stream` is always false.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}
