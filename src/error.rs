use thiserror::Error;

/// Errors surfaced by the guidance pipeline.
///
/// Upstream chat failures are a tagged variant carrying the HTTP status, not
/// a string handed back as assistant content. Enrichment fetchers (verse,
/// news, music, translation) never produce these errors; they degrade to
/// fallback values and log instead.
#[derive(Error, Debug)]
pub enum GuidanceError {
    #[error("chat API key is not configured (set GUIDANCE_API_KEY)")]
    MissingApiKey,

    #[error("chat endpoint returned HTTP {status}: {detail}")]
    Upstream { status: u16, detail: String },

    #[error("chat endpoint returned an unexpected response shape: {raw}")]
    UnexpectedResponse { raw: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, GuidanceError>;
