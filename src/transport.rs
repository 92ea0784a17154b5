use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::Config;
use crate::error::{GuidanceError, Result};
use crate::models::{ChatRequest, ChatResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse>;
}

/// HTTP transport for the chat completion endpoint.
///
/// Authenticated POST with a bounded request timeout and at most one retry
/// with jittered backoff. Client errors (4xx) are not retried; they carry
/// the same detail on every attempt.
pub struct HttpTransport {
    client: Client,
    api_url: String,
    api_key: String,
    max_attempts: u32,
    initial_delay: Duration,
    jitter_factor: f64,
}

impl HttpTransport {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.request_timeout())
            .build()
            .map_err(GuidanceError::Request)?;

        Ok(Self {
            client,
            api_url: cfg.chat.api_url.clone(),
            api_key: cfg.chat.api_key.clone(),
            max_attempts: cfg.http.retry.max_attempts,
            initial_delay: Duration::from_millis(cfg.http.retry.initial_delay_ms),
            jitter_factor: cfg.http.retry.jitter_factor,
        })
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self.initial_delay * 2u32.saturating_pow(attempt.saturating_sub(1));
        let jitter = rand::thread_rng()
            .gen_range(1.0 - self.jitter_factor..=1.0 + self.jitter_factor);
        Duration::from_millis((base.as_millis() as f64 * jitter) as u64)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            let result = self
                .client
                .post(&self.api_url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(req)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let raw = response.text().await.map_err(GuidanceError::Request)?;
                        return serde_json::from_str(&raw)
                            .map_err(|_| GuidanceError::UnexpectedResponse { raw });
                    }

                    let detail = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "unknown error".to_string());

                    // 4xx will not improve on retry
                    if status.is_client_error() || attempts >= self.max_attempts {
                        return Err(GuidanceError::Upstream {
                            status: status.as_u16(),
                            detail,
                        });
                    }
                    tracing::warn!(
                        status = status.as_u16(),
                        attempt = attempts,
                        "Chat endpoint returned server error, retrying"
                    );
                }
                Err(e) => {
                    if attempts >= self.max_attempts {
                        return Err(GuidanceError::Request(e));
                    }
                    tracing::warn!(
                        error = %e,
                        attempt = attempts,
                        "Chat request failed, retrying"
                    );
                }
            }

            sleep(self.backoff_delay(attempts)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatMessage, Role};

    fn transport_with_key() -> HttpTransport {
        let mut cfg = Config::default();
        cfg.chat.api_key = "test-key".to_string();
        HttpTransport::new(&cfg).expect("build transport")
    }

    #[test]
    fn test_backoff_delay_grows_and_stays_jitter_bounded() {
        let tx = transport_with_key();
        let d1 = tx.backoff_delay(1);
        let d2 = tx.backoff_delay(2);
        // attempt 1: 250ms +/- 20%, attempt 2: 500ms +/- 20%
        assert!(d1 >= Duration::from_millis(200) && d1 <= Duration::from_millis(300));
        assert!(d2 >= Duration::from_millis(400) && d2 <= Duration::from_millis(600));
    }

    #[tokio::test]
    async fn test_chat_live_endpoint_when_key_present() {
        // Exercised only when a real key is available in the environment.
        let Ok(api_key) = std::env::var("GUIDANCE_API_KEY") else {
            return;
        };
        let mut cfg = Config::default();
        cfg.chat.api_key = api_key;
        let tx = HttpTransport::new(&cfg).expect("build transport");
        let req = ChatRequest {
            model: cfg.chat.chat_model.clone(),
            messages: vec![ChatMessage {
                role: Role::User,
                content: "What is the capital of France?".to_string(),
            }],
            max_tokens: 50,
            temperature: 0.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            stream: false,
        };
        let res = tx.chat(&req).await;
        assert!(res.is_ok());
    }
}
