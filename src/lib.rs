pub mod chat;
pub mod config;
pub mod content;
pub mod error;
pub mod fetchers;
pub mod models;
pub mod session;
pub mod translate;
pub mod transport;

use std::sync::Arc;

use crate::chat::ChatClient;
use crate::config::Config;
use crate::error::Result;
use crate::fetchers::{ContentFetcher, Fetched};
use crate::models::{Language, Religion};
use crate::session::{Orchestrator, SessionContext, TurnOutcome};
use crate::translate::{LibreTranslator, Translator};
use crate::transport::{HttpTransport, Transport};

/// Facade wiring the chat transport, translator, orchestrator and fetchers
/// from one [`Config`]. The front end holds one of these plus a
/// [`SessionContext`] per session.
pub struct GuidanceService {
    orchestrator: Orchestrator,
    fetcher: ContentFetcher,
}

impl GuidanceService {
    pub fn new(cfg: &Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(cfg)?) as Arc<dyn Transport>;
        let translator = Arc::new(LibreTranslator::new(cfg)?) as Arc<dyn Translator>;

        let chat = ChatClient::new(transport, &cfg.chat);
        let orchestrator = Orchestrator::new(chat, translator, &cfg.chat);
        let fetcher = ContentFetcher::new(cfg)?;

        Ok(Self {
            orchestrator,
            fetcher,
        })
    }

    pub async fn handle_user_turn(
        &self,
        session: &mut SessionContext,
        user_text: &str,
    ) -> Result<TurnOutcome> {
        self.orchestrator.handle_user_turn(session, user_text).await
    }

    pub async fn prayer_of_the_day(
        &self,
        religion: Religion,
        language: Language,
    ) -> Result<String> {
        self.orchestrator.prayer_of_the_day(religion, language).await
    }

    pub async fn daily_verse(&self, religion: Religion) -> Fetched<String> {
        self.fetcher.daily_verse(religion).await
    }

    pub async fn news(&self, religion: Religion) -> Fetched<Vec<String>> {
        self.fetcher.news(religion).await
    }

    pub async fn background_music(&self, religion: Religion) -> Fetched<String> {
        self.fetcher.background_music(religion).await
    }
}
