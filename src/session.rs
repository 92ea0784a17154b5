use std::sync::Arc;
use uuid::Uuid;

use crate::chat::ChatClient;
use crate::config::ChatConfig;
use crate::error::Result;
use crate::models::{
    ChatMessage, Language, Message, Preferences, Religion, Role, UserProfile,
};
use crate::translate::Translator;

/// Append-only ordered log of user/assistant turns for one session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    // Rollback for a failed turn only; not part of the public surface so the
    // transcript stays append-only to everyone else.
    fn pop(&mut self) -> Option<Message> {
        self.messages.pop()
    }
}

/// Per-session state. One instance per session, passed explicitly into every
/// operation and dropped when the session ends. No globals.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    pub preferences: Preferences,
    pub profile: UserProfile,
    pub transcript: Transcript,
}

impl SessionContext {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            id: Uuid::new_v4(),
            preferences,
            profile: UserProfile::default(),
            transcript: Transcript::default(),
        }
    }

    /// Explicit profile save; the only mutation path for the username.
    pub fn save_username(&mut self, username: impl Into<String>) {
        self.profile.username = username.into();
    }
}

/// Outcome of a user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Input was empty or whitespace-only; nothing happened.
    Ignored,
    /// A user and an assistant message were appended.
    Replied,
}

/// Drives the chat/translate pipeline for conversational turns and one-shot
/// prayers.
pub struct Orchestrator {
    chat: ChatClient,
    translator: Arc<dyn Translator>,
    chat_model: String,
    chat_max_tokens: u32,
    prayer_model: String,
    prayer_max_tokens: u32,
}

impl Orchestrator {
    pub fn new(chat: ChatClient, translator: Arc<dyn Translator>, cfg: &ChatConfig) -> Self {
        Self {
            chat,
            translator,
            chat_model: cfg.chat_model.clone(),
            chat_max_tokens: cfg.max_tokens,
            prayer_model: cfg.prayer_model.clone(),
            prayer_max_tokens: cfg.prayer_max_tokens,
        }
    }

    /// Handle one user turn against the session transcript.
    ///
    /// Appends the user message, asks the chat endpoint with a fresh
    /// `[system, user]` pair, translates when the session language is not
    /// English, and appends exactly one assistant message. On failure the
    /// pending user message is rolled back so no partial turn persists, and
    /// the error propagates to the caller instead of being displayed as
    /// assistant content.
    pub async fn handle_user_turn(
        &self,
        session: &mut SessionContext,
        user_text: &str,
    ) -> Result<TurnOutcome> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Ok(TurnOutcome::Ignored);
        }

        let religion = session.preferences.religion;
        let language = session.preferences.language;

        session
            .transcript
            .push(Message::new(Role::User, user_text));

        let messages = vec![
            ChatMessage {
                role: Role::System,
                content: chat_system_prompt(religion, language),
            },
            ChatMessage {
                role: Role::User,
                content: user_text.to_string(),
            },
        ];

        tracing::info!(
            session = %session.id,
            religion = religion.as_str(),
            language = language.as_str(),
            "Handling user turn"
        );

        let reply = match self
            .chat
            .complete(&self.chat_model, messages, self.chat_max_tokens)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                session.transcript.pop();
                return Err(e);
            }
        };

        let reply = if language != Language::English {
            self.translator.translate(&reply, language).await
        } else {
            reply
        };

        session
            .transcript
            .push(Message::new(Role::Assistant, reply));
        Ok(TurnOutcome::Replied)
    }

    /// One-shot Prayer of the Day. Stateless: nothing is appended to any
    /// transcript.
    pub async fn prayer_of_the_day(
        &self,
        religion: Religion,
        language: Language,
    ) -> Result<String> {
        let messages = vec![
            ChatMessage {
                role: Role::System,
                content: prayer_system_prompt(religion, language),
            },
            ChatMessage {
                role: Role::User,
                content: "Please provide the Prayer of the Day with a relevant quotation."
                    .to_string(),
            },
        ];

        let prayer = self
            .chat
            .complete(&self.prayer_model, messages, self.prayer_max_tokens)
            .await?;

        if language != Language::English {
            Ok(self.translator.translate(&prayer, language).await)
        } else {
            Ok(prayer)
        }
    }
}

fn chat_system_prompt(religion: Religion, language: Language) -> String {
    format!(
        "You are a knowledgeable and respectful assistant for {religion} followers. \
         Answer the following question based on {religion} teachings in {language}."
    )
}

fn prayer_system_prompt(religion: Religion, language: Language) -> String {
    format!("You are a respectful assistant providing detailed prayers for {religion} in {language}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuidanceError;
    use crate::models::{ChatRequest, ChatResponse, Choice, Theme};
    use crate::transport::Transport;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock Transport recording every request it sees
    struct MockTransport {
        responses: Mutex<Vec<Result<ChatResponse>>>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl MockTransport {
        fn new(responses: Vec<Result<ChatResponse>>) -> Self {
            MockTransport {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn reply(content: &str) -> Result<ChatResponse> {
            Ok(ChatResponse {
                choices: vec![Choice {
                    message: ChatMessage {
                        role: Role::Assistant,
                        content: content.to_string(),
                    },
                }],
            })
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
            self.seen
                .lock()
                .expect("Mock transport mutex should not be poisoned")
                .push(req.clone());
            let mut responses = self
                .responses
                .lock()
                .expect("Mock transport mutex should not be poisoned");
            responses
                .pop()
                .unwrap_or_else(|| Err(GuidanceError::Internal("No more mock responses".to_string())))
        }
    }

    // Mock Translator counting invocations
    struct MockTranslator {
        calls: AtomicUsize,
        prefix: &'static str,
    }

    impl MockTranslator {
        fn new(prefix: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                prefix,
            }
        }
    }

    #[async_trait]
    impl Translator for MockTranslator {
        async fn translate(&self, text: &str, _target: Language) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            format!("{}{}", self.prefix, text)
        }
    }

    fn orchestrator(
        transport: Arc<MockTransport>,
        translator: Arc<MockTranslator>,
    ) -> Orchestrator {
        let cfg = ChatConfig::default();
        let chat = ChatClient::new(transport, &cfg);
        Orchestrator::new(chat, translator, &cfg)
    }

    fn session(religion: Religion, language: Language) -> SessionContext {
        SessionContext::new(Preferences {
            religion,
            language,
            theme: Theme::Light,
        })
    }

    #[tokio::test]
    async fn test_empty_input_is_a_noop() {
        let transport = Arc::new(MockTransport::new(vec![]));
        let translator = Arc::new(MockTranslator::new(""));
        let orch = orchestrator(Arc::clone(&transport), Arc::clone(&translator));
        let mut sess = session(Religion::Christianity, Language::English);

        for input in ["", "   ", "\n\t"] {
            let outcome = orch
                .handle_user_turn(&mut sess, input)
                .await
                .expect("noop turn");
            assert_eq!(outcome, TurnOutcome::Ignored);
        }
        assert!(sess.transcript.is_empty());
        assert!(transport.seen.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn test_turn_appends_user_then_assistant() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::reply(
            "Ramadan is the ninth month of the Islamic calendar.",
        )]));
        let translator = Arc::new(MockTranslator::new(""));
        let orch = orchestrator(Arc::clone(&transport), Arc::clone(&translator));
        let mut sess = session(Religion::Islam, Language::English);

        let outcome = orch
            .handle_user_turn(&mut sess, "What is Ramadan?")
            .await
            .expect("turn should succeed");

        assert_eq!(outcome, TurnOutcome::Replied);
        assert_eq!(sess.transcript.len(), 2);
        let messages = sess.transcript.messages();
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "What is Ramadan?");
        assert_eq!(messages[1].role, Role::Assistant);
        assert!(!messages[1].content.is_empty());
        // English session: translation never invoked
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_system_prompt_embeds_religion_and_language() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::reply("ok")]));
        let translator = Arc::new(MockTranslator::new(""));
        let orch = orchestrator(Arc::clone(&transport), translator);
        let mut sess = session(Religion::Hinduism, Language::Hindi);

        orch.handle_user_turn(&mut sess, "What is Diwali?")
            .await
            .expect("turn should succeed");

        let seen = transport.seen.lock().expect("lock");
        let req = &seen[0];
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, Role::System);
        assert!(req.messages[0].content.contains("Hinduism"));
        assert!(req.messages[0].content.contains("Hindi"));
        assert_eq!(req.messages[1].role, Role::User);
    }

    #[tokio::test]
    async fn test_non_english_reply_is_translated() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::reply(
            "Peace be with you.",
        )]));
        let translator = Arc::new(MockTranslator::new("[es] "));
        let orch = orchestrator(transport, Arc::clone(&translator));
        let mut sess = session(Religion::Christianity, Language::Spanish);

        orch.handle_user_turn(&mut sess, "Bless me")
            .await
            .expect("turn should succeed");

        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            sess.transcript.last().expect("assistant message").content,
            "[es] Peace be with you."
        );
    }

    #[tokio::test]
    async fn test_failed_turn_rolls_back_user_message() {
        let transport = Arc::new(MockTransport::new(vec![Err(GuidanceError::Upstream {
            status: 500,
            detail: "boom".to_string(),
        })]));
        let translator = Arc::new(MockTranslator::new(""));
        let orch = orchestrator(transport, translator);
        let mut sess = session(Religion::Judaism, Language::English);

        let err = orch
            .handle_user_turn(&mut sess, "hello")
            .await
            .expect_err("turn should fail");
        assert!(matches!(err, GuidanceError::Upstream { status: 500, .. }));
        assert!(sess.transcript.is_empty());
    }

    #[tokio::test]
    async fn test_prayer_uses_prayer_model_and_budget() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::reply(
            "May peace find you today.",
        )]));
        let translator = Arc::new(MockTranslator::new(""));
        let orch = orchestrator(Arc::clone(&transport), translator);

        let prayer = orch
            .prayer_of_the_day(Religion::Buddhism, Language::English)
            .await
            .expect("prayer should succeed");
        assert_eq!(prayer, "May peace find you today.");

        let seen = transport.seen.lock().expect("lock");
        let req = &seen[0];
        assert_eq!(req.model, "gpt-4o");
        assert_eq!(req.max_tokens, 300);
        assert!(req.messages[0].content.contains("Buddhism"));
        assert_eq!(
            req.messages[1].content,
            "Please provide the Prayer of the Day with a relevant quotation."
        );
    }

    #[tokio::test]
    async fn test_prayer_is_translated_for_non_english() {
        let transport = Arc::new(MockTransport::new(vec![MockTransport::reply("A prayer.")]));
        let translator = Arc::new(MockTranslator::new("[fr] "));
        let orch = orchestrator(transport, Arc::clone(&translator));

        let prayer = orch
            .prayer_of_the_day(Religion::Bahai, Language::French)
            .await
            .expect("prayer should succeed");
        assert_eq!(prayer, "[fr] A prayer.");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_session_defaults_and_profile_save() {
        let mut sess = SessionContext::new(Preferences::default());
        assert_eq!(sess.profile.username, "Guest");
        assert!(sess.transcript.is_empty());
        sess.save_username("Sam");
        assert_eq!(sess.profile.username, "Sam");
    }
}
