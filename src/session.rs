//! One conversation and its per-turn commit logic.
//!
//! A turn works on copies of the context, transcript and history. They replace
//! the session's state only once the turn, including the final write to the
//! store, has succeeded. Writes tools made to the store along the way are not
//! undone.

use tracing::{error, info};

use crate::context::AirlineContext;
use crate::error::Result;
use crate::handlers::HandlerId;
use crate::runtime::run_turn;
use crate::service::SupportService;
use crate::storage::ConversationRecord;
use crate::tools::ToolContext;
use crate::types::{ChatMessage, ChatRole, ModelMessage};

pub const WELCOME_MESSAGE: &str = "\
Hello! I'm your Airline Customer Service Assistant. I can help with:
- Checking flight status (e.g., 'Check AA123 status')
- Updating seat assignments (e.g., 'Update seat for ABC123 to 12A')
- Answering FAQs (e.g., 'What's the baggage policy?')
- Airport info (e.g., 'Tell me about SFO')
- Airline info (e.g., 'Tell me about AA')
- Setting your name (e.g., 'My name is John Smith')
What would you like to do?";

/// Customer-facing text for a failed turn.
pub fn error_reply(error: &impl std::fmt::Display) -> String {
    format!("Oops, something went wrong: {error}. Please try again later.")
}

#[derive(Debug, Clone)]
pub struct SupportSession {
    id: String,
    context: AirlineContext,
    transcript: Vec<ChatMessage>,
    history: Vec<ModelMessage>,
    active: HandlerId,
}

impl Default for SupportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SupportSession {
    /// Fresh conversation with a new id, starting at triage.
    pub fn new() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(16);
        Self {
            id,
            context: AirlineContext::default(),
            transcript: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
            history: Vec::new(),
            active: HandlerId::Triage,
        }
    }

    /// Rebuild a session from its stored record. Tool calls are not persisted,
    /// so the model history is the plain transcript and routing restarts at
    /// triage.
    pub fn from_record(record: ConversationRecord) -> Self {
        let history = record
            .messages
            .iter()
            .filter(|m| !(m.role == ChatRole::Assistant && m.content == WELCOME_MESSAGE))
            .map(ChatMessage::to_model_message)
            .collect();
        Self {
            id: record.conversation_id,
            context: record.context,
            transcript: record.messages,
            history,
            active: HandlerId::Triage,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn context(&self) -> &AirlineContext {
        &self.context
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn history(&self) -> &[ModelMessage] {
        &self.history
    }

    pub fn active(&self) -> HandlerId {
        self.active
    }

    /// Run one turn and return the new assistant replies. On error the
    /// session is left exactly as it was before the call.
    pub async fn send(&mut self, service: &SupportService, text: &str) -> Result<Vec<String>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut context = self.context.clone();
        let mut transcript = self.transcript.clone();
        transcript.push(ChatMessage::user(text));
        let mut history = self.history.clone();
        history.push(ModelMessage::user(text));

        let outcome = {
            let mut ctx = ToolContext {
                airline: &mut context,
                aviation: service.aviation(),
                store: service.store(),
                conversation_id: &self.id,
                transcript: &transcript,
            };
            run_turn(
                service.provider(),
                service.settings(),
                self.active,
                history,
                &mut ctx,
            )
            .await?
        };

        transcript.extend(outcome.replies.iter().map(ChatMessage::assistant));
        service.store().upsert(&self.id, &context, &transcript).await?;

        info!(
            conversation_id = %self.id,
            handler = %outcome.active,
            replies = outcome.replies.len(),
            total_tokens = outcome.usage.total_tokens,
            "turn complete"
        );
        self.context = context;
        self.transcript = transcript;
        self.history = outcome.history;
        self.active = outcome.active;
        Ok(outcome.replies)
    }

    /// Like [`send`](Self::send), but a failure becomes a single error reply.
    /// The error reply is shown, not recorded.
    pub async fn respond(&mut self, service: &SupportService, text: &str) -> Vec<String> {
        match self.send(service, text).await {
            Ok(replies) => replies,
            Err(e) => {
                error!(conversation_id = %self.id, error = %e, "Error processing request");
                vec![error_reply(&e)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn new_session_has_short_hex_id_and_welcome() {
        let session = SupportSession::new();
        assert_eq!(session.id().len(), 16);
        assert!(session.id().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(session.transcript(), &[ChatMessage::assistant(WELCOME_MESSAGE)]);
        assert!(session.history().is_empty());
        assert_eq!(session.active(), HandlerId::Triage);
    }

    #[test]
    fn ids_are_distinct() {
        assert_ne!(SupportSession::new().id(), SupportSession::new().id());
    }

    #[test]
    fn resume_rebuilds_history_without_welcome() {
        let record = ConversationRecord {
            conversation_id: "abcdef0123456789".into(),
            context: AirlineContext {
                seat_number: Some("12A".into()),
                ..Default::default()
            },
            messages: vec![
                ChatMessage::assistant(WELCOME_MESSAGE),
                ChatMessage::user("Update seat for ABC123 to 12A"),
                ChatMessage::assistant("Done."),
            ],
            updated_at: Utc::now(),
        };

        let session = SupportSession::from_record(record);

        assert_eq!(session.id(), "abcdef0123456789");
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].text_content(), "Update seat for ABC123 to 12A");
        assert_eq!(session.context().seat_number.as_deref(), Some("12A"));
    }

    #[test]
    fn error_reply_wraps_cause() {
        assert_eq!(
            error_reply(&"model unavailable"),
            "Oops, something went wrong: model unavailable. Please try again later."
        );
    }
}
