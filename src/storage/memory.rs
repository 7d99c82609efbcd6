//! In-memory conversation store, used when MongoDB is unreachable.
//!
//! Records live for the life of the process and are never evicted.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ConversationRecord, ConversationStore};
use crate::context::AirlineContext;
use crate::error::Result;
use crate::types::ChatMessage;

#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    records: RwLock<HashMap<String, ConversationRecord>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn upsert(
        &self,
        conversation_id: &str,
        context: &AirlineContext,
        messages: &[ChatMessage],
    ) -> Result<()> {
        let record = ConversationRecord {
            conversation_id: conversation_id.to_string(),
            context: context.clone(),
            messages: messages.to_vec(),
            updated_at: Utc::now(),
        };
        self.records
            .write()
            .await
            .insert(conversation_id.to_string(), record);
        Ok(())
    }

    async fn load(&self, conversation_id: &str) -> Result<Option<ConversationRecord>> {
        Ok(self.records.read().await.get(conversation_id).cloned())
    }
}
