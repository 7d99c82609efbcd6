//! Conversation persistence.
//!
//! A single logical table keyed by conversation id, written with upsert
//! semantics. MongoDB is used when reachable at startup; otherwise the whole
//! process runs on [`InMemoryConversationStore`].

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SupportConfig;
use crate::context::AirlineContext;
use crate::error::Result;
use crate::types::ChatMessage;

pub use memory::InMemoryConversationStore;
pub use mongo::MongoConversationStore;

/// Everything persisted for one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub conversation_id: String,
    pub context: AirlineContext,
    pub messages: Vec<ChatMessage>,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction for conversation records.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Short backend label for logs.
    fn backend(&self) -> &'static str;

    /// Insert or replace the record for `conversation_id`, stamping `updated_at`.
    async fn upsert(
        &self,
        conversation_id: &str,
        context: &AirlineContext,
        messages: &[ChatMessage],
    ) -> Result<()>;

    /// Load the record for `conversation_id`, if one was ever written.
    async fn load(&self, conversation_id: &str) -> Result<Option<ConversationRecord>>;
}

/// Which backend the process ended up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageStatus {
    Connected,
    Fallback { reason: String },
}

impl StorageStatus {
    /// One-time notice shown to the user at startup.
    pub fn notice(&self) -> String {
        match self {
            Self::Connected => "Connected to MongoDB!".to_string(),
            Self::Fallback { reason } => {
                format!("Failed to connect to MongoDB: {reason}. Using in-memory storage.")
            }
        }
    }
}

/// Connect to MongoDB, falling back to memory when it is unreachable.
pub async fn connect(config: &SupportConfig) -> (Arc<dyn ConversationStore>, StorageStatus) {
    match MongoConversationStore::connect(config).await {
        Ok(store) => {
            info!(
                database = %config.mongodb_database,
                collection = %config.mongodb_collection,
                "connected to MongoDB"
            );
            (Arc::new(store), StorageStatus::Connected)
        }
        Err(e) => {
            warn!(error = %e, "MongoDB unreachable, switching to in-memory storage");
            (
                Arc::new(InMemoryConversationStore::new()),
                StorageStatus::Fallback {
                    reason: e.to_string(),
                },
            )
        }
    }
}
