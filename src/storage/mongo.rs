//! MongoDB-backed conversation store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::debug;

use super::{ConversationRecord, ConversationStore};
use crate::config::SupportConfig;
use crate::context::AirlineContext;
use crate::error::{Result, SupportError};
use crate::types::ChatMessage;

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

pub struct MongoConversationStore {
    collection: Collection<Document>,
}

impl MongoConversationStore {
    /// Connect and ping; any failure here means the caller should fall back.
    pub async fn connect(config: &SupportConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_uri).await?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.app_name = Some("airline-support".to_string());

        let client = Client::with_options(options)?;
        client.database("admin").run_command(doc! { "ping": 1 }).await?;

        let collection = client
            .database(&config.mongodb_database)
            .collection::<Document>(&config.mongodb_collection);
        Ok(Self { collection })
    }
}

#[async_trait]
impl ConversationStore for MongoConversationStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn upsert(
        &self,
        conversation_id: &str,
        context: &AirlineContext,
        messages: &[ChatMessage],
    ) -> Result<()> {
        let update = update_document(context, messages, Utc::now())?;
        let result = self
            .collection
            .update_one(doc! { "conversation_id": conversation_id }, update)
            .upsert(true)
            .await?;
        debug!(
            conversation_id,
            matched = result.matched_count,
            upserted = result.upserted_id.is_some(),
            "conversation upserted"
        );
        Ok(())
    }

    async fn load(&self, conversation_id: &str) -> Result<Option<ConversationRecord>> {
        let found = self
            .collection
            .find_one(doc! { "conversation_id": conversation_id })
            .await?;
        found.map(record_from_document).transpose()
    }
}

/// `$set` update carrying the latest context, transcript and timestamp.
fn update_document(
    context: &AirlineContext,
    messages: &[ChatMessage],
    updated_at: DateTime<Utc>,
) -> Result<Document> {
    Ok(doc! {
        "$set": {
            "context": bson::to_bson(context)?,
            "messages": bson::to_bson(messages)?,
            "updated_at": bson::DateTime::from_millis(updated_at.timestamp_millis()),
        }
    })
}

fn record_from_document(document: Document) -> Result<ConversationRecord> {
    let conversation_id = document
        .get_str("conversation_id")
        .map_err(|e| SupportError::Document(e.to_string()))?
        .to_string();

    let context = match document.get("context") {
        Some(value) => bson::from_bson(value.clone())?,
        None => AirlineContext::default(),
    };
    let messages = match document.get("messages") {
        Some(value) => bson::from_bson(value.clone())?,
        None => Vec::new(),
    };
    let updated_at = document
        .get_datetime("updated_at")
        .ok()
        .and_then(|dt| DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()))
        .unwrap_or_else(Utc::now);

    Ok(ConversationRecord {
        conversation_id,
        context,
        messages,
        updated_at,
    })
}
