//! Process-wide collaborators, built once at startup.

use std::sync::Arc;

use tracing::info;

use crate::aviation::AviationClient;
use crate::config::SupportConfig;
use crate::error::Result;
use crate::provider::{create_provider, ModelProvider};
use crate::session::SupportSession;
use crate::storage::{self, ConversationStore, StorageStatus};
use crate::types::GenerationSettings;

/// Owns the data client, the store and the model provider. Sessions borrow it
/// for the duration of a turn.
pub struct SupportService {
    aviation: AviationClient,
    store: Arc<dyn ConversationStore>,
    storage_status: StorageStatus,
    provider: Box<dyn ModelProvider>,
    settings: GenerationSettings,
}

impl SupportService {
    /// Build every collaborator from configuration. Storage never fails here:
    /// an unreachable MongoDB degrades to memory and is reported through
    /// [`SupportService::storage_status`].
    pub async fn connect(config: &SupportConfig) -> Result<Self> {
        let aviation = AviationClient::from_config(config)?;
        let provider = create_provider(config)?;
        let (store, storage_status) = storage::connect(config).await;
        info!(
            provider = provider.provider_name(),
            model = provider.model_id(),
            storage = store.backend(),
            "support service ready"
        );
        Ok(Self::new(aviation, store, storage_status, provider))
    }

    pub fn new(
        aviation: AviationClient,
        store: Arc<dyn ConversationStore>,
        storage_status: StorageStatus,
        provider: Box<dyn ModelProvider>,
    ) -> Self {
        Self {
            aviation,
            store,
            storage_status,
            provider,
            settings: default_settings(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn aviation(&self) -> &AviationClient {
        &self.aviation
    }

    pub fn store(&self) -> &dyn ConversationStore {
        self.store.as_ref()
    }

    pub fn storage_status(&self) -> &StorageStatus {
        &self.storage_status
    }

    pub fn provider(&self) -> &dyn ModelProvider {
        self.provider.as_ref()
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn start_session(&self) -> SupportSession {
        SupportSession::new()
    }

    /// Resume a stored conversation, if one exists under `conversation_id`.
    pub async fn resume_session(&self, conversation_id: &str) -> Result<Option<SupportSession>> {
        Ok(self
            .store
            .load(conversation_id)
            .await?
            .map(SupportSession::from_record))
    }
}

fn default_settings() -> GenerationSettings {
    GenerationSettings::builder()
        .temperature(0.3)
        .max_tokens(1024)
        .build()
}
