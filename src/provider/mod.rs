//! Model provider trait and the Gemini implementation.
//!
//! The provider is the router's only source of conversational judgement: it
//! sees the active handler's instructions, the history and the tool
//! definitions, and answers with text and/or tool calls.

pub mod google;
pub mod http;

use async_trait::async_trait;

use crate::config::SupportConfig;
use crate::error::Result;
use crate::tools::ToolDefinition;
use crate::types::{AgentToolCall, FinishReason, GenerationSettings, ModelMessage, Usage};

pub use google::GoogleProvider;

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Vec<ToolDefinition>,
}

/// Response from a provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "google").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate one response (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse>;
}

/// Create the configured provider.
pub fn create_provider(config: &SupportConfig) -> Result<Box<dyn ModelProvider>> {
    Ok(Box::new(GoogleProvider::from_config(config)?))
}
