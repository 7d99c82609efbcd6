//! Tool trait and the per-invocation context tools run against.

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::{AgentToolParameters, ToolDefinition};
use crate::aviation::AviationClient;
use crate::context::AirlineContext;
use crate::error::SupportError;
use crate::storage::ConversationStore;
use crate::types::ChatMessage;

/// Everything a tool may read or mutate during one invocation.
pub struct ToolContext<'a> {
    /// The conversation's shared context; tools overwrite fields in place.
    pub airline: &'a mut AirlineContext,
    pub aviation: &'a AviationClient,
    pub store: &'a dyn ConversationStore,
    pub conversation_id: &'a str,
    /// Transcript as of the start of the current turn, including the user's message.
    pub transcript: &'a [ChatMessage],
}

impl ToolContext<'_> {
    /// Write the current context and transcript to the store.
    pub async fn persist(&self) -> Result<(), SupportError> {
        self.store
            .upsert(self.conversation_id, &*self.airline, self.transcript)
            .await
    }
}

/// Core tool trait. Tools return customer-readable text; `Err` is reserved
/// for failures that are not a normal conversational outcome.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// JSON Schema parameters.
    fn parameters(&self) -> AgentToolParameters;

    /// Execute the tool with parsed arguments.
    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &mut ToolContext<'_>,
    ) -> Result<String, SupportError>;

    /// Definition advertised to the model.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().schema,
        }
    }
}
