//! Passenger name tool, owned by triage.

use async_trait::async_trait;
use tracing::info;

use super::{AgentToolParameters, Tool, ToolArguments, ToolContext};
use crate::error::SupportError;
use crate::validators::{title_case, InputKind};

/// Record the passenger's name in the context and persist it.
pub async fn set_passenger_name(ctx: &mut ToolContext<'_>, name: &str) -> Result<String, SupportError> {
    if let Err(guidance) = InputKind::PassengerName.check(name) {
        return Ok(guidance.to_string());
    }
    let name = title_case(name);
    if name.is_empty() {
        return Ok(InputKind::PassengerName.guidance().to_string());
    }

    info!(conversation_id = ctx.conversation_id, "passenger name set");
    ctx.airline.passenger_name = Some(name.clone());
    ctx.persist().await?;
    Ok(format!(
        "Your name has been set to {name}. How can I assist you further?"
    ))
}

pub struct SetPassengerNameTool;

#[async_trait]
impl Tool for SetPassengerNameTool {
    fn name(&self) -> &'static str {
        "set_passenger_name"
    }

    fn description(&self) -> &'static str {
        "Set the passenger's name in the context."
    }

    fn parameters(&self) -> AgentToolParameters {
        AgentToolParameters::object()
            .string("name", "The passenger's full name, e.g. John Smith", true)
            .build()
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &mut ToolContext<'_>,
    ) -> Result<String, SupportError> {
        set_passenger_name(ctx, args.get_str("name")?).await
    }
}
