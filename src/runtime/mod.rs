//! One customer turn: model call, tool calls, handoffs, repeat.
//!
//! Tool calls are executed one at a time in the order the model listed them.
//! A handoff switches the active handler immediately; any calls the model
//! listed after it were meant for the previous handler and are answered with
//! an error result instead of being run.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::handlers::{on_handoff, HandlerId};
use crate::provider::{ModelProvider, ProviderRequest};
use crate::tools::{validate_arguments, ToolArguments, ToolContext, ToolId};
use crate::types::*;

/// Maximum model calls per customer turn.
pub const MAX_TOOL_ITERATIONS: usize = 10;

/// Reply used when the model ends a turn without saying anything.
pub const EMPTY_REPLY: &str =
    "I'm sorry, I couldn't complete that request. Could you rephrase it? For example, say 'Check AA123 status' or 'Update seat to 12A'.";

/// What a turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Customer-visible replies, in order.
    pub replies: Vec<String>,
    /// Provider-facing history including this turn's calls and results.
    pub history: Vec<ModelMessage>,
    /// Handler that owns the conversation after the turn.
    pub active: HandlerId,
    pub usage: Usage,
}

enum Dispatch {
    Done(AgentToolResult),
    Handoff(HandlerId, AgentToolResult),
}

/// Run one turn. `history` must already end with the customer's message.
///
/// Errors are returned only for failures that should abandon the turn
/// (provider failures, storage failures inside tools); everything else is fed
/// back to the model as an error result.
pub async fn run_turn(
    provider: &dyn ModelProvider,
    settings: &GenerationSettings,
    start: HandlerId,
    mut history: Vec<ModelMessage>,
    ctx: &mut ToolContext<'_>,
) -> Result<TurnOutcome> {
    let mut active = start;
    let mut replies = Vec::new();
    let mut usage = Usage::default();

    for iteration in 0..MAX_TOOL_ITERATIONS {
        let spec = active.spec();
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ModelMessage::system(spec.system_prompt(&*ctx.airline)));
        messages.extend(history.iter().cloned());

        let request = ProviderRequest {
            messages,
            settings: settings.clone(),
            tools: spec.tool_definitions(),
        };

        debug!(iteration, handler = %active, "run_turn: calling provider");
        let response = provider.generate_text(&request).await?;
        usage.merge(&response.usage);

        let text = response.text.trim();
        if !text.is_empty() {
            replies.push(text.to_string());
        }

        if response.tool_calls.is_empty() {
            history.push(ModelMessage::assistant(response.text));
            if replies.is_empty() {
                replies.push(EMPTY_REPLY.to_string());
            }
            return Ok(TurnOutcome {
                replies,
                history,
                active,
                usage,
            });
        }

        history.push(ModelMessage::assistant_with_calls(
            &response.text,
            &response.tool_calls,
        ));

        let mut handed_off_to = None;
        for call in &response.tool_calls {
            let result = match handed_off_to {
                Some(target) => AgentToolResult::error(
                    call,
                    format!("Not executed: the conversation was transferred to the {target}."),
                ),
                None => match dispatch(active, call, ctx).await? {
                    Dispatch::Done(result) => result,
                    Dispatch::Handoff(target, result) => {
                        info!(
                            conversation_id = ctx.conversation_id,
                            from = %active,
                            to = %target,
                            "handoff"
                        );
                        on_handoff(target, ctx).await?;
                        active = target;
                        handed_off_to = Some(target);
                        result
                    }
                },
            };
            history.push(ModelMessage::tool_result(result));
        }
    }

    warn!(
        conversation_id = ctx.conversation_id,
        max = MAX_TOOL_ITERATIONS,
        "run_turn: tool iteration limit reached"
    );
    if replies.is_empty() {
        replies.push(EMPTY_REPLY.to_string());
    }
    Ok(TurnOutcome {
        replies,
        history,
        active,
        usage,
    })
}

async fn dispatch(
    active: HandlerId,
    call: &AgentToolCall,
    ctx: &mut ToolContext<'_>,
) -> Result<Dispatch> {
    let spec = active.spec();

    if let Some(target) = HandlerId::from_transfer_tool(&call.name) {
        if !spec.allows_handoff(target) {
            warn!(from = %active, to = %target, "handoff not allowed");
            return Ok(Dispatch::Done(AgentToolResult::error(
                call,
                format!("The {active} cannot transfer to the {target}."),
            )));
        }
        let result = AgentToolResult::ok(call, format!("Transferred to the {target}."));
        return Ok(Dispatch::Handoff(target, result));
    }

    let Some(id) = ToolId::from_name(&call.name).filter(|id| spec.allows_tool(*id)) else {
        warn!(tool = %call.name, handler = %active, "Tool not found");
        return Ok(Dispatch::Done(AgentToolResult::error(
            call,
            format!("Tool '{}' not found", call.name),
        )));
    };

    let tool = id.tool();
    let args = ToolArguments::new(call.arguments.clone());
    if let Err(reason) = validate_arguments(args.raw(), &tool.parameters().schema) {
        warn!(tool = %call.name, %reason, "Tool arguments rejected");
        return Ok(Dispatch::Done(AgentToolResult::error(call, reason)));
    }

    debug!(tool = %call.name, handler = %active, "executing tool");
    match tool.execute(&args, ctx).await {
        Ok(output) => Ok(Dispatch::Done(AgentToolResult::ok(call, output))),
        Err(e) if e.is_tool_recoverable() => {
            warn!(tool = %call.name, error = %e, "Tool execution failed");
            Ok(Dispatch::Done(AgentToolResult::error(call, e.to_string())))
        }
        Err(e) => Err(e),
    }
}
