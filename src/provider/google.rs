//! Google Gemini API provider.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::SupportConfig;
use crate::error::{Result, SupportError};
use crate::types::*;

use super::http::{build_client, status_to_error, PROVIDER_TIMEOUT};
use super::{ModelProvider, ProviderRequest, ProviderResponse};

pub struct GoogleProvider {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GoogleProvider {
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            http: build_client(PROVIDER_TIMEOUT)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &SupportConfig) -> Result<Self> {
        Self::new(
            config.model.clone(),
            config.gemini_api_key.clone(),
            config.gemini_base_url.clone(),
        )
    }

    fn build_request_body(&self, request: &ProviderRequest) -> Value {
        let mut system_parts = Vec::new();
        let mut contents: Vec<Value> = Vec::new();

        for msg in &request.messages {
            match msg.role {
                Role::System => system_parts.push(json!({"text": msg.text_content()})),
                Role::User => contents.push(json!({
                    "role": "user",
                    "parts": [{"text": msg.text_content()}],
                })),
                Role::Assistant => contents.push(json!({
                    "role": "model",
                    "parts": build_model_parts(&msg.content),
                })),
                Role::Tool => {
                    let responses: Vec<Value> = msg
                        .content
                        .iter()
                        .filter_map(|part| match part {
                            ContentPart::ToolResult(tr) => Some(json!({
                                "functionResponse": {
                                    "name": tr.name,
                                    "response": tr.result,
                                }
                            })),
                            _ => None,
                        })
                        .collect();
                    push_function_responses(&mut contents, responses);
                }
            }
        }

        let mut obj = serde_json::Map::new();
        obj.insert("contents".into(), Value::Array(contents));

        if !system_parts.is_empty() {
            obj.insert("systemInstruction".into(), json!({ "parts": system_parts }));
        }

        let mut gen_config = serde_json::Map::new();
        if let Some(max) = request.settings.max_tokens {
            gen_config.insert("maxOutputTokens".into(), max.into());
        }
        if let Some(temp) = request.settings.temperature {
            gen_config.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = request.settings.top_p {
            gen_config.insert("topP".into(), top_p.into());
        }
        if !gen_config.is_empty() {
            obj.insert("generationConfig".into(), Value::Object(gen_config));
        }

        if !request.tools.is_empty() {
            let fn_decls: Vec<Value> = request
                .tools
                .iter()
                .map(|t| {
                    let mut decl = json!({
                        "name": t.name,
                        "description": t.description,
                    });
                    // Gemini rejects object schemas with no properties
                    if t.parameters["properties"]
                        .as_object()
                        .is_some_and(|props| !props.is_empty())
                    {
                        decl["parameters"] = t.parameters.clone();
                    }
                    decl
                })
                .collect();
            obj.insert("tools".into(), json!([{ "functionDeclarations": fn_decls }]));
        }

        Value::Object(obj)
    }
}

fn build_model_parts(content: &[ContentPart]) -> Vec<Value> {
    content
        .iter()
        .filter_map(|part| match part {
            ContentPart::Text { text } if !text.is_empty() => Some(json!({ "text": text })),
            ContentPart::ToolCall(call) => Some(json!({
                "functionCall": { "name": call.name, "args": call.arguments }
            })),
            _ => None,
        })
        .collect()
}

/// Gemini wants all responses to one model turn in a single user content.
fn push_function_responses(contents: &mut Vec<Value>, responses: Vec<Value>) {
    if responses.is_empty() {
        return;
    }
    let extends_previous = contents.last().is_some_and(|last| {
        last["role"] == "user"
            && last["parts"]
                .as_array()
                .is_some_and(|parts| parts.iter().all(|p| p.get("functionResponse").is_some()))
    });
    if extends_previous {
        if let Some(parts) = contents.last_mut().and_then(|last| last["parts"].as_array_mut()) {
            parts.extend(responses);
            return;
        }
    }
    contents.push(json!({ "role": "user", "parts": responses }));
}

#[async_trait]
impl ModelProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        let body = self.build_request_body(request);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        debug!(model = %self.model, tools = request.tools.len(), "Google generate_text");

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: GeminiResponse = resp.json().await?;

        let candidate = data.candidates.into_iter().next().ok_or_else(|| SupportError::Provider {
            provider: "google".into(),
            message: "No candidates in Gemini response".into(),
        })?;

        let mut text = String::new();
        let mut tool_calls = Vec::new();

        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            if let Some(t) = part.text {
                text.push_str(&t);
            }
            if let Some(fc) = part.function_call {
                tool_calls.push(AgentToolCall {
                    id: uuid::Uuid::new_v4().to_string(),
                    name: fc.name,
                    arguments: fc.args.unwrap_or_else(|| json!({})),
                });
            }
        }

        let finish_reason = match candidate.finish_reason.as_deref() {
            _ if !tool_calls.is_empty() => Some(FinishReason::ToolCalls),
            Some("STOP") => Some(FinishReason::Stop),
            Some("MAX_TOKENS") => Some(FinishReason::Length),
            Some("SAFETY") | Some("RECITATION") => Some(FinishReason::ContentFilter),
            Some(_) => Some(FinishReason::Error),
            None => None,
        };

        let usage = data
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(ProviderResponse {
            text,
            usage,
            tool_calls,
            finish_reason,
        })
    }
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Deserialize)]
struct GeminiFunctionCall {
    name: String,
    args: Option<Value>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GeminiUsage {
    prompt_token_count: u32,
    candidates_token_count: u32,
    total_token_count: u32,
}
