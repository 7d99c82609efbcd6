//! Shared test helpers and mock provider.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use airline_support::aviation::AviationClient;
use airline_support::context::AirlineContext;
use airline_support::error::{Result, SupportError};
use airline_support::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use airline_support::service::SupportService;
use airline_support::storage::{
    ConversationRecord, ConversationStore, InMemoryConversationStore, StorageStatus,
};
use airline_support::types::*;

#[derive(Default)]
struct MockState {
    responses: VecDeque<std::result::Result<ProviderResponse, String>>,
    requests: Vec<ProviderRequest>,
    next_call: usize,
}

/// A provider that returns queued responses and records every request.
/// Clones share the same queue, so a test can keep a handle after moving one
/// into a service.
#[derive(Clone, Default)]
pub struct MockProvider {
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text response.
    pub fn queue_response(&self, text: &str) {
        self.state.lock().unwrap().responses.push_back(Ok(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
        }));
    }

    /// Queue a response carrying one tool call.
    pub fn queue_tool_call(&self, name: &str, args: Value) {
        self.queue_tool_calls(&[(name, args)]);
    }

    /// Queue a response carrying several tool calls, in order.
    pub fn queue_tool_calls(&self, calls: &[(&str, Value)]) {
        let mut state = self.state.lock().unwrap();
        let tool_calls = calls
            .iter()
            .map(|(name, args)| {
                state.next_call += 1;
                AgentToolCall {
                    id: format!("call-{}", state.next_call),
                    name: name.to_string(),
                    arguments: args.clone(),
                }
            })
            .collect();
        state.responses.push_back(Ok(ProviderResponse {
            text: String::new(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls,
            finish_reason: Some(FinishReason::ToolCalls),
        }));
    }

    /// Queue a provider failure.
    pub fn queue_failure(&self, message: &str) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn remaining(&self) -> usize {
        self.state.lock().unwrap().responses.len()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        match state.responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(SupportError::Provider {
                provider: "mock".into(),
                message,
            }),
            None => Ok(ProviderResponse {
                text: "Mock response".to_string(),
                finish_reason: Some(FinishReason::Stop),
                ..Default::default()
            }),
        }
    }
}

/// A store whose writes always fail.
pub struct FailingStore;

#[async_trait]
impl ConversationStore for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn upsert(&self, _: &str, _: &AirlineContext, _: &[ChatMessage]) -> Result<()> {
        Err(SupportError::Document("write refused".into()))
    }

    async fn load(&self, _: &str) -> Result<Option<ConversationRecord>> {
        Ok(None)
    }
}

/// Mock provider, in-memory store and a wiremock aviationstack, wired into a service.
pub struct Harness {
    pub provider: MockProvider,
    pub store: Arc<InMemoryConversationStore>,
    pub server: MockServer,
    pub service: SupportService,
}

impl Harness {
    pub async fn start() -> Self {
        Self::start_with_timeout(Duration::from_secs(5)).await
    }

    pub async fn start_with_timeout(timeout: Duration) -> Self {
        let server = MockServer::start().await;
        let provider = MockProvider::new();
        let store = Arc::new(InMemoryConversationStore::new());
        let service = SupportService::new(
            aviation(&server, timeout),
            store.clone(),
            StorageStatus::Fallback {
                reason: "test".into(),
            },
            Box::new(provider.clone()),
        );
        Self {
            provider,
            store,
            server,
            service,
        }
    }
}

pub fn aviation(server: &MockServer, timeout: Duration) -> AviationClient {
    AviationClient::new(format!("{}/v1", server.uri()), "test-key", timeout).unwrap()
}

/// Serve one scheduled flight.
pub async fn mount_flight(server: &MockServer, flight_iata: &str, aircraft: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/flights"))
        .and(query_param("flight_iata", flight_iata))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "flight_status": "scheduled",
                "flight": {"iata": flight_iata},
                "departure": {
                    "airport": "John F Kennedy International",
                    "scheduled": "2025-01-15T08:00:00+00:00",
                    "delay": 0
                },
                "arrival": {"airport": "Los Angeles International"},
                "aircraft": {"iata": aircraft}
            }]
        })))
        .mount(server)
        .await;
}

/// Tool results in history order.
pub fn tool_results(history: &[ModelMessage]) -> Vec<AgentToolResult> {
    history
        .iter()
        .flat_map(|m| m.content.iter())
        .filter_map(|part| match part {
            ContentPart::ToolResult(result) => Some(result.clone()),
            _ => None,
        })
        .collect()
}

/// The text a tool returned, or its error message.
pub fn result_text(result: &AgentToolResult) -> String {
    result
        .result
        .get("output")
        .or_else(|| result.result.get("error"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

pub fn tool_names(request: &ProviderRequest) -> Vec<String> {
    request.tools.iter().map(|t| t.name.clone()).collect()
}

pub fn system_prompt(request: &ProviderRequest) -> String {
    request
        .messages
        .first()
        .filter(|m| m.role == Role::System)
        .map(|m| m.text_content())
        .unwrap_or_default()
}
