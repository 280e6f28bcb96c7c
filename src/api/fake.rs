//! In-memory `AgentBuilderApi` used by unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use super::provider::AgentBuilderApi;
use super::types::{agents_from_payload, Agent, ConverseRequest, ConverseResponse};
use crate::core::{BridgeError, BridgeResult};

/// Replays queued replies and records every converse request
#[derive(Default)]
pub struct ScriptedApi {
    agents: Mutex<Option<BridgeResult<Value>>>,
    replies: Mutex<VecDeque<BridgeResult<Value>>>,
    pub requests: Mutex<Vec<ConverseRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agents(self, payload: Value) -> Self {
        *self.agents.lock().unwrap() = Some(Ok(payload));
        self
    }

    pub fn with_agents_error(self, err: BridgeError) -> Self {
        *self.agents.lock().unwrap() = Some(Err(err));
        self
    }

    pub fn reply(self, payload: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(payload));
        self
    }

    pub fn fail(self, err: BridgeError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn sent(&self) -> Vec<ConverseRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn timeout_error() -> BridgeError {
    BridgeError::Network {
        reason: "operation timed out".into(),
        timed_out: true,
    }
}

#[async_trait::async_trait]
impl AgentBuilderApi for ScriptedApi {
    async fn list_agents(&self) -> BridgeResult<Vec<Agent>> {
        match self.agents.lock().unwrap().take() {
            Some(Ok(payload)) => Ok(agents_from_payload(payload)),
            Some(Err(err)) => Err(err),
            None => Ok(Vec::new()),
        }
    }

    async fn converse(&self, request: &ConverseRequest) -> BridgeResult<ConverseResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(payload)) => Ok(ConverseResponse::from_payload(payload)),
            Some(Err(err)) => Err(err),
            None => Err(BridgeError::Api {
                status: 500,
                body: "no scripted reply".into(),
            }),
        }
    }
}
