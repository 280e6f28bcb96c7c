//! Agent Builder API types
//!
//! Request bodies are typed; responses are kept as raw JSON because the
//! server's payload shape varies between Kibana versions. Accessors pull out
//! the fields the bridge needs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Agents
// ============================================================================

/// An agent as returned by the listing endpoint, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Agent(pub Value);

/// Display fields derived from an [`Agent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRow {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Agent {
    /// Agent id (`id`, `agent_id` or `uuid`), empty when the server gave none
    pub fn id(&self) -> String {
        first_string(&self.0, &["id", "agent_id", "uuid"]).unwrap_or_default()
    }

    /// Display name, `(unnamed)` when absent
    pub fn name(&self) -> String {
        first_string(&self.0, &["name", "title", "display_name"])
            .unwrap_or_else(|| "(unnamed)".to_string())
    }

    /// Free-text description, empty when absent
    pub fn description(&self) -> String {
        first_string(&self.0, &["description", "summary"]).unwrap_or_default()
    }

    pub fn row(&self) -> AgentRow {
        AgentRow {
            id: self.id(),
            name: self.name(),
            description: self.description(),
        }
    }
}

/// Normalise the listing payload into agents, preserving server order
///
/// Kibana returns either a bare array or an object wrapping it in `results`
/// (or `agents` on older builds).
pub fn agents_from_payload(payload: Value) -> Vec<Agent> {
    match payload {
        Value::Array(items) => items.into_iter().map(Agent).collect(),
        Value::Object(mut obj) => {
            for key in ["results", "agents"] {
                if matches!(obj.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = obj.remove(key) {
                        return items.into_iter().map(Agent).collect();
                    }
                }
            }
            vec![Agent(Value::Object(obj))]
        }
        _ => Vec::new(),
    }
}

// ============================================================================
// Converse
// ============================================================================

/// Optional per-call overrides; absent fields are left out of the body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConverseOverrides {
    /// Alternate connector (backing model) for this call
    #[serde(skip_serializing_if = "is_blank")]
    pub connector_id: Option<String>,

    /// Agent configuration overrides
    #[serde(skip_serializing_if = "is_empty_map")]
    pub configuration_overrides: Option<Map<String, Value>>,

    /// Prompt overrides
    #[serde(rename = "prompts", skip_serializing_if = "is_empty_map")]
    pub prompts: Option<Map<String, Value>>,
}

impl ConverseOverrides {
    pub fn with_connector(mut self, connector_id: impl Into<String>) -> Self {
        self.connector_id = Some(connector_id.into());
        self
    }

    pub fn with_configuration_overrides(mut self, overrides: Map<String, Value>) -> Self {
        self.configuration_overrides = Some(overrides);
        self
    }

    pub fn with_prompts(mut self, prompts: Map<String, Value>) -> Self {
        self.prompts = Some(prompts);
        self
    }

    /// True when no override would be sent
    pub fn is_empty(&self) -> bool {
        is_blank(&self.connector_id)
            && is_empty_map(&self.configuration_overrides)
            && is_empty_map(&self.prompts)
    }
}

/// Request body for `POST /api/agent_builder/converse`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConverseRequest {
    pub agent_id: String,

    pub input: String,

    #[serde(skip_serializing_if = "is_blank")]
    pub conversation_id: Option<String>,

    #[serde(flatten)]
    pub overrides: ConverseOverrides,
}

impl ConverseRequest {
    pub fn new(agent_id: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            input: input.into(),
            conversation_id: None,
            overrides: ConverseOverrides::default(),
        }
    }

    pub fn with_conversation(mut self, conversation_id: Option<String>) -> Self {
        self.conversation_id = conversation_id;
        self
    }

    pub fn with_overrides(mut self, overrides: ConverseOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Reply from the converse endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ConverseResponse {
    /// Conversation id assigned or echoed by the server
    pub conversation_id: Option<String>,

    /// Full response payload
    pub payload: Value,
}

impl ConverseResponse {
    pub fn from_payload(payload: Value) -> Self {
        let conversation_id = payload
            .get("conversation_id")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from);

        Self {
            conversation_id,
            payload,
        }
    }

    /// The agent's reply at `response.message`
    pub fn message(&self) -> Option<&str> {
        self.payload
            .get("response")
            .and_then(|r| r.get("message"))
            .and_then(Value::as_str)
    }

    /// Best-effort reply text
    ///
    /// Tries `response.message`, then common top-level text fields, then the
    /// last non-empty `messages[].content`. `None` when the payload carries
    /// no text at all.
    pub fn reply_text(&self) -> Option<&str> {
        if let Some(message) = self.message() {
            return Some(message);
        }

        let top_level = ["response", "output", "text", "message", "answer"]
            .into_iter()
            .find_map(|key| {
                self.payload
                    .get(key)
                    .and_then(Value::as_str)
                    .filter(|text| !text.trim().is_empty())
            });
        if top_level.is_some() {
            return top_level;
        }

        self.payload
            .get("messages")
            .and_then(Value::as_array)?
            .iter()
            .rev()
            .find_map(|m| {
                m.get("content")
                    .and_then(Value::as_str)
                    .filter(|c| !c.trim().is_empty())
            })
    }
}

fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.is_empty())
}

fn is_empty_map(value: &Option<Map<String, Value>>) -> bool {
    value.as_ref().map_or(true, Map::is_empty)
}
