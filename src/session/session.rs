//! Chat session state
//!
//! `ChatSession` holds the selected agent and the live conversation id, and
//! enforces the conversation protocol:
//!
//! - selecting an agent always drops the conversation id
//! - a successful turn stores the id the server returned
//! - a failed turn changes nothing

use crate::api::{AgentBuilderApi, ConverseOverrides, ConverseRequest, ConverseResponse};
use crate::core::{BridgeError, BridgeResult, SessionPhase};

/// Conversation state for one interactive run or one command invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSession {
    agent_id: Option<String>,
    agent_name: Option<String>,
    conversation_id: Option<String>,
}

impl ChatSession {
    /// Create a session with an agent already selected
    pub fn new(agent_id: impl Into<String>) -> Self {
        let mut session = Self::unselected();
        let agent_id = agent_id.into();
        if !agent_id.trim().is_empty() {
            session.agent_id = Some(agent_id.trim().to_string());
        }
        session
    }

    /// Create a session with no agent chosen
    pub fn unselected() -> Self {
        Self::default()
    }

    /// Continue an existing conversation with an agent
    pub fn resume(agent_id: impl Into<String>, conversation_id: Option<String>) -> Self {
        let mut session = Self::new(agent_id);
        if session.agent_id.is_some() {
            session.conversation_id = conversation_id.filter(|id| !id.trim().is_empty());
        }
        session
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.agent_id, &self.conversation_id) {
            (None, _) => SessionPhase::NoAgentSelected,
            (Some(_), None) => SessionPhase::AgentSelected,
            (Some(_), Some(_)) => SessionPhase::InConversation,
        }
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    pub fn agent_name(&self) -> Option<&str> {
        self.agent_name.as_deref()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// `name (id)` for display, or the bare id when no name is known
    pub fn agent_label(&self) -> String {
        match (&self.agent_name, &self.agent_id) {
            (Some(name), Some(id)) => format!("{} ({})", name, id),
            (None, Some(id)) => format!("{} ({})", id, id),
            _ => "(none)".to_string(),
        }
    }

    /// Switch to another agent; the conversation always starts over
    pub fn select_agent(
        &mut self,
        agent_id: impl Into<String>,
        agent_name: Option<String>,
    ) -> BridgeResult<()> {
        let agent_id = agent_id.into().trim().to_string();
        if agent_id.is_empty() {
            return Err(BridgeError::invalid_argument("agent id must not be empty"));
        }

        tracing::debug!(from = ?self.agent_id, to = %agent_id, "Selecting agent");
        self.agent_id = Some(agent_id);
        self.agent_name = agent_name.filter(|n| !n.is_empty());
        self.conversation_id = None;
        Ok(())
    }

    /// Drop the conversation id, keeping the agent
    pub fn reset_conversation(&mut self) {
        tracing::debug!(conversation = ?self.conversation_id, "Resetting conversation");
        self.conversation_id = None;
    }

    /// Build the converse request for the next turn
    pub fn build_request(
        &self,
        input: &str,
        overrides: ConverseOverrides,
    ) -> BridgeResult<ConverseRequest> {
        let agent_id = self.agent_id.as_ref().ok_or(BridgeError::NoAgentSelected)?;
        if input.trim().is_empty() {
            return Err(BridgeError::invalid_argument("input must not be empty"));
        }

        Ok(ConverseRequest::new(agent_id.clone(), input)
            .with_conversation(self.conversation_id.clone())
            .with_overrides(overrides))
    }

    /// Record the outcome of a successful turn
    ///
    /// A reply without a conversation id keeps the current one.
    pub fn apply_reply(&mut self, reply: &ConverseResponse) {
        match &reply.conversation_id {
            Some(id) => self.conversation_id = Some(id.clone()),
            None => {
                tracing::debug!("Reply carried no conversation id; keeping {:?}", self.conversation_id)
            }
        }
    }

    /// Send one turn and advance the session on success
    ///
    /// On error the session is left exactly as it was.
    pub async fn send_turn<A>(
        &mut self,
        api: &A,
        input: &str,
        overrides: ConverseOverrides,
    ) -> BridgeResult<ConverseResponse>
    where
        A: AgentBuilderApi + ?Sized,
    {
        let request = self.build_request(input, overrides)?;
        let reply = api.converse(&request).await?;
        self.apply_reply(&reply);
        tracing::debug!(phase = self.phase().label(), "Turn complete");
        Ok(reply)
    }
}
