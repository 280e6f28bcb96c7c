//! Session phase types

use serde::{Deserialize, Serialize};

/// Where a chat session sits in the conversation protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No agent chosen yet; turns are refused
    NoAgentSelected,

    /// An agent is chosen but no conversation id is held
    AgentSelected,

    /// An agent is chosen and the server has issued a conversation id
    InConversation,
}

impl SessionPhase {
    /// Check whether a turn may be sent from this phase
    pub fn can_send(&self) -> bool {
        !matches!(self, SessionPhase::NoAgentSelected)
    }

    /// Short label for log lines
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::NoAgentSelected => "no-agent",
            SessionPhase::AgentSelected => "agent-selected",
            SessionPhase::InConversation => "in-conversation",
        }
    }
}
