//! Agent Builder API trait
//!
//! Abstracts the two remote operations so the session protocol and the chat
//! loop can run against the real HTTP client or an in-memory fake.

use super::types::{Agent, ConverseRequest, ConverseResponse};
use crate::core::BridgeResult;

/// Remote operations exposed by Kibana's Agent Builder.
///
/// Implementations never hold conversation state: the caller passes the
/// conversation id in every [`ConverseRequest`] and stores the returned one.
#[async_trait::async_trait]
pub trait AgentBuilderApi: Send + Sync {
    /// List agents in the configured space, in server order.
    async fn list_agents(&self) -> BridgeResult<Vec<Agent>>;

    /// Send one converse request.
    async fn converse(&self, request: &ConverseRequest) -> BridgeResult<ConverseResponse>;
}
