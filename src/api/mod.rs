//! Kibana Agent Builder API
//!
//! - `AgentBuilderApi` - the two remote operations (list agents, converse)
//! - `AgentBuilderClient` - reqwest implementation bound to one space
//! - request/response types

pub mod auth;
pub mod client;
pub mod provider;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use auth::ApiKeyAuth;
pub use client::AgentBuilderClient;
pub use provider::AgentBuilderApi;
pub use types::{Agent, AgentRow, ConverseOverrides, ConverseRequest, ConverseResponse};
