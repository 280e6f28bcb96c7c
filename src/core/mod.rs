//! Core types for the bridge
//!
//! - `BridgeError` / `ConfigError` - Error types
//! - `SessionPhase` - Where a chat session is in the conversation protocol

pub mod error;
pub mod state;

pub use error::{BridgeError, BridgeResult, ConfigError};
pub use state::SessionPhase;
