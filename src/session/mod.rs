//! Session management
//!
//! `ChatSession` tracks the selected agent and the server-issued
//! conversation id across turns. It is an explicit value owned by the
//! caller; nothing about a conversation lives in process-wide state.

pub mod session;

pub use session::ChatSession;
