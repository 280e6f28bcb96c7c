pub mod core;
pub mod config;
pub mod session;

// Kibana Agent Builder HTTP API
pub mod api;

// Command-line surface and interactive chat
pub mod cli;
pub mod logging;
