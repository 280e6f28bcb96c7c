use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

use crate::api::ConverseOverrides;
use crate::core::{BridgeError, BridgeResult};

/// Elastic Agent Builder API CLI
#[derive(Parser, Debug)]
#[command(name = "elastic-agent-bridge", version, about)]
pub struct Cli {
    /// Load settings from this .env file instead of the nearest one
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Log filter override (e.g. debug, elastic_agent_bridge=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List Agent Builder agents
    ListAgents,
    /// Send a converse request
    Converse(ConverseArgs),
    /// Interactive chat with /elastic-* commands
    Chat {
        /// Agent to start with (defaults to DEFAULT_AGENT_ID)
        #[arg(long)]
        agent_id: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct ConverseArgs {
    #[arg(long)]
    pub agent_id: String,

    #[arg(long)]
    pub input: String,

    #[arg(long)]
    pub conversation_id: Option<String>,

    #[arg(long)]
    pub connector_id: Option<String>,

    /// JSON object
    #[arg(long)]
    pub configuration_overrides: Option<String>,

    /// JSON object
    #[arg(long)]
    pub prompts: Option<String>,
}

impl ConverseArgs {
    /// Overrides from the optional flags; JSON flags must hold objects
    pub fn overrides(&self) -> BridgeResult<ConverseOverrides> {
        let mut overrides = ConverseOverrides::default();
        if let Some(connector) = &self.connector_id {
            overrides = overrides.with_connector(connector.clone());
        }
        if let Some(raw) = &self.configuration_overrides {
            overrides =
                overrides.with_configuration_overrides(parse_object("--configuration-overrides", raw)?);
        }
        if let Some(raw) = &self.prompts {
            overrides = overrides.with_prompts(parse_object("--prompts", raw)?);
        }
        Ok(overrides)
    }
}

fn parse_object(flag: &str, raw: &str) -> BridgeResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(BridgeError::invalid_argument(format!(
            "{flag} must be a JSON object"
        ))),
        Err(e) => Err(BridgeError::invalid_argument(format!(
            "{flag} is not valid JSON: {e}"
        ))),
    }
}
