//! Command dispatch for the binary

use anyhow::{Context, Result};
use serde_json::Value;

use crate::api::{AgentBuilderApi, AgentBuilderClient};
use crate::config::BridgeConfig;
use crate::core::BridgeResult;
use crate::session::ChatSession;

use super::args::{Cli, Command, ConverseArgs};
use super::chat::ChatLoop;
use super::console::Console;

/// Resolve configuration, build the client, and run the chosen command
pub async fn run(cli: Cli) -> Result<()> {
    let config = BridgeConfig::load(cli.env_file.as_deref())
        .context("Failed to load configuration. Set KIBANA_URL and KIBANA_API_KEY (or add them to .env)")?;
    let client = AgentBuilderClient::new(config.clone()).context("Failed to create Agent Builder client")?;

    match cli.command {
        Command::ListAgents => {
            println!("{}", list_agents_json(&client).await?);
        }
        Command::Converse(args) => {
            println!("{}", converse_json(&client, &args).await?);
        }
        Command::Chat { agent_id } => {
            let session = initial_session(agent_id.as_deref(), &config.default_agent_id);
            let mut chat = ChatLoop::new(&client, session, Console::new());
            chat.run(&config.base_url).await?;
        }
    }

    Ok(())
}

/// Starting session for `chat`: the requested agent, or the default when
/// the flag is absent or blank
pub fn initial_session(agent_id: Option<&str>, default_agent_id: &str) -> ChatSession {
    let agent_id = agent_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(default_agent_id);
    ChatSession::new(agent_id)
}

/// `list-agents`: the agents as a pretty JSON array
pub async fn list_agents_json<A: AgentBuilderApi + ?Sized>(api: &A) -> BridgeResult<String> {
    let agents = api.list_agents().await?;
    let array = Value::Array(agents.into_iter().map(|agent| agent.0).collect());
    Ok(serde_json::to_string_pretty(&array)?)
}

/// `converse`: one turn, printed as the server's pretty JSON response
pub async fn converse_json<A: AgentBuilderApi + ?Sized>(
    api: &A,
    args: &ConverseArgs,
) -> BridgeResult<String> {
    let overrides = args.overrides()?;
    let mut session = ChatSession::resume(args.agent_id.clone(), args.conversation_id.clone());
    let reply = session.send_turn(api, &args.input, overrides).await?;
    Ok(serde_json::to_string_pretty(&reply.payload)?)
}
