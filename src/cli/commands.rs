//! In-band chat commands
//!
//! Lines starting with a recognised `/elastic-*` token (or `/exit`) are
//! commands; everything else is a message for the current agent.

pub const HELP: &str = "Commands:\n  \
/elastic-agents      List agents and choose one\n  \
/elastic-agent       Show current agent\n  \
/elastic-agent <id>  Switch to agent <id>\n  \
/elastic-new         Start a new conversation\n  \
/elastic-help        Show this help\n  \
/exit                Quit";

/// One line of chat input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// `/elastic-agents`
    ListAgents,
    /// `/elastic-agent`
    ShowAgent,
    /// `/elastic-agent <id>`
    UseAgent(String),
    /// `/elastic-new`
    NewConversation,
    /// `/elastic-help`
    Help,
    /// `/exit` or `/quit`
    Exit,
    /// Free text sent to the agent
    Say(String),
}

impl ChatCommand {
    /// Parse a line; blank lines yield `None`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (token, rest) = match line.split_once(char::is_whitespace) {
            Some((token, rest)) => (token, rest.trim()),
            None => (line, ""),
        };

        let command = match token.to_ascii_lowercase().as_str() {
            "/elastic-agents" => ChatCommand::ListAgents,
            "/elastic-agent" if rest.is_empty() => ChatCommand::ShowAgent,
            "/elastic-agent" => ChatCommand::UseAgent(rest.to_string()),
            "/elastic-new" => ChatCommand::NewConversation,
            "/elastic-help" => ChatCommand::Help,
            "/exit" | "/quit" => ChatCommand::Exit,
            _ => ChatCommand::Say(line.to_string()),
        };
        Some(command)
    }
}
