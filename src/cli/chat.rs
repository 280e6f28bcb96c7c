//! Interactive chat loop
//!
//! Reads lines from the console, dispatches `/elastic-*` commands, and sends
//! everything else as a turn to the current agent. Remote failures are
//! reported per turn and never end the loop.

use crate::api::{Agent, AgentBuilderApi, AgentRow, ConverseOverrides};
use crate::core::{BridgeError, BridgeResult};
use crate::session::ChatSession;

use super::commands::{ChatCommand, HELP};
use super::console::Console;

/// What the loop does after handling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Chat loop over one session
pub struct ChatLoop<'a, A: AgentBuilderApi + ?Sized> {
    api: &'a A,
    session: ChatSession,
    console: Console,
}

impl<'a, A: AgentBuilderApi + ?Sized> ChatLoop<'a, A> {
    pub fn new(api: &'a A, session: ChatSession, console: Console) -> Self {
        Self {
            api,
            session,
            console,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Run until `/exit` or end of input
    pub async fn run(&mut self, target: &str) -> BridgeResult<()> {
        self.console.print_banner(target)?;
        self.console.print_help(HELP)?;
        self.console.print_current_agent(&self.session.agent_label())?;

        loop {
            let Some(line) = self.console.read_input("you>")? else {
                self.console.print_system("Bye!")?;
                break;
            };

            if self.handle_line(&line).await? == LoopControl::Quit {
                break;
            }
        }

        tracing::info!("Chat loop finished");
        Ok(())
    }

    /// Handle one input line
    ///
    /// Only console I/O failures are returned; remote errors are printed.
    pub async fn handle_line(&mut self, line: &str) -> BridgeResult<LoopControl> {
        let Some(command) = ChatCommand::parse(line) else {
            return Ok(LoopControl::Continue);
        };
        tracing::debug!(?command, "Chat input");

        match command {
            ChatCommand::Exit => {
                self.console.print_system("Bye!")?;
                return Ok(LoopControl::Quit);
            }
            ChatCommand::Help => self.console.print_help(HELP)?,
            ChatCommand::NewConversation => {
                self.session.reset_conversation();
                self.console.print_system("(Started new conversation)")?;
            }
            ChatCommand::ShowAgent => {
                self.console.print_current_agent(&self.session.agent_label())?;
            }
            ChatCommand::UseAgent(agent_id) => match self.session.select_agent(agent_id, None) {
                Ok(()) => self.announce_selection()?,
                Err(err) => self.report(err, "invalid agent")?,
            },
            ChatCommand::ListAgents => self.choose_agent().await?,
            ChatCommand::Say(text) => self.send(&text).await?,
        }

        Ok(LoopControl::Continue)
    }

    async fn send(&mut self, text: &str) -> BridgeResult<()> {
        match self
            .session
            .send_turn(self.api, text, ConverseOverrides::default())
            .await
        {
            Ok(reply) => match reply.reply_text() {
                Some(text) => self.console.print_agent(text)?,
                None => {
                    self.console
                        .print_system("agent> [no reply text found; dumping full response]")?;
                    self.console.print_json(&reply.payload)?;
                }
            },
            Err(err) => self.report(err, "chat failed")?,
        }
        Ok(())
    }

    /// List agents and let the user pick one by number
    async fn choose_agent(&mut self) -> BridgeResult<()> {
        let agents = match self.api.list_agents().await {
            Ok(agents) => agents,
            Err(err) => return self.report(err, "failed to list agents"),
        };

        if agents.is_empty() {
            self.console
                .print_system("No agents found from /api/agent_builder/agents")?;
            return Ok(());
        }

        let rows: Vec<AgentRow> = agents.iter().map(Agent::row).collect();
        self.console.print_agent_rows(&rows)?;

        loop {
            let raw = match self.console.read_input("Pick agent number (Enter to cancel):")? {
                Some(raw) if !raw.is_empty() => raw,
                _ => {
                    self.console.print_system("(No change)")?;
                    return Ok(());
                }
            };

            let Ok(n) = raw.parse::<usize>() else {
                self.console.print_line("Please enter a number")?;
                continue;
            };
            if n < 1 || n > rows.len() {
                self.console
                    .print_line(&format!("Choose a number between 1 and {}", rows.len()))?;
                continue;
            }

            let row = &rows[n - 1];
            if row.id.is_empty() {
                self.console
                    .print_line("Selected agent has no id, choose another")?;
                continue;
            }

            self.session.select_agent(row.id.clone(), Some(row.name.clone()))?;
            return self.announce_selection();
        }
    }

    fn announce_selection(&mut self) -> BridgeResult<()> {
        let message = format!(
            "(Selected agent: {}; conversation reset)",
            self.session.agent_label()
        );
        self.console.print_system(&message)?;
        Ok(())
    }

    /// Print a per-turn failure; console I/O errors still propagate
    fn report(&mut self, err: BridgeError, label: &str) -> BridgeResult<()> {
        match err {
            BridgeError::Io(e) => Err(BridgeError::Io(e)),
            err => {
                tracing::warn!("{}: {}", label, err);
                self.console.print_error(label, &err.to_string())?;
                Ok(())
            }
        }
    }
}
