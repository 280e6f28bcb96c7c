use colored::*;
use std::io::{self, BufRead, Write};

use crate::api::AgentRow;

/// Longest description shown in the agent picker
const DESCRIPTION_WIDTH: usize = 80;

/// Console handles all terminal I/O with colored formatting
pub struct Console {
    user_color: Color,
    agent_color: Color,
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl Console {
    /// Create a console on stdin/stdout
    pub fn new() -> Self {
        Self::with_io(Box::new(io::BufReader::new(io::stdin())), Box::new(io::stdout()))
    }

    /// Create a console over arbitrary reader/writer (scripted sessions, tests)
    pub fn with_io(input: Box<dyn BufRead + Send>, output: Box<dyn Write + Send>) -> Self {
        Self {
            user_color: Color::Cyan,
            agent_color: Color::Green,
            input,
            output,
        }
    }

    /// Print the agent's reply
    pub fn print_agent(&mut self, message: &str) -> io::Result<()> {
        writeln!(
            self.output,
            "{} {}",
            "agent>".color(self.agent_color).bold(),
            message.color(self.agent_color)
        )
    }

    /// Print a status line (selection changes, resets, ...)
    pub fn print_system(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.yellow())
    }

    /// Print plain text
    pub fn print_line(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Print an error with a short label
    pub fn print_error(&mut self, label: &str, detail: &str) -> io::Result<()> {
        writeln!(
            self.output,
            "{} {}",
            "agent>".color(self.agent_color).bold(),
            format!("[{}]", label).red().bold()
        )?;
        writeln!(self.output, "{}", detail)
    }

    /// Print a JSON value, pretty
    pub fn print_json(&mut self, value: &serde_json::Value) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        writeln!(self.output, "{}", rendered)
    }

    /// Read one line; `None` at end of input
    pub fn read_input(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", prompt.color(self.user_color).bold())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print the connection banner
    pub fn print_banner(&mut self, target: &str) -> io::Result<()> {
        writeln!(self.output, "{}", "=".repeat(60).bright_blue())?;
        writeln!(self.output, "{}", "  Elastic Agent Builder".bright_blue().bold())?;
        writeln!(self.output, "{}", "=".repeat(60).bright_blue())?;
        writeln!(self.output, "Connected to Kibana at {}", target)
    }

    /// Print the in-band command help
    pub fn print_help(&mut self, help: &str) -> io::Result<()> {
        writeln!(self.output, "{}", help)
    }

    /// Print the current agent
    pub fn print_current_agent(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.output, "Current agent: {}", label.color(self.agent_color))
    }

    /// Print numbered agent rows for the picker
    pub fn print_agent_rows(&mut self, rows: &[AgentRow]) -> io::Result<()> {
        writeln!(self.output, "{}", "Available agents:".bold())?;
        for (idx, row) in rows.iter().enumerate() {
            let desc = truncate(&row.description, DESCRIPTION_WIDTH);
            if desc.is_empty() {
                writeln!(self.output, "  [{}] {} ({})", idx + 1, row.name, row.id)?;
            } else {
                writeln!(
                    self.output,
                    "  [{}] {} ({}) — {}",
                    idx + 1,
                    row.name,
                    row.id,
                    desc.bright_black()
                )?;
            }
        }
        Ok(())
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut to `width` characters, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let mut cut: String = text.chars().take(width).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::scripted;
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 80), "short");
        let long = "x".repeat(81);
        let cut = truncate(&long, 80);
        assert_eq!(cut.chars().count(), 81);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_read_input_trims_and_ends() {
        let (mut console, _out) = scripted("  hello  \n");
        assert_eq!(console.read_input("you>").unwrap().as_deref(), Some("hello"));
        assert_eq!(console.read_input("you>").unwrap(), None);
    }

    #[test]
    fn test_agent_rows() {
        let (mut console, out) = scripted("");
        console
            .print_agent_rows(&[
                AgentRow {
                    id: "a1".into(),
                    name: "One".into(),
                    description: String::new(),
                },
                AgentRow {
                    id: "a2".into(),
                    name: "Two".into(),
                    description: "does things".into(),
                },
            ])
            .unwrap();

        let text = out.contents();
        assert!(text.contains("[1] One (a1)"));
        assert!(text.contains("[2] Two (a2)"));
        assert!(text.contains("does things"));
    }
}
