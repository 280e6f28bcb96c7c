//! Command-line surface
//!
//! - `Cli` - clap arguments (`list-agents`, `converse`, `chat`)
//! - `ChatLoop` - interactive loop with `/elastic-*` commands
//! - `Console` - colored terminal I/O

pub mod args;
pub mod chat;
pub mod commands;
pub mod console;
pub mod run;

pub use args::{Cli, Command, ConverseArgs};
pub use chat::{ChatLoop, LoopControl};
pub use commands::ChatCommand;
pub use console::Console;
pub use run::run;
