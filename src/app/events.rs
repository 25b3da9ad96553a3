//! Defines the events delivered to the host event loop.

use std::str::FromStr;

use crate::core::MainAction;

/// Events posted to the tao event loop from other threads and from menu actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// A menu action asked the host process to run a privileged action.
    Forward(MainAction),
    /// A command read from the control channel (stdin).
    Command(ShellCommand),
}

/// A line of the host's control channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// `activate <id>`: activates the menu item with that id.
    Activate(String),
    /// `print`: logs the menu outline.
    Print,
    /// `quit`: saves the configuration and exits.
    Quit,
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("activate"), Some(id), None) => Ok(ShellCommand::Activate(id.to_string())),
            (Some("print"), None, None) => Ok(ShellCommand::Print),
            (Some("quit"), None, None) => Ok(ShellCommand::Quit),
            _ => Err(anyhow::anyhow!("unrecognized command `{}`", line.trim())),
        }
    }
}
