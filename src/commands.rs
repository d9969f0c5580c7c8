//! Command types for the Elm-style architecture
//!
//! Commands are side effects the host performs after an update.

use std::time::Duration;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Redraw the visible rows
    Redraw,
    /// Put text on the system clipboard. Failures are logged by the host
    /// and do not affect the session.
    WriteClipboard(String),
    /// Send a `Tick` after `delay` to keep a background rewrap going
    ScheduleTick { delay: Duration },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::WriteClipboard(_) => false,
            Cmd::ScheduleTick { .. } => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Clipboard text carried by this command or any batched command
    pub fn clipboard_text(&self) -> Option<&str> {
        match self {
            Cmd::WriteClipboard(text) => Some(text),
            Cmd::Batch(cmds) => cmds.iter().find_map(Cmd::clipboard_text),
            _ => None,
        }
    }
}
