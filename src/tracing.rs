//! Logging setup and cursor-state diffing for debug logs
//!
//! Configure console output via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=writer::update=debug` - cursor diffs per message
//! - `RUST_LOG=writer::document=trace` - per-chunk rewrap deltas
//!
//! Logs are also written to `~/.config/writer/logs/writer.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::cursors::CursorSet;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "writer.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {:#}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of cursor/selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub cursors: Vec<CursorInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorInfo {
    pub anchor: (usize, usize),
    pub focus: (usize, usize),
}

impl CursorInfo {
    fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

impl CursorSnapshot {
    pub fn from_cursors(cursors: &CursorSet) -> Self {
        Self {
            cursors: cursors
                .iter()
                .map(|c| {
                    let anchor = c.selection.anchor();
                    let focus = c.selection.focus();
                    CursorInfo {
                        anchor: (anchor.line, anchor.column),
                        focus: (focus.line, focus.column),
                    }
                })
                .collect(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &CursorSnapshot) -> Option<String> {
        if self.cursors.len() != other.cursors.len() {
            return Some(format!(
                "cursor count: {} → {}",
                self.cursors.len(),
                other.cursors.len()
            ));
        }

        let mut changes = Vec::new();
        for (i, (before, after)) in self.cursors.iter().zip(&other.cursors).enumerate() {
            if before.focus != after.focus {
                changes.push(format!(
                    "#{}: ({},{}) → ({},{})",
                    i, before.focus.0, before.focus.1, after.focus.0, after.focus.1
                ));
            }
            if before.is_collapsed() != after.is_collapsed() {
                let status = if after.is_collapsed() {
                    "cleared"
                } else {
                    "active"
                };
                changes.push(format!("#{}: selection {}", i, status));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
