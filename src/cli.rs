//! Command-line argument parsing for the `writer` binary
//!
//! Supports:
//! - Reading a file or stdin
//! - Overriding the wrap width or disabling wrapping
//! - Reporting where a line/column lands on screen

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::config::{EditorConfig, WrapMode};

/// Soft-wrap a text file and print its visual rows
#[derive(Parser, Debug)]
#[command(name = "writer", version, about = "Soft-wrap a text file and print its visual rows")]
pub struct CliArgs {
    /// File to load (reads stdin when omitted or `-`)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Wrap width in cells (overrides the config file)
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,

    /// Disable wrapping
    #[arg(long, conflicts_with = "width")]
    pub no_wrap: bool,

    /// Report the screen position of line N
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,

    /// Column within --line
    #[arg(long, value_name = "N", requires = "line")]
    pub column: Option<usize>,

    /// Print line, row and chunk counts instead of the rows
    #[arg(long)]
    pub stats: bool,
}

/// Where the text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

/// What to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Rows,
    Stats,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub source: Source,
    pub output: Output,
    /// Wrap width override in cells
    pub width: Option<usize>,
    pub no_wrap: bool,
    /// Position to report - 1-indexed from user, converted to 0-indexed
    pub probe: Option<(usize, usize)>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig> {
        if self.width == Some(0) {
            bail!("--width must be at least 1");
        }

        let source = match self.path {
            Some(path) if path.as_os_str() != "-" => Source::File(path),
            _ => Source::Stdin,
        };

        // Convert from 1-indexed (user input) to 0-indexed (internal)
        let probe = self.line.map(|line| {
            let line_0 = line.saturating_sub(1);
            let col_0 = self.column.unwrap_or(1).saturating_sub(1);
            (line_0, col_0)
        });

        Ok(StartupConfig {
            source,
            output: if self.stats { Output::Stats } else { Output::Rows },
            width: self.width,
            no_wrap: self.no_wrap,
            probe,
        })
    }
}

impl StartupConfig {
    /// Layer the command-line overrides onto a loaded configuration
    pub fn apply_to(&self, config: &mut EditorConfig) {
        if self.no_wrap {
            config.wrap.mode = WrapMode::None;
        }
        if let Some(width) = self.width {
            config.wrap.mode = WrapMode::Measure;
            config.wrap.width = width;
        }
    }
}
