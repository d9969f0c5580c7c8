//! Writer - a soft-wrapping text buffer with multi-cursor editing
//!
//! Text lives in a [`Document`] of bounded chunks. Each chunk keeps, per
//! logical line, the columns where that line wraps onto the next visual row,
//! so buffer positions and screen positions convert in both directions
//! without re-measuring. An [`Editor`] owns a document and its cursors and is
//! driven through [`update`] in the Elm style.

pub mod chunk;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod cursor;
pub mod cursors;
pub mod document;
pub mod editor;
pub mod loader;
pub mod messages;
pub mod position;
pub mod rewrap;
pub mod selection;
pub mod tracing;
pub mod update;
pub mod util;
pub mod words;
pub mod wrap;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::{EditorConfig, WrapConfig, WrapMode};
pub use cursor::{Cursor, CursorId};
pub use cursors::CursorSet;
pub use document::Document;
pub use editor::Editor;
pub use messages::EditorMsg;
pub use position::{Point, Range, ScreenPoint};
pub use selection::{Direction, Selection};
pub use update::update;
pub use words::{UnicodeWords, WordBoundary};
pub use wrap::{CellMeasure, LineBreaker, MeasuredWrap, NoWrap, TextMeasure};
