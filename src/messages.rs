//! Message types for the Elm-style architecture
//!
//! All editor state changes flow through [`EditorMsg`].

use std::time::Instant;

use crate::config::EditorConfig;

/// Direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub enum EditorMsg {
    // === Movement (`select` extends the selection) ===
    /// Arrow keys
    MoveCursor { direction: Direction, select: bool },
    /// Start of the visual row (Cmd+Left)
    MoveCursorLineStart { select: bool },
    /// End of the visual row (Cmd+Right)
    MoveCursorLineEnd { select: bool },
    /// Word motion (Option+Left/Right); Up/Down are ignored
    MoveCursorWord { direction: Direction, select: bool },
    /// Start of the logical line
    MoveCursorParagraphStart { select: bool },
    /// End of the logical line
    MoveCursorParagraphEnd { select: bool },
    /// Document start (Cmd+Up); flattens to one cursor
    MoveCursorDocumentStart { select: bool },
    /// Document end (Cmd+Down); flattens to one cursor
    MoveCursorDocumentEnd { select: bool },

    // === Selection ===
    SelectAll,
    SelectWord,
    SelectParagraph,

    // === Editing ===
    /// Typed or pasted text
    InsertText(String),
    /// Enter
    InsertNewline,
    /// Backspace
    DeleteBackward,
    /// Delete
    DeleteForward,
    /// Option+Backspace
    DeleteWordBackward,
    /// Cmd+Backspace
    DeleteLineBackward,
    /// Option+Up/Down: move the cursor's lines by `change`
    SwapLine(isize),
    Copy,
    Cut,

    // === Pointer ===
    /// Press at a buffer position. `count` is the click count.
    Click {
        line: usize,
        column: usize,
        count: u8,
        extend: bool,
    },
    /// Press at a visual row/column
    ClickScreen {
        screen_line: usize,
        screen_column: usize,
        count: u8,
        extend: bool,
    },
    /// Pointer moved with the button held
    Drag { line: usize, column: usize },
    /// Button released
    Release,

    // === Multi-cursor ===
    /// Alt+Click
    AddCursor { line: usize, column: usize },
    ToggleCursor { line: usize, column: usize },
    /// Escape with multiple cursors
    CollapseCursors,

    // === Layout and configuration ===
    /// New configuration, effective at `at`
    ApplyConfig { config: EditorConfig, at: Instant },
    /// Render width changed to `width` cells
    Resize { width: usize, at: Instant },
    /// Host timer fired; drives the background rewrap
    Tick(Instant),
}
