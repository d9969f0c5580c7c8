//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use writer::config::{EditorConfig, WrapConfig, WrapMode};
use writer::{Document, Editor, MeasuredWrap, NoWrap, Point};

/// Configuration that never wraps
pub fn no_wrap_config() -> EditorConfig {
    EditorConfig {
        wrap: WrapConfig {
            mode: WrapMode::None,
            ..WrapConfig::default()
        },
        ..EditorConfig::default()
    }
}

/// Configuration wrapping at `width` monospace cells
pub fn wrap_config(width: usize) -> EditorConfig {
    EditorConfig {
        wrap: WrapConfig {
            mode: WrapMode::Measure,
            width,
            ..WrapConfig::default()
        },
        ..EditorConfig::default()
    }
}

/// Create a test editor with given text and the main cursor at (line, column)
pub fn test_editor(text: &str, line: usize, column: usize) -> Editor {
    let mut editor = Editor::with_text(text, no_wrap_config());
    editor.click(Point::new(line, column), 1, false);
    editor
}

/// Create a test editor wrapping at `width` cells
pub fn wrapped_editor(text: &str, width: usize) -> Editor {
    Editor::with_text(text, wrap_config(width))
}

/// Create a document wrapping at `width` cells with small chunks
pub fn chunked_document(text: &str, width: usize, line_limit: usize) -> Document {
    let mut document = Document::new(MeasuredWrap::monospace(width)).with_line_limit(line_limit);
    document.load_text(text);
    document
}

pub fn plain_document(text: &str) -> Document {
    Document::from_text(text, NoWrap)
}

/// All logical lines as owned strings
pub fn lines(document: &Document) -> Vec<String> {
    (0..document.line_count())
        .map(|l| document.line_content(l).unwrap_or_default().to_string())
        .collect()
}

/// Cursor positions in list order
pub fn positions(editor: &Editor) -> Vec<(usize, usize)> {
    editor
        .cursors
        .iter()
        .map(|c| (c.position().line, c.position().column))
        .collect()
}

/// Recount visual rows from the stored breaks
pub fn recount_rows(document: &Document) -> usize {
    document
        .chunks()
        .iter()
        .flat_map(|c| c.breaks())
        .map(|b| b.len() + 1)
        .sum()
}

/// A few paragraphs of prose with varied line lengths
pub fn prose(lines: usize) -> String {
    const WORDS: [&str; 12] = [
        "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dogs", "while", "a",
        "sleepy", "cat",
    ];
    (0..lines)
        .map(|i| {
            let words = (i * 7) % 23;
            (0..words)
                .map(|w| WORDS[(i + w) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
