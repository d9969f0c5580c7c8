//! Streaming document loading.
//!
//! Input arrives in blocks. Each block is decoded, complete lines are appended
//! to the document, and control goes back to the caller before the next block.
//! Partial lines, split UTF-8 sequences and a trailing `\r` that may be the
//! first half of a CRLF are carried over to the next block.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::document::Document;

/// Bytes read per cooperative step
pub const BLOCK_SIZE: usize = 64 * 1024;

/// Incremental line splitter feeding a [`Document`]
#[derive(Debug, Default)]
pub struct StreamLoader {
    /// Text after the last complete line terminator
    pending: String,
    /// Trailing bytes of an incomplete UTF-8 sequence
    partial_utf8: Vec<u8>,
}

impl StreamLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a block of bytes and append the complete lines it finishes
    pub fn feed_bytes(&mut self, document: &mut Document, bytes: &[u8]) {
        let mut buf = std::mem::take(&mut self.partial_utf8);
        buf.extend_from_slice(bytes);

        let mut rest = buf.as_slice();
        let mut text = String::with_capacity(rest.len());
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            // Sequence cut off by the block boundary
                            self.partial_utf8 = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        self.feed(document, &text);
    }

    /// Append the complete lines of `text`, keeping the unterminated tail
    pub fn feed(&mut self, document: &mut Document, text: &str) {
        self.pending.push_str(text);

        let bytes = self.pending.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    lines.push(start..i);
                    i += 1;
                    start = i;
                }
                b'\r' => {
                    if i + 1 == bytes.len() {
                        // May be the first half of a CRLF split across blocks
                        break;
                    }
                    lines.push(start..i);
                    i += if bytes[i + 1] == b'\n' { 2 } else { 1 };
                    start = i;
                }
                _ => i += 1,
            }
        }

        for range in lines {
            document.append_line(&self.pending[range]);
        }
        self.pending.drain(..start);
    }

    /// Flush whatever is left as the final line
    pub fn finish(mut self, document: &mut Document) {
        if !self.partial_utf8.is_empty() {
            self.pending.push(char::REPLACEMENT_CHARACTER);
        }
        match self.pending.strip_suffix('\r') {
            Some(line) => {
                document.append_line(line);
                document.append_line(String::new());
            }
            None => {
                document.append_line(self.pending);
            }
        }
    }
}

/// Progress of a [`LoadTask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadProgress {
    /// More input may follow; `bytes` read so far
    Loading { bytes: usize },
    /// Input exhausted and the final line flushed
    Done { bytes: usize },
}

/// Resumable load: one block per [`LoadTask::step`].
#[derive(Debug)]
pub struct LoadTask<R> {
    reader: R,
    loader: Option<StreamLoader>,
    buf: Vec<u8>,
    bytes: usize,
}

impl<R: Read> LoadTask<R> {
    pub fn new(reader: R) -> Self {
        Self::with_block_size(reader, BLOCK_SIZE)
    }

    pub fn with_block_size(reader: R, block_size: usize) -> Self {
        Self {
            reader,
            loader: Some(StreamLoader::new()),
            buf: vec![0; block_size.max(1)],
            bytes: 0,
        }
    }

    /// Read and append one block. Returns `Done` once input is exhausted;
    /// further calls keep returning `Done`.
    pub fn step(&mut self, document: &mut Document) -> Result<LoadProgress> {
        let Some(loader) = self.loader.as_mut() else {
            return Ok(LoadProgress::Done { bytes: self.bytes });
        };

        let n = loop {
            match self.reader.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("Failed to read input block"),
            }
        };

        if n == 0 {
            if let Some(loader) = self.loader.take() {
                loader.finish(document);
            }
            tracing::debug!(
                bytes = self.bytes,
                lines = document.line_count(),
                chunks = document.chunk_count(),
                "load complete"
            );
            return Ok(LoadProgress::Done { bytes: self.bytes });
        }

        loader.feed_bytes(document, &self.buf[..n]);
        self.bytes += n;
        tracing::trace!(bytes = self.bytes, "loaded block");
        Ok(LoadProgress::Loading { bytes: self.bytes })
    }
}

impl Document {
    /// Append everything `reader` yields, block by block
    pub fn load_reader(&mut self, reader: impl Read) -> Result<usize> {
        let mut task = LoadTask::new(reader);
        loop {
            if let LoadProgress::Done { bytes } = task.step(self)? {
                return Ok(bytes);
            }
        }
    }

    /// Append the contents of the file at `path`
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        self.load_reader(file)
            .with_context(|| format!("Failed to load {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::NoWrap;

    fn lines(doc: &Document) -> Vec<String> {
        (0..doc.line_count())
            .map(|l| doc.line_content(l).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_lines_survive_block_boundaries() {
        let mut doc = Document::new(NoWrap);
        let mut task = LoadTask::with_block_size("first line\nsecond\r\nthird".as_bytes(), 3);
        let mut steps = 0;
        while let LoadProgress::Loading { .. } = task.step(&mut doc).unwrap() {
            steps += 1;
        }
        assert!(steps > 3);
        assert_eq!(lines(&doc), vec!["first line", "second", "third"]);
    }

    #[test]
    fn test_crlf_split_across_blocks() {
        let mut doc = Document::new(NoWrap);
        let mut loader = StreamLoader::new();
        loader.feed(&mut doc, "a\r");
        loader.feed(&mut doc, "\nb\r");
        loader.feed(&mut doc, "c");
        loader.finish(&mut doc);
        assert_eq!(lines(&doc), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_trailing_cr_ends_line() {
        let doc = Document::from_text("a\r", NoWrap);
        assert_eq!(lines(&doc), vec!["a", ""]);
    }

    #[test]
    fn test_utf8_split_across_blocks() {
        let mut doc = Document::new(NoWrap);
        let text = "héllo\nwörld";
        let mut task = LoadTask::with_block_size(text.as_bytes(), 2);
        while let LoadProgress::Loading { .. } = task.step(&mut doc).unwrap() {}
        assert_eq!(lines(&doc), vec!["héllo", "wörld"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut doc = Document::new(NoWrap);
        doc.load_reader(&b"ok\xff\nnext"[..]).unwrap();
        assert_eq!(lines(&doc), vec!["ok\u{FFFD}", "next"]);
    }

    #[test]
    fn test_done_is_sticky() {
        let mut doc = Document::new(NoWrap);
        let mut task = LoadTask::new(&b"x"[..]);
        assert_eq!(task.step(&mut doc).unwrap(), LoadProgress::Loading { bytes: 1 });
        assert_eq!(task.step(&mut doc).unwrap(), LoadProgress::Done { bytes: 1 });
        assert_eq!(task.step(&mut doc).unwrap(), LoadProgress::Done { bytes: 1 });
        assert_eq!(doc.line_count(), 1);
    }
}
