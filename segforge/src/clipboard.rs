use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Receives exported text. Fire-and-forget: failures are the sink's problem.
pub trait ClipboardSink {
    fn put_text(&mut self, text: &str);
}

/// Writes each payload over a file, for pickup by a clipboard daemon or the
/// user.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ClipboardSink for FileClipboard {
    fn put_text(&mut self, text: &str) {
        match std::fs::write(&self.path, text) {
            Ok(()) => info!(path = %self.path.display(), bytes = text.len(), "clipboard written"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to write clipboard file"),
        }
    }
}

/// Keeps every payload in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    history: Vec<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn put_text(&mut self, text: &str) {
        self.history.push(text.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_clipboard_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileClipboard::new(dir.path().join("clip"));

        sink.put_text("first");
        sink.put_text("second");

        assert_eq!(std::fs::read_to_string(sink.path()).unwrap(), "second");
    }

    #[test]
    fn file_clipboard_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileClipboard::new(dir.path().join("missing").join("clip"));

        sink.put_text("lost");

        assert!(!sink.path().exists());
    }

    #[test]
    fn memory_clipboard_records_history() {
        let mut sink = MemoryClipboard::new();
        assert!(sink.is_empty());

        sink.put_text("a");
        sink.put_text("b");

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.last(), Some("b"));
    }
}
