//! Clipboard access behind a trait
//!
//! `SystemClipboard` talks to the OS clipboard; `MemoryClipboard` keeps the
//! text in process and can be told to fail, which is what the watcher and
//! state tests drive.

use std::sync::Mutex;
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use crate::shared::errors::{CommandError, CommandResult};

/// Text clipboard the watcher reads and restore writes to
pub trait ClipboardBackend: Send + Sync {
    fn read_text(&self) -> CommandResult<String>;
    fn write_text(&self, text: &str) -> CommandResult<()>;
}

/// OS clipboard via `cli_clipboard`, a fresh context per operation
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardBackend for SystemClipboard {
    fn read_text(&self) -> CommandResult<String> {
        ClipboardContext::new()
            .and_then(|mut ctx| ctx.get_contents())
            .map_err(|e| CommandError::ClipboardError(format!("read failed: {}", e)))
    }

    fn write_text(&self, text: &str) -> CommandResult<()> {
        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_string()))
            .map_err(|e| CommandError::ClipboardError(format!("write failed: {}", e)))
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    text: String,
    writes: Vec<String>,
    failing_reads: usize,
    fail_writes: bool,
}

/// In-process clipboard
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    inner: Mutex<MemoryInner>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::new();
        clipboard.set_external(text);
        clipboard
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Simulate another application copying `text`
    pub fn set_external(&self, text: &str) {
        self.lock().text = text.to_string();
    }

    /// Make the next `count` reads fail
    pub fn fail_next_reads(&self, count: usize) {
        self.lock().failing_reads = count;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Every value written through `write_text`, oldest first
    pub fn writes(&self) -> Vec<String> {
        self.lock().writes.clone()
    }

    pub fn current(&self) -> String {
        self.lock().text.clone()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn read_text(&self) -> CommandResult<String> {
        let mut inner = self.lock();
        if inner.failing_reads > 0 {
            inner.failing_reads -= 1;
            return Err(CommandError::ClipboardError("clipboard unavailable".to_string()));
        }
        Ok(inner.text.clone())
    }

    fn write_text(&self, text: &str) -> CommandResult<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(CommandError::ClipboardError("clipboard unavailable".to_string()));
        }
        inner.text = text.to_string();
        inner.writes.push(text.to_string());
        Ok(())
    }
}
