use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the clipboard history.
///
/// Entries are compared by `content` only; `id` and `timestamp` are
/// metadata for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardHistoryItem {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ClipboardHistoryItem {
    /// Create a new text clipboard item captured now
    pub fn new_text(content: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            timestamp: Utc::now(),
        }
    }

    /// Number of characters (not bytes) in the entry
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Number of lines in the entry
    pub fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }
}

/// A change the watcher observed on the system clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardChange {
    pub current: String,
    pub previous: Option<String>,
}

impl ClipboardChange {
    pub fn new(current: String, previous: Option<String>) -> Self {
        Self { current, previous }
    }
}

/// Shorten `text` for single-line display.
///
/// Text longer than `max_chars` is cut to `max_chars - 3` characters and
/// suffixed with `...`; line breaks are shown as `↵`.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let truncated = if text.chars().count() > max_chars {
        let keep = max_chars.saturating_sub(3);
        let mut short: String = text.chars().take(keep).collect();
        short.push_str("...");
        short
    } else {
        text.to_string()
    };

    truncated.replace("\r\n", "↵").replace(['\n', '\r'], "↵")
}
