//! Declarative text rendering of history snapshots
//!
//! Every function takes an immutable snapshot and returns the full text to
//! print; nothing is patched in place.

use crate::shared::errors::CommandError;
use crate::shared::events::AppEvent;
use crate::shared::types::{preview_text, ClipboardHistoryItem};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Numbered rows for people
    Human,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    preview_chars: usize,
}

impl Renderer {
    pub fn new(format: OutputFormat, preview_chars: usize) -> Self {
        Self { format, preview_chars }
    }

    /// Render a notification from the clipboard state
    pub fn render_event(&self, event: &AppEvent) -> String {
        if self.format == OutputFormat::Json {
            return to_json_line(event);
        }

        match event {
            AppEvent::HistoryChanged(items) => self.render_history(items),
            AppEvent::ActiveChanged(Some(value)) => {
                format!("Active: {}", preview_text(value, self.preview_chars))
            }
            AppEvent::ActiveChanged(None) => "Active: (nothing)".to_string(),
            AppEvent::MonitorStateChanged(true) => "Monitoring resumed".to_string(),
            AppEvent::MonitorStateChanged(false) => "Monitoring paused".to_string(),
        }
    }

    /// The whole list, one row per entry
    pub fn render_history(&self, items: &[ClipboardHistoryItem]) -> String {
        if self.format == OutputFormat::Json {
            return to_json_line(&AppEvent::HistoryChanged(items.to_vec()));
        }

        if items.is_empty() {
            return "(Clipboard history is empty)".to_string();
        }

        let mut out = String::from("Clipboard History");
        for (index, item) in items.iter().enumerate() {
            out.push_str(&format!("\n[{}] {}", index, preview_text(&item.content, self.preview_chars)));
        }
        out
    }

    /// One entry in full, line breaks preserved
    pub fn render_entry(&self, index: usize, item: &ClipboardHistoryItem) -> String {
        if self.format == OutputFormat::Json {
            return to_json_line(item);
        }

        format!(
            "[{}] copied {} ({} chars, {} lines)\n{}",
            index,
            item.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            item.char_count(),
            item.line_count(),
            item.content
        )
    }

    pub fn render_error(&self, error: &CommandError) -> String {
        match self.format {
            OutputFormat::Json => to_json_line(&ErrorLine { error }),
            OutputFormat::Human => format!("Error: {}", error),
        }
    }

    pub fn render_message(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Json => to_json_line(&MessageLine { message }),
            OutputFormat::Human => message.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorLine<'a> {
    error: &'a CommandError,
}

#[derive(Serialize)]
struct MessageLine<'a> {
    message: &'a str,
}

fn to_json_line<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::error!("[Renderer] Failed to serialize output: {}", e);
        String::from("{}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<ClipboardHistoryItem> {
        values.iter().map(|v| ClipboardHistoryItem::new_text(v.to_string())).collect()
    }

    #[test]
    fn test_empty_history() {
        let renderer = Renderer::new(OutputFormat::Human, 50);
        assert_eq!(renderer.render_history(&[]), "(Clipboard history is empty)");
    }

    #[test]
    fn test_rows_are_numbered_from_zero() {
        let renderer = Renderer::new(OutputFormat::Human, 50);
        let text = renderer.render_history(&items(&["newest", "multi\nline"]));
        assert_eq!(text, "Clipboard History\n[0] newest\n[1] multi↵line");
    }

    #[test]
    fn test_long_rows_truncated() {
        let renderer = Renderer::new(OutputFormat::Human, 10);
        let text = renderer.render_history(&items(&["abcdefghijklmnop"]));
        assert!(text.ends_with("[0] abcdefg..."));
    }

    #[test]
    fn test_entry_shows_full_content() {
        let renderer = Renderer::new(OutputFormat::Human, 10);
        let item = ClipboardHistoryItem::new_text("first line\nsecond line".to_string());
        let text = renderer.render_entry(2, &item);
        assert!(text.starts_with("[2] copied "));
        assert!(text.contains("(22 chars, 2 lines)"));
        assert!(text.ends_with("first line\nsecond line"));
    }

    #[test]
    fn test_human_events() {
        let renderer = Renderer::new(OutputFormat::Human, 50);
        assert_eq!(renderer.render_event(&AppEvent::ActiveChanged(Some("a\nb".to_string()))), "Active: a↵b");
        assert_eq!(renderer.render_event(&AppEvent::MonitorStateChanged(false)), "Monitoring paused");
    }

    #[test]
    fn test_json_event_is_single_line() {
        let renderer = Renderer::new(OutputFormat::Json, 50);
        let line = renderer.render_event(&AppEvent::HistoryChanged(items(&["a\nb"])));
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["event"], "clipboard://history-changed");
        assert_eq!(value["payload"][0]["content"], "a\nb");
    }

    #[test]
    fn test_json_error() {
        let renderer = Renderer::new(OutputFormat::Json, 50);
        let line = renderer.render_error(&CommandError::IndexOutOfRange { index: 9, len: 1 });
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["error"]["type"], "IndexOutOfRange");
        assert_eq!(value["error"]["message"]["index"], 9);
    }
}
