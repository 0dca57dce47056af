use serde::{Serialize, Deserialize};
use super::types::ClipboardHistoryItem;

/// Notifications for the renderer.
///
/// Produced by the clipboard state on every mutation and delivered over a
/// channel, so the watcher never renders directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier renderer parsing
pub enum AppEvent {
    /// Full snapshot of the history, most recent first
    #[serde(rename = "clipboard://history-changed")]
    HistoryChanged(Vec<ClipboardHistoryItem>),

    /// The value now considered on the clipboard
    #[serde(rename = "clipboard://active-changed")]
    ActiveChanged(Option<String>),

    /// Watcher enabled/disabled
    #[serde(rename = "monitor://state-changed")]
    MonitorStateChanged(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_tagging() {
        let event = AppEvent::ActiveChanged(Some("hello".to_string()));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "clipboard://active-changed");
        assert_eq!(json["payload"], "hello");
    }

    #[test]
    fn test_history_event_round_trips() {
        let event = AppEvent::HistoryChanged(vec![ClipboardHistoryItem::new_text("a".to_string())]);
        let json = serde_json::to_string(&event).unwrap();
        match serde_json::from_str::<AppEvent>(&json).unwrap() {
            AppEvent::HistoryChanged(items) => assert_eq!(items[0].content, "a"),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
