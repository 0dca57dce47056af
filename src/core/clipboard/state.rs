use std::sync::{Arc, Mutex, MutexGuard};
use crate::core::clipboard::backend::ClipboardBackend;
use crate::core::clipboard::history::{ClipboardHistory, RecordOutcome};
use crate::shared::emit::{emit_event, EventEmitter};
use crate::shared::errors::CommandResult;
use crate::shared::events::AppEvent;
use crate::shared::types::{preview_text, ClipboardChange, ClipboardHistoryItem};

const LOG_PREVIEW_CHARS: usize = 20;

/// Thread-safe clipboard state
///
/// The single entry point for every history mutation. The watcher and the
/// foreground commands both go through here, so all changes to the entries,
/// the active value and the ghost-copy flag happen under one lock.
#[derive(Clone)]
pub struct ClipboardState {
    history: Arc<Mutex<ClipboardHistory>>,
    backend: Arc<dyn ClipboardBackend>,
    events: EventEmitter,
}

impl ClipboardState {
    pub fn new(capacity: usize, backend: Arc<dyn ClipboardBackend>, events: EventEmitter) -> Self {
        Self {
            history: Arc::new(Mutex::new(ClipboardHistory::new(capacity))),
            backend,
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClipboardHistory> {
        match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("[ClipboardState] Mutex poisoned, recovering...");
                poisoned.into_inner()
            }
        }
    }

    pub fn backend(&self) -> Arc<dyn ClipboardBackend> {
        Arc::clone(&self.backend)
    }

    /// Seed the active value with the watcher's first successful read
    pub fn seed_active(&self, value: Option<String>) {
        self.lock().seed_active(value.clone());
        emit_event(&self.events, AppEvent::ActiveChanged(value));
    }

    /// Apply a change the watcher observed
    pub fn record_external_change(&self, change: &ClipboardChange) -> RecordOutcome {
        let (outcome, snapshot) = {
            let mut history = self.lock();
            let outcome = history.record_external_change(&change.current);
            let snapshot = outcome.history_changed().then(|| history.items());
            (outcome, snapshot)
        };

        match outcome {
            RecordOutcome::Suppressed => {
                tracing::debug!("[ClipboardState] Ghost copy detected and ignored");
            }
            RecordOutcome::Inserted => {
                tracing::info!("[ClipboardState] Recorded new entry");
                tracing::debug!(
                    "[ClipboardState] \"{}\" replaced \"{}\"",
                    preview_text(&change.current, LOG_PREVIEW_CHARS),
                    change
                        .previous
                        .as_deref()
                        .map(|previous| preview_text(previous, LOG_PREVIEW_CHARS))
                        .unwrap_or_default()
                );
            }
            RecordOutcome::ActiveOnly => {
                tracing::debug!("[ClipboardState] Empty or known value, history unchanged");
            }
        }

        if let Some(items) = snapshot {
            emit_event(&self.events, AppEvent::HistoryChanged(items));
        }
        emit_event(&self.events, AppEvent::ActiveChanged(Some(change.current.clone())));
        outcome
    }

    /// Write the entry at `index` back to the clipboard.
    ///
    /// The lock is held across the write so the watcher cannot record
    /// between arming the ghost-copy flag and the value landing.
    pub fn restore(&self, index: usize) -> CommandResult<String> {
        let value = {
            let mut history = self.lock();
            let snapshot = history.restore_snapshot();
            let value = history.restore(index)?;

            if let Err(e) = self.backend.write_text(&value) {
                tracing::error!("[ClipboardState] Failed to restore entry {}: {}", index, e);
                history.abort_restore(snapshot);
                return Err(e);
            }
            value
        };

        tracing::info!("[ClipboardState] Restored entry {}", index);
        tracing::debug!("[ClipboardState] Restored \"{}\"", preview_text(&value, LOG_PREVIEW_CHARS));
        emit_event(&self.events, AppEvent::ActiveChanged(Some(value.clone())));
        Ok(value)
    }

    /// Empty the history; the active value stays
    pub fn clear(&self) {
        self.lock().clear();
        tracing::info!("[ClipboardState] Cleared history");
        emit_event(&self.events, AppEvent::HistoryChanged(Vec::new()));
    }

    pub fn items(&self) -> Vec<ClipboardHistoryItem> {
        self.lock().items()
    }

    pub fn get_item(&self, index: usize) -> Option<ClipboardHistoryItem> {
        self.lock().get(index).cloned()
    }

    pub fn active(&self) -> Option<String> {
        self.lock().active().map(str::to_string)
    }

    pub fn is_suppressing(&self) -> bool {
        self.lock().is_suppressing()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn events(&self) -> &EventEmitter {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::backend::MemoryClipboard;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn setup(capacity: usize) -> (ClipboardState, Arc<MemoryClipboard>, UnboundedReceiver<AppEvent>) {
        let clipboard = Arc::new(MemoryClipboard::new());
        let (events, rx) = EventEmitter::channel();
        let state = ClipboardState::new(capacity, clipboard.clone(), events);
        (state, clipboard, rx)
    }

    fn change(current: &str, previous: Option<&str>) -> ClipboardChange {
        ClipboardChange::new(current.to_string(), previous.map(str::to_string))
    }

    fn drain(rx: &mut UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_record_emits_history_and_active() {
        let (state, _clipboard, mut rx) = setup(5);
        state.record_external_change(&change("a", None));

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], AppEvent::HistoryChanged(items) if items.len() == 1 && items[0].content == "a"));
        assert!(matches!(&events[1], AppEvent::ActiveChanged(Some(v)) if v == "a"));
    }

    #[test]
    fn test_duplicate_emits_only_active() {
        let (state, _clipboard, mut rx) = setup(5);
        state.record_external_change(&change("a", None));
        state.record_external_change(&change("b", Some("a")));
        drain(&mut rx);

        state.record_external_change(&change("a", Some("b")));
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], AppEvent::ActiveChanged(Some(v)) if v == "a"));
        assert_eq!(state.count(), 2);
    }

    #[test]
    fn test_restore_writes_to_clipboard() {
        let (state, clipboard, mut rx) = setup(5);
        state.record_external_change(&change("y", None));
        state.record_external_change(&change("x", Some("y")));
        drain(&mut rx);

        let value = state.restore(1).unwrap();
        assert_eq!(value, "y");
        assert_eq!(clipboard.writes(), vec!["y".to_string()]);
        assert_eq!(state.active().as_deref(), Some("y"));
        assert!(state.is_suppressing());

        let events = drain(&mut rx);
        assert!(matches!(&events[..], [AppEvent::ActiveChanged(Some(v))] if v == "y"));

        // The watcher observing our write consumes the flag
        let outcome = state.record_external_change(&change("y", Some("x")));
        assert_eq!(outcome, RecordOutcome::Suppressed);
        assert!(!state.is_suppressing());
        let contents: Vec<String> = state.items().into_iter().map(|i| i.content).collect();
        assert_eq!(contents, vec!["x", "y"]);
    }

    #[test]
    fn test_restore_out_of_range_leaves_clipboard() {
        let (state, clipboard, _rx) = setup(5);
        state.record_external_change(&change("only", None));
        assert!(state.restore(3).is_err());
        assert!(clipboard.writes().is_empty());
        assert!(!state.is_suppressing());
    }

    #[test]
    fn test_failed_write_disarms_suppression() {
        let (state, clipboard, _rx) = setup(5);
        state.record_external_change(&change("a", None));
        state.record_external_change(&change("b", Some("a")));
        clipboard.set_fail_writes(true);

        assert!(state.restore(1).is_err());
        assert!(!state.is_suppressing());
        assert_eq!(state.active().as_deref(), Some("b"));

        // Next genuine copy still lands in history
        assert_eq!(state.record_external_change(&change("c", Some("b"))), RecordOutcome::Inserted);
    }

    #[test]
    fn test_restore_twice_back_to_observed_value() {
        let (state, clipboard, _rx) = setup(5);
        state.record_external_change(&change("y", None));
        state.record_external_change(&change("x", Some("y")));

        state.restore(1).unwrap();
        state.restore(0).unwrap();
        assert_eq!(clipboard.current(), "x");
        assert!(!state.is_suppressing());

        let outcome = state.record_external_change(&change("genuine", Some("x")));
        assert_eq!(outcome, RecordOutcome::Inserted);
    }

    #[test]
    fn test_failed_write_keeps_pending_suppression() {
        let (state, clipboard, _rx) = setup(5);
        state.record_external_change(&change("a", None));
        state.record_external_change(&change("b", Some("a")));
        state.record_external_change(&change("c", Some("b")));

        // "b" is written but not yet observed
        state.restore(1).unwrap();
        clipboard.set_fail_writes(true);
        assert!(state.restore(2).is_err());

        assert!(state.is_suppressing());
        assert_eq!(state.active().as_deref(), Some("b"));
        assert_eq!(clipboard.current(), "b");

        let outcome = state.record_external_change(&change("b", Some("c")));
        assert_eq!(outcome, RecordOutcome::Suppressed);
    }

    #[test]
    fn test_clear_emits_empty_snapshot() {
        let (state, _clipboard, mut rx) = setup(5);
        state.record_external_change(&change("a", None));
        drain(&mut rx);

        state.clear();
        assert_eq!(state.count(), 0);
        assert_eq!(state.active().as_deref(), Some("a"));
        let events = drain(&mut rx);
        assert!(matches!(&events[..], [AppEvent::HistoryChanged(items)] if items.is_empty()));
    }

    #[test]
    fn test_concurrent_records_keep_invariants() {
        let (state, _clipboard, _rx) = setup(4);
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let state = state.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let value = format!("v{}", (t * 7 + i) % 12);
                        state.record_external_change(&ClipboardChange::new(value, None));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let items = state.items();
        assert!(items.len() <= 4);
        let mut contents: Vec<String> = items.into_iter().map(|i| i.content).collect();
        contents.sort();
        contents.dedup();
        assert_eq!(contents.len(), state.count());
    }
}
