use crate::shared::types::ClipboardHistoryItem;
use crate::shared::errors::{CommandError, CommandResult};

/// Default number of clipboard items to keep
pub const DEFAULT_HISTORY_SIZE: usize = 10;

/// What a recorded change did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Ghost copy from our own restore; only the active value moved
    Suppressed,
    /// New entry at the front of the history
    Inserted,
    /// Empty or already present; only the active value moved
    ActiveOnly,
}

impl RecordOutcome {
    pub fn history_changed(self) -> bool {
        matches!(self, RecordOutcome::Inserted)
    }
}

/// Bookkeeping a restore changed, kept so a failed write can be undone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSnapshot {
    active: Option<String>,
    suppress_next: bool,
}

/// Most-recently-used clipboard history.
///
/// Entries are unique by content and ordered newest first. The active value
/// is tracked apart from the entries so restoring never reorders them.
/// `observed` is the last value the watcher reported; the ghost-copy flag is
/// armed exactly when a restore leaves the clipboard different from it.
/// Not synchronized; `ClipboardState` owns it behind a mutex.
#[derive(Debug, Clone)]
pub struct ClipboardHistory {
    items: Vec<ClipboardHistoryItem>,
    capacity: usize,
    active: Option<String>,
    observed: Option<String>,
    suppress_next: bool,
}

impl ClipboardHistory {
    /// Create an empty history. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            active: None,
            observed: None,
            suppress_next: false,
        }
    }

    /// Apply a clipboard change reported by the watcher
    pub fn record_external_change(&mut self, value: &str) -> RecordOutcome {
        self.observed = Some(value.to_string());

        if self.suppress_next {
            self.suppress_next = false;
            self.active = Some(value.to_string());
            return RecordOutcome::Suppressed;
        }

        self.active = Some(value.to_string());

        if value.is_empty() || self.contains(value) {
            return RecordOutcome::ActiveOnly;
        }

        self.items.insert(0, ClipboardHistoryItem::new_text(value.to_string()));
        self.items.truncate(self.capacity);
        RecordOutcome::Inserted
    }

    /// Make the entry at `index` active and arm suppression for the write
    /// that follows. Returns the value to write.
    ///
    /// Suppression is armed only when the value differs from the last one
    /// the watcher observed. Writing that value back produces no change for
    /// the watcher to consume, so it also disarms a flag an earlier restore
    /// left pending.
    pub fn restore(&mut self, index: usize) -> CommandResult<String> {
        let value = self
            .items
            .get(index)
            .map(|item| item.content.clone())
            .ok_or(CommandError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })?;

        self.suppress_next = self.observed.as_deref() != Some(value.as_str());
        self.active = Some(value.clone());
        Ok(value)
    }

    /// State to hand back to `abort_restore` if the write fails
    pub fn restore_snapshot(&self) -> RestoreSnapshot {
        RestoreSnapshot {
            active: self.active.clone(),
            suppress_next: self.suppress_next,
        }
    }

    /// Undo the bookkeeping of a restore whose clipboard write failed
    pub fn abort_restore(&mut self, snapshot: RestoreSnapshot) {
        self.suppress_next = snapshot.suppress_next;
        self.active = snapshot.active;
    }

    /// Remove every entry; the active value is kept
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Take the watcher's baseline as both observed and active value,
    /// without touching the entries
    pub fn seed_active(&mut self, value: Option<String>) {
        self.observed = value.clone();
        self.active = value;
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item.content == value)
    }

    pub fn get(&self, index: usize) -> Option<&ClipboardHistoryItem> {
        self.items.get(index)
    }

    /// Snapshot of all entries, most recent first
    pub fn items(&self) -> Vec<ClipboardHistoryItem> {
        self.items.clone()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_suppressing(&self) -> bool {
        self.suppress_next
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn observed(&self) -> Option<&str> {
        self.observed.as_deref()
    }
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}
