//! Clipboard history command module

use crate::core::clipboard::ClipboardState;
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::ClipboardHistoryItem;

/// All entries, most recent first
pub fn get_clipboard_history(state: &ClipboardState) -> Vec<ClipboardHistoryItem> {
    state.items()
}

/// One entry by index (0 = most recent)
pub fn get_clipboard_item(state: &ClipboardState, index: usize) -> CommandResult<ClipboardHistoryItem> {
    state.get_item(index).ok_or(CommandError::IndexOutOfRange {
        index,
        len: state.count(),
    })
}

/// The value currently considered on the clipboard
pub fn get_active_clipboard(state: &ClipboardState) -> Option<String> {
    state.active()
}

/// Put the entry at `index` back on the clipboard
pub fn restore_clipboard_item(state: &ClipboardState, index: usize) -> CommandResult<String> {
    state.restore(index)
}

/// Drop every entry
pub fn clear_clipboard_history(state: &ClipboardState) {
    state.clear();
}
