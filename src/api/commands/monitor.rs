//! Clipboard watcher command module

use crate::core::clipboard::ClipboardMonitor;

pub fn pause_clipboard_monitor(monitor: &ClipboardMonitor) -> bool {
    monitor.disable();
    monitor.is_enabled()
}

pub fn resume_clipboard_monitor(monitor: &ClipboardMonitor) -> bool {
    monitor.enable();
    monitor.is_enabled()
}

pub fn toggle_clipboard_monitor(monitor: &ClipboardMonitor) -> bool {
    monitor.toggle()
}
