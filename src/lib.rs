pub mod api;
pub mod core;
pub mod shared;
pub mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::clipboard::{ClipboardBackend, ClipboardMonitor, ClipboardState, SystemClipboard};
use crate::shared::emit::EventEmitter;
use crate::shared::settings::AppSettings;
use crate::ui::{Console, OutputFormat, Renderer};

/// Wire the clipboard state, watcher and console together and run until
/// the user quits.
pub async fn run(settings: AppSettings, settings_path: Option<PathBuf>, format: OutputFormat) {
    let (events, event_rx) = EventEmitter::channel();
    let backend: Arc<dyn ClipboardBackend> = Arc::new(SystemClipboard::new());

    // Initialize clipboard history and monitor
    let clipboard_state = ClipboardState::new(settings.history.capacity, backend, events);
    let clipboard_monitor = ClipboardMonitor::new(clipboard_state.clone(), &settings.monitor);

    let monitor_handle = clipboard_monitor.start();
    tracing::info!(
        "Clipboard monitoring started (capacity {}, every {} ms)",
        settings.history.capacity,
        settings.monitor.poll_interval_ms
    );

    let renderer = Renderer::new(format, settings.display.preview_chars);
    Console::new(clipboard_state, clipboard_monitor, renderer, settings, settings_path)
        .run(event_rx)
        .await;

    monitor_handle.stop().await;
}
