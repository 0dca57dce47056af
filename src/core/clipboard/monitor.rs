use super::state::ClipboardState;
use crate::shared::emit::emit_event;
use crate::shared::events::AppEvent;
use crate::shared::settings::MonitorSettings;
use crate::shared::types::ClipboardChange;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// Consecutive read failures are logged on the first one and then every
/// this many.
const ERROR_LOG_EVERY: u32 = 10;

/// Clipboard monitor that polls for changes
#[derive(Clone)]
pub struct ClipboardMonitor {
    enabled: Arc<AtomicBool>,
    state: ClipboardState,
    poll_interval: Duration,
    error_backoff: Duration,
}

/// Owned handle to a running monitor task
pub struct MonitorHandle {
    stop: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Ask the loop to exit at its next tick and wait for it
    pub async fn stop(self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Err(e) = self.task.await {
            tracing::error!("[ClipboardMonitor] Monitor task failed: {}", e);
        }
        tracing::info!("[ClipboardMonitor] Stopped");
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl ClipboardMonitor {
    /// Create a new clipboard monitor
    pub fn new(state: ClipboardState, settings: &MonitorSettings) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
            state,
            poll_interval: settings.poll_interval(),
            error_backoff: settings.error_backoff(),
        }
    }

    /// Start monitoring clipboard changes on the current tokio runtime
    pub fn start(&self) -> MonitorHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(poll_loop(
            Arc::clone(&stop),
            Arc::clone(&self.enabled),
            self.state.clone(),
            self.poll_interval,
            self.error_backoff,
        ));
        MonitorHandle { stop, task }
    }

    /// Enable clipboard monitoring
    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Disable clipboard monitoring
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Check if monitoring is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Toggle monitoring on/off, returning the new state
    pub fn toggle(&self) -> bool {
        let new_state = !self.enabled.fetch_xor(true, Ordering::SeqCst);
        tracing::info!("[ClipboardMonitor] Toggled to {}", new_state);
        emit_event(self.state.events(), AppEvent::MonitorStateChanged(new_state));
        new_state
    }

    fn set_enabled(&self, enabled: bool) {
        let was = self.enabled.swap(enabled, Ordering::SeqCst);
        if was != enabled {
            tracing::info!("[ClipboardMonitor] {}", if enabled { "Enabled" } else { "Disabled" });
            emit_event(self.state.events(), AppEvent::MonitorStateChanged(enabled));
        }
    }
}

async fn poll_loop(
    stop: Arc<AtomicBool>,
    enabled: Arc<AtomicBool>,
    state: ClipboardState,
    poll_interval: Duration,
    error_backoff: Duration,
) {
    let backend = state.backend();
    // None until the first successful read, which becomes the baseline
    let mut last_content: Option<String> = None;

    tracing::info!("[ClipboardMonitor] Started monitoring");
    let mut consecutive_errors = 0u32;

    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }

        if !enabled.load(Ordering::SeqCst) {
            consecutive_errors = 0;
            sleep(poll_interval).await;
            continue;
        }

        let sleep_interval = match backend.read_text() {
            Ok(current) => {
                consecutive_errors = 0;

                match last_content.as_deref() {
                    None => {
                        tracing::debug!("[ClipboardMonitor] Baseline clipboard content read");
                        state.seed_active(Some(current.clone()));
                        last_content = Some(current);
                    }
                    Some(last) if last != current => {
                        tracing::debug!("[ClipboardMonitor] Detected clipboard change");
                        let previous = last_content.replace(current.clone());
                        state.record_external_change(&ClipboardChange::new(current, previous));
                    }
                    Some(_) => {}
                }
                poll_interval
            }
            Err(e) => {
                consecutive_errors += 1;
                if consecutive_errors == 1 || consecutive_errors % ERROR_LOG_EVERY == 0 {
                    tracing::warn!(
                        "[ClipboardMonitor] Failed to read clipboard (error #{}): {}",
                        consecutive_errors,
                        e
                    );
                }
                error_backoff
            }
        };

        // Single sleep point that respects backoff
        sleep(sleep_interval).await;
    }
}
