use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use super::events::AppEvent;

/// Sending half of the notification channel.
///
/// Cloned into every component that mutates state; the foreground task
/// owns the receiver.
#[derive(Debug, Clone)]
pub struct EventEmitter {
    tx: UnboundedSender<AppEvent>,
}

impl EventEmitter {
    /// Create an emitter and the receiver the renderer drains
    pub fn channel() -> (Self, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

/// Emit an application event to the renderer
pub fn emit_event(emitter: &EventEmitter, event: AppEvent) {
    let name = match &event {
        AppEvent::HistoryChanged(_) => "clipboard://history-changed",
        AppEvent::ActiveChanged(_) => "clipboard://active-changed",
        AppEvent::MonitorStateChanged(_) => "monitor://state-changed",
    };

    // A closed receiver only happens during shutdown
    if let Err(e) = emitter.tx.send(event) {
        tracing::debug!("Failed to emit {}: {}", name, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_delivers_in_order() {
        let (emitter, mut rx) = EventEmitter::channel();
        emit_event(&emitter, AppEvent::ActiveChanged(Some("a".to_string())));
        emit_event(&emitter, AppEvent::MonitorStateChanged(false));

        assert!(matches!(rx.try_recv(), Ok(AppEvent::ActiveChanged(Some(v))) if v == "a"));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::MonitorStateChanged(false))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_emit_after_receiver_dropped_does_not_panic() {
        let (emitter, rx) = EventEmitter::channel();
        drop(rx);
        emit_event(&emitter, AppEvent::HistoryChanged(Vec::new()));
    }
}
