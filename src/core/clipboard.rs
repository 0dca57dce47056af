//! Clipboard module
//!
//! Provides clipboard history tracking and monitoring functionality.
//!
//! - `backend`: System and in-memory clipboard access
//! - `history`: Most-recently-used history with deduplication and capacity limits
//! - `state`: Synchronized entry point for every history mutation
//! - `monitor`: Background task that polls the clipboard for changes

pub mod backend;
pub mod history;
pub mod monitor;
pub mod state;

pub use backend::{ClipboardBackend, MemoryClipboard, SystemClipboard};
pub use history::{ClipboardHistory, RecordOutcome};
pub use monitor::{ClipboardMonitor, MonitorHandle};
pub use state::ClipboardState;
