//! Command modules for the renderer
//!
//! Each submodule exposes plain functions the console (or any other
//! renderer) calls into. They never touch the clipboard directly; every
//! mutation goes through `ClipboardState`.
//!
//! - `clipboard`: History listing, restore and clear
//! - `monitor`: Pause/resume of the clipboard watcher
//! - `settings`: Settings persistence

pub mod clipboard;
pub mod monitor;
pub mod settings;
