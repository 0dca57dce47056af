//! Console renderer
//!
//! - `render`: snapshot to text (human rows or JSON lines)
//! - `console`: stdin command loop and event printing

pub mod console;
pub mod render;

pub use console::{Console, ConsoleCommand};
pub use render::{OutputFormat, Renderer};
