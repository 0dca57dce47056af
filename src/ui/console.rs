//! Line-oriented foreground loop
//!
//! Reads commands from stdin on a dedicated thread and renders state
//! notifications. All printing happens on this task; the watcher only ever
//! sends events.

use std::io::BufRead;
use std::path::PathBuf;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::api::commands::{clipboard, monitor, settings};
use crate::core::clipboard::{ClipboardMonitor, ClipboardState};
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::events::AppEvent;
use crate::shared::settings::AppSettings;
use crate::ui::render::Renderer;

pub const HELP: &str = "\
Commands:
  list | ls          show the history
  show N             show entry N in full
  restore N | N      copy entry N back to the clipboard
  clear              empty the history
  pause | resume     stop/start watching the clipboard
  toggle             flip watching on/off
  save               store the current settings as defaults
  help               this text
  quit | exit        leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Show(usize),
    Restore(usize),
    Clear,
    Pause,
    Resume,
    Toggle,
    Save,
    Help,
    Quit,
    Nothing,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> CommandResult<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(ConsoleCommand::Nothing);
        };
        let arg = words.next();
        if words.next().is_some() {
            return Err(CommandError::InvalidInput(format!("too many arguments: {}", line.trim())));
        }

        let command = match (head.to_lowercase().as_str(), arg) {
            ("list" | "ls", None) => ConsoleCommand::List,
            ("show", Some(n)) => ConsoleCommand::Show(parse_index(n)?),
            ("restore" | "r", Some(n)) => ConsoleCommand::Restore(parse_index(n)?),
            ("clear", None) => ConsoleCommand::Clear,
            ("pause", None) => ConsoleCommand::Pause,
            ("resume", None) => ConsoleCommand::Resume,
            ("toggle", None) => ConsoleCommand::Toggle,
            ("save", None) => ConsoleCommand::Save,
            ("help" | "?", None) => ConsoleCommand::Help,
            ("quit" | "exit" | "q", None) => ConsoleCommand::Quit,
            (n, None) if n.chars().all(|c| c.is_ascii_digit()) => ConsoleCommand::Restore(parse_index(n)?),
            ("show" | "restore" | "r", None) => {
                return Err(CommandError::InvalidInput(format!("{} needs an index", head)))
            }
            _ => return Err(CommandError::InvalidInput(format!("unknown command: {}", line.trim()))),
        };
        Ok(command)
    }
}

fn parse_index(text: &str) -> CommandResult<usize> {
    text.parse()
        .map_err(|_| CommandError::InvalidInput(format!("not an index: {}", text)))
}

/// Foreground side of the application
pub struct Console {
    state: ClipboardState,
    monitor: ClipboardMonitor,
    renderer: Renderer,
    settings: AppSettings,
    settings_path: Option<PathBuf>,
}

impl Console {
    pub fn new(
        state: ClipboardState,
        monitor: ClipboardMonitor,
        renderer: Renderer,
        settings: AppSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self {
            state,
            monitor,
            renderer,
            settings,
            settings_path,
        }
    }

    /// Run one command. Returns the text to print and whether to keep going.
    pub async fn execute(&self, command: ConsoleCommand) -> (Option<String>, bool) {
        let renderer = &self.renderer;
        let output = match command {
            ConsoleCommand::Nothing => None,
            ConsoleCommand::Quit => return (None, false),
            ConsoleCommand::Help => Some(renderer.render_message(HELP)),
            ConsoleCommand::List => Some(renderer.render_history(&clipboard::get_clipboard_history(&self.state))),
            ConsoleCommand::Show(index) => Some(match clipboard::get_clipboard_item(&self.state, index) {
                Ok(item) => renderer.render_entry(index, &item),
                Err(e) => renderer.render_error(&e),
            }),
            // Success is reported by the ActiveChanged event
            ConsoleCommand::Restore(index) => clipboard::restore_clipboard_item(&self.state, index)
                .err()
                .map(|e| renderer.render_error(&e)),
            ConsoleCommand::Clear => {
                clipboard::clear_clipboard_history(&self.state);
                None
            }
            ConsoleCommand::Pause => {
                monitor::pause_clipboard_monitor(&self.monitor);
                None
            }
            ConsoleCommand::Resume => {
                monitor::resume_clipboard_monitor(&self.monitor);
                None
            }
            ConsoleCommand::Toggle => {
                monitor::toggle_clipboard_monitor(&self.monitor);
                None
            }
            ConsoleCommand::Save => Some(
                match settings::save_settings(&self.settings, self.settings_path.as_deref()).await {
                    Ok(()) => renderer.render_message("Settings saved"),
                    Err(e) => renderer.render_error(&e),
                },
            ),
        };
        (output, true)
    }

    /// Drive the loop until `quit`, end of input or Ctrl-C
    pub async fn run(self, mut events: UnboundedReceiver<AppEvent>) {
        let mut lines = spawn_stdin_reader();

        println!("{}", self.renderer.render_history(&self.state.items()));

        loop {
            tokio::select! {
                Some(event) = events.recv() => {
                    println!("{}", self.renderer.render_event(&event));
                }
                line = lines.recv() => {
                    let Some(line) = line else {
                        tracing::debug!("[Console] Input closed");
                        break;
                    };
                    let (output, keep_going) = match ConsoleCommand::parse(&line) {
                        Ok(command) => self.execute(command).await,
                        Err(e) => (Some(self.renderer.render_error(&e)), true),
                    };
                    if let Some(output) = output {
                        println!("{}", output);
                    }
                    if !keep_going {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("[Console] Interrupted");
                    break;
                }
            }
        }
    }
}

/// Blocking stdin reads run on a detached thread; shutdown never waits on them.
fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("[Console] Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}
