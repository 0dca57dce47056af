use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clipboard_history_lib::api::commands::settings::get_settings;
use clipboard_history_lib::shared::settings::{AppSettings, SettingsOverrides};
use clipboard_history_lib::ui::OutputFormat;

/// Command line interface for the clipboard history
#[derive(Debug, Parser)]
#[command(
    name = "clipboard-history",
    about = "Watch the clipboard and restore recently copied text",
    long_about = "Keeps a bounded, de-duplicated history of text copied to the system clipboard. Type an entry's number to put it back on the clipboard."
)]
struct Args {
    /// Number of entries to keep
    #[arg(long)]
    capacity: Option<usize>,

    /// Clipboard polling period in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Wait after a failed clipboard read, in milliseconds
    #[arg(long)]
    error_backoff_ms: Option<u64>,

    /// Characters shown per history row
    #[arg(long)]
    preview_chars: Option<usize>,

    /// Output format for history and events
    #[arg(long, default_value = "human", value_enum)]
    format: OutputFormat,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbosity level for logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            capacity: self.capacity,
            poll_interval_ms: self.poll_interval_ms,
            error_backoff_ms: self.error_backoff_ms,
            preview_chars: self.preview_chars,
        }
    }
}

/// Logs go to stderr; stdout belongs to the renderer.
fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(args.verbose > 1)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args);

    let overrides = args.overrides();
    let settings = match get_settings(args.config.as_deref(), &overrides).await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("[Settings] Failed to load settings: {}, using defaults", e);
            AppSettings::default()
                .with_overrides(&overrides)
                .context("Invalid command line settings")?
        }
    };

    clipboard_history_lib::run(settings, args.config, args.format).await;
    Ok(())
}
