use serde::{Deserialize, Serialize};
use tokio::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use crate::shared::errors::{CommandError, CommandResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    pub history: HistorySettings,
    pub monitor: MonitorSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of entries kept
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub poll_interval_ms: u64,
    /// Sleep after a failed clipboard read
    pub error_backoff_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub preview_chars: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            error_backoff_ms: 1000,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { preview_chars: 50 }
    }
}

impl MonitorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(self.error_backoff_ms)
    }
}

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub capacity: Option<usize>,
    pub poll_interval_ms: Option<u64>,
    pub error_backoff_ms: Option<u64>,
    pub preview_chars: Option<usize>,
}

impl AppSettings {
    pub fn get_settings_path() -> CommandResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "clipboard-history")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| CommandError::SystemIO("Failed to determine config directory".to_string()))
    }

    /// Load settings from the platform config directory
    pub async fn load() -> CommandResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    /// Load settings from `path`, writing defaults there if it does not exist
    pub async fn load_from(path: &Path) -> CommandResult<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path).await?;
            tracing::info!("[Settings] Wrote default settings to {}", path.display());
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await
            .map_err(|e| CommandError::SystemIO(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| CommandError::InvalidInput(format!("Failed to parse settings: {}", e)))?;

        settings.validate()?;
        tracing::debug!("[Settings] Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to `path` as pretty JSON
    pub async fn save_to(&self, path: &Path) -> CommandResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await
                .map_err(|e| CommandError::SystemIO(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content).await
            .map_err(|e| CommandError::SystemIO(format!("Failed to write settings file: {}", e)))
    }

    /// Apply command line overrides and re-validate
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> CommandResult<Self> {
        if let Some(capacity) = overrides.capacity {
            self.history.capacity = capacity;
        }
        if let Some(ms) = overrides.poll_interval_ms {
            self.monitor.poll_interval_ms = ms;
        }
        if let Some(ms) = overrides.error_backoff_ms {
            self.monitor.error_backoff_ms = ms;
        }
        if let Some(chars) = overrides.preview_chars {
            self.display.preview_chars = chars;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> CommandResult<()> {
        if self.history.capacity == 0 {
            return Err(CommandError::InvalidInput("history capacity must be at least 1".to_string()));
        }
        if self.monitor.poll_interval_ms == 0 || self.monitor.error_backoff_ms == 0 {
            return Err(CommandError::InvalidInput("monitor intervals must be non-zero".to_string()));
        }
        // Room for at least one character plus the ellipsis
        if self.display.preview_chars < 4 {
            return Err(CommandError::InvalidInput("preview_chars must be at least 4".to_string()));
        }
        Ok(())
    }
}
