//! Settings command module
//!
//! Handles application settings persistence.

use std::path::Path;
use crate::shared::settings::{AppSettings, SettingsOverrides};
use crate::shared::errors::CommandResult;

/// Load settings from `path`, or the platform config directory when `None`,
/// then apply command line overrides
pub async fn get_settings(path: Option<&Path>, overrides: &SettingsOverrides) -> CommandResult<AppSettings> {
    let settings = match path {
        Some(path) => AppSettings::load_from(path).await?,
        None => AppSettings::load().await?,
    };
    settings.with_overrides(overrides)
}

/// Save application settings
pub async fn save_settings(settings: &AppSettings, path: Option<&Path>) -> CommandResult<()> {
    settings.validate()?;
    match path {
        Some(path) => settings.save_to(path).await,
        None => settings.save_to(&AppSettings::get_settings_path()?).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_settings_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let overrides = SettingsOverrides {
            capacity: Some(2),
            ..Default::default()
        };

        let settings = get_settings(Some(path.as_path()), &overrides).await.unwrap();
        assert_eq!(settings.history.capacity, 2);

        // Overrides are not written back
        let on_disk = AppSettings::load_from(&path).await.unwrap();
        assert_eq!(on_disk.history.capacity, 10);
    }

    #[tokio::test]
    async fn test_save_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = AppSettings::default();
        settings.monitor.poll_interval_ms = 0;
        assert!(save_settings(&settings, Some(path.as_path())).await.is_err());
        assert!(!path.exists());
    }
}
