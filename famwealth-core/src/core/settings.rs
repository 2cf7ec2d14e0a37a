//! The session state kept between runs: which data file was open last.
//!
//! Stored as a small JSON file in the user's config directory. A missing or
//! unreadable file simply means there is nothing to reopen.

use crate::{Result, Workspace};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// The data file of the last session, if it had been saved or opened.
    pub last_file: Option<PathBuf>,
}

impl AppSettings {
    /// Records the file currently backing `workspace`.
    ///
    /// An unsaved workspace clears the entry, so a new file that was never
    /// written is not offered again.
    pub fn track(&mut self, workspace: &Workspace) {
        self.last_file = workspace.path().map(Path::to_path_buf);
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/famwealth/settings.json`
/// - Windows: `%APPDATA%/FamWealth/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("FamWealth")
            .join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("famwealth")
            .join("settings.json")
    }
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings_from(path: &Path) -> AppSettings {
    let Ok(content) = fs::read_to_string(path) else {
        return AppSettings::default();
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("ignoring unreadable settings {}: {e}", path.display());
        AppSettings::default()
    })
}

/// Saves settings to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`crate::WealthError::Io`] if the directory or file cannot be
/// written.
pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_map;

    #[test]
    fn test_missing_or_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings_from(&path), AppSettings::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path).last_file, None);
    }

    #[test]
    fn test_settings_path_is_under_the_app_folder() {
        let path = settings_file_path();
        assert_eq!(path.file_name().unwrap(), "settings.json");
        let folder = path.parent().unwrap().file_name().unwrap().to_string_lossy().to_lowercase();
        assert_eq!(folder, "famwealth");
    }

    #[test]
    fn test_track_follows_the_workspace_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("family.json");
        let mut settings = AppSettings::default();

        let mut ws = Workspace::new();
        settings.track(&ws);
        assert_eq!(settings.last_file, None);

        ws.submit_member(None, field_map([("Name", "Asha")])).unwrap();
        ws.save_as(&data).unwrap();
        settings.track(&ws);
        assert_eq!(settings.last_file.as_deref(), Some(data.as_path()));
    }

    #[test]
    fn test_save_creates_directories_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("famwealth").join("settings.json");
        let settings = AppSettings {
            last_file: Some(PathBuf::from("/data/family.json")),
        };
        save_settings_to(&path, &settings).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"lastFile\": \"/data/family.json\""));
        assert_eq!(load_settings_from(&path), settings);
    }
}
