use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{SETTINGS_DIR, SETTINGS_FILE};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentSettings {
    /// Last port the user selected
    #[serde(default)]
    pub port: Option<String>,
}

/// The settings document on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the user's config directory
    pub fn user() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(config_dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from disk, or use defaults if the file is missing or unreadable
    pub fn load(&self) -> PersistentSettings {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", self.path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings file {:?}: {}", self.path, e);
                    PersistentSettings::default()
                }
            },
            Err(_) => {
                info!("No settings file found at {:?}, using defaults", self.path);
                PersistentSettings::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, settings: &PersistentSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn port(&self) -> Option<String> {
        self.load().port
    }

    pub fn set_port(&self, port: Option<&str>) -> Result<()> {
        let mut settings = self.load();
        settings.port = port.map(str::to_string);
        self.save(&settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join(SETTINGS_FILE));
        (dir, store)
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load(), PersistentSettings::default());
        assert_eq!(store.port(), None);
    }

    #[test]
    fn test_port_round_trips_through_disk() {
        let (_dir, store) = temp_store();

        store.set_port(Some("COM3")).unwrap();
        assert_eq!(store.port().as_deref(), Some("COM3"));

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("\"port\": \"COM3\""));

        store.set_port(None).unwrap();
        assert_eq!(store.port(), None);
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load(), PersistentSettings::default());
    }
}
