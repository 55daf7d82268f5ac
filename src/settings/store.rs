//! Where the settings record lives.

use std::fs;
use std::path::{Path, PathBuf};

use super::snapshot::SettingsSnapshot;
use crate::core::{MemoryError, Result};

/// Read/write the last-settings record.
pub trait SettingsStore {
    /// The stored record, or `None` if nothing usable is stored.
    fn read(&self) -> Option<SettingsSnapshot>;

    fn write(&mut self, snapshot: &SettingsSnapshot) -> Result<()>;

    /// The stored record clamped into range, or `defaults`.
    fn read_or(&self, defaults: &SettingsSnapshot, max_players: usize) -> SettingsSnapshot {
        match self.read() {
            Some(snapshot) => snapshot.clamped(defaults, max_players),
            None => defaults.clone(),
        }
    }
}

/// Pretty-printed JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn read(&self) -> Option<SettingsSnapshot> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("could not read settings {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("ignoring corrupt settings {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn write(&mut self, snapshot: &SettingsSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| MemoryError::io(parent, e))?;
        }
        let payload = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, payload).map_err(|e| MemoryError::io(&self.path, e))?;
        log::debug!("saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the record in memory. For tests and hosts without a disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    snapshot: Option<SettingsSnapshot>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self) -> Option<SettingsSnapshot> {
        self.snapshot.clone()
    }

    fn write(&mut self, snapshot: &SettingsSnapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> SettingsSnapshot {
        SettingsSnapshot {
            folder: PathBuf::from("/pics"),
            language: "de".into(),
            ..SettingsSnapshot::default()
        }
    }

    #[test]
    fn test_json_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested/settings.json"));
        assert_eq!(store.read(), None);

        let snapshot = SettingsSnapshot {
            players: 2,
            folder: PathBuf::from("/pics/animals"),
            pairs: 8,
            names: vec!["Ada".into(), "Grace".into()],
            avatars: vec![Some(PathBuf::from("/a/cat.png")), None],
            sound_enabled: false,
            language: "en".into(),
        };
        store.write(&snapshot).unwrap();
        assert_eq!(store.read(), Some(snapshot));
    }

    #[test]
    fn test_corrupt_file_reads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.read(), None);
        assert_eq!(store.read_or(&defaults(), 6), defaults());
    }

    #[test]
    fn test_read_or_clamps() {
        let mut store = MemoryStore::new();
        store
            .write(&SettingsSnapshot {
                players: 9,
                pairs: 0,
                ..SettingsSnapshot::default()
            })
            .unwrap();

        let snapshot = store.read_or(&defaults(), 6);
        assert_eq!(snapshot.players, 6);
        assert_eq!(snapshot.pairs, 1);
        assert_eq!(snapshot.folder, PathBuf::from("/pics"));
    }
}
