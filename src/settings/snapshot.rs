//! The "last settings" record used to prefill the next game.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, MAX_PLAYERS};

/// Last-used game configuration.
///
/// Unknown or missing fields deserialize to the built-in defaults, so old
/// records keep loading. Call [`SettingsSnapshot::clamped`] after reading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSnapshot {
    pub players: usize,
    pub folder: PathBuf,
    pub pairs: usize,
    pub names: Vec<String>,
    /// One entry per named player; `None` when no avatar was available.
    pub avatars: Vec<Option<PathBuf>>,
    pub sound_enabled: bool,
    pub language: String,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            players: 1,
            folder: PathBuf::new(),
            pairs: 1,
            names: Vec::new(),
            avatars: Vec::new(),
            sound_enabled: true,
            language: String::new(),
        }
    }
}

impl SettingsSnapshot {
    /// Defaults for a fresh install: configured image folder and language.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            folder: config.media.images.folder.clone(),
            language: config.language.clone(),
            ..Self::default()
        }
    }

    /// Clamp a freshly read record into range.
    ///
    /// Players land in `1..=max_players`, pairs at `>= 1`. Blank folder and
    /// language fall back to `defaults`.
    #[must_use]
    pub fn clamped(mut self, defaults: &Self, max_players: usize) -> Self {
        self.players = self.players.clamp(1, max_players.clamp(1, MAX_PLAYERS));
        self.pairs = self.pairs.max(1);
        if self.folder.as_os_str().is_empty() {
            self.folder = defaults.folder.clone();
        }
        let language = self.language.trim().to_lowercase();
        self.language = if language.is_empty() {
            defaults.language.clone()
        } else {
            language
        };
        self
    }

    /// Remembered name for the 0-based seat, if any.
    #[must_use]
    pub fn name(&self, seat: usize) -> Option<&str> {
        self.names.get(seat).map(String::as_str).filter(|n| !n.trim().is_empty())
    }

    /// Remembered avatar for the 0-based seat, if any.
    #[must_use]
    pub fn avatar(&self, seat: usize) -> Option<&PathBuf> {
        self.avatars.get(seat).and_then(Option::as_ref)
    }
}
