//! Matched-image gallery for post-game review.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// A matched picture and the player who found it first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub path: PathBuf,
    pub player: PlayerId,
}

/// Records matched pictures, one entry per distinct path.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GalleryRecorder {
    entries: Vec<GalleryEntry>,
    #[serde(skip)]
    seen: FxHashSet<PathBuf>,
}

impl GalleryRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` as found by `player`.
    ///
    /// Returns false, leaving the gallery unchanged, if the path was
    /// already recorded.
    pub fn record(&mut self, path: &Path, player: PlayerId) -> bool {
        if self.contains(path) {
            return false;
        }
        self.seen.insert(path.to_path_buf());
        self.entries.push(GalleryEntry {
            path: path.to_path_buf(),
            player,
        });
        true
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        // `seen` is not serialized; fall back to a scan after deserializing.
        self.seen.contains(path) || self.entries.iter().any(|e| e.path == path)
    }

    /// Entries in the order they were found.
    #[must_use]
    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered for display.
    ///
    /// Paths under `folder` sort by their relative path, others by their
    /// full path; comparison ignores case.
    #[must_use]
    pub fn sorted_entries(&self, folder: Option<&Path>) -> Vec<&GalleryEntry> {
        let sort_key = |entry: &GalleryEntry| -> String {
            let relative = folder.and_then(|f| entry.path.strip_prefix(f).ok());
            relative
                .unwrap_or(&entry.path)
                .to_string_lossy()
                .to_lowercase()
        };

        let mut sorted: Vec<&GalleryEntry> = self.entries.iter().collect();
        sorted.sort_by_cached_key(|e| sort_key(*e));
        sorted
    }
}
