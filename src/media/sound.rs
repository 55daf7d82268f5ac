//! Match-sound selection. Playback belongs to the host.

use std::path::PathBuf;

use crate::core::{GameRng, MediaFolder};

use super::library::list_media_files;

/// Picks a random sound file for each match.
#[derive(Clone, Debug)]
pub struct SoundPicker {
    files: Vec<PathBuf>,
    rng: GameRng,
}

impl SoundPicker {
    /// Scan the configured sound folder.
    #[must_use]
    pub fn scan(media: &MediaFolder, rng: GameRng) -> Self {
        let mut files = list_media_files(&media.folder, &media.extensions);
        // Directory order is platform dependent; sort so a seed replays.
        files.sort();
        log::debug!("found {} sounds in {}", files.len(), media.folder.display());
        Self::new(files, rng)
    }

    #[must_use]
    pub fn new(files: Vec<PathBuf>, rng: GameRng) -> Self {
        Self { files, rng }
    }

    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// A sound to play, or `None` when sound is off or no file is present.
    pub fn pick(&mut self, enabled: bool) -> Option<PathBuf> {
        if !enabled {
            return None;
        }
        let present: Vec<&PathBuf> = self.files.iter().filter(|p| p.is_file()).collect();
        self.rng.choose(&present).map(|p| (*p).clone())
    }
}
