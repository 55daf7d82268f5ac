//! Validating a game request before any image is decoded.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, MediaFolder, MemoryError, PlayerId, Result};
use crate::i18n::Translator;
use crate::layout::{CardSizer, GridSize, Viewport};
use crate::media::{list_images, AvatarCatalog};
use crate::settings::SettingsSnapshot;

/// What the player asked for on the setup screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupRequest {
    pub folder: PathBuf,
    pub players: usize,
    pub pairs: usize,
    /// Per-seat names; blank or missing entries get a default name.
    pub names: Vec<String>,
    /// Per-seat avatars; unknown or missing entries get the default avatar.
    pub avatars: Vec<Option<PathBuf>>,
    pub sound_enabled: bool,
    pub language: String,
}

impl SetupRequest {
    /// Prefill from the last settings.
    #[must_use]
    pub fn from_snapshot(snapshot: &SettingsSnapshot) -> Self {
        Self {
            folder: snapshot.folder.clone(),
            players: snapshot.players,
            pairs: snapshot.pairs,
            names: snapshot.names.clone(),
            avatars: snapshot.avatars.clone(),
            sound_enabled: snapshot.sound_enabled,
            language: snapshot.language.clone(),
        }
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
    pub avatar: Option<PathBuf>,
}

/// A request that passed validation.
#[derive(Clone, Debug)]
pub struct GameSetup {
    pub folder: PathBuf,
    /// Every usable picture in the folder, sorted.
    pub images: Vec<PathBuf>,
    pub pairs: usize,
    pub players: Vec<PlayerProfile>,
    pub sound_enabled: bool,
    pub language: String,
    pub reveal_delay: Duration,
    pub sounds: MediaFolder,
}

impl GameSetup {
    /// Check a request against the disk and fill in defaults.
    ///
    /// The folder must exist and hold at least one picture, and `pairs`
    /// must lie in `1..=pictures`. Player count is clamped rather than
    /// rejected.
    pub fn validate(
        request: &SetupRequest,
        config: &GameConfig,
        avatars: &AvatarCatalog,
        translator: &dyn Translator,
    ) -> Result<Self> {
        let folder = request.folder.clone();
        if folder.as_os_str().is_empty() || !folder.is_dir() {
            return Err(MemoryError::InvalidFolder(folder));
        }

        let images = list_images(&folder);
        if images.is_empty() {
            return Err(MemoryError::NoImages(folder));
        }

        if request.pairs < 1 || request.pairs > images.len() {
            return Err(MemoryError::InvalidPairCount { max: images.len() });
        }

        let player_count = request.players.clamp(1, config.game.max_players);
        let players = PlayerId::all(player_count)
            .map(|id| {
                let seat = id.index();
                let name = request
                    .names
                    .get(seat)
                    .map(|n| n.trim())
                    .filter(|n| !n.is_empty())
                    .map_or_else(|| default_name(translator, id), str::to_string);
                let avatar = request
                    .avatars
                    .get(seat)
                    .and_then(Option::as_deref)
                    .and_then(|p| avatars.normalize(p))
                    .or_else(|| avatars.default_avatar().map(PathBuf::from));
                PlayerProfile { id, name, avatar }
            })
            .collect();

        log::info!(
            "setup ok: {} players, {} of {} pictures in {}",
            player_count,
            request.pairs,
            images.len(),
            folder.display()
        );

        let language = request.language.trim().to_lowercase();
        let language = if language.is_empty() {
            config.language.clone()
        } else {
            language
        };

        Ok(Self {
            folder,
            images,
            pairs: request.pairs,
            players,
            sound_enabled: request.sound_enabled,
            language,
            reveal_delay: config.game.reveal_delay(),
            sounds: config.media.sounds.clone(),
        })
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.pairs * 2
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::for_cards(self.card_count())
    }

    /// Card edge length for this board in `viewport`.
    #[must_use]
    pub fn card_size(&self, sizer: &CardSizer, viewport: &Viewport) -> u32 {
        sizer.card_size(self.grid(), viewport)
    }

    /// The record to persist for next time.
    #[must_use]
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            players: self.players.len(),
            folder: self.folder.clone(),
            pairs: self.pairs,
            names: self.players.iter().map(|p| p.name.clone()).collect(),
            avatars: self.players.iter().map(|p| p.avatar.clone()).collect(),
            sound_enabled: self.sound_enabled,
            language: self.language.clone(),
        }
    }
}

fn default_name(translator: &dyn Translator, id: PlayerId) -> String {
    translator.translate("players.default_name", &[("index", id.number().to_string())])
}
