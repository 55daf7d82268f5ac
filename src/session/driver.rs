//! A running game driven by [`Command`]s.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use smallvec::SmallVec;

use super::command::{Command, Event};
use super::setup::{GameSetup, PlayerProfile};
use super::summary::GameSummary;
use crate::cards::{Board, CardFace, ImageId};
use crate::core::{GameRng, MemoryError, PlayerId, Result};
use crate::game::{GalleryEntry, GameState, Phase, TurnController};
use crate::i18n::Translator;
use crate::media::{Bitmap, ImageLoader, SoundPicker};
use crate::rules::{FlipOutcome, GameResult, Resolution, RulesEngine};
use crate::settings::SettingsSnapshot;

/// Events produced by one command. Most commands yield one or two.
pub type Events = SmallVec<[Event; 4]>;

/// One game from deal to summary.
///
/// The session never waits: after the second flip it emits
/// [`Event::EvaluationScheduled`] and expects [`Command::Resolve`] once the
/// delay has passed.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    players: Vec<PlayerProfile>,
    faces: Vec<CardFace>,
    /// Indexed by `ImageId`.
    bitmaps: Vec<Arc<Bitmap>>,
    card_size: u32,
    reveal_delay: Duration,
    sounds: SoundPicker,
    settings: SettingsSnapshot,
}

impl Session {
    /// Pick and decode the pictures, then deal.
    ///
    /// Pictures are tried in random order at `card_size`; undecodable ones
    /// are skipped. Fails with [`MemoryError::LoadingError`] when fewer than
    /// `setup.pairs` load.
    pub fn start(
        setup: GameSetup,
        loader: &mut dyn ImageLoader,
        rng: &mut GameRng,
        card_size: u32,
    ) -> Result<Self> {
        let mut candidates = setup.images.clone();
        rng.shuffle(&mut candidates);

        let mut faces = Vec::with_capacity(setup.pairs);
        let mut bitmaps = Vec::with_capacity(setup.pairs);
        for path in candidates {
            if faces.len() == setup.pairs {
                break;
            }
            match loader.load(&path, card_size) {
                Ok(bitmap) => {
                    faces.push(CardFace::new(ImageId::new(faces.len() as u32), path));
                    bitmaps.push(bitmap);
                }
                Err(err) => log::warn!("skipping picture: {}", err),
            }
        }
        if faces.len() < setup.pairs {
            return Err(MemoryError::LoadingError { count: faces.len() });
        }

        let board = Board::deal(&faces, rng);
        let state = GameState::new(board, setup.players.len());
        let sounds = SoundPicker::scan(&setup.sounds, rng.for_context("sound"));
        let settings = setup.snapshot();

        log::info!(
            "game started: {} cards, {} players, card size {}px",
            state.board().len(),
            setup.players.len(),
            card_size
        );

        Ok(Self {
            state,
            players: setup.players,
            faces,
            bitmaps,
            card_size,
            reveal_delay: setup.reveal_delay,
            sounds,
            settings,
        })
    }

    /// Apply a command and report what happened.
    pub fn handle(&mut self, command: Command) -> Events {
        match command {
            Command::Flip(index) => self.flip(index),
            Command::Resolve => self.resolve(),
            Command::ToggleSound => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                log::debug!("sound enabled: {}", self.settings.sound_enabled);
                smallvec::smallvec![Event::SoundToggled {
                    enabled: self.settings.sound_enabled
                }]
            }
            Command::SetLanguage(code) => {
                let code = code.trim().to_lowercase();
                if code.is_empty() || code == self.settings.language {
                    return Events::new();
                }
                self.settings.language = code.clone();
                smallvec::smallvec![Event::LanguageChanged { code }]
            }
        }
    }

    fn flip(&mut self, index: usize) -> Events {
        let player = self.state.current_player();
        match self.state.flip(index) {
            Ok(outcome) => {
                let face = self.state.board().get(index).map_or(ImageId::new(0), |c| c.face());
                let mut events: Events = smallvec::smallvec![Event::Flipped { index, face, player }];
                if outcome == FlipOutcome::SecondRevealed {
                    events.push(Event::EvaluationScheduled {
                        delay: self.reveal_delay,
                    });
                }
                events
            }
            Err(reason) => {
                log::debug!("flip {} rejected: {}", index, reason);
                smallvec::smallvec![Event::Rejected { index, reason }]
            }
        }
    }

    fn resolve(&mut self) -> Events {
        let mut events = Events::new();
        match self.state.resolve() {
            None => {}
            Some(Resolution::Match {
                player,
                cards,
                recorded,
            }) => {
                events.push(Event::Matched {
                    player,
                    cards,
                    score: self.state.scores()[player],
                });
                if let Some(path) = self.sounds.pick(self.settings.sound_enabled) {
                    events.push(Event::MatchSound { path });
                }
                if recorded {
                    if let Some(card) = self.state.board().get(cards[0]) {
                        events.push(Event::GalleryRecorded {
                            path: card.path().to_path_buf(),
                            player,
                        });
                    }
                }
                if self.state.phase() == Phase::Finished {
                    events.push(Event::GameOver(self.summary()));
                }
            }
            Some(Resolution::Mismatch { cards, next_player }) => {
                events.push(Event::Mismatched { cards });
                events.push(Event::TurnChanged {
                    player: next_player,
                });
            }
        }
        events
    }

    /// Final standings. Meaningful once every card is matched.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        let standings = self
            .players
            .iter()
            .map(|p| (p.name.clone(), self.state.scores()[p.id]))
            .collect();
        let result = GameResult::from_winners(TurnController::winners(self.state.scores()));
        GameSummary::new(standings, result)
    }

    /// One `scoreboard.entry` line per seat.
    #[must_use]
    pub fn scoreboard(&self, translator: &dyn Translator) -> Vec<String> {
        self.players
            .iter()
            .map(|p| {
                translator.translate(
                    "scoreboard.entry",
                    &[
                        ("name", p.name.clone()),
                        ("score", self.state.scores()[p.id].to_string()),
                    ],
                )
            })
            .collect()
    }

    /// Gallery entries ordered by path within the game's folder.
    #[must_use]
    pub fn gallery(&self) -> Vec<&GalleryEntry> {
        self.state.gallery().sorted_entries(Some(&self.settings.folder))
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerProfile] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerProfile> {
        self.players.get(id.index())
    }

    #[must_use]
    pub fn faces(&self) -> &[CardFace] {
        &self.faces
    }

    /// Decoded picture for a face.
    #[must_use]
    pub fn bitmap(&self, face: ImageId) -> Option<&Arc<Bitmap>> {
        self.bitmaps.get(face.raw() as usize)
    }

    /// Picture of the card at `index` if it is showing, else `None`.
    #[must_use]
    pub fn visible_bitmap(&self, index: usize) -> Option<&Arc<Bitmap>> {
        if !self.state.is_face_up(index) {
            return None;
        }
        self.bitmap(self.state.board().get(index)?.face())
    }

    #[must_use]
    pub fn card_size(&self) -> u32 {
        self.card_size
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.settings.sound_enabled
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.settings.language
    }

    /// Current settings record, including sound and language changes.
    #[must_use]
    pub fn settings(&self) -> &SettingsSnapshot {
        &self.settings
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase() == Phase::Finished
    }

    /// Folder the pictures came from.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.settings.folder
    }
}
