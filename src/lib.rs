//! # memory-match
//!
//! A picture-pair memory game engine for one to six players.
//!
//! ## Design Principles
//!
//! 1. **Synchronous Core**: The state machine never sleeps or spawns. The
//!    reveal delay is an event; the host sends `Resolve` when it elapses.
//!
//! 2. **Explicit Configuration**: A `GameConfig` is loaded once and passed
//!    to constructors. Nothing reads global settings.
//!
//! 3. **Commands In, Events Out**: Hosts drive a `Session` with typed
//!    `Command`s and render the `Event`s it returns.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors, logging setup
//! - `cards`: card faces, cards and the dealt board
//! - `rules`: `RulesEngine` trait, flip outcomes, game result
//! - `game`: match state machine, turn order, gallery
//! - `layout`: grid dimensions and card pixel size
//! - `i18n`: message catalogs and the `Translator` trait
//! - `media`: picture/sound/avatar discovery and image decoding
//! - `settings`: last-used settings record and its stores
//! - `session`: setup validation, command dispatch, end-of-game summary

pub mod core;
pub mod cards;
pub mod rules;
pub mod game;
pub mod layout;
pub mod i18n;
pub mod media;
pub mod settings;
pub mod session;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, MemoryError, PlayerId, PlayerMap, Result};

pub use crate::cards::{Board, Card, CardFace, ImageId};

pub use crate::rules::{FlipOutcome, FlipRejection, GameResult, Resolution, RulesEngine};

pub use crate::game::{GalleryEntry, GalleryRecorder, GameState, Phase, TurnController};

pub use crate::layout::{CardSizer, GridSize, Viewport};

pub use crate::i18n::{Catalog, Translator};

pub use crate::media::{AvatarCatalog, Bitmap, ImageLoader, SoundPicker, ThumbnailLoader};

pub use crate::settings::{JsonFileStore, MemoryStore, SettingsSnapshot, SettingsStore};

pub use crate::session::{Command, Event, GameSetup, GameSummary, Session, SetupRequest};
