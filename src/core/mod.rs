//! Core types: players, RNG, configuration, errors, logging.
//!
//! Everything here is independent of the match rules; the game, session
//! and media modules build on it.

pub mod config;
pub mod error;
pub mod logging;
pub mod player;
pub mod rng;

pub use config::{
    Extensions, FontConfig, FontSection, GameConfig, LayoutConfig, MediaConfig, MediaFolder,
    RulesConfig, TitleConfig, TitleImage,
};
pub use error::{MemoryError, Result};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::GameRng;
