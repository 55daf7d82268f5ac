//! The matching game itself: state machine, turn order, gallery.
//!
//! - `GameState`: board, face-up selection, scores; implements
//!   [`RulesEngine`](crate::rules::RulesEngine)
//! - `TurnController`: current player and the win condition
//! - `GalleryRecorder`: matched pictures with their first finder

pub mod gallery;
pub mod state;
pub mod turn;

pub use gallery::{GalleryEntry, GalleryRecorder};
pub use state::{GameState, Phase};
pub use turn::TurnController;
