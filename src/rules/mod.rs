//! Rules engine trait for the matching game.
//!
//! `GameState` implements `RulesEngine`; the session layer drives it only
//! through this trait.

pub mod engine;

pub use engine::{FlipOutcome, FlipRejection, GameResult, Resolution, RulesEngine};
