//! Rules engine trait for the matching game.
//!
//! A turn is two flips followed by a resolution:
//! - `flip` reveals a card, or reports why it cannot be revealed
//! - `resolve` evaluates two face-up cards (match or mismatch)
//! - `is_terminal` reports the result once every card is matched

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// One player holds the highest score.
    Winner(PlayerId),
    /// Several players share the highest score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Build from the list of top scorers.
    #[must_use]
    pub fn from_winners(mut winners: Vec<PlayerId>) -> Self {
        if winners.len() == 1 {
            GameResult::Winner(winners.remove(0))
        } else {
            GameResult::Winners(winners)
        }
    }

    /// Check if a player won (alone or tied).
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }

    /// All winners in seat order.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            GameResult::Winner(p) => vec![*p],
            GameResult::Winners(ps) => ps.clone(),
        }
    }
}

/// Why a flip was refused. A refused flip leaves the state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipRejection {
    /// No card at that index.
    OutOfRange,
    /// The card's pair has already been found.
    AlreadyMatched,
    /// The card is already face up.
    AlreadyFaceUp,
    /// Two cards are face up and waiting for evaluation.
    Evaluating,
}

impl std::fmt::Display for FlipRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            FlipRejection::OutOfRange => "no such card",
            FlipRejection::AlreadyMatched => "card already matched",
            FlipRejection::AlreadyFaceUp => "card already face up",
            FlipRejection::Evaluating => "two cards already face up",
        };
        f.write_str(reason)
    }
}

/// What an accepted flip did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipOutcome {
    /// First card of the turn is face up.
    FirstRevealed,
    /// Second card is face up; the pair awaits `resolve`.
    SecondRevealed,
}

/// Outcome of evaluating two face-up cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Same picture: both cards go to `player`, who keeps the turn.
    Match {
        player: PlayerId,
        cards: [usize; 2],
        /// The picture was new to the gallery.
        recorded: bool,
    },
    /// Different pictures: both turn face down and the turn passes.
    Mismatch {
        cards: [usize; 2],
        next_player: PlayerId,
    },
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `flip` must reject without side effects
/// - `resolve` is a no-op returning `None` unless two cards are face up
/// - `is_terminal` returns `None` while unmatched cards remain
pub trait RulesEngine {
    /// Indices that `flip` would currently accept.
    fn legal_flips(&self) -> Vec<usize>;

    /// Reveal the card at `index`.
    fn flip(&mut self, index: usize) -> Result<FlipOutcome, FlipRejection>;

    /// Evaluate the two face-up cards.
    fn resolve(&mut self) -> Option<Resolution>;

    /// Check if the game is over.
    fn is_terminal(&self) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Flip two cards and resolve them immediately.
    ///
    /// Returns `Err` with the first rejection if either flip is refused;
    /// a refused second flip leaves the first card face up.
    fn play_turn(&mut self, first: usize, second: usize) -> Result<Resolution, FlipRejection> {
        self.flip(first)?;
        self.flip(second)?;
        self.resolve().ok_or(FlipRejection::Evaluating)
    }
}
