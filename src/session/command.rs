//! Typed input and output of a [`Session`](super::Session).

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::summary::GameSummary;
use crate::cards::ImageId;
use crate::core::PlayerId;
use crate::rules::FlipRejection;

/// Something the host asks the session to do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Turn a card face up.
    Flip(usize),
    /// The reveal delay has elapsed; compare the two face-up cards.
    Resolve,
    ToggleSound,
    SetLanguage(String),
}

/// Something the host should show, play or persist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Flipped {
        index: usize,
        face: ImageId,
        player: PlayerId,
    },
    /// The flip was ignored; nothing changed.
    Rejected {
        index: usize,
        reason: FlipRejection,
    },
    /// Two cards are face up. Send [`Command::Resolve`] after `delay`.
    EvaluationScheduled { delay: Duration },
    Matched {
        player: PlayerId,
        cards: [usize; 2],
        score: u32,
    },
    /// Both cards went face down again.
    Mismatched { cards: [usize; 2] },
    /// The player whose turn it now is.
    TurnChanged { player: PlayerId },
    /// A picture entered the gallery for the first time.
    GalleryRecorded { path: PathBuf, player: PlayerId },
    MatchSound { path: PathBuf },
    GameOver(GameSummary),
    LanguageChanged { code: String },
    SoundToggled { enabled: bool },
}
