//! Cards and their faces.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Identity of a card face. Both cards of a pair share one `ImageId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub u32);

impl ImageId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Image({})", self.0)
    }
}

/// One distinct picture that will appear on exactly two cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub id: ImageId,
    /// File the picture was loaded from.
    pub path: PathBuf,
}

impl CardFace {
    pub fn new(id: ImageId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }
}

/// A card on the board.
///
/// Only `matched` and `owner` change after dealing, and only together:
/// a card is matched exactly when it has an owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    face: ImageId,
    path: PathBuf,
    owner: Option<PlayerId>,
}

impl Card {
    #[must_use]
    pub fn new(face: &CardFace) -> Self {
        Self {
            face: face.id,
            path: face.path.clone(),
            owner: None,
        }
    }

    #[must_use]
    pub fn face(&self) -> ImageId {
        self.face
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.owner.is_some()
    }

    /// Player who found this card's pair.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Do both cards show the same picture?
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.face == other.face
    }

    pub(crate) fn claim(&mut self, player: PlayerId) {
        debug_assert!(self.owner.is_none(), "card already claimed");
        self.owner = Some(player);
    }
}
