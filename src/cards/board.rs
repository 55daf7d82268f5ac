//! The dealt board.
//!
//! A board holds `2 × pairs` cards in a fixed order. It is shuffled once
//! when dealt; afterwards only the matched/owner flags change. Backed by
//! `im::Vector` so hosts can keep cheap snapshots for rendering.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardFace};
use crate::core::{GameRng, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vector<Card>,
    matched: usize,
}

impl Board {
    /// Deal two cards per face and shuffle them.
    ///
    /// Faces must have distinct ids.
    #[must_use]
    pub fn deal(faces: &[CardFace], rng: &mut GameRng) -> Self {
        debug_assert!(
            faces.iter().map(|f| f.id).collect::<FxHashSet<_>>().len() == faces.len(),
            "duplicate face ids"
        );

        let mut cards: Vec<Card> = faces
            .iter()
            .flat_map(|face| [Card::new(face), Card::new(face)])
            .collect();
        rng.shuffle(&mut cards);

        log::debug!("dealt {} cards from {} faces", cards.len(), faces.len());

        Self {
            cards: cards.into_iter().collect(),
            matched: 0,
        }
    }

    /// Build a board in the given order, without shuffling.
    ///
    /// Used by tests and replays that need a known layout.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let matched = cards.iter().filter(|c| c.is_matched()).count();
        Self {
            cards: cards.into_iter().collect(),
            matched,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn pairs(&self) -> usize {
        self.cards.len() / 2
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of matched cards (always even).
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched
    }

    /// Every card has been matched.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.matched == self.cards.len()
    }

    /// Indices of cards still in play.
    pub fn unmatched_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_matched())
            .map(|(i, _)| i)
    }

    /// Mark the card at `index` as found by `player`.
    pub(crate) fn claim(&mut self, index: usize, player: PlayerId) {
        if let Some(card) = self.cards.get_mut(index) {
            if !card.is_matched() {
                card.claim(player);
                self.matched += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ImageId;

    fn faces(n: u32) -> Vec<CardFace> {
        (0..n)
            .map(|i| CardFace::new(ImageId::new(i), format!("img{}.png", i)))
            .collect()
    }

    #[test]
    fn test_deal_doubles_faces() {
        let mut rng = GameRng::new(42);
        let board = Board::deal(&faces(5), &mut rng);

        assert_eq!(board.len(), 10);
        assert_eq!(board.pairs(), 5);
        assert_eq!(board.matched_count(), 0);

        for id in 0..5 {
            let count = board.iter().filter(|c| c.face() == ImageId::new(id)).count();
            assert_eq!(count, 2);
        }
    }

    #[test]
    fn test_deal_is_deterministic() {
        let a = Board::deal(&faces(8), &mut GameRng::new(1));
        let b = Board::deal(&faces(8), &mut GameRng::new(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_deal_shuffles() {
        let board = Board::deal(&faces(8), &mut GameRng::new(3));
        let order: Vec<_> = board.iter().map(|c| c.face().raw()).collect();
        let unshuffled: Vec<_> = (0..8).flat_map(|i| [i, i]).collect();
        assert_ne!(order, unshuffled);
    }

    #[test]
    fn test_claim_counts_once() {
        let mut board = Board::deal(&faces(2), &mut GameRng::new(0));
        board.claim(0, PlayerId::new(0));
        board.claim(0, PlayerId::new(1));
        assert_eq!(board.matched_count(), 1);
        assert_eq!(board.get(0).unwrap().owner(), Some(PlayerId::new(0)));
        assert_eq!(board.unmatched_indices().count(), 3);
    }

    #[test]
    fn test_cleared() {
        let mut board = Board::deal(&faces(1), &mut GameRng::new(0));
        assert!(!board.is_cleared());
        board.claim(0, PlayerId::new(0));
        board.claim(1, PlayerId::new(0));
        assert!(board.is_cleared());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut board = Board::deal(&faces(2), &mut GameRng::new(0));
        let snapshot = board.clone();
        board.claim(2, PlayerId::new(0));
        assert!(!snapshot.get(2).unwrap().is_matched());
        assert!(board.get(2).unwrap().is_matched());
    }
}
