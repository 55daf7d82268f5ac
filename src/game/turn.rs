//! Turn order and the win condition.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap, MAX_PLAYERS};

/// Whose turn it is.
///
/// The turn passes only on a mismatch; a found pair lets the same player
/// go again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnController {
    current: PlayerId,
    player_count: usize,
}

impl TurnController {
    /// Seat 0 starts.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= MAX_PLAYERS, "At most 6 players supported");
        Self {
            current: PlayerId::new(0),
            player_count,
        }
    }

    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Pass the turn to the next seat and return it.
    pub fn advance(&mut self) -> PlayerId {
        self.current = self.current.next(self.player_count);
        self.current
    }

    /// Every player holding the highest score, in seat order.
    #[must_use]
    pub fn winners(scores: &PlayerMap<u32>) -> Vec<PlayerId> {
        let Some(best) = scores.values().copied().max() else {
            return Vec::new();
        };
        scores
            .iter()
            .filter(|(_, &score)| score == best)
            .map(|(player, _)| player)
            .collect()
    }
}
