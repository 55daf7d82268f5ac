//! The match state machine.
//!
//! ```text
//! Idle --flip--> OneFlipped --flip--> Evaluating --resolve--> Idle
//!                                                         \-> Finished
//! ```
//!
//! `GameState` owns the board, the face-up selection, per-player scores,
//! the turn order and the gallery. It never sleeps: the reveal delay
//! between the second flip and `resolve` belongs to the caller.

use smallvec::SmallVec;

use super::gallery::GalleryRecorder;
use super::turn::TurnController;
use crate::cards::Board;
use crate::core::{PlayerId, PlayerMap};
use crate::rules::{FlipOutcome, FlipRejection, GameResult, Resolution, RulesEngine};

/// Where the state machine stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No unmatched card is face up.
    Idle,
    /// One card is face up.
    OneFlipped,
    /// Two cards are face up, waiting for `resolve`.
    Evaluating,
    /// Every card is matched.
    Finished,
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    /// Face-up, unmatched cards in flip order. Never more than two.
    flipped: SmallVec<[usize; 2]>,
    scores: PlayerMap<u32>,
    turn: TurnController,
    gallery: GalleryRecorder,
}

impl GameState {
    /// Start a game on a freshly dealt board.
    #[must_use]
    pub fn new(board: Board, player_count: usize) -> Self {
        Self {
            board,
            flipped: SmallVec::new(),
            scores: PlayerMap::with_value(player_count, 0),
            turn: TurnController::new(player_count),
            gallery: GalleryRecorder::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.board.is_cleared() {
            return Phase::Finished;
        }
        match self.flipped.len() {
            0 => Phase::Idle,
            1 => Phase::OneFlipped,
            _ => Phase::Evaluating,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Face-up, unmatched card indices in flip order.
    #[must_use]
    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    /// Is the card at `index` showing its face (face up or matched)?
    #[must_use]
    pub fn is_face_up(&self, index: usize) -> bool {
        self.flipped.contains(&index)
            || self.board.get(index).is_some_and(|c| c.is_matched())
    }

    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.turn.player_count()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn.current()
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryRecorder {
        &self.gallery
    }

    fn check_flip(&self, index: usize) -> Result<(), FlipRejection> {
        let card = self.board.get(index).ok_or(FlipRejection::OutOfRange)?;
        if card.is_matched() {
            return Err(FlipRejection::AlreadyMatched);
        }
        if self.flipped.contains(&index) {
            return Err(FlipRejection::AlreadyFaceUp);
        }
        if self.flipped.len() >= 2 {
            return Err(FlipRejection::Evaluating);
        }
        Ok(())
    }
}

impl RulesEngine for GameState {
    fn legal_flips(&self) -> Vec<usize> {
        if self.flipped.len() >= 2 {
            return Vec::new();
        }
        self.board
            .unmatched_indices()
            .filter(|i| !self.flipped.contains(i))
            .collect()
    }

    fn flip(&mut self, index: usize) -> Result<FlipOutcome, FlipRejection> {
        self.check_flip(index)?;
        self.flipped.push(index);
        log::debug!("{} flipped card {}", self.turn.current(), index);

        Ok(if self.flipped.len() == 2 {
            FlipOutcome::SecondRevealed
        } else {
            FlipOutcome::FirstRevealed
        })
    }

    fn resolve(&mut self) -> Option<Resolution> {
        let &[first, second] = self.flipped.as_slice() else {
            return None;
        };
        self.flipped.clear();

        let (a, b) = (self.board.get(first)?, self.board.get(second)?);
        let player = self.turn.current();

        if a.pairs_with(b) {
            let path = a.path().to_path_buf();
            self.board.claim(first, player);
            self.board.claim(second, player);
            self.scores[player] += 1;
            let recorded = self.gallery.record(&path, player);
            log::debug!(
                "{} matched cards {} and {} (score {})",
                player,
                first,
                second,
                self.scores[player]
            );
            if self.board.is_cleared() {
                log::info!("board cleared, scores {:?}", self.scores.values().collect::<Vec<_>>());
            }
            Some(Resolution::Match {
                player,
                cards: [first, second],
                recorded,
            })
        } else {
            let next_player = self.turn.advance();
            log::debug!("mismatch on {} and {}, turn to {}", first, second, next_player);
            Some(Resolution::Mismatch {
                cards: [first, second],
                next_player,
            })
        }
    }

    fn is_terminal(&self) -> Option<GameResult> {
        if !self.board.is_cleared() {
            return None;
        }
        Some(GameResult::from_winners(TurnController::winners(&self.scores)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardFace, ImageId};

    /// Board laid out as A A B B C C ... in order.
    fn ordered_board(pairs: u32) -> Board {
        let cards = (0..pairs)
            .flat_map(|i| {
                let face = CardFace::new(ImageId::new(i), format!("{}.png", i));
                [Card::new(&face), Card::new(&face)]
            })
            .collect();
        Board::from_cards(cards)
    }

    #[test]
    fn test_phases() {
        let mut state = GameState::new(ordered_board(2), 1);
        assert_eq!(state.phase(), Phase::Idle);

        assert_eq!(state.flip(0), Ok(FlipOutcome::FirstRevealed));
        assert_eq!(state.phase(), Phase::OneFlipped);

        assert_eq!(state.flip(2), Ok(FlipOutcome::SecondRevealed));
        assert_eq!(state.phase(), Phase::Evaluating);

        state.resolve();
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_match_credits_current_player() {
        let mut state = GameState::new(ordered_board(2), 2);

        let resolution = state.play_turn(0, 1).unwrap();
        assert_eq!(
            resolution,
            Resolution::Match {
                player: PlayerId::new(0),
                cards: [0, 1],
                recorded: true,
            }
        );
        assert_eq!(state.scores()[PlayerId::new(0)], 1);
        assert_eq!(state.current_player(), PlayerId::new(0));
        assert_eq!(state.board().get(1).unwrap().owner(), Some(PlayerId::new(0)));
        assert!(state.is_face_up(0));
        assert_eq!(state.gallery().len(), 1);
    }

    #[test]
    fn test_mismatch_passes_turn() {
        let mut state = GameState::new(ordered_board(2), 3);

        let resolution = state.play_turn(0, 2).unwrap();
        assert_eq!(
            resolution,
            Resolution::Mismatch {
                cards: [0, 2],
                next_player: PlayerId::new(1),
            }
        );
        assert_eq!(state.current_player(), PlayerId::new(1));
        assert!(!state.is_face_up(0));
        assert!(!state.is_face_up(2));
        assert_eq!(state.scores().values().sum::<u32>(), 0);
    }

    #[test]
    fn test_rejected_flips_leave_state_unchanged() {
        let mut state = GameState::new(ordered_board(3), 2);
        state.play_turn(0, 1).unwrap();

        assert_eq!(state.flip(0), Err(FlipRejection::AlreadyMatched));
        assert_eq!(state.flip(99), Err(FlipRejection::OutOfRange));

        state.flip(2).unwrap();
        assert_eq!(state.flip(2), Err(FlipRejection::AlreadyFaceUp));
        state.flip(4).unwrap();
        assert_eq!(state.flip(5), Err(FlipRejection::Evaluating));
        assert_eq!(state.flipped(), &[2, 4]);
        assert!(state.legal_flips().is_empty());
    }

    #[test]
    fn test_resolve_without_pair_is_noop() {
        let mut state = GameState::new(ordered_board(2), 2);
        assert_eq!(state.resolve(), None);

        state.flip(0).unwrap();
        assert_eq!(state.resolve(), None);
        assert_eq!(state.flipped(), &[0]);
    }

    #[test]
    fn test_legal_flips_skip_face_up_and_matched() {
        let mut state = GameState::new(ordered_board(2), 1);
        state.play_turn(0, 1).unwrap();
        state.flip(3).unwrap();
        assert_eq!(state.legal_flips(), vec![2]);
    }

    #[test]
    fn test_single_player_game_to_completion() {
        let mut state = GameState::new(ordered_board(3), 1);
        state.play_turn(0, 2).unwrap();
        assert_eq!(state.current_player(), PlayerId::new(0));

        for pair in 0..3 {
            assert!(state.is_terminal().is_none());
            state.play_turn(pair * 2, pair * 2 + 1).unwrap();
        }

        assert_eq!(state.phase(), Phase::Finished);
        assert_eq!(state.is_terminal(), Some(GameResult::Winner(PlayerId::new(0))));
        assert_eq!(state.scores()[PlayerId::new(0)], 3);
    }

    #[test]
    fn test_tie_reports_all_winners() {
        let mut state = GameState::new(ordered_board(4), 2);
        state.play_turn(0, 1).unwrap();
        state.play_turn(2, 3).unwrap();
        state.play_turn(4, 6).unwrap();
        assert_eq!(state.current_player(), PlayerId::new(1));
        state.play_turn(4, 5).unwrap();
        state.play_turn(6, 7).unwrap();

        assert_eq!(
            state.is_terminal(),
            Some(GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(1)]))
        );
    }
}
