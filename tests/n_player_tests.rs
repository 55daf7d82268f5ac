//! N-player tests.
//!
//! The engine has no hidden two-player assumptions: seats rotate correctly
//! and ties are reported for every table size from 1 to 6.

use memory_match::cards::{Board, Card, CardFace, ImageId};
use memory_match::core::{PlayerId, PlayerMap, MAX_PLAYERS};
use memory_match::rules::{GameResult, Resolution, RulesEngine};
use memory_match::{GameState, TurnController};

/// Board laid out as A A B B C C ... so pair `k` sits at `2k, 2k + 1`.
fn ordered_board(pairs: u32) -> Board {
    let cards = (0..pairs)
        .flat_map(|i| {
            let face = CardFace::new(ImageId::new(i), format!("{i}.png"));
            [Card::new(&face), Card::new(&face)]
        })
        .collect();
    Board::from_cards(cards)
}

#[test]
fn test_turn_rotation_all_table_sizes() {
    for player_count in 1..=MAX_PLAYERS {
        let mut turn = TurnController::new(player_count);
        let seats: Vec<PlayerId> = (0..player_count * 2).map(|_| turn.advance()).collect();

        let expected: Vec<PlayerId> = (1..=player_count * 2)
            .map(|i| PlayerId::new((i % player_count) as u8))
            .collect();
        assert_eq!(seats, expected, "{player_count} players");
    }
}

/// Every seat misses once, then the first seat is up again.
#[test]
fn test_mismatches_cycle_through_every_seat() {
    for player_count in 1..=MAX_PLAYERS {
        let mut state = GameState::new(ordered_board(2), player_count);
        for seat in 0..player_count {
            assert_eq!(state.current_player(), PlayerId::new(seat as u8));
            // 0 and 2 never pair.
            match state.play_turn(0, 2).unwrap() {
                Resolution::Mismatch { next_player, .. } => {
                    assert_eq!(next_player, PlayerId::new(((seat + 1) % player_count) as u8));
                }
                other => panic!("expected mismatch, got {other:?}"),
            }
        }
        assert_eq!(state.current_player(), PlayerId::new(0));
    }
}

/// Each seat claims two pairs in turn: a six-way tie.
#[test]
fn test_six_way_tie() {
    let mut state = GameState::new(ordered_board(12), 6);

    for seat in 0..6usize {
        assert_eq!(state.current_player(), PlayerId::new(seat as u8));
        let first = 4 * seat;
        state.play_turn(first, first + 1).unwrap();
        state.play_turn(first + 2, first + 3).unwrap();
        if seat < 5 {
            // Miss on purpose to hand the turn on.
            state.play_turn(first + 4, first + 6).unwrap();
        }
    }

    let result = state.is_terminal().unwrap();
    assert_eq!(result, GameResult::Winners(PlayerId::all(6).collect()));
    assert!(state.scores().values().all(|&s| s == 2));
}

#[test]
fn test_winners_by_score() {
    let mut scores: PlayerMap<u32> = PlayerMap::with_value(4, 0);
    scores[PlayerId::new(1)] = 3;
    scores[PlayerId::new(3)] = 3;
    scores[PlayerId::new(2)] = 1;

    assert_eq!(
        TurnController::winners(&scores),
        vec![PlayerId::new(1), PlayerId::new(3)]
    );
}

#[test]
#[should_panic(expected = "At most 6 players supported")]
fn test_seven_players_rejected() {
    let _ = TurnController::new(7);
}
