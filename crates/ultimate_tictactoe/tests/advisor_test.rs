//! Tests for the move advisor against whole games.

use rand::SeedableRng;
use rand::rngs::StdRng;
use ultimate_tictactoe::advisor::{self, Advisor, AdvisorError, Difficulty};
use ultimate_tictactoe::{GameState, Mark, Move, Outcome};

fn play(black: &mut Advisor, white: &mut Advisor) -> GameState {
    let mut game = GameState::new();
    while !game.is_over() {
        let advisor = match game.current_player() {
            Mark::Black => &mut *black,
            Mark::White => &mut *white,
        };
        let mv = advisor.choose(&game).expect("live game has a move");
        assert!(game.is_legal(mv), "advisor proposed illegal move {mv}");
        game = game.apply_move(mv).expect("legal move applies");
    }
    game
}

#[test]
fn test_hard_never_proposes_illegal_moves() {
    for seed in 0..10 {
        let mut black = Advisor::seeded(Difficulty::Hard, seed);
        let mut white = Advisor::seeded(Difficulty::Hard, seed + 100);
        let game = play(&mut black, &mut white);
        assert!(game.outcome().is_some());
    }
}

#[test]
fn test_seeded_games_are_reproducible() {
    let first = play(
        &mut Advisor::seeded(Difficulty::Hard, 5),
        &mut Advisor::seeded(Difficulty::Easy, 6),
    );
    let second = play(
        &mut Advisor::seeded(Difficulty::Hard, 5),
        &mut Advisor::seeded(Difficulty::Easy, 6),
    );
    assert_eq!(first, second);
}

#[test]
fn test_hard_usually_beats_easy() {
    let mut hard_wins = 0;
    let mut easy_wins = 0;
    for seed in 0..30 {
        let game = play(
            &mut Advisor::seeded(Difficulty::Hard, seed),
            &mut Advisor::seeded(Difficulty::Easy, seed),
        );
        match game.outcome() {
            Some(Outcome::Winner(Mark::Black)) => hard_wins += 1,
            Some(Outcome::Winner(Mark::White)) => easy_wins += 1,
            _ => {}
        }
    }
    assert!(hard_wins > easy_wins, "hard {hard_wins} vs easy {easy_wins}");
}

#[test]
fn test_advisor_does_not_mutate_state() {
    let game = GameState::new()
        .apply_move(Move::from_indices(2, 6).expect("in range"))
        .expect("legal");
    let snapshot = game.clone();
    let mut rng = StdRng::seed_from_u64(11);
    let _ = advisor::best_move(&game, &mut rng).expect("live game");
    assert_eq!(game, snapshot);
}

#[test]
fn test_legal_moves_match_engine() {
    let game = GameState::new()
        .apply_move(Move::from_indices(0, 8).expect("in range"))
        .expect("legal");
    let moves = advisor::legal_moves(&game);
    assert_eq!(moves.len(), 9);
    assert!(moves.iter().all(|mv| mv.board.to_index() == 8));
    assert!(moves.windows(2).all(|w| w[0] < w[1]), "scan order");
}

#[test]
fn test_no_move_after_game_over() {
    let mut black = Advisor::seeded(Difficulty::Hard, 1);
    let mut white = Advisor::seeded(Difficulty::Hard, 2);
    let game = play(&mut black, &mut white);
    assert_eq!(black.choose(&game), Err(AdvisorError::NoLegalMove));
}
