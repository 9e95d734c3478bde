//! Properties of the minimax search over the whole game tree

mod common;

use common::{board, reachable_positions};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tictactoe_minimax::{
    policy::{AiPlayer, DifficultyTier, TierTable},
    search::{FULL_DEPTH, Minimax},
    tictactoe::{Board, GameMode, GameOutcome, GameSession, Player, Position},
};

#[test]
fn reachable_position_count() {
    assert_eq!(reachable_positions().len(), 5478);
}

#[test]
fn search_leaves_every_reachable_board_unchanged() {
    let engine = Minimax::new(Player::O);
    for (position, to_move) in reachable_positions() {
        let maximizing = to_move == Player::O;
        for depth_limit in [0, 3, FULL_DEPTH] {
            let mut scratch = position;
            engine.minimax(&mut scratch, maximizing, 0, depth_limit);
            assert_eq!(scratch, position, "board changed at limit {depth_limit}");
        }
    }
}

#[test]
fn pruned_search_matches_plain_search_everywhere() {
    for maximizer in [Player::X, Player::O] {
        let engine = Minimax::new(maximizer);
        for (position, to_move) in reachable_positions() {
            let maximizing = to_move == maximizer;
            for depth_limit in [3, FULL_DEPTH] {
                let mut scratch = position;
                let plain = engine.minimax(&mut scratch, maximizing, 0, depth_limit);
                let pruned = engine.minimax_pruned(&mut scratch, maximizing, 0, depth_limit);
                assert_eq!(plain, pruned, "{position:?} at limit {depth_limit}");
                assert_eq!(scratch, position);
            }
        }
    }
}

#[test]
fn scores_stay_within_win_range() {
    let engine = Minimax::new(Player::O);
    for (position, to_move) in reachable_positions() {
        let mut scratch = position;
        let value = engine.minimax(&mut scratch, to_move == Player::O, 0, FULL_DEPTH);
        assert!((-10..=10).contains(&value));
    }
}

#[test]
fn optimal_play_from_empty_board_is_a_draw() {
    let mut empty = Board::new();
    assert_eq!(Minimax::new(Player::O).minimax(&mut empty, true, 0, FULL_DEPTH), 0);
    assert_eq!(Minimax::new(Player::X).minimax(&mut empty, true, 0, FULL_DEPTH), 0);
}

#[test]
fn completing_a_row_is_the_unique_best_move() {
    let mut b = board("XX.OO....");
    let engine = Minimax::new(Player::O);

    assert_eq!(engine.minimax(&mut b, true, 0, FULL_DEPTH), 9);

    let scores = engine.score_moves(&mut b, FULL_DEPTH);
    let (best, best_score) = engine.best_move(&mut b, FULL_DEPTH).unwrap();
    assert_eq!(best, Position::new(1, 2));
    for (position, score) in scores {
        if position != best {
            assert!(score < best_score, "{position} scored {score}");
        }
    }
    assert_eq!(b, board("XX.OO...."));
}

#[test]
fn shallower_win_is_preferred() {
    // O can win now at (0,2), or fork with (1,1) and win a move later
    let mut b = board("OO.X.X.X.");
    let engine = Minimax::new(Player::O);
    let scores = engine.score_moves(&mut b, FULL_DEPTH);

    assert!(scores.contains(&(Position::new(0, 2), 10)));
    assert!(scores.contains(&(Position::new(1, 1), 8)));
    assert_eq!(
        engine.best_move(&mut b, FULL_DEPTH).unwrap(),
        (Position::new(0, 2), 10)
    );
    assert_eq!(engine.minimax(&mut b, true, 0, FULL_DEPTH), 9);
}

#[test]
fn hard_tiers_always_draw_each_other() {
    let mut session = GameSession::new(GameMode::SinglePlayer {
        tier: DifficultyTier::Hard,
        ai: Player::O,
    });
    let mut ai = AiPlayer::with_seed(Player::O, TierTable::default(), 1);
    let mut opponent = AiPlayer::with_seed(Player::X, TierTable::default(), 2);

    for _ in 0..3 {
        session.restart();
        while session.outcome().is_none() {
            if session.is_ai_turn() {
                session.ai_move(&mut ai).unwrap();
            } else {
                session.play_ai(&mut opponent, DifficultyTier::Hard).unwrap();
            }
        }
        assert_eq!(session.outcome(), Some(GameOutcome::Draw));
    }
    assert_eq!(session.stats().get(DifficultyTier::Hard).draws, 3);
}

#[test]
fn hard_tier_never_loses_to_random_play() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut ai = AiPlayer::with_seed(Player::O, TierTable::default(), 42);
    let mut session = GameSession::new(GameMode::SinglePlayer {
        tier: DifficultyTier::Hard,
        ai: Player::O,
    });

    for _ in 0..200 {
        session.restart();
        while session.outcome().is_none() {
            if session.is_ai_turn() {
                session.ai_move(&mut ai).unwrap();
            } else {
                let empty = session.board().empty_positions();
                let position = *empty.choose(&mut rng).unwrap();
                session.play(position.row, position.col).unwrap();
            }
        }
    }

    let stats = session.stats().get(DifficultyTier::Hard);
    assert_eq!(stats.total_games, 200);
    assert_eq!(stats.losses, 0);
    assert!(stats.wins > 0);
}
