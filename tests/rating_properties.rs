//! Property tests for the Glicko-2 update

use glicko_ladder::rating::RatingEntity;
use glicko_ladder::Outcome;
use proptest::prelude::*;

fn outcome_strategy() -> impl Strategy<Value = Outcome> {
    prop_oneof![Just(Outcome::Win), Just(Outcome::Loss), Just(Outcome::Draw)]
}

fn opponents_strategy(
    ratings: std::ops::Range<f64>,
    deviations: std::ops::Range<f64>,
    max_games: usize,
) -> impl Strategy<Value = Vec<(f64, f64, Outcome)>> {
    prop::collection::vec((ratings, deviations, outcome_strategy()), 1..=max_games)
}

fn rated(
    rating: f64,
    deviation: f64,
    volatility: f64,
    opponents: &[(f64, f64, Outcome)],
) -> RatingEntity {
    let mut player = RatingEntity::new(rating, deviation, volatility).unwrap();
    for (opponent_rating, opponent_deviation, outcome) in opponents {
        let opponent = RatingEntity::new(*opponent_rating, *opponent_deviation, 0.06).unwrap();
        player.record_outcome(&opponent, *outcome);
    }
    player
}

proptest! {
    /// Property: updating with nothing recorded changes nothing
    #[test]
    fn prop_empty_update_is_noop(
        rating in 500.0f64..2800.0,
        deviation in 20.0f64..400.0,
        volatility in 0.01f64..0.2
    ) {
        let mut player = RatingEntity::new(rating, deviation, volatility).unwrap();
        let before = player.player_rating();
        player.update().unwrap();
        prop_assert_eq!(player.rating().to_bits(), before.rating.to_bits());
        prop_assert_eq!(player.deviation().to_bits(), before.deviation.to_bits());
        prop_assert_eq!(player.volatility().to_bits(), before.volatility.to_bits());
    }

    /// Property: the same inputs always produce bit-identical outputs
    #[test]
    fn prop_update_is_deterministic(
        rating in 500.0f64..2800.0,
        deviation in 20.0f64..400.0,
        volatility in 0.01f64..0.2,
        opponents in opponents_strategy(500.0..2800.0, 20.0..400.0, 12)
    ) {
        let mut first = rated(rating, deviation, volatility, &opponents);
        let mut second = first.clone();
        first.update().unwrap();
        second.update().unwrap();
        prop_assert_eq!(first.rating().to_bits(), second.rating().to_bits());
        prop_assert_eq!(first.deviation().to_bits(), second.deviation().to_bits());
        prop_assert_eq!(first.volatility().to_bits(), second.volatility().to_bits());
    }

    /// Property: realistic batches always produce finite, valid state
    #[test]
    fn prop_update_stays_valid(
        rating in 500.0f64..2800.0,
        deviation in 20.0f64..400.0,
        volatility in 0.01f64..0.2,
        opponents in opponents_strategy(500.0..2800.0, 20.0..400.0, 12)
    ) {
        let mut player = rated(rating, deviation, volatility, &opponents);
        prop_assert!(player.update().is_ok());
        prop_assert!(player.rating().is_finite());
        prop_assert!(player.deviation().is_finite() && player.deviation() > 0.0);
        prop_assert!(player.volatility().is_finite() && player.volatility() > 0.0);
        prop_assert!(player.pending_results().is_empty());
    }

    /// Property: a win against an opponent never rates lower than a loss
    #[test]
    fn prop_win_beats_loss(
        rating in 500.0f64..2800.0,
        deviation in 20.0f64..400.0,
        volatility in 0.01f64..0.2,
        opponent_rating in 500.0f64..2800.0,
        opponent_deviation in 20.0f64..400.0
    ) {
        let mut winner = rated(rating, deviation, volatility, &[(opponent_rating, opponent_deviation, Outcome::Win)]);
        let mut loser = rated(rating, deviation, volatility, &[(opponent_rating, opponent_deviation, Outcome::Loss)]);
        let before = winner.rating();
        winner.update().unwrap();
        loser.update().unwrap();
        prop_assert!(winner.rating() > before);
        prop_assert!(loser.rating() < before);
    }

    /// Property: playing well-known opponents lowers an uncertain player's deviation
    #[test]
    fn prop_games_reduce_deviation(
        rating in 1300.0f64..1700.0,
        deviation in 150.0f64..350.0,
        volatility in 0.04f64..0.08,
        opponents in opponents_strategy(1300.0..1700.0, 30.0..150.0, 8)
    ) {
        let mut player = rated(rating, deviation, volatility, &opponents);
        let before = player.deviation();
        player.update().unwrap();
        prop_assert!(player.deviation() < before);
    }
}
