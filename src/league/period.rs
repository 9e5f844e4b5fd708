//! Rating period processing
//!
//! A period is processed in two phases. First every event is recorded for
//! every player, with opponents read from the roster before anyone has been
//! updated. Only then is each player updated, exactly once. Interleaving the
//! two phases would let players see partially updated opponents, so callers
//! should always go through [`process_period`].

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::league::document::{Event, PeriodEntry};
use crate::league::roster::Roster;
use crate::types::{FailedUpdate, Outcome, PeriodReport, RatingChange};

/// Record a single event into the roster without updating anybody
pub fn record_event(roster: &mut Roster, event: &Event) -> Result<()> {
    match event {
        Event::Game { home, away, result } => record_game(roster, home, away, *result),
        Event::Race { competitors } => record_race(roster, competitors),
    }
}

/// Every home player meets every away player
fn record_game(roster: &mut Roster, home: &str, away: &str, result: Outcome) -> Result<()> {
    let home_players = roster.resolve(home)?;
    let away_players = roster.resolve(away)?;

    for home_player in &home_players {
        for away_player in &away_players {
            roster.record(home_player, away_player, result)?;
        }
    }
    for away_player in &away_players {
        for home_player in &home_players {
            roster.record(away_player, home_player, result.inverse())?;
        }
    }

    Ok(())
}

/// Each finisher loses to everyone who finished ahead of it
fn record_race(roster: &mut Roster, competitors: &[String]) -> Result<()> {
    let mut placed: Vec<Vec<String>> = Vec::with_capacity(competitors.len());

    for competitor in competitors {
        let players = roster.resolve(competitor)?;

        for ahead in &placed {
            for winner in ahead {
                for loser in &players {
                    roster.record(winner, loser, Outcome::Win)?;
                    roster.record(loser, winner, Outcome::Loss)?;
                }
            }
        }

        placed.push(players);
    }

    Ok(())
}

/// Record all events of `period`, then update every player once.
///
/// `number` is the 1-based period number used in the report. Players whose
/// update fails keep their previous rating, their pending results are
/// dropped, and the failure is listed in the report. A recording error aborts
/// the period before any player is updated.
pub fn process_period(
    roster: &mut Roster,
    period: &PeriodEntry,
    number: usize,
    parallel: bool,
) -> Result<PeriodReport> {
    for event in &period.events {
        if let Err(e) = record_event(roster, event) {
            discard_pending(roster);
            return Err(e);
        }
    }

    let outcomes: Vec<(RatingChange, Option<FailedUpdate>)> = if parallel {
        roster
            .players_mut()
            .par_iter_mut()
            .map(|(name, entity)| update_player(name, entity))
            .collect()
    } else {
        roster
            .players_mut()
            .iter_mut()
            .map(|(name, entity)| update_player(name, entity))
            .collect()
    };

    let mut changes = Vec::new();
    let mut failures = Vec::new();
    for (change, failure) in outcomes {
        match failure {
            Some(failure) => failures.push(failure),
            None if change.games > 0 => changes.push(change),
            None => {}
        }
    }

    info!(
        period = number,
        events = period.events.len(),
        updated = changes.len(),
        failed = failures.len(),
        "processed rating period"
    );

    Ok(PeriodReport {
        period: number,
        changes,
        failures,
        processed_at: chrono::Utc::now(),
    })
}

fn update_player(
    name: &str,
    entity: &mut crate::rating::RatingEntity,
) -> (RatingChange, Option<FailedUpdate>) {
    let old_rating = entity.player_rating();
    let games = entity.pending_results().len();

    let failure = match entity.update() {
        Ok(()) => None,
        Err(error) => {
            entity.clear_pending_results();
            Some(FailedUpdate {
                player_id: name.to_string(),
                error,
            })
        }
    };

    let change = RatingChange {
        player_id: name.to_string(),
        old_rating,
        new_rating: entity.player_rating(),
        games,
    };

    (change, failure)
}

fn discard_pending(roster: &mut Roster) {
    debug!("discarding recorded results of aborted period");
    for (_, entity) in roster.players_mut().iter_mut() {
        entity.clear_pending_results();
    }
}

/// Process every period in order, returning one report per period
pub fn process_periods(
    roster: &mut Roster,
    periods: &[PeriodEntry],
    parallel: bool,
) -> Result<Vec<PeriodReport>> {
    periods
        .iter()
        .enumerate()
        .map(|(index, period)| process_period(roster, period, index + 1, parallel))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingEntity;

    fn roster(players: &[(&str, f64, f64)]) -> Roster {
        let mut roster = Roster::new();
        for (name, rating, deviation) in players {
            roster
                .add_player(
                    name.to_string(),
                    RatingEntity::new(*rating, *deviation, 0.06).unwrap(),
                )
                .unwrap();
        }
        roster
    }

    fn game(home: &str, away: &str, result: Outcome) -> Event {
        Event::Game {
            home: home.to_string(),
            away: away.to_string(),
            result,
        }
    }

    #[test]
    fn test_game_records_both_sides() {
        let mut roster = roster(&[("a", 1500.0, 200.0), ("b", 1400.0, 30.0)]);
        record_event(&mut roster, &game("a", "b", Outcome::Win)).unwrap();

        let a = roster.player("a").unwrap().pending_results();
        let b = roster.player("b").unwrap().pending_results();
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].outcome, Outcome::Win);
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].outcome, Outcome::Loss);
    }

    #[test]
    fn test_team_game_pairs_every_member() {
        let mut roster = roster(&[
            ("a", 1500.0, 200.0),
            ("b", 1500.0, 200.0),
            ("c", 1500.0, 200.0),
        ]);
        roster
            .add_team("bc".to_string(), vec!["b".to_string(), "c".to_string()])
            .unwrap();

        record_event(&mut roster, &game("bc", "a", Outcome::Draw)).unwrap();

        assert_eq!(roster.player("a").unwrap().pending_results().len(), 2);
        assert_eq!(roster.player("b").unwrap().pending_results().len(), 1);
        assert_eq!(roster.player("c").unwrap().pending_results().len(), 1);
        assert!(roster
            .player("a")
            .unwrap()
            .pending_results()
            .iter()
            .all(|result| result.outcome == Outcome::Draw));
    }

    #[test]
    fn test_race_order() {
        let mut roster = roster(&[
            ("first", 1500.0, 200.0),
            ("second", 1500.0, 200.0),
            ("third", 1500.0, 200.0),
        ]);
        let race = Event::Race {
            competitors: vec!["first".into(), "second".into(), "third".into()],
        };
        record_event(&mut roster, &race).unwrap();

        let outcomes = |name: &str| -> Vec<Outcome> {
            roster
                .player(name)
                .unwrap()
                .pending_results()
                .iter()
                .map(|result| result.outcome)
                .collect()
        };

        assert_eq!(outcomes("first"), vec![Outcome::Win, Outcome::Win]);
        assert_eq!(outcomes("second"), vec![Outcome::Loss, Outcome::Win]);
        assert_eq!(outcomes("third"), vec![Outcome::Loss, Outcome::Loss]);
    }

    #[test]
    fn test_period_uses_pre_period_ratings() {
        let mut roster = roster(&[
            ("a", 1500.0, 200.0),
            ("b", 1400.0, 30.0),
            ("c", 1550.0, 100.0),
            ("d", 1700.0, 300.0),
        ]);
        let period = PeriodEntry {
            events: vec![
                game("a", "b", Outcome::Win),
                game("a", "c", Outcome::Loss),
                game("d", "a", Outcome::Win),
            ],
        };

        let report = process_period(&mut roster, &period, 1, false).unwrap();

        assert_eq!(report.period, 1);
        assert_eq!(report.changes.len(), 4);
        assert!(report.failures.is_empty());

        let a = roster.player("a").unwrap();
        assert!((a.rating() - 1464.05).abs() < 0.01);
        assert!((a.deviation() - 151.52).abs() < 0.01);
        assert!(roster.players().all(|(_, p)| p.pending_results().is_empty()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let players = [
            ("a", 1500.0, 200.0),
            ("b", 1400.0, 30.0),
            ("c", 1550.0, 100.0),
            ("d", 1700.0, 300.0),
            ("idle", 1800.0, 90.0),
        ];
        let period = PeriodEntry {
            events: vec![
                game("a", "b", Outcome::Win),
                game("c", "d", Outcome::Draw),
                Event::Race {
                    competitors: vec!["d".into(), "a".into(), "b".into()],
                },
            ],
        };

        let mut sequential = roster(&players);
        let mut parallel = roster(&players);
        process_period(&mut sequential, &period, 1, false).unwrap();
        let report = process_period(&mut parallel, &period, 1, true).unwrap();

        // Idle players are not reported
        assert_eq!(report.changes.len(), 4);

        for (name, player) in sequential.players() {
            let other = parallel.player(name).unwrap();
            assert_eq!(player.player_rating(), other.player_rating());
        }
    }

    #[test]
    fn test_idle_player_unchanged() {
        let mut roster = roster(&[("a", 1500.0, 200.0), ("b", 1400.0, 30.0), ("idle", 1600.0, 80.0)]);
        let before = roster.player("idle").unwrap().player_rating();

        let period = PeriodEntry {
            events: vec![game("a", "b", Outcome::Draw)],
        };
        process_period(&mut roster, &period, 1, false).unwrap();

        assert_eq!(roster.player("idle").unwrap().player_rating(), before);
    }

    #[test]
    fn test_failed_update_is_isolated() {
        let mut roster = roster(&[("giant", 10_500.0, 50.0), ("a", 1500.0, 50.0)]);
        let period = PeriodEntry {
            events: vec![game("giant", "a", Outcome::Win)],
        };

        let report = process_period(&mut roster, &period, 3, false).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].player_id, "giant");
        assert!(roster.player("giant").unwrap().pending_results().is_empty());
        assert!((roster.player("giant").unwrap().rating() - 10_500.0).abs() < 1e-6);

        // The other side of the game is still rated
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].player_id, "a");
    }

    #[test]
    fn test_unknown_competitor_aborts_period() {
        let mut roster = roster(&[("a", 1500.0, 200.0), ("b", 1500.0, 200.0)]);
        let before = roster.player("a").unwrap().player_rating();
        let period = PeriodEntry {
            events: vec![game("a", "b", Outcome::Win), game("a", "ghost", Outcome::Win)],
        };

        assert!(process_period(&mut roster, &period, 1, false).is_err());
        assert_eq!(roster.player("a").unwrap().player_rating(), before);
        assert!(roster.players().all(|(_, p)| p.pending_results().is_empty()));
    }

    #[test]
    fn test_process_periods_numbers_reports() {
        let mut roster = roster(&[("a", 1500.0, 200.0), ("b", 1500.0, 200.0)]);
        let periods = vec![
            PeriodEntry {
                events: vec![game("a", "b", Outcome::Win)],
            },
            PeriodEntry::default(),
        ];

        let reports = process_periods(&mut roster, &periods, false).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].period, 1);
        assert_eq!(reports[1].period, 2);
        assert!(reports[1].changes.is_empty());
    }
}
