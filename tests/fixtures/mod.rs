//! Test fixtures and builders for integration testing

#![allow(dead_code)]

use glicko_ladder::config::RatingConfig;
use glicko_ladder::league::{LeagueDocument, Roster};
use glicko_ladder::rating::RatingEntity;

/// League used by the end-to-end tests: two teams, a free agent, one race
/// and one head-to-head period, then an empty period.
pub const CLUB_LEAGUE: &str = r#"
[[players]]
name = "ana"
rating = 1620.0
deviation = 90.0

[[players]]
name = "ben"
rating = 1480.0
deviation = 140.0

[[players]]
name = "cleo"

[[players]]
name = "dev"
rating = 1550.0
deviation = 60.0
volatility = 0.05

[[players]]
name = "eli"
rating = 1400.0
deviation = 200.0

[[teams]]
name = "harbour"
members = ["ana", "ben"]

[[teams]]
name = "ridge"
members = ["cleo", "dev"]

[[periods]]
[[periods.events]]
kind = "game"
home = "harbour"
away = "ridge"
result = "win"

[[periods.events]]
kind = "game"
home = "eli"
away = "dev"
result = "draw"

[[periods]]
[[periods.events]]
kind = "race"
competitors = ["eli", "ridge", "ana"]

[[periods]]
"#;

/// Create an entity with the default volatility
pub fn entity(rating: f64, deviation: f64) -> RatingEntity {
    RatingEntity::new(rating, deviation, 0.06).expect("valid test entity")
}

/// The four players of Glickman's worked example: subject, then opponents
pub fn reference_players() -> (RatingEntity, RatingEntity, RatingEntity, RatingEntity) {
    (
        entity(1500.0, 200.0),
        entity(1400.0, 30.0),
        entity(1550.0, 100.0),
        entity(1700.0, 300.0),
    )
}

/// Parse the club league and build its roster with default settings
pub fn club_roster() -> (LeagueDocument, Roster) {
    let document = LeagueDocument::from_toml_str(CLUB_LEAGUE).expect("valid league document");
    let roster =
        Roster::from_document(&document, &RatingConfig::default()).expect("valid roster");
    (document, roster)
}
