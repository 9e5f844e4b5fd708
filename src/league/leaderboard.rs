//! Ranked listing of a roster

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::Result;
use crate::league::roster::Roster;
use crate::types::PlayerId;

/// One ranked row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    pub name: PlayerId,
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

/// Players ordered by descending rating, ties broken by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn from_roster(roster: &Roster) -> Self {
        let mut rows: Vec<(&PlayerId, f64, f64, f64)> = roster
            .players()
            .map(|(name, player)| {
                (
                    name,
                    player.rating(),
                    player.deviation(),
                    player.volatility(),
                )
            })
            .collect();

        rows.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(index, (name, rating, deviation, volatility))| LeaderboardEntry {
                rank: index + 1,
                name: name.clone(),
                rating,
                deviation,
                volatility,
            })
            .collect();

        Self { entries }
    }

    /// Fixed-width text table, one player per line
    pub fn render_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{:>3}{:>30}: {:>6.1}   +/- {:>5.1}   {:.5}\n",
                    entry.rank, entry.name, entry.rating, entry.deviation, entry.volatility
                )
            })
            .collect()
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for Leaderboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_text())
    }
}
