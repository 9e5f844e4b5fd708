//! League document model
//!
//! A league document lists players (with optional starting ratings), teams,
//! and the rating periods to process. Documents are TOML by default and JSON
//! when the file extension is `.json`.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::types::{Outcome, PlayerId, TeamName};

/// Complete league description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueDocument {
    pub players: Vec<PlayerEntry>,
    pub teams: Vec<TeamEntry>,
    pub periods: Vec<PeriodEntry>,
}

/// A player and any starting values that override the configured defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deviation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
}

/// A named group of players that competes as one side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: TeamName,
    pub members: Vec<PlayerId>,
}

/// One rating period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodEntry {
    pub events: Vec<Event>,
}

/// A contest inside a period. Sides may name players or teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Event {
    /// Head-to-head game; `result` is from the home side's point of view
    Game {
        home: String,
        away: String,
        result: Outcome,
    },
    /// Finishing order, winner first
    Race { competitors: Vec<String> },
}

impl LeagueDocument {
    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse TOML league document")
    }

    /// Parse a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse JSON league document")
    }

    /// Load a document, picking the format from the file extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read league document {}", path.display()))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let document = if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        };

        document.with_context(|| format!("Invalid league document {}", path.display()))
    }

    /// Total number of events across all periods
    pub fn event_count(&self) -> usize {
        self.periods.iter().map(|period| period.events.len()).sum()
    }
}
