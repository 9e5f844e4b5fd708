//! Player and team registry for one league
//!
//! The roster owns every [`RatingEntity`] by name and knows which players make
//! up each team. It is passed explicitly into period processing; there is no
//! process-wide registry.

use indexmap::IndexMap;
use tracing::debug;

use crate::config::RatingConfig;
use crate::error::{LadderError, Result};
use crate::league::document::LeagueDocument;
use crate::rating::RatingEntity;
use crate::types::{Outcome, PlayerId, TeamName};

/// Players and teams of a league, in document order
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: IndexMap<PlayerId, RatingEntity>,
    teams: IndexMap<TeamName, Vec<PlayerId>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from a league document, using `config` for omitted values
    pub fn from_document(document: &LeagueDocument, config: &RatingConfig) -> Result<Self> {
        let mut roster = Self::new();

        for entry in &document.players {
            let entity = config
                .new_entity(entry.rating, entry.deviation, entry.volatility)
                .map_err(|e| LadderError::InvalidDocument {
                    message: format!("player {}: {}", entry.name, e),
                })?;
            roster.add_player(entry.name.clone(), entity)?;
        }

        for team in &document.teams {
            roster.add_team(team.name.clone(), team.members.clone())?;
        }

        debug!(
            players = roster.players.len(),
            teams = roster.teams.len(),
            "built roster"
        );

        Ok(roster)
    }

    /// Register a player. Names are unique across players and teams.
    pub fn add_player(&mut self, name: PlayerId, entity: RatingEntity) -> Result<()> {
        if self.contains_name(&name) {
            return Err(LadderError::DuplicateName { name }.into());
        }

        self.players.insert(name, entity);
        Ok(())
    }

    /// Register a team of already known players
    pub fn add_team(&mut self, name: TeamName, members: Vec<PlayerId>) -> Result<()> {
        if self.contains_name(&name) {
            return Err(LadderError::DuplicateName { name }.into());
        }

        if members.is_empty() {
            return Err(LadderError::EmptyTeam { team: name }.into());
        }

        for member in &members {
            if !self.players.contains_key(member) {
                return Err(LadderError::UnknownCompetitor {
                    name: member.clone(),
                }
                .into());
            }
        }

        self.teams.insert(name, members);
        Ok(())
    }

    fn contains_name(&self, name: &str) -> bool {
        self.players.contains_key(name) || self.teams.contains_key(name)
    }

    /// Expand a competitor name into the players it stands for
    pub fn resolve(&self, name: &str) -> Result<Vec<PlayerId>> {
        if let Some(members) = self.teams.get(name) {
            return Ok(members.clone());
        }

        if self.players.contains_key(name) {
            return Ok(vec![name.to_string()]);
        }

        Err(LadderError::UnknownCompetitor {
            name: name.to_string(),
        }
        .into())
    }

    /// Record `outcome` for `subject` against the current state of `opponent`
    pub fn record(&mut self, subject: &str, opponent: &str, outcome: Outcome) -> Result<()> {
        if subject == opponent {
            return Err(LadderError::SelfPairing {
                name: subject.to_string(),
            }
            .into());
        }

        let snapshot = self
            .players
            .get(opponent)
            .map(RatingEntity::snapshot)
            .ok_or_else(|| LadderError::UnknownCompetitor {
                name: opponent.to_string(),
            })?;

        let entity = self
            .players
            .get_mut(subject)
            .ok_or_else(|| LadderError::UnknownCompetitor {
                name: subject.to_string(),
            })?;

        entity.record_snapshot(snapshot, outcome);
        Ok(())
    }

    pub fn player(&self, name: &str) -> Option<&RatingEntity> {
        self.players.get(name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut RatingEntity> {
        self.players.get_mut(name)
    }

    pub fn team_members(&self, name: &str) -> Option<&[PlayerId]> {
        self.teams.get(name).map(Vec::as_slice)
    }

    pub fn players(&self) -> impl Iterator<Item = (&PlayerId, &RatingEntity)> {
        self.players.iter()
    }

    pub(crate) fn players_mut(&mut self) -> &mut IndexMap<PlayerId, RatingEntity> {
        &mut self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
