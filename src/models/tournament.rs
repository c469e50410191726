//! Tournament: players, groups and matches of one event, plus its scheduling defaults.

use crate::models::game::{GameMatch, MatchId};
use crate::models::group::{Group, GroupId};
use crate::models::player::{Player, PlayerId};
use crate::models::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Scheduling defaults for a tournament. A schedule request may override any of them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub courts_count: u32,
    pub match_minutes: i64,
    pub player_rest_minutes: i64,
    pub court_turnover_minutes: i64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            courts_count: 1,
            match_minutes: 35,
            player_rest_minutes: 20,
            court_turnover_minutes: 0,
        }
    }
}

/// Full tournament state. Callers serialize access (one lock per tournament),
/// which makes every `&mut self` operation atomic with respect to other requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub config: TournamentConfig,
    pub players: Vec<Player>,
    pub groups: Vec<Group>,
    /// All matches, in creation order.
    pub matches: Vec<GameMatch>,
}

/// `name` or `name,club`, in any letter case.
fn is_header(record: &csv::StringRecord) -> bool {
    let name = record.get(0).is_some_and(|f| f.eq_ignore_ascii_case("name"));
    let club = record.get(1).map_or(true, |f| f.eq_ignore_ascii_case("club"));
    name && club && record.len() <= 2
}

impl Tournament {
    /// Create an empty tournament.
    pub fn new(name: impl Into<String>, config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            config,
            players: Vec::new(),
            groups: Vec::new(),
            matches: Vec::new(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, TournamentError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))
    }

    pub fn group(&self, id: GroupId) -> Result<&Group, TournamentError> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .ok_or(TournamentError::GroupNotFound(id))
    }

    pub fn game(&self, id: MatchId) -> Result<&GameMatch, TournamentError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    pub fn game_mut(&mut self, id: MatchId) -> Result<&mut GameMatch, TournamentError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    /// All matches of a group (every round), in creation order.
    pub fn group_matches(&self, group_id: GroupId) -> Vec<GameMatch> {
        self.matches
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect()
    }

    /// Register a player. The name is trimmed and must not be empty.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        club: impl Into<String>,
    ) -> Result<PlayerId, TournamentError> {
        let player = Player::new(name, club);
        if player.name.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Import players from CSV rows `name,club`. The club column may be
    /// omitted and a leading `name,club` header row is optional.
    /// Nothing is added unless every row is valid.
    pub fn import_players_csv<R: Read>(&mut self, reader: R) -> Result<Vec<PlayerId>, TournamentError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut imported = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| TournamentError::InvalidCsv(e.to_string()))?;
            if line == 0 && is_header(&record) {
                continue;
            }
            let player = Player::new(record.get(0).unwrap_or(""), record.get(1).unwrap_or(""));
            if player.name.is_empty() {
                return Err(TournamentError::InvalidCsv(format!(
                    "row {}: player name must not be empty",
                    line + 1
                )));
            }
            imported.push(player);
        }
        let ids = imported.iter().map(|p| p.id).collect();
        log::info!("Imported {} player(s) into tournament {}", imported.len(), self.id);
        self.players.append(&mut imported);
        Ok(ids)
    }

    /// Create a group from distinct, registered players.
    pub fn create_group(
        &mut self,
        name: impl Into<String>,
        player_ids: &[PlayerId],
    ) -> Result<GroupId, TournamentError> {
        let mut seen = HashSet::new();
        for &id in player_ids {
            self.player(id)?;
            if !seen.insert(id) {
                return Err(TournamentError::DuplicatePlayer(id));
            }
        }
        let group = Group::new(self.id, name, player_ids.to_vec());
        let id = group.id;
        self.groups.push(group);
        Ok(id)
    }
}
