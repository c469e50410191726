//! Group: a named round-robin pool of players.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Tournament the group belongs to.
    pub tournament_id: TournamentId,
    pub name: String,
    /// Distinct player ids, in registration order.
    pub players: Vec<PlayerId>,
}

impl Group {
    pub fn new(tournament_id: TournamentId, name: impl Into<String>, players: Vec<PlayerId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            players,
        }
    }
}
