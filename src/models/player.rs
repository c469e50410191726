//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// A registered player. Name and club are display-only; the engine works on ids.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub club: String,
}

impl Player {
    /// Create a new player with a fresh id. Name and club are trimmed.
    pub fn new(name: impl Into<String>, club: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            club: club.into().trim().to_string(),
        }
    }
}
