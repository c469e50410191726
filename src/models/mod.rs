//! Data structures for the badminton tournament: players, groups, matches, errors.

mod error;
mod game;
mod group;
mod player;
mod tournament;

pub use error::{ErrorKind, TournamentError};
pub use game::{GameMatch, MatchId, MatchPatch, MatchStatus, RoundType, SetScore};
pub use group::{Group, GroupId};
pub use player::{Player, PlayerId};
pub use tournament::{Tournament, TournamentConfig, TournamentId};
