//! Errors surfaced by tournament operations, each tagged with an [`ErrorKind`].

use crate::models::game::{MatchId, MatchStatus};
use crate::models::group::GroupId;
use crate::models::player::PlayerId;
use serde::Serialize;
use thiserror::Error;

/// Broad failure category, used by callers to pick a response.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Precondition,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("Invalid set score {p1}-{p2}")]
    InvalidSetScore { p1: i32, p2: i32 },
    #[error("Match must have 2 or 3 sets (got {0})")]
    WrongSetCount(usize),
    /// Sets were valid but nobody reached two won sets.
    #[error("No winner determined (need 2 won sets)")]
    NoMatchWinner,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Player name must not be empty")]
    EmptyPlayerName,
    #[error("Player {0} is listed more than once")]
    DuplicatePlayer(PlayerId),
    #[error("Invalid CSV input: {0}")]
    InvalidCsv(String),

    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Final not finished or not found for group {0}")]
    NoChampion(GroupId),

    #[error("Match {0} is finished and cannot change status")]
    MatchFinished(MatchId),
    #[error("Cannot move match {match_id} from {from} to {to}")]
    InvalidTransition {
        match_id: MatchId,
        from: MatchStatus,
        to: MatchStatus,
    },
    #[error("Match {0} already has a result recorded")]
    ResultAlreadyRecorded(MatchId),
    #[error("Group matches already generated for group {0}")]
    GroupMatchesAlreadyGenerated(GroupId),
    #[error("Playoff already generated for group {0}")]
    PlayoffAlreadyGenerated(GroupId),
    #[error("Final already exists ({0})")]
    FinalAlreadyExists(MatchId),

    #[error("Group stage not finished ({} unfinished)", .unfinished_ids.len())]
    GroupStageIncomplete { unfinished_ids: Vec<MatchId> },
    #[error("Need exactly 2 semifinals to create final (found {0})")]
    WrongSemiFinalCount(usize),
    #[error("Semifinals not finished ({} without winner)", .missing_winner_ids.len())]
    SemiFinalsUnfinished { missing_winner_ids: Vec<MatchId> },
    #[error("Need at least 4 players for playoff (have {ranked})")]
    NotEnoughPlayersForPlayoff { ranked: usize },
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            InvalidSetScore { .. }
            | WrongSetCount(_)
            | NoMatchWinner
            | InvalidConfig(_)
            | EmptyPlayerName
            | DuplicatePlayer(_)
            | InvalidCsv(_) => ErrorKind::Validation,
            GroupNotFound(_) | MatchNotFound(_) | PlayerNotFound(_) | NoChampion(_) => {
                ErrorKind::NotFound
            }
            MatchFinished(_)
            | InvalidTransition { .. }
            | ResultAlreadyRecorded(_)
            | GroupMatchesAlreadyGenerated(_)
            | PlayoffAlreadyGenerated(_)
            | FinalAlreadyExists(_) => ErrorKind::Conflict,
            GroupStageIncomplete { .. }
            | WrongSemiFinalCount(_)
            | SemiFinalsUnfinished { .. }
            | NotEnoughPlayersForPlayoff { .. } => ErrorKind::Precondition,
        }
    }

    /// Match ids the failure refers to, if any (unfinished or winnerless matches).
    pub fn match_ids(&self) -> &[MatchId] {
        match self {
            TournamentError::GroupStageIncomplete { unfinished_ids } => unfinished_ids,
            TournamentError::SemiFinalsUnfinished { missing_winner_ids } => missing_winner_ids,
            _ => &[],
        }
    }
}
