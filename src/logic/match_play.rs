//! Per-match operations: result submission, status changes, scheduling edits.

use crate::logic::lifecycle::{change_status, finish_match};
use crate::models::{GameMatch, MatchId, MatchPatch, MatchStatus, SetScore, Tournament, TournamentError};
use chrono::{DateTime, Utc};

/// Record the sets of a match and finish it. Re-submitting replaces the result.
pub fn submit_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    sets: Vec<SetScore>,
    now: DateTime<Utc>,
) -> Result<GameMatch, TournamentError> {
    let m = tournament.game_mut(match_id)?;
    let winner = finish_match(m, sets, now)?;
    log::info!("Result recorded for match {}: winner {}", match_id, winner);
    Ok(m.clone())
}

/// Explicit status change (start a match, or put a started one back).
pub fn change_match_status(
    tournament: &mut Tournament,
    match_id: MatchId,
    status: MatchStatus,
    now: DateTime<Utc>,
) -> Result<GameMatch, TournamentError> {
    let m = tournament.game_mut(match_id)?;
    change_status(m, status, now)?;
    log::info!("Match {} is now {}", match_id, m.status);
    Ok(m.clone())
}

/// Edit the court or scheduled times of an unfinished match.
pub fn patch_match(
    tournament: &mut Tournament,
    match_id: MatchId,
    patch: &MatchPatch,
) -> Result<GameMatch, TournamentError> {
    let m = tournament.game_mut(match_id)?;
    patch.apply_to(m)?;
    Ok(m.clone())
}
