//! Match lifecycle: pending -> running -> finished.
//!
//! `Finished` is terminal for status changes. A result may still be
//! re-submitted on a finished match; it is validated again and replaces the
//! previous sets and winner.

use crate::logic::scoring::validate_result;
use crate::models::{GameMatch, MatchStatus, PlayerId, SetScore, TournamentError};
use chrono::{DateTime, Utc};

/// pending -> running. Records the actual start unless one is already set.
pub fn start_match(m: &mut GameMatch, now: DateTime<Utc>) -> Result<(), TournamentError> {
    match m.status {
        MatchStatus::Finished => Err(TournamentError::MatchFinished(m.id)),
        MatchStatus::Running => Err(invalid(m, MatchStatus::Running)),
        MatchStatus::Pending => {
            m.status = MatchStatus::Running;
            m.actual_start.get_or_insert(now);
            Ok(())
        }
    }
}

/// running -> pending, only while no result is recorded.
pub fn revert_to_pending(m: &mut GameMatch) -> Result<(), TournamentError> {
    if m.status == MatchStatus::Finished {
        return Err(TournamentError::MatchFinished(m.id));
    }
    if m.has_result() {
        return Err(TournamentError::ResultAlreadyRecorded(m.id));
    }
    if m.status != MatchStatus::Running {
        return Err(invalid(m, MatchStatus::Pending));
    }
    m.status = MatchStatus::Pending;
    Ok(())
}

/// Record a result and move the match to finished. Returns the winner.
///
/// The sets are validated before anything is written, so a rejected
/// submission leaves the match untouched.
pub fn finish_match(
    m: &mut GameMatch,
    sets: Vec<SetScore>,
    now: DateTime<Utc>,
) -> Result<PlayerId, TournamentError> {
    let winner = validate_result(&sets, m.player_1, m.player_2)?;
    m.sets = sets;
    m.winner = Some(winner);
    m.status = MatchStatus::Finished;
    m.actual_start.get_or_insert(now);
    m.actual_end = Some(now);
    m.result_updated_at = Some(now);
    Ok(winner)
}

/// Handle an explicit status-change request. Finished is only reachable by
/// recording a result, and a finished match rejects every request.
pub fn change_status(
    m: &mut GameMatch,
    target: MatchStatus,
    now: DateTime<Utc>,
) -> Result<(), TournamentError> {
    if m.status == MatchStatus::Finished {
        return Err(TournamentError::MatchFinished(m.id));
    }
    match target {
        MatchStatus::Running => start_match(m, now),
        MatchStatus::Pending => revert_to_pending(m),
        MatchStatus::Finished => Err(invalid(m, MatchStatus::Finished)),
    }
}

fn invalid(m: &GameMatch, to: MatchStatus) -> TournamentError {
    TournamentError::InvalidTransition {
        match_id: m.id,
        from: m.status,
        to,
    }
}
