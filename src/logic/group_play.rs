//! Group stage: match generation, court scheduling, status and standings.

use crate::logic::pairing::generate_round_robin_pairs;
use crate::logic::scheduler::{build_schedule, ScheduleAssignment, ScheduleRequest};
use crate::logic::standings::{compute_standings, StandingEntry};
use crate::models::{
    GameMatch, GroupId, MatchId, MatchStatus, RoundType, Tournament, TournamentError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Completion overview of a group's matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStatus {
    pub total: usize,
    pub finished: usize,
    pub unfinished_count: usize,
    pub unfinished_ids: Vec<MatchId>,
}

/// Create the full round-robin of pending group matches for a group.
///
/// Refuses when the group already has group-stage matches, so a repeated
/// request cannot double the schedule.
pub fn generate_group_matches(
    tournament: &mut Tournament,
    group_id: GroupId,
    now: DateTime<Utc>,
) -> Result<Vec<GameMatch>, TournamentError> {
    let group = tournament.group(group_id)?;
    if tournament
        .matches
        .iter()
        .any(|m| m.group_id == group_id && m.round == RoundType::Group)
    {
        return Err(TournamentError::GroupMatchesAlreadyGenerated(group_id));
    }

    let matches: Vec<GameMatch> = generate_round_robin_pairs(&group.players)
        .into_iter()
        .map(|(p1, p2)| GameMatch::new(group_id, p1, p2, RoundType::Group, now))
        .collect();

    log::info!("Generated {} group matches for group {}", matches.len(), group_id);
    tournament.matches.extend(matches.iter().cloned());
    Ok(matches)
}

/// Count finished and unfinished matches of a group (every round).
pub fn group_status(
    tournament: &Tournament,
    group_id: GroupId,
) -> Result<GroupStatus, TournamentError> {
    tournament.group(group_id)?;
    let matches = tournament.group_matches(group_id);
    let unfinished_ids: Vec<MatchId> = matches
        .iter()
        .filter(|m| !m.is_complete())
        .map(|m| m.id)
        .collect();
    Ok(GroupStatus {
        total: matches.len(),
        finished: matches.len() - unfinished_ids.len(),
        unfinished_count: unfinished_ids.len(),
        unfinished_ids,
    })
}

/// Current standings of a group from its finished group-round matches.
pub fn group_standings(
    tournament: &Tournament,
    group_id: GroupId,
) -> Result<Vec<StandingEntry>, TournamentError> {
    let group = tournament.group(group_id)?;
    Ok(compute_standings(&group.players, &tournament.group_matches(group_id)))
}

/// Pending matches of a group that may be scheduled at `now`, in creation order.
pub fn eligible_matches(
    tournament: &Tournament,
    group_id: GroupId,
    now: DateTime<Utc>,
    only_unscheduled: bool,
) -> Vec<GameMatch> {
    let mut eligible: Vec<GameMatch> = tournament
        .matches
        .iter()
        .filter(|m| m.group_id == group_id && m.status == MatchStatus::Pending)
        .filter(|m| m.created_at <= now)
        .filter(|m| !only_unscheduled || m.scheduled_start.is_none())
        .cloned()
        .collect();
    eligible.sort_by_key(|m| m.created_at);
    eligible
}

/// Plan court slots for a group's eligible matches and apply the whole plan.
pub fn schedule_group_matches(
    tournament: &mut Tournament,
    group_id: GroupId,
    request: &ScheduleRequest,
    now: DateTime<Utc>,
) -> Result<Vec<ScheduleAssignment>, TournamentError> {
    tournament.group(group_id)?;
    let config = request.resolve(&tournament.config, now)?;
    let eligible = eligible_matches(tournament, group_id, now, request.only_unscheduled);
    let plan = build_schedule(&eligible, &config)?;
    apply_schedule(tournament, &plan)?;
    log::info!(
        "Scheduled {} match(es) for group {} on {} court(s)",
        plan.len(),
        group_id,
        config.courts_count
    );
    Ok(plan)
}

/// Write assignments onto their matches, all or nothing.
///
/// Every target is checked first (exists, not finished); no match is touched
/// unless all of them pass.
pub fn apply_schedule(
    tournament: &mut Tournament,
    plan: &[ScheduleAssignment],
) -> Result<(), TournamentError> {
    let mut positions = Vec::with_capacity(plan.len());
    for a in plan {
        let pos = tournament
            .matches
            .iter()
            .position(|m| m.id == a.match_id)
            .ok_or(TournamentError::MatchNotFound(a.match_id))?;
        if tournament.matches[pos].status == MatchStatus::Finished {
            return Err(TournamentError::MatchFinished(a.match_id));
        }
        positions.push(pos);
    }
    for (a, pos) in plan.iter().zip(positions) {
        let m = &mut tournament.matches[pos];
        m.court_number = Some(a.court_number);
        m.scheduled_start = Some(a.start_at);
        m.scheduled_end = Some(a.end_at);
    }
    Ok(())
}
