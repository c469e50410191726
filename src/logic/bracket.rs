//! Playoff bracket: semifinals seeded from standings, then the final.

use crate::logic::standings::{compute_standings, StandingEntry};
use crate::models::{GameMatch, Group, GroupId, PlayerId, RoundType, TournamentError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PLAYOFF_SIZE: usize = 4;

/// Created semifinals together with the seeds they were drawn from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SemiFinalBracket {
    pub group_id: GroupId,
    /// Seeds 1 to 4, best first.
    pub top4: Vec<StandingEntry>,
    /// Seed 1 vs seed 4, then seed 2 vs seed 3.
    pub semis: Vec<GameMatch>,
}

/// Build the two semifinals for `group` from its matches (all rounds).
///
/// Requires a complete group stage and no existing playoff match.
pub fn generate_semi_finals(
    group: &Group,
    matches: &[GameMatch],
    now: DateTime<Utc>,
) -> Result<SemiFinalBracket, TournamentError> {
    let group_matches: Vec<&GameMatch> = matches
        .iter()
        .filter(|m| m.group_id == group.id)
        .collect();

    let unfinished_ids: Vec<_> = group_matches
        .iter()
        .filter(|m| m.round == RoundType::Group && !m.is_complete())
        .map(|m| m.id)
        .collect();
    if !unfinished_ids.is_empty() {
        return Err(TournamentError::GroupStageIncomplete { unfinished_ids });
    }
    if group_matches.iter().any(|m| m.round.is_playoff()) {
        return Err(TournamentError::PlayoffAlreadyGenerated(group.id));
    }

    let group_round: Vec<GameMatch> = group_matches.into_iter().cloned().collect();
    let standings = compute_standings(&group.players, &group_round);
    if standings.len() < PLAYOFF_SIZE {
        return Err(TournamentError::NotEnoughPlayersForPlayoff { ranked: standings.len() });
    }
    let top4: Vec<StandingEntry> = standings.into_iter().take(PLAYOFF_SIZE).collect();

    let semis = vec![
        GameMatch::new(group.id, top4[0].player_id, top4[3].player_id, RoundType::PlayoffSemi, now),
        GameMatch::new(group.id, top4[1].player_id, top4[2].player_id, RoundType::PlayoffSemi, now),
    ];
    Ok(SemiFinalBracket { group_id: group.id, top4, semis })
}

/// Build the final from the winners of the group's two semifinals.
pub fn generate_final(
    group_id: GroupId,
    matches: &[GameMatch],
    now: DateTime<Utc>,
) -> Result<GameMatch, TournamentError> {
    let semis: Vec<&GameMatch> = matches
        .iter()
        .filter(|m| m.group_id == group_id && m.round == RoundType::PlayoffSemi)
        .collect();
    if semis.len() != 2 {
        return Err(TournamentError::WrongSemiFinalCount(semis.len()));
    }

    let missing_winner_ids: Vec<_> = semis
        .iter()
        .filter(|m| !m.is_complete())
        .map(|m| m.id)
        .collect();
    if !missing_winner_ids.is_empty() {
        return Err(TournamentError::SemiFinalsUnfinished { missing_winner_ids });
    }
    let winners: Vec<PlayerId> = semis.iter().filter_map(|m| m.winner).collect();

    if let Some(existing) = matches
        .iter()
        .find(|m| m.group_id == group_id && m.round == RoundType::PlayoffFinal)
    {
        return Err(TournamentError::FinalAlreadyExists(existing.id));
    }

    Ok(GameMatch::new(
        group_id,
        winners[0],
        winners[1],
        RoundType::PlayoffFinal,
        now,
    ))
}
