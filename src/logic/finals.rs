//! Playoff rounds of a group: semifinals (top 4) and the final. The winner of
//! the final is the group champion.

use crate::logic::bracket::{generate_final, generate_semi_finals, SemiFinalBracket};
use crate::models::{GameMatch, GroupId, PlayerId, RoundType, Tournament, TournamentError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playoff matches of a group, for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayoffView {
    pub semis: Vec<GameMatch>,
    #[serde(rename = "final")]
    pub final_match: Option<GameMatch>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub champion: PlayerId,
    pub final_match: GameMatch,
}

/// Seed the top four of a finished group into two semifinals (1 vs 4, 2 vs 3).
///
/// Check and insert happen under the same `&mut` borrow, so with the
/// tournament behind a lock two concurrent requests cannot both succeed.
pub fn generate_playoff(
    tournament: &mut Tournament,
    group_id: GroupId,
    now: DateTime<Utc>,
) -> Result<SemiFinalBracket, TournamentError> {
    let group = tournament.group(group_id)?;
    let bracket = generate_semi_finals(group, &tournament.matches, now)?;
    log::info!("Playoff semifinals created for group {}", group_id);
    tournament.matches.extend(bracket.semis.iter().cloned());
    Ok(bracket)
}

/// Create the final between the two semifinal winners.
pub fn generate_playoff_final(
    tournament: &mut Tournament,
    group_id: GroupId,
    now: DateTime<Utc>,
) -> Result<GameMatch, TournamentError> {
    tournament.group(group_id)?;
    let final_match = generate_final(group_id, &tournament.matches, now)?;
    log::info!("Playoff final created for group {}", group_id);
    tournament.matches.push(final_match.clone());
    Ok(final_match)
}

pub fn playoff_view(
    tournament: &Tournament,
    group_id: GroupId,
) -> Result<PlayoffView, TournamentError> {
    tournament.group(group_id)?;
    let matches = tournament.group_matches(group_id);
    let semis = matches
        .iter()
        .filter(|m| m.round == RoundType::PlayoffSemi)
        .cloned()
        .collect();
    let final_match = matches.into_iter().find(|m| m.round == RoundType::PlayoffFinal);
    Ok(PlayoffView { semis, final_match })
}

/// Winner of the group's final, once it has been played.
pub fn group_champion(
    tournament: &Tournament,
    group_id: GroupId,
) -> Result<Champion, TournamentError> {
    tournament.group(group_id)?;
    tournament
        .matches
        .iter()
        .find(|m| m.group_id == group_id && m.round == RoundType::PlayoffFinal && m.is_complete())
        .and_then(|m| {
            m.winner.map(|champion| Champion {
                champion,
                final_match: m.clone(),
            })
        })
        .ok_or(TournamentError::NoChampion(group_id))
}
