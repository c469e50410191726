//! Match (game), set scores, round and lifecycle status.

use crate::models::group::GroupId;
use crate::models::player::PlayerId;
use crate::models::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Score of one set. Signed so that malformed input reaches the scoring rules
/// instead of being silently clamped.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub p1: i32,
    pub p2: i32,
}

impl SetScore {
    pub fn new(p1: i32, p2: i32) -> Self {
        Self { p1, p2 }
    }
}

/// Phase of the competition this match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    Group,
    PlayoffSemi,
    PlayoffFinal,
}

impl RoundType {
    pub fn is_playoff(self) -> bool {
        matches!(self, RoundType::PlayoffSemi | RoundType::PlayoffFinal)
    }
}

/// Lifecycle status. `Finished` is terminal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Running,
    Finished,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Running => "running",
            MatchStatus::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// A single 1v1 match between two players of a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub group_id: GroupId,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub round: RoundType,
    pub status: MatchStatus,
    /// 0, 2 or 3 sets. Replaced as a whole on re-submission.
    pub sets: Vec<SetScore>,
    /// Present iff one side won two of `sets`.
    pub winner: Option<PlayerId>,
    /// 1-based court number, once scheduled.
    pub court_number: Option<u32>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub result_updated_at: Option<DateTime<Utc>>,
    /// Creation instant; scheduling priority follows it.
    pub created_at: DateTime<Utc>,
}

impl GameMatch {
    pub fn new(
        group_id: GroupId,
        player_1: PlayerId,
        player_2: PlayerId,
        round: RoundType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            player_1,
            player_2,
            round,
            status: MatchStatus::Pending,
            sets: Vec::new(),
            winner: None,
            court_number: None,
            scheduled_start: None,
            scheduled_end: None,
            actual_start: None,
            actual_end: None,
            result_updated_at: None,
            created_at,
        }
    }

    /// True when a result is on record: a winner and at least two sets.
    ///
    /// This is the single completeness check used by standings, the bracket
    /// and the status view.
    pub fn is_complete(&self) -> bool {
        self.winner.is_some() && self.sets.len() >= 2
    }

    pub fn has_result(&self) -> bool {
        self.winner.is_some() || !self.sets.is_empty()
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.player_1 == player || self.player_2 == player
    }

    /// True if this is the direct match between `a` and `b`, in either order.
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.player_1 == a && self.player_2 == b) || (self.player_1 == b && self.player_2 == a)
    }
}

/// Editable scheduling fields of a match. Anything not listed here can only
/// change through the scheduler, result submission or a status change.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchPatch {
    #[serde(default)]
    pub court_number: Option<u32>,
    #[serde(default)]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_end: Option<DateTime<Utc>>,
}

impl MatchPatch {
    /// Validate the patch against `m` and apply it. Nothing is written on error.
    pub fn apply_to(&self, m: &mut GameMatch) -> Result<(), TournamentError> {
        if m.status == MatchStatus::Finished {
            return Err(TournamentError::MatchFinished(m.id));
        }
        if self.court_number == Some(0) {
            return Err(TournamentError::InvalidConfig(
                "court_number must be at least 1".to_string(),
            ));
        }
        let start = self.scheduled_start.or(m.scheduled_start);
        let end = self.scheduled_end.or(m.scheduled_end);
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Err(TournamentError::InvalidConfig(
                    "scheduled_start must be before scheduled_end".to_string(),
                ));
            }
        }
        if let Some(court) = self.court_number {
            m.court_number = Some(court);
        }
        m.scheduled_start = start;
        m.scheduled_end = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pending() -> GameMatch {
        GameMatch::new(Uuid::nil(), Uuid::new_v4(), Uuid::new_v4(), RoundType::Group, Utc::now())
    }

    #[test]
    fn patch_updates_only_listed_fields() {
        let mut m = pending();
        let start = Utc::now();
        let patch = MatchPatch {
            court_number: Some(3),
            scheduled_start: Some(start),
            scheduled_end: Some(start + Duration::minutes(35)),
        };
        patch.apply_to(&mut m).unwrap();
        assert_eq!(m.court_number, Some(3));
        assert_eq!(m.scheduled_start, Some(start));
        assert_eq!(m.status, MatchStatus::Pending);

        MatchPatch { court_number: Some(1), ..Default::default() }
            .apply_to(&mut m)
            .unwrap();
        assert_eq!(m.court_number, Some(1));
        assert_eq!(m.scheduled_end, Some(start + Duration::minutes(35)));
    }

    #[test]
    fn patch_rejects_bad_values_without_writing() {
        let mut m = pending();
        let start = Utc::now();
        let backwards = MatchPatch {
            court_number: Some(2),
            scheduled_start: Some(start),
            scheduled_end: Some(start - Duration::minutes(1)),
        };
        assert!(matches!(backwards.apply_to(&mut m), Err(TournamentError::InvalidConfig(_))));
        assert_eq!(m.court_number, None);

        let zero = MatchPatch { court_number: Some(0), ..Default::default() };
        assert!(zero.apply_to(&mut m).is_err());
    }

    #[test]
    fn patch_rejects_finished_match_and_unknown_fields() {
        let mut m = pending();
        m.status = MatchStatus::Finished;
        let patch = MatchPatch { court_number: Some(2), ..Default::default() };
        assert_eq!(patch.apply_to(&mut m), Err(TournamentError::MatchFinished(m.id)));

        let raw = r#"{"court_number": 2, "winner": null}"#;
        assert!(serde_json::from_str::<MatchPatch>(raw).is_err());
    }

    #[test]
    fn completeness_needs_winner_and_two_sets() {
        let mut m = pending();
        m.winner = Some(m.player_1);
        m.sets = vec![SetScore::new(21, 5)];
        assert!(!m.is_complete());
        m.sets.push(SetScore::new(21, 7));
        assert!(m.is_complete());
    }
}
