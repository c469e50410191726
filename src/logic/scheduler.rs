//! Greedy court scheduler.
//!
//! # Algorithm
//!
//! 1. Every court and every player starts free at the base start.
//! 2. For each match, in the given order, every court proposes
//!    `max(court free, player 1 free, player 2 free)`. None of these is ever
//!    earlier than the base start.
//! 3. The earliest proposal wins; ties go to the court that hosted the fewest
//!    matches so far, then to the lowest court number.
//! 4. The court is busy until `end + turnover`, both players until `end + rest`.
//!
//! Matches are never reordered or revisited, so the result is not
//! makespan-optimal. It is deterministic: the same input yields the same plan.
//!
//! # Complexity
//! O(m * c) for m matches and c courts.

use crate::models::{GameMatch, MatchId, PlayerId, TournamentConfig, TournamentError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;

pub const COURTS_RANGE: RangeInclusive<u32> = 1..=50;
pub const MATCH_MINUTES_RANGE: RangeInclusive<i64> = 1..=240;
pub const REST_MINUTES_RANGE: RangeInclusive<i64> = 0..=240;
pub const TURNOVER_MINUTES_RANGE: RangeInclusive<i64> = 0..=120;

/// Resolved scheduler settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScheduleConfig {
    pub start_at: DateTime<Utc>,
    pub courts_count: u32,
    pub match_duration: Duration,
    pub player_rest: Duration,
    pub court_turnover: Duration,
}

/// Scheduling request as supplied by a caller. Omitted values fall back to
/// the tournament config; a missing `start_at` means "now".
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleRequest {
    pub start_at: Option<DateTime<Utc>>,
    pub courts_count: Option<u32>,
    pub match_minutes: Option<i64>,
    pub player_rest_minutes: Option<i64>,
    pub court_turnover_minutes: Option<i64>,
    /// Only matches without a scheduled start are eligible when set.
    pub only_unscheduled: bool,
}

impl ScheduleRequest {
    /// Parse a JSON request body. An empty (or blank) body is the default
    /// request; anything else must be a well-formed request object.
    pub fn from_json(body: &[u8]) -> Result<Self, TournamentError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| TournamentError::InvalidConfig(format!("invalid schedule request: {}", e)))
    }

    /// Merge with `defaults` and check every value against its allowed range.
    pub fn resolve(
        &self,
        defaults: &TournamentConfig,
        now: DateTime<Utc>,
    ) -> Result<ScheduleConfig, TournamentError> {
        let courts_count = self.courts_count.unwrap_or(defaults.courts_count);
        let match_minutes = self.match_minutes.unwrap_or(defaults.match_minutes);
        let rest = self.player_rest_minutes.unwrap_or(defaults.player_rest_minutes);
        let turnover = self.court_turnover_minutes.unwrap_or(defaults.court_turnover_minutes);

        check_range("courts_count", courts_count, &COURTS_RANGE)?;
        check_range("match_minutes", match_minutes, &MATCH_MINUTES_RANGE)?;
        check_range("player_rest_minutes", rest, &REST_MINUTES_RANGE)?;
        check_range("court_turnover_minutes", turnover, &TURNOVER_MINUTES_RANGE)?;

        Ok(ScheduleConfig {
            start_at: self.start_at.unwrap_or(now),
            courts_count,
            match_duration: Duration::minutes(match_minutes),
            player_rest: Duration::minutes(rest),
            court_turnover: Duration::minutes(turnover),
        })
    }
}

fn check_range<T>(name: &str, value: T, range: &RangeInclusive<T>) -> Result<(), TournamentError>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(TournamentError::InvalidConfig(format!(
            "{} must be between {} and {} (got {})",
            name,
            range.start(),
            range.end(),
            value
        )))
    }
}

/// Proposed slot for one match. Applying it is the caller's job.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    pub match_id: MatchId,
    /// 1-based.
    pub court_number: u32,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

/// Court and player availability for a single scheduling pass.
struct Availability {
    base: DateTime<Utc>,
    court_free: Vec<DateTime<Utc>>,
    court_use: Vec<u32>,
    player_free: HashMap<PlayerId, DateTime<Utc>>,
}

impl Availability {
    fn new(base: DateTime<Utc>, courts: usize) -> Self {
        Self {
            base,
            court_free: vec![base; courts],
            court_use: vec![0; courts],
            player_free: HashMap::new(),
        }
    }

    fn player(&self, id: PlayerId) -> DateTime<Utc> {
        self.player_free.get(&id).copied().unwrap_or(self.base)
    }

    /// Earliest start over all courts, with the court index that offers it.
    /// `None` only when there are no courts.
    fn best_slot(&self, p1: PlayerId, p2: PlayerId) -> Option<(usize, DateTime<Utc>)> {
        // Court and player availability never drop below `base`.
        let players_free = self.player(p1).max(self.player(p2));
        self.court_free
            .iter()
            .enumerate()
            .map(|(court, &free)| (court, free.max(players_free)))
            .min_by_key(|&(court, start)| (start, self.court_use[court], court))
    }

    /// Occupy `court` and both players for a match ending at `end`.
    /// Nothing changes when a follow-up instant is out of range.
    fn book(
        &mut self,
        court: usize,
        p1: PlayerId,
        p2: PlayerId,
        end: DateTime<Utc>,
        config: &ScheduleConfig,
    ) -> Result<(), TournamentError> {
        let court_free = offset(end, config.court_turnover)?;
        let player_free = offset(end, config.player_rest)?;
        self.court_free[court] = court_free;
        self.court_use[court] += 1;
        self.player_free.insert(p1, player_free);
        self.player_free.insert(p2, player_free);
        Ok(())
    }
}

/// `at + by`, or `InvalidConfig` when the result is not a representable instant.
fn offset(at: DateTime<Utc>, by: Duration) -> Result<DateTime<Utc>, TournamentError> {
    at.checked_add_signed(by).ok_or_else(|| {
        TournamentError::InvalidConfig(format!(
            "schedule runs past the last representable instant ({} + {} min)",
            at,
            by.num_minutes()
        ))
    })
}

/// Assign a court and time slot to every match, in input order.
///
/// Fails on zero courts, a non-positive match duration, negative rest or
/// turnover, and on a plan that would run past the last representable
/// instant. Upper bounds are the caller's to check (see
/// [`ScheduleRequest::resolve`]).
pub fn build_schedule(
    matches: &[GameMatch],
    config: &ScheduleConfig,
) -> Result<Vec<ScheduleAssignment>, TournamentError> {
    if config.courts_count == 0 {
        return Err(TournamentError::InvalidConfig(
            "courts_count must be positive".to_string(),
        ));
    }
    if config.match_duration <= Duration::zero() {
        return Err(TournamentError::InvalidConfig(
            "match duration must be positive".to_string(),
        ));
    }
    if config.player_rest < Duration::zero() || config.court_turnover < Duration::zero() {
        return Err(TournamentError::InvalidConfig(
            "rest and turnover must not be negative".to_string(),
        ));
    }

    let mut availability = Availability::new(config.start_at, config.courts_count as usize);
    let mut plan = Vec::with_capacity(matches.len());
    for m in matches {
        let (court, start) = availability
            .best_slot(m.player_1, m.player_2)
            .ok_or_else(|| TournamentError::InvalidConfig("no courts to schedule on".to_string()))?;
        let end = offset(start, config.match_duration)?;
        availability.book(court, m.player_1, m.player_2, end, config)?;
        log::debug!("match {} -> court {} at {}", m.id, court + 1, start);
        plan.push(ScheduleAssignment {
            match_id: m.id,
            court_number: court as u32 + 1,
            start_at: start,
            end_at: end,
        });
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoundType;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 10, 9, 0, 0).unwrap()
    }

    fn config(courts: u32) -> ScheduleConfig {
        ScheduleConfig {
            start_at: t0(),
            courts_count: courts,
            match_duration: Duration::minutes(30),
            player_rest: Duration::minutes(20),
            court_turnover: Duration::zero(),
        }
    }

    fn game(p1: PlayerId, p2: PlayerId) -> GameMatch {
        GameMatch::new(Uuid::nil(), p1, p2, RoundType::Group, t0())
    }

    #[test]
    fn rejects_zero_courts_and_empty_duration() {
        let m = [game(Uuid::new_v4(), Uuid::new_v4())];
        assert!(build_schedule(&m, &config(0)).is_err());
        let mut c = config(1);
        c.match_duration = Duration::zero();
        assert!(build_schedule(&m, &c).is_err());
    }

    #[test]
    fn empty_batch_gives_empty_plan() {
        assert_eq!(build_schedule(&[], &config(3)), Ok(Vec::new()));
    }

    #[test]
    fn equal_starts_spread_over_unused_courts() {
        let ids: Vec<_> = (0..6).map(|_| Uuid::new_v4()).collect();
        let matches = [game(ids[0], ids[1]), game(ids[2], ids[3]), game(ids[4], ids[5])];
        let plan = build_schedule(&matches, &config(2)).unwrap();
        assert_eq!(plan[0].court_number, 1);
        assert_eq!(plan[1].court_number, 2);
        assert_eq!(plan[0].start_at, t0());
        assert_eq!(plan[1].start_at, t0());
        assert_eq!(plan[2].start_at, t0() + Duration::minutes(30));
        assert_eq!(plan[2].court_number, 1);
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let now = t0();
        let c = ScheduleRequest::default()
            .resolve(&TournamentConfig::default(), now)
            .unwrap();
        assert_eq!(c.start_at, now);
        assert_eq!(c.courts_count, 1);
        assert_eq!(c.match_duration, Duration::minutes(35));
        assert_eq!(c.player_rest, Duration::minutes(20));
        assert_eq!(c.court_turnover, Duration::zero());
    }

    #[test]
    fn resolve_rejects_out_of_range_values() {
        let defaults = TournamentConfig::default();
        let too_many = ScheduleRequest { courts_count: Some(51), ..Default::default() };
        assert!(matches!(
            too_many.resolve(&defaults, t0()),
            Err(TournamentError::InvalidConfig(_))
        ));
        let negative_rest = ScheduleRequest { player_rest_minutes: Some(-5), ..Default::default() };
        assert!(negative_rest.resolve(&defaults, t0()).is_err());
    }

    #[test]
    fn plan_past_the_last_instant_is_rejected() {
        let ids: Vec<_> = (0..4).map(|_| Uuid::new_v4()).collect();
        let matches = [game(ids[0], ids[1]), game(ids[2], ids[3])];
        let mut c = config(1);
        c.start_at = DateTime::<Utc>::MAX_UTC - Duration::minutes(10);
        assert!(matches!(
            build_schedule(&matches, &c),
            Err(TournamentError::InvalidConfig(_))
        ));

        // The match itself fits, the rest period after it does not.
        c.start_at = DateTime::<Utc>::MAX_UTC - Duration::minutes(40);
        assert!(build_schedule(&matches[..1], &c).is_err());
    }

    #[test]
    fn negative_rest_or_turnover_is_rejected() {
        let m = [game(Uuid::new_v4(), Uuid::new_v4())];
        let mut c = config(1);
        c.player_rest = Duration::minutes(-5);
        assert!(build_schedule(&m, &c).is_err());
        let mut c = config(1);
        c.court_turnover = Duration::minutes(-5);
        assert!(build_schedule(&m, &c).is_err());
    }

    #[test]
    fn request_body_parsing() {
        assert_eq!(ScheduleRequest::from_json(b""), Ok(ScheduleRequest::default()));
        assert_eq!(ScheduleRequest::from_json(b"  \n"), Ok(ScheduleRequest::default()));
        assert_eq!(ScheduleRequest::from_json(b"{}"), Ok(ScheduleRequest::default()));

        let parsed = ScheduleRequest::from_json(br#"{"courts_count": 3, "only_unscheduled": true}"#)
            .unwrap();
        assert_eq!(parsed.courts_count, Some(3));
        assert!(parsed.only_unscheduled);

        let bad_bodies: [&[u8]; 4] = [
            br#"{"courts_count": -3}"#,
            br#"{"courts": 2}"#,
            br#"{"courts_count": "two"}"#,
            b"{not json",
        ];
        for bad in bad_bodies {
            let err = ScheduleRequest::from_json(bad).unwrap_err();
            assert_eq!(err.kind(), crate::models::ErrorKind::Validation);
        }
    }
}
