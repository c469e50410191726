//! Badminton scoring: set validity and match winner.
//!
//! A set is won by reaching 21 with a two-point margin; at 29-29 the next
//! point wins, so no set goes past 30-29.

use crate::models::{PlayerId, SetScore, TournamentError};

const POINTS_TO_WIN: i32 = 21;
const POINT_CAP: i32 = 30;
const WIN_BY: i32 = 2;
const SETS_TO_WIN: usize = 2;

/// Whether `p1`-`p2` is a legal final set score.
pub fn is_valid_set(p1: i32, p2: i32) -> bool {
    if p1 < 0 || p2 < 0 {
        return false;
    }
    let high = p1.max(p2);
    let low = p1.min(p2);
    if !(POINTS_TO_WIN..=POINT_CAP).contains(&high) {
        return false;
    }
    if high == POINT_CAP {
        return low == POINT_CAP - 1;
    }
    high - low >= WIN_BY
}

/// The player who won exactly two of `sets`, or `None` if nobody did.
///
/// Each set goes to the side with the higher score; a level set counts for
/// player 2, which cannot happen with validated sets.
pub fn determine_match_winner(
    sets: &[SetScore],
    player_1: PlayerId,
    player_2: PlayerId,
) -> Option<PlayerId> {
    let p1_sets = sets.iter().filter(|s| s.p1 > s.p2).count();
    let p2_sets = sets.len() - p1_sets;
    if p1_sets == SETS_TO_WIN {
        Some(player_1)
    } else if p2_sets == SETS_TO_WIN {
        Some(player_2)
    } else {
        None
    }
}

/// Check a submitted result (2 or 3 valid sets with a decided winner) and return the winner.
pub fn validate_result(
    sets: &[SetScore],
    player_1: PlayerId,
    player_2: PlayerId,
) -> Result<PlayerId, TournamentError> {
    if !(2..=3).contains(&sets.len()) {
        return Err(TournamentError::WrongSetCount(sets.len()));
    }
    if let Some(bad) = sets.iter().find(|s| !is_valid_set(s.p1, s.p2)) {
        return Err(TournamentError::InvalidSetScore { p1: bad.p1, p2: bad.p2 });
    }
    determine_match_winner(sets, player_1, player_2).ok_or(TournamentError::NoMatchWinner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn set_rules() {
        assert!(is_valid_set(21, 0));
        assert!(!is_valid_set(21, 20));
        assert!(is_valid_set(29, 30));
        assert!(!is_valid_set(30, 28));
        assert!(!is_valid_set(31, 29));
        assert!(is_valid_set(22, 20));
        assert!(is_valid_set(28, 26));
        assert!(!is_valid_set(20, 18));
        assert!(!is_valid_set(-1, 21));
        assert!(!is_valid_set(21, 21));
    }

    #[test]
    fn winner_needs_two_sets() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let straight = [SetScore::new(21, 10), SetScore::new(21, 15)];
        assert_eq!(determine_match_winner(&straight, a, b), Some(a));

        let decider = [SetScore::new(21, 10), SetScore::new(18, 21), SetScore::new(21, 19)];
        assert_eq!(determine_match_winner(&decider, a, b), Some(a));

        let away = [SetScore::new(10, 21), SetScore::new(19, 21)];
        assert_eq!(determine_match_winner(&away, a, b), Some(b));

        assert_eq!(determine_match_winner(&[SetScore::new(21, 10)], a, b), None);
        let split = [SetScore::new(21, 10), SetScore::new(10, 21)];
        assert_eq!(determine_match_winner(&split, a, b), None);
    }

    #[test]
    fn validate_result_reports_first_problem() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(
            validate_result(&[SetScore::new(21, 10)], a, b),
            Err(TournamentError::WrongSetCount(1))
        );
        assert_eq!(
            validate_result(&[SetScore::new(21, 10), SetScore::new(30, 28)], a, b),
            Err(TournamentError::InvalidSetScore { p1: 30, p2: 28 })
        );
        assert_eq!(
            validate_result(&[SetScore::new(21, 10), SetScore::new(10, 21)], a, b),
            Err(TournamentError::NoMatchWinner)
        );
        assert_eq!(
            validate_result(&[SetScore::new(15, 21), SetScore::new(19, 21)], a, b),
            Ok(b)
        );
    }
}
