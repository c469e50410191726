//! Badminton tournament web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    apply_schedule, build_schedule, change_match_status, change_status, compute_standings,
    determine_match_winner, eligible_matches, finish_match, generate_final,
    generate_group_matches, generate_playoff, generate_playoff_final, generate_round_robin_pairs,
    generate_semi_finals, group_champion, group_standings, group_status, is_valid_set,
    patch_match, playoff_view, revert_to_pending, schedule_group_matches, start_match,
    submit_match_result, validate_result, Champion, GroupStatus, PlayoffView, ScheduleAssignment,
    ScheduleConfig, ScheduleRequest, SemiFinalBracket, StandingEntry,
};
pub use models::{
    ErrorKind, GameMatch, Group, GroupId, MatchId, MatchPatch, MatchStatus, Player, PlayerId,
    RoundType, SetScore, Tournament, TournamentConfig, TournamentError, TournamentId,
};
