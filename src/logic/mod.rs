//! Tournament business logic: pairing, scoring, scheduling, standings, playoffs.

mod bracket;
mod finals;
mod group_play;
mod lifecycle;
mod match_play;
mod pairing;
mod scheduler;
mod scoring;
mod standings;

pub use bracket::{generate_final, generate_semi_finals, SemiFinalBracket};
pub use finals::{
    generate_playoff, generate_playoff_final, group_champion, playoff_view, Champion, PlayoffView,
};
pub use group_play::{
    apply_schedule, eligible_matches, generate_group_matches, group_standings, group_status,
    schedule_group_matches, GroupStatus,
};
pub use lifecycle::{change_status, finish_match, revert_to_pending, start_match};
pub use match_play::{change_match_status, patch_match, submit_match_result};
pub use pairing::generate_round_robin_pairs;
pub use scheduler::{
    build_schedule, ScheduleAssignment, ScheduleConfig, ScheduleRequest, COURTS_RANGE,
    MATCH_MINUTES_RANGE, REST_MINUTES_RANGE, TURNOVER_MINUTES_RANGE,
};
pub use scoring::{determine_match_winner, is_valid_set, validate_result};
pub use standings::{compute_standings, StandingEntry};
