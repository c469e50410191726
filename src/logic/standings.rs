//! Group standings: wins, matches played, head-to-head for two-way ties.

use crate::models::{GameMatch, PlayerId, RoundType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of the standings table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub player_id: PlayerId,
    pub wins: u32,
    pub played: u32,
}

/// Rank the players of a group, best first.
///
/// Only complete group-round matches count. Players are ordered by wins; when
/// exactly two players share a win count, the winner of their direct match
/// goes first. Any other tie keeps the roster order: ties of three or more are
/// deliberately left unresolved.
pub fn compute_standings(players: &[PlayerId], matches: &[GameMatch]) -> Vec<StandingEntry> {
    let finished: Vec<&GameMatch> = matches
        .iter()
        .filter(|m| m.round == RoundType::Group && m.is_complete())
        .collect();

    let mut rows: Vec<StandingEntry> = players
        .iter()
        .map(|&player_id| StandingEntry { player_id, wins: 0, played: 0 })
        .collect();
    let index: HashMap<PlayerId, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.player_id, i))
        .collect();

    for m in &finished {
        for p in [m.player_1, m.player_2] {
            if let Some(&i) = index.get(&p) {
                rows[i].played += 1;
            }
        }
        if let Some(&i) = m.winner.and_then(|w| index.get(&w)) {
            rows[i].wins += 1;
        }
    }

    // Stable, so equal win counts keep roster order.
    rows.sort_by(|a, b| b.wins.cmp(&a.wins));

    let mut start = 0;
    while start < rows.len() {
        let end = start + rows[start..].iter().take_while(|r| r.wins == rows[start].wins).count();
        if end - start == 2
            && head_to_head(&finished, rows[start].player_id, rows[start + 1].player_id)
                == Ordering::Greater
        {
            rows.swap(start, start + 1);
        }
        start = end;
    }
    rows
}

/// `Less` if `a` beat `b` in their direct match, `Greater` if `b` beat `a`,
/// `Equal` when there is no decided direct match.
fn head_to_head(finished: &[&GameMatch], a: PlayerId, b: PlayerId) -> Ordering {
    match finished.iter().find(|m| m.is_between(a, b)).and_then(|m| m.winner) {
        Some(w) if w == a => Ordering::Less,
        Some(w) if w == b => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
