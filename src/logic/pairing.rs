//! Round-robin pairing.

use crate::models::PlayerId;
use std::collections::HashSet;

/// Every unordered pair of the given players, exactly once.
///
/// Pairs come out as `(players[i], players[j])` with `i < j`, ordered by `i`
/// then `j`. Repeated ids are dropped (first occurrence wins), but callers are
/// expected to pass distinct players. Fewer than two players yields no pairs.
pub fn generate_round_robin_pairs(players: &[PlayerId]) -> Vec<(PlayerId, PlayerId)> {
    let mut seen = HashSet::new();
    let unique: Vec<PlayerId> = players.iter().copied().filter(|p| seen.insert(*p)).collect();

    let n = unique.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, &a) in unique.iter().enumerate() {
        for &b in &unique[i + 1..] {
            pairs.push((a, b));
        }
    }
    pairs
}
