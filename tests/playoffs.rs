//! Integration tests for the playoff bracket: semifinals, final, champion.

use badminton_tournament_web::{
    generate_group_matches, generate_playoff, generate_playoff_final, group_champion,
    playoff_view, submit_match_result, ErrorKind, GameMatch, GroupId, MatchId, PlayerId,
    RoundType, SetScore, Tournament, TournamentConfig, TournamentError,
};
use chrono::Utc;

/// Group of `n` players where player i beats every player j > i.
fn finished_group(n: usize) -> (Tournament, GroupId, Vec<PlayerId>) {
    let mut t = Tournament::new("Open", TournamentConfig::default());
    let ids: Vec<PlayerId> = (0..n)
        .map(|i| t.add_player(format!("P{i}"), "").unwrap())
        .collect();
    let g = t.create_group("A", &ids).unwrap();
    let matches = generate_group_matches(&mut t, g, Utc::now()).unwrap();
    for m in matches {
        let stronger = ids.iter().position(|p| m.involves(*p)).unwrap();
        finish(&mut t, &m, ids[stronger]);
    }
    (t, g, ids)
}

fn finish(t: &mut Tournament, m: &GameMatch, winner: PlayerId) {
    let sets = if m.player_1 == winner {
        vec![SetScore::new(21, 18), SetScore::new(19, 21), SetScore::new(30, 29)]
    } else {
        vec![SetScore::new(18, 21), SetScore::new(21, 19), SetScore::new(29, 30)]
    };
    submit_match_result(t, m.id, sets, Utc::now()).unwrap();
}

#[test]
fn semifinals_seed_one_vs_four_and_two_vs_three() {
    let (mut t, g, ids) = finished_group(5);
    let bracket = generate_playoff(&mut t, g, Utc::now()).unwrap();

    let seeds: Vec<_> = bracket.top4.iter().map(|s| s.player_id).collect();
    assert_eq!(seeds, ids[..4].to_vec());
    assert_eq!(bracket.top4[0].wins, 4);

    assert_eq!(bracket.semis.len(), 2);
    assert_eq!((bracket.semis[0].player_1, bracket.semis[0].player_2), (ids[0], ids[3]));
    assert_eq!((bracket.semis[1].player_1, bracket.semis[1].player_2), (ids[1], ids[2]));
    for m in &bracket.semis {
        assert_eq!(m.round, RoundType::PlayoffSemi);
        assert!(m.sets.is_empty() && m.winner.is_none());
    }
    assert_eq!(playoff_view(&t, g).unwrap().semis, bracket.semis);
}

#[test]
fn semifinals_twice_conflict() {
    let (mut t, g, _) = finished_group(4);
    generate_playoff(&mut t, g, Utc::now()).unwrap();
    let err = generate_playoff(&mut t, g, Utc::now()).unwrap_err();
    assert_eq!(err, TournamentError::PlayoffAlreadyGenerated(g));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn semifinals_require_finished_group_stage() {
    let mut t = Tournament::new("Open", TournamentConfig::default());
    let ids: Vec<PlayerId> = (0..4).map(|i| t.add_player(format!("P{i}"), "").unwrap()).collect();
    let g = t.create_group("A", &ids).unwrap();
    let matches = generate_group_matches(&mut t, g, Utc::now()).unwrap();
    finish(&mut t, &matches[0], matches[0].player_1);

    let err = generate_playoff(&mut t, g, Utc::now()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    let expected: Vec<MatchId> = matches[1..].iter().map(|m| m.id).collect();
    assert_eq!(err.match_ids(), expected.as_slice());
}

#[test]
fn semifinals_need_four_players() {
    let (mut t, g, _) = finished_group(3);
    let err = generate_playoff(&mut t, g, Utc::now()).unwrap_err();
    assert_eq!(err, TournamentError::NotEnoughPlayersForPlayoff { ranked: 3 });
}

#[test]
fn final_waits_for_both_semifinal_winners() {
    let (mut t, g, ids) = finished_group(4);
    let err = generate_playoff_final(&mut t, g, Utc::now()).unwrap_err();
    assert_eq!(err, TournamentError::WrongSemiFinalCount(0));

    let semis = generate_playoff(&mut t, g, Utc::now()).unwrap().semis;
    finish(&mut t, &semis[0], ids[0]);

    let err = generate_playoff_final(&mut t, g, Utc::now()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(err.match_ids(), &[semis[1].id]);
}

#[test]
fn final_pairs_semifinal_winners_and_crowns_champion() {
    let (mut t, g, ids) = finished_group(4);
    let semis = generate_playoff(&mut t, g, Utc::now()).unwrap().semis;
    assert!(matches!(group_champion(&t, g), Err(TournamentError::NoChampion(_))));

    finish(&mut t, &semis[0], ids[3]);
    finish(&mut t, &semis[1], ids[1]);

    let final_match = generate_playoff_final(&mut t, g, Utc::now()).unwrap();
    assert_eq!(final_match.round, RoundType::PlayoffFinal);
    assert_eq!((final_match.player_1, final_match.player_2), (ids[3], ids[1]));

    let err = generate_playoff_final(&mut t, g, Utc::now()).unwrap_err();
    assert_eq!(err, TournamentError::FinalAlreadyExists(final_match.id));

    finish(&mut t, &final_match, ids[1]);
    let champion = group_champion(&t, g).unwrap();
    assert_eq!(champion.champion, ids[1]);
    assert_eq!(playoff_view(&t, g).unwrap().final_match.map(|m| m.id), Some(final_match.id));
}
