//! End-to-end tests for the draw orchestrator: build, group stage, bracket
//! fill, result recording.

use tournament_draw_web::{
    build_draw, decode_rules, fill_bracket, list_matches, record_result, DrawError, MatchFilter,
    MatchQuery, MatchStatus, MemoryStore, Player, PlayerId, Round, Store, TournamentId,
    TournamentUpdate,
};
use uuid::Uuid;

fn paid(firstname: &str, category: &str) -> Player {
    let mut p = Player::new(firstname, "Tester", None, None, category);
    p.is_paid = true;
    p
}

fn seeded(rank: u32, category: &str) -> Player {
    let mut p = paid(&format!("Seed{rank}"), category);
    p.seed_rank = Some(rank);
    p
}

fn grouped(firstname: &str, group: &str, category: &str) -> Player {
    let mut p = paid(firstname, category);
    p.group_name = Some(group.to_string());
    p
}

/// 2 seeds plus 4 groups of 4 in category "open": 18 players, 16 knockout
/// entrants once 14 qualifier slots are allocated.
fn setup_open_category(store: &mut MemoryStore) {
    store.save_player(seeded(1, "open"));
    store.save_player(seeded(2, "open"));
    for group in ["A", "B", "C", "D"] {
        for i in 0..4 {
            store.save_player(grouped(&format!("{group}{i}"), group, "open"));
        }
    }
}

/// Report every group match as a player1 win, 3:1.
fn complete_group_stage(store: &mut MemoryStore, tournament_id: TournamentId) {
    let fixtures =
        store.find_matches(&MatchFilter::in_tournament(tournament_id).round(Round::Group));
    for m in fixtures {
        record_result(store, m.id, 3, 1, None, None).unwrap();
    }
}

#[test]
fn build_draw_creates_fixtures_skeleton_and_rules() {
    let mut store = MemoryStore::new();
    setup_open_category(&mut store);

    let tournament = build_draw(&mut store, "open").unwrap();

    // 4 groups of 4 -> 24 fixtures, orders 1..24.
    let fixtures =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Group));
    assert_eq!(fixtures.len(), 24);
    assert_eq!(fixtures[0].match_order, 1);
    assert_eq!(fixtures[23].match_order, 24);

    // 8 + 4 + 2 + 1 knockout skeleton, orders from 1000, sorted by round.
    let bracket = store.find_matches(&MatchFilter {
        tournament_id: Some(tournament.id),
        rounds: Some(Round::BRACKET.to_vec()),
        ..MatchFilter::default()
    });
    assert_eq!(bracket.len(), 15);
    assert_eq!(bracket[0].match_order, 1000);
    assert_eq!(bracket[14].match_order, 1014);
    assert_eq!(bracket[14].round, Round::Final);
    assert!(bracket[8..].iter().all(|m| m.player1_id.is_none()
        && m.player2_id.is_none()
        && m.status == MatchStatus::Pending));

    // Seed 1 on slot 0, seed 2 on slot 15.
    let seeds = store.find_players(&tournament_draw_web::PlayerFilter {
        seeded: Some(true),
        ..Default::default()
    });
    let round16 = &bracket[..8];
    assert_eq!(round16[0].player1_id, Some(seeds[0].id));
    assert_eq!(round16[7].player2_id, Some(seeds[1].id));

    // 14 open slots over 4 groups: 4, 4, 3, 3, locked in before play.
    let rules = decode_rules(tournament.qualification_rules.as_deref());
    assert_eq!(rules.get("A"), Some(&4));
    assert_eq!(rules.get("B"), Some(&4));
    assert_eq!(rules.get("C"), Some(&3));
    assert_eq!(rules.get("D"), Some(&3));
}

#[test]
fn build_draw_rejects_duplicates_and_empty_categories() {
    let mut store = MemoryStore::new();
    setup_open_category(&mut store);
    build_draw(&mut store, "open").unwrap();

    assert!(matches!(
        build_draw(&mut store, "open"),
        Err(DrawError::TournamentExists(_))
    ));
    assert!(matches!(
        build_draw(&mut store, "veterans"),
        Err(DrawError::NoPlayers(_))
    ));
}

#[test]
fn fill_refuses_until_group_stage_is_done() {
    let mut store = MemoryStore::new();
    setup_open_category(&mut store);
    let tournament = build_draw(&mut store, "open").unwrap();

    let outcome = fill_bracket(&mut store, "open").unwrap();
    assert!(!outcome.generated);
    assert_eq!(outcome.message, "Group stage not completed");

    // No slots beyond the pre-placed seeds were touched.
    let round16 =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Round16));
    assert!(round16.iter().all(|m| !m.both_slots_filled()));
}

#[test]
fn fill_pairs_seeds_and_qualifiers_into_round16() {
    let mut store = MemoryStore::new();
    setup_open_category(&mut store);
    let tournament = build_draw(&mut store, "open").unwrap();
    complete_group_stage(&mut store, tournament.id);

    let outcome = fill_bracket(&mut store, "open").unwrap();
    assert!(outcome.generated);
    assert_eq!(outcome.message, "Bracket generated");

    // 2 seeds + 14 qualifiers = 16 entrants -> every round16 match filled.
    let round16 =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Round16));
    assert!(round16.iter().all(|m| m.both_slots_filled()));
    assert!(round16.iter().all(|m| m.status == MatchStatus::Pending));

    // Nobody occupies two slots.
    let mut filled: Vec<PlayerId> = round16
        .iter()
        .flat_map(|m| [m.player1_id.unwrap(), m.player2_id.unwrap()])
        .collect();
    filled.sort();
    filled.dedup();
    assert_eq!(filled.len(), 16);

    // Quarters onward stay empty; winners are not auto-advanced.
    let quarters =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Quarter));
    assert!(quarters.iter().all(|m| m.player1_id.is_none()));
}

#[test]
fn fill_runs_at_most_once() {
    let mut store = MemoryStore::new();
    setup_open_category(&mut store);
    let tournament = build_draw(&mut store, "open").unwrap();
    complete_group_stage(&mut store, tournament.id);

    assert!(fill_bracket(&mut store, "open").unwrap().generated);
    let before =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Round16));

    let second = fill_bracket(&mut store, "open").unwrap();
    assert!(!second.generated);
    assert_eq!(second.message, "Bracket already generated");

    let after =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Round16));
    assert_eq!(before, after, "second call must not write");
}

#[test]
fn fill_requires_an_existing_tournament() {
    let mut store = MemoryStore::new();
    assert!(matches!(
        fill_bracket(&mut store, "open"),
        Err(DrawError::TournamentNotFound(_))
    ));
}

#[test]
fn seeded_group_player_is_not_double_entered() {
    let mut store = MemoryStore::new();
    // One group where the top seed also plays: A = {S1, M0, M1, M2}.
    let mut s1 = seeded(1, "mini");
    s1.group_name = Some("A".to_string());
    let s1_id = store.save_player(s1).id;
    for i in 0..3 {
        store.save_player(grouped(&format!("M{i}"), "A", "mini"));
    }

    let tournament = build_draw(&mut store, "mini").unwrap();
    complete_group_stage(&mut store, tournament.id);
    assert!(fill_bracket(&mut store, "mini").unwrap().generated);

    let round16 =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Round16));
    let appearances = round16
        .iter()
        .flat_map(|m| [m.player1_id, m.player2_id])
        .flatten()
        .filter(|id| *id == s1_id)
        .count();
    assert_eq!(appearances, 1, "seed must enter by seeding only");
}

#[test]
fn unreadable_rules_fall_back_to_two_per_group() {
    let mut store = MemoryStore::new();
    setup_open_category(&mut store);
    let tournament = build_draw(&mut store, "open").unwrap();
    complete_group_stage(&mut store, tournament.id);
    store.update_tournament(
        tournament.id,
        TournamentUpdate {
            qualification_rules: Some("{definitely not json".to_string()),
            ..TournamentUpdate::default()
        },
    );

    assert!(fill_bracket(&mut store, "open").unwrap().generated);

    // 2 seeds + 2 qualifiers per group = 10 entrants -> 5 filled matches.
    let round16 =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Round16));
    let filled = round16.iter().filter(|m| m.both_slots_filled()).count();
    assert_eq!(filled, 5);
}

#[test]
fn record_result_derives_the_winner_from_scores() {
    let mut store = MemoryStore::new();
    setup_open_category(&mut store);
    let tournament = build_draw(&mut store, "open").unwrap();
    let fixtures =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Group));

    let won = record_result(&mut store, fixtures[0].id, 21, 15, None, None).unwrap();
    assert_eq!(won.winner_id, won.player1_id);
    assert_eq!(won.status, MatchStatus::Completed);

    let tied = record_result(&mut store, fixtures[1].id, 10, 10, None, None).unwrap();
    assert_eq!(tied.winner_id, None);
    assert_eq!(tied.status, MatchStatus::Completed);

    // An explicit winner is trusted over the scores.
    let overridden = record_result(
        &mut store,
        fixtures[2].id,
        21,
        15,
        fixtures[2].player2_id,
        None,
    )
    .unwrap();
    assert_eq!(overridden.winner_id, fixtures[2].player2_id);
}

#[test]
fn record_result_unknown_match_is_not_found() {
    let mut store = MemoryStore::new();
    assert!(matches!(
        record_result(&mut store, Uuid::new_v4(), 3, 0, None, None),
        Err(DrawError::MatchNotFound(_))
    ));
}

#[test]
fn list_matches_filters_by_category_group_and_round() {
    let mut store = MemoryStore::new();
    setup_open_category(&mut store);
    build_draw(&mut store, "open").unwrap();

    let bracket = list_matches(
        &store,
        &MatchQuery {
            category: Some("open".to_string()),
            rounds: Some(Round::BRACKET.to_vec()),
            ..MatchQuery::default()
        },
    )
    .unwrap();
    assert_eq!(bracket.len(), 15);
    assert!(bracket.windows(2).all(|w| w[0].match_order < w[1].match_order));

    let group_a = list_matches(
        &store,
        &MatchQuery {
            category: Some("open".to_string()),
            round: Some(Round::Group),
            group_name: Some("A".to_string()),
            ..MatchQuery::default()
        },
    )
    .unwrap();
    assert_eq!(group_a.len(), 6);

    assert!(matches!(
        list_matches(
            &store,
            &MatchQuery {
                category: Some("veterans".to_string()),
                ..MatchQuery::default()
            },
        ),
        Err(DrawError::TournamentNotFound(_))
    ));
}
