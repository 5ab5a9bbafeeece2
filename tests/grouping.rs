//! Integration tests for group assignment: explicit and random draw.

use std::collections::HashMap;
use tournament_draw_web::{
    assign_groups, draw_groups, DrawError, MemoryStore, Player, PlayerFilter, Store,
};
use uuid::Uuid;

fn paid(firstname: &str, category: &str) -> Player {
    let mut p = Player::new(firstname, "Tester", None, None, category);
    p.is_paid = true;
    p
}

#[test]
fn draw_touches_only_eligible_players() {
    let mut store = MemoryStore::new();
    for i in 0..5 {
        store.save_player(paid(&format!("P{i}"), "open"));
    }
    let unpaid = store.save_player(Player::new("Unpaid", "Tester", None, None, "open"));
    let mut pre_grouped = paid("Grouped", "open");
    pre_grouped.group_name = Some("Z".to_string());
    let pre_grouped = store.save_player(pre_grouped);
    let mut seed = paid("Seed", "open");
    seed.seed_rank = Some(1);
    let seed = store.save_player(seed);
    let other = store.save_player(paid("Other", "veterans"));

    let assignments = draw_groups(&mut store, "open", 2).unwrap();
    assert_eq!(assignments.len(), 5);

    let untouched = [unpaid.id, seed.id, other.id];
    for (player_id, _) in &assignments {
        assert!(!untouched.contains(player_id));
        assert_ne!(*player_id, pre_grouped.id);
    }
    assert_eq!(
        store.find_player(pre_grouped.id).unwrap().group_name.as_deref(),
        Some("Z")
    );
    assert!(store.find_player(unpaid.id).unwrap().group_name.is_none());
    assert!(store.find_player(seed.id).unwrap().group_name.is_none());
}

#[test]
fn draw_deals_groups_of_nearly_equal_size() {
    let mut store = MemoryStore::new();
    for i in 0..11 {
        store.save_player(paid(&format!("P{i}"), "open"));
    }

    draw_groups(&mut store, "open", 3).unwrap();

    let grouped = store.find_players(&PlayerFilter {
        grouped: Some(true),
        ..PlayerFilter::default()
    });
    let mut sizes: HashMap<String, usize> = HashMap::new();
    for p in &grouped {
        *sizes.entry(p.group_name.clone().unwrap()).or_default() += 1;
    }
    assert_eq!(sizes.len(), 3);
    let max = sizes.values().max().unwrap();
    let min = sizes.values().min().unwrap();
    assert!(max - min <= 1);
    assert!(sizes.keys().all(|g| ["A", "B", "C"].contains(&g.as_str())));
}

#[test]
fn draw_rejects_a_zero_group_count() {
    let mut store = MemoryStore::new();
    assert!(matches!(
        draw_groups(&mut store, "open", 0),
        Err(DrawError::InvalidGroupCount)
    ));
}

#[test]
fn explicit_assignment_requires_known_players() {
    let mut store = MemoryStore::new();
    let p = store.save_player(paid("Known", "open"));

    assign_groups(&mut store, &[(p.id, "A".to_string())]).unwrap();
    assert_eq!(
        store.find_player(p.id).unwrap().group_name.as_deref(),
        Some("A")
    );

    assert!(matches!(
        assign_groups(&mut store, &[(Uuid::new_v4(), "A".to_string())]),
        Err(DrawError::PlayerNotFound(_))
    ));
}
