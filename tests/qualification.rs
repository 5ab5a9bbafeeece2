//! Integration tests for qualification slot allocation and the rules payload.

use tournament_draw_web::{allocate_slots, decode_rules, encode_rules};

fn sizes(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
    pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect()
}

#[test]
fn remainder_goes_to_the_first_groups() {
    // 8 slots over 3 groups: base 2, remainder 2 -> 3, 3, 2.
    let allocation = allocate_slots(&sizes(&[("A", 5), ("B", 5), ("C", 5)]), 8);
    assert_eq!(
        allocation,
        sizes(&[("A", 3), ("B", 3), ("C", 2)]),
    );
    let total: usize = allocation.iter().map(|(_, c)| c).sum();
    assert_eq!(total, 8);
}

#[test]
fn allocation_is_not_proportional_to_group_size() {
    // A twice the size of B still splits an even budget evenly.
    let allocation = allocate_slots(&sizes(&[("A", 8), ("B", 4)]), 6);
    assert_eq!(allocation, sizes(&[("A", 3), ("B", 3)]));
}

#[test]
fn group_allocation_never_exceeds_group_size() {
    let allocation = allocate_slots(&sizes(&[("A", 1), ("B", 2)]), 16);
    assert_eq!(allocation, sizes(&[("A", 1), ("B", 2)]));
    for (_, count) in &allocation {
        assert!(*count <= 2);
    }
}

#[test]
fn zero_groups_or_zero_budget() {
    assert!(allocate_slots(&[], 8).is_empty());
    let allocation = allocate_slots(&sizes(&[("A", 4), ("B", 4)]), 0);
    assert_eq!(allocation, sizes(&[("A", 0), ("B", 0)]));
}

#[test]
fn rules_payload_round_trips() {
    let allocation = sizes(&[("A", 3), ("B", 2)]);
    let payload = encode_rules(&allocation);
    let decoded = decode_rules(Some(&payload));
    assert_eq!(decoded.get("A"), Some(&3));
    assert_eq!(decoded.get("B"), Some(&2));
}

#[test]
fn malformed_or_missing_payload_falls_back_to_empty() {
    assert!(decode_rules(Some("not json")).is_empty());
    assert!(decode_rules(None).is_empty());
}
