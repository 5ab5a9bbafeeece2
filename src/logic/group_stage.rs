//! Group stage fixtures: every pair within a group plays exactly once.

use crate::models::{Match, Player, TournamentId};
use crate::storage::Store;

/// Partition players by group name, groups in the order they first appear.
/// Ungrouped players are skipped. This first-appearance order is the fixed
/// group order used everywhere downstream (fixtures, slot allocation).
pub fn group_players(players: &[Player]) -> Vec<(String, Vec<Player>)> {
    let mut groups: Vec<(String, Vec<Player>)> = Vec::new();
    for p in players {
        let Some(name) = &p.group_name else { continue };
        match groups.iter_mut().find(|(group, _)| group == name) {
            Some((_, members)) => members.push(p.clone()),
            None => groups.push((name.clone(), vec![p.clone()])),
        }
    }
    groups
}

/// Persist one pending group match for every unordered pair in every group.
///
/// `match_order` counts up from `first_order` across all groups in the given
/// order; the next unused value is returned so the caller can keep the
/// counter going. A group of 0 or 1 players produces no matches.
pub fn generate_group_fixtures<S: Store>(
    store: &mut S,
    tournament_id: TournamentId,
    groups: &[(String, Vec<Player>)],
    first_order: u32,
) -> u32 {
    let mut order = first_order;
    for (name, members) in groups {
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                store.save_match(Match::group(
                    tournament_id,
                    name.clone(),
                    members[i].id,
                    members[j].id,
                    order,
                ));
                order += 1;
            }
        }
    }
    order
}
