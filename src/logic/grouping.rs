//! Group assignment: explicit admin assignments and the random draw.

use crate::models::{DrawError, PlayerId};
use crate::storage::{PlayerFilter, PlayerUpdate, Store};
use rand::seq::SliceRandom;

/// Persist explicit (player, group) assignments chosen by an admin.
pub fn assign_groups<S: Store>(
    store: &mut S,
    assignments: &[(PlayerId, String)],
) -> Result<(), DrawError> {
    for (player_id, group_name) in assignments {
        store
            .update_player(
                *player_id,
                PlayerUpdate {
                    group_name: Some(group_name.clone()),
                    ..PlayerUpdate::default()
                },
            )
            .ok_or(DrawError::PlayerNotFound(*player_id))?;
    }
    Ok(())
}

/// Draw groups at random: shuffle the paid, ungrouped, unseeded players of a
/// category and deal them round-robin into `group_count` groups named "A",
/// "B", ... Group sizes differ by at most one. Returns the persisted
/// assignments in deal order.
pub fn draw_groups<S: Store>(
    store: &mut S,
    category: &str,
    group_count: usize,
) -> Result<Vec<(PlayerId, String)>, DrawError> {
    // Letters only; more than 26 groups has no counterpart in this format.
    if group_count == 0 || group_count > 26 {
        return Err(DrawError::InvalidGroupCount);
    }

    let mut pool = store.find_players(&PlayerFilter {
        category: Some(category.to_string()),
        is_paid: Some(true),
        grouped: Some(false),
        seeded: Some(false),
        ..PlayerFilter::default()
    });
    pool.shuffle(&mut rand::thread_rng());

    let mut assignments = Vec::with_capacity(pool.len());
    for (i, p) in pool.iter().enumerate() {
        let group_name = group_letter(i % group_count);
        store.update_player(
            p.id,
            PlayerUpdate {
                group_name: Some(group_name.clone()),
                ..PlayerUpdate::default()
            },
        );
        assignments.push((p.id, group_name));
    }
    Ok(assignments)
}

fn group_letter(index: usize) -> String {
    char::from(b'A' + index as u8).to_string()
}
