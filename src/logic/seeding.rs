//! Seed placement: fixed mapping from seed rank to bracket leaf slot.

use crate::models::{Player, PlayerId};

/// Which of the 16 knockout leaf slots each seed occupies, by ascending seed
/// rank. The standard balanced order: seed 1 and seed 2 land in opposite
/// halves, the top four in separate quarters, and so on down the table.
pub const SEED_POSITIONS: [usize; 16] = [0, 15, 7, 8, 3, 12, 4, 11, 1, 14, 6, 9, 2, 13, 5, 10];

/// Place seeded players into the 16 knockout leaf slots.
///
/// Input must be sorted ascending by seed rank. Only the first 16 seeds are
/// placed; the rest are ignored. Slots not claimed by a seed stay empty
/// pending qualifier assignment.
pub fn seed_slots(seeds: &[Player]) -> [Option<PlayerId>; 16] {
    let mut slots = [None; 16];
    for (i, p) in seeds.iter().take(SEED_POSITIONS.len()).enumerate() {
        slots[SEED_POSITIONS[i]] = Some(p.id);
    }
    slots
}
