//! Knockout pairing: greedy matching that avoids same-club and same-group
//! matchups where possible.

use crate::models::PlayerId;

/// A player entering the knockout phase, carrying the attributes the pairing
/// tries to keep apart. Seeds usually have no group name; qualifiers carry
/// their origin group.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entrant {
    pub player_id: PlayerId,
    pub affiliation: Option<String>,
    pub group_name: Option<String>,
}

/// Pair entrants for the knockout draw.
///
/// Three greedy passes over the input order (seeds by rank, then qualifiers
/// by points and in-group rank):
///
/// 1. strict: first later unpaired entrant with a different affiliation AND
///    a different origin group;
/// 2. relaxed: different affiliation only;
/// 3. fallback: first remaining unpaired entrant, no constraints.
///
/// Each pass only considers entrants left unpaired by earlier passes; a
/// paired entrant never re-enters consideration. Pairs come out in the order
/// their first member was discovered. An even input is always fully paired;
/// an odd input leaves exactly one entrant, returned separately.
pub fn pair_entrants(entrants: &[Entrant]) -> (Vec<(Entrant, Entrant)>, Option<Entrant>) {
    let mut used = vec![false; entrants.len()];
    let mut pairs = Vec::with_capacity(entrants.len() / 2);

    run_pass(entrants, &mut used, &mut pairs, |a, b| {
        differs(&a.affiliation, &b.affiliation) && differs(&a.group_name, &b.group_name)
    });
    run_pass(entrants, &mut used, &mut pairs, |a, b| {
        differs(&a.affiliation, &b.affiliation)
    });
    run_pass(entrants, &mut used, &mut pairs, |_, _| true);

    let leftover = entrants
        .iter()
        .zip(&used)
        .find(|(_, used)| !**used)
        .map(|(e, _)| e.clone());
    (pairs, leftover)
}

/// Two entrants "differ" on an attribute unless both carry the same value;
/// an absent attribute never conflicts.
fn differs(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a != b,
        _ => true,
    }
}

fn run_pass<F>(
    entrants: &[Entrant],
    used: &mut [bool],
    pairs: &mut Vec<(Entrant, Entrant)>,
    compatible: F,
) where
    F: Fn(&Entrant, &Entrant) -> bool,
{
    for i in 0..entrants.len() {
        if used[i] {
            continue;
        }
        for j in (i + 1)..entrants.len() {
            if used[j] || !compatible(&entrants[i], &entrants[j]) {
                continue;
            }
            used[i] = true;
            used[j] = true;
            pairs.push((entrants[i].clone(), entrants[j].clone()));
            break;
        }
    }
}
