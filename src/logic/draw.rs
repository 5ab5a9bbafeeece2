//! Draw orchestration: build a tournament (group fixtures + seeded knockout
//! skeleton) and later fill the round of 16 once the group stage completes.

use crate::logic::group_stage::{generate_group_fixtures, group_players};
use crate::logic::pairing::{pair_entrants, Entrant};
use crate::logic::qualification::{
    allocate_slots, decode_rules, encode_rules, DEFAULT_QUALIFIERS_PER_GROUP,
};
use crate::logic::seeding::seed_slots;
use crate::logic::standings::{compute_standings, StandingRow};
use crate::models::{
    DrawError, Match, MatchStatus, Player, PlayerId, Round, Tournament,
};
use crate::storage::{MatchFilter, MatchUpdate, PlayerFilter, Store, TournamentUpdate};
use serde::Serialize;
use std::collections::HashSet;

/// Fixed knockout size: a 16-slot single-elimination bracket.
pub const KNOCKOUT_SLOTS: usize = 16;

/// Knockout `match_order` starts here so group and bracket orders never
/// collide and the bracket sorts round16 -> quarter -> semi -> final.
pub const BRACKET_ORDER_OFFSET: u32 = 1000;

/// Outcome of a bracket-fill request. Precondition failures ("group stage
/// not completed", "bracket already generated") are reported here with
/// `generated: false` rather than as errors, so callers can poll.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketFill {
    pub message: String,
    pub generated: bool,
}

/// Build the full draw for a category: create the tournament, generate group
/// fixtures, and lay out the 16-slot knockout skeleton with seeds pre-placed.
///
/// If any knockout slots remain open after seeding and at least one group
/// exists, the qualification rules are computed and persisted now, so the
/// quota is locked in before a single group match is played.
pub fn build_draw<S: Store>(store: &mut S, category: &str) -> Result<Tournament, DrawError> {
    if store.find_tournament(category).is_some() {
        return Err(DrawError::TournamentExists(category.to_string()));
    }
    let players = store.find_players(&PlayerFilter::paid_in_category(category));
    if players.is_empty() {
        return Err(DrawError::NoPlayers(category.to_string()));
    }

    let tournament =
        store.save_tournament(Tournament::new(format!("{} tournament", category), category));

    let groups = group_players(&players);
    let next_order = generate_group_fixtures(store, tournament.id, &groups, 1);
    log::info!(
        "Category {}: {} group matches across {} group(s)",
        category,
        next_order - 1,
        groups.len()
    );

    let seeds = seeds_by_rank(&players);
    let slots = seed_slots(&seeds);

    let mut order = BRACKET_ORDER_OFFSET;
    for m in 0..KNOCKOUT_SLOTS / 2 {
        store.save_match(Match::bracket(
            tournament.id,
            Round::Round16,
            slots[2 * m],
            slots[2 * m + 1],
            order,
        ));
        order += 1;
    }
    for round in [Round::Quarter, Round::Semi, Round::Final] {
        let count = match round {
            Round::Quarter => 4,
            Round::Semi => 2,
            _ => 1,
        };
        for _ in 0..count {
            store.save_match(Match::bracket(tournament.id, round, None, None, order));
            order += 1;
        }
    }

    let placed = seeds.len().min(KNOCKOUT_SLOTS);
    let open = KNOCKOUT_SLOTS - placed;
    if open > 0 && !groups.is_empty() {
        let sizes: Vec<(String, usize)> = groups
            .iter()
            .map(|(name, members)| (name.clone(), members.len()))
            .collect();
        let allocation = allocate_slots(&sizes, open);
        if let Some(updated) = store.update_tournament(
            tournament.id,
            TournamentUpdate {
                qualification_rules: Some(encode_rules(&allocation)),
                ..TournamentUpdate::default()
            },
        ) {
            return Ok(updated);
        }
    }
    Ok(tournament)
}

/// Fill the round-of-16 slots once every group match is completed.
///
/// Recomputes standings, resolves the persisted qualifier quota (2 per group
/// if unreadable), takes each group's top players (skipping seeds, who
/// already hold a slot), pairs seeds and qualifiers, and writes the pairs
/// into the existing skeleton in match order. Runs at most once per
/// tournament: a round16 match with both slots occupied means the bracket
/// was already generated.
pub fn fill_bracket<S: Store>(store: &mut S, category: &str) -> Result<BracketFill, DrawError> {
    let tournament = store
        .find_tournament(category)
        .ok_or_else(|| DrawError::TournamentNotFound(category.to_string()))?;

    let group_matches =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Group));
    if group_matches
        .iter()
        .any(|m| m.status != MatchStatus::Completed)
    {
        return Ok(BracketFill {
            message: "Group stage not completed".to_string(),
            generated: false,
        });
    }

    let round16 =
        store.find_matches(&MatchFilter::in_tournament(tournament.id).round(Round::Round16));
    if round16.iter().any(Match::both_slots_filled) {
        return Ok(BracketFill {
            message: "Bracket already generated".to_string(),
            generated: false,
        });
    }

    let players = store.find_players(&PlayerFilter::paid_in_category(category));
    let seeds = seeds_by_rank(&players);
    let seeded_ids: HashSet<PlayerId> = seeds.iter().map(|p| p.id).collect();

    let standings = compute_standings(&group_matches);
    let rules = decode_rules(tournament.qualification_rules.as_deref());

    // Qualifiers: the top of each group's table, quota per the stored rules,
    // seeds passed over since their slot comes from seeding.
    let mut qualifiers: Vec<Qualifier> = Vec::new();
    for (group, rows) in &standings {
        let quota = rules
            .get(group)
            .copied()
            .unwrap_or(DEFAULT_QUALIFIERS_PER_GROUP);
        let mut taken = 0;
        for (position, row) in rows.iter().enumerate() {
            if taken == quota {
                break;
            }
            if seeded_ids.contains(&row.player_id) {
                continue;
            }
            qualifiers.push(Qualifier {
                row: row.clone(),
                group: group.clone(),
                rank: position + 1,
            });
            taken += 1;
        }
    }
    qualifiers.sort_by(|a, b| b.row.points.cmp(&a.row.points).then(a.rank.cmp(&b.rank)));

    let mut entrants: Vec<Entrant> = seeds
        .iter()
        .take(KNOCKOUT_SLOTS)
        .map(|p| Entrant {
            player_id: p.id,
            affiliation: p.affiliation.clone(),
            group_name: p.group_name.clone(),
        })
        .collect();
    for q in &qualifiers {
        let affiliation = players
            .iter()
            .find(|p| p.id == q.row.player_id)
            .and_then(|p| p.affiliation.clone());
        entrants.push(Entrant {
            player_id: q.row.player_id,
            affiliation,
            group_name: Some(q.group.clone()),
        });
    }

    let (pairs, leftover) = pair_entrants(&entrants);
    if let Some(e) = leftover {
        log::warn!(
            "Odd number of knockout entrants in category {}; player {} left unpaired",
            category,
            e.player_id
        );
    }
    if pairs.len() > round16.len() {
        log::warn!(
            "Category {}: {} pairs for {} round-of-16 slots; extra pairs dropped",
            category,
            pairs.len(),
            round16.len()
        );
    }

    // Write pairs into the skeleton in match order; slots beyond the pair
    // count stay empty.
    for (game, (a, b)) in round16.iter().zip(pairs.iter()) {
        store.update_match(
            game.id,
            MatchUpdate {
                player1_id: Some(a.player_id),
                player2_id: Some(b.player_id),
                status: Some(MatchStatus::Pending),
                ..MatchUpdate::default()
            },
        );
    }
    log::info!(
        "Category {}: bracket filled with {} seed(s) and {} qualifier(s)",
        category,
        seeds.len().min(KNOCKOUT_SLOTS),
        qualifiers.len()
    );

    Ok(BracketFill {
        message: "Bracket generated".to_string(),
        generated: true,
    })
}

/// Filters accepted by the match listing operation.
#[derive(Clone, Debug, Default)]
pub struct MatchQuery {
    pub category: Option<String>,
    pub group_name: Option<String>,
    pub round: Option<Round>,
    pub rounds: Option<Vec<Round>>,
}

/// List matches, `match_order` ascending. A category filter resolves through
/// that category's tournament and fails with not-found if none exists.
pub fn list_matches<S: Store>(store: &S, query: &MatchQuery) -> Result<Vec<Match>, DrawError> {
    let mut filter = MatchFilter {
        group_name: query.group_name.clone(),
        round: query.round,
        rounds: query.rounds.clone(),
        ..MatchFilter::default()
    };
    if let Some(category) = &query.category {
        let tournament = store
            .find_tournament(category)
            .ok_or_else(|| DrawError::TournamentNotFound(category.clone()))?;
        filter.tournament_id = Some(tournament.id);
    }
    Ok(store.find_matches(&filter))
}

struct Qualifier {
    row: StandingRow,
    group: String,
    /// 1-based position in the full group table (seeds included).
    rank: usize,
}

fn seeds_by_rank(players: &[Player]) -> Vec<Player> {
    let mut seeds: Vec<Player> = players.iter().filter(|p| p.is_seeded()).cloned().collect();
    seeds.sort_by_key(|p| p.seed_rank);
    seeds
}
