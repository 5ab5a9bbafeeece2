//! Tournament draw logic: fixtures, standings, qualification, seeding,
//! pairing, orchestration.

mod draw;
mod group_stage;
mod grouping;
mod pairing;
mod qualification;
mod results;
mod seeding;
mod standings;

pub use draw::{
    build_draw, fill_bracket, list_matches, BracketFill, MatchQuery, BRACKET_ORDER_OFFSET,
    KNOCKOUT_SLOTS,
};
pub use group_stage::{generate_group_fixtures, group_players};
pub use grouping::{assign_groups, draw_groups};
pub use pairing::{pair_entrants, Entrant};
pub use qualification::{
    allocate_slots, decode_rules, encode_rules, DEFAULT_QUALIFIERS_PER_GROUP,
};
pub use results::record_result;
pub use seeding::{seed_slots, SEED_POSITIONS};
pub use standings::{compute_standings, StandingRow};
