//! Tournament draw & bracket engine: library with models, storage seam, and
//! draw logic.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    allocate_slots, assign_groups, build_draw, compute_standings, decode_rules, draw_groups,
    encode_rules, fill_bracket, generate_group_fixtures, group_players, list_matches,
    pair_entrants, record_result, seed_slots, BracketFill, Entrant, MatchQuery, StandingRow,
    BRACKET_ORDER_OFFSET, DEFAULT_QUALIFIERS_PER_GROUP, KNOCKOUT_SLOTS, SEED_POSITIONS,
};
pub use models::{
    DrawError, Match, MatchId, MatchStatus, Player, PlayerId, Round, Tournament, TournamentId,
    TournamentStatus,
};
pub use storage::{
    MatchFilter, MatchUpdate, MemoryStore, PlayerFilter, PlayerUpdate, Store, TournamentUpdate,
};
