//! Storage collaborator: the engine's only side-effect seam.
//!
//! The engine reads a consistent snapshot of records through [`Store`],
//! computes in memory, and issues a batch of writes back through the same
//! interface. Serializing concurrent writes to the same record is the
//! store's responsibility (the web shell wraps [`MemoryStore`] in an
//! `RwLock`); the engine does no locking of its own.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    Match, MatchId, MatchStatus, Player, PlayerId, Round, Tournament, TournamentId,
    TournamentStatus,
};

/// Player query. `None` fields are "don't care". Result order is insertion
/// order: the qualification allocator depends on groups appearing in the
/// order their players were first stored.
#[derive(Clone, Debug, Default)]
pub struct PlayerFilter {
    pub category: Option<String>,
    pub is_paid: Option<bool>,
    /// `Some(true)` = has a group, `Some(false)` = ungrouped.
    pub grouped: Option<bool>,
    /// `Some(true)` = has a seed rank, `Some(false)` = unseeded.
    pub seeded: Option<bool>,
    /// Case-insensitive substring match on first or last name.
    pub name_query: Option<String>,
}

impl PlayerFilter {
    /// Approved players of one category (the draw's input set).
    pub fn paid_in_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            is_paid: Some(true),
            ..Self::default()
        }
    }

    pub fn matches(&self, p: &Player) -> bool {
        if let Some(category) = &self.category {
            if &p.category != category {
                return false;
            }
        }
        if let Some(is_paid) = self.is_paid {
            if p.is_paid != is_paid {
                return false;
            }
        }
        if let Some(grouped) = self.grouped {
            if p.is_grouped() != grouped {
                return false;
            }
        }
        if let Some(seeded) = self.seeded {
            if p.is_seeded() != seeded {
                return false;
            }
        }
        if let Some(q) = &self.name_query {
            let q = q.to_lowercase();
            let hit = p.firstname.to_lowercase().contains(&q)
                || p.lastname.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Match query. Results are always sorted by `match_order` ascending.
#[derive(Clone, Debug, Default)]
pub struct MatchFilter {
    pub tournament_id: Option<TournamentId>,
    pub round: Option<Round>,
    /// Any of these rounds (e.g. the four knockout rounds).
    pub rounds: Option<Vec<Round>>,
    pub group_name: Option<String>,
    pub status: Option<MatchStatus>,
}

impl MatchFilter {
    pub fn in_tournament(tournament_id: TournamentId) -> Self {
        Self {
            tournament_id: Some(tournament_id),
            ..Self::default()
        }
    }

    pub fn round(mut self, round: Round) -> Self {
        self.round = Some(round);
        self
    }

    pub fn status(mut self, status: MatchStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, m: &Match) -> bool {
        if let Some(tid) = self.tournament_id {
            if m.tournament_id != tid {
                return false;
            }
        }
        if let Some(round) = self.round {
            if m.round != round {
                return false;
            }
        }
        if let Some(rounds) = &self.rounds {
            if !rounds.contains(&m.round) {
                return false;
            }
        }
        if let Some(group) = &self.group_name {
            if m.group_name.as_deref() != Some(group.as_str()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if m.status != status {
                return false;
            }
        }
        true
    }
}

/// Partial player update. `None` = leave unchanged.
#[derive(Clone, Debug, Default)]
pub struct PlayerUpdate {
    pub is_paid: Option<bool>,
    pub group_name: Option<String>,
}

/// Partial match update. `None` = leave unchanged. `winner_id` is two-level
/// so a completed tie can write an explicit null winner.
#[derive(Clone, Debug, Default)]
pub struct MatchUpdate {
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
    pub player1_score: Option<u32>,
    pub player2_score: Option<u32>,
    pub winner_id: Option<Option<PlayerId>>,
    pub status: Option<MatchStatus>,
}

/// Partial tournament update. `None` = leave unchanged.
#[derive(Clone, Debug, Default)]
pub struct TournamentUpdate {
    pub status: Option<TournamentStatus>,
    pub qualification_rules: Option<String>,
}

/// Record store consumed by the engine and the web shell.
pub trait Store {
    fn find_players(&self, filter: &PlayerFilter) -> Vec<Player>;
    fn find_player(&self, id: PlayerId) -> Option<Player>;
    fn save_player(&mut self, player: Player) -> Player;
    fn update_player(&mut self, id: PlayerId, update: PlayerUpdate) -> Option<Player>;

    fn find_matches(&self, filter: &MatchFilter) -> Vec<Match>;
    fn find_match(&self, id: MatchId) -> Option<Match>;
    fn save_match(&mut self, game: Match) -> Match;
    fn update_match(&mut self, id: MatchId, update: MatchUpdate) -> Option<Match>;

    fn find_tournament(&self, category: &str) -> Option<Tournament>;
    fn save_tournament(&mut self, tournament: Tournament) -> Tournament;
    fn update_tournament(&mut self, id: TournamentId, update: TournamentUpdate)
        -> Option<Tournament>;
}
