//! Vec-backed in-memory store.
//!
//! Linear scans over insertion-ordered Vecs: tournament data is small and the
//! deterministic order matters more than lookup speed.

use crate::models::{Match, MatchId, Player, PlayerId, Tournament, TournamentId};
use crate::storage::{
    MatchFilter, MatchUpdate, PlayerFilter, PlayerUpdate, Store, TournamentUpdate,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    players: Vec<Player>,
    matches: Vec<Match>,
    tournaments: Vec<Tournament>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn find_players(&self, filter: &PlayerFilter) -> Vec<Player> {
        self.players
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    fn find_player(&self, id: PlayerId) -> Option<Player> {
        self.players.iter().find(|p| p.id == id).cloned()
    }

    fn save_player(&mut self, player: Player) -> Player {
        self.players.push(player.clone());
        player
    }

    fn update_player(&mut self, id: PlayerId, update: PlayerUpdate) -> Option<Player> {
        let p = self.players.iter_mut().find(|p| p.id == id)?;
        if let Some(is_paid) = update.is_paid {
            p.is_paid = is_paid;
        }
        if let Some(group_name) = update.group_name {
            p.group_name = Some(group_name);
        }
        Some(p.clone())
    }

    fn find_matches(&self, filter: &MatchFilter) -> Vec<Match> {
        let mut found: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        found.sort_by_key(|m| m.match_order);
        found
    }

    fn find_match(&self, id: MatchId) -> Option<Match> {
        self.matches.iter().find(|m| m.id == id).cloned()
    }

    fn save_match(&mut self, game: Match) -> Match {
        self.matches.push(game.clone());
        game
    }

    fn update_match(&mut self, id: MatchId, update: MatchUpdate) -> Option<Match> {
        let m = self.matches.iter_mut().find(|m| m.id == id)?;
        if let Some(player1_id) = update.player1_id {
            m.player1_id = Some(player1_id);
        }
        if let Some(player2_id) = update.player2_id {
            m.player2_id = Some(player2_id);
        }
        if let Some(score) = update.player1_score {
            m.player1_score = Some(score);
        }
        if let Some(score) = update.player2_score {
            m.player2_score = Some(score);
        }
        if let Some(winner_id) = update.winner_id {
            m.winner_id = winner_id;
        }
        if let Some(status) = update.status {
            m.status = status;
        }
        Some(m.clone())
    }

    fn find_tournament(&self, category: &str) -> Option<Tournament> {
        self.tournaments
            .iter()
            .find(|t| t.category == category)
            .cloned()
    }

    fn save_tournament(&mut self, tournament: Tournament) -> Tournament {
        self.tournaments.push(tournament.clone());
        tournament
    }

    fn update_tournament(
        &mut self,
        id: TournamentId,
        update: TournamentUpdate,
    ) -> Option<Tournament> {
        let t = self.tournaments.iter_mut().find(|t| t.id == id)?;
        if let Some(status) = update.status {
            t.status = status;
        }
        if let Some(rules) = update.qualification_rules {
            t.qualification_rules = Some(rules);
        }
        Some(t.clone())
    }
}
