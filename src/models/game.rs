//! Match, Round, and MatchStatus for group and knockout play.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Phase of the tournament this match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    Group,
    Round16,
    Quarter,
    Semi,
    Final,
}

impl Round {
    /// The knockout rounds in play order (what `round=bracket` expands to).
    pub const BRACKET: [Round; 4] = [Round::Round16, Round::Quarter, Round::Semi, Round::Final];
}

impl std::str::FromStr for Round {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group" => Ok(Round::Group),
            "round16" => Ok(Round::Round16),
            "quarter" => Ok(Round::Quarter),
            "semi" => Ok(Round::Semi),
            "final" => Ok(Round::Final),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single match. Group matches always have both players and a group name;
/// knockout matches may start as empty skeleton slots.
///
/// `match_order` is a stable sort key, not a time slot: group fixtures count
/// up from 1, knockout matches from 1000, so a bracket listing sorts
/// round16 -> quarter -> semi -> final without touching rounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round: Round,
    /// Set only for `Round::Group`.
    pub group_name: Option<String>,
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
    pub player1_score: Option<u32>,
    pub player2_score: Option<u32>,
    /// `None` while pending, or for a completed match declared a tie.
    pub winner_id: Option<PlayerId>,
    pub match_order: u32,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// A pending group fixture between two players.
    pub fn group(
        tournament_id: TournamentId,
        group_name: impl Into<String>,
        player1_id: PlayerId,
        player2_id: PlayerId,
        match_order: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round: Round::Group,
            group_name: Some(group_name.into()),
            player1_id: Some(player1_id),
            player2_id: Some(player2_id),
            player1_score: None,
            player2_score: None,
            winner_id: None,
            match_order,
            status: MatchStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// A knockout skeleton match; either slot may be empty until seeds or
    /// qualifiers are written in.
    pub fn bracket(
        tournament_id: TournamentId,
        round: Round,
        player1_id: Option<PlayerId>,
        player2_id: Option<PlayerId>,
        match_order: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            group_name: None,
            player1_id,
            player2_id,
            player1_score: None,
            player2_score: None,
            winner_id: None,
            match_order,
            status: MatchStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// True once both knockout slots are occupied (the fill-step idempotency
    /// check looks at this).
    pub fn both_slots_filled(&self) -> bool {
        self.player1_id.is_some() && self.player2_id.is_some()
    }
}
