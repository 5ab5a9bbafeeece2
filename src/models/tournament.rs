//! Tournament record and engine errors.

use crate::models::game::MatchId;
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during draw and bracket operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DrawError {
    /// No tournament exists for the category.
    TournamentNotFound(String),
    /// The category already has a tournament (one tournament per category).
    TournamentExists(String),
    /// No approved players registered in the category.
    NoPlayers(String),
    /// Match id does not exist.
    MatchNotFound(MatchId),
    /// Player id does not exist (group assignment).
    PlayerNotFound(PlayerId),
    /// Group draw asked for zero groups.
    InvalidGroupCount,
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::TournamentNotFound(category) => {
                write!(f, "No tournament found for category {}", category)
            }
            DrawError::TournamentExists(category) => {
                write!(f, "Tournament already exists for category {}", category)
            }
            DrawError::NoPlayers(category) => {
                write!(f, "No approved players in category {}", category)
            }
            DrawError::MatchNotFound(_) => write!(f, "Match not found"),
            DrawError::PlayerNotFound(_) => write!(f, "Player not found"),
            DrawError::InvalidGroupCount => write!(f, "Group count must be between 1 and 26"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Ongoing,
    Completed,
}

/// One tournament per category. `qualification_rules` is a JSON object
/// (group name -> qualifier count) written when the knockout skeleton is
/// built, so the quota is locked in before the group stage is played.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub category: String,
    pub status: TournamentStatus,
    pub qualification_rules: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new ongoing tournament for a category.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            status: TournamentStatus::Ongoing,
            qualification_rules: None,
            created_at: Utc::now(),
        }
    }
}
