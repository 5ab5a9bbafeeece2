//! Player data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// A registered player.
///
/// Created unpaid and ungrouped; an approval action sets `is_paid`, a grouping
/// action sets `group_name`. A seeded player enters the knockout bracket by
/// `seed_rank` and may still carry a group name if they also played groups.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub firstname: String,
    pub lastname: String,
    /// Club / institution. `None` when the player registered without one.
    pub affiliation: Option<String>,
    /// Division/event the player competes in.
    pub category: String,
    /// Pre-assigned knockout seed (1 = top seed). `None` for group players.
    pub seed_rank: Option<u32>,
    /// Group letter assigned after approval ("A", "B", ...).
    pub group_name: Option<String>,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new unpaid, ungrouped player. The registration form uses "-"
    /// for "no affiliation"; that sentinel normalizes to `None` here.
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        affiliation: Option<String>,
        seed_rank: Option<u32>,
        category: impl Into<String>,
    ) -> Self {
        let affiliation = affiliation.filter(|a| {
            let a = a.trim();
            !a.is_empty() && a != "-"
        });
        Self {
            id: Uuid::new_v4(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            affiliation,
            category: category.into(),
            seed_rank,
            group_name: None,
            is_paid: false,
            created_at: Utc::now(),
        }
    }

    /// "Firstname Lastname" for search results and logs.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    pub fn is_seeded(&self) -> bool {
        self.seed_rank.is_some()
    }

    pub fn is_grouped(&self) -> bool {
        self.group_name.is_some()
    }
}
