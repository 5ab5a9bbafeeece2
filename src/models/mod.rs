//! Data model: players, tournaments, matches.

pub mod game;
pub mod player;
pub mod tournament;

pub use game::{Match, MatchId, MatchStatus, Round};
pub use player::{Player, PlayerId};
pub use tournament::{DrawError, Tournament, TournamentId, TournamentStatus};
