//! Match result resolution: apply a reported score and determine the winner.

use crate::models::{DrawError, Match, MatchId, MatchStatus, PlayerId};
use crate::storage::{MatchUpdate, Store};
use std::cmp::Ordering;

/// Apply a reported score to a match and resolve the winner.
///
/// An explicit winner id is trusted as given. Otherwise the higher score
/// wins; equal scores leave the winner null, a declared tie; sports whose
/// tiebreak rules are invisible to this engine must pass the winner
/// explicitly. Status defaults to completed unless overridden. The winner is
/// NOT advanced into the next round's slot; that stays a manual step.
pub fn record_result<S: Store>(
    store: &mut S,
    match_id: MatchId,
    player1_score: u32,
    player2_score: u32,
    winner_id: Option<PlayerId>,
    status: Option<MatchStatus>,
) -> Result<Match, DrawError> {
    let game = store
        .find_match(match_id)
        .ok_or(DrawError::MatchNotFound(match_id))?;

    let winner = match winner_id {
        Some(w) => Some(w),
        None => match player1_score.cmp(&player2_score) {
            Ordering::Greater => game.player1_id,
            Ordering::Less => game.player2_id,
            Ordering::Equal => None,
        },
    };

    store
        .update_match(
            match_id,
            MatchUpdate {
                player1_score: Some(player1_score),
                player2_score: Some(player2_score),
                winner_id: Some(winner),
                status: Some(status.unwrap_or(MatchStatus::Completed)),
                ..MatchUpdate::default()
            },
        )
        .ok_or(DrawError::MatchNotFound(match_id))
}
