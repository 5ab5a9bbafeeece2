//! Group standings: fold completed group matches into ranked tables.

use crate::models::{Match, MatchStatus, PlayerId, Round};
use serde::Serialize;
use std::cmp::Ordering;

/// Accumulated record of one player within their group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandingRow {
    pub player_id: PlayerId,
    pub points: u32,
    pub wins: u32,
    pub games_won: u32,
    pub games_lost: u32,
}

impl StandingRow {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            points: 0,
            wins: 0,
            games_won: 0,
            games_lost: 0,
        }
    }

    /// Games won per game lost; a lossless player ranks by raw games won.
    pub fn game_ratio(&self) -> f64 {
        if self.games_lost > 0 {
            f64::from(self.games_won) / f64::from(self.games_lost)
        } else {
            f64::from(self.games_won)
        }
    }
}

/// Compute per-group standings from completed group matches.
///
/// Pure function of the match list: groups appear in the order first
/// encountered, and within a group each player's totals are independent of
/// match order. Scoring per completed match: the winner gets 2 points and a
/// win; the loser gets 1 point only if they took at least one game (a
/// 0-score loss earns nothing). Game tallies accumulate raw scores for both
/// sides. A completed match without a winner (declared tie) contributes game
/// tallies only.
///
/// Ranking, descending: points, then wins, then game ratio. Anything still
/// tied keeps encounter order (stable sort); no further criterion is applied.
pub fn compute_standings(matches: &[Match]) -> Vec<(String, Vec<StandingRow>)> {
    let mut groups: Vec<(String, Vec<StandingRow>)> = Vec::new();

    for m in matches {
        if m.round != Round::Group || m.status != MatchStatus::Completed {
            continue;
        }
        let Some(group) = &m.group_name else { continue };
        let (Some(p1), Some(p2)) = (m.player1_id, m.player2_id) else {
            continue;
        };
        let s1 = m.player1_score.unwrap_or(0);
        let s2 = m.player2_score.unwrap_or(0);

        let idx = match groups.iter().position(|(name, _)| name == group) {
            Some(idx) => idx,
            None => {
                groups.push((group.clone(), Vec::new()));
                groups.len() - 1
            }
        };
        apply_result(&mut groups[idx].1, p1, s1, s2, m.winner_id);
        apply_result(&mut groups[idx].1, p2, s2, s1, m.winner_id);
    }

    for (_, rows) in &mut groups {
        rows.sort_by(rank_order);
    }
    groups
}

fn apply_result(
    rows: &mut Vec<StandingRow>,
    player_id: PlayerId,
    scored: u32,
    conceded: u32,
    winner_id: Option<PlayerId>,
) {
    let idx = match rows.iter().position(|r| r.player_id == player_id) {
        Some(idx) => idx,
        None => {
            rows.push(StandingRow::new(player_id));
            rows.len() - 1
        }
    };
    let row = &mut rows[idx];
    row.games_won += scored;
    row.games_lost += conceded;
    match winner_id {
        Some(w) if w == player_id => {
            row.points += 2;
            row.wins += 1;
        }
        Some(_) => {
            // Consolation point for winning at least one game in the loss.
            if scored > 0 {
                row.points += 1;
            }
        }
        None => {}
    }
}

fn rank_order(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.wins.cmp(&a.wins))
        .then(
            b.game_ratio()
                .partial_cmp(&a.game_ratio())
                .unwrap_or(Ordering::Equal),
        )
}
