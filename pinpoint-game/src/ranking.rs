//! Final leaderboard ranking.
//!
//! Standard competition ranking ("1224"): tied totals share a rank and the
//! next lower total skips past every player tied above it.

use serde::Serialize;

use crate::state::Player;

/// A player paired with their final rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer<'a> {
    pub rank: u32,
    pub player: &'a Player,
}

/// Rank raw totals, returning ranks in the same order as `scores`.
#[must_use]
pub fn rank_scores(scores: &[u32]) -> Vec<u32> {
    scores
        .iter()
        .map(|score| {
            let above = scores.iter().filter(|other| *other > score).count();
            u32::try_from(above).unwrap_or(u32::MAX).saturating_add(1)
        })
        .collect()
}

/// Sort players by total, highest first, and assign competition ranks.
///
/// Ties keep seat order.
#[must_use]
pub fn rank_players(players: &[Player]) -> Vec<RankedPlayer<'_>> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.total_score.cmp(&a.total_score));

    let mut ranked: Vec<RankedPlayer<'_>> = Vec::with_capacity(sorted.len());
    for (index, player) in sorted.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.player.total_score == player.total_score => prev.rank,
            _ => u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1),
        };
        ranked.push(RankedPlayer { rank, player });
    }
    ranked
}

/// Winners (rank 1) split from everyone else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Podium<'a> {
    pub winners: Vec<RankedPlayer<'a>>,
    pub others: Vec<RankedPlayer<'a>>,
}

impl<'a> Podium<'a> {
    #[must_use]
    pub fn from_players(players: &'a [Player]) -> Self {
        let (winners, others) = rank_players(players)
            .into_iter()
            .partition(|entry| entry.rank == 1);
        Self { winners, others }
    }

    /// More than one player shares first place.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}
