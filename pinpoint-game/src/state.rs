use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::constants::PLAYER_COLORS;
use crate::data::Location;
use crate::numbers::round_to_slot;
use crate::scoring::{Coordinates, ScoreResult, calculate_score};

/// Top-level phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Title,
    Setup,
    Playing,
    Reveal,
    Final,
}

impl GamePhase {
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::Playing | Self::Reveal)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GamePhase::Title => write!(f, "title"),
            GamePhase::Setup => write!(f, "setup"),
            GamePhase::Playing => write!(f, "playing"),
            GamePhase::Reveal => write!(f, "reveal"),
            GamePhase::Final => write!(f, "final"),
        }
    }
}

/// A completed-round guess kept in a player's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    pub lat: f64,
    pub lon: f64,
    pub score: u32,
    pub distance_miles: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    /// Emoji token; empty until chosen during setup.
    pub avatar: String,
    /// Marker color, fixed at creation.
    pub color: String,
    pub total_score: u32,
    /// One entry per revealed round, oldest first.
    pub guesses: Vec<Guess>,
}

impl Player {
    /// Create a placeholder player for seat `seat`.
    #[must_use]
    pub fn placeholder(id: u32, seat: usize) -> Self {
        Self {
            id,
            name: String::new(),
            avatar: String::new(),
            color: PLAYER_COLORS[seat % PLAYER_COLORS.len()].to_string(),
            total_score: 0,
            guesses: Vec::new(),
        }
    }

    /// Clear score and history, keeping identity and presentation.
    #[must_use]
    pub fn reset_progress(self) -> Self {
        Self {
            total_score: 0,
            guesses: Vec::new(),
            ..self
        }
    }
}

/// A pin for the round in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundGuess {
    pub player_id: u32,
    pub lat: f64,
    pub lon: f64,
    pub locked: bool,
}

impl RoundGuess {
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// Why a setup is not ready to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetupIssue {
    MissingName { player_id: u32 },
    MissingAvatar { player_id: u32 },
    DuplicateAvatar { avatar: String, player_ids: Vec<u32> },
}

/// One player's line on the reveal board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundResult {
    pub player_id: u32,
    pub guess: Coordinates,
    pub result: ScoreResult,
}

/// Aggregate root observed by the presentation layer after every dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    /// One-based round number.
    pub current_round: u32,
    pub locations: Vec<Location>,
    pub round_guesses: Vec<RoundGuess>,
    /// Round whose scores have already been posted, if any.
    #[serde(default)]
    pub revealed_round: Option<u32>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Title,
            players: Vec::new(),
            current_player_index: 0,
            current_round: 1,
            locations: Vec::new(),
            round_guesses: Vec::new(),
            revealed_round: None,
        }
    }
}

impl GameState {
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        self.phase.is_in_progress()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    #[must_use]
    pub fn current_location(&self) -> Option<&Location> {
        self.locations.get(round_to_slot(self.current_round))
    }

    #[must_use]
    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn guess_for(&self, player_id: u32) -> Option<&RoundGuess> {
        self.round_guesses.iter().find(|g| g.player_id == player_id)
    }

    /// The pin of the player whose turn it is, if placed.
    #[must_use]
    pub fn current_guess(&self) -> Option<&RoundGuess> {
        self.current_player().and_then(|p| self.guess_for(p.id))
    }

    /// Every player has a locked pin this round.
    #[must_use]
    pub fn all_guesses_locked(&self) -> bool {
        !self.players.is_empty()
            && self.round_guesses.len() == self.players.len()
            && self.round_guesses.iter().all(|g| g.locked)
    }

    /// Players ordered by total score, highest first; ties keep seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player> {
        let mut ordered: Vec<&Player> = self.players.iter().collect();
        ordered.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        ordered
    }

    /// Score this round's pins against the current location, best first.
    ///
    /// Read-only preview; totals only change on `start-reveal`.
    #[must_use]
    pub fn round_results(&self) -> Vec<RoundResult> {
        let Some(location) = self.current_location() else {
            return Vec::new();
        };
        let actual = location.coordinates();
        let mut results: Vec<RoundResult> = self
            .round_guesses
            .iter()
            .map(|g| RoundResult {
                player_id: g.player_id,
                guess: g.coordinates(),
                result: calculate_score(g.coordinates(), actual),
            })
            .collect();
        results.sort_by(|a, b| b.result.score.cmp(&a.result.score));
        results
    }

    /// Setup readiness problems: blank names, missing or shared avatars.
    #[must_use]
    pub fn setup_issues(&self) -> Vec<SetupIssue> {
        let mut issues = Vec::new();
        let mut by_avatar: BTreeMap<&str, SmallVec<[u32; 4]>> = BTreeMap::new();
        for player in &self.players {
            if player.name.trim().is_empty() {
                issues.push(SetupIssue::MissingName {
                    player_id: player.id,
                });
            }
            if player.avatar.is_empty() {
                issues.push(SetupIssue::MissingAvatar {
                    player_id: player.id,
                });
            } else {
                by_avatar
                    .entry(player.avatar.as_str())
                    .or_default()
                    .push(player.id);
            }
        }
        for (avatar, ids) in by_avatar {
            if ids.len() > 1 {
                issues.push(SetupIssue::DuplicateAvatar {
                    avatar: avatar.to_string(),
                    player_ids: ids.into_vec(),
                });
            }
        }
        issues
    }

    #[must_use]
    pub fn setup_ready(&self) -> bool {
        !self.players.is_empty() && self.setup_issues().is_empty()
    }
}
