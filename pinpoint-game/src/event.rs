//! Named presentation cues derived from applied transitions.
//!
//! Cues are fire-and-forget hints for audio and visual layers. They never
//! feed back into the state machine.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::state::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "cue", rename_all = "kebab-case")]
pub enum Cue {
    PinPlace,
    LockGuess,
    Reveal,
    /// One per player whose score was posted by a reveal.
    ScoreTick {
        player_id: u32,
        score: u32,
    },
    RoundComplete,
    /// The clue postcard for the new round should be shown.
    Postcard {
        round: u32,
    },
    Victory,
}

impl Cue {
    /// Stable key for looking up the cue's sound asset.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::PinPlace => "pin-place",
            Self::LockGuess => "lock-guess",
            Self::Reveal => "reveal",
            Self::ScoreTick { .. } => "score-tick",
            Self::RoundComplete => "round-complete",
            Self::Postcard { .. } => "postcard",
            Self::Victory => "victory",
        }
    }
}

/// Cues for a transition from `before` to `after` driven by `action`.
///
/// Ignored actions (no state change) produce no cues.
#[must_use]
pub fn cues_for(action: &Action, before: &GameState, after: &GameState) -> Vec<Cue> {
    if before == after {
        return Vec::new();
    }
    let mut cues = Vec::new();
    match action {
        Action::PlacePin { .. } => cues.push(Cue::PinPlace),
        Action::LockGuess => cues.push(Cue::LockGuess),
        Action::StartReveal => {
            cues.push(Cue::Reveal);
            for (old, new) in before.players.iter().zip(&after.players) {
                if new.guesses.len() > old.guesses.len() {
                    cues.push(Cue::ScoreTick {
                        player_id: new.id,
                        score: new.total_score.saturating_sub(old.total_score),
                    });
                }
            }
        }
        Action::NextRound => {
            cues.push(Cue::RoundComplete);
            if after.phase == GamePhase::Final {
                cues.push(Cue::Victory);
            } else {
                cues.push(Cue::Postcard {
                    round: after.current_round,
                });
            }
        }
        Action::BeginJourney => cues.push(Cue::Postcard {
            round: after.current_round,
        }),
        Action::ShowFinal => cues.push(Cue::Victory),
        Action::StartSetup { .. }
        | Action::SetPlayerInfo { .. }
        | Action::PlayAgain
        | Action::GoToTitle => {}
    }
    cues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Guess, Player};

    #[test]
    fn unchanged_state_is_silent() {
        let state = GameState::default();
        assert!(cues_for(&Action::LockGuess, &state, &state).is_empty());
    }

    #[test]
    fn reveal_ticks_each_scored_player() {
        let before = GameState {
            phase: GamePhase::Reveal,
            players: vec![Player::placeholder(0, 0), Player::placeholder(1, 1)],
            ..GameState::default()
        };
        let mut after = before.clone();
        after.players[1].total_score = 870;
        after.players[1].guesses.push(Guess {
            lat: 0.0,
            lon: 0.0,
            score: 870,
            distance_miles: 690.9,
        });
        let cues = cues_for(&Action::StartReveal, &before, &after);
        assert_eq!(
            cues,
            vec![
                Cue::Reveal,
                Cue::ScoreTick {
                    player_id: 1,
                    score: 870
                }
            ]
        );
    }

    #[test]
    fn final_round_plays_victory() {
        let before = GameState {
            phase: GamePhase::Reveal,
            ..GameState::default()
        };
        let after = GameState {
            phase: GamePhase::Final,
            ..GameState::default()
        };
        let cues = cues_for(&Action::NextRound, &before, &after);
        assert_eq!(cues, vec![Cue::RoundComplete, Cue::Victory]);
        assert_eq!(cues[1].key(), "victory");
    }

    #[test]
    fn cue_serializes_with_tag() {
        let json = serde_json::to_string(&Cue::Postcard { round: 3 }).unwrap();
        assert_eq!(json, r#"{"cue":"postcard","round":3}"#);
    }
}
