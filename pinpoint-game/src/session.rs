use rand_chacha::ChaCha20Rng;

use crate::action::Action;
use crate::constants::LOG_TARGET_SESSION;
use crate::data::{ConfigurationError, LocationCatalog};
use crate::event::{Cue, cues_for};
use crate::progression::transition;
use crate::ranking::{Podium, RankedPlayer, rank_players};
use crate::sampler::journey_rng;
use crate::state::{GamePhase, GameState};

/// Owns the single current game state and applies actions in order.
#[derive(Debug, Clone)]
pub struct GameSession {
    seed: u64,
    catalog: LocationCatalog,
    rng: ChaCha20Rng,
    state: GameState,
}

impl GameSession {
    /// Construct a fresh session in the title phase.
    #[must_use]
    pub fn new(seed: u64, catalog: LocationCatalog) -> Self {
        Self {
            seed,
            catalog,
            rng: journey_rng(seed),
            state: GameState::default(),
        }
    }

    /// Apply one action, returning the presentation cues it produced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a journey cannot be started from the
    /// session's catalog. The state is left as it was.
    pub fn dispatch(&mut self, action: &Action) -> Result<Vec<Cue>, ConfigurationError> {
        let from = self.state.phase;
        let next = match transition(self.state.clone(), action, &self.catalog, &mut self.rng) {
            Ok(next) => next,
            Err(err) => {
                log::error!(target: LOG_TARGET_SESSION, "{action} failed: {err}");
                return Err(err);
            }
        };
        let cues = cues_for(action, &self.state, &next);
        self.state = next;

        let to = self.state.phase;
        log::debug!(
            target: LOG_TARGET_SESSION,
            "{action}: {from} -> {to} (round {}, player {})",
            self.state.current_round,
            self.state.current_player_index
        );
        if from != to {
            match to {
                GamePhase::Playing if from == GamePhase::Setup => log::info!(
                    target: LOG_TARGET_SESSION,
                    "journey started with {} players over {} locations",
                    self.state.players.len(),
                    self.state.locations.len()
                ),
                GamePhase::Final => log::info!(
                    target: LOG_TARGET_SESSION,
                    "journey complete after round {}",
                    self.state.current_round
                ),
                _ => {}
            }
        }
        Ok(cues)
    }

    /// Apply a sequence of actions, collecting every cue.
    ///
    /// # Errors
    ///
    /// Stops at the first [`ConfigurationError`].
    pub fn dispatch_all<'a>(
        &mut self,
        actions: impl IntoIterator<Item = &'a Action>,
    ) -> Result<Vec<Cue>, ConfigurationError> {
        let mut cues = Vec::new();
        for action in actions {
            cues.extend(self.dispatch(action)?);
        }
        Ok(cues)
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Borrow the current state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    /// Final ranks for the current roster.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<RankedPlayer<'_>> {
        rank_players(&self.state.players)
    }

    #[must_use]
    pub fn podium(&self) -> Podium<'_> {
        Podium::from_players(&self.state.players)
    }

    /// Deterministically reseed location sampling for future journeys.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = journey_rng(seed);
    }

    /// Consume the session, returning the underlying game state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}
