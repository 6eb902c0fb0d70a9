//! Pinpoint Game Engine
//!
//! Platform-agnostic core logic for the Pinpoint geography guessing party game.
//! This crate provides the progression state machine, scoring, location
//! sampling and ranking without UI or platform-specific dependencies.

pub mod action;
pub mod constants;
pub mod data;
pub mod event;
pub mod numbers;
pub mod progression;
pub mod ranking;
pub mod sampler;
pub mod scoring;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use constants::{
    DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, MAX_SCORE_PER_ROUND, PLAYER_COLORS, TOTAL_ROUNDS,
};
pub use data::{Avatar, ConfigurationError, Location, LocationCatalog, avatars};
pub use event::{Cue, cues_for};
pub use progression::transition;
pub use ranking::{Podium, RankedPlayer, rank_players, rank_scores};
pub use sampler::{journey_rng, sample_prefix, shuffled};
pub use scoring::{
    BonusBreakdown, BonusTier, Coordinates, ScoreResult, calculate_score, haversine_miles,
};
pub use session::GameSession;
pub use state::{GamePhase, GameState, Guess, Player, RoundGuess, RoundResult, SetupIssue};

/// Trait for abstracting location catalog loading.
/// Platform-specific implementations should provide this
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the location catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_catalog(&self) -> Result<LocationCatalog, Self::Error>;
}

/// Loader for the catalog bundled with this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl CatalogLoader for EmbeddedCatalog {
    type Error = serde_json::Error;

    fn load_catalog(&self) -> Result<LocationCatalog, Self::Error> {
        LocationCatalog::load_default()
    }
}

/// Main game engine for creating game sessions
pub struct GameEngine<L>
where
    L: CatalogLoader,
{
    loader: L,
}

impl<L> GameEngine<L>
where
    L: CatalogLoader,
{
    /// Create a new game engine with the provided catalog loader
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Construct a new session seeded for location sampling.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn create_session(&self, seed: u64) -> Result<GameSession, L::Error> {
        let catalog = self.loader.load_catalog()?;
        log::debug!(
            target: constants::LOG_TARGET_SESSION,
            "session {seed:#x} created with {} catalog entries",
            catalog.len()
        );
        Ok(GameSession::new(seed, catalog))
    }
}

impl Default for GameEngine<EmbeddedCatalog> {
    fn default() -> Self {
        Self::new(EmbeddedCatalog)
    }
}
