//! Centralized balance and tuning constants for Pinpoint game logic.
//!
//! These values define the deterministic math for scoring and progression.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging targets ----------------------------------------------------------
pub(crate) const LOG_TARGET_SESSION: &str = "pinpoint::session";
pub(crate) const LOG_TARGET_PROGRESSION: &str = "pinpoint::progression";

// Journey shape ------------------------------------------------------------
/// Number of rounds in a single journey.
pub const TOTAL_ROUNDS: u32 = 12;
/// Highest base score a single round awards, before distance bonuses.
pub const MAX_SCORE_PER_ROUND: u32 = 1_000;

// Scoring ------------------------------------------------------------------
pub(crate) const EARTH_RADIUS_MILES: f64 = 3_958.8;
pub(crate) const MAX_BASE_SCORE: f64 = MAX_SCORE_PER_ROUND as f64;
pub(crate) const MAX_RADIUS_MILES: f64 = 3_000.0;

pub(crate) const BONUS_TIER_1000_MILES: f64 = 1_000.0;
pub(crate) const BONUS_TIER_500_MILES: f64 = 500.0;
pub(crate) const BONUS_TIER_100_MILES: f64 = 100.0;

pub(crate) const BONUS_WITHIN_1000: u32 = 100;
pub(crate) const BONUS_WITHIN_500: u32 = 200;
pub(crate) const BONUS_WITHIN_100: u32 = 200;

// Sampling -----------------------------------------------------------------
pub(crate) const SAMPLER_DOMAIN_TAG: &[u8] = b"pinpoint-locations";

// Players ------------------------------------------------------------------
/// Marker colors assigned to players by seat, cycling past the end.
pub const PLAYER_COLORS: [&str; 6] = [
    "#C41E3A", // red
    "#165B33", // green
    "#1E90FF", // blue
    "#FFD700", // gold
    "#9932CC", // purple
    "#FF6B6B", // coral
];

/// Selectable avatars as `(id, emoji, label)`.
pub const AVATARS: [(&str, &str, &str); 10] = [
    ("santa", "🎅", "Santa"),
    ("mrs-claus", "🤶", "Mrs. Claus"),
    ("rudolph", "🦌", "Rudolph"),
    ("snowman", "⛄", "Snowman"),
    ("tree", "🎄", "Christmas Tree"),
    ("elf", "🧝", "Elf"),
    ("gift", "🎁", "Gift"),
    ("star", "⭐", "Star"),
    ("bell", "🔔", "Bell"),
    ("cookie", "🍪", "Cookie"),
];

// Map surface defaults -----------------------------------------------------
/// Initial `(lat, lon)` center for map surfaces.
pub const DEFAULT_MAP_CENTER: (f64, f64) = (20.0, 0.0);
/// Initial tile zoom level for map surfaces (whole world visible).
pub const DEFAULT_MAP_ZOOM: u8 = 2;
