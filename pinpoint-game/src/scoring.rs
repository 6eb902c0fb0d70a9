//! Proximity scoring for a single guess.
//!
//! A guess earns a linear base score (1000 at the target, 0 at 3000 miles
//! or beyond) plus three cumulative proximity bonuses evaluated against the
//! same distance.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    BONUS_TIER_100_MILES, BONUS_TIER_500_MILES, BONUS_TIER_1000_MILES, BONUS_WITHIN_100,
    BONUS_WITHIN_500, BONUS_WITHIN_1000, EARTH_RADIUS_MILES, MAX_BASE_SCORE, MAX_RADIUS_MILES,
};
use crate::numbers::round_f64_to_u32;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Proximity bonus tiers, widest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusTier {
    Within1000,
    Within500,
    Within100,
}

impl BonusTier {
    pub const ALL: [Self; 3] = [Self::Within1000, Self::Within500, Self::Within100];

    /// Inclusive distance threshold in miles.
    #[must_use]
    pub const fn threshold_miles(self) -> f64 {
        match self {
            Self::Within1000 => BONUS_TIER_1000_MILES,
            Self::Within500 => BONUS_TIER_500_MILES,
            Self::Within100 => BONUS_TIER_100_MILES,
        }
    }

    /// Points awarded on top of any wider tiers.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Within1000 => BONUS_WITHIN_1000,
            Self::Within500 => BONUS_WITHIN_500,
            Self::Within100 => BONUS_WITHIN_100,
        }
    }

    #[must_use]
    pub fn applies(self, distance_miles: f64) -> bool {
        distance_miles <= self.threshold_miles()
    }
}

/// Per-tier bonus breakdown for a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BonusBreakdown {
    pub within_1000: u32,
    pub within_500: u32,
    pub within_100: u32,
    pub total: u32,
}

impl BonusBreakdown {
    #[must_use]
    pub fn for_distance(distance_miles: f64) -> Self {
        let award = |tier: BonusTier| {
            if tier.applies(distance_miles) {
                tier.points()
            } else {
                0
            }
        };
        let within_1000 = award(BonusTier::Within1000);
        let within_500 = award(BonusTier::Within500);
        let within_100 = award(BonusTier::Within100);
        Self {
            within_1000,
            within_500,
            within_100,
            total: within_1000 + within_500 + within_100,
        }
    }

    /// Tiers that paid out, widest first.
    #[must_use]
    pub fn earned_tiers(&self) -> SmallVec<[BonusTier; 3]> {
        BonusTier::ALL
            .into_iter()
            .filter(|tier| match tier {
                BonusTier::Within1000 => self.within_1000 > 0,
                BonusTier::Within500 => self.within_500 > 0,
                BonusTier::Within100 => self.within_100 > 0,
            })
            .collect()
    }
}

/// Structured result of scoring one guess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Base score plus all bonuses.
    pub score: u32,
    pub base_score: u32,
    pub distance_miles: f64,
    pub bonuses: BonusBreakdown,
}

/// Great-circle distance in miles using the Haversine formula.
#[must_use]
pub fn haversine_miles(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Linear base score: 1000 at 0 miles down to 0 at 3000 miles or more.
#[must_use]
pub fn base_score(distance_miles: f64) -> u32 {
    round_f64_to_u32(MAX_BASE_SCORE * (1.0 - distance_miles / MAX_RADIUS_MILES))
}

/// Score an already-measured distance.
#[must_use]
pub fn score_distance(distance_miles: f64) -> ScoreResult {
    let base_score = base_score(distance_miles);
    let bonuses = BonusBreakdown::for_distance(distance_miles);
    ScoreResult {
        score: base_score + bonuses.total,
        base_score,
        distance_miles,
        bonuses,
    }
}

/// Score a guess against the true location of the round.
#[must_use]
pub fn calculate_score(guess: Coordinates, actual: Coordinates) -> ScoreResult {
    score_distance(haversine_miles(guess, actual))
}
