use std::fmt;
use std::str::FromStr;

use pinpoint_game::{Coordinates, GameState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Approximate miles per degree of latitude.
const MILES_PER_DEGREE: f64 = 69.09;

/// Policy interface for automated guessing.
pub trait GuessPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick a map position for the current round.
    fn pick_pin(&mut self, state: &GameState, target: Coordinates) -> Coordinates;
}

/// Built-in guessing strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessStrategy {
    /// Drops the pin exactly on the target.
    Oracle,
    /// Lands within roughly 80 miles.
    Near,
    /// Lands within roughly 700 miles.
    Regional,
    /// Uniformly random point on the map.
    Wild,
    /// The opposite side of the planet.
    Antipode,
}

impl GuessStrategy {
    pub const ALL: [Self; 5] = [
        Self::Oracle,
        Self::Near,
        Self::Regional,
        Self::Wild,
        Self::Antipode,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GuessStrategy::Oracle => "oracle",
            GuessStrategy::Near => "near",
            GuessStrategy::Regional => "regional",
            GuessStrategy::Wild => "wild",
            GuessStrategy::Antipode => "antipode",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            GuessStrategy::Oracle => "pins the exact location every round",
            GuessStrategy::Near => "jitters within ~80 miles of the target",
            GuessStrategy::Regional => "jitters within ~700 miles of the target",
            GuessStrategy::Wild => "pins a uniformly random point",
            GuessStrategy::Antipode => "pins the antipode of the target",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn GuessPolicy + Send> {
        match self {
            GuessStrategy::Oracle => Box::new(OraclePolicy),
            GuessStrategy::Near => Box::new(JitterPolicy::new("near", 80.0, seed)),
            GuessStrategy::Regional => Box::new(JitterPolicy::new("regional", 700.0, seed)),
            GuessStrategy::Wild => Box::new(WildPolicy::new(seed)),
            GuessStrategy::Antipode => Box::new(AntipodePolicy),
        }
    }
}

impl fmt::Display for GuessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GuessStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown guess policy '{s}'"))
    }
}

struct OraclePolicy;
struct AntipodePolicy;

struct JitterPolicy {
    name: &'static str,
    radius_miles: f64,
    rng: ChaCha20Rng,
}

impl JitterPolicy {
    fn new(name: &'static str, radius_miles: f64, seed: u64) -> Self {
        Self {
            name,
            radius_miles,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

struct WildPolicy {
    rng: ChaCha20Rng,
}

impl WildPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl GuessPolicy for OraclePolicy {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn pick_pin(&mut self, _state: &GameState, target: Coordinates) -> Coordinates {
        target
    }
}

impl GuessPolicy for JitterPolicy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn pick_pin(&mut self, _state: &GameState, target: Coordinates) -> Coordinates {
        // Stay on the target's meridian so the offset is an exact distance.
        let max_degrees = self.radius_miles / MILES_PER_DEGREE;
        let offset = self.rng.gen_range(-max_degrees..=max_degrees);
        let lat = (target.lat + offset).clamp(-90.0, 90.0);
        Coordinates::new(lat, target.lon)
    }
}

impl GuessPolicy for WildPolicy {
    fn name(&self) -> &'static str {
        "wild"
    }

    fn pick_pin(&mut self, _state: &GameState, _target: Coordinates) -> Coordinates {
        Coordinates::new(
            self.rng.gen_range(-90.0..=90.0),
            self.rng.gen_range(-180.0..=180.0),
        )
    }
}

impl GuessPolicy for AntipodePolicy {
    fn name(&self) -> &'static str {
        "antipode"
    }

    fn pick_pin(&mut self, _state: &GameState, target: Coordinates) -> Coordinates {
        let lon = if target.lon > 0.0 {
            target.lon - 180.0
        } else {
            target.lon + 180.0
        };
        Coordinates::new(-target.lat, lon)
    }
}
