use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::AVATARS;
use crate::scoring::Coordinates;

const DEFAULT_CATALOG_JSON: &str = include_str!("../assets/locations.json");

/// Raised when static game data cannot support a journey.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("location catalog holds {available} entries but a journey needs {required}")]
    CatalogTooSmall { available: usize, required: usize },
}

/// A place players try to pinpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Postcard image reference, relative to the presentation layer's asset root.
    pub image: String,
}

impl Location {
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// Read-only pool of candidate locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LocationCatalog {
    pub locations: Vec<Location>,
}

impl LocationCatalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            locations: Vec::new(),
        }
    }

    /// Load a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a valid catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn from_locations(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// The bundled twelve-postcard catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset is malformed.
    pub fn load_default() -> Result<Self, serde_json::Error> {
        Self::from_json(DEFAULT_CATALOG_JSON)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Location] {
        &self.locations
    }

    /// Check that a journey of `rounds` rounds can be drawn without repetition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::CatalogTooSmall`] when the pool is too small.
    pub fn validate_for_rounds(&self, rounds: usize) -> Result<(), ConfigurationError> {
        if self.len() < rounds {
            return Err(ConfigurationError::CatalogTooSmall {
                available: self.len(),
                required: rounds,
            });
        }
        Ok(())
    }
}

/// One selectable avatar token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Avatar {
    pub id: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
}

/// Iterate the avatars offered during setup.
pub fn avatars() -> impl Iterator<Item = Avatar> {
    AVATARS
        .iter()
        .map(|&(id, emoji, label)| Avatar { id, emoji, label })
}

/// Look up an avatar by its emoji token.
#[must_use]
pub fn avatar_by_emoji(emoji: &str) -> Option<Avatar> {
    avatars().find(|avatar| avatar.emoji == emoji)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_ROUNDS;

    #[test]
    fn default_catalog_loads() {
        let catalog = LocationCatalog::load_default().unwrap();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.get(1).unwrap().name, "Hallstatt Village, Austria");
        assert!(catalog.get(99).is_none());
        catalog
            .validate_for_rounds(TOTAL_ROUNDS as usize)
            .expect("bundled catalog covers a journey");
    }

    #[test]
    fn catalog_from_json_and_size_check() {
        let json = r#"{
            "locations": [
                { "id": 7, "name": "Test Spot", "lat": 1.5, "lon": -2.5, "image": "spot.png" }
            ]
        }"#;
        let catalog = LocationCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.locations[0].coordinates(), Coordinates::new(1.5, -2.5));
        assert_eq!(
            catalog.validate_for_rounds(2),
            Err(ConfigurationError::CatalogTooSmall {
                available: 1,
                required: 2
            })
        );
        assert!(LocationCatalog::empty().is_empty());
    }

    #[test]
    fn avatars_are_distinct() {
        let all: Vec<_> = avatars().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(avatar_by_emoji("🦌").map(|a| a.id), Some("rudolph"));
        assert!(avatar_by_emoji("x").is_none());
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| b.emoji != a.emoji));
        }
    }
}
