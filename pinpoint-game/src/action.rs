//! The closed set of intents the presentation layer may dispatch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    StartSetup {
        #[serde(rename = "playerCount")]
        player_count: usize,
    },
    SetPlayerInfo {
        #[serde(rename = "playerId")]
        player_id: u32,
        name: String,
        avatar: String,
    },
    BeginJourney,
    PlacePin {
        lat: f64,
        lon: f64,
    },
    LockGuess,
    StartReveal,
    NextRound,
    ShowFinal,
    PlayAgain,
    GoToTitle,
}

impl Action {
    /// Parse an action from its JSON form, e.g. `{"type":"place-pin","lat":1,"lon":2}`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown action types or missing fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Stable kebab-case name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartSetup { .. } => "start-setup",
            Self::SetPlayerInfo { .. } => "set-player-info",
            Self::BeginJourney => "begin-journey",
            Self::PlacePin { .. } => "place-pin",
            Self::LockGuess => "lock-guess",
            Self::StartReveal => "start-reveal",
            Self::NextRound => "next-round",
            Self::ShowFinal => "show-final",
            Self::PlayAgain => "play-again",
            Self::GoToTitle => "go-to-title",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_json() {
        let pin = Action::from_json(r#"{"type":"place-pin","lat":12.5,"lon":-3.0}"#).unwrap();
        assert_eq!(pin, Action::PlacePin { lat: 12.5, lon: -3.0 });

        let setup = Action::from_json(r#"{"type":"start-setup","playerCount":3}"#).unwrap();
        assert_eq!(setup, Action::StartSetup { player_count: 3 });

        let info = Action::from_json(
            r#"{"type":"set-player-info","playerId":1,"name":"Bo","avatar":"⛄"}"#,
        )
        .unwrap();
        assert_eq!(info.name(), "set-player-info");

        assert_eq!(
            Action::from_json(r#"{"type":"begin-journey"}"#).unwrap(),
            Action::BeginJourney
        );
    }

    #[test]
    fn unknown_actions_are_rejected() {
        assert!(Action::from_json(r#"{"type":"teleport"}"#).is_err());
        assert!(Action::from_json(r#"{"type":"place-pin","lat":1.0}"#).is_err());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&Action::LockGuess).unwrap();
        assert_eq!(json, r#"{"type":"lock-guess"}"#);
        assert_eq!(Action::ShowFinal.to_string(), "show-final");
    }
}
