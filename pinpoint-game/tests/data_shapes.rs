use std::fmt::Write as _;
use std::hash::Hasher;

use pinpoint_game::{
    Action, Cue, DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, GamePhase, GameSession, GameState,
    LocationCatalog, TOTAL_ROUNDS,
};
use serde_json::Value;
use twox_hash::XxHash64;

const CATALOG_HASH: u64 = 0xc44d_e27b_36ff_74cc;

#[test]
fn bundled_catalog_snapshot_stable() {
    let catalog = LocationCatalog::load_default().unwrap();
    let mut canonical = String::new();
    for loc in &catalog.locations {
        writeln!(
            canonical,
            "{}|{}|{:.4}|{:.4}|{}",
            loc.id, loc.name, loc.lat, loc.lon, loc.image
        )
        .unwrap();
    }
    let digest = snapshot_hash(canonical.as_bytes());
    assert_eq!(digest, CATALOG_HASH, "location catalog changed\n{canonical}");
}

#[test]
fn bundled_catalog_coordinates_are_in_range() {
    let catalog = LocationCatalog::load_default().unwrap();
    assert!(catalog.len() >= TOTAL_ROUNDS as usize);
    for loc in &catalog.locations {
        assert!((-90.0..=90.0).contains(&loc.lat), "{} lat", loc.name);
        assert!((-180.0..=180.0).contains(&loc.lon), "{} lon", loc.name);
        assert!(!loc.image.is_empty());
    }
}

#[test]
fn map_defaults_frame_the_whole_world() {
    let (lat, lon) = DEFAULT_MAP_CENTER;
    assert!((-90.0..=90.0).contains(&lat));
    assert!((-180.0..=180.0).contains(&lon));
    assert!((1..=4).contains(&DEFAULT_MAP_ZOOM));
}

#[test]
fn game_state_serializes_in_presentation_shape() {
    let mut session = GameSession::new(0xFACE_B00C, LocationCatalog::load_default().unwrap());
    session
        .dispatch_all(&[
            Action::StartSetup { player_count: 2 },
            Action::BeginJourney,
            Action::PlacePin {
                lat: 10.0,
                lon: 20.0,
            },
        ])
        .unwrap();

    let value = serde_json::to_value(session.state()).unwrap();
    assert_eq!(value["phase"], Value::from("playing"));
    assert_eq!(value["current_round"], Value::from(1));
    assert_eq!(value["locations"].as_array().map(Vec::len), Some(12));
    assert_eq!(value["round_guesses"][0]["player_id"], Value::from(0));
    assert_eq!(value["round_guesses"][0]["locked"], Value::from(false));
    assert_eq!(value["players"][1]["total_score"], Value::from(0));

    let restored: GameState = serde_json::from_value(value).unwrap();
    assert_eq!(&restored, session.state());
    assert_eq!(restored.phase, GamePhase::Playing);
}

#[test]
fn actions_and_cues_use_kebab_case_names() {
    let actions: Vec<Action> = serde_json::from_str(
        r#"[
            {"type":"start-setup","playerCount":2},
            {"type":"set-player-info","playerId":0,"name":"Ada","avatar":"🎅"},
            {"type":"begin-journey"},
            {"type":"place-pin","lat":47.0,"lon":13.0},
            {"type":"lock-guess"},
            {"type":"start-reveal"},
            {"type":"next-round"},
            {"type":"show-final"},
            {"type":"play-again"},
            {"type":"go-to-title"}
        ]"#,
    )
    .unwrap();
    assert_eq!(actions.len(), 10);

    let cue = serde_json::to_value(Cue::ScoreTick {
        player_id: 3,
        score: 1200,
    })
    .unwrap();
    assert_eq!(cue["cue"], Value::from("score-tick"));
    assert_eq!(cue["score"], Value::from(1200));
}

fn snapshot_hash(bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(bytes);
    hasher.finish()
}
