//! Pure transition function of the game state machine.
//!
//! `transition` consumes the current [`GameState`] and returns the next one.
//! Misuse (an action that does not apply to the current phase, or one that
//! references an unknown player) leaves the state untouched. The only hard
//! failure is a location catalog too small to fill a journey.
//!
//! Locking the last pin of a round moves the game to `reveal` but does not
//! post scores; totals change only when `start-reveal` is applied.

use rand::Rng;

use crate::action::Action;
use crate::constants::{LOG_TARGET_PROGRESSION, TOTAL_ROUNDS};
use crate::data::{ConfigurationError, LocationCatalog};
use crate::numbers::index_to_id;
use crate::sampler::sample_prefix;
use crate::scoring::calculate_score;
use crate::state::{GamePhase, GameState, Guess, Player, RoundGuess};

/// Rounds per journey as a collection length.
#[must_use]
pub fn total_rounds() -> usize {
    usize::try_from(TOTAL_ROUNDS).unwrap_or(usize::MAX)
}

/// Apply `action` to `state`.
///
/// `catalog` and `rng` are only consulted by `begin-journey`.
///
/// # Errors
///
/// Returns [`ConfigurationError::CatalogTooSmall`] when `begin-journey` is
/// applied with a catalog holding fewer than [`TOTAL_ROUNDS`] locations.
pub fn transition<R>(
    state: GameState,
    action: &Action,
    catalog: &LocationCatalog,
    rng: &mut R,
) -> Result<GameState, ConfigurationError>
where
    R: Rng + ?Sized,
{
    let next = match action {
        Action::StartSetup { player_count } => start_setup(state, *player_count),
        Action::SetPlayerInfo {
            player_id,
            name,
            avatar,
        } => set_player_info(state, *player_id, name, avatar),
        Action::BeginJourney => begin_journey(state, catalog, rng)?,
        Action::PlacePin { lat, lon } => place_pin(state, *lat, *lon),
        Action::LockGuess => lock_guess(state),
        Action::StartReveal => start_reveal(state),
        Action::NextRound => next_round(state),
        Action::ShowFinal => show_final(state),
        Action::PlayAgain => play_again(state),
        Action::GoToTitle => GameState::default(),
    };
    Ok(next)
}

fn ignored(state: GameState, action: &'static str, reason: &str) -> GameState {
    log::warn!(
        target: LOG_TARGET_PROGRESSION,
        "ignoring {action} in phase {}: {reason}",
        state.phase
    );
    state
}

fn start_setup(state: GameState, player_count: usize) -> GameState {
    if state.phase != GamePhase::Title {
        return ignored(state, "start-setup", "setup starts from the title screen");
    }
    if player_count == 0 {
        return ignored(state, "start-setup", "at least one player is required");
    }
    let players = (0..player_count)
        .map(|seat| Player::placeholder(index_to_id(seat), seat))
        .collect();
    GameState {
        phase: GamePhase::Setup,
        players,
        ..state
    }
}

fn set_player_info(mut state: GameState, player_id: u32, name: &str, avatar: &str) -> GameState {
    if state.phase != GamePhase::Setup {
        return ignored(state, "set-player-info", "players are locked in");
    }
    let Some(player) = state.players.iter_mut().find(|p| p.id == player_id) else {
        return ignored(state, "set-player-info", "unknown player id");
    };
    player.name = name.to_string();
    player.avatar = avatar.to_string();
    state
}

fn begin_journey<R>(
    state: GameState,
    catalog: &LocationCatalog,
    rng: &mut R,
) -> Result<GameState, ConfigurationError>
where
    R: Rng + ?Sized,
{
    if state.phase != GamePhase::Setup {
        return Ok(ignored(state, "begin-journey", "no setup in progress"));
    }
    let rounds = total_rounds();
    catalog.validate_for_rounds(rounds)?;
    let locations = sample_prefix(catalog.as_slice(), rounds, rng).ok_or(
        ConfigurationError::CatalogTooSmall {
            available: catalog.len(),
            required: rounds,
        },
    )?;
    Ok(GameState {
        phase: GamePhase::Playing,
        current_round: 1,
        current_player_index: 0,
        locations,
        round_guesses: Vec::new(),
        revealed_round: None,
        ..state
    })
}

fn place_pin(mut state: GameState, lat: f64, lon: f64) -> GameState {
    if state.phase != GamePhase::Playing {
        return ignored(state, "place-pin", "no round in progress");
    }
    let Some(player_id) = state.current_player().map(|p| p.id) else {
        return ignored(state, "place-pin", "no current player");
    };
    // A locked pin is still overwritten; callers disable the map after locking.
    if let Some(existing) = state
        .round_guesses
        .iter_mut()
        .find(|g| g.player_id == player_id)
    {
        existing.lat = lat;
        existing.lon = lon;
    } else {
        state.round_guesses.push(RoundGuess {
            player_id,
            lat,
            lon,
            locked: false,
        });
    }
    state
}

fn lock_guess(mut state: GameState) -> GameState {
    if state.phase != GamePhase::Playing {
        return ignored(state, "lock-guess", "no round in progress");
    }
    let Some(player_id) = state.current_player().map(|p| p.id) else {
        return ignored(state, "lock-guess", "no current player");
    };
    // A seat without a pin still passes the turn; it simply scores nothing.
    if let Some(guess) = state
        .round_guesses
        .iter_mut()
        .find(|g| g.player_id == player_id)
    {
        guess.locked = true;
    }

    let next_index = state.current_player_index + 1;
    if next_index >= state.players.len() {
        state.current_player_index = 0;
        state.phase = GamePhase::Reveal;
    } else {
        state.current_player_index = next_index;
    }
    state
}

fn start_reveal(mut state: GameState) -> GameState {
    if !state.phase.is_in_progress() {
        return ignored(state, "start-reveal", "no round in progress");
    }
    let Some(actual) = state.current_location().map(|loc| loc.coordinates()) else {
        return ignored(state, "start-reveal", "no location for this round");
    };
    if state.revealed_round == Some(state.current_round) {
        state.phase = GamePhase::Reveal;
        return state;
    }
    let GameState {
        players,
        round_guesses,
        ..
    } = &mut state;
    for player in players.iter_mut() {
        let Some(pin) = round_guesses.iter().find(|g| g.player_id == player.id) else {
            continue;
        };
        let result = calculate_score(pin.coordinates(), actual);
        player.total_score = player.total_score.saturating_add(result.score);
        player.guesses.push(Guess {
            lat: pin.lat,
            lon: pin.lon,
            score: result.score,
            distance_miles: result.distance_miles,
        });
    }
    state.revealed_round = Some(state.current_round);
    state.phase = GamePhase::Reveal;
    state
}

fn next_round(state: GameState) -> GameState {
    if state.phase != GamePhase::Reveal {
        return ignored(state, "next-round", "round not revealed yet");
    }
    if state.current_round >= TOTAL_ROUNDS {
        return GameState {
            phase: GamePhase::Final,
            ..state
        };
    }
    GameState {
        phase: GamePhase::Playing,
        current_round: state.current_round + 1,
        current_player_index: 0,
        round_guesses: Vec::new(),
        ..state
    }
}

fn show_final(state: GameState) -> GameState {
    GameState {
        phase: GamePhase::Final,
        ..state
    }
}

fn play_again(state: GameState) -> GameState {
    if state.phase != GamePhase::Final {
        return ignored(state, "play-again", "journey not finished");
    }
    GameState {
        phase: GamePhase::Setup,
        players: state
            .players
            .into_iter()
            .map(Player::reset_progress)
            .collect(),
        ..GameState::default()
    }
}
