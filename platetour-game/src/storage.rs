//! Local key/value persistence.
//!
//! Every field is stored under its own string key as a scalar string, the
//! way device local storage holds it. Set-valued fields are JSON arrays.
//! Loading is lenient: a missing or unreadable value falls back to its
//! default instead of failing the whole load.
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::convert::Infallible;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::constants::FIRST_LEVEL;
use crate::profile::{Gender, PlayerProfile};
use crate::progression::PlayerProgress;

pub const KEY_PLAYER_NAME: &str = "playerName";
pub const KEY_PLAYER_AGE: &str = "playerAge";
pub const KEY_PLAYER_GENDER: &str = "playerGender";
pub const KEY_TOTAL_POINTS: &str = "totalPoints";
pub const KEY_LEVEL: &str = "level";
pub const KEY_GAMES_PLAYED: &str = "gamesPlayed";
pub const KEY_TOURS_COMPLETED: &str = "toursCompleted";
pub const KEY_VISITED_COUNTRIES: &str = "visitedCountries";
pub const KEY_UNLOCKED_VEHICLES: &str = "unlockedVehicles";
pub const KEY_PENDING_VISITS: &str = "pendingVisits";

/// Trait for abstracting string-keyed storage.
/// Platform-specific implementations should provide this
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// In-memory store, used by tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored pair.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.borrow().clone()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

fn read_scalar<S, T>(store: &S, key: &str, fallback: T) -> Result<T, S::Error>
where
    S: KeyValueStore + ?Sized,
    T: FromStr,
{
    Ok(store
        .get(key)?
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(fallback))
}

fn read_json<S, T>(store: &S, key: &str) -> Result<T, S::Error>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    Ok(store
        .get(key)?
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default())
}

fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), S::Error>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let encoded = serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string());
    store.set(key, &encoded)
}

/// Load progress written by [`save_progress`].
///
/// # Errors
///
/// Returns an error only if the store itself fails.
pub fn load_progress<S: KeyValueStore + ?Sized>(store: &S) -> Result<PlayerProgress, S::Error> {
    Ok(PlayerProgress {
        total_points: read_scalar(store, KEY_TOTAL_POINTS, 0)?,
        level: read_scalar(store, KEY_LEVEL, FIRST_LEVEL)?,
        games_played: read_scalar(store, KEY_GAMES_PLAYED, 0)?,
        tours_completed: read_scalar(store, KEY_TOURS_COMPLETED, 0)?,
        visited_countries: read_json::<_, BTreeSet<String>>(store, KEY_VISITED_COUNTRIES)?,
        unlocked_vehicles: read_json::<_, BTreeSet<String>>(store, KEY_UNLOCKED_VEHICLES)?,
        pending_visits: read_json::<_, VecDeque<String>>(store, KEY_PENDING_VISITS)?,
        tour_pending: false,
    })
}

/// Write every progress field.
///
/// # Errors
///
/// Returns the first store failure.
pub fn save_progress<S: KeyValueStore + ?Sized>(
    store: &S,
    progress: &PlayerProgress,
) -> Result<(), S::Error> {
    store.set(KEY_TOTAL_POINTS, &progress.total_points.to_string())?;
    store.set(KEY_LEVEL, &progress.level.to_string())?;
    store.set(KEY_GAMES_PLAYED, &progress.games_played.to_string())?;
    store.set(KEY_TOURS_COMPLETED, &progress.tours_completed.to_string())?;
    write_json(store, KEY_VISITED_COUNTRIES, &progress.visited_countries)?;
    write_json(store, KEY_UNLOCKED_VEHICLES, &progress.unlocked_vehicles)?;
    write_json(store, KEY_PENDING_VISITS, &progress.pending_visits)
}

/// Load the player profile.
///
/// # Errors
///
/// Returns an error only if the store itself fails.
pub fn load_profile<S: KeyValueStore + ?Sized>(store: &S) -> Result<PlayerProfile, S::Error> {
    let name = store.get(KEY_PLAYER_NAME)?.unwrap_or_default();
    let age = store
        .get(KEY_PLAYER_AGE)?
        .and_then(|raw| crate::profile::parse_age(&raw).ok());
    let gender = read_scalar(store, KEY_PLAYER_GENDER, Gender::Unspecified)?;
    Ok(PlayerProfile { name, age, gender })
}

/// Write the player profile. An unset age removes the stored value.
///
/// # Errors
///
/// Returns the first store failure.
pub fn save_profile<S: KeyValueStore + ?Sized>(
    store: &S,
    profile: &PlayerProfile,
) -> Result<(), S::Error> {
    store.set(KEY_PLAYER_NAME, &profile.name)?;
    match profile.age {
        Some(age) => store.set(KEY_PLAYER_AGE, &age.to_string())?,
        None => store.remove(KEY_PLAYER_AGE)?,
    }
    store.set(KEY_PLAYER_GENDER, profile.gender.as_str())
}
