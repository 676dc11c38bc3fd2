//! World tour progression.
//!
//! Points climb through ten levels of 500 points each. Every level past the
//! first sends the player to a new country, which must be visited before the
//! level-up can be dismissed. Reaching the final level completes the tour and,
//! once acknowledged, wraps points and level back to the start while every
//! visited country and unlocked vehicle is kept.
use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::ProgressionCfg;
use crate::constants::{
    FIRST_LEVEL, LOG_LEVEL_UP, LOG_REWARD_REJECTED, LOG_TOUR_COMPLETE, LOG_VISIT_CONFIRMED,
};
use crate::numbers::{reward_to_u32, u32_to_f32};

/// Persistent player progress. Mutated only through [`Progression`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub(crate) total_points: u32,
    pub(crate) level: u8,
    pub(crate) games_played: u32,
    #[serde(default)]
    pub(crate) tours_completed: u32,
    #[serde(default)]
    pub(crate) visited_countries: BTreeSet<String>,
    #[serde(default)]
    pub(crate) unlocked_vehicles: BTreeSet<String>,
    #[serde(default)]
    pub(crate) pending_visits: VecDeque<String>,
    #[serde(default)]
    pub(crate) tour_pending: bool,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            total_points: 0,
            level: FIRST_LEVEL,
            games_played: 0,
            tours_completed: 0,
            visited_countries: BTreeSet::new(),
            unlocked_vehicles: BTreeSet::new(),
            pending_visits: VecDeque::new(),
            tour_pending: false,
        }
    }
}

impl PlayerProgress {
    #[must_use]
    pub const fn total_points(&self) -> u32 {
        self.total_points
    }

    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub const fn games_played(&self) -> u32 {
        self.games_played
    }

    #[must_use]
    pub const fn tours_completed(&self) -> u32 {
        self.tours_completed
    }

    #[must_use]
    pub const fn visited_countries(&self) -> &BTreeSet<String> {
        &self.visited_countries
    }

    #[must_use]
    pub const fn unlocked_vehicles(&self) -> &BTreeSet<String> {
        &self.unlocked_vehicles
    }

    /// Countries the player still has to visit, oldest first.
    #[must_use]
    pub const fn pending_visits(&self) -> &VecDeque<String> {
        &self.pending_visits
    }

    /// Whether the final level has been reached and awaits acknowledgement.
    #[must_use]
    pub const fn tour_pending(&self) -> bool {
        self.tour_pending
    }
}

/// What the player must do before a level-up can be dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "country", rename_all = "snake_case")]
pub enum Requirement {
    /// Visit the named country.
    VisitCountry(String),
    /// Acknowledge the end of the world tour via [`Progression::complete_tour`].
    CompleteTour,
    /// Nothing beyond dismissing the notice.
    Acknowledge,
}

/// A newly reached level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: u8,
    pub country: Option<String>,
    pub requirement: Requirement,
    pub unlocked_vehicles: Vec<String>,
}

impl LevelUp {
    #[must_use]
    pub const fn is_tour_completion(&self) -> bool {
        matches!(self.requirement, Requirement::CompleteTour)
    }
}

/// Transitions reported by the progression engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    LevelUp(LevelUp),
    TourCompleted { tours_completed: u32 },
}

/// Points granted by a rewarded ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEvent {
    pub amount: i64,
}

/// Result of a country visit confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitOutcome {
    /// A pending visit requirement was satisfied.
    Cleared,
    /// The country had been visited before and nothing was pending for it.
    AlreadyVisited,
    /// No visit is pending for this country; nothing changed.
    NotPending,
}

/// Owner of [`PlayerProgress`] and the only place it changes.
#[derive(Debug, Clone)]
pub struct Progression {
    progress: PlayerProgress,
    catalog: Catalog,
    cfg: ProgressionCfg,
}

impl Progression {
    /// Start a fresh tour.
    #[must_use]
    pub fn new(catalog: Catalog, cfg: ProgressionCfg) -> Self {
        Self::with_progress(catalog, cfg, PlayerProgress::default())
    }

    /// Resume from previously persisted progress.
    ///
    /// The level is recomputed from the point total so a hand-edited or stale
    /// save can never hold an inconsistent level.
    #[must_use]
    pub fn with_progress(catalog: Catalog, cfg: ProgressionCfg, progress: PlayerProgress) -> Self {
        let mut engine = Self {
            progress,
            catalog,
            cfg,
        };
        engine.progress.level = engine.level_for_points(engine.progress.total_points);
        engine.progress.tour_pending = engine.progress.level >= engine.cfg.max_level;
        let starters: Vec<String> = engine
            .catalog
            .vehicles
            .iter()
            .filter(|v| v.unlock_level <= engine.progress.level)
            .map(|v| v.id.clone())
            .collect();
        engine.progress.unlocked_vehicles.extend(starters);
        engine
    }

    #[must_use]
    pub const fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &ProgressionCfg {
        &self.cfg
    }

    /// Level implied by a point total, capped at the final level.
    #[must_use]
    pub fn level_for_points(&self, points: u32) -> u8 {
        let steps = points / self.cfg.points_per_level.max(1);
        let level = steps.saturating_add(u32::from(FIRST_LEVEL));
        u8::try_from(level)
            .unwrap_or(u8::MAX)
            .min(self.cfg.max_level)
    }

    /// Add points and report every level reached on the way.
    pub fn add_points(&mut self, points: u32) -> Vec<ProgressEvent> {
        if points == 0 {
            return Vec::new();
        }
        self.progress.total_points = self.progress.total_points.saturating_add(points);
        let target = self.level_for_points(self.progress.total_points);
        let mut events = Vec::new();
        while self.progress.level < target {
            self.progress.level += 1;
            events.push(ProgressEvent::LevelUp(self.reach_level(self.progress.level)));
        }
        events
    }

    /// Feed a rewarded-ad grant through the same path as word points.
    /// Negative amounts are ignored.
    pub fn apply_reward(&mut self, reward: RewardEvent) -> Vec<ProgressEvent> {
        let Some(points) = reward_to_u32(reward.amount) else {
            log::warn!("{LOG_REWARD_REJECTED}: amount {}", reward.amount);
            return Vec::new();
        };
        self.add_points(points)
    }

    fn reach_level(&mut self, level: u8) -> LevelUp {
        let unlocked_vehicles: Vec<String> = self
            .catalog
            .vehicles
            .iter()
            .filter(|v| v.unlock_level <= level)
            .filter(|v| !self.progress.unlocked_vehicles.contains(&v.id))
            .map(|v| v.id.clone())
            .collect();
        self.progress
            .unlocked_vehicles
            .extend(unlocked_vehicles.iter().cloned());

        let country = self.catalog.country_for_level(level).map(|c| c.id.clone());
        let requirement = if level >= self.cfg.max_level {
            self.progress.tour_pending = true;
            Requirement::CompleteTour
        } else if let Some(id) = &country {
            if !self.progress.pending_visits.contains(id) {
                self.progress.pending_visits.push_back(id.clone());
            }
            Requirement::VisitCountry(id.clone())
        } else {
            Requirement::Acknowledge
        };

        log::info!(
            "{LOG_LEVEL_UP}: level {level}, country {}, vehicles {:?}",
            country.as_deref().unwrap_or("-"),
            unlocked_vehicles
        );
        LevelUp {
            level,
            country,
            requirement,
            unlocked_vehicles,
        }
    }

    /// Record that the player viewed a country.
    pub fn confirm_country_visit(&mut self, country_id: &str) -> VisitOutcome {
        if let Some(index) = self
            .progress
            .pending_visits
            .iter()
            .position(|id| id == country_id)
        {
            self.progress.pending_visits.remove(index);
            self.progress
                .visited_countries
                .insert(country_id.to_string());
            log::debug!("{LOG_VISIT_CONFIRMED}: {country_id}");
            return VisitOutcome::Cleared;
        }
        if self.progress.visited_countries.contains(country_id) {
            VisitOutcome::AlreadyVisited
        } else {
            VisitOutcome::NotPending
        }
    }

    /// Acknowledge the end of the world tour. Returns `None` unless the final
    /// level has been reached.
    pub fn complete_tour(&mut self) -> Option<ProgressEvent> {
        if !self.progress.tour_pending {
            return None;
        }
        self.rewind();
        self.progress.tours_completed = self.progress.tours_completed.saturating_add(1);
        log::info!(
            "{LOG_TOUR_COMPLETE}: tours completed {}",
            self.progress.tours_completed
        );
        Some(ProgressEvent::TourCompleted {
            tours_completed: self.progress.tours_completed,
        })
    }

    /// Player-initiated restart. Visited countries and vehicles are kept.
    pub fn reset_game(&mut self) {
        self.rewind();
    }

    fn rewind(&mut self) {
        self.progress.total_points = 0;
        self.progress.level = FIRST_LEVEL;
        self.progress.pending_visits.clear();
        self.progress.tour_pending = false;
    }

    /// Count a freshly drawn plate as a game played.
    pub const fn record_plate_drawn(&mut self) {
        self.progress.games_played = self.progress.games_played.saturating_add(1);
    }

    #[must_use]
    pub fn has_pending_visit(&self) -> bool {
        !self.progress.pending_visits.is_empty()
    }

    #[must_use]
    pub fn is_country_unlocked(&self, country_id: &str) -> bool {
        self.progress.visited_countries.contains(country_id)
            || self
                .catalog
                .country(country_id)
                .is_some_and(|c| self.progress.level >= c.unlock_level)
    }

    #[must_use]
    pub fn is_vehicle_unlocked(&self, vehicle_id: &str) -> bool {
        self.progress.unlocked_vehicles.contains(vehicle_id)
            || self
                .catalog
                .vehicle(vehicle_id)
                .is_some_and(|v| self.progress.level >= v.unlock_level)
    }

    /// Points still needed for the next level; zero on the final level.
    #[must_use]
    pub fn points_to_next_level(&self) -> u32 {
        if self.progress.level >= self.cfg.max_level {
            return 0;
        }
        let next_threshold =
            u32::from(self.progress.level).saturating_mul(self.cfg.points_per_level);
        next_threshold.saturating_sub(self.progress.total_points)
    }

    /// Progress through the current level as a fraction in `[0, 1]`.
    #[must_use]
    pub fn level_fraction(&self) -> f32 {
        if self.progress.level >= self.cfg.max_level {
            return 1.0;
        }
        let per_level = self.cfg.points_per_level.max(1);
        let into_level = self.progress.total_points % per_level;
        u32_to_f32(into_level) / u32_to_f32(per_level)
    }
}
