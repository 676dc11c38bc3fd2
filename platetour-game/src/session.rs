//! A play session: plate, words, points and persistence in one place.
//!
//! Each submission runs validation, then scoring, then progression, and the
//! progress is written through to storage after every committed change.
//! Storage and feedback failures are logged and never undo or block a
//! progression update.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::GameConfig;
use crate::constants::{
    LOG_FEEDBACK_FAILED, LOG_PERSIST_FAILED, LOG_PLATE_DRAWN, LOG_WORD_ACCEPTED, LOG_WORD_REJECTED,
};
use crate::plate::{self, Plate};
use crate::profile::{Gender, PlayerProfile, ProfileError, parse_age, parse_name};
use crate::progression::{ProgressEvent, Progression, RewardEvent, VisitOutcome};
use crate::rng::RngStreams;
use crate::scoring::{WordScore, score_submission};
use crate::storage::{self, KeyValueStore};
use crate::validator::{ConsonantInput, ConsonantSet, Rejection, check};

/// Sounds and haptics the presentation layer may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    PlateDrawn,
    WordAccepted,
    WordRejected,
    LevelUp,
    TourComplete,
}

pub type FeedbackError = Box<dyn std::error::Error + Send + Sync>;

/// Non-core side effects. Failures are logged by the session and ignored.
pub trait FeedbackSink {
    /// Play a cue.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform fails to play the cue.
    fn play(&mut self, cue: Cue) -> Result<(), FeedbackError>;
}

/// Feedback sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl FeedbackSink for Silent {
    fn play(&mut self, _cue: Cue) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// What happened to a submitted word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// No plate has been drawn yet.
    NoPlate,
    Rejected { reason: Rejection },
    Accepted {
        score: WordScore,
        events: Vec<ProgressEvent>,
    },
}

/// In-memory counters for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub plates_drawn: u32,
    pub words_accepted: u32,
    pub words_rejected: u32,
    pub points_earned: u32,
    pub best_word: Option<WordScore>,
}

impl SessionStats {
    fn record_accept(&mut self, score: &WordScore) {
        self.words_accepted = self.words_accepted.saturating_add(1);
        self.points_earned = self.points_earned.saturating_add(score.total);
        if self.best_word.as_ref().is_none_or(|best| score.total > best.total) {
            self.best_word = Some(score.clone());
        }
    }
}

pub struct GameSession<S: KeyValueStore> {
    cfg: GameConfig,
    streams: RngStreams,
    store: S,
    progression: Progression,
    profile: PlayerProfile,
    plate: Option<Plate>,
    consonants: ConsonantSet,
    stats: SessionStats,
    feedback: Box<dyn FeedbackSink>,
}

impl<S: KeyValueStore> fmt::Debug for GameSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("seed", &self.streams.seed())
            .field("plate", &self.plate)
            .field("progress", self.progression.progress())
            .field("profile", &self.profile)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> GameSession<S> {
    /// Read persisted progress and profile once and start a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: S, catalog: Catalog, cfg: GameConfig, seed: u64) -> Result<Self, S::Error> {
        let progress = storage::load_progress(&store)?;
        let profile = storage::load_profile(&store)?;
        let progression = Progression::with_progress(catalog, cfg.progression.clone(), progress);
        Ok(Self {
            cfg,
            streams: RngStreams::from_user_seed(seed),
            store,
            progression,
            profile,
            plate: None,
            consonants: ConsonantSet::default(),
            stats: SessionStats::default(),
            feedback: Box::new(Silent),
        })
    }

    /// Replace the feedback sink.
    #[must_use]
    pub fn with_feedback(mut self, feedback: Box<dyn FeedbackSink>) -> Self {
        self.feedback = feedback;
        self
    }

    #[must_use]
    pub const fn plate(&self) -> Option<&Plate> {
        self.plate.as_ref()
    }

    #[must_use]
    pub const fn progression(&self) -> &Progression {
        &self.progression
    }

    #[must_use]
    pub const fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Draw a new plate, replacing the current one. Counts as a game played.
    pub fn new_plate(&mut self) -> &Plate {
        let plate = plate::generate(&mut *self.streams.plates(), &self.cfg.plate);
        log::debug!(
            "{LOG_PLATE_DRAWN}: {plate} special={}",
            plate.is_special()
        );
        self.consonants = ConsonantSet::resolve(&ConsonantInput::from(plate.consonants()));
        self.stats.plates_drawn = self.stats.plates_drawn.saturating_add(1);
        self.progression.record_plate_drawn();
        self.persist_progress();
        self.cue(Cue::PlateDrawn);
        self.plate.insert(plate)
    }

    /// Validate, score and bank a word against the current plate.
    pub fn submit(&mut self, word: &str) -> SubmitOutcome {
        let Some(plate) = self.plate.as_ref() else {
            return SubmitOutcome::NoPlate;
        };
        if let Err(reason) = check(word, &self.consonants) {
            log::debug!("{LOG_WORD_REJECTED}: {word:?} ({})", reason.key());
            self.stats.words_rejected = self.stats.words_rejected.saturating_add(1);
            self.cue(Cue::WordRejected);
            return SubmitOutcome::Rejected { reason };
        }

        let score = score_submission(word, plate, self.profile.age, &self.cfg.bonus);
        log::debug!(
            "{LOG_WORD_ACCEPTED}: {} for {} points",
            score.word,
            score.total
        );
        let events = self.progression.add_points(score.total);
        self.stats.record_accept(&score);
        self.persist_progress();
        self.cue(Cue::WordAccepted);
        self.cue_events(&events);
        SubmitOutcome::Accepted { score, events }
    }

    /// Bank points granted by a rewarded ad.
    pub fn apply_ad_reward(&mut self, reward: RewardEvent) -> Vec<ProgressEvent> {
        let events = self.progression.apply_reward(reward);
        if reward.amount > 0 {
            self.persist_progress();
        }
        self.cue_events(&events);
        events
    }

    pub fn confirm_country_visit(&mut self, country_id: &str) -> VisitOutcome {
        let outcome = self.progression.confirm_country_visit(country_id);
        if outcome == VisitOutcome::Cleared {
            self.persist_progress();
        }
        outcome
    }

    pub fn complete_tour(&mut self) -> Option<ProgressEvent> {
        let event = self.progression.complete_tour()?;
        self.persist_progress();
        self.cue(Cue::TourComplete);
        Some(event)
    }

    pub fn reset_game(&mut self) {
        self.progression.reset_game();
        self.persist_progress();
    }

    /// Set the player's age from typed input.
    ///
    /// # Errors
    ///
    /// Returns a user-facing error when the age is outside `[1, 120]`; the
    /// stored age is left unchanged.
    pub fn set_age(&mut self, input: &str) -> Result<u8, ProfileError> {
        let age = parse_age(input)?;
        self.profile.age = Some(age);
        self.persist_profile();
        Ok(age)
    }

    /// Set the player's name from typed input.
    ///
    /// # Errors
    ///
    /// Returns a user-facing error for a blank name.
    pub fn set_name(&mut self, input: &str) -> Result<(), ProfileError> {
        self.profile.name = parse_name(input)?;
        self.persist_profile();
        Ok(())
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.profile.gender = gender;
        self.persist_profile();
    }

    fn persist_progress(&self) {
        if let Err(err) = storage::save_progress(&self.store, self.progression.progress()) {
            log::error!("{LOG_PERSIST_FAILED}: progress: {err}");
        }
    }

    fn persist_profile(&self) {
        if let Err(err) = storage::save_profile(&self.store, &self.profile) {
            log::error!("{LOG_PERSIST_FAILED}: profile: {err}");
        }
    }

    fn cue(&mut self, cue: Cue) {
        if let Err(err) = self.feedback.play(cue) {
            log::warn!("{LOG_FEEDBACK_FAILED}: {cue:?}: {err}");
        }
    }

    fn cue_events(&mut self, events: &[ProgressEvent]) {
        if events
            .iter()
            .any(|e| matches!(e, ProgressEvent::LevelUp(_)))
        {
            self.cue(Cue::LevelUp);
        }
    }
}
