//! Centralized balance and tuning constants for PlateTour game logic.
//!
//! These values define the deterministic math for plates, words and the
//! world tour. Keeping them together ensures that gameplay can only be
//! adjusted via code changes reviewed in version control; the runtime
//! `GameConfig` only exposes the handful of knobs that product may tune.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_PLATE_DRAWN: &str = "log.plate.drawn";
pub(crate) const LOG_WORD_ACCEPTED: &str = "log.word.accepted";
pub(crate) const LOG_WORD_REJECTED: &str = "log.word.rejected";
pub(crate) const LOG_LEVEL_UP: &str = "log.progress.level-up";
pub(crate) const LOG_TOUR_COMPLETE: &str = "log.progress.tour-complete";
pub(crate) const LOG_REWARD_REJECTED: &str = "log.reward.rejected";
pub(crate) const LOG_VISIT_CONFIRMED: &str = "log.visit.confirmed";
pub(crate) const LOG_PERSIST_FAILED: &str = "log.storage.persist-failed";
pub(crate) const LOG_FEEDBACK_FAILED: &str = "log.feedback.failed";

// Plate generation ---------------------------------------------------------
/// Consonants printed on plates. Spanish orthography, vowels and Ñ excluded.
pub const PLATE_CONSONANTS: [char; 21] = [
    'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W', 'X',
    'Y', 'Z',
];
pub const PLATE_CONSONANT_COUNT: usize = 3;
pub const PLATE_NUMBER_MAX: u16 = 9_999;
pub const PLATE_NUMBER_WIDTH: usize = 4;
pub const SPECIAL_PLATE_NUMBERS: &str = "6666";
pub(crate) const SPECIAL_PLATE_CHANCE: f64 = 0.05;

// Word rules ---------------------------------------------------------------
pub const MIN_WORD_CHARS: usize = 3;

// Scoring ------------------------------------------------------------------
pub(crate) const POINTS_PER_CHAR: u32 = 10;
pub(crate) const BASE_POINTS_CAP: u32 = 50;
pub(crate) const HIGH_VALUE_LETTERS: [char; 8] = ['J', 'K', 'Q', 'V', 'W', 'X', 'Y', 'Z'];
pub(crate) const HIGH_VALUE_BONUS: u32 = 15;
pub(crate) const MEDIUM_VALUE_LETTERS: [char; 7] = ['B', 'C', 'D', 'F', 'G', 'H', 'Ñ'];
pub(crate) const MEDIUM_VALUE_BONUS: u32 = 5;
pub(crate) const LONG_WORD_CHARS: usize = 7;
pub(crate) const LONG_WORD_BONUS: u32 = 30;
pub(crate) const MID_WORD_CHARS: usize = 5;
pub(crate) const MID_WORD_BONUS: u32 = 15;
pub(crate) const SPECIAL_PLATE_BONUS: u32 = 100;
pub(crate) const AGE_MATCH_BONUS: u32 = 50;

// Progression --------------------------------------------------------------
pub const POINTS_PER_LEVEL: u32 = 500;
pub const MAX_LEVEL: u8 = 10;
pub const FIRST_LEVEL: u8 = 1;

// Player profile -----------------------------------------------------------
pub const AGE_MIN: u8 = 1;
pub const AGE_MAX: u8 = 120;

// Path driving -------------------------------------------------------------
pub(crate) const PATH_EPSILON: f32 = 0.5;
pub(crate) const DRIVE_DURATION_SECS: f32 = 4.0;
pub(crate) const DESTINATION_RADIUS: f32 = 40.0;
