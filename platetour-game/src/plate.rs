//! License plate generation.
//!
//! A plate is four digits plus three consonants, e.g. `0427-BZT`. The rare
//! `6666` plate is "special" and pays a bonus on every accepted word.
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PlateCfg;
use crate::constants::{
    PLATE_CONSONANT_COUNT, PLATE_CONSONANTS, PLATE_NUMBER_MAX, PLATE_NUMBER_WIDTH,
    SPECIAL_PLATE_NUMBERS,
};

/// The raw random draws a plate is built from.
///
/// Keeping the draws separate from formatting lets callers force either
/// branch of the special-plate roll without touching a random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlateDraw {
    pub number: u16,
    pub special: bool,
    pub consonants: [char; PLATE_CONSONANT_COUNT],
}

/// Errors raised when a plate is built from outside data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlateError {
    #[error("`{0}` is not a plate consonant")]
    UnknownConsonant(char),
    #[error("plate number `{0}` is not four digits")]
    MalformedNumber(String),
    #[error("plate {numbers} is marked special={claimed}")]
    SpecialMismatch { numbers: String, claimed: bool },
}

/// A generated license plate. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PlateRecord")]
pub struct Plate {
    numbers: String,
    consonants: [char; PLATE_CONSONANT_COUNT],
    is_special: bool,
}

/// Wire shape of a plate, checked before it becomes a [`Plate`].
#[derive(Deserialize)]
struct PlateRecord {
    numbers: String,
    consonants: [char; PLATE_CONSONANT_COUNT],
    #[serde(default)]
    is_special: Option<bool>,
}

impl TryFrom<PlateRecord> for Plate {
    type Error = PlateError;

    fn try_from(record: PlateRecord) -> Result<Self, Self::Error> {
        let numbers = record.numbers;
        if numbers.len() != PLATE_NUMBER_WIDTH || !numbers.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlateError::MalformedNumber(numbers));
        }
        let consonants = checked_consonants(record.consonants)?;
        let is_special = numbers == SPECIAL_PLATE_NUMBERS;
        if let Some(claimed) = record.is_special
            && claimed != is_special
        {
            return Err(PlateError::SpecialMismatch { numbers, claimed });
        }
        Ok(Self {
            numbers,
            consonants,
            is_special,
        })
    }
}

fn checked_consonants(
    raw: [char; PLATE_CONSONANT_COUNT],
) -> Result<[char; PLATE_CONSONANT_COUNT], PlateError> {
    let consonants = raw.map(|c| c.to_ascii_uppercase());
    match consonants.iter().find(|c| !PLATE_CONSONANTS.contains(c)) {
        Some(&bad) => Err(PlateError::UnknownConsonant(bad)),
        None => Ok(consonants),
    }
}

impl Plate {
    /// Build a plate from explicit draws.
    ///
    /// A special draw overrides the number with `6666`. The consonants are
    /// kept either way so the special plate stays playable. Out-of-range
    /// numbers wrap into `0..=9999`.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::UnknownConsonant`] for letters outside the
    /// plate alphabet.
    pub fn from_draw(draw: PlateDraw) -> Result<Self, PlateError> {
        let consonants = checked_consonants(draw.consonants)?;
        Ok(Self::assemble(draw.number, draw.special, consonants))
    }

    fn assemble(number: u16, special: bool, consonants: [char; PLATE_CONSONANT_COUNT]) -> Self {
        let numbers = if special {
            SPECIAL_PLATE_NUMBERS.to_string()
        } else {
            let number = number % (PLATE_NUMBER_MAX + 1);
            format!("{number:0width$}", width = PLATE_NUMBER_WIDTH)
        };
        let is_special = numbers == SPECIAL_PLATE_NUMBERS;
        Self {
            numbers,
            consonants,
            is_special,
        }
    }

    /// The four-digit numeric part, zero padded.
    #[must_use]
    pub fn numbers(&self) -> &str {
        &self.numbers
    }

    /// The numeric part read as an integer (`"0042"` is 42).
    #[must_use]
    pub fn number_value(&self) -> u16 {
        self.numbers.parse().unwrap_or(0)
    }

    #[must_use]
    pub const fn consonants(&self) -> &[char; PLATE_CONSONANT_COUNT] {
        &self.consonants
    }

    #[must_use]
    pub const fn is_special(&self) -> bool {
        self.is_special
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-", self.numbers)?;
        for c in self.consonants {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Roll the draws for a new plate.
pub fn roll_draw<R: Rng + ?Sized>(rng: &mut R, cfg: &PlateCfg) -> PlateDraw {
    let number = rng.gen_range(0..=PLATE_NUMBER_MAX);
    let chance = if cfg.special_chance.is_nan() {
        0.0
    } else {
        cfg.special_chance.clamp(0.0, 1.0)
    };
    let special = rng.gen_bool(chance);
    let consonants = [(); PLATE_CONSONANT_COUNT]
        .map(|()| PLATE_CONSONANTS[rng.gen_range(0..PLATE_CONSONANTS.len())]);
    PlateDraw {
        number,
        special,
        consonants,
    }
}

/// Generate a fresh plate from the provided random source.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, cfg: &PlateCfg) -> Plate {
    let draw = roll_draw(rng, cfg);
    Plate::assemble(draw.number, draw.special, draw.consonants)
}
