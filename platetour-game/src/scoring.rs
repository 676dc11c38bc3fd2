//! Word scoring and plate bonus triggers.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::BonusCfg;
use crate::constants::{
    BASE_POINTS_CAP, HIGH_VALUE_BONUS, HIGH_VALUE_LETTERS, LONG_WORD_BONUS, LONG_WORD_CHARS,
    MEDIUM_VALUE_BONUS, MEDIUM_VALUE_LETTERS, MID_WORD_BONUS, MID_WORD_CHARS, POINTS_PER_CHAR,
};
use crate::numbers::count_to_u32;
use crate::plate::Plate;

/// Extra rewards granted by the plate rather than by the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    SpecialPlate,
    AgeMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    pub points: u32,
}

pub type BonusSet = SmallVec<[Bonus; 2]>;

/// Full breakdown of the points an accepted word earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub base: u32,
    pub letter_bonus: u32,
    pub length_bonus: u32,
    pub bonuses: BonusSet,
    pub total: u32,
}

impl WordScore {
    /// Points from the word alone, without plate bonuses.
    #[must_use]
    pub const fn word_points(&self) -> u32 {
        self.base
            .saturating_add(self.letter_bonus)
            .saturating_add(self.length_bonus)
    }
}

fn base_points(len: usize) -> u32 {
    count_to_u32(len)
        .saturating_mul(POINTS_PER_CHAR)
        .min(BASE_POINTS_CAP)
}

fn letter_points(c: char) -> u32 {
    if HIGH_VALUE_LETTERS.contains(&c) {
        HIGH_VALUE_BONUS
    } else if MEDIUM_VALUE_LETTERS.contains(&c) {
        MEDIUM_VALUE_BONUS
    } else {
        0
    }
}

const fn length_bonus(len: usize) -> u32 {
    if len >= LONG_WORD_CHARS {
        LONG_WORD_BONUS
    } else if len >= MID_WORD_CHARS {
        MID_WORD_BONUS
    } else {
        0
    }
}

/// Break a word's score into its parts. Plate bonuses are left empty.
#[must_use]
pub fn breakdown(word: &str) -> WordScore {
    let trimmed = word.trim();
    // Length is what the player typed; uppercasing can expand letters.
    let len = trimmed.chars().count();
    let upper = trimmed.to_uppercase();
    if len == 0 {
        return WordScore {
            word: upper,
            base: 0,
            letter_bonus: 0,
            length_bonus: 0,
            bonuses: BonusSet::new(),
            total: 0,
        };
    }
    let base = base_points(len);
    let letter_bonus = upper
        .chars()
        .map(letter_points)
        .fold(0u32, u32::saturating_add);
    let length_bonus = length_bonus(len);
    let total = base
        .saturating_add(letter_bonus)
        .saturating_add(length_bonus);
    WordScore {
        word: upper,
        base,
        letter_bonus,
        length_bonus,
        bonuses: BonusSet::new(),
        total,
    }
}

/// Point value of a word.
#[must_use]
pub fn score(word: &str) -> u32 {
    breakdown(word).total
}

/// Bonuses the current plate grants for an accepted word.
#[must_use]
pub fn detect_bonuses(plate: &Plate, player_age: Option<u8>, cfg: &BonusCfg) -> BonusSet {
    let mut bonuses = BonusSet::new();
    if plate.is_special() {
        bonuses.push(Bonus {
            kind: BonusKind::SpecialPlate,
            points: cfg.special_plate,
        });
    }
    if let Some(age) = player_age
        && plate.number_value() == u16::from(age)
    {
        bonuses.push(Bonus {
            kind: BonusKind::AgeMatch,
            points: cfg.age_match,
        });
    }
    bonuses
}

/// Score an accepted word and fold in the plate bonuses.
#[must_use]
pub fn score_submission(
    word: &str,
    plate: &Plate,
    player_age: Option<u8>,
    cfg: &BonusCfg,
) -> WordScore {
    let mut result = breakdown(word);
    result.bonuses = detect_bonuses(plate, player_age, cfg);
    result.total = result
        .bonuses
        .iter()
        .fold(result.word_points(), |acc, b| acc.saturating_add(b.points));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::PlateDraw;

    fn plate(number: u16, special: bool) -> Plate {
        Plate::from_draw(PlateDraw {
            number,
            special,
            consonants: ['G', 'T', 'S'],
        })
        .unwrap()
    }

    #[test]
    fn gato_scores_forty_five() {
        assert_eq!(score("GATO"), 45);
        assert_eq!(score("gato"), 45);
    }

    #[test]
    fn jazzy_counts_every_rare_letter() {
        let result = breakdown("JAZZY");
        assert_eq!(result.base, 50);
        assert_eq!(result.letter_bonus, 60);
        assert_eq!(result.length_bonus, 15);
        assert_eq!(result.total, 125);
    }

    #[test]
    fn empty_word_scores_zero() {
        assert_eq!(score(""), 0);
        assert_eq!(score("   "), 0);
    }

    #[test]
    fn base_caps_at_fifty_and_long_words_earn_thirty() {
        // M, R, P, S, A, E carry no letter bonus.
        let result = breakdown("MARIPOSA");
        assert_eq!(result.base, 50);
        assert_eq!(result.letter_bonus, 0);
        assert_eq!(result.length_bonus, 30);
        assert_eq!(result.total, 80);
    }

    #[test]
    fn length_counts_typed_letters_not_uppercased_ones() {
        // "ß" uppercases to "SS" but is still one typed letter.
        let result = breakdown("straße");
        assert_eq!(result.word, "STRASSE");
        assert_eq!(result.base, 50);
        assert_eq!(result.length_bonus, 15);
        assert_eq!(result.total, 65);
    }

    #[test]
    fn enye_is_a_medium_letter() {
        // N-I-Ñ-O: base 40, Ñ +5.
        assert_eq!(score("niño"), 45);
    }

    #[test]
    fn special_plate_adds_bonus() {
        let cfg = BonusCfg::default();
        let result = score_submission("GATO", &plate(0, true), None, &cfg);
        assert_eq!(result.bonuses.len(), 1);
        assert_eq!(result.bonuses[0].kind, BonusKind::SpecialPlate);
        assert_eq!(result.total, 45 + cfg.special_plate);
    }

    #[test]
    fn age_match_reads_plate_as_integer() {
        let cfg = BonusCfg::default();
        let result = score_submission("GATO", &plate(8, false), Some(8), &cfg);
        assert_eq!(result.bonuses.as_slice(), &[Bonus {
            kind: BonusKind::AgeMatch,
            points: cfg.age_match,
        }]);
        assert_eq!(result.total, 45 + cfg.age_match);

        let miss = score_submission("GATO", &plate(80, false), Some(8), &cfg);
        assert!(miss.bonuses.is_empty());
        assert_eq!(miss.total, 45);
    }

    #[test]
    fn no_age_means_no_age_bonus() {
        let cfg = BonusCfg::default();
        assert!(detect_bonuses(&plate(0, false), None, &cfg).is_empty());
    }
}
