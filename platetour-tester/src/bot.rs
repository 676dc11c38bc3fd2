use std::fmt;

use clap::ValueEnum;
use platetour_game::{Plate, is_valid, score};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Words a young player might plausibly type.
pub const LEXICON: &[&str] = &[
    "CASA", "PERRO", "GATO", "LUNA", "SOL", "MAMA", "PAPA", "AGUA", "FLOR", "ARBOL", "BARCO",
    "COCHE", "DEDO", "FRESA", "GLOBO", "HELADO", "HUEVO", "JIRAFA", "JUGAR", "KIWI", "KOALA",
    "LEON", "MANZANA", "NUBE", "OVEJA", "PLAYA", "QUESO", "RATON", "SAPO", "TREN", "TORTUGA",
    "UVA", "VACA", "VOLCAN", "WAFFLE", "SANDWICH", "TAXI", "XILOFONO", "YOYO", "YATE", "ZAPATO",
    "ZORRO", "BALLENA", "MARIPOSA", "JAZZ", "PIZZA", "DINOSAURIO", "ELEFANTE", "CANGURO",
];

/// Built-in word pickers for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BotStrategy {
    /// First lexicon word that fits the plate.
    Eager,
    /// Highest scoring lexicon word that fits the plate.
    Greedy,
    /// Sometimes types a wrong word before a right one.
    Sloppy,
}

impl BotStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Eager => "Eager",
            Self::Greedy => "Greedy",
            Self::Sloppy => "Sloppy",
        }
    }

    #[must_use]
    pub fn create_bot(self, seed: u64) -> WordBot {
        WordBot {
            strategy: self,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl fmt::Display for BotStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Chooses the words submitted for each plate.
#[derive(Debug, Clone)]
pub struct WordBot {
    strategy: BotStrategy,
    rng: ChaCha20Rng,
}

const SLOPPY_MISS_CHANCE: f64 = 0.3;

impl WordBot {
    #[must_use]
    pub const fn strategy(&self) -> BotStrategy {
        self.strategy
    }

    /// Words to type for `plate`, in order. The last one always fits.
    pub fn attempts(&mut self, plate: &Plate) -> Vec<String> {
        let fitting = || {
            LEXICON
                .iter()
                .copied()
                .filter(|w| is_valid(w, plate.consonants()))
        };
        let good = match self.strategy {
            BotStrategy::Eager | BotStrategy::Sloppy => fitting().next(),
            BotStrategy::Greedy => fitting().max_by_key(|w| score(w)),
        }
        .map_or_else(|| fallback_word(plate), str::to_string);

        let mut attempts = Vec::with_capacity(2);
        if self.strategy == BotStrategy::Sloppy && self.rng.gen_bool(SLOPPY_MISS_CHANCE) {
            attempts.push(self.wrong_word(plate));
        }
        attempts.push(good);
        attempts
    }

    fn wrong_word(&mut self, plate: &Plate) -> String {
        let misses: Vec<&str> = LEXICON
            .iter()
            .copied()
            .filter(|w| !is_valid(w, plate.consonants()))
            .collect();
        if misses.is_empty() || self.rng.gen_bool(0.5) {
            return plate.consonants()[0].to_string();
        }
        misses[self.rng.gen_range(0..misses.len())].to_string()
    }
}

fn fallback_word(plate: &Plate) -> String {
    format!("A{}A", plate.consonants()[0])
}
