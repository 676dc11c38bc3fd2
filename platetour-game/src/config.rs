//! Tunable rule configuration.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    AGE_MATCH_BONUS, DESTINATION_RADIUS, DRIVE_DURATION_SECS, MAX_LEVEL, PATH_EPSILON,
    POINTS_PER_LEVEL, SPECIAL_PLATE_BONUS, SPECIAL_PLATE_CHANCE,
};

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
    #[error("invalid configuration json: {0}")]
    Parse(String),
}

/// Plate generation knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateCfg {
    #[serde(default = "PlateCfg::default_special_chance")]
    pub special_chance: f64,
}

impl PlateCfg {
    const fn default_special_chance() -> f64 {
        SPECIAL_PLATE_CHANCE
    }
}

impl Default for PlateCfg {
    fn default() -> Self {
        Self {
            special_chance: Self::default_special_chance(),
        }
    }
}

/// Fixed rewards layered on top of word scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusCfg {
    #[serde(default = "BonusCfg::default_special_plate")]
    pub special_plate: u32,
    #[serde(default = "BonusCfg::default_age_match")]
    pub age_match: u32,
}

impl BonusCfg {
    const fn default_special_plate() -> u32 {
        SPECIAL_PLATE_BONUS
    }

    const fn default_age_match() -> u32 {
        AGE_MATCH_BONUS
    }
}

impl Default for BonusCfg {
    fn default() -> Self {
        Self {
            special_plate: Self::default_special_plate(),
            age_match: Self::default_age_match(),
        }
    }
}

/// World tour pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionCfg {
    #[serde(default = "ProgressionCfg::default_points_per_level")]
    pub points_per_level: u32,
    #[serde(default = "ProgressionCfg::default_max_level")]
    pub max_level: u8,
}

impl ProgressionCfg {
    const fn default_points_per_level() -> u32 {
        POINTS_PER_LEVEL
    }

    const fn default_max_level() -> u8 {
        MAX_LEVEL
    }
}

impl Default for ProgressionCfg {
    fn default() -> Self {
        Self {
            points_per_level: Self::default_points_per_level(),
            max_level: Self::default_max_level(),
        }
    }
}

/// Drawing mini-game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCfg {
    #[serde(default = "PathCfg::default_epsilon")]
    pub epsilon: f32,
    #[serde(default = "PathCfg::default_duration_secs")]
    pub duration_secs: f32,
    #[serde(default = "PathCfg::default_destination_radius")]
    pub destination_radius: f32,
}

impl PathCfg {
    const fn default_epsilon() -> f32 {
        PATH_EPSILON
    }

    const fn default_duration_secs() -> f32 {
        DRIVE_DURATION_SECS
    }

    const fn default_destination_radius() -> f32 {
        DESTINATION_RADIUS
    }
}

impl Default for PathCfg {
    fn default() -> Self {
        Self {
            epsilon: Self::default_epsilon(),
            duration_secs: Self::default_duration_secs(),
            destination_radius: Self::default_destination_radius(),
        }
    }
}

/// Complete rule set for a game session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub plate: PlateCfg,
    #[serde(default)]
    pub bonus: BonusCfg,
    #[serde(default)]
    pub progression: ProgressionCfg,
    #[serde(default)]
    pub path: PathCfg,
}

impl GameConfig {
    /// Parse and validate a configuration document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every tunable against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chance = self.plate.special_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::RangeViolation {
                field: "plate.special_chance",
                min: 0.0,
                max: 1.0,
                value: chance,
            });
        }
        if self.progression.points_per_level == 0 {
            return Err(ConfigError::ZeroValue {
                field: "progression.points_per_level",
            });
        }
        if self.progression.max_level < 2 {
            return Err(ConfigError::RangeViolation {
                field: "progression.max_level",
                min: 2.0,
                max: f64::from(u8::MAX),
                value: f64::from(self.progression.max_level),
            });
        }
        if self.path.epsilon.is_nan() || self.path.epsilon < 0.0 {
            return Err(ConfigError::RangeViolation {
                field: "path.epsilon",
                min: 0.0,
                max: f64::from(f32::MAX),
                value: f64::from(self.path.epsilon),
            });
        }
        if self.path.duration_secs.is_nan() || self.path.duration_secs <= 0.0 {
            return Err(ConfigError::ZeroValue {
                field: "path.duration_secs",
            });
        }
        if self.path.destination_radius.is_nan() || self.path.destination_radius <= 0.0 {
            return Err(ConfigError::ZeroValue {
                field: "path.destination_radius",
            });
        }
        Ok(())
    }
}
