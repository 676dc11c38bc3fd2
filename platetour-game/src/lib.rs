//! PlateTour Game Engine
//!
//! Platform-agnostic core game logic for the PlateTour word and driving game.
//! This crate provides plates, word rules, scoring, the world-tour progression
//! and the drawing mini-game without UI or platform-specific dependencies.

pub mod animation;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod numbers;
pub mod path;
pub mod plate;
pub mod profile;
pub mod progression;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod validator;

// Re-export commonly used types
pub use animation::{AnimationState, DriveRun, DriveStart, Frame, PathAnimation};
pub use catalog::{Catalog, CatalogError, Country, Vehicle};
pub use config::{BonusCfg, ConfigError, GameConfig, PathCfg, PlateCfg, ProgressionCfg};
pub use path::{Destination, DrawnPath, NormalizedPath, Point, Pose};
pub use plate::{Plate, PlateDraw, PlateError, generate};
pub use profile::{Gender, PlayerProfile, ProfileError, parse_age};
pub use progression::{
    LevelUp, PlayerProgress, ProgressEvent, Progression, Requirement, RewardEvent, VisitOutcome,
};
pub use rng::{CountingRng, RngStreams};
pub use scoring::{Bonus, BonusKind, WordScore, detect_bonuses, score, score_submission};
pub use session::{Cue, FeedbackSink, GameSession, SessionStats, Silent, SubmitOutcome};
pub use storage::{KeyValueStore, MemoryStore};
pub use validator::{ConsonantInput, ConsonantSet, Rejection, is_valid};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the country and vehicle catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load the rule configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config(&self) -> Result<GameConfig, Self::Error>;
}

/// Loader serving the data compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledData;

impl DataLoader for BundledData {
    type Error = CatalogError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Catalog::bundled()
    }

    fn load_config(&self) -> Result<GameConfig, Self::Error> {
        Ok(GameConfig::default())
    }
}

/// Main game engine for starting sessions
pub struct GameEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
}

impl<L> GameEngine<L>
where
    L: DataLoader,
{
    /// Create a new game engine with the provided data loader
    pub const fn new(data_loader: L) -> Self {
        Self { data_loader }
    }

    /// Load catalog and configuration, check them against each other and
    /// resume the player's saved progress from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if data cannot be loaded, fails validation, or the
    /// store cannot be read.
    pub fn start_session<S>(&self, store: S, seed: u64) -> anyhow::Result<GameSession<S>>
    where
        S: KeyValueStore,
    {
        let cfg = self.data_loader.load_config()?;
        cfg.validate()?;
        let catalog = self.data_loader.load_catalog()?;
        catalog.validate(cfg.progression.max_level)?;
        Ok(GameSession::load(store, catalog, cfg, seed)?)
    }
}
