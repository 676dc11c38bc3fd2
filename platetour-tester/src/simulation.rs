use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use platetour_game::{
    AnimationState, BundledData, Cue, DriveRun, DriveStart, FeedbackSink, GameEngine,
    GameSession, KeyValueStore, MemoryStore, PathCfg, Point, ProgressEvent, Requirement,
    SubmitOutcome, session::FeedbackError,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::bot::{BotStrategy, WordBot};
use crate::store::FileStore;
use crate::util::temp_path;

pub const DEFAULT_MAX_PLATES: u32 = 400;
const FRAME_SECS: f32 = 1.0 / 60.0;
const MAX_DRIVE_FRAMES: u32 = 10_000;

/// What a bot run should do and what it must satisfy afterwards.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub strategy: BotStrategy,
    pub max_plates: u32,
    pub age: Option<String>,
    /// Stop as soon as level ten is reached and finish the tour.
    pub complete_tour: bool,
    /// Drive to every country before confirming the visit.
    pub drive_routes: bool,
    /// Back the run with a JSON file and reload it at the end.
    pub persist_to_file: bool,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub const fn new(strategy: BotStrategy) -> Self {
        Self {
            strategy,
            max_plates: DEFAULT_MAX_PLATES,
            age: None,
            complete_tour: false,
            drive_routes: false,
            persist_to_file: false,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_max_plates(mut self, max_plates: u32) -> Self {
        self.max_plates = max_plates;
        self
    }

    #[must_use]
    pub fn with_age(mut self, age: &str) -> Self {
        self.age = Some(age.to_string());
        self
    }

    #[must_use]
    pub const fn completing_tour(mut self) -> Self {
        self.complete_tour = true;
        self
    }

    #[must_use]
    pub const fn driving_routes(mut self) -> Self {
        self.drive_routes = true;
        self
    }

    #[must_use]
    pub const fn persisted(mut self) -> Self {
        self.persist_to_file = true;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SimulationExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

type SimulationExpectationFn =
    Arc<dyn Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct SimulationExpectation(SimulationExpectationFn);

impl fmt::Debug for SimulationExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationExpectation").finish()
    }
}

impl SimulationExpectation {
    pub fn check(&self, summary: &SimulationSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SimulationExpectation
where
    F: Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Complete record of one bot run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub strategy: Option<BotStrategy>,
    pub plates: Vec<String>,
    pub words_accepted: u32,
    pub words_rejected: u32,
    pub special_plates: u32,
    pub final_points: u32,
    pub final_level: u8,
    pub levels_reached: Vec<u8>,
    pub tour_completed: bool,
    pub tours_completed: u32,
    pub visited_countries: Vec<String>,
    pub unlocked_vehicles: Vec<String>,
    pub drives_started: u32,
    pub drives_arrived: u32,
    pub level_up_cues: u32,
    pub points_monotonic: bool,
    pub best_word: Option<String>,
    pub reload_matches: Option<bool>,
}

/// Counts cues so runs can check that side effects fired.
#[derive(Debug, Default, Clone)]
struct CueLog(Rc<RefCell<Vec<Cue>>>);

impl FeedbackSink for CueLog {
    fn play(&mut self, cue: Cue) -> Result<(), FeedbackError> {
        self.0.borrow_mut().push(cue);
        Ok(())
    }
}

/// Headless deterministic runner for the core game logic.
#[derive(Debug, Clone, Copy)]
pub struct GameTester {
    verbose: bool,
}

impl GameTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Play `plan` with `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot start or the backing file fails.
    pub fn run_plan(&self, plan: &SimulationPlan, seed: u64) -> Result<SimulationSummary> {
        if plan.persist_to_file {
            return self.run_in_file(&temp_path("run", seed), plan, seed);
        }
        let engine = GameEngine::new(BundledData);
        let session = engine.start_session(MemoryStore::new(), seed)?;
        self.play(plan, seed, session)
    }

    /// Play against a store file at `path`, then reload it and compare.
    /// The file is removed whether or not the run succeeds.
    fn run_in_file(
        &self,
        path: &Path,
        plan: &SimulationPlan,
        seed: u64,
    ) -> Result<SimulationSummary> {
        let outcome = self.play_and_reload(path, plan, seed);
        if let Err(err) = std::fs::remove_file(path)
            && err.kind() != std::io::ErrorKind::NotFound
        {
            log::warn!("could not remove {}: {err}", path.display());
        }
        outcome
    }

    fn play_and_reload(
        &self,
        path: &Path,
        plan: &SimulationPlan,
        seed: u64,
    ) -> Result<SimulationSummary> {
        let engine = GameEngine::new(BundledData);
        let session = engine.start_session(FileStore::open(path)?, seed)?;
        let mut summary = self.play(plan, seed, session)?;

        let reloaded = engine
            .start_session(FileStore::open(path)?, seed)
            .context("reloading persisted progress")?;
        let progress = reloaded.progression().progress();
        summary.reload_matches = Some(
            progress.total_points() == summary.final_points
                && progress.level() == summary.final_level
                && progress
                    .visited_countries()
                    .iter()
                    .eq(summary.visited_countries.iter()),
        );
        Ok(summary)
    }

    fn play<S: KeyValueStore>(
        &self,
        plan: &SimulationPlan,
        seed: u64,
        session: GameSession<S>,
    ) -> Result<SimulationSummary> {
        let cues = CueLog::default();
        let mut session = session.with_feedback(Box::new(cues.clone()));
        if let Some(age) = &plan.age {
            session.set_age(age)?;
        }

        let mut bot: WordBot = plan.strategy.create_bot(seed);
        log::debug!("{} bot playing seed {seed}", bot.strategy());
        let mut driver = ChaCha20Rng::seed_from_u64(seed ^ 0xD21E);
        let mut summary = SimulationSummary {
            seed,
            strategy: Some(plan.strategy),
            points_monotonic: true,
            ..SimulationSummary::default()
        };
        let mut last_points = session.progression().progress().total_points();

        for _ in 0..plan.max_plates {
            let plate = session.new_plate().clone();
            summary.plates.push(plate.to_string());
            if plate.is_special() {
                summary.special_plates += 1;
            }

            for word in bot.attempts(&plate) {
                let SubmitOutcome::Accepted { events, .. } = session.submit(&word) else {
                    continue;
                };
                for event in events {
                    let ProgressEvent::LevelUp(up) = event else {
                        continue;
                    };
                    summary.levels_reached.push(up.level);
                    if self.verbose {
                        println!("  ⬆️  seed {seed} reached level {}", up.level);
                    }
                    match up.requirement {
                        Requirement::VisitCountry(id) => {
                            if plan.drive_routes {
                                self.drive_once(&mut driver, &mut summary);
                            }
                            session.confirm_country_visit(&id);
                        }
                        Requirement::CompleteTour if plan.complete_tour => {
                            if session.complete_tour().is_some() {
                                summary.tour_completed = true;
                            }
                        }
                        Requirement::CompleteTour | Requirement::Acknowledge => {}
                    }
                }
            }

            let points = session.progression().progress().total_points();
            if points < last_points && !summary.tour_completed {
                summary.points_monotonic = false;
            }
            last_points = points;
            if summary.tour_completed {
                break;
            }
        }

        let stats = session.stats();
        summary.words_accepted = stats.words_accepted;
        summary.words_rejected = stats.words_rejected;
        summary.best_word = stats.best_word.as_ref().map(|w| w.word.clone());
        let progress = session.progression().progress();
        summary.final_points = progress.total_points();
        summary.final_level = progress.level();
        summary.tours_completed = progress.tours_completed();
        summary.visited_countries = progress.visited_countries().iter().cloned().collect();
        summary.unlocked_vehicles = progress.unlocked_vehicles().iter().cloned().collect();
        summary.level_up_cues = u32::try_from(
            cues.0
                .borrow()
                .iter()
                .filter(|c| **c == Cue::LevelUp)
                .count(),
        )
        .unwrap_or(u32::MAX);

        log::debug!(
            "seed {seed}: {} plates, level {}, {} points",
            summary.plates.len(),
            summary.final_level,
            summary.final_points
        );
        Ok(summary)
    }

    /// Draw a slightly shaky line to a random destination and drive it.
    fn drive_once(&self, rng: &mut ChaCha20Rng, summary: &mut SimulationSummary) {
        let mut run = DriveRun::new(PathCfg::default());
        let target = Point::new(rng.gen_range(200.0..800.0), rng.gen_range(100.0..500.0));
        run.set_destination(target);

        let origin = Point::new(0.0, 0.0);
        run.begin_stroke(origin);
        let steps = 40;
        for i in 1..=steps {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / steps as f32;
            let mut p = origin.lerp(target, t);
            if i < steps {
                p.x += rng.gen_range(-3.0..3.0);
                p.y += rng.gen_range(-3.0..3.0);
            }
            run.extend_stroke(p);
        }

        let DriveStart::Started {
            reaches_destination,
        } = run.finish_stroke()
        else {
            return;
        };
        summary.drives_started += 1;

        let mut frames = 0;
        while let Some(frame) = run.tick(FRAME_SECS) {
            frames += 1;
            if frame.state != AnimationState::Running || frames >= MAX_DRIVE_FRAMES {
                let parked = run
                    .destination()
                    .is_some_and(|d| d.contains(frame.pose.point));
                if reaches_destination && parked && frame.state == AnimationState::Finished {
                    summary.drives_arrived += 1;
                }
                break;
            }
        }
        if self.verbose {
            println!("  🚗 drive finished after {frames} frames");
        }
    }
}
