//! Timed vehicle motion along a drawn route.
//!
//! The animation never schedules itself. The host calls [`PathAnimation::tick`]
//! once per frame with the elapsed time, which makes it equally usable from a
//! browser frame callback, a game loop or a test.
use serde::{Deserialize, Serialize};

use crate::config::PathCfg;
use crate::numbers::{clamp_unit, fraction_to_pct};
use crate::path::{Destination, DrawnPath, NormalizedPath, Point, Pose};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    Running,
    Finished,
    Cancelled,
}

/// One rendered frame of the drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub pose: Pose,
    /// Progress for an indicator, `0..=100`.
    pub progress_pct: u8,
    pub state: AnimationState,
}

/// Single-pass drive along a [`NormalizedPath`].
#[derive(Debug, Clone)]
pub struct PathAnimation {
    path: NormalizedPath,
    duration: f32,
    elapsed: f32,
    state: AnimationState,
    pose: Pose,
}

impl PathAnimation {
    /// Start driving. Returns `None` when the path has no length, in which
    /// case nothing should be animated. Non-positive durations finish on the
    /// first tick.
    #[must_use]
    pub fn start(path: NormalizedPath, duration_secs: f32) -> Option<Self> {
        if !path.is_drivable() {
            return None;
        }
        let pose = path.position_at(0.0)?;
        Some(Self {
            path,
            duration: if duration_secs.is_finite() {
                duration_secs.max(0.0)
            } else {
                0.0
            },
            elapsed: 0.0,
            state: AnimationState::Running,
            pose,
        })
    }

    /// Fraction of the route covered, in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.elapsed > 0.0 || self.state == AnimationState::Finished {
                1.0
            } else {
                0.0
            };
        }
        clamp_unit(self.elapsed / self.duration)
    }

    /// Whole percentage for a progress bar. Only a finished run reads 100.
    #[must_use]
    pub fn progress_pct(&self) -> u8 {
        if self.state == AnimationState::Finished {
            100
        } else {
            fraction_to_pct(self.fraction()).min(99)
        }
    }

    #[must_use]
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    #[must_use]
    pub const fn pose(&self) -> Pose {
        self.pose
    }

    #[must_use]
    pub const fn path(&self) -> &NormalizedPath {
        &self.path
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Advance by `dt_secs`. Negative or non-finite steps count as zero, so
    /// the fraction never moves backwards. Ticks after the run has ended
    /// return the last frame unchanged.
    pub fn tick(&mut self, dt_secs: f32) -> Frame {
        if self.is_running() {
            let dt = if dt_secs.is_finite() { dt_secs.max(0.0) } else { 0.0 };
            self.elapsed += dt;
            if self.elapsed >= self.duration {
                self.elapsed = self.duration.max(self.elapsed);
                self.state = AnimationState::Finished;
            }
            let fraction = if self.state == AnimationState::Finished {
                1.0
            } else {
                self.fraction()
            };
            if let Some(pose) = self.path.position_at(fraction) {
                self.pose = pose;
            }
        }
        self.frame()
    }

    /// Stop at the current position. Has no effect once finished.
    pub fn cancel(&mut self) {
        if self.is_running() {
            self.state = AnimationState::Cancelled;
        }
    }

    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            pose: self.pose,
            progress_pct: self.progress_pct(),
            state: self.state,
        }
    }
}

/// Outcome of finishing a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveStart {
    /// The vehicle is on its way.
    Started { reaches_destination: bool },
    /// The stroke had no length; nothing to animate.
    NoOp,
}

/// The drawing mini-game: one stroke buffer, at most one running drive.
#[derive(Debug, Clone)]
pub struct DriveRun {
    cfg: PathCfg,
    destination: Option<Destination>,
    stroke: DrawnPath,
    animation: Option<PathAnimation>,
}

impl DriveRun {
    #[must_use]
    pub fn new(cfg: PathCfg) -> Self {
        Self {
            cfg,
            destination: None,
            stroke: DrawnPath::new(),
            animation: None,
        }
    }

    /// Set the goal the route should end at, using the configured radius.
    pub fn set_destination(&mut self, center: Point) {
        self.destination = Some(Destination {
            center,
            radius: self.cfg.destination_radius,
        });
    }

    #[must_use]
    pub const fn destination(&self) -> Option<Destination> {
        self.destination
    }

    /// A new gesture cancels any drive in progress.
    pub fn begin_stroke(&mut self, at: Point) {
        if let Some(animation) = self.animation.as_mut() {
            animation.cancel();
        }
        self.stroke.begin(at);
    }

    pub fn extend_stroke(&mut self, at: Point) {
        self.stroke.push(at);
    }

    /// Close the gesture and start driving it.
    pub fn finish_stroke(&mut self) -> DriveStart {
        let path = self.stroke.finish(self.cfg.epsilon);
        let reaches_destination = self
            .destination
            .is_some_and(|d| d.is_reached_by(&path));
        match PathAnimation::start(path, self.cfg.duration_secs) {
            Some(animation) => {
                self.animation = Some(animation);
                DriveStart::Started {
                    reaches_destination,
                }
            }
            None => DriveStart::NoOp,
        }
    }

    /// Advance the running drive, if any.
    pub fn tick(&mut self, dt_secs: f32) -> Option<Frame> {
        self.animation.as_mut().map(|a| a.tick(dt_secs))
    }

    /// Gesture reset or teardown.
    pub fn cancel(&mut self) {
        if let Some(animation) = self.animation.as_mut() {
            animation.cancel();
        }
    }

    #[must_use]
    pub const fn animation(&self) -> Option<&PathAnimation> {
        self.animation.as_ref()
    }
}
