//! Drawn routes for the driving mini-game.
//!
//! A finger stroke becomes a [`DrawnPath`]; [`NormalizedPath`] drops the
//! jitter and keeps a cumulative arc-length table so the vehicle can be placed
//! at any fraction of the route.
use serde::{Deserialize, Serialize};

use crate::numbers::clamp_unit;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        // Endpoints are returned exactly.
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        Self {
            x: (other.x - self.x).mul_add(t, self.x),
            y: (other.y - self.y).mul_add(t, self.y),
        }
    }
}

/// Where the vehicle is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub point: Point,
    /// Direction of travel, `atan2(dy, dx)` in degrees.
    pub heading_degrees: f32,
}

/// Points captured while the player is drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawnPath {
    points: Vec<Point>,
}

impl DrawnPath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke, discarding anything drawn before.
    pub fn begin(&mut self, at: Point) {
        self.points.clear();
        self.points.push(at);
    }

    pub fn push(&mut self, at: Point) {
        self.points.push(at);
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// End the stroke and normalize it.
    #[must_use]
    pub fn finish(&mut self, epsilon: f32) -> NormalizedPath {
        let points = std::mem::take(&mut self.points);
        NormalizedPath::from_points(&points, epsilon)
    }
}

/// A drawn stroke with degenerate points removed, ready for animation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPath {
    points: Vec<Point>,
    /// `cumulative[i]` is the arc length from the start to `points[i]`.
    cumulative: Vec<f32>,
    /// `headings[i]` is the heading of the segment `points[i]..points[i + 1]`.
    headings: Vec<f32>,
}

impl NormalizedPath {
    /// Drop points closer than `epsilon` to the last kept point and build the
    /// arc-length table.
    #[must_use]
    pub fn from_points(drawn: &[Point], epsilon: f32) -> Self {
        let epsilon = if epsilon.is_finite() { epsilon.max(0.0) } else { 0.0 };
        let mut points: Vec<Point> = Vec::with_capacity(drawn.len());
        for &p in drawn {
            if !(p.x.is_finite() && p.y.is_finite()) {
                continue;
            }
            match points.last() {
                Some(&last) if last.distance(p) <= epsilon => {}
                _ => points.push(p),
            }
        }

        let mut cumulative = Vec::with_capacity(points.len());
        let mut headings = Vec::with_capacity(points.len().saturating_sub(1));
        let mut total = 0.0_f32;
        let mut heading = 0.0_f32;
        if !points.is_empty() {
            cumulative.push(0.0);
        }
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let length = a.distance(b);
            if length > 0.0 {
                heading = (b.y - a.y).atan2(b.x - a.x).to_degrees();
            }
            total += length;
            cumulative.push(total);
            headings.push(heading);
        }

        Self {
            points,
            cumulative,
            headings,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Whether the path is long enough to drive along.
    #[must_use]
    pub fn is_drivable(&self) -> bool {
        self.total_length() > 0.0
    }

    #[must_use]
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[must_use]
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Pose at `fraction` of the total length; the fraction is clamped to
    /// `[0, 1]`. Returns `None` for an empty path.
    #[must_use]
    pub fn position_at(&self, fraction: f32) -> Option<Pose> {
        let first = self.start()?;
        let total = self.total_length();
        if self.headings.is_empty() || total <= 0.0 {
            return Some(Pose {
                point: first,
                heading_degrees: 0.0,
            });
        }

        let target = clamp_unit(fraction) * total;
        // First point whose cumulative length reaches the target ends the segment.
        let end = self
            .cumulative
            .partition_point(|&len| len < target)
            .clamp(1, self.points.len() - 1);
        let start = end - 1;
        let seg_start = self.cumulative[start];
        let seg_len = self.cumulative[end] - seg_start;
        let t = if seg_len > 0.0 {
            clamp_unit((target - seg_start) / seg_len)
        } else {
            0.0
        };
        Some(Pose {
            point: self.points[start].lerp(self.points[end], t),
            heading_degrees: self.headings[start],
        })
    }
}

/// Target area the route has to end in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub center: Point,
    pub radius: f32,
}

impl Destination {
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// Whether the route finishes inside the destination.
    #[must_use]
    pub fn is_reached_by(&self, path: &NormalizedPath) -> bool {
        path.is_drivable() && path.end().is_some_and(|p| self.contains(p))
    }
}
