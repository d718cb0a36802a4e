use crate::geometry::{self, offset, point_segment_distance, segment_segment_distance};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Something to steer around, inflated by its own radius.
///
/// Obstacles are rebuilt by the caller every tick; the planner only borrows
/// them for a single call. Radii are expected to be non-negative. Rejecting
/// bad input is the job of whatever authored the obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Obstacle {
    Circle {
        center: Point2<f64>,
        radius: f64,
    },
    Segment {
        p1: Point2<f64>,
        p2: Point2<f64>,
        radius: f64,
    },
}

/// Outcome of probing one leg against obstacles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clearance {
    pub clear: bool,
    /// Distance from the probe to the nearest obstacle surface. Negative
    /// when the probe passes through an obstacle; infinite when nothing
    /// was tested.
    pub margin: f64,
}

impl Clearance {
    pub const UNOBSTRUCTED: Clearance = Clearance {
        clear: true,
        margin: f64::INFINITY,
    };
}

impl Obstacle {
    pub fn circle(center: Point2<f64>, radius: f64) -> Obstacle {
        Obstacle::Circle { center, radius }
    }

    pub fn segment(p1: Point2<f64>, p2: Point2<f64>, radius: f64) -> Obstacle {
        Obstacle::Segment { p1, p2, radius }
    }

    /// A segment of `length` centered on `center` and laid along `heading`.
    pub fn wall(center: Point2<f64>, heading: f64, length: f64, radius: f64) -> Obstacle {
        let half = geometry::rotate(&Vector2::new(length / 2.0, 0.0), heading);
        Obstacle::Segment {
            p1: center - half,
            p2: center + half,
            radius,
        }
    }

    pub fn translate(&mut self, delta: &Vector2<f64>) {
        match self {
            Obstacle::Circle { center, .. } => *center += *delta,
            Obstacle::Segment { p1, p2, .. } => {
                *p1 += *delta;
                *p2 += *delta;
            }
        }
    }

    /// Distance from the segment `start-end` to this obstacle's surface.
    pub fn segment_clearance(&self, start: &Point2<f64>, end: &Point2<f64>) -> f64 {
        match self {
            Obstacle::Circle { center, radius } => {
                point_segment_distance(center, start, end) - radius
            }
            Obstacle::Segment { p1, p2, radius } => {
                segment_segment_distance(start, end, p1, p2) - radius
            }
        }
    }

    /// Distance from `p` to this obstacle's surface.
    pub fn point_clearance(&self, p: &Point2<f64>) -> f64 {
        self.segment_clearance(p, p)
    }

    /// Tests the ray from `origin` along `bearing`, cut off at `distance`,
    /// against this obstacle inflated by `margin`.
    pub fn intersects(
        &self,
        origin: &Point2<f64>,
        bearing: f64,
        distance: f64,
        margin: f64,
    ) -> Clearance {
        let end = offset(origin, bearing, distance);
        let surface = self.segment_clearance(origin, &end);
        Clearance {
            clear: surface >= margin,
            margin: surface,
        }
    }
}

/// Probes one leg against every obstacle and keeps the tightest result.
pub fn probe(
    obstacles: &[Obstacle],
    origin: &Point2<f64>,
    bearing: f64,
    distance: f64,
    margin: f64,
) -> Clearance {
    obstacles
        .iter()
        .map(|obstacle| obstacle.intersects(origin, bearing, distance, margin))
        .fold(Clearance::UNOBSTRUCTED, |acc, c| Clearance {
            clear: acc.clear && c.clear,
            margin: acc.margin.min(c.margin),
        })
}
