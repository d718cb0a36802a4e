//! Stateless 2D helpers shared by the obstacle model and the bearing search.
//!
//! Bearings are radians measured counter-clockwise from the +X axis. Any
//! comparison between two bearings goes through [angle_diff] so that values
//! on either side of ±π compare correctly.

use nalgebra::{Point2, Rotation2, Vector2};
use std::f64::consts::{PI, TAU};

/// Returns the smallest rotation between angles `a` and `b`.
///
/// A positive result is a counter-clockwise rotation and negative is clockwise.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let c = (b - a).rem_euclid(TAU);
    if c > PI {
        c - TAU
    } else {
        c
    }
}

/// Wraps an angle into (-π, π].
pub fn wrap_pi(a: f64) -> f64 {
    angle_diff(0.0, a)
}

/// Bearing of the line from `from` to `to`.
///
/// Coincident points give 0.0; callers that care check the distance first.
pub fn bearing_to(from: &Point2<f64>, to: &Point2<f64>) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing along `bearing`.
pub fn bearing_vector(bearing: f64) -> Vector2<f64> {
    Vector2::new(bearing.cos(), bearing.sin())
}

/// Rotates `v` counter-clockwise by `delta` radians.
pub fn rotate(v: &Vector2<f64>, delta: f64) -> Vector2<f64> {
    Rotation2::new(delta).transform_vector(v)
}

/// The point `distance` away from `origin` along `bearing`.
pub fn offset(origin: &Point2<f64>, bearing: f64, distance: f64) -> Point2<f64> {
    origin + bearing_vector(bearing) * distance
}

pub fn closest_point_on_segment(
    p: &Point2<f64>,
    a: &Point2<f64>,
    b: &Point2<f64>,
) -> Point2<f64> {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= 0.0 {
        return *a;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

pub fn point_segment_distance(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    nalgebra::distance(p, &closest_point_on_segment(p, a, b))
}

fn orientation(o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (a - o).perp(&(b - o))
}

/// True when the segments cross at a single interior point.
///
/// Touching and collinear overlap are left to the endpoint distances in
/// [segment_segment_distance], which already report zero for them.
fn segments_cross(
    a1: &Point2<f64>,
    a2: &Point2<f64>,
    b1: &Point2<f64>,
    b2: &Point2<f64>,
) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Minimum distance between segments `a1-a2` and `b1-b2`.
pub fn segment_segment_distance(
    a1: &Point2<f64>,
    a2: &Point2<f64>,
    b1: &Point2<f64>,
    b2: &Point2<f64>,
) -> f64 {
    if segments_cross(a1, a2, b1, b2) {
        return 0.0;
    }
    point_segment_distance(a1, b1, b2)
        .min(point_segment_distance(a2, b1, b2))
        .min(point_segment_distance(b1, a1, a2))
        .min(point_segment_distance(b2, a1, a2))
}
