//! Two-leg path probing over a fan of candidate bearings.
//!
//! Candidates are tried closest-to-direct first and the first one whose
//! legs both clear wins. This finds the smallest clear deviation on the
//! fan, not the globally best route.

use crate::config::PlannerConfig;
use crate::geometry::{angle_diff, bearing_to, offset, wrap_pi};
use crate::lookahead::ProbeDepths;
use crate::obstacle::{probe, Clearance, Obstacle};
use nalgebra::Point2;
use std::f64::consts::{FRAC_PI_4, PI};

/// Onward-leg directions relative to the bearing toward the destination.
const SECOND_LEG_OFFSETS: [f64; 3] = [0.0, FRAC_PI_4, -FRAC_PI_4];

/// Which side of the direct bearing a candidate lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Clockwise,
    CounterClockwise,
}

impl Side {
    /// Side of `bearing` relative to `desired`, or None when they coincide.
    pub fn of(desired: f64, bearing: f64) -> Option<Side> {
        let d = angle_diff(desired, bearing);
        if d > 0.0 {
            Some(Side::CounterClockwise)
        } else if d < 0.0 {
            Some(Side::Clockwise)
        } else {
            None
        }
    }

    fn sign(self) -> i64 {
        match self {
            Side::Clockwise => -1,
            Side::CounterClockwise => 1,
        }
    }
}

/// A trial heading and how its probe legs fared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BearingCandidate {
    pub bearing: f64,
    /// Signed shortest arc from the desired bearing.
    pub offset: f64,
    pub first_leg: Clearance,
    /// Best onward leg. None when the first leg was blocked, in which case
    /// the onward leg is not probed.
    pub second_leg: Option<Clearance>,
}

impl BearingCandidate {
    pub fn is_valid(&self) -> bool {
        self.first_leg.clear && self.second_leg.map_or(false, |c| c.clear)
    }

    pub fn deviation(&self) -> f64 {
        self.offset.abs()
    }
}

/// Candidate bearings in fan-out order as `(step, bearing)` pairs.
///
/// Step 0 is the direct bearing. Each later step yields the `preferred`
/// side first, then the other. A step landing exactly opposite the direct
/// bearing is yielded once.
pub fn fan(
    desired: f64,
    increment: f64,
    steps: u32,
    preferred: Side,
) -> impl Iterator<Item = (i64, f64)> {
    let sign = preferred.sign();
    std::iter::once(0)
        .chain((1..=i64::from(steps)).flat_map(move |k| {
            let opposite = (k as f64 * increment - PI).abs() < 1e-9;
            std::iter::once(sign * k).chain((!opposite).then_some(-sign * k))
        }))
        .map(move |step| (step, wrap_pi(desired + step as f64 * increment)))
}

/// Result of one sweep over the fan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    pub winner: Option<BearingCandidate>,
    /// The winner is the direct bearing.
    pub direct: bool,
    pub candidates_tested: usize,
    /// The candidate with the widest first leg seen, valid or not.
    pub roomiest: Option<BearingCandidate>,
    /// Of the candidates whose first leg cleared, the one closest to the
    /// current course. Covers the whole fan only when nothing was valid.
    pub nearest_course: Option<BearingCandidate>,
}

/// Inputs shared by every candidate in one planning call.
pub struct SearchContext<'a> {
    pub config: &'a PlannerConfig,
    pub position: Point2<f64>,
    pub destination: Point2<f64>,
    pub desired_bearing: f64,
    /// Direction the vehicle is travelling.
    pub course: f64,
    pub depths: ProbeDepths,
    pub obstacles: &'a [Obstacle],
}

impl<'a> SearchContext<'a> {
    /// Probes both legs for `bearing`.
    pub fn evaluate(&self, bearing: f64) -> BearingCandidate {
        let margin = self.config.margin();
        let offset_from_desired = angle_diff(self.desired_bearing, bearing);
        let first_leg = probe(
            self.obstacles,
            &self.position,
            bearing,
            self.depths.first_leg,
            margin,
        );
        if !first_leg.clear {
            return BearingCandidate {
                bearing,
                offset: offset_from_desired,
                first_leg,
                second_leg: None,
            };
        }

        let end = offset(&self.position, bearing, self.depths.first_leg);
        let toward_destination = bearing_to(&end, &self.destination);
        let length = self
            .depths
            .second_leg_from(nalgebra::distance(&end, &self.destination));

        let mut second_leg: Option<Clearance> = None;
        for leg_offset in SECOND_LEG_OFFSETS {
            let c = probe(
                self.obstacles,
                &end,
                wrap_pi(toward_destination + leg_offset),
                length,
                margin,
            );
            if c.clear {
                second_leg = Some(c);
                break;
            }
            if second_leg.map_or(true, |best| c.margin > best.margin) {
                second_leg = Some(c);
            }
        }

        BearingCandidate {
            bearing,
            offset: offset_from_desired,
            first_leg,
            second_leg,
        }
    }

    fn fan(&self, preferred: Side) -> impl Iterator<Item = (i64, f64)> {
        fan(
            self.desired_bearing,
            self.config.angle_increment(),
            self.config.fan_steps(),
            preferred,
        )
    }

    /// Walks the fan and stops at the first valid candidate.
    pub fn search(&self, preferred: Side) -> SearchOutcome {
        let mut outcome = SearchOutcome {
            winner: None,
            direct: false,
            candidates_tested: 0,
            roomiest: None,
            nearest_course: None,
        };
        for (step, bearing) in self.fan(preferred) {
            let candidate = self.evaluate(bearing);
            outcome.candidates_tested += 1;
            log::trace!(
                "step {} bearing {:.1} first leg {:.2} second leg {:?}",
                step,
                bearing.to_degrees(),
                candidate.first_leg.margin,
                candidate.second_leg.map(|c| c.margin),
            );
            if outcome
                .roomiest
                .map_or(true, |r| candidate.first_leg.margin > r.first_leg.margin)
            {
                outcome.roomiest = Some(candidate);
            }
            if candidate.first_leg.clear
                && outcome.nearest_course.map_or(true, |n| {
                    angle_diff(self.course, bearing).abs()
                        < angle_diff(self.course, n.bearing).abs()
                })
            {
                outcome.nearest_course = Some(candidate);
            }
            if candidate.is_valid() {
                outcome.winner = Some(candidate);
                outcome.direct = step == 0;
                break;
            }
        }
        outcome
    }

    /// Evaluates every candidate on the fan without stopping early.
    pub fn survey(&self, preferred: Side) -> Vec<BearingCandidate> {
        self.fan(preferred)
            .map(|(_, bearing)| self.evaluate(bearing))
            .collect()
    }
}
