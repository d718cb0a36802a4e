use crate::config::PlannerConfig;

/// First-leg length may run this far past the destination.
pub const LOOKAHEAD_PAST_DESTINATION: f64 = 2.0;
/// Second-leg length as a fraction of the lookahead distance.
pub const SECOND_LEG_RATIO: f64 = 0.5;
/// Shortest second leg ever probed.
pub const SECOND_LEG_MIN: f64 = 2.0;

/// How far ahead to probe at `speed`.
pub fn lookahead_distance(config: &PlannerConfig, speed: f64) -> f64 {
    let speed = if speed.is_finite() { speed.abs() } else { 0.0 };
    (speed * config.lookahead_time_constant())
        .clamp(config.min_lookahead(), config.max_lookahead())
}

/// Probe leg lengths for one planning call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeDepths {
    pub lookahead: f64,
    /// Length of the leg from the vehicle along the candidate bearing.
    pub first_leg: f64,
    /// Nominal length of the onward leg, before capping at the remaining
    /// distance to the destination.
    pub second_leg: f64,
}

impl ProbeDepths {
    pub fn new(config: &PlannerConfig, speed: f64, distance_to_destination: f64) -> ProbeDepths {
        let lookahead = lookahead_distance(config, speed);
        ProbeDepths {
            lookahead,
            first_leg: lookahead.min(distance_to_destination + LOOKAHEAD_PAST_DESTINATION),
            second_leg: lookahead * SECOND_LEG_RATIO,
        }
    }

    /// Second-leg length from a point `remaining` away from the destination.
    pub fn second_leg_from(&self, remaining: f64) -> f64 {
        self.second_leg.min(remaining).max(SECOND_LEG_MIN)
    }
}
