use bendy_planner::geometry::{angle_diff, bearing_vector, wrap_pi};
use bendy_planner::{Obstacle, PlanInput, PlanResult, Planner, PlannerState, Pose, Status};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Within this distance of the destination the agent ramps its speed down.
pub const SLOWDOWN_RADIUS: f64 = 2.0;
/// Within this distance of the destination the agent has arrived.
pub const ARRIVAL_RADIUS: f64 = 0.5;

/// Movement limits of a yaw-rate-limited point vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub max_speed: f64,
    pub acceleration: f64,
    /// Radians per second.
    pub turn_rate: f64,
    pub radius: f64,
    /// Speed while the planner reports blocked.
    pub blocked_speed: f64,
}

impl Default for Kinematics {
    fn default() -> Self {
        Kinematics {
            max_speed: 5.0,
            acceleration: 8.0,
            turn_rate: 180.0f64.to_radians(),
            radius: 0.5,
            blocked_speed: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fate {
    Active,
    Arrived { tick: u32 },
    Collided { tick: u32 },
}

/// A vehicle steered by its own planner state.
#[derive(Clone, Debug)]
pub struct Agent {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub heading: f64,
    pub destination: Point2<f64>,
    pub kinematics: Kinematics,
    pub fate: Fate,
    state: PlannerState,
    last_result: Option<PlanResult>,
    status_counts: BTreeMap<&'static str, u32>,
}

impl Agent {
    pub fn new(position: Point2<f64>, heading: f64, destination: Point2<f64>) -> Agent {
        Agent {
            position,
            velocity: Vector2::zeros(),
            heading,
            destination,
            kinematics: Kinematics::default(),
            fate: Fate::Active,
            state: PlannerState::default(),
            last_result: None,
            status_counts: BTreeMap::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.fate == Fate::Active
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn planner_state(&self) -> &PlannerState {
        &self.state
    }

    pub fn last_result(&self) -> Option<&PlanResult> {
        self.last_result.as_ref()
    }

    /// Ticks spent in each planner status, keyed by status name.
    pub fn status_counts(&self) -> &BTreeMap<&'static str, u32> {
        &self.status_counts
    }

    /// Runs the planner without touching the agent.
    pub fn plan(&self, planner: &Planner, obstacles: &[Obstacle]) -> (PlanResult, PlannerState) {
        let input = PlanInput {
            pose: Pose {
                position: self.position,
                heading: self.heading,
            },
            speed: self.speed(),
            destination: self.destination,
            obstacles,
        };
        planner.plan(&self.state, &input)
    }

    /// Takes the planner's answer and moves for `dt` seconds.
    ///
    /// When blocked the agent creeps along the clear first leg closest to
    /// its course, or failing that the least blocked bearing, which backs it
    /// out of places where every probe starts inside the margin.
    pub fn apply(&mut self, result: PlanResult, state: PlannerState, dt: f64) {
        self.state = state;
        *self.status_counts.entry(result.status.name()).or_default() += 1;

        let (bearing, cruise) = match result.status {
            Status::Blocked => (
                result
                    .diagnostics
                    .course_bearing
                    .or(result.diagnostics.least_blocked_bearing),
                self.kinematics.blocked_speed,
            ),
            Status::Clear | Status::Avoiding => (result.bearing, self.kinematics.max_speed),
        };
        if let Some(bearing) = bearing {
            let max_turn = self.kinematics.turn_rate * dt;
            let turn = angle_diff(self.heading, bearing).clamp(-max_turn, max_turn);
            self.heading = wrap_pi(self.heading + turn);
        }

        let remaining = nalgebra::distance(&self.position, &self.destination);
        let speed = if remaining < SLOWDOWN_RADIUS {
            cruise * remaining / SLOWDOWN_RADIUS
        } else {
            cruise
        };
        let target_velocity = bearing_vector(self.heading) * speed;
        let dv = target_velocity - self.velocity;
        let max_dv = self.kinematics.acceleration * dt;
        if dv.magnitude() > max_dv {
            self.velocity += dv * (max_dv / dv.magnitude());
        } else {
            self.velocity = target_velocity;
        }
        self.position += self.velocity * dt;
        self.last_result = Some(result);
    }
}
