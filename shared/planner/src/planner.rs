use crate::config::PlannerConfig;
use crate::geometry::bearing_to;
use crate::lookahead::ProbeDepths;
use crate::obstacle::Obstacle;
use crate::resist::resist_bearing_change;
use crate::search::{BearingCandidate, SearchContext, Side};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Closer than this to the destination counts as arrived.
pub const ARRIVAL_EPSILON: f64 = 1e-6;
/// Below this speed the heading says little about where the vehicle is
/// going, and the direct bearing stands in for its course.
pub const LOW_SPEED: f64 = 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The direct path is clear and no avoidance is in progress.
    #[default]
    Clear,
    Avoiding,
    /// No candidate bearing clears. Re-evaluated every tick.
    Blocked,
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Status::Clear => "clear",
            Status::Avoiding => "avoiding",
            Status::Blocked => "blocked",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point2<f64>,
    pub heading: f64,
}

/// Per-agent memory threaded from one planning call to the next.
///
/// The caller owns this and hands the returned copy back on the next tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerState {
    /// Bearing returned by the last avoiding call. Present while avoidance
    /// is in progress.
    pub last_bearing: Option<f64>,
    /// The last call kept the previous bearing over the search winner.
    pub resisting: bool,
    /// Consecutive calls that found the direct path clear.
    pub clear_ticks: u32,
    pub status: Status,
}

impl PlannerState {
    pub fn is_avoiding(&self) -> bool {
        self.last_bearing.is_some()
    }
}

/// Everything the planner looks at for one agent on one tick.
#[derive(Clone, Copy, Debug)]
pub struct PlanInput<'a> {
    pub pose: Pose,
    pub speed: f64,
    pub destination: Point2<f64>,
    pub obstacles: &'a [Obstacle],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanDiagnostics {
    pub desired_bearing: f64,
    pub lookahead: f64,
    pub first_leg: f64,
    pub second_leg: f64,
    pub candidates_tested: usize,
    /// First-leg clearance of the returned bearing, or of the roomiest
    /// candidate when blocked.
    pub clearance: f64,
    /// Set when blocked: the candidate with the most first-leg clearance.
    /// Advisory only; callers may steer it as a fallback.
    pub least_blocked_bearing: Option<f64>,
    /// Set when blocked and some first leg cleared: of those, the bearing
    /// closest to the current course. Preferred over
    /// `least_blocked_bearing` as a fallback.
    pub course_bearing: Option<f64>,
    /// How far the fallback may be followed: the first leg, cut short by
    /// however deep it runs into an obstacle. Zero unless blocked.
    pub fallback_distance: f64,
    pub resisted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanResult {
    pub status: Status,
    /// None only when blocked.
    pub bearing: Option<f64>,
    pub diagnostics: PlanDiagnostics,
}

/// BendyRuler bearing planner.
///
/// Holds only validated configuration, so one planner can be shared by
/// every agent and called from several threads at once.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Planner {
        Planner { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn context<'a>(&'a self, input: &PlanInput<'a>) -> SearchContext<'a> {
        let position = input.pose.position;
        let distance = nalgebra::distance(&position, &input.destination);
        let desired_bearing = bearing_to(&position, &input.destination);
        let course = if input.speed.abs() < LOW_SPEED || !input.speed.is_finite() {
            desired_bearing
        } else {
            input.pose.heading
        };
        SearchContext {
            config: &self.config,
            position,
            destination: input.destination,
            desired_bearing,
            course,
            depths: ProbeDepths::new(&self.config, input.speed, distance),
            obstacles: input.obstacles,
        }
    }

    /// Probes a single bearing the same way the search does.
    pub fn evaluate(&self, input: &PlanInput, bearing: f64) -> BearingCandidate {
        self.context(input).evaluate(bearing)
    }

    /// Evaluates the whole fan in search order.
    pub fn survey(&self, state: &PlannerState, input: &PlanInput) -> Vec<BearingCandidate> {
        let ctx = self.context(input);
        ctx.survey(preferred_side(&ctx, state))
    }

    /// Picks the bearing to steer this tick and returns the state to pass
    /// in next tick.
    pub fn plan(&self, state: &PlannerState, input: &PlanInput) -> (PlanResult, PlannerState) {
        let distance = nalgebra::distance(&input.pose.position, &input.destination);
        if distance <= ARRIVAL_EPSILON {
            let result = PlanResult {
                status: Status::Clear,
                bearing: Some(input.pose.heading),
                diagnostics: PlanDiagnostics {
                    desired_bearing: input.pose.heading,
                    lookahead: 0.0,
                    first_leg: 0.0,
                    second_leg: 0.0,
                    candidates_tested: 0,
                    clearance: f64::INFINITY,
                    least_blocked_bearing: None,
                    course_bearing: None,
                    fallback_distance: 0.0,
                    resisted: false,
                },
            };
            return (result, PlannerState::default());
        }

        let ctx = self.context(input);
        let outcome = ctx.search(preferred_side(&ctx, state));
        let mut diagnostics = PlanDiagnostics {
            desired_bearing: ctx.desired_bearing,
            lookahead: ctx.depths.lookahead,
            first_leg: ctx.depths.first_leg,
            second_leg: ctx.depths.second_leg,
            candidates_tested: outcome.candidates_tested,
            clearance: f64::INFINITY,
            least_blocked_bearing: None,
            course_bearing: None,
            fallback_distance: 0.0,
            resisted: false,
        };

        let winner = match outcome.winner {
            Some(winner) => winner,
            None => {
                diagnostics.least_blocked_bearing = outcome.roomiest.map(|c| c.bearing);
                diagnostics.course_bearing = outcome.nearest_course.map(|c| c.bearing);
                diagnostics.clearance = outcome
                    .roomiest
                    .map_or(f64::NEG_INFINITY, |c| c.first_leg.margin);
                diagnostics.fallback_distance = outcome
                    .nearest_course
                    .or(outcome.roomiest)
                    .map_or(0.0, |c| {
                        (ctx.depths.first_leg + c.first_leg.margin.min(0.0)).max(0.0)
                    });
                let next = PlannerState {
                    last_bearing: state.last_bearing,
                    resisting: false,
                    clear_ticks: 0,
                    status: Status::Blocked,
                };
                log_transition(state, &next);
                let result = PlanResult {
                    status: Status::Blocked,
                    bearing: None,
                    diagnostics,
                };
                return (result, next);
            }
        };

        let clear_ticks = if outcome.direct {
            state.clear_ticks.saturating_add(1)
        } else {
            0
        };
        let debounced = clear_ticks >= self.config.clear_debounce_ticks().max(1);
        if outcome.direct && (!state.is_avoiding() || debounced) {
            diagnostics.clearance = winner.first_leg.margin;
            let next = PlannerState::default();
            log_transition(state, &next);
            let result = PlanResult {
                status: Status::Clear,
                bearing: Some(ctx.desired_bearing),
                diagnostics,
            };
            return (result, next);
        }

        let decision = resist_bearing_change(&ctx, state.last_bearing, winner);
        diagnostics.clearance = decision.candidate.first_leg.margin;
        diagnostics.resisted = decision.resisted;
        let next = PlannerState {
            last_bearing: Some(decision.candidate.bearing),
            resisting: decision.resisted,
            clear_ticks,
            status: Status::Avoiding,
        };
        log_transition(state, &next);
        let result = PlanResult {
            status: Status::Avoiding,
            bearing: Some(decision.candidate.bearing),
            diagnostics,
        };
        (result, next)
    }
}

/// Side to try first at each fan step: wherever the last bearing was.
fn preferred_side(ctx: &SearchContext, state: &PlannerState) -> Side {
    state
        .last_bearing
        .and_then(|b| Side::of(ctx.desired_bearing, b))
        .unwrap_or(Side::Clockwise)
}

fn log_transition(prev: &PlannerState, next: &PlannerState) {
    if prev.status != next.status {
        log::debug!(
            "planner {} -> {} (last bearing {:?})",
            prev.status.name(),
            next.status.name(),
            next.last_bearing.map(f64::to_degrees)
        );
    }
}
