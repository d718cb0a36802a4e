//! Reactive obstacle avoidance for 2D agents, after the BendyRuler strategy
//! used by autopilots.
//!
//! Every tick the caller hands [Planner::plan] the agent's pose and speed,
//! its destination, the obstacles that matter right now, and the
//! [PlannerState] returned last tick. The planner fans candidate bearings
//! out from the direct line to the destination, probes each with two legs,
//! and returns the closest clear bearing (or [Status::Blocked]).

pub mod config;
pub mod geometry;
pub mod lookahead;
pub mod obstacle;
pub mod planner;
pub mod resist;
pub mod search;

pub use config::{ConfigError, PlannerConfig, PlannerSettings};
pub use obstacle::{Clearance, Obstacle};
pub use planner::{PlanDiagnostics, PlanInput, PlanResult, Planner, PlannerState, Pose, Status};
pub use search::BearingCandidate;
