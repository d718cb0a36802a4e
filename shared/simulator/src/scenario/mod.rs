mod boxed;
mod crossing;
mod field;
mod single_obstacle;
mod wall;

use crate::agent::Fate;
use crate::simulation::Simulation;
use serde::{Deserialize, Serialize};

pub mod prelude {
    pub use super::Scenario;
    pub use super::Status;
    pub use super::{check_agents, DEFAULT_MAX_TICKS};
    pub use crate::agent::Agent;
    pub use crate::body::ObstacleBody;
    pub use crate::rng::{new_rng, SeededRng};
    pub use crate::simulation::Simulation;
    pub use bendy_planner::Obstacle;
    pub use nalgebra::{point, vector, Point2, Vector2};
    pub use rand::Rng;
    pub use std::f64::consts::{FRAC_PI_2, PI, TAU};
}

/// One minute of simulated time.
pub const DEFAULT_MAX_TICKS: u32 = 60 * 60;

#[derive(PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Copy, Clone)]
pub enum Status {
    Running,
    Arrived,
    Collided,
    TimedOut,
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Status::Running => "running",
            Status::Arrived => "arrived",
            Status::Collided => "collided",
            Status::TimedOut => "timed out",
        }
    }
}

pub trait Scenario {
    fn name(&self) -> String;

    fn init(&mut self, sim: &mut Simulation, seed: u32);

    fn tick(&mut self, _: &mut Simulation) {}

    fn status(&self, sim: &Simulation) -> Status {
        check_agents(sim)
    }

    fn max_ticks(&self) -> u32 {
        DEFAULT_MAX_TICKS
    }
}

pub fn load_safe(name: &str) -> Option<Box<dyn Scenario>> {
    let scenario: Option<Box<dyn Scenario>> = match name {
        "single_obstacle" => Some(Box::new(single_obstacle::SingleObstacle {})),
        "wall" => Some(Box::new(wall::Wall {})),
        "boxed" => Some(Box::new(boxed::Boxed::new())),
        "field" => Some(Box::new(field::Field {})),
        "crossing" => Some(Box::new(crossing::Crossing {})),
        _ => None,
    };
    if let Some(scenario) = scenario.as_ref() {
        assert_eq!(scenario.name(), name);
    }
    scenario
}

pub fn load(name: &str) -> Box<dyn Scenario> {
    match load_safe(name) {
        Some(scenario) => scenario,
        None => panic!("Unknown scenario {name:?}"),
    }
}

pub fn list() -> Vec<String> {
    vec!["single_obstacle", "wall", "boxed", "field", "crossing"]
        .iter()
        .map(|x| x.to_string())
        .collect()
}

/// Collided if any agent hit something, arrived once every agent is home,
/// timed out at the tick limit.
pub fn check_agents(sim: &Simulation) -> Status {
    if sim
        .agents
        .iter()
        .any(|agent| matches!(agent.fate, Fate::Collided { .. }))
    {
        Status::Collided
    } else if !sim.agents.is_empty()
        && sim
            .agents
            .iter()
            .all(|agent| matches!(agent.fate, Fate::Arrived { .. }))
    {
        Status::Arrived
    } else if sim.tick() >= sim.max_ticks() {
        Status::TimedOut
    } else {
        Status::Running
    }
}
