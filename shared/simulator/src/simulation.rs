use crate::agent::{Agent, Fate};
use crate::body::ObstacleBody;
use crate::collision::{self, Contact};
use crate::rng::{new_rng, SeededRng};
use crate::scenario::{self, Scenario};
use bendy_planner::{Obstacle, PlanResult, Planner, PlannerConfig, PlannerState};
use rayon::prelude::*;

pub const TICK_LENGTH: f64 = 1.0 / 60.0;

pub struct Simulation {
    scenario: Option<Box<dyn Scenario>>,
    planner: Planner,
    pub agents: Vec<Agent>,
    pub bodies: Vec<ObstacleBody>,
    tick: u32,
    max_ticks: u32,
    seed: u32,
    rng: SeededRng,
}

impl Simulation {
    pub fn new(scenario_name: &str, seed: u32) -> Box<Simulation> {
        Simulation::with_config(scenario_name, seed, PlannerConfig::default())
    }

    pub fn with_config(scenario_name: &str, seed: u32, config: PlannerConfig) -> Box<Simulation> {
        log::info!("scenario {scenario_name} seed {seed}");
        let mut scenario = scenario::load(scenario_name);
        let mut sim = Box::new(Simulation {
            scenario: None,
            planner: Planner::new(config),
            agents: Vec::new(),
            bodies: Vec::new(),
            tick: 0,
            max_ticks: scenario.max_ticks(),
            seed,
            rng: new_rng(scenario_name, seed),
        });
        scenario.init(&mut sim, seed);
        sim.scenario = Some(scenario);
        sim
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn time(&self) -> f64 {
        self.tick as f64 * TICK_LENGTH
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    pub fn set_max_ticks(&mut self, max_ticks: u32) {
        self.max_ticks = max_ticks;
    }

    pub fn rng(&mut self) -> &mut SeededRng {
        &mut self.rng
    }

    pub fn status(&self) -> scenario::Status {
        match self.scenario.as_ref() {
            Some(scenario) => scenario.status(self),
            None => scenario::Status::Running,
        }
    }

    pub fn add_agent(&mut self, agent: Agent) -> usize {
        self.agents.push(agent);
        self.agents.len() - 1
    }

    pub fn add_body(&mut self, body: ObstacleBody) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn remove_body(&mut self, index: usize) -> Option<ObstacleBody> {
        (index < self.bodies.len()).then(|| self.bodies.remove(index))
    }

    /// Obstacles as the planner sees them this tick.
    pub fn obstacles(&self) -> Vec<Obstacle> {
        self.bodies.iter().map(|body| body.obstacle).collect()
    }

    pub fn step(&mut self) {
        let obstacles = self.obstacles();

        // Agents plan independently against the same snapshot.
        let planner = &self.planner;
        let plans: Vec<Option<(PlanResult, PlannerState)>> = self
            .agents
            .par_iter()
            .map(|agent| {
                agent
                    .is_active()
                    .then(|| agent.plan(planner, &obstacles))
            })
            .collect();
        for (agent, plan) in self.agents.iter_mut().zip(plans) {
            if let Some((result, state)) = plan {
                agent.apply(result, state, TICK_LENGTH);
            }
        }

        for body in self.bodies.iter_mut() {
            body.tick(TICK_LENGTH);
        }

        let mut scenario = std::mem::take(&mut self.scenario);
        if let Some(scenario) = scenario.as_mut() {
            scenario.tick(self);
        }
        self.scenario = scenario;

        let tick = self.tick;
        for (index, agent) in self.agents.iter_mut().enumerate() {
            if !agent.is_active() {
                continue;
            }
            match collision::check(agent, &self.bodies) {
                Contact::None => {}
                Contact::Destination => {
                    log::info!("agent {index} arrived at tick {tick}");
                    agent.fate = Fate::Arrived { tick };
                    agent.velocity.fill(0.0);
                }
                Contact::Obstacle(body) => {
                    log::warn!(
                        "agent {index} hit obstacle {body} at tick {tick} ({:.2}, {:.2})",
                        agent.position.x,
                        agent.position.y
                    );
                    agent.fate = Fate::Collided { tick };
                    agent.velocity.fill(0.0);
                }
            }
        }

        self.tick += 1;
    }

    pub fn hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let fixedpoint = |v: f64| (v * 1e9) as i64;
        let mut s = DefaultHasher::new();
        s.write_u32(self.tick);
        for agent in self.agents.iter() {
            s.write_i64(fixedpoint(agent.position.x));
            s.write_i64(fixedpoint(agent.position.y));
            s.write_i64(fixedpoint(agent.heading));
            s.write_i64(fixedpoint(agent.velocity.x));
            s.write_i64(fixedpoint(agent.velocity.y));
            agent.fate.hash(&mut s);
        }
        s.finish()
    }
}
