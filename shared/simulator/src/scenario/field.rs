use super::prelude::*;

/// Three agents crossing a seeded random field of round obstacles.
pub struct Field {}

impl Field {
    const LENGTH: f64 = 120.0;
    const LANES: [f64; 3] = [-20.0, 0.0, 20.0];
    const OBSTACLES: usize = 18;
    /// Obstacles keep this far from every start and destination.
    const KEEP_OUT: f64 = 8.0;
}

impl Scenario for Field {
    fn name(&self) -> String {
        "field".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) {
        let mut endpoints = vec![];
        for y in Self::LANES {
            let start = point![0.0, y];
            let destination = point![Self::LENGTH, y];
            sim.add_agent(Agent::new(start, 0.0, destination));
            endpoints.push(start);
            endpoints.push(destination);
        }

        let mut placed = 0;
        while placed < Self::OBSTACLES {
            let rng = sim.rng();
            let center = point![rng.gen_range(15.0..105.0), rng.gen_range(-30.0..30.0)];
            let radius = rng.gen_range(1.0..4.0);
            if endpoints
                .iter()
                .any(|p| nalgebra::distance(p, &center) < Self::KEEP_OUT + radius)
            {
                continue;
            }
            sim.add_body(ObstacleBody::fixed(Obstacle::circle(center, radius)));
            placed += 1;
        }
    }

    fn max_ticks(&self) -> u32 {
        2 * DEFAULT_MAX_TICKS
    }
}
