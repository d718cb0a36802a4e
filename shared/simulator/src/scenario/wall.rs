use super::prelude::*;

/// A long wall across the route, open only at its lower end.
pub struct Wall {}

impl Scenario for Wall {
    fn name(&self) -> String {
        "wall".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) {
        sim.add_agent(Agent::new(point![0.0, 0.0], 0.0, point![80.0, 0.0]));
        sim.add_body(ObstacleBody::fixed(Obstacle::segment(
            point![40.0, -10.0],
            point![40.0, 60.0],
            0.5,
        )));
    }
}
