use super::prelude::*;

/// One round obstacle square on the straight line to the destination.
pub struct SingleObstacle {}

impl Scenario for SingleObstacle {
    fn name(&self) -> String {
        "single_obstacle".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) {
        sim.add_agent(Agent::new(point![0.0, 0.0], 0.0, point![100.0, 0.0]));
        sim.add_body(ObstacleBody::fixed(Obstacle::circle(point![50.0, 0.0], 5.0)));
    }
}
