use super::prelude::*;

/// Obstacles sweeping across the route at constant velocity, so the
/// obstacle set seen by the planner changes every tick.
pub struct Crossing {}

impl Scenario for Crossing {
    fn name(&self) -> String {
        "crossing".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) {
        sim.add_agent(Agent::new(point![0.0, 0.0], 0.0, point![100.0, 0.0]));
        let movers = [
            (point![30.0, -25.0], vector![0.0, 2.0], 3.0),
            (point![55.0, 30.0], vector![0.0, -2.5], 3.0),
            (point![80.0, -20.0], vector![0.0, 1.5], 4.0),
        ];
        for (center, velocity, radius) in movers {
            sim.add_body(ObstacleBody::moving(
                Obstacle::circle(center, radius),
                velocity,
            ));
        }
        // A drifting wall segment that never reaches the route.
        sim.add_body(ObstacleBody::moving(
            Obstacle::wall(point![45.0, 40.0], FRAC_PI_2, 10.0, 0.5),
            vector![-0.5, 0.0],
        ));
    }
}
