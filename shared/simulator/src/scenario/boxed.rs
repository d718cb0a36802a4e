use super::prelude::*;

/// The agent starts shut inside a box. After a few seconds the side facing
/// the destination is taken away.
pub struct Boxed {
    gate: Option<usize>,
}

impl Boxed {
    pub const HALF_SIZE: f64 = 6.0;
    pub const OPEN_TICK: u32 = 120;

    pub fn new() -> Self {
        Self { gate: None }
    }
}

impl Scenario for Boxed {
    fn name(&self) -> String {
        "boxed".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) {
        sim.add_agent(Agent::new(point![0.0, 0.0], 0.0, point![60.0, 0.0]));
        let h = Self::HALF_SIZE;
        let corners = [point![h, -h], point![h, h], point![-h, h], point![-h, -h]];
        // The first side, facing the destination, is the gate.
        for (i, corner) in corners.iter().enumerate() {
            let next = corners[(i + 1) % corners.len()];
            let index = sim.add_body(ObstacleBody::fixed(Obstacle::segment(*corner, next, 0.5)));
            if i == 0 {
                self.gate = Some(index);
            }
        }
    }

    fn tick(&mut self, sim: &mut Simulation) {
        if sim.tick() >= Self::OPEN_TICK {
            if let Some(gate) = self.gate.take() {
                log::info!("opening the box at tick {}", sim.tick());
                sim.remove_body(gate);
            }
        }
    }
}
