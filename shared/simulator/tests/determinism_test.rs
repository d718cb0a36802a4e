use bendy_simulator::scenario::{self, Status};
use bendy_simulator::simulation::Simulation;
use rayon::prelude::*;
use test_log::test;

fn run(scenario_name: &str, seed: u32, ticks: u32) -> u64 {
    let mut sim = Simulation::new(scenario_name, seed);
    while sim.status() == Status::Running && sim.tick() < ticks {
        sim.step();
    }
    sim.hash()
}

#[test]
fn test_repeatable() {
    scenario::list().par_iter().for_each(|name| {
        assert_eq!(run(name, 7, 600), run(name, 7, 600), "scenario {}", name);
    });
}

#[test]
fn test_seed_changes_field() {
    let a = Simulation::new("field", 0).obstacles();
    let b = Simulation::new("field", 1).obstacles();
    assert_eq!(a.len(), b.len());
    assert_ne!(a, b);
    assert_eq!(a, Simulation::new("field", 0).obstacles());
}
