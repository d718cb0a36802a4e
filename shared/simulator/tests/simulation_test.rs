use bendy_planner::Obstacle;
use bendy_simulator::agent::Fate;
use bendy_simulator::scenario::{self, Status};
use bendy_simulator::simulation::Simulation;
use test_log::test;

fn run(sim: &mut Simulation) -> Status {
    while sim.status() == Status::Running {
        sim.step();
    }
    sim.status()
}

#[test]
fn test_single_obstacle() {
    let mut sim = Simulation::new("single_obstacle", 0);
    assert_eq!(run(&mut sim), Status::Arrived);

    let agent = &sim.agents[0];
    assert!(matches!(agent.fate, Fate::Arrived { .. }));
    assert!(agent.status_counts().get("avoiding").copied().unwrap_or(0) > 0);
    // Debounced back to clear before arriving.
    assert!(!agent.planner_state().is_avoiding());
}

#[test]
fn test_boxed_waits_then_leaves() {
    let mut sim = Simulation::new("boxed", 0);
    for _ in 0..100 {
        sim.step();
        let result = sim.agents[0].last_result().unwrap();
        assert_eq!(result.status, bendy_planner::Status::Blocked);
        assert!(result.bearing.is_none());
    }
    assert_eq!(run(&mut sim), Status::Arrived);
    assert!(sim.agents[0].status_counts()["blocked"] >= 100);
    assert!(sim.agents[0].status_counts()["clear"] > 0);
}

#[test]
fn test_wall_without_contact() {
    let mut sim = Simulation::new("wall", 0);
    assert_ne!(run(&mut sim), Status::Collided);
}

#[test]
fn test_times_out() {
    let mut sim = Simulation::new("single_obstacle", 0);
    sim.set_max_ticks(10);
    assert_eq!(run(&mut sim), Status::TimedOut);
    assert_eq!(sim.tick(), 10);
    assert!(sim.agents[0].is_active());
}

#[test]
fn test_obstacles_move() {
    let mut sim = Simulation::new("crossing", 0);
    let before = sim.obstacles();
    for _ in 0..60 {
        sim.step();
    }
    let after = sim.obstacles();
    match (before[0], after[0]) {
        (Obstacle::Circle { center: a, .. }, Obstacle::Circle { center: b, .. }) => {
            approx::assert_abs_diff_eq!(b.y - a.y, 2.0, epsilon = 1e-9);
            assert_eq!(b.x, a.x);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_scenarios_load() {
    for name in scenario::list() {
        let scenario = scenario::load(&name);
        assert_eq!(scenario.name(), name);
        let sim = Simulation::new(&name, 0);
        assert!(!sim.agents.is_empty());
        assert_eq!(sim.status(), Status::Running);
    }
    assert!(scenario::load_safe("does_not_exist").is_none());
}
