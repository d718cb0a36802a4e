use anyhow::Context;
use bendy_planner::{PlannerConfig, PlannerSettings, Status as PlannerStatus};
use bendy_simulator::scenario::{self, Status};
use bendy_simulator::simulation::Simulation;
use std::ops::Range;
use std::path::Path;

/// Reads planner settings from a TOML file, or the defaults without one.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PlannerConfig> {
    let path = match path {
        Some(path) => path,
        None => return Ok(PlannerConfig::default()),
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading planner config {}", path.display()))?;
    let settings = PlannerSettings::from_toml_str(&text)
        .with_context(|| format!("parsing planner config {}", path.display()))?;
    let config = PlannerConfig::try_from(settings)
        .with_context(|| format!("invalid planner config {}", path.display()))?;
    log::info!("loaded planner config from {}", path.display());
    Ok(config)
}

pub fn check_scenario(name: &str) -> anyhow::Result<()> {
    if scenario::load_safe(name).is_none() {
        anyhow::bail!(
            "unknown scenario {:?}, expected one of: {}",
            name,
            scenario::list().join(", ")
        );
    }
    Ok(())
}

/// Summary of one finished run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub scenario: String,
    pub seed: u32,
    pub status: Status,
    pub ticks: u32,
    /// Planner status counts summed over every agent.
    pub clear: u32,
    pub avoiding: u32,
    pub blocked: u32,
}

pub fn summarize(scenario: &str, sim: &Simulation) -> RunSummary {
    let count = |status: PlannerStatus| -> u32 {
        sim.agents
            .iter()
            .map(|agent| {
                agent
                    .status_counts()
                    .get(status.name())
                    .copied()
                    .unwrap_or(0)
            })
            .sum()
    };
    RunSummary {
        scenario: scenario.to_string(),
        seed: sim.seed(),
        status: sim.status(),
        ticks: sim.tick(),
        clear: count(PlannerStatus::Clear),
        avoiding: count(PlannerStatus::Avoiding),
        blocked: count(PlannerStatus::Blocked),
    }
}

/// Runs a scenario until it stops running.
pub fn run_to_completion(
    scenario: &str,
    seed: u32,
    config: PlannerConfig,
    max_ticks: Option<u32>,
) -> RunSummary {
    let mut sim = Simulation::with_config(scenario, seed, config);
    if let Some(max_ticks) = max_ticks {
        sim.set_max_ticks(max_ticks);
    }
    while sim.status() == Status::Running {
        sim.step();
    }
    summarize(scenario, &sim)
}

/// `count` seeds starting at `base`, cut short at `u32::MAX`.
pub fn seed_range(base: u32, count: u32) -> Range<u32> {
    base..base.saturating_add(count)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;
    use test_log::test;

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), PlannerConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "margin = 3.0\nclear_debounce_ticks = 5").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.margin(), 3.0);
        assert_eq!(config.clear_debounce_ticks(), 5);

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "min_lookahead = 20.0\nmax_lookahead = 10.0\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("greater than max lookahead"));

        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_check_scenario() {
        assert!(check_scenario("wall").is_ok());
        assert!(check_scenario("moon").is_err());
    }

    #[test]
    fn test_seed_range() {
        assert_eq!(seed_range(5, 3), 5..8);
        assert_eq!(seed_range(0, 0).len(), 0);
        let top = seed_range(u32::MAX - 1, 20);
        assert_eq!(top, (u32::MAX - 1)..u32::MAX);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_run_to_completion() {
        let summary = run_to_completion("single_obstacle", 0, PlannerConfig::default(), Some(30));
        assert_eq!(summary.status, Status::TimedOut);
        assert_eq!(summary.ticks, 30);
        assert_eq!(summary.clear + summary.avoiding + summary.blocked, 30);
    }
}
