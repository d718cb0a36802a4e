use bendy_simulator::scenario::Status;
use bendy_simulator::simulation::Simulation;
use bendy_tools::{check_scenario, load_config, summarize};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap()]
struct Arguments {
    scenario: String,

    #[clap(short, long, default_value = "0")]
    seed: u32,

    /// Planner settings (TOML)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Override the scenario's tick limit
    #[clap(long)]
    max_ticks: Option<u32>,

    /// Print one line per agent per tick
    #[clap(long)]
    trace: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("scenario=info,bendy_simulator=info"),
    )
    .init();

    let args = Arguments::parse();
    check_scenario(&args.scenario)?;
    let config = load_config(args.config.as_deref())?;

    let mut sim = Simulation::with_config(&args.scenario, args.seed, config);
    if let Some(max_ticks) = args.max_ticks {
        sim.set_max_ticks(max_ticks);
    }
    while sim.status() == Status::Running {
        let active: Vec<bool> = sim.agents.iter().map(|agent| agent.is_active()).collect();
        sim.step();
        if args.trace {
            for (index, agent) in sim.agents.iter().enumerate() {
                if !active[index] {
                    continue;
                }
                if let Some(result) = agent.last_result() {
                    println!(
                        "{:5} agent {} pos ({:7.2}, {:7.2}) speed {:4.2} {:8} bearing {:>7} tested {:2} clearance {:6.2}{}",
                        sim.tick(),
                        index,
                        agent.position.x,
                        agent.position.y,
                        agent.speed(),
                        result.status.name(),
                        result
                            .bearing
                            .map_or("-".to_string(), |b| format!("{:.1}", b.to_degrees())),
                        result.diagnostics.candidates_tested,
                        result.diagnostics.clearance,
                        if result.diagnostics.resisted { " resisted" } else { "" },
                    );
                }
            }
        }
    }

    let summary = summarize(&args.scenario, &sim);
    log::info!(
        "{} seed {}: {} after {} ticks ({:.1}s)",
        summary.scenario,
        summary.seed,
        summary.status.name(),
        summary.ticks,
        sim.time()
    );
    log::info!(
        "planner ticks: clear {} avoiding {} blocked {}",
        summary.clear,
        summary.avoiding,
        summary.blocked
    );
    Ok(())
}
