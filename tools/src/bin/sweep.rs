use bendy_simulator::scenario::{self, Status};
use bendy_tools::{check_scenario, load_config, run_to_completion, seed_range, RunSummary};
use clap::Parser;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap()]
struct Arguments {
    /// Scenarios to run (default: all)
    scenarios: Vec<String>,

    #[clap(short = 'n', long, default_value = "20")]
    seeds: u32,

    /// Base seed
    #[clap(short, long, default_value = "0")]
    seed: u32,

    /// Planner settings (TOML)
    #[clap(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("sweep=info,bendy_tools=info"),
    )
    .init();

    let args = Arguments::parse();
    let scenarios = if args.scenarios.is_empty() {
        scenario::list()
    } else {
        args.scenarios.clone()
    };
    for name in &scenarios {
        check_scenario(name)?;
    }
    let config = load_config(args.config.as_deref())?;

    log::info!(
        "Running {} scenarios x {} seeds",
        scenarios.len(),
        args.seeds
    );
    let runs: Vec<(String, Vec<RunSummary>)> = scenarios
        .par_iter()
        .map(|name| {
            let summaries = seed_range(args.seed, args.seeds)
                .into_par_iter()
                .map(|seed| run_to_completion(name, seed, config.clone(), None))
                .collect();
            (name.clone(), summaries)
        })
        .collect();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Scenario",
        "Arrived",
        "Collided",
        "Timed Out",
        "Mean Ticks",
        "Blocked Ticks",
        "Sample Failures",
    ]);
    for (name, summaries) in runs {
        let count = |status: Status| summaries.iter().filter(|s| s.status == status).count();
        let mean_ticks = if summaries.is_empty() {
            0.0
        } else {
            summaries.iter().map(|s| s.ticks as f64).sum::<f64>() / summaries.len() as f64
        };
        let failures = summaries
            .iter()
            .filter(|s| s.status != Status::Arrived)
            .take(10)
            .map(|s| s.seed.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            name,
            count(Status::Arrived).to_string(),
            count(Status::Collided).to_string(),
            count(Status::TimedOut).to_string(),
            format!("{mean_ticks:.0}"),
            summaries
                .iter()
                .map(|s| s.blocked)
                .sum::<u32>()
                .to_string(),
            failures,
        ]);
    }
    println!("{table}");

    Ok(())
}
