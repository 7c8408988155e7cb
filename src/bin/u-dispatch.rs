use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use log::info;
use u_dispatch::allocation::RouteAllocator;
use u_dispatch::loader::load_network;
use u_dispatch::pathfinding::SearchStrategy;
use u_dispatch::schedule::{run_schedule, DispatchReport, ScheduleMode};

/// Route a fleet of trains across a station network and print the
/// turn-by-turn movements.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Order the route search by hops plus Manhattan distance (A*)
    #[clap(short = 'a', long = "astar", action)]
    astar: bool,
    /// Print a JSON dispatch report instead of the turn log
    #[clap(long, action)]
    json: bool,
    /// Network map file
    #[clap(value_parser)]
    map: PathBuf,
    /// Start station name
    #[clap(value_parser)]
    start: String,
    /// End station name
    #[clap(value_parser)]
    end: String,
    /// Number of trains to dispatch
    #[clap(value_parser = clap::value_parser!(u64).range(1..))]
    trains: u64,
}

fn run(args: &Args) -> anyhow::Result<()> {
    if args.start == args.end {
        bail!("start and end station are the same");
    }
    let trains = usize::try_from(args.trains).context("number of trains is too large")?;

    let network = load_network(&args.map)
        .with_context(|| format!("failed to load {}", args.map.display()))?;
    let start = network
        .lookup(&args.start)
        .ok_or_else(|| anyhow!("start station `{}` not found", args.start))?;
    let end = network
        .lookup(&args.end)
        .ok_or_else(|| anyhow!("end station `{}` not found", args.end))?;

    let strategy = if args.astar {
        SearchStrategy::AStar
    } else {
        SearchStrategy::BreadthFirst
    };
    let routes = RouteAllocator::new(&network, strategy).allocate(start, end, trains)?;
    let schedule = run_schedule(&routes, ScheduleMode::Logging);
    info!(
        "{} trains over {} distinct routes in {} turns ({} stalls)",
        routes.len(),
        routes.distinct_routes(),
        schedule.total_turns(),
        schedule.stalls()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let report = DispatchReport::new(&network, strategy, &routes, &schedule);
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        schedule.write_log(&network, &mut out)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(&args)
}
