//! SwiftletNav - Replanning loop for the swiftlet planner
//!
//! Drives a simulated vehicle through a YAML scenario: goals are fed to the
//! replan trigger one at a time, the trigger plans on a fixed-rate loop, and
//! the vehicle follows each plan at cruise speed.
//!
//! ```bash
//! swiftlet-nav --scenario configs/scenarios/pillars.yaml --output plans.yaml
//! RUST_LOG=debug swiftlet-nav -s configs/scenarios/pillars.yaml -c configs/config.yaml
//! ```

mod error;
mod scenario;
mod sim;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use swiftlet_plan::SwiftletConfig;

use error::Result;
use scenario::Scenario;
use sim::Simulator;

/// Replan a simulated vehicle through a scenario
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to configs/config.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scenario file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Write the plan log here (overrides navigation.output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop after this many ticks (overrides navigation.max_ticks)
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Pace the loop at the configured rate instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            SwiftletConfig::load(path)?
        }
        None => SwiftletConfig::load_default()?,
    };

    info!("SwiftletNav v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Pool {}^3, sensing range {:.1}, loop {:.0}Hz",
        config.planner.pool_size, config.planner.sensing_range, config.navigation.loop_rate_hz
    );

    let scenario = Scenario::load(&args.scenario)?;
    let max_ticks = args.max_ticks.unwrap_or(config.navigation.max_ticks);
    let output = args.output.clone().or_else(|| config.navigation.output.clone());

    let simulator = Simulator::new(&config, &scenario)?;
    let summary = simulator.run(max_ticks, args.realtime);
    info!("{}", summary.summary());

    if let Some(path) = output {
        summary.write(&path)?;
        info!("Plan log written to {:?}", path);
    }

    Ok(())
}
