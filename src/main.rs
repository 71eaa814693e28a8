use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use grazesim::agent::Compass;
use grazesim::config::Config;
use grazesim::config_loader::{self, CliOverrides};
use grazesim::orchestrator::{self, SteerStep};

/// Agent-based grazing simulation: flocks of sheep foraging a county of glens
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration YAML file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the timeline and summary
    #[arg(short, long, default_value = "grazesim_output")]
    output: PathBuf,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Number of turns to simulate
    #[arg(long)]
    turns: Option<usize>,

    /// Movement strategy (random, maxAbundance, weighted, fleeLowGrass)
    #[arg(long)]
    strategy: Option<String>,

    /// Topology shape (grid, hex, random-tree)
    #[arg(long)]
    topology: Option<String>,

    /// Flock to steer manually for one extra turn
    #[arg(long, requires = "steer")]
    steer_flock: Option<usize>,

    /// Direction for the steered flock (stay/west/north/east/south or x/a/w/d/s)
    #[arg(long, requires = "steer_flock")]
    steer: Option<String>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => Config::default(),
    };

    let overrides = CliOverrides {
        seed: args.seed,
        turns: args.turns,
        strategy: args.strategy.clone(),
        topology: args.topology.clone(),
    };
    config_loader::apply_cli_overrides(&mut config, &overrides)?;

    // Initialize logging with the configured level, "info" by default
    let level = config.general.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    info!("Starting GrazeSim");
    match &args.config {
        Some(path) => info!("Configuration file: {:?}", path),
        None => info!("No configuration file given, using defaults"),
    }
    info!("Output directory: {:?}", args.output);

    let steer = match (args.steer_flock, &args.steer) {
        (Some(flock), Some(direction)) => Some(SteerStep {
            flock,
            direction: direction.parse::<Compass>().map_err(|e| eyre!(e))?,
        }),
        _ => None,
    };

    let mut rng = match config.general.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let state = orchestrator::run_simulation(&config, steer, &mut rng)?;
    let artifacts = orchestrator::write_outputs(&state, &config, &args.output)?;

    info!(
        "Simulated {} turns: {} sheep alive of {} born",
        state.turns_elapsed(),
        state.living_sheep(state.turns_elapsed()),
        state.sheep.len()
    );
    info!("Timeline: {:?}", artifacts.timeline);
    info!("Summary: {:?}", artifacts.summary);
    Ok(())
}
