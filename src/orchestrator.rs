//! Run orchestrator.
//!
//! This module drives a complete run from a loaded configuration: it
//! initializes the county, applies an optional manual steering step, and
//! writes the timeline and a text summary into the output directory.

use crate::agent::{manual_move, Compass, FlockId};
use crate::config::Config;
use crate::simulation::SimulationState;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use log::info;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the serialized timeline inside the output directory
pub const TIMELINE_FILE: &str = "timeline.json";

/// File name of the text summary inside the output directory
pub const SUMMARY_FILE: &str = "summary.txt";

/// One manual move applied after the initial timeline is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteerStep {
    pub flock: FlockId,
    pub direction: Compass,
}

/// Paths written by a run
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub timeline: PathBuf,
    pub summary: PathBuf,
}

/// Initialize the simulation described by `config` and apply `steer`, if any.
pub fn run_simulation<R: Rng + ?Sized>(
    config: &Config,
    steer: Option<SteerStep>,
    rng: &mut R,
) -> Result<SimulationState> {
    let mut state = SimulationState::initialize(config.simulation.clone(), rng)
        .wrap_err("Failed to initialize simulation")?;

    if let Some(step) = steer {
        steer_flock(&mut state, step, rng)?;
    }

    Ok(state)
}

/// Move one flock a single turn in a compass direction, then hand the rest
/// of the county back to the configured strategy.
pub fn steer_flock<R: Rng + ?Sized>(
    state: &mut SimulationState,
    step: SteerStep,
    rng: &mut R,
) -> Result<()> {
    let target = manual_move(state, step.flock, step.direction).ok_or_else(|| {
        eyre!(
            "Flock {} cannot move {} from its current glen",
            step.flock,
            step.direction
        )
    })?;
    let was_manual = state.flocks[step.flock].manual;
    state.set_manual(step.flock, true)?;
    info!("Steering flock {} {} to glen {}", step.flock, step.direction, target);

    let turns = state.parameters.num_turns;
    state.parameters.num_turns = 1;
    state.parameters.manual_override = Some(target);
    let result = state.advance(rng);
    state.parameters.num_turns = turns;
    if result.is_err() {
        state.flocks[step.flock].manual = was_manual;
        state.parameters.manual_override = None;
    }
    result.wrap_err("Failed to apply manual move")?;

    let end = state.turns_elapsed();
    state.show_turn(end);
    Ok(())
}

/// Write the timeline and summary for `state` into `output_dir`
pub fn write_outputs(state: &SimulationState, config: &Config, output_dir: &Path) -> Result<RunArtifacts> {
    fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", output_dir.display()))?;

    let timeline = output_dir.join(TIMELINE_FILE);
    let timeline_json = serde_json::to_string_pretty(state)
        .wrap_err("Failed to serialize timeline to JSON")?;
    fs::write(&timeline, timeline_json)
        .wrap_err_with(|| format!("Failed to write timeline to {}", timeline.display()))?;
    info!("Timeline written to {}", timeline.display());

    let summary = output_dir.join(SUMMARY_FILE);
    fs::write(&summary, render_summary(state, config))
        .wrap_err_with(|| format!("Failed to write summary to {}", summary.display()))?;
    info!("Summary written to {}", summary.display());

    Ok(RunArtifacts { timeline, summary })
}

/// Human-readable account of a run: parameters and survivors per turn
pub fn render_summary(state: &SimulationState, config: &Config) -> String {
    let params = &state.parameters;
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(60));
    lines.push("                  GRAZESIM RUN SUMMARY".to_string());
    lines.push("=".repeat(60));
    lines.push(String::new());

    lines.push(format!("Generated: {}", chrono::Utc::now().to_rfc3339()));
    match config.general.seed {
        Some(seed) => lines.push(format!("Seed: {}", seed)),
        None => lines.push("Seed: (entropy)".to_string()),
    }
    lines.push(format!(
        "County: {} glens, topology '{}'",
        state.patches.len(),
        params.topology
    ));
    lines.push(format!(
        "Flocks: {} x {} sheep, strategy '{}'",
        params.num_flocks, params.initial_flock_size, params.strategy
    ));
    lines.push(format!(
        "Growth {:.3}, greed {:.3}, endurance {}, reproduction {:.3}",
        params.glen_growth_rate, params.sheep_greed, params.sheep_endurance, params.sheep_reproduction_rate
    ));
    lines.push(String::new());

    lines.push(format!("{:>6}  {:>10}  {:>14}", "Turn", "Alive", "Total grass"));
    for turn in 0..=state.turns_elapsed() {
        let grass: f64 = state
            .patches
            .iter()
            .filter_map(|patch| patch.abundance_at(turn))
            .sum();
        lines.push(format!("{:>6}  {:>10}  {:>14.3}", turn, state.living_sheep(turn), grass));
    }
    lines.push(String::new());
    lines.push(format!("Sheep ever born: {}", state.sheep.len()));

    lines.join("\n")
}
