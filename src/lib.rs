//! # GrazeSim - Agent-based grazing simulation
//!
//! This library simulates a county of glens (patches) linked by an
//! adjacency graph, grazed by flocks of sheep. Each turn sheep try to eat,
//! may breed or starve, glens regrow, and flocks move under a pluggable
//! strategy. Every glen, flock, and sheep keeps its full per-turn history so
//! a display layer can scrub through the whole timeline.
//!
//! ## Key Features
//!
//! - **Topologies**: square grid, concentric hex rings, or a random tree
//! - **Strategies**: random, maxAbundance, weighted, fleeLowGrass
//! - **Full history**: append-only timelines, dead sheep kept on record
//! - **Manual steering**: single-turn overrides for manual flocks
//! - **Reproducible**: the random number generator is always passed in
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `topology`: adjacency construction and flock placement
//! - `county`: glens and their abundance timelines
//! - `agent`: sheep, flocks, lifecycle bookkeeping, compass steering
//! - `strategy`: flock movement strategies
//! - `simulation`: simulation state, initialization and turn advancement
//! - `config` / `config_loader`: typed parameters and YAML loading
//! - `utils`: parameter validation
//! - `orchestrator`: end-to-end runs and output files
//!
//! ## Example Usage
//!
//! ```rust
//! use grazesim::config::Parameters;
//! use grazesim::simulation::SimulationState;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let params = Parameters { county_size: 4, num_turns: 10, ..Parameters::default() };
//! let mut state = SimulationState::initialize(params, &mut rng)?;
//! assert_eq!(state.turns_elapsed(), 10);
//!
//! state.parameters.num_turns = 5;
//! state.advance(&mut rng)?;
//! assert_eq!(state.turns_elapsed(), 15);
//! # Ok::<(), grazesim::simulation::SimulationError>(())
//! ```
//!
//! ## Error Handling
//!
//! The simulation core returns `SimulationError`; configuration problems are
//! reported before any state changes. The binary and orchestrator use
//! `color_eyre` for error reporting with context.

pub mod config;
pub mod config_loader;
pub mod topology;
pub mod county;
pub mod agent;
pub mod strategy;
pub mod simulation;
pub mod utils;
pub mod orchestrator;
