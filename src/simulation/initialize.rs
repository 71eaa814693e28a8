use log::info;
use rand::Rng;

use crate::agent::{Flock, Sheep};
use crate::config::Parameters;
use crate::county::patches_from_topology;
use crate::simulation::{SimulationError, SimulationState};
use crate::strategy::Strategy;
use crate::topology::{place_flocks, Topology, TopologyShape};
use crate::utils::validation::validate_parameters;

impl SimulationState {
    /// Build a fresh county and pre-render `parameters.num_turns` turns.
    ///
    /// Glens start at full abundance, each flock starts on a uniformly random
    /// glen with `initial_flock_size` sheep born on turn 0. The display
    /// pointer is reset to turn 0 afterwards; the full timeline is kept.
    pub fn initialize<R: Rng + ?Sized>(
        parameters: Parameters,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        validate_parameters(&parameters)?;
        Strategy::from_name(&parameters.strategy)?;

        let shape = TopologyShape::from_name(&parameters.topology);
        let topology = Topology::build(shape, parameters.node_count(), rng);
        let patches = patches_from_topology(topology);

        let mut flocks = Vec::with_capacity(parameters.num_flocks);
        let mut sheep = Vec::with_capacity(parameters.num_flocks * parameters.initial_flock_size);
        for start in place_flocks(parameters.num_flocks, patches.len(), rng) {
            let flock_id = flocks.len();
            let mut flock = Flock::new(start);
            for _ in 0..parameters.initial_flock_size {
                flock.sheep.push(sheep.len());
                sheep.push(Sheep::born(flock_id, 0));
            }
            flocks.push(flock);
        }

        info!(
            "Initialized county: {} glens ({}), {} flocks, {} sheep",
            patches.len(),
            shape,
            flocks.len(),
            sheep.len()
        );

        let mut state = Self {
            turn_shown: 0,
            parameters,
            patches,
            flocks,
            sheep,
        };
        state.advance(rng)?;
        state.turn_shown = 0;
        Ok(state)
    }
}
