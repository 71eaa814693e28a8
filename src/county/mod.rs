//! Glens (patches) of the county and their abundance timelines.

use serde::{Deserialize, Serialize};

use crate::topology::{Position, Topology};

/// Stable index of a glen in `SimulationState::patches`
pub type PatchId = usize;

/// Abundance every glen starts with
pub const INITIAL_ABUNDANCE: f64 = 1.0;

/// A glen: a node of the county graph holding a renewable resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// Advisory coordinate for display and manual steering
    pub position: Position,
    /// Adjacent glens, this glen first
    pub neighbors: Vec<PatchId>,
    /// Current abundance in [0, 1]
    pub abundance: f64,
    /// Abundance at the end of each turn, index 0 = initial
    pub abundance_history: Vec<f64>,
}

impl Patch {
    pub fn new(position: Position, neighbors: Vec<PatchId>) -> Self {
        Self {
            position,
            neighbors,
            abundance: INITIAL_ABUNDANCE,
            abundance_history: vec![INITIAL_ABUNDANCE],
        }
    }

    /// Abundance recorded for `turn`, if the timeline reaches it
    pub fn abundance_at(&self, turn: usize) -> Option<f64> {
        self.abundance_history.get(turn).copied()
    }

    /// Remove `amount` of abundance, flooring at 0. Visible immediately to
    /// any sheep grazing later in the same turn.
    pub fn graze(&mut self, amount: f64) {
        self.abundance = (self.abundance - amount).max(0.0);
    }

    /// Multiply abundance by `rate`, capped at 1, and record the turn.
    pub fn regrow(&mut self, rate: f64) {
        self.abundance = (self.abundance * rate).clamp(0.0, 1.0);
        self.abundance_history.push(self.abundance);
    }
}

/// Create the county's glens from a built topology, all at full abundance.
pub fn patches_from_topology(topology: Topology) -> Vec<Patch> {
    topology
        .adjacency
        .into_links()
        .into_iter()
        .zip(topology.positions)
        .map(|(neighbors, position)| Patch::new(position, neighbors))
        .collect()
}
