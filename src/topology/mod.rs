//! County topology module.
//!
//! This module builds the adjacency graph of a county from a shape and a
//! glen count, and distributes flocks across it.

pub mod types;
pub mod connections;
pub mod distribution;

use rand::Rng;

// Re-export key types and functions for easier access
pub use types::{Adjacency, Position, TopologyShape};
pub use connections::generate_topology_connections;
pub use distribution::place_flocks;

/// A built county graph: symmetric adjacency plus advisory positions.
#[derive(Debug, Clone)]
pub struct Topology {
    pub shape: TopologyShape,
    pub adjacency: Adjacency,
    pub positions: Vec<Position>,
}

impl Topology {
    /// Build the adjacency for `node_count` glens in the given shape.
    pub fn build<R: Rng + ?Sized>(shape: TopologyShape, node_count: usize, rng: &mut R) -> Self {
        let (adjacency, positions) = generate_topology_connections(shape, node_count, rng);
        log::info!("Built {} topology with {} glens", shape, adjacency.len());
        Self {
            shape,
            adjacency,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
