//! Glen connection generation.
//!
//! This file wires the adjacency for each topology shape. Every builder is
//! two-pass: all nodes are allocated first (linked to themselves), then
//! edges are registered between nodes that already exist, so a partially
//! filled row or ring never references a glen that was not created.

use std::collections::HashMap;

use rand::Rng;

use crate::topology::types::{Adjacency, Position, TopologyShape};

/// Axial unit steps around a hex, in ring-walk order.
const HEX_DIRECTIONS: [(i64, i64); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Generate glen connections for the requested shape
///
/// # Arguments
/// * `shape` - The topology shape (Grid, HexRing, RandomTree)
/// * `node_count` - Number of glens in the county
/// * `rng` - Randomness source (only consumed by RandomTree)
///
/// # Returns
/// The adjacency and one advisory position per glen
pub fn generate_topology_connections<R: Rng + ?Sized>(
    shape: TopologyShape,
    node_count: usize,
    rng: &mut R,
) -> (Adjacency, Vec<Position>) {
    match shape {
        TopologyShape::Grid => connect_grid(node_count),
        TopologyShape::HexRing => connect_hex_rings(node_count),
        TopologyShape::RandomTree => connect_random_tree(node_count, rng),
    }
}

/// Width of the square lattice holding `node_count` glens
pub fn grid_width(node_count: usize) -> usize {
    let mut width = (node_count as f64).sqrt() as usize;
    while width * width < node_count {
        width += 1;
    }
    while width > 0 && (width - 1) * (width - 1) >= node_count {
        width -= 1;
    }
    width
}

/// Square lattice, row-major. Each glen links back to the glen on its left
/// and the glen above it; the reverse edges are registered at the same time.
pub fn connect_grid(node_count: usize) -> (Adjacency, Vec<Position>) {
    let width = grid_width(node_count);
    let mut adjacency = Adjacency::with_nodes(node_count);
    let positions = (0..node_count)
        .map(|index| Position::new((index % width) as i64, (index / width) as i64))
        .collect();

    for index in 0..node_count {
        let column = index % width;
        let row = index / width;
        if column != 0 {
            adjacency.link(index, index - 1);
        }
        if row != 0 {
            adjacency.link(index, index - width);
        }
    }

    (adjacency, positions)
}

/// Axial coordinates of ring `k` in glen order.
///
/// The walk starts one step past the ring's first corner and finishes on
/// that corner, so the first glen of ring k sits between the first and last
/// glens of ring k-1. Corners fall on every k-th glen.
pub fn hex_ring(k: usize) -> Vec<Position> {
    if k == 0 {
        return vec![Position::default()];
    }
    let k_signed = k as i64;
    let (start_q, start_r) = HEX_DIRECTIONS[4];
    let mut current = Position::new(start_q * k_signed, start_r * k_signed);
    let mut ring = Vec::with_capacity(6 * k);
    for (dq, dr) in HEX_DIRECTIONS {
        for _ in 0..k {
            ring.push(current);
            current = current.offset(dq, dr);
        }
    }
    ring.rotate_left(1);
    ring
}

/// Concentric hexagonal rings around glen 0. Growth stops at `node_count`,
/// so the outermost ring may be partial.
pub fn connect_hex_rings(node_count: usize) -> (Adjacency, Vec<Position>) {
    let mut positions = Vec::with_capacity(node_count);
    let mut ring = 0;
    while positions.len() < node_count {
        positions.extend(hex_ring(ring));
        ring += 1;
    }
    positions.truncate(node_count);

    let index_of: HashMap<Position, usize> = positions
        .iter()
        .enumerate()
        .map(|(index, position)| (*position, index))
        .collect();

    let mut adjacency = Adjacency::with_nodes(node_count);
    for (index, position) in positions.iter().enumerate() {
        for (dq, dr) in HEX_DIRECTIONS {
            if let Some(&other) = index_of.get(&position.offset(dq, dr)) {
                // Register each edge once, from its later endpoint
                if other < index {
                    adjacency.link(index, other);
                }
            }
        }
    }

    (adjacency, positions)
}

/// Spanning path 0-1-2-..., then one extra edge per glen to a uniformly
/// chosen glen. Extra edges that duplicate an existing link are dropped.
pub fn connect_random_tree<R: Rng + ?Sized>(
    node_count: usize,
    rng: &mut R,
) -> (Adjacency, Vec<Position>) {
    let mut adjacency = Adjacency::with_nodes(node_count);
    let positions = (0..node_count)
        .map(|index| Position::new(index as i64, 0))
        .collect();

    for index in 1..node_count {
        adjacency.link(index, index - 1);
    }
    for index in 0..node_count {
        let friend = rng.gen_range(0..node_count);
        adjacency.link(index, friend);
    }

    (adjacency, positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grid_width() {
        assert_eq!(grid_width(0), 0);
        assert_eq!(grid_width(1), 1);
        assert_eq!(grid_width(4), 2);
        assert_eq!(grid_width(5), 3);
        assert_eq!(grid_width(64), 8);
    }

    #[test]
    fn test_grid_two_by_two() {
        let (adjacency, positions) = connect_grid(4);
        assert_eq!(adjacency.len(), 4);
        assert_eq!(adjacency.neighbors(0), &[0, 1, 2]);
        assert_eq!(adjacency.neighbors(1), &[1, 0, 3]);
        assert_eq!(adjacency.neighbors(2), &[2, 0, 3]);
        // left neighbour is linked before the one above
        assert_eq!(adjacency.neighbors(3), &[3, 2, 1]);
        assert_eq!(positions[3], Position::new(1, 1));
    }

    #[test]
    fn test_grid_interior_has_four_neighbors() {
        let (adjacency, _) = connect_grid(9);
        assert_eq!(adjacency.degree(4), 4);
        assert_eq!(adjacency.degree(0), 2);
        assert_eq!(adjacency.degree(1), 3);
        assert!(adjacency.is_symmetric());
    }

    #[test]
    fn test_partial_grid_row() {
        let (adjacency, _) = connect_grid(5);
        // width 3: glen 3 starts the second row, glen 4 sits under glen 1
        assert_eq!(adjacency.neighbors(4), &[4, 3, 1]);
        assert!(adjacency.is_connected());
    }

    #[test]
    fn test_hex_ring_sizes_and_corners() {
        for k in 1..6 {
            let ring = hex_ring(k);
            assert_eq!(ring.len(), 6 * k);
            for pair in ring.windows(2) {
                let dq = pair[1].x - pair[0].x;
                let dr = pair[1].y - pair[0].y;
                assert!(HEX_DIRECTIONS.contains(&(dq, dr)), "ring {} is not contiguous", k);
            }
        }
    }

    #[test]
    fn test_hex_first_ring_links_to_center() {
        let (adjacency, _) = connect_hex_rings(7);
        assert_eq!(adjacency.degree(0), 6);
        for node in 1..7 {
            assert!(adjacency.neighbors(node).contains(&0));
            // center plus the two ring neighbours
            assert_eq!(adjacency.degree(node), 3);
        }
    }

    #[test]
    fn test_hex_second_ring_vertex_and_edge_anchors() {
        let (adjacency, _) = connect_hex_rings(19);
        let inner = |node: usize| {
            adjacency
                .neighbors(node)
                .iter()
                .filter(|&&other| (1..7).contains(&other))
                .count()
        };
        // Ring 2 glens 7..19; corners are every second glen starting at 8
        for node in 7..19 {
            let position_in_ring = node - 7;
            let expected = if position_in_ring % 2 == 1 { 1 } else { 2 };
            assert_eq!(inner(node), expected, "glen {}", node);
        }
        // The first glen of ring 2 touches the first and last glens of ring 1
        assert!(adjacency.neighbors(7).contains(&1));
        assert!(adjacency.neighbors(7).contains(&6));
    }

    #[test]
    fn test_partial_hex_ring_only_links_existing() {
        let (adjacency, positions) = connect_hex_rings(10);
        assert_eq!(positions.len(), 10);
        assert!(adjacency.is_symmetric());
        assert!(adjacency.is_connected());
        for node in 0..10 {
            assert!(adjacency.neighbors(node).iter().all(|&other| other < 10));
        }
    }

    #[test]
    fn test_random_tree_is_connected_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        let (adjacency, _) = connect_random_tree(50, &mut rng);
        assert!(adjacency.is_symmetric());
        assert!(adjacency.is_connected());
        for node in 0..50 {
            let neighbors = adjacency.neighbors(node);
            let mut sorted = neighbors.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), neighbors.len());
            assert!(adjacency.neighbors(node).contains(&node));
        }
    }
}
