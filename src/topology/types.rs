//! Topology type definitions.
//!
//! This file contains the shape selector for county topologies (Grid,
//! HexRing, RandomTree), the advisory glen position, and the symmetric
//! adjacency structure every shape builds into.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Shape of the county's adjacency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopologyShape {
    /// Square lattice with a 4-neighbourhood
    Grid,
    /// Concentric hexagonal rings around a center glen
    HexRing,
    /// Spanning path plus one random extra edge per glen
    RandomTree,
}

impl TopologyShape {
    /// Resolve a shape name. Unrecognised names fall back to `RandomTree`
    /// instead of failing, so a typo in a UI field still yields a county.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "grid" | "square" => Self::Grid,
            "hex" | "hex-ring" | "hexring" | "hex_ring" => Self::HexRing,
            "random" | "random-tree" | "randomtree" | "random_tree" | "any" => Self::RandomTree,
            other => {
                log::warn!("Unknown topology shape '{}', falling back to random-tree", other);
                Self::RandomTree
            }
        }
    }

    /// Returns the canonical name of the shape
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::HexRing => "hex-ring",
            Self::RandomTree => "random-tree",
        }
    }
}

impl fmt::Display for TopologyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory coordinate of a glen, used only by display and manual steering.
///
/// Grid glens use (column, row); hex glens use axial (q, r); random-tree
/// glens are laid out along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Symmetric adjacency lists over node indices.
///
/// Every node lists itself first (the "stay" option), followed by its
/// neighbours in the order the links were registered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Adjacency {
    links: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Allocate `count` nodes, each linked only to itself
    pub fn with_nodes(count: usize) -> Self {
        Self {
            links: (0..count).map(|i| vec![i]).collect(),
        }
    }

    /// Register an undirected edge. Self-links and duplicates are ignored.
    pub fn link(&mut self, a: usize, b: usize) {
        if a == b || a >= self.links.len() || b >= self.links.len() {
            return;
        }
        if !self.links[a].contains(&b) {
            self.links[a].push(b);
        }
        if !self.links[b].contains(&a) {
            self.links[b].push(a);
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Neighbours of `node`, itself included
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.links[node]
    }

    /// Number of distinct neighbours, not counting the node itself
    pub fn degree(&self, node: usize) -> usize {
        self.links[node].iter().filter(|&&other| other != node).count()
    }

    /// True when every edge is registered in both directions
    pub fn is_symmetric(&self) -> bool {
        self.links.iter().enumerate().all(|(a, neighbors)| {
            neighbors
                .iter()
                .all(|&b| b < self.links.len() && self.links[b].contains(&a))
        })
    }

    /// True when every node is reachable from node 0
    pub fn is_connected(&self) -> bool {
        if self.links.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.links.len()];
        let mut queue = VecDeque::from([0usize]);
        seen[0] = true;
        while let Some(node) = queue.pop_front() {
            for &next in &self.links[node] {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    pub fn into_links(self) -> Vec<Vec<usize>> {
        self.links
    }
}
