//! Manual steering of a flock by compass direction.
//!
//! Directions are resolved against glen positions: a neighbour one column
//! to the left is west, one row up is north, and so on. On a hex or
//! random-tree county some directions simply have no glen.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::agent::FlockId;
use crate::county::PatchId;
use crate::simulation::SimulationState;

/// A manual move for the steered flock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compass {
    Stay,
    West,
    North,
    East,
    South,
}

impl Compass {
    pub const ALL: [Compass; 5] = [
        Compass::Stay,
        Compass::West,
        Compass::North,
        Compass::East,
        Compass::South,
    ];

    /// Position delta (columns, rows) of the move
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Self::Stay => (0, 0),
            Self::West => (-1, 0),
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stay => "stay",
            Self::West => "west",
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compass {
    type Err = String;

    /// Accepts full names and the x/a/w/d/s keys
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stay" | "x" => Ok(Self::Stay),
            "west" | "a" => Ok(Self::West),
            "north" | "w" => Ok(Self::North),
            "east" | "d" => Ok(Self::East),
            "south" | "s" => Ok(Self::South),
            other => Err(format!("Invalid direction: {}", other)),
        }
    }
}

/// Glens reachable from a flock's latest location, by compass direction.
///
/// Directions without an adjacent glen at that offset are left out.
pub fn manual_moves(state: &SimulationState, flock: FlockId) -> Vec<(Compass, PatchId)> {
    let Some(here) = state.flocks.get(flock).and_then(|f| f.location_history.last()) else {
        return Vec::new();
    };
    let Some(patch) = state.patches.get(*here) else {
        return Vec::new();
    };

    Compass::ALL
        .into_iter()
        .filter_map(|direction| {
            let (dx, dy) = direction.delta();
            let target = patch.position.offset(dx, dy);
            patch
                .neighbors
                .iter()
                .copied()
                .find(|&other| state.patches[other].position == target)
                .map(|other| (direction, other))
        })
        .collect()
}

/// Glen the flock would reach by moving in `direction`, if any
pub fn manual_move(state: &SimulationState, flock: FlockId, direction: Compass) -> Option<PatchId> {
    manual_moves(state, flock)
        .into_iter()
        .find(|(d, _)| *d == direction)
        .map(|(_, patch)| patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Parameters;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_state(start: PatchId) -> SimulationState {
        let params = Parameters {
            county_size: 3,
            topology: "grid".to_string(),
            num_flocks: 1,
            initial_flock_size: 1,
            num_turns: 0,
            ..Parameters::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = SimulationState::initialize(params, &mut rng).unwrap();
        state.flocks[0].location_history = vec![start];
        state
    }

    #[test]
    fn test_center_of_grid_has_all_moves() {
        let state = grid_state(4);
        let moves = manual_moves(&state, 0);
        assert_eq!(
            moves,
            vec![
                (Compass::Stay, 4),
                (Compass::West, 3),
                (Compass::North, 1),
                (Compass::East, 5),
                (Compass::South, 7),
            ]
        );
    }

    #[test]
    fn test_corner_of_grid() {
        let state = grid_state(0);
        assert_eq!(manual_move(&state, 0, Compass::West), None);
        assert_eq!(manual_move(&state, 0, Compass::North), None);
        assert_eq!(manual_move(&state, 0, Compass::East), Some(1));
        assert_eq!(manual_move(&state, 0, Compass::South), Some(3));
        assert_eq!(manual_move(&state, 0, Compass::Stay), Some(0));
    }

    #[test]
    fn test_unknown_flock_has_no_moves() {
        let state = grid_state(0);
        assert!(manual_moves(&state, 3).is_empty());
    }

    #[test]
    fn test_parse_keys_and_names() {
        assert_eq!("w".parse::<Compass>(), Ok(Compass::North));
        assert_eq!("x".parse::<Compass>(), Ok(Compass::Stay));
        assert_eq!("South".parse::<Compass>(), Ok(Compass::South));
        assert!("up".parse::<Compass>().is_err());
    }
}
