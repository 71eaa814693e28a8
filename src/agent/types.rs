//! Agent type definitions: sheep, flocks, and per-turn sheep status.
//!
//! Flocks own their sheep by index into the flattened sheep arena; a sheep
//! only keeps a non-owning index back to its flock.

use serde::{Deserialize, Serialize};

use crate::county::PatchId;

/// Stable index of a flock in `SimulationState::flocks`
pub type FlockId = usize;

/// Stable index of a sheep in `SimulationState::sheep`
pub type SheepId = usize;

/// Hunger entry for turns before a sheep was born
pub const UNBORN: i32 = -1;

/// Hunger entry for a turn in which the sheep ate
pub const FED: i32 = 0;

/// An individual grazer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheep {
    /// Flock this sheep belongs to (lookup only)
    pub flock: FlockId,
    /// Hunger per turn: -1 unborn, 0 fed, n > 0 consecutive unfed turns
    pub hunger_history: Vec<i32>,
}

/// A group of sheep that shares one glen per turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flock {
    /// Members in birth order; never shrinks
    pub sheep: Vec<SheepId>,
    /// Glen occupied on each turn, index 0 = starting glen
    pub location_history: Vec<PatchId>,
    /// Whether the flock follows the manual override instead of its strategy
    pub manual: bool,
}

/// What a sheep's hunger entry means for a given turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheepStatus {
    /// Not yet born on that turn
    Unborn,
    /// Ate on that turn
    Fed,
    /// Alive, with this many consecutive unfed turns
    Hungry(u32),
    /// Hunger exceeded endurance; kept for the record
    Dead,
}

impl SheepStatus {
    /// Returns true for `Fed` and `Hungry`
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Fed | Self::Hungry(_))
    }
}
