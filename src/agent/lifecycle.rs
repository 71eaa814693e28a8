//! Sheep and flock lifecycle: birth, feeding, starvation, and movement
//! records.
//!
//! Every method here appends to a history; nothing is ever removed. A dead
//! sheep keeps getting hungrier so its timeline stays as long as everyone
//! else's.

use crate::agent::types::{Flock, FlockId, Sheep, SheepStatus, FED, UNBORN};
use crate::county::PatchId;

impl Sheep {
    /// A sheep born into `flock` on `turn_born`. Earlier turns are back-filled
    /// as unborn so the hunger timeline lines up with every other history.
    pub fn born(flock: FlockId, turn_born: usize) -> Self {
        let mut hunger_history = vec![UNBORN; turn_born];
        hunger_history.push(FED);
        Self {
            flock,
            hunger_history,
        }
    }

    /// Hunger recorded for `turn`
    pub fn hunger_at(&self, turn: usize) -> Option<i32> {
        self.hunger_history.get(turn).copied()
    }

    /// Turn on which the sheep was born
    pub fn turn_born(&self) -> usize {
        self.hunger_history
            .iter()
            .take_while(|&&hunger| hunger == UNBORN)
            .count()
    }

    /// Whether a sheep at `hunger` can still forage
    pub fn can_forage(hunger: i32, endurance: u32) -> bool {
        (FED..=endurance_as_hunger(endurance)).contains(&hunger)
    }

    /// Record a successful meal for the next turn
    pub fn record_meal(&mut self) {
        self.hunger_history.push(FED);
    }

    /// Record an unfed turn following a turn at `hunger`
    pub fn record_hunger(&mut self, hunger: i32) {
        self.hunger_history.push(hunger.saturating_add(1));
    }

    /// Interpret the hunger entry for `turn`
    pub fn status_at(&self, turn: usize, endurance: u32) -> Option<SheepStatus> {
        let hunger = self.hunger_at(turn)?;
        Some(if hunger < FED {
            SheepStatus::Unborn
        } else if hunger == FED {
            SheepStatus::Fed
        } else if hunger <= endurance_as_hunger(endurance) {
            SheepStatus::Hungry(hunger as u32)
        } else {
            SheepStatus::Dead
        })
    }

    pub fn is_alive_at(&self, turn: usize, endurance: u32) -> bool {
        self.status_at(turn, endurance)
            .is_some_and(|status| status.is_alive())
    }
}

fn endurance_as_hunger(endurance: u32) -> i32 {
    i32::try_from(endurance).unwrap_or(i32::MAX)
}

impl Flock {
    /// A flock with no sheep yet, standing on `start`
    pub fn new(start: PatchId) -> Self {
        Self {
            sheep: Vec::new(),
            location_history: vec![start],
            manual: false,
        }
    }

    /// Glen occupied on `turn`
    pub fn location_at(&self, turn: usize) -> Option<PatchId> {
        self.location_history.get(turn).copied()
    }

    /// Record the glen for the next turn
    pub fn move_to(&mut self, patch: PatchId) {
        self.location_history.push(patch);
    }
}
