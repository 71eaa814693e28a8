//! Simulation state and its two entry points.
//!
//! [`SimulationState::initialize`] builds a county and pre-renders the first
//! `num_turns` turns; [`SimulationState::advance`] extends every timeline by
//! another `num_turns`. Both take the random number generator explicitly so
//! seeded runs are reproducible.
//!
//! Every history (glen abundance, flock location, sheep hunger) always has
//! exactly `turns_elapsed() + 1` entries.

mod advance;
mod initialize;

use serde::{Deserialize, Serialize};

use crate::agent::{Flock, FlockId, Sheep, SheepId};
use crate::config::{ConfigError, Parameters};
use crate::county::{Patch, PatchId};

/// Errors raised by the simulation core
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Simulation invariant violated: {0}")]
    InvariantViolation(String),
}

/// Aggregate root of a grazing simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Display-only pointer into the timelines; never read by the simulation
    pub turn_shown: usize,
    pub parameters: Parameters,
    pub patches: Vec<Patch>,
    pub flocks: Vec<Flock>,
    /// Every sheep ever born, in birth order
    pub sheep: Vec<Sheep>,
}

impl SimulationState {
    /// Number of turns simulated so far
    pub fn turns_elapsed(&self) -> usize {
        self.patches
            .first()
            .map(|patch| patch.abundance_history.len().saturating_sub(1))
            .unwrap_or(0)
    }

    /// Move the display pointer, clamped to the simulated range
    pub fn show_turn(&mut self, turn: usize) -> usize {
        self.turn_shown = turn.min(self.turns_elapsed());
        self.turn_shown
    }

    /// Mark a flock as manually steered (or hand it back to its strategy)
    pub fn set_manual(&mut self, flock: FlockId, manual: bool) -> Result<(), ConfigError> {
        let count = self.flocks.len();
        let target = self
            .flocks
            .get_mut(flock)
            .ok_or(ConfigError::UnknownFlock { flock, count })?;
        target.manual = manual;
        Ok(())
    }

    /// Glen a flock occupies on `turn`
    pub fn flock_location(&self, flock: FlockId, turn: usize) -> Option<PatchId> {
        self.flocks.get(flock)?.location_at(turn)
    }

    /// Sheep of a flock, in birth order
    pub fn flock_members(&self, flock: FlockId) -> impl Iterator<Item = &Sheep> + '_ {
        self.flocks
            .get(flock)
            .into_iter()
            .flat_map(|f| f.sheep.iter())
            .filter_map(|&id: &SheepId| self.sheep.get(id))
    }

    /// Sheep alive on `turn`
    pub fn living_sheep(&self, turn: usize) -> usize {
        let endurance = self.parameters.sheep_endurance;
        self.sheep
            .iter()
            .filter(|sheep| sheep.is_alive_at(turn, endurance))
            .count()
    }

    /// Check the structural invariants every call must preserve.
    ///
    /// Violations indicate a bug or a hand-edited state, never a bad
    /// configuration.
    pub fn check_invariants(&self) -> Result<(), SimulationError> {
        let expected = self.turns_elapsed() + 1;
        let violation = |message: String| Err(SimulationError::InvariantViolation(message));

        for (id, patch) in self.patches.iter().enumerate() {
            if patch.abundance_history.len() != expected {
                return violation(format!(
                    "glen {} has {} abundance entries, expected {}",
                    id,
                    patch.abundance_history.len(),
                    expected
                ));
            }
            if !(0.0..=1.0).contains(&patch.abundance)
                || patch.abundance_history.iter().any(|a| !(0.0..=1.0).contains(a))
            {
                return violation(format!("glen {} has abundance outside [0, 1]", id));
            }
            if !patch.neighbors.contains(&id) {
                return violation(format!("glen {} does not list itself as a neighbour", id));
            }
            for &other in &patch.neighbors {
                let symmetric = self
                    .patches
                    .get(other)
                    .is_some_and(|o| o.neighbors.contains(&id));
                if !symmetric {
                    return violation(format!("glen {} links to {} one-way", id, other));
                }
            }
        }

        let mut listed = vec![false; self.sheep.len()];
        for (id, flock) in self.flocks.iter().enumerate() {
            if flock.location_history.len() != expected {
                return violation(format!(
                    "flock {} has {} locations, expected {}",
                    id,
                    flock.location_history.len(),
                    expected
                ));
            }
            if let Some(&bad) = flock.location_history.iter().find(|&&p| p >= self.patches.len()) {
                return violation(format!("flock {} visits nonexistent glen {}", id, bad));
            }
            for &member in &flock.sheep {
                if self.sheep.get(member).map(|s| s.flock) != Some(id) {
                    return violation(format!("flock {} lists sheep {} it does not own", id, member));
                }
                if std::mem::replace(&mut listed[member], true) {
                    return violation(format!("flock {} lists sheep {} twice", id, member));
                }
            }
        }

        for (id, sheep) in self.sheep.iter().enumerate() {
            if sheep.hunger_history.len() != expected {
                return violation(format!(
                    "sheep {} has {} hunger entries, expected {}",
                    id,
                    sheep.hunger_history.len(),
                    expected
                ));
            }
            // Every listing was checked against its owner above
            if !listed[id] {
                return violation(format!(
                    "sheep {} references flock {} that does not hold it",
                    id, sheep.flock
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_state() -> SimulationState {
        let params = Parameters {
            county_size: 3,
            num_flocks: 2,
            initial_flock_size: 3,
            num_turns: 4,
            ..Parameters::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        SimulationState::initialize(params, &mut rng).unwrap()
    }

    #[test]
    fn test_show_turn_is_clamped() {
        let mut state = small_state();
        assert_eq!(state.turn_shown, 0);
        assert_eq!(state.show_turn(2), 2);
        assert_eq!(state.show_turn(99), 4);
    }

    #[test]
    fn test_set_manual_unknown_flock() {
        let mut state = small_state();
        assert!(state.set_manual(1, true).is_ok());
        assert!(state.flocks[1].manual);
        assert_eq!(
            state.set_manual(5, true),
            Err(ConfigError::UnknownFlock { flock: 5, count: 2 })
        );
    }

    #[test]
    fn test_flock_members_follow_ownership() {
        let state = small_state();
        for flock in 0..state.flocks.len() {
            assert!(state.flock_members(flock).all(|sheep| sheep.flock == flock));
            assert!(state.flock_members(flock).count() >= 3);
        }
        assert_eq!(state.flock_members(42).count(), 0);
    }

    #[test]
    fn test_invariant_check_catches_corruption() {
        let mut state = small_state();
        assert!(state.check_invariants().is_ok());

        let mut short = state.clone();
        short.sheep[0].hunger_history.pop();
        assert!(matches!(
            short.check_invariants(),
            Err(SimulationError::InvariantViolation(_))
        ));

        let mut overgrown = state.clone();
        overgrown.patches[0].abundance = 1.5;
        assert!(overgrown.check_invariants().is_err());

        let mut doubled = state.clone();
        let member = doubled.flocks[0].sheep[0];
        doubled.flocks[0].sheep.push(member);
        assert!(doubled.check_invariants().is_err());

        let mut orphaned = state.clone();
        orphaned.flocks[1].sheep.clear();
        assert!(orphaned.check_invariants().is_err());

        state.sheep[0].flock = 99;
        assert!(state.check_invariants().is_err());
    }
}
