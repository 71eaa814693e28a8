use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::{Sheep, SheepId};
use crate::config::{ConfigError, Parameters};
use crate::county::PatchId;
use crate::simulation::{SimulationError, SimulationState};
use crate::strategy::{Candidate, Strategy};
use crate::utils::validation::validate_parameters;

/// Settings resolved once per `advance` call, before anything is mutated.
struct TurnPlan {
    strategy: Strategy,
    growth_rate: f64,
    greed: f64,
    endurance: u32,
    reproduction_rate: f64,
    manual_override: Option<PatchId>,
}

impl TurnPlan {
    fn resolve(parameters: &Parameters, patch_count: usize) -> Result<Self, ConfigError> {
        validate_parameters(parameters)?;
        let strategy = Strategy::from_name(&parameters.strategy)?;
        if let Some(patch) = parameters.manual_override {
            if patch >= patch_count {
                return Err(ConfigError::UnknownPatch {
                    patch,
                    count: patch_count,
                });
            }
        }
        Ok(Self {
            strategy,
            growth_rate: parameters.glen_growth_rate,
            greed: parameters.sheep_greed,
            endurance: parameters.sheep_endurance,
            reproduction_rate: parameters.sheep_reproduction_rate,
            manual_override: parameters.manual_override,
        })
    }
}

impl SimulationState {
    /// Extend every timeline by `parameters.num_turns` turns.
    ///
    /// Configuration problems (unknown strategy, out-of-range values, an
    /// override glen that does not exist) are reported before any turn is
    /// applied, leaving the state untouched. A supplied manual override
    /// steers manual flocks on the first new turn only and is consumed.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SimulationError> {
        let plan = TurnPlan::resolve(&self.parameters, self.patches.len())?;
        self.check_invariants()?;

        let start = self.turns_elapsed();
        let turns = self.parameters.num_turns;
        for offset in 0..turns {
            let manual_override = if offset == 0 { plan.manual_override } else { None };
            self.step(start + offset, &plan, manual_override, rng);
        }
        self.parameters.manual_override = None;

        if turns > 0 {
            info!(
                "Advanced {} turns ({} -> {}): {} of {} sheep alive",
                turns,
                start,
                self.turns_elapsed(),
                self.living_sheep(self.turns_elapsed()),
                self.sheep.len()
            );
        }
        Ok(())
    }

    /// Advance from turn `turn` to `turn + 1`: forage, grow, then move.
    fn step<R: Rng + ?Sized>(
        &mut self,
        turn: usize,
        plan: &TurnPlan,
        manual_override: Option<PatchId>,
        rng: &mut R,
    ) {
        let newborns = self.forage(turn, plan, rng);
        let births = newborns.len();
        for lamb in newborns {
            let id = self.sheep.len();
            self.flocks[lamb.flock].sheep.push(id);
            self.sheep.push(lamb);
        }

        for patch in &mut self.patches {
            patch.regrow(plan.growth_rate);
        }

        self.move_flocks(turn, plan, manual_override, rng);

        debug!(
            "Turn {} -> {}: {} births, {} sheep alive",
            turn,
            turn + 1,
            births,
            self.living_sheep(turn + 1)
        );
    }

    /// Every sheep born by `turn` tries to eat, in shuffled order. Glen
    /// depletion is visible to the sheep that graze after it. Returns the
    /// lambs born for turn + 1, not yet attached to their flocks.
    fn forage<R: Rng + ?Sized>(&mut self, turn: usize, plan: &TurnPlan, rng: &mut R) -> Vec<Sheep> {
        let mut order: Vec<SheepId> = (0..self.sheep.len()).collect();
        order.shuffle(rng);

        let mut newborns = Vec::new();
        for id in order {
            let sheep = &mut self.sheep[id];
            let hunger = sheep.hunger_history[turn];
            let flock = sheep.flock;

            if Sheep::can_forage(hunger, plan.endurance) {
                let patch = &mut self.patches[self.flocks[flock].location_history[turn]];
                if rng.gen::<f64>() < patch.abundance {
                    patch.graze(plan.greed);
                    sheep.record_meal();
                    if rng.gen::<f64>() < plan.reproduction_rate {
                        newborns.push(Sheep::born(flock, turn + 1));
                    }
                    continue;
                }
            }
            // Missed a meal, or already dead: hunger keeps counting
            sheep.record_hunger(hunger);
        }
        newborns
    }

    /// Pick each flock's glen for turn + 1 from the post-growth abundances.
    fn move_flocks<R: Rng + ?Sized>(
        &mut self,
        turn: usize,
        plan: &TurnPlan,
        manual_override: Option<PatchId>,
        rng: &mut R,
    ) {
        let patches = &self.patches;
        for flock in &mut self.flocks {
            let here = flock.location_history[turn];
            let next = match manual_override {
                Some(target) if flock.manual => target,
                _ => {
                    let candidates: Vec<Candidate> = patches[here]
                        .neighbors
                        .iter()
                        .map(|&patch| Candidate {
                            patch,
                            abundance: patches[patch].abundance,
                        })
                        .collect();
                    plan.strategy.choose(&candidates, rng).unwrap_or(here)
                }
            };
            flock.move_to(next);
        }
    }
}
