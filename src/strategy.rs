//! Movement strategy library.
//!
//! A strategy maps the glens a flock could move to (its current glen first,
//! then the adjacent glens) to one chosen glen. Strategies are a closed set;
//! new ones are added as enum variants.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::county::PatchId;

/// Below this abundance a `FleeLowGrass` flock abandons its glen
pub const LOW_GRASS_THRESHOLD: f64 = 0.02;

/// A glen a flock may move to, with its abundance at decision time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub patch: PatchId,
    pub abundance: f64,
}

/// Rule a flock uses to pick its next glen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Uniform choice, staying put included
    Random,
    /// Most abundant glen, ties broken at random
    MaxAbundance,
    /// Random choice weighted by abundance
    Weighted,
    /// Stay until the current glen runs low, then wander to a neighbour
    FleeLowGrass,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Random,
        Strategy::MaxAbundance,
        Strategy::Weighted,
        Strategy::FleeLowGrass,
    ];

    /// Resolve a configured strategy name. Unknown names are an error.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == name.trim())
            .ok_or_else(|| ConfigError::UnknownStrategy(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::MaxAbundance => "maxAbundance",
            Self::Weighted => "weighted",
            Self::FleeLowGrass => "fleeLowGrass",
        }
    }

    /// Choose a glen from `candidates`, whose first entry is the flock's
    /// current glen. Returns `None` only when there are no candidates.
    pub fn choose<R: Rng + ?Sized>(&self, candidates: &[Candidate], rng: &mut R) -> Option<PatchId> {
        let chosen = match self {
            Self::Random => candidates.choose(rng),
            Self::MaxAbundance => choose_max_abundance(candidates, rng),
            Self::Weighted => choose_weighted(candidates, rng),
            Self::FleeLowGrass => choose_flee_low_grass(candidates, rng),
        };
        chosen.map(|candidate| candidate.patch)
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn choose_max_abundance<'a, R: Rng + ?Sized>(
    candidates: &'a [Candidate],
    rng: &mut R,
) -> Option<&'a Candidate> {
    let best = candidates
        .iter()
        .map(|candidate| candidate.abundance)
        .fold(f64::NEG_INFINITY, f64::max);
    let ties: Vec<&Candidate> = candidates
        .iter()
        .filter(|candidate| candidate.abundance == best)
        .collect();
    ties.choose(rng).copied()
}

fn choose_weighted<'a, R: Rng + ?Sized>(
    candidates: &'a [Candidate],
    rng: &mut R,
) -> Option<&'a Candidate> {
    let total: f64 = candidates.iter().map(|candidate| candidate.abundance).sum();
    if total <= 0.0 {
        return candidates.first();
    }

    let target = rng.gen::<f64>() * total;
    let mut running = 0.0;
    let mut last_weighted = None;
    for candidate in candidates {
        if candidate.abundance <= 0.0 {
            continue;
        }
        running += candidate.abundance;
        last_weighted = Some(candidate);
        if running >= target {
            return Some(candidate);
        }
    }
    // Rounding can leave the running total a hair short of the target
    last_weighted.or_else(|| candidates.first())
}

fn choose_flee_low_grass<'a, R: Rng + ?Sized>(
    candidates: &'a [Candidate],
    rng: &mut R,
) -> Option<&'a Candidate> {
    let (here, elsewhere) = candidates.split_first()?;
    if here.abundance >= LOW_GRASS_THRESHOLD || elsewhere.is_empty() {
        return Some(here);
    }
    elsewhere.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidates(abundances: &[f64]) -> Vec<Candidate> {
        abundances
            .iter()
            .enumerate()
            .map(|(patch, &abundance)| Candidate { patch, abundance })
            .collect()
    }

    #[test]
    fn test_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_name(strategy.name()), Ok(strategy));
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        assert_eq!(
            Strategy::from_name("teleport"),
            Err(ConfigError::UnknownStrategy("teleport".to_string()))
        );
        assert!(Strategy::from_name("").is_err());
        assert!(Strategy::from_name("MaxAbundance").is_err());
    }

    #[test]
    fn test_empty_candidates() {
        let mut rng = StdRng::seed_from_u64(0);
        for strategy in Strategy::ALL {
            assert_eq!(strategy.choose(&[], &mut rng), None);
        }
    }

    #[test]
    fn test_random_covers_every_candidate() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = candidates(&[0.1, 0.2, 0.3]);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let patch = Strategy::Random.choose(&options, &mut rng).unwrap();
            seen[patch] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_max_abundance_picks_best_and_breaks_ties() {
        let mut rng = StdRng::seed_from_u64(2);
        let options = candidates(&[0.2, 0.9, 0.5]);
        for _ in 0..20 {
            assert_eq!(Strategy::MaxAbundance.choose(&options, &mut rng), Some(1));
        }

        let tied = candidates(&[0.7, 0.1, 0.7]);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[Strategy::MaxAbundance.choose(&tied, &mut rng).unwrap()] = true;
        }
        assert_eq!(seen, [true, false, true]);
    }

    #[test]
    fn test_weighted_never_picks_barren_glen() {
        let mut rng = StdRng::seed_from_u64(3);
        let options = candidates(&[0.0, 0.5, 0.0, 0.25]);
        for _ in 0..500 {
            let patch = Strategy::Weighted.choose(&options, &mut rng).unwrap();
            assert!(patch == 1 || patch == 3);
        }
    }

    #[test]
    fn test_weighted_zero_total_falls_back_to_first() {
        let mut rng = StdRng::seed_from_u64(4);
        let options = candidates(&[0.0, 0.0, 0.0]);
        assert_eq!(Strategy::Weighted.choose(&options, &mut rng), Some(0));
    }

    #[test]
    fn test_weighted_prefers_abundant_glens() {
        let mut rng = StdRng::seed_from_u64(5);
        let options = candidates(&[0.1, 0.9]);
        let rich = (0..2000)
            .filter(|_| Strategy::Weighted.choose(&options, &mut rng) == Some(1))
            .count();
        assert!(rich > 1500, "rich glen chosen {} times", rich);
    }

    #[test]
    fn test_flee_low_grass() {
        let mut rng = StdRng::seed_from_u64(6);
        let lush = candidates(&[0.5, 1.0, 1.0]);
        assert_eq!(Strategy::FleeLowGrass.choose(&lush, &mut rng), Some(0));

        let barren = candidates(&[0.0, 0.0, 0.0]);
        for _ in 0..50 {
            assert_ne!(Strategy::FleeLowGrass.choose(&barren, &mut rng), Some(0));
        }

        let island = candidates(&[0.0]);
        assert_eq!(Strategy::FleeLowGrass.choose(&island, &mut rng), Some(0));
    }
}
