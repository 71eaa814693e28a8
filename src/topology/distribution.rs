//! Flock distribution across the county.
//!
//! Each flock starts on a glen chosen uniformly at random. Several flocks
//! may share a starting glen.

use log::{debug, info, warn};
use rand::Rng;

use crate::county::PatchId;

/// Choose a starting glen for each flock.
///
/// # Arguments
///
/// * `flock_count` - Number of flocks to place
/// * `glen_count` - Number of glens in the county
/// * `rng` - Randomness source
///
/// # Returns
///
/// * One glen index per flock, or an empty vector when the county is empty
pub fn place_flocks<R: Rng + ?Sized>(
    flock_count: usize,
    glen_count: usize,
    rng: &mut R,
) -> Vec<PatchId> {
    if glen_count == 0 {
        if flock_count > 0 {
            warn!("No glens available to place {} flocks", flock_count);
        }
        return Vec::new();
    }

    info!("Placing {} flocks across {} glens", flock_count, glen_count);
    (0..flock_count)
        .map(|flock| {
            let glen = rng.gen_range(0..glen_count);
            debug!("Flock {} starts in glen {}", flock, glen);
            glen
        })
        .collect()
}
