//! Sheep and flocks: types, lifecycle bookkeeping, and manual steering.

pub mod types;
pub mod lifecycle;
pub mod shepherd;

pub use types::{Flock, FlockId, Sheep, SheepId, SheepStatus, FED, UNBORN};
pub use shepherd::{manual_move, manual_moves, Compass};
