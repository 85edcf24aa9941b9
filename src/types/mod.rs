//! Core domain types for vents.
//!
//! - `Team` - the two sides a spawn can belong to
//! - `Position` - a point in world space
//! - `SpawnSet` - ordered spawn positions per team

mod spawn;

pub use spawn::{Position, SpawnSet, Team};
