//! Systems that operate on a battle world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only) plus the pieces of battle state they need. They do not own
//! state.

pub mod cleanup;
pub mod defender_patrol;
pub mod movement;
pub mod resolver;
pub mod snapshot;
pub mod spawner;
