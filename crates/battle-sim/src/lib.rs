//! Simulation engine for Battle Bets.
//!
//! Each battle owns its own hecs world, advances at a fixed tick rate,
//! and produces `BattleSnapshot`s for whatever renders it.

pub mod allocation;
pub mod config;
pub mod engine;
pub mod grid;
pub mod modifiers;
pub mod observer;
pub mod registry;
pub mod side_state;
pub mod systems;
pub mod world_setup;

pub use battle_core as core;
pub use config::BattleConfig;
pub use engine::Battle;
pub use registry::BattleRegistry;
