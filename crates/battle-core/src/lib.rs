//! Core types and definitions for the Battle Bets simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! roster data, components, commands, state snapshots, events, constants
//! and the error taxonomy. It has no dependency on any rendering or
//! persistence layer.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod roster;
pub mod state;
pub mod types;

pub use error::{BattleError, Result};

#[cfg(test)]
mod tests;
