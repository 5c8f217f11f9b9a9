//! Error taxonomy for battle setup and control.
//!
//! Invariant violations inside a running battle (double damage, double
//! resolution) are not errors: they are logged and ignored by the systems.

use thiserror::Error;

use crate::enums::{GamePhase, Side};
use crate::types::BattleId;

pub type Result<T> = std::result::Result<T, BattleError>;

#[derive(Debug, Error, PartialEq)]
pub enum BattleError {
    // --- Configuration ---
    #[error("{side:?} side has no team")]
    MissingTeam { side: Side },
    #[error("team {team_id} is on both sides")]
    SameTeamBothSides { team_id: String },
    #[error("{side:?} capper equips {count} modifiers, at most 3 allowed")]
    TooManyModifiers { side: Side, count: usize },
    #[error("{side:?} unit record is not a finite number: {units}")]
    InvalidUnitRecord { side: Side, units: f64 },
    #[error("lane allocation of {count} tokens exceeds grid capacity {capacity}")]
    AllocationExceedsGrid { count: u32, capacity: usize },
    #[error("slot {slot} out of range, lane capacity is {capacity}")]
    SlotOutOfRange { slot: usize, capacity: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    // --- Lookup ---
    #[error("unknown battle {0}")]
    UnknownBattle(BattleId),
    #[error("battle {0} already exists")]
    DuplicateBattle(BattleId),

    // --- Control ---
    #[error("cannot move from {from:?} to {to:?}")]
    InvalidPhaseTransition { from: GamePhase, to: GamePhase },
    #[error("battle is not live (phase {phase:?})")]
    BattleNotLive { phase: GamePhase },
    #[error("speed multiplier must be positive and finite, got {0}")]
    InvalidSpeedMultiplier(f32),
    #[error("stat event would schedule {count} attacks, limit is {max}")]
    TooManyAttacks { count: u32, max: u32 },
}
