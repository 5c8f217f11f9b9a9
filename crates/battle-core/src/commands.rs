//! Commands sent by the ingestion layer to a battle.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All external inputs a battle accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleCommand {
    /// Move the game status forward. Backward moves are rejected.
    AdvancePhase { to: GamePhase },
    /// A stat was recorded for `side` in `lane` during `phase`.
    StatEvent {
        side: Side,
        lane: Lane,
        count: u32,
        phase: GamePhase,
    },
    /// Override the attack speed multiplier for future attacks of a side.
    SetSpeedMultiplier { side: Side, multiplier: f32 },
    /// Damage a castle directly (e.g. a spread-based penalty).
    DamageCastle { side: Side, amount: u32 },
    /// Tear down all entities and rebuild the battle from its game definition.
    Reset,
}
