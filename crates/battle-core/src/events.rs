//! Events emitted by the simulation for the rendering collaborator.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::SlotKey;

/// Discrete state changes raised during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleEvent {
    AttackSpawned {
        attack_id: u32,
        side: Side,
        lane: Lane,
        volley: bool,
    },
    TokenDamaged { slot: SlotKey, hp: u8 },
    TokenDestroyed { slot: SlotKey },
    /// Every token of `side` in `lane` is gone.
    LaneCleared { side: Side, lane: Lane },
    /// `side` answered a cleared lane with one attack from every lane.
    CounterVolley { side: Side, cleared_lane: Lane },
    DefenderDeflected { side: Side, lane: Lane, attack_id: u32 },
    DefenderDamaged { side: Side, hp: u32 },
    DefenderDestroyed { side: Side },
    DefenderGuardMode { side: Side, hp: u32 },
    CastleDamaged { side: Side, hp: u32 },
    /// Attack reached an already-defeated castle.
    AttackMissed { attack_id: u32, side: Side, lane: Lane },
    SideDefeated { side: Side },
    PhaseTransition { from: GamePhase, to: GamePhase },
}
