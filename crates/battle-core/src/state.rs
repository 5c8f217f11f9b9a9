//! Battle state snapshot: the complete visible state handed to the renderer
//! after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::BattleEvent;
use crate::types::{BattleId, Position, SimTime, SlotKey};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub battle_id: BattleId,
    pub time: SimTime,
    pub phase: GamePhase,
    /// Indexed by `Side::index`.
    pub scores: [u32; 2],
    pub castles: Vec<CastleView>,
    pub tokens: Vec<TokenView>,
    pub attacks: Vec<AttackView>,
    pub defenders: Vec<DefenderView>,
    pub events: Vec<BattleEvent>,
}

impl BattleSnapshot {
    pub fn castle(&self, side: Side) -> Option<&CastleView> {
        self.castles.iter().find(|c| c.side == side)
    }

    /// Living tokens of `side` in `lane`.
    pub fn alive_tokens(&self, side: Side, lane: Lane) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.slot.side == side && t.slot.lane == lane && t.alive)
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastleView {
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    pub defeated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenView {
    pub slot: SlotKey,
    pub position: Position,
    pub hp: u8,
    pub capacity: u8,
    pub alive: bool,
    pub energized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackView {
    pub attack_id: u32,
    pub side: Side,
    pub lane: Lane,
    pub position: Position,
    pub volley: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenderView {
    pub side: Side,
    pub position: Position,
    pub lane: Lane,
    pub target_lane: Lane,
    pub hp: u32,
    pub max_hp: u32,
    pub posture: DefenderPosture,
    pub can_deflect: bool,
}
