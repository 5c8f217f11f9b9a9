//! ECS components for hecs entities.
//!
//! Components are plain data. The only logic here is the state transitions
//! that must happen atomically with the data they guard: token death and
//! defender deflect/damage resolution.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::{Position, SlotKey};

/// Result of applying damage to a defense token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenDamage {
    /// HP reduced, token still alive.
    Absorbed { hp: u8 },
    /// This call drove HP to zero.
    Destroyed,
    /// Token was already dead; nothing changed.
    AlreadyDead,
}

/// A discrete defensive unit occupying one grid slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseToken {
    pub key: SlotKey,
    pub hp: u8,
    pub capacity: u8,
    pub alive: bool,
    /// Token sits in its capper's bonus lane.
    pub energized: bool,
}

impl DefenseToken {
    pub fn new(key: SlotKey, capacity: u8, energized: bool) -> Self {
        Self {
            key,
            hp: capacity,
            capacity,
            alive: capacity > 0,
            energized,
        }
    }

    /// Apply damage. HP is clamped to `[0, capacity]` and `alive` drops in
    /// the same call that reaches zero.
    pub fn take_damage(&mut self, amount: u32) -> TokenDamage {
        if !self.alive {
            return TokenDamage::AlreadyDead;
        }
        let amount = amount.min(self.capacity as u32) as u8;
        self.hp = self.hp.saturating_sub(amount).min(self.capacity);
        if self.hp == 0 {
            self.alive = false;
            TokenDamage::Destroyed
        } else {
            TokenDamage::Absorbed { hp: self.hp }
        }
    }
}

/// A projectile travelling from one castle towards the other along a lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attack {
    pub id: u32,
    /// Side that fired the attack.
    pub side: Side,
    pub lane: Lane,
    pub start: Position,
    /// Opposing castle's weapon slot in the same lane.
    pub target: Position,
    /// Position before the latest movement step; with the current position
    /// it forms the swept segment used for defender interception.
    pub last_position: Position,
    /// Grid cells per second.
    pub base_speed: f32,
    pub speed_multiplier: f32,
    pub damage: u32,
    pub collided: bool,
    pub collided_with: CollisionTarget,
    /// Spawned by a counter-volley rather than a stat event.
    pub volley: bool,
}

impl Attack {
    /// Effective speed in pixels per second.
    pub fn pixel_speed(&self) -> f32 {
        self.base_speed * self.speed_multiplier * CELL_WIDTH
    }

    /// Side being attacked.
    pub fn target_side(&self) -> Side {
        self.side.opponent()
    }

    /// Record the collision. Returns false when the attack had already
    /// collided, in which case nothing changes.
    pub fn mark_collided(&mut self, with: CollisionTarget) -> bool {
        if self.collided {
            return false;
        }
        self.collided = true;
        self.collided_with = with;
        true
    }
}

/// Outcome of a roaming defender intercepting an attack. The attack is
/// destroyed in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitResolution {
    pub deflected: bool,
    /// The defender reached 0 HP on this hit.
    pub destroyed: bool,
}

/// Recent attack detections per lane, as simulation timestamps (ms).
/// Decay is evaluated by the defender AI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatMap {
    pub detections: [Vec<u64>; LANE_COUNT],
}

/// A defender patrolling its side's lanes, one per side per battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoamingDefender {
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    /// Lane nearest to the defender's current position.
    pub lane: Lane,
    /// Lane the defender is moving towards.
    pub target_lane: Lane,
    pub posture: DefenderPosture,
    /// Time of the last deflect (ms), `None` if it never deflected.
    pub last_deflect_ms: Option<u64>,
    /// Time of the next patrol decision (ms).
    pub next_patrol_ms: u64,
    pub threats: ThreatMap,
}

impl RoamingDefender {
    pub fn new(side: Side, lane: Lane) -> Self {
        Self {
            side,
            hp: DEFENDER_MAX_HP,
            max_hp: DEFENDER_MAX_HP,
            lane,
            target_lane: lane,
            posture: DefenderPosture::Patrol,
            last_deflect_ms: None,
            next_patrol_ms: 0,
            threats: ThreatMap::default(),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp == 0
    }

    /// True iff the deflect cooldown has elapsed.
    pub fn can_deflect(&self, now_ms: u64) -> bool {
        match self.last_deflect_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= DEFENDER_DEFLECT_COOLDOWN_MS,
        }
    }

    /// Resolve an intercepted attack: deflect if off cooldown, otherwise
    /// take one damage.
    pub fn resolve_hit(&mut self, now_ms: u64) -> HitResolution {
        if self.can_deflect(now_ms) {
            self.last_deflect_ms = Some(now_ms);
            return HitResolution {
                deflected: true,
                destroyed: false,
            };
        }
        self.hp = self.hp.saturating_sub(1);
        HitResolution {
            deflected: false,
            destroyed: self.hp == 0,
        }
    }
}
