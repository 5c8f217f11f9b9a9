//! Per-battle runtime configuration.

use serde::{Deserialize, Serialize};

use battle_core::constants::*;
use battle_core::enums::Lane;
use battle_core::error::{BattleError, Result};

use crate::grid::GridConfig;

/// How many stats of a lane make one attack. Stats that do not fill a whole
/// attack are carried over to the next event of the same side and lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    pub stats_per_attack: [u32; LANE_COUNT],
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            stats_per_attack: [1; LANE_COUNT],
        }
    }
}

impl SpawnPolicy {
    /// Attacks produced by `count` new stats, updating `carry`.
    pub fn attacks_for(&self, lane: Lane, count: u32, carry: &mut u32) -> u32 {
        let per_attack = self.stats_per_attack[lane.index()].max(1);
        let pool = carry.saturating_add(count);
        *carry = pool % per_attack;
        pool / per_attack
    }
}

/// Configuration for starting a new battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u64,
    /// Net units per unit of defensive capacity, applied to both sides.
    pub units_per_capacity: f64,
    /// Attack speed in grid cells per second before multipliers.
    pub attack_base_speed: f32,
    /// Ticks between attacks spawned by the same stat event.
    pub attack_stagger_ticks: u64,
    pub spawn_policy: SpawnPolicy,
    pub grid: GridConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            units_per_capacity: UNITS_PER_CAPACITY,
            attack_base_speed: ATTACK_BASE_SPEED,
            attack_stagger_ticks: ATTACK_STAGGER_TICKS,
            spawn_policy: SpawnPolicy::default(),
            grid: GridConfig::default(),
        }
    }
}

impl BattleConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.units_per_capacity.is_finite() || self.units_per_capacity <= 0.0 {
            return Err(BattleError::InvalidConfig("units per capacity must be positive"));
        }
        if !self.attack_base_speed.is_finite() || self.attack_base_speed <= 0.0 {
            return Err(BattleError::InvalidConfig("attack speed must be positive"));
        }
        if self.spawn_policy.stats_per_attack.contains(&0) {
            return Err(BattleError::InvalidConfig("stats per attack must be at least 1"));
        }
        if self.grid.slots_per_lane < LANE_TOKEN_CAP as usize {
            return Err(BattleError::AllocationExceedsGrid {
                count: LANE_TOKEN_CAP,
                capacity: self.grid.slots_per_lane,
            });
        }
        self.grid.validate()
    }
}
