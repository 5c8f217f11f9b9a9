//! Per-battle collision observer.
//!
//! Keeps a bounded history of collision outcomes for debugging overlays.
//! Each `Battle` owns exactly one; nothing here is process-wide.

use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use battle_core::constants::COLLISION_LOG_CAPACITY;
use battle_core::enums::{CollisionOutcome, Lane, Side};
use battle_core::types::{BattleId, Position};

/// One resolved collision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionRecord {
    pub tick: u64,
    pub attack_id: u32,
    /// Side that fired the attack.
    pub side: Side,
    pub lane: Lane,
    pub outcome: CollisionOutcome,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct CollisionLog {
    battle_id: BattleId,
    records: VecDeque<CollisionRecord>,
    capacity: usize,
    total: u64,
}

impl CollisionLog {
    pub fn new(battle_id: BattleId) -> Self {
        Self::with_capacity(battle_id, COLLISION_LOG_CAPACITY)
    }

    pub fn with_capacity(battle_id: BattleId, capacity: usize) -> Self {
        Self {
            battle_id,
            records: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    pub fn record(&mut self, record: CollisionRecord) {
        debug!(
            "{}: tick {} attack {} ({:?} {:?}) -> {:?}",
            self.battle_id, record.tick, record.attack_id, record.side, record.lane, record.outcome
        );
        self.total += 1;
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &CollisionRecord> {
        self.records.iter()
    }

    /// Retained records with the given outcome.
    pub fn count(&self, outcome: CollisionOutcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Collisions recorded since the battle started, including evicted ones.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
