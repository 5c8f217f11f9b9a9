//! Registry of live battles, keyed by battle id.
//!
//! Battles never share state; the registry only owns them and routes
//! commands and ticks.

use std::collections::BTreeMap;

use log::info;

use battle_core::commands::BattleCommand;
use battle_core::error::{BattleError, Result};
use battle_core::roster::Game;
use battle_core::state::BattleSnapshot;
use battle_core::types::BattleId;

use crate::config::BattleConfig;
use crate::engine::Battle;

#[derive(Default)]
pub struct BattleRegistry {
    battles: BTreeMap<BattleId, Battle>,
    next_id: u64,
}

impl BattleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a battle for `game` under a fresh id.
    pub fn create_battle(&mut self, game: Game, config: BattleConfig) -> Result<BattleId> {
        let id = BattleId(self.next_id);
        let battle = Battle::new(id, game, config)?;
        self.next_id += 1;
        self.battles.insert(id, battle);
        Ok(id)
    }

    /// Register an already constructed battle. Ids must be unique.
    pub fn insert_battle(&mut self, battle: Battle) -> Result<BattleId> {
        let id = battle.id();
        if self.battles.contains_key(&id) {
            return Err(BattleError::DuplicateBattle(id));
        }
        self.next_id = self.next_id.max(id.0 + 1);
        self.battles.insert(id, battle);
        Ok(id)
    }

    pub fn battle(&self, id: BattleId) -> Result<&Battle> {
        self.battles.get(&id).ok_or(BattleError::UnknownBattle(id))
    }

    pub fn battle_mut(&mut self, id: BattleId) -> Result<&mut Battle> {
        self.battles.get_mut(&id).ok_or(BattleError::UnknownBattle(id))
    }

    /// Queue a command for the battle's next tick.
    pub fn queue_command(&mut self, id: BattleId, command: BattleCommand) -> Result<()> {
        self.battle_mut(id)?.queue_command(command);
        Ok(())
    }

    /// Apply a command to one battle immediately.
    pub fn apply(&mut self, id: BattleId, command: BattleCommand) -> Result<()> {
        self.battle_mut(id)?.apply(command)
    }

    pub fn tick(&mut self, id: BattleId) -> Result<BattleSnapshot> {
        Ok(self.battle_mut(id)?.tick())
    }

    /// Tick every battle once, in id order.
    pub fn tick_all(&mut self) -> Vec<BattleSnapshot> {
        self.battles.values_mut().map(Battle::tick).collect()
    }

    /// Drop a battle from the registry, returning its final snapshot.
    pub fn end_battle(&mut self, id: BattleId) -> Result<BattleSnapshot> {
        let battle = self
            .battles
            .remove(&id)
            .ok_or(BattleError::UnknownBattle(id))?;
        let snapshot = battle.end();
        info!("{id}: ended at tick {}", snapshot.time.tick);
        Ok(snapshot)
    }

    pub fn reset_battle(&mut self, id: BattleId) -> Result<()> {
        self.battle_mut(id)?.reset()
    }

    pub fn ids(&self) -> impl Iterator<Item = BattleId> + '_ {
        self.battles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.battles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }
}
