//! Snapshot system: queries the battle world and builds a BattleSnapshot.
//!
//! Read-only: never modifies the world.

use hecs::World;

use battle_core::components::*;
use battle_core::constants::CASTLE_MAX_HP;
use battle_core::enums::GamePhase;
use battle_core::events::BattleEvent;
use battle_core::state::*;
use battle_core::types::{BattleId, Position, SimTime};

use crate::side_state::SideState;

/// Build a complete BattleSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    battle_id: BattleId,
    time: &SimTime,
    phase: GamePhase,
    scores: [u32; 2],
    sides: &[SideState; 2],
    events: Vec<BattleEvent>,
) -> BattleSnapshot {
    let now_ms = time.elapsed_ms();
    BattleSnapshot {
        battle_id,
        time: *time,
        phase,
        scores,
        castles: build_castles(sides),
        tokens: build_tokens(world),
        attacks: build_attacks(world),
        defenders: build_defenders(world, now_ms),
        events,
    }
}

fn build_castles(sides: &[SideState; 2]) -> Vec<CastleView> {
    sides
        .iter()
        .map(|s| CastleView {
            side: s.side,
            hp: s.castle_hp,
            max_hp: CASTLE_MAX_HP,
            defeated: s.defeated,
        })
        .collect()
}

/// All tokens, dead ones included, ordered by grid address.
fn build_tokens(world: &World) -> Vec<TokenView> {
    let mut tokens: Vec<TokenView> = world
        .query::<(&DefenseToken, &Position)>()
        .iter()
        .map(|(_, (token, pos))| TokenView {
            slot: token.key,
            position: *pos,
            hp: token.hp,
            capacity: token.capacity,
            alive: token.alive,
            energized: token.energized,
        })
        .collect();
    tokens.sort_by_key(|t| t.slot);
    tokens
}

/// Live attacks, ordered by id.
fn build_attacks(world: &World) -> Vec<AttackView> {
    let mut attacks: Vec<AttackView> = world
        .query::<(&Attack, &Position)>()
        .iter()
        .filter(|(_, (attack, _))| !attack.collided)
        .map(|(_, (attack, pos))| AttackView {
            attack_id: attack.id,
            side: attack.side,
            lane: attack.lane,
            position: *pos,
            volley: attack.volley,
        })
        .collect();
    attacks.sort_by_key(|a| a.attack_id);
    attacks
}

fn build_defenders(world: &World, now_ms: u64) -> Vec<DefenderView> {
    let mut defenders: Vec<DefenderView> = world
        .query::<(&RoamingDefender, &Position)>()
        .iter()
        .map(|(_, (defender, pos))| DefenderView {
            side: defender.side,
            position: *pos,
            lane: defender.lane,
            target_lane: defender.target_lane,
            hp: defender.hp,
            max_hp: defender.max_hp,
            posture: defender.posture,
            can_deflect: defender.can_deflect(now_ms),
        })
        .collect();
    defenders.sort_by_key(|d| d.side);
    defenders
}
