//! Entity spawn factories for setting up a battle world.
//!
//! Creates defense tokens from lane allocations, the roaming defender pair,
//! and attack entities with their component bundles.

use hecs::World;

use battle_core::components::*;
use battle_core::constants::*;
use battle_core::enums::*;
use battle_core::error::{BattleError, Result};
use battle_core::types::{Position, SlotKey};

use crate::allocation::LaneAllocation;
use crate::grid::GridLayout;
use crate::side_state::SideState;

/// Lane a defender starts on: the middle row.
const DEFENDER_START_LANE: Lane = Lane::Assists;

/// Check an allocation against the grid before anything is spawned.
pub fn check_allocation(grid: &GridLayout, allocation: &LaneAllocation) -> Result<()> {
    for &count in allocation {
        if count as usize > grid.slots_per_lane() {
            return Err(BattleError::AllocationExceedsGrid {
                count,
                capacity: grid.slots_per_lane(),
            });
        }
    }
    Ok(())
}

/// Slot of the `nth` token of a lane. Both fields fill from their castle
/// towards the centre; right-side slots are numbered from the centre out.
fn fill_slot(grid: &GridLayout, side: Side, nth: usize) -> usize {
    match side {
        Side::Left => nth,
        Side::Right => grid.slots_per_lane() - 1 - nth,
    }
}

/// Spawn one side's defense tokens, castle side first.
/// Returns the number of tokens spawned.
pub fn spawn_defense(world: &mut World, grid: &GridLayout, state: &SideState) -> Result<u32> {
    check_allocation(grid, &state.allocation)?;
    let capacity = state.token_capacity();
    let mut spawned = 0;
    for lane in Lane::ALL {
        let energized = state.bonus_lane == Some(lane);
        for nth in 0..state.allocation[lane.index()] as usize {
            let slot = fill_slot(grid, state.side, nth);
            let position = grid.cell_position(lane, state.side, slot)?;
            let key = SlotKey {
                side: state.side,
                lane,
                slot,
            };
            world.spawn((DefenseToken::new(key, capacity, energized), position));
            spawned += 1;
        }
    }
    Ok(spawned)
}

/// Spawn a side's roaming defender on its patrol column.
pub fn spawn_defender(world: &mut World, grid: &GridLayout, side: Side) -> hecs::Entity {
    let position = Position::new(
        grid.defender_column_x(side),
        grid.lane_center_y(DEFENDER_START_LANE),
    );
    world.spawn((RoamingDefender::new(side, DEFENDER_START_LANE), position))
}

/// Parameters of a new attack.
pub struct AttackSpec {
    pub id: u32,
    pub side: Side,
    pub lane: Lane,
    pub base_speed: f32,
    pub speed_multiplier: f32,
    pub volley: bool,
}

/// Spawn an attack at its side's weapon slot, aimed at the opposing
/// weapon slot of the same lane.
pub fn spawn_attack(world: &mut World, grid: &GridLayout, spec: AttackSpec) -> hecs::Entity {
    let start = grid.weapon_slot(spec.lane, spec.side);
    let target = grid.weapon_slot(spec.lane, spec.side.opponent());
    let attack = Attack {
        id: spec.id,
        side: spec.side,
        lane: spec.lane,
        start,
        target,
        last_position: start,
        base_speed: spec.base_speed,
        speed_multiplier: spec.speed_multiplier,
        damage: ATTACK_DAMAGE,
        collided: false,
        collided_with: CollisionTarget::None,
        volley: spec.volley,
    };
    world.spawn((attack, start))
}
