//! Cleanup system: removes resolved attacks and destroyed defenders.

use hecs::{Entity, World};

use battle_core::components::{Attack, RoamingDefender};

/// Despawn attacks that have collided and defenders at 0 HP.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, attack) in world.query_mut::<&Attack>() {
        if attack.collided {
            despawn_buffer.push(entity);
        }
    }

    // Destroyed defenders do not respawn.
    for (entity, defender) in world.query_mut::<&RoamingDefender>() {
        if defender.is_destroyed() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
