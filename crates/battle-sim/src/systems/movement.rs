//! Attack movement system.
//!
//! Moves every unresolved attack along its lane towards its target weapon
//! slot, never past it. Defender movement lives in `defender_patrol`.

use hecs::World;

use battle_core::components::Attack;
use battle_core::constants::DT;
use battle_core::types::Position;

/// Advance all attacks by one tick.
pub fn run(world: &mut World) {
    for (_entity, (attack, pos)) in world.query_mut::<(&mut Attack, &mut Position)>() {
        if attack.collided {
            continue;
        }
        attack.last_position = *pos;

        let step = attack.pixel_speed() * DT as f32;
        let direction = attack.side.attack_direction();
        let mut x = pos.x() + direction * step;
        // Clamp at the target so the terminal check sees an exact arrival.
        if direction > 0.0 {
            x = x.min(attack.target.x());
        } else {
            x = x.max(attack.target.x());
        }
        *pos = Position::new(x, attack.target.y());
    }
}

/// Whether the attack has arrived at its target weapon slot.
pub fn at_target(attack: &Attack, pos: &Position) -> bool {
    if attack.side.attack_direction() > 0.0 {
        pos.x() >= attack.target.x()
    } else {
        pos.x() <= attack.target.x()
    }
}
