//! Defender patrol system: updates both roaming defenders each tick.
//!
//! Calls the defender FSM from battle-defender-ai to compute posture changes
//! and patrol targets, then moves the defenders along their columns.

use hecs::World;
use log::info;
use rand_chacha::ChaCha8Rng;

use battle_core::components::{DefenseToken, RoamingDefender};
use battle_core::constants::LANE_COUNT;
use battle_core::events::BattleEvent;
use battle_core::types::{BattleId, Position};

use battle_defender_ai::fsm::{
    evaluate_posture, lane_step, select_patrol_lane, PatrolContext, PostureContext,
};
use battle_defender_ai::profiles::get_profile;
use battle_defender_ai::threat::{prune, threat_levels};

use crate::grid::GridLayout;
use crate::side_state::SideState;

/// Surviving tokens per side and lane, counted from the world.
pub fn surviving_tokens(world: &World) -> [[u32; LANE_COUNT]; 2] {
    let mut counts = [[0; LANE_COUNT]; 2];
    for (_entity, token) in world.query::<&DefenseToken>().iter() {
        if token.alive {
            counts[token.key.side.index()][token.key.lane.index()] += 1;
        }
    }
    counts
}

/// Run the patrol system: posture check, patrol decision, movement.
pub fn run(
    world: &mut World,
    grid: &GridLayout,
    sides: &[SideState; 2],
    rng: &mut ChaCha8Rng,
    now_ms: u64,
    battle_id: BattleId,
    events: &mut Vec<BattleEvent>,
) {
    let surviving = surviving_tokens(world);

    for (_entity, (defender, pos)) in world.query_mut::<(&mut RoamingDefender, &mut Position)>() {
        if defender.is_destroyed() {
            continue;
        }
        let side = defender.side;
        prune(&mut defender.threats, now_ms);

        let update = evaluate_posture(&PostureContext {
            posture: defender.posture,
            castle_hp: sides[side.index()].castle_hp,
        });
        if update.posture_changed {
            defender.posture = update.new_posture;
            defender.hp += update.hp_bonus;
            defender.max_hp += update.hp_bonus;
            // Re-plan immediately with the new profile.
            defender.next_patrol_ms = now_ms;
            info!("{battle_id}: {side:?} defender enters guard posture ({} HP)", defender.hp);
            events.push(BattleEvent::DefenderGuardMode {
                side,
                hp: defender.hp,
            });
        }

        if now_ms >= defender.next_patrol_ms {
            let ctx = PatrolContext {
                posture: defender.posture,
                surviving_tokens: surviving[side.index()],
                threat_levels: threat_levels(&defender.threats, now_ms),
            };
            let decision = select_patrol_lane(&ctx, rng);
            defender.target_lane = decision.lane;
            defender.next_patrol_ms = now_ms + get_profile(defender.posture).patrol_interval_ms;
        }

        move_toward_lane(defender, pos, grid);
    }
}

fn move_toward_lane(defender: &mut RoamingDefender, pos: &mut Position, grid: &GridLayout) {
    let target_y = grid.lane_center_y(defender.target_lane);
    let step = lane_step(defender.posture, grid.config().cell_height);
    let dy = target_y - pos.y();
    let y = if dy.abs() <= step {
        target_y
    } else {
        pos.y() + step * dy.signum()
    };
    *pos = Position::new(pos.x(), y);
    defender.lane = grid.nearest_lane(y);
}
