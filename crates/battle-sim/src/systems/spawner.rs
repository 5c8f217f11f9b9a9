//! Attack spawning system: turns scheduled stat attacks and counter-volleys
//! into attack entities.

use hecs::World;

use battle_core::components::RoamingDefender;
use battle_core::enums::{Lane, Side};
use battle_core::events::BattleEvent;

use battle_defender_ai::threat::record_detection;

use crate::grid::GridLayout;
use crate::side_state::SideState;
use crate::world_setup::{spawn_attack, AttackSpec};

/// An attack waiting for its tick.
#[derive(Debug, Clone)]
pub struct PendingAttack {
    pub due_tick: u64,
    pub side: Side,
    pub lane: Lane,
}

/// Attacks scheduled by stat events, spawned in scheduling order once due.
#[derive(Debug, Clone, Default)]
pub struct SpawnQueue {
    pending: Vec<PendingAttack>,
}

impl SpawnQueue {
    /// Schedule `count` attacks, the first at `start_tick` and the rest
    /// `stagger` ticks apart.
    pub fn schedule(&mut self, side: Side, lane: Lane, count: u32, start_tick: u64, stagger: u64) {
        for i in 0..count as u64 {
            self.pending.push(PendingAttack {
                due_tick: start_tick + i * stagger,
                side,
                lane,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return the attacks due at `tick`, in scheduling order.
    fn take_due(&mut self, tick: u64) -> Vec<PendingAttack> {
        let (due, later): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_tick <= tick);
        self.pending = later;
        due
    }
}

/// Shared inputs for spawning attacks during one tick.
pub struct SpawnContext<'a> {
    pub grid: &'a GridLayout,
    pub sides: &'a [SideState; 2],
    pub base_speed: f32,
    pub next_attack_id: &'a mut u32,
    pub events: &'a mut Vec<BattleEvent>,
    pub now_ms: u64,
}

/// Spawn every queued attack that is due.
pub fn run(world: &mut World, queue: &mut SpawnQueue, ctx: &mut SpawnContext, tick: u64) {
    if queue.is_empty() {
        return;
    }
    for pending in queue.take_due(tick) {
        spawn_now(world, ctx, pending.side, pending.lane, false);
    }
}

/// Spawn one attack from every lane of `side` at once.
pub fn spawn_volley(world: &mut World, ctx: &mut SpawnContext, side: Side) {
    for lane in Lane::ALL {
        spawn_now(world, ctx, side, lane, true);
    }
}

/// Spawn a single attack immediately and alert the defending side's
/// defender to the incoming lane.
pub fn spawn_now(world: &mut World, ctx: &mut SpawnContext, side: Side, lane: Lane, volley: bool) -> u32 {
    let id = *ctx.next_attack_id;
    *ctx.next_attack_id += 1;

    spawn_attack(
        world,
        ctx.grid,
        AttackSpec {
            id,
            side,
            lane,
            base_speed: ctx.base_speed,
            speed_multiplier: ctx.sides[side.index()].attack_speed_multiplier(),
            volley,
        },
    );

    let defending = side.opponent();
    for (_entity, defender) in world.query_mut::<&mut RoamingDefender>() {
        if defender.side == defending && !defender.is_destroyed() {
            record_detection(&mut defender.threats, lane, ctx.now_ms);
        }
    }

    ctx.events.push(BattleEvent::AttackSpawned {
        attack_id: id,
        side,
        lane,
        volley,
    });
    id
}
