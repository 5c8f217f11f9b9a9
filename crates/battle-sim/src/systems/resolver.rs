//! Collision and damage resolution.
//!
//! Each unresolved attack is checked, in attack id order, against:
//! 1. the opposing roaming defender (swept segment within its radius),
//! 2. the front-most living token of the opposing side in its lane,
//! 3. the opposing castle's weapon slot.
//!
//! Every mutation is applied before the next attack is examined, so later
//! attacks in the same tick see tokens and defenders as the earlier ones
//! left them.

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, info, warn};

use battle_core::components::{Attack, DefenseToken, RoamingDefender, TokenDamage};
use battle_core::constants::DEFENDER_COLLISION_RADIUS;
use battle_core::enums::*;
use battle_core::events::BattleEvent;
use battle_core::types::{BattleId, Position};

use crate::grid::GridLayout;
use crate::observer::{CollisionLog, CollisionRecord};
use crate::side_state::{apply_castle_damage, SideState};
use crate::systems::movement::at_target;

/// A cleared lane whose side answers with a counter-volley.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolleyRequest {
    pub side: Side,
    pub cleared_lane: Lane,
}

/// Battle state the resolver reads and writes besides the world.
pub struct ResolveContext<'a> {
    pub battle_id: BattleId,
    pub tick: u64,
    pub now_ms: u64,
    pub grid: &'a GridLayout,
    pub sides: &'a mut [SideState; 2],
    pub events: &'a mut Vec<BattleEvent>,
    pub collisions: &'a mut CollisionLog,
}

/// Resolve all attacks for this tick. Returns the counter-volleys to fire.
pub fn run(world: &mut World, ctx: &mut ResolveContext) -> Vec<VolleyRequest> {
    let mut attacks: Vec<(u32, Entity)> = world
        .query::<&Attack>()
        .iter()
        .map(|(entity, attack)| (attack.id, entity))
        .collect();
    attacks.sort_unstable_by_key(|&(id, _)| id);

    let mut volleys = Vec::new();
    for (_, entity) in attacks {
        resolve_attack(world, entity, ctx, &mut volleys);
    }
    volleys
}

/// Resolve one attack against the current world state.
pub fn resolve_attack(
    world: &mut World,
    entity: Entity,
    ctx: &mut ResolveContext,
    volleys: &mut Vec<VolleyRequest>,
) {
    let (attack, pos) = match (world.get::<&Attack>(entity), world.get::<&Position>(entity)) {
        (Ok(a), Ok(p)) => ((*a).clone(), *p),
        _ => return,
    };
    if attack.collided {
        warn!(
            "{}: attack {} already resolved against {:?}, skipping",
            ctx.battle_id, attack.id, attack.collided_with
        );
        return;
    }

    // (a) Roaming defender.
    if let Some(defender_entity) = intercepting_defender(world, &attack, &pos) {
        resolve_defender_hit(world, entity, defender_entity, &attack, &pos, ctx);
        return;
    }

    // (b) Front-most living token in the lane.
    if let Some((token_entity, slot)) = front_token(world, attack.target_side(), attack.lane) {
        let bounds = match ctx.grid.cell(attack.lane, attack.target_side(), slot) {
            Ok(cell) => cell.bounds,
            Err(e) => {
                warn!("{}: token without grid cell: {e}", ctx.battle_id);
                return;
            }
        };
        let reached = if attack.side.attack_direction() > 0.0 {
            pos.x() >= bounds.min.x
        } else {
            pos.x() <= bounds.max.x
        };
        if reached {
            resolve_token_hit(world, entity, token_entity, &attack, &pos, ctx, volleys);
        }
        return;
    }

    // (c) Nothing in the way: the opposing castle.
    if at_target(&attack, &pos) {
        resolve_castle_hit(world, entity, &attack, &pos, ctx);
    }
}

fn intercepting_defender(world: &World, attack: &Attack, pos: &Position) -> Option<Entity> {
    let defending = attack.target_side();
    let mut query = world.query::<(&RoamingDefender, &Position)>();
    query
        .iter()
        .filter(|(_, (d, _))| d.side == defending && !d.is_destroyed())
        .find(|(_, (_, dpos))| {
            segment_distance(attack.last_position.0, pos.0, dpos.0) <= DEFENDER_COLLISION_RADIUS
        })
        .map(|(entity, _)| entity)
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a.distance(p);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t).distance(p)
}

/// Living token of `side` in `lane` nearest to incoming attacks.
fn front_token(world: &World, side: Side, lane: Lane) -> Option<(Entity, usize)> {
    // Attacks on `side` travel in the opponent's direction, so the front
    // token is the one furthest against that direction.
    let direction = side.opponent().attack_direction();
    let mut query = world.query::<(&DefenseToken, &Position)>();
    query
        .iter()
        .filter(|(_, (t, _))| t.alive && t.key.side == side && t.key.lane == lane)
        .min_by(|(_, (_, a)), (_, (_, b))| (direction * a.x()).total_cmp(&(direction * b.x())))
        .map(|(entity, (token, _))| (entity, token.key.slot))
}

fn lane_has_living_tokens(world: &World, side: Side, lane: Lane) -> bool {
    world
        .query::<&DefenseToken>()
        .iter()
        .any(|(_, t)| t.alive && t.key.side == side && t.key.lane == lane)
}

fn mark_collided(world: &mut World, entity: Entity, with: CollisionTarget) {
    if let Ok(mut attack) = world.get::<&mut Attack>(entity) {
        attack.mark_collided(with);
    }
}

fn record(ctx: &mut ResolveContext, attack: &Attack, pos: &Position, outcome: CollisionOutcome) {
    ctx.collisions.record(CollisionRecord {
        tick: ctx.tick,
        attack_id: attack.id,
        side: attack.side,
        lane: attack.lane,
        outcome,
        position: *pos,
    });
}

fn resolve_defender_hit(
    world: &mut World,
    attack_entity: Entity,
    defender_entity: Entity,
    attack: &Attack,
    pos: &Position,
    ctx: &mut ResolveContext,
) {
    let (resolution, defender_side, defender_lane, defender_hp) = {
        let Ok(mut defender) = world.get::<&mut RoamingDefender>(defender_entity) else {
            return;
        };
        let resolution = defender.resolve_hit(ctx.now_ms);
        (resolution, defender.side, defender.lane, defender.hp)
    };
    mark_collided(world, attack_entity, CollisionTarget::Defender);

    if resolution.deflected {
        record(ctx, attack, pos, CollisionOutcome::Deflected);
        ctx.events.push(BattleEvent::DefenderDeflected {
            side: defender_side,
            lane: defender_lane,
            attack_id: attack.id,
        });
        return;
    }

    record(ctx, attack, pos, CollisionOutcome::DefenderHit);
    ctx.events.push(BattleEvent::DefenderDamaged {
        side: defender_side,
        hp: defender_hp,
    });
    if resolution.destroyed {
        info!("{}: {defender_side:?} defender destroyed", ctx.battle_id);
        ctx.events
            .push(BattleEvent::DefenderDestroyed { side: defender_side });
    }
}

fn resolve_token_hit(
    world: &mut World,
    attack_entity: Entity,
    token_entity: Entity,
    attack: &Attack,
    pos: &Position,
    ctx: &mut ResolveContext,
    volleys: &mut Vec<VolleyRequest>,
) {
    let (damage, key) = {
        let Ok(mut token) = world.get::<&mut DefenseToken>(token_entity) else {
            return;
        };
        (token.take_damage(attack.damage), token.key)
    };

    match damage {
        TokenDamage::AlreadyDead => {
            warn!(
                "{}: attack {} hit dead token {:?}, ignoring",
                ctx.battle_id, attack.id, key
            );
            return;
        }
        TokenDamage::Absorbed { hp } => {
            debug!("{}: token {:?} down to {hp} HP", ctx.battle_id, key);
            record(ctx, attack, pos, CollisionOutcome::TokenHit);
            ctx.events.push(BattleEvent::TokenDamaged { slot: key, hp });
        }
        TokenDamage::Destroyed => {
            record(ctx, attack, pos, CollisionOutcome::TokenDestroyed);
            ctx.events.push(BattleEvent::TokenDestroyed { slot: key });
            check_lane_cleared(world, key.side, key.lane, ctx, volleys);
        }
    }
    mark_collided(world, attack_entity, CollisionTarget::Token);
}

/// Raise the cascade for a lane whose last token just died. Fires once per
/// side and lane.
fn check_lane_cleared(
    world: &World,
    side: Side,
    lane: Lane,
    ctx: &mut ResolveContext,
    volleys: &mut Vec<VolleyRequest>,
) {
    let state = &mut ctx.sides[side.index()];
    if state.cleared_lanes[lane.index()] || lane_has_living_tokens(world, side, lane) {
        return;
    }
    state.cleared_lanes[lane.index()] = true;
    info!("{}: {side:?} lost the {lane:?} lane", ctx.battle_id);
    ctx.events.push(BattleEvent::LaneCleared { side, lane });

    if state.modifiers.counter_volley() {
        volleys.push(VolleyRequest {
            side,
            cleared_lane: lane,
        });
    }
}

fn resolve_castle_hit(
    world: &mut World,
    attack_entity: Entity,
    attack: &Attack,
    pos: &Position,
    ctx: &mut ResolveContext,
) {
    mark_collided(world, attack_entity, CollisionTarget::Castle);
    let target = attack.target_side();
    let state = &mut ctx.sides[target.index()];

    if state.defeated {
        record(ctx, attack, pos, CollisionOutcome::Missed);
        ctx.events.push(BattleEvent::AttackMissed {
            attack_id: attack.id,
            side: attack.side,
            lane: attack.lane,
        });
        return;
    }

    let hp = apply_castle_damage(state, attack.damage, ctx.battle_id, ctx.events);
    debug!("{}: {target:?} castle hit, {hp} HP left", ctx.battle_id);
    record(ctx, attack, pos, CollisionOutcome::CastleHit);
}
