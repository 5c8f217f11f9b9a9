//! Roaming defender decision logic.
//!
//! Pure functions that pick the next patrol lane and compute posture
//! transitions from plain data. No ECS dependency.

use std::cmp::Ordering;

use rand::Rng;

use battle_core::constants::*;
use battle_core::enums::{DefenderPosture, Lane};

use crate::profiles::get_profile;

/// Input to a patrol decision for one defender.
pub struct PatrolContext {
    pub posture: DefenderPosture,
    /// Surviving friendly tokens per lane, counted fresh this cycle.
    pub surviving_tokens: [u32; LANE_COUNT],
    /// Decayed threat per lane.
    pub threat_levels: [f32; LANE_COUNT],
}

/// How a patrol lane was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Guard posture: always the weakest lane.
    Weakest,
    /// Weighted draw over the three weakest lanes.
    Weighted,
    /// Uniform draw over the three weakest lanes.
    Uniform,
}

/// Output from a patrol decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatrolDecision {
    pub lane: Lane,
    pub mode: SelectionMode,
}

/// Lanes ordered weakest first: fewest surviving tokens, then highest
/// threat, then lane order.
pub fn rank_lanes(ctx: &PatrolContext) -> [Lane; LANE_COUNT] {
    let mut lanes = Lane::ALL;
    lanes.sort_by(|a, b| {
        let (ai, bi) = (a.index(), b.index());
        ctx.surviving_tokens[ai]
            .cmp(&ctx.surviving_tokens[bi])
            .then_with(|| {
                ctx.threat_levels[bi]
                    .partial_cmp(&ctx.threat_levels[ai])
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| ai.cmp(&bi))
    });
    lanes
}

/// Pick the lane to patrol next.
pub fn select_patrol_lane<R: Rng>(ctx: &PatrolContext, rng: &mut R) -> PatrolDecision {
    let profile = get_profile(ctx.posture);
    let ranked = rank_lanes(ctx);

    if profile.lock_weakest {
        return PatrolDecision {
            lane: ranked[0],
            mode: SelectionMode::Weakest,
        };
    }

    let candidates = &ranked[..3];
    if rng.gen_bool(profile.uniform_chance) {
        return PatrolDecision {
            lane: candidates[rng.gen_range(0..candidates.len())],
            mode: SelectionMode::Uniform,
        };
    }

    let total: u32 = profile.lane_bias_percent.iter().sum();
    let mut roll = rng.gen_range(0..total);
    let mut pick = candidates.len() - 1;
    for (i, &weight) in profile.lane_bias_percent.iter().enumerate() {
        if roll < weight {
            pick = i;
            break;
        }
        roll -= weight;
    }
    PatrolDecision {
        lane: candidates[pick],
        mode: SelectionMode::Weighted,
    }
}

/// Input to the posture check.
pub struct PostureContext {
    pub posture: DefenderPosture,
    pub castle_hp: u32,
}

/// Output from the posture check.
pub struct PostureUpdate {
    pub new_posture: DefenderPosture,
    /// Flat HP added on the transition, 0 otherwise.
    pub hp_bonus: u32,
    pub posture_changed: bool,
}

/// Guard posture is entered once, when the castle drops below the threshold,
/// and never left.
pub fn evaluate_posture(ctx: &PostureContext) -> PostureUpdate {
    if ctx.posture == DefenderPosture::Patrol && ctx.castle_hp < DEFENDER_MODE_CASTLE_THRESHOLD {
        return PostureUpdate {
            new_posture: DefenderPosture::Guard,
            hp_bonus: DEFENDER_MODE_HP_BONUS,
            posture_changed: true,
        };
    }

    PostureUpdate {
        new_posture: ctx.posture,
        hp_bonus: 0,
        posture_changed: false,
    }
}

/// Vertical distance (pixels) a defender in `posture` covers in one tick on
/// a grid whose rows are `cell_height` pixels tall.
pub fn lane_step(posture: DefenderPosture, cell_height: f32) -> f32 {
    get_profile(posture).lane_speed * cell_height * DT as f32
}
