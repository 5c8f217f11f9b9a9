//! Per-side battle state that is not an ECS entity: castle HP, modifiers,
//! cleared-lane markers and stat carry-over.
//!
//! Stored in `Battle` indexed by `Side::index`.

use log::info;

use battle_core::constants::*;
use battle_core::enums::{Lane, Side};
use battle_core::events::BattleEvent;
use battle_core::roster::Capper;
use battle_core::types::BattleId;

use crate::allocation::LaneAllocation;
use crate::modifiers::ModifierSet;

#[derive(Debug, Clone)]
pub struct SideState {
    pub side: Side,
    pub castle_hp: u32,
    pub defeated: bool,
    pub modifiers: ModifierSet,
    pub bonus_lane: Option<Lane>,
    /// Tokens per lane at battle start.
    pub allocation: LaneAllocation,
    /// Externally set multiplier, applied on top of modifier effects.
    pub speed_override: f32,
    /// Stats not yet converted into attacks, per lane.
    pub stat_carry: [u32; LANE_COUNT],
    /// Lanes whose last token has been destroyed. Each fires its cascade once.
    pub cleared_lanes: [bool; LANE_COUNT],
}

impl SideState {
    pub fn new(side: Side, capper: &Capper, allocation: LaneAllocation) -> Self {
        Self {
            side,
            castle_hp: CASTLE_MAX_HP,
            defeated: false,
            modifiers: ModifierSet::new(&capper.modifiers),
            bonus_lane: capper.bonus_lane,
            allocation,
            speed_override: 1.0,
            stat_carry: [0; LANE_COUNT],
            cleared_lanes: [false; LANE_COUNT],
        }
    }

    /// Multiplier stamped on newly spawned attacks of this side.
    pub fn attack_speed_multiplier(&self) -> f32 {
        self.modifiers.speed_multiplier() * self.speed_override
    }

    /// Starting HP of this side's tokens.
    pub fn token_capacity(&self) -> u8 {
        TOKEN_CAPACITY.saturating_add(self.modifiers.token_hp_bonus())
    }
}

/// Apply damage to a castle and report the post-update HP. A defeated castle
/// takes no further damage and raises no further events.
pub fn apply_castle_damage(
    state: &mut SideState,
    amount: u32,
    battle_id: BattleId,
    events: &mut Vec<BattleEvent>,
) -> u32 {
    if state.defeated {
        return state.castle_hp;
    }
    state.castle_hp = state.castle_hp.saturating_sub(amount);
    events.push(BattleEvent::CastleDamaged {
        side: state.side,
        hp: state.castle_hp,
    });
    if state.castle_hp == 0 {
        state.defeated = true;
        info!("{battle_id}: {:?} castle defeated", state.side);
        events.push(BattleEvent::SideDefeated { side: state.side });
    }
    state.castle_hp
}
