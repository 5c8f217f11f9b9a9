//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::LANE_COUNT;

/// Stat category driving one defense/attack track. Exactly five, fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lane {
    Scoring,
    Rebounding,
    Assists,
    Steals,
    ThreePointers,
}

impl Lane {
    /// All lanes in apportionment and row order.
    pub const ALL: [Lane; LANE_COUNT] = [
        Lane::Scoring,
        Lane::Rebounding,
        Lane::Assists,
        Lane::Steals,
        Lane::ThreePointers,
    ];

    /// Row index, 0 at the top.
    pub fn index(self) -> usize {
        self as usize
    }

}

/// One half of the battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Horizontal direction in which this side's attacks travel.
    pub fn attack_direction(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Game status. Transitions are monotonic in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Scheduled,
    Q1,
    Q2,
    Q3,
    Q4,
    OT1,
    OT2,
    OT3,
    OT4,
    Final,
}

impl GamePhase {
    /// Whether stat events may arrive in this phase.
    pub fn is_live(self) -> bool {
        !matches!(self, GamePhase::Scheduled | GamePhase::Final)
    }

    pub fn is_overtime(self) -> bool {
        matches!(
            self,
            GamePhase::OT1 | GamePhase::OT2 | GamePhase::OT3 | GamePhase::OT4
        )
    }

    /// Whether `to` is a legal forward transition from `self`. Overtime is
    /// only reachable from Q4 or an earlier overtime; FINAL from anywhere.
    pub fn can_advance_to(self, to: GamePhase) -> bool {
        if to <= self {
            return false;
        }
        if to.is_overtime() {
            return self >= GamePhase::Q4;
        }
        true
    }
}

/// What an attack ran into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionTarget {
    #[default]
    None,
    Token,
    Defender,
    Castle,
}

/// Outcome of one collision check, as recorded by the collision observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    TokenHit,
    TokenDestroyed,
    Deflected,
    DefenderHit,
    CastleHit,
    /// Reached a castle that was already at 0 HP.
    Missed,
}

/// Patrol posture of a roaming defender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenderPosture {
    /// Weighted-random patrol across the weakest lanes.
    #[default]
    Patrol,
    /// Castle in danger: always guards the weakest lane, moves faster.
    Guard,
}

/// Equipped capper modifier. Unrecognised identifiers deserialize as
/// `Unknown` and have no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Losing a lane triggers a counter-volley from every lane.
    LastStand,
    /// Attacks travel faster.
    Overdrive,
    /// Defense tokens start with extra HP.
    Fortify,
    #[serde(other)]
    Unknown,
}

impl Modifier {
    /// Multiplier applied to this side's attack speed.
    pub fn speed_multiplier(self) -> f32 {
        match self {
            Modifier::Overdrive => 1.5,
            _ => 1.0,
        }
    }

    /// Extra HP (and capacity) for this side's defense tokens.
    pub fn token_hp_bonus(self) -> u8 {
        match self {
            Modifier::Fortify => 1,
            _ => 0,
        }
    }

    /// Whether a cleared lane triggers a counter-volley.
    pub fn triggers_counter_volley(self) -> bool {
        matches!(self, Modifier::LastStand)
    }
}
