//! Posture-specific behavioural profiles.
//!
//! Consolidates per-posture parameters for the defender FSM.

use battle_core::enums::DefenderPosture;

/// Behavioural profile for a defender posture.
pub struct DefenderProfile {
    /// Time between patrol decisions (ms).
    pub patrol_interval_ms: u64,
    /// Vertical movement speed (lane rows per second).
    pub lane_speed: f32,
    /// Odds (percent) of picking the weakest, second and third weakest lane.
    pub lane_bias_percent: [u32; 3],
    /// Probability of ignoring the bias and picking uniformly among the
    /// three weakest lanes.
    pub uniform_chance: f64,
    /// Always go to the weakest lane, no randomness.
    pub lock_weakest: bool,
}

/// Get the behavioural profile for a given posture.
pub fn get_profile(posture: DefenderPosture) -> DefenderProfile {
    match posture {
        DefenderPosture::Patrol => DefenderProfile {
            patrol_interval_ms: 1500,
            lane_speed: 2.5,
            lane_bias_percent: [50, 30, 20],
            uniform_chance: 0.3,
            lock_weakest: false,
        },
        DefenderPosture::Guard => DefenderProfile {
            patrol_interval_ms: 750,
            lane_speed: 5.0,
            lane_bias_percent: [100, 0, 0],
            uniform_chance: 0.0,
            lock_weakest: true,
        },
    }
}
