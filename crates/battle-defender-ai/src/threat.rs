//! Decaying per-lane threat bookkeeping.
//!
//! Each detection of an incoming attack adds a threat of 1.0 to its lane,
//! falling linearly to 0 over `THREAT_DECAY_WINDOW_MS`.

use battle_core::components::ThreatMap;
use battle_core::constants::{LANE_COUNT, THREAT_DECAY_WINDOW_MS};
use battle_core::enums::Lane;

/// Record an attack approaching `lane` at `now_ms`.
pub fn record_detection(map: &mut ThreatMap, lane: Lane, now_ms: u64) {
    map.detections[lane.index()].push(now_ms);
}

/// Drop detections that have fully decayed.
pub fn prune(map: &mut ThreatMap, now_ms: u64) {
    for lane in map.detections.iter_mut() {
        lane.retain(|&at| now_ms.saturating_sub(at) < THREAT_DECAY_WINDOW_MS);
    }
}

/// Current threat per lane.
pub fn threat_levels(map: &ThreatMap, now_ms: u64) -> [f32; LANE_COUNT] {
    let mut levels = [0.0; LANE_COUNT];
    for (level, detections) in levels.iter_mut().zip(map.detections.iter()) {
        *level = detections
            .iter()
            .map(|&at| {
                let age = now_ms.saturating_sub(at) as f32;
                (1.0 - age / THREAT_DECAY_WINDOW_MS as f32).max(0.0)
            })
            .sum();
    }
    levels
}
