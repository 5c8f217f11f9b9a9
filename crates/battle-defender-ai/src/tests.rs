#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use battle_core::components::ThreatMap;
    use battle_core::constants::*;
    use battle_core::enums::{DefenderPosture, Lane};

    use crate::fsm::{
        evaluate_posture, lane_step, rank_lanes, select_patrol_lane, PatrolContext,
        PostureContext, SelectionMode,
    };
    use crate::profiles::get_profile;
    use crate::threat::{prune, record_detection, threat_levels};

    fn context(posture: DefenderPosture, tokens: [u32; LANE_COUNT]) -> PatrolContext {
        PatrolContext {
            posture,
            surviving_tokens: tokens,
            threat_levels: [0.0; LANE_COUNT],
        }
    }

    // ---- Ranking ----

    #[test]
    fn test_rank_fewest_tokens_first() {
        let ctx = context(DefenderPosture::Patrol, [5, 2, 2, 1, 0]);
        let ranked = rank_lanes(&ctx);
        assert_eq!(
            ranked,
            [
                Lane::ThreePointers,
                Lane::Steals,
                Lane::Rebounding,
                Lane::Assists,
                Lane::Scoring
            ]
        );
    }

    #[test]
    fn test_rank_threat_breaks_ties() {
        let mut ctx = context(DefenderPosture::Patrol, [3, 3, 3, 3, 3]);
        ctx.threat_levels[Lane::Steals.index()] = 1.5;
        ctx.threat_levels[Lane::Assists.index()] = 0.4;
        let ranked = rank_lanes(&ctx);
        assert_eq!(ranked[0], Lane::Steals);
        assert_eq!(ranked[1], Lane::Assists);
        assert_eq!(ranked[2], Lane::Scoring, "remaining ties fall back to lane order");
    }

    // ---- Selection ----

    #[test]
    fn test_patrol_picks_among_three_weakest() {
        let ctx = context(DefenderPosture::Patrol, [9, 8, 1, 2, 3]);
        let allowed = [Lane::Assists, Lane::Steals, Lane::ThreePointers];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let decision = select_patrol_lane(&ctx, &mut rng);
            assert!(
                allowed.contains(&decision.lane),
                "picked {:?}, outside the three weakest",
                decision.lane
            );
            assert_ne!(decision.mode, SelectionMode::Weakest);
        }
    }

    #[test]
    fn test_patrol_bias_favours_weakest() {
        let ctx = context(DefenderPosture::Patrol, [0, 4, 6, 8, 10]);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut counts = [0u32; LANE_COUNT];
        let mut uniform = 0;
        for _ in 0..10_000 {
            let decision = select_patrol_lane(&ctx, &mut rng);
            counts[decision.lane.index()] += 1;
            if decision.mode == SelectionMode::Uniform {
                uniform += 1;
            }
        }
        // Expected: 0.7 * 50/30/20 + 0.3 * 33/33/33 = 45/31/24 percent.
        assert!(counts[0] > counts[1] && counts[1] > counts[2], "counts {counts:?}");
        assert_eq!(counts[3] + counts[4], 0);
        assert!((4100..4900).contains(&counts[0]), "weakest picked {}", counts[0]);
        assert!((2600..3400).contains(&uniform), "uniform cycles {uniform}");
    }

    #[test]
    fn test_guard_always_weakest() {
        let ctx = context(DefenderPosture::Guard, [3, 3, 0, 3, 3]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let decision = select_patrol_lane(&ctx, &mut rng);
            assert_eq!(decision.lane, Lane::Assists);
            assert_eq!(decision.mode, SelectionMode::Weakest);
        }
    }

    #[test]
    fn test_selection_deterministic_for_seed() {
        let ctx = context(DefenderPosture::Patrol, [1, 2, 3, 4, 5]);
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(select_patrol_lane(&ctx, &mut a), select_patrol_lane(&ctx, &mut b));
        }
    }

    // ---- Posture ----

    #[test]
    fn test_guard_entered_below_threshold() {
        let update = evaluate_posture(&PostureContext {
            posture: DefenderPosture::Patrol,
            castle_hp: DEFENDER_MODE_CASTLE_THRESHOLD - 1,
        });
        assert!(update.posture_changed);
        assert_eq!(update.new_posture, DefenderPosture::Guard);
        assert_eq!(update.hp_bonus, DEFENDER_MODE_HP_BONUS);
    }

    #[test]
    fn test_guard_not_entered_at_threshold() {
        let update = evaluate_posture(&PostureContext {
            posture: DefenderPosture::Patrol,
            castle_hp: DEFENDER_MODE_CASTLE_THRESHOLD,
        });
        assert!(!update.posture_changed);
        assert_eq!(update.new_posture, DefenderPosture::Patrol);
    }

    #[test]
    fn test_guard_bonus_only_once() {
        let update = evaluate_posture(&PostureContext {
            posture: DefenderPosture::Guard,
            castle_hp: 1,
        });
        assert!(!update.posture_changed);
        assert_eq!(update.hp_bonus, 0);
    }

    #[test]
    fn test_guard_moves_faster() {
        assert!(
            lane_step(DefenderPosture::Guard, CELL_HEIGHT)
                > lane_step(DefenderPosture::Patrol, CELL_HEIGHT)
        );
        assert!(
            get_profile(DefenderPosture::Guard).patrol_interval_ms
                < get_profile(DefenderPosture::Patrol).patrol_interval_ms
        );
    }

    #[test]
    fn test_lane_step_follows_row_height() {
        // Lane speed is in rows per second, so taller rows mean more pixels.
        let per_second = lane_step(DefenderPosture::Patrol, 80.0) * TICK_RATE as f32;
        let rows = per_second / 80.0;
        assert!((rows - get_profile(DefenderPosture::Patrol).lane_speed).abs() < 1e-4);
        assert!(
            (lane_step(DefenderPosture::Patrol, 80.0) - 2.0 * lane_step(DefenderPosture::Patrol, 40.0))
                .abs()
                < 1e-6
        );
    }

    // ---- Threat map ----

    #[test]
    fn test_threat_decays_over_window() {
        let mut map = ThreatMap::default();
        record_detection(&mut map, Lane::Rebounding, 1000);
        record_detection(&mut map, Lane::Rebounding, 1000);

        let fresh = threat_levels(&map, 1000);
        assert!((fresh[Lane::Rebounding.index()] - 2.0).abs() < 1e-6);

        let half = threat_levels(&map, 1000 + THREAT_DECAY_WINDOW_MS / 2);
        assert!((half[Lane::Rebounding.index()] - 1.0).abs() < 1e-6);

        let gone = threat_levels(&map, 1000 + THREAT_DECAY_WINDOW_MS);
        assert_eq!(gone[Lane::Rebounding.index()], 0.0);
    }

    #[test]
    fn test_prune_drops_expired() {
        let mut map = ThreatMap::default();
        record_detection(&mut map, Lane::Scoring, 0);
        record_detection(&mut map, Lane::Scoring, 1500);
        prune(&mut map, 2500);
        assert_eq!(map.detections[Lane::Scoring.index()], vec![1500]);
    }
}
