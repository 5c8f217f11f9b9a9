#[cfg(test)]
mod tests {
    use crate::commands::BattleCommand;
    use crate::components::{DefenseToken, RoamingDefender, TokenDamage};
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::BattleError;
    use crate::events::BattleEvent;
    use crate::roster::{Capper, Game, SideRoster, Team, UnitRecord};
    use crate::types::{SimTime, SlotKey};

    fn slot(side: Side, lane: Lane, slot: usize) -> SlotKey {
        SlotKey { side, lane, slot }
    }

    fn roster(team_id: &str, units: f64) -> SideRoster {
        SideRoster {
            team: Team {
                id: team_id.to_string(),
                name: format!("{team_id} team"),
                abbreviation: team_id.to_uppercase(),
                color: "#123456".to_string(),
            },
            capper: Capper {
                id: format!("capper-{team_id}"),
                name: "Capper".to_string(),
                unit_records: vec![UnitRecord {
                    team_id: team_id.to_string(),
                    net_units: units,
                    wins: 10,
                    losses: 4,
                    pushes: 1,
                }],
                modifiers: Vec::new(),
                bonus_lane: None,
            },
        }
    }

    fn game() -> Game {
        Game {
            id: "g1".to_string(),
            left: roster("bos", 32.0),
            right: roster("lal", 9.0),
            spread: -3.5,
            status: GamePhase::Scheduled,
            scores: [0, 0],
            scheduled_at: None,
        }
    }

    // ---- Serde ----

    #[test]
    fn test_lane_serde() {
        for lane in Lane::ALL {
            let json = serde_json::to_string(&lane).unwrap();
            let back: Lane = serde_json::from_str(&json).unwrap();
            assert_eq!(lane, back);
        }
    }

    #[test]
    fn test_unknown_modifier_deserializes() {
        let mods: Vec<Modifier> =
            serde_json::from_str(r#"["LastStand", "GoldenHoop", "Overdrive"]"#).unwrap();
        assert_eq!(
            mods,
            vec![Modifier::LastStand, Modifier::Unknown, Modifier::Overdrive]
        );
        assert_eq!(Modifier::Unknown.speed_multiplier(), 1.0);
        assert_eq!(Modifier::Unknown.token_hp_bonus(), 0);
        assert!(!Modifier::Unknown.triggers_counter_volley());
    }

    #[test]
    fn test_command_serde_tagged() {
        let cmd = BattleCommand::StatEvent {
            side: Side::Left,
            lane: Lane::Assists,
            count: 2,
            phase: GamePhase::Q2,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"StatEvent\""), "json: {json}");
        let back: BattleCommand = serde_json::from_str(&json).unwrap();
        match back {
            BattleCommand::StatEvent { lane, count, .. } => {
                assert_eq!(lane, Lane::Assists);
                assert_eq!(count, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_event_serde() {
        let events = vec![
            BattleEvent::TokenDestroyed {
                slot: slot(Side::Right, Lane::Steals, 3),
            },
            BattleEvent::LaneCleared {
                side: Side::Left,
                lane: Lane::Scoring,
            },
            BattleEvent::PhaseTransition {
                from: GamePhase::Q4,
                to: GamePhase::OT1,
            },
        ];
        for e in events {
            let json = serde_json::to_string(&e).unwrap();
            let back: BattleEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(e, back);
        }
    }

    // ---- Phases ----

    #[test]
    fn test_phase_forward_only() {
        assert!(GamePhase::Scheduled.can_advance_to(GamePhase::Q1));
        assert!(GamePhase::Q1.can_advance_to(GamePhase::Q3));
        assert!(GamePhase::Q4.can_advance_to(GamePhase::OT1));
        assert!(GamePhase::OT2.can_advance_to(GamePhase::Final));
        assert!(!GamePhase::Q3.can_advance_to(GamePhase::Q2));
        assert!(!GamePhase::Q2.can_advance_to(GamePhase::Q2));
        assert!(!GamePhase::Final.can_advance_to(GamePhase::Final));
        assert!(
            !GamePhase::Q2.can_advance_to(GamePhase::OT1),
            "overtime only follows the fourth quarter"
        );
    }

    #[test]
    fn test_phase_liveness() {
        assert!(!GamePhase::Scheduled.is_live());
        assert!(GamePhase::Q1.is_live());
        assert!(GamePhase::OT4.is_live());
        assert!(!GamePhase::Final.is_live());
    }

    // ---- Defense tokens ----

    #[test]
    fn test_token_dies_in_same_call() {
        let mut token = DefenseToken::new(slot(Side::Left, Lane::Scoring, 0), TOKEN_CAPACITY, false);
        assert_eq!(token.take_damage(1), TokenDamage::Absorbed { hp: 2 });
        assert_eq!(token.take_damage(1), TokenDamage::Absorbed { hp: 1 });
        assert_eq!(token.take_damage(1), TokenDamage::Destroyed);
        assert!(!token.alive, "alive must drop in the call that reaches 0 HP");
        assert_eq!(token.hp, 0);
    }

    #[test]
    fn test_token_damage_after_death_is_noop() {
        let mut token = DefenseToken::new(slot(Side::Right, Lane::Steals, 4), TOKEN_CAPACITY, true);
        assert_eq!(token.take_damage(10), TokenDamage::Destroyed);
        assert_eq!(token.take_damage(1), TokenDamage::AlreadyDead);
        assert_eq!(token.hp, 0, "HP must not underflow");
        assert!(!token.alive);
    }

    // ---- Roaming defender ----

    #[test]
    fn test_defender_deflect_cooldown() {
        let mut defender = RoamingDefender::new(Side::Left, Lane::Scoring);
        assert!(defender.can_deflect(0), "fresh defender can deflect");

        let first = defender.resolve_hit(500);
        assert!(first.deflected);
        assert_eq!(defender.hp, DEFENDER_MAX_HP);

        let second = defender.resolve_hit(900);
        assert!(!second.deflected, "cooldown still running");
        assert_eq!(defender.hp, DEFENDER_MAX_HP - 1);

        assert!(!defender.can_deflect(1499));
        assert!(defender.can_deflect(1500), "exactly 1000ms later is allowed");
    }

    #[test]
    fn test_defender_destroyed_on_last_hp() {
        let mut defender = RoamingDefender::new(Side::Right, Lane::Assists);
        defender.hp = 1;
        defender.last_deflect_ms = Some(0);
        let res = defender.resolve_hit(10);
        assert!(!res.deflected);
        assert!(res.destroyed);
        assert!(defender.is_destroyed());
    }

    // ---- Roster validation ----

    #[test]
    fn test_game_validates() {
        let g = game();
        assert!(g.validate().is_ok());
        assert_eq!(g.defense_units(Side::Left), 32.0);
        assert_eq!(g.defense_units(Side::Right), 9.0);
    }

    #[test]
    fn test_missing_team_rejected() {
        let mut g = game();
        g.right.team.id = "  ".to_string();
        assert_eq!(
            g.validate(),
            Err(BattleError::MissingTeam { side: Side::Right })
        );
    }

    #[test]
    fn test_too_many_modifiers_rejected() {
        let mut g = game();
        g.left.capper.modifiers = vec![Modifier::Fortify; 4];
        assert_eq!(
            g.validate(),
            Err(BattleError::TooManyModifiers {
                side: Side::Left,
                count: 4
            })
        );
    }

    #[test]
    fn test_units_only_count_picked_team() {
        let mut g = game();
        g.left.capper.unit_records.push(UnitRecord {
            team_id: "nyk".to_string(),
            net_units: 100.0,
            wins: 0,
            losses: 0,
            pushes: 0,
        });
        assert_eq!(g.defense_units(Side::Left), 32.0);
    }

    // ---- Time ----

    #[test]
    fn test_sim_time_ms() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance();
        }
        assert_eq!(time.elapsed_ms(), 1000);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }
}
