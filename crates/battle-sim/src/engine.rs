//! Battle engine: one independent simulation instance.
//!
//! `Battle` owns the hecs world for a single game, processes commands,
//! runs all systems, and produces `BattleSnapshot`s. Completely headless
//! (no rendering dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use battle_core::commands::BattleCommand;
use battle_core::constants::MAX_ATTACKS_PER_EVENT;
use battle_core::enums::{GamePhase, Lane, Side};
use battle_core::error::{BattleError, Result};
use battle_core::events::BattleEvent;
use battle_core::roster::Game;
use battle_core::state::BattleSnapshot;
use battle_core::types::{BattleId, SimTime};

use crate::allocation::allocate;
use crate::config::BattleConfig;
use crate::grid::GridLayout;
use crate::observer::CollisionLog;
use crate::side_state::{apply_castle_damage, SideState};
use crate::systems;
use crate::systems::spawner::{SpawnContext, SpawnQueue};
use crate::world_setup;

/// A single battle. Owns its world, RNG, grid and observer; shares nothing
/// with other battles.
pub struct Battle {
    id: BattleId,
    /// Definition as supplied, kept for `Reset`.
    initial_game: Game,
    /// Live game: status and scores mutate as stat events arrive.
    game: Game,
    config: BattleConfig,
    grid: GridLayout,
    world: World,
    time: SimTime,
    sides: [SideState; 2],
    /// Live phases that have been completed, in order.
    completed_phases: Vec<GamePhase>,
    rng: ChaCha8Rng,
    next_attack_id: u32,
    spawn_queue: SpawnQueue,
    command_queue: VecDeque<BattleCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<BattleEvent>,
    collisions: CollisionLog,
}

impl Battle {
    /// Validate the game and config, allocate defenses and build the world.
    pub fn new(id: BattleId, game: Game, config: BattleConfig) -> Result<Self> {
        game.validate()?;
        config.validate()?;
        let grid = GridLayout::new(config.grid.clone())?;

        let sides = Side::BOTH.map(|side| {
            let units = game.defense_units(side);
            let allocation = allocate(units, config.units_per_capacity);
            SideState::new(side, &game.roster(side).capper, allocation)
        });

        let mut world = World::new();
        let mut token_count = 0;
        for state in &sides {
            token_count += world_setup::spawn_defense(&mut world, &grid, state)?;
        }
        for side in Side::BOTH {
            world_setup::spawn_defender(&mut world, &grid, side);
        }

        info!(
            "{id}: created for game {} ({} vs {}), {token_count} tokens, allocation {:?} / {:?}",
            game.id,
            game.left.team.abbreviation,
            game.right.team.abbreviation,
            sides[0].allocation,
            sides[1].allocation
        );

        Ok(Self {
            id,
            initial_game: game.clone(),
            game,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            grid,
            world,
            time: SimTime::default(),
            sides,
            completed_phases: Vec::new(),
            next_attack_id: 0,
            spawn_queue: SpawnQueue::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            collisions: CollisionLog::new(id),
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: BattleCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = BattleCommand>) {
        self.command_queue.extend(commands);
    }

    /// Process a command immediately.
    pub fn apply(&mut self, command: BattleCommand) -> Result<()> {
        match command {
            BattleCommand::AdvancePhase { to } => self.advance_phase(to),
            BattleCommand::StatEvent {
                side,
                lane,
                count,
                phase,
            } => self.record_stat(side, lane, count, phase),
            BattleCommand::SetSpeedMultiplier { side, multiplier } => {
                if !multiplier.is_finite() || multiplier <= 0.0 {
                    return Err(BattleError::InvalidSpeedMultiplier(multiplier));
                }
                self.sides[side.index()].speed_override = multiplier;
                Ok(())
            }
            BattleCommand::DamageCastle { side, amount } => {
                self.damage_castle(side, amount);
                Ok(())
            }
            BattleCommand::Reset => self.reset(),
        }
    }

    /// Advance the battle by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> BattleSnapshot {
        self.process_commands();

        if self.phase() != GamePhase::Scheduled {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        self.snapshot_with(events)
    }

    /// Current state without advancing; pending events stay pending.
    pub fn snapshot(&self) -> BattleSnapshot {
        self.snapshot_with(Vec::new())
    }

    fn snapshot_with(&self, events: Vec<BattleEvent>) -> BattleSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            self.id,
            &self.time,
            self.phase(),
            self.game.scores,
            &self.sides,
            events,
        )
    }

    pub fn id(&self) -> BattleId {
        self.id
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.game.status
    }

    pub fn completed_phases(&self) -> &[GamePhase] {
        &self.completed_phases
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    pub fn castle_hp(&self, side: Side) -> u32 {
        self.sides[side.index()].castle_hp
    }

    pub fn collisions(&self) -> &CollisionLog {
        &self.collisions
    }

    /// Attacks scheduled but not yet spawned.
    pub fn pending_attacks(&self) -> usize {
        self.spawn_queue.len()
    }

    /// Damage a castle outside of attack resolution. Returns the post-update
    /// HP, which is also reported as a `CastleDamaged` event.
    pub fn damage_castle(&mut self, side: Side, amount: u32) -> u32 {
        apply_castle_damage(
            &mut self.sides[side.index()],
            amount,
            self.id,
            &mut self.events,
        )
    }

    /// Move the game status forward. Backward or sideways moves are rejected.
    pub fn advance_phase(&mut self, to: GamePhase) -> Result<()> {
        let from = self.game.status;
        if !from.can_advance_to(to) {
            return Err(BattleError::InvalidPhaseTransition { from, to });
        }
        if from.is_live() {
            self.completed_phases.push(from);
        }
        self.game.status = to;
        info!("{}: phase {from:?} -> {to:?}", self.id);
        self.events.push(BattleEvent::PhaseTransition { from, to });
        Ok(())
    }

    /// Record a stat and schedule the attacks it buys.
    fn record_stat(&mut self, side: Side, lane: Lane, count: u32, phase: GamePhase) -> Result<()> {
        if !phase.is_live() {
            return Err(BattleError::BattleNotLive { phase });
        }
        // Checked against a copy so a rejected event leaves the carry intact.
        let mut carry = self.sides[side.index()].stat_carry[lane.index()];
        let attacks = self.config.spawn_policy.attacks_for(lane, count, &mut carry);
        if attacks > MAX_ATTACKS_PER_EVENT {
            return Err(BattleError::TooManyAttacks {
                count: attacks,
                max: MAX_ATTACKS_PER_EVENT,
            });
        }
        if phase > self.game.status {
            self.advance_phase(phase)?;
        }
        if !self.game.status.is_live() {
            return Err(BattleError::BattleNotLive {
                phase: self.game.status,
            });
        }

        if lane == Lane::Scoring {
            let score = &mut self.game.scores[side.index()];
            *score = score.saturating_add(count);
        }

        self.sides[side.index()].stat_carry[lane.index()] = carry;
        self.spawn_queue.schedule(
            side,
            lane,
            attacks,
            self.time.tick,
            self.config.attack_stagger_ticks,
        );
        Ok(())
    }

    /// Rebuild the battle from the game it was created with. Commands still
    /// queued behind the reset survive it.
    pub fn reset(&mut self) -> Result<()> {
        let mut fresh = Battle::new(self.id, self.initial_game.clone(), self.config.clone())?;
        fresh.command_queue = std::mem::take(&mut self.command_queue);
        self.dispose();
        *self = fresh;
        info!("{}: reset", self.id);
        Ok(())
    }

    /// Final snapshot, carrying any events not yet reported, then dispose.
    pub fn end(mut self) -> BattleSnapshot {
        let events = std::mem::take(&mut self.events);
        let snapshot = self.snapshot_with(events);
        self.dispose();
        snapshot
    }

    /// Remove every token, attack and defender and drop pending work.
    pub fn dispose(&mut self) {
        self.world.clear();
        self.spawn_queue.clear();
        self.command_queue.clear();
        self.collisions.clear();
        info!("{}: disposed", self.id);
    }

    /// Process all queued commands. A rejected command is logged and
    /// dropped; it never stops the tick.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(e) = self.apply(command.clone()) {
                warn!("{}: rejected {command:?}: {e}", self.id);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.elapsed_ms();

        // 1. Attack spawning
        systems::spawner::run(
            &mut self.world,
            &mut self.spawn_queue,
            &mut SpawnContext {
                grid: &self.grid,
                sides: &self.sides,
                base_speed: self.config.attack_base_speed,
                next_attack_id: &mut self.next_attack_id,
                events: &mut self.events,
                now_ms,
            },
            self.time.tick,
        );
        // 2. Defender posture, patrol and movement
        systems::defender_patrol::run(
            &mut self.world,
            &self.grid,
            &self.sides,
            &mut self.rng,
            now_ms,
            self.id,
            &mut self.events,
        );
        // 3. Attack movement
        systems::movement::run(&mut self.world);
        // 4. Collision resolution
        let volleys = systems::resolver::run(
            &mut self.world,
            &mut systems::resolver::ResolveContext {
                battle_id: self.id,
                tick: self.time.tick,
                now_ms,
                grid: &self.grid,
                sides: &mut self.sides,
                events: &mut self.events,
                collisions: &mut self.collisions,
            },
        );
        // 5. Counter-volleys for lanes cleared this tick
        for volley in volleys {
            info!(
                "{}: {:?} counter-volley after losing {:?}",
                self.id, volley.side, volley.cleared_lane
            );
            self.events.push(BattleEvent::CounterVolley {
                side: volley.side,
                cleared_lane: volley.cleared_lane,
            });
            systems::spawner::spawn_volley(
                &mut self.world,
                &mut SpawnContext {
                    grid: &self.grid,
                    sides: &self.sides,
                    base_speed: self.config.attack_base_speed,
                    next_attack_id: &mut self.next_attack_id,
                    events: &mut self.events,
                    now_ms,
                },
                volley.side,
            );
        }
        // 6. Cleanup (resolved attacks, destroyed defenders)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Spawn an attack immediately, bypassing the stat policy (for tests).
    #[cfg(test)]
    pub fn spawn_test_attack(&mut self, side: Side, lane: Lane) -> u32 {
        let now_ms = self.time.elapsed_ms();
        systems::spawner::spawn_now(
            &mut self.world,
            &mut SpawnContext {
                grid: &self.grid,
                sides: &self.sides,
                base_speed: self.config.attack_base_speed,
                next_attack_id: &mut self.next_attack_id,
                events: &mut self.events,
                now_ms,
            },
            side,
            lane,
            false,
        )
    }

    /// Mutable world access (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
