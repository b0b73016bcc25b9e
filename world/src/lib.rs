#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Wild Defense.
//!
//! The world owns every mutable piece of a session: the clock, the economy,
//! the wave spawner, the enemies on the path, the placed towers and the attack
//! lines awaiting display. It is only mutated through [`apply`], which reports
//! what happened as [`Event`] values, and read through the [`query`] module.
//!
//! A tick runs in a fixed order: spawn due enemies, move every enemy and
//! resolve leaks before deaths, let towers attack, prune expired attack lines,
//! then evaluate victory. Once the session reaches a terminal outcome further
//! ticks are ignored until the session is reset.

mod enemies;
mod session;
mod towers;

use std::{sync::Arc, time::Duration};

use tracing::{debug, info, warn};
use wild_defense_config::GameConfig;
use wild_defense_core::{
    AttackEvent, CellCoord, Command, EnemyId, EnemyKind, Event, SessionOutcome, TowerId,
    TowerKind, WavePhase, WorldPoint,
};
use wild_defense_system_spawning::{Spawner, WaveStart};

use crate::{enemies::Enemy, session::Session, towers::TowerRegistry};

/// Represents the authoritative Wild Defense world state.
#[derive(Debug)]
pub struct World {
    config: Arc<GameConfig>,
    path: Arc<[WorldPoint]>,
    clock: Duration,
    session: Session,
    spawner: Spawner,
    enemies: Vec<Enemy>,
    towers: TowerRegistry,
    attack_events: Vec<AttackEvent>,
    next_enemy_id: EnemyId,
    spawn_buffer: Vec<EnemyKind>,
}

impl World {
    /// Creates a fresh session for the provided level.
    #[must_use]
    pub fn new(config: Arc<GameConfig>) -> Self {
        let path: Arc<[WorldPoint]> = Arc::from(config.path());
        let session = Session::new(config.economy());
        Self {
            config,
            path,
            clock: Duration::ZERO,
            session,
            spawner: Spawner::new(),
            enemies: Vec::new(),
            towers: TowerRegistry::new(),
            attack_events: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            spawn_buffer: Vec::new(),
        }
    }

    fn is_over(&self) -> bool {
        self.session.outcome().is_terminal()
    }

    fn tick(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        if self.is_over() {
            return;
        }
        self.clock = now;
        out_events.push(Event::TimeAdvanced { now });

        self.spawn_due_enemies(now, out_events);
        self.advance_enemies(out_events);
        if self.is_over() {
            return;
        }
        self.fire_towers(now, out_events);

        let lifetime = self.config.economy().attack_effect_lifetime();
        self.attack_events
            .retain(|event| !event.is_expired(now, lifetime));

        if self.spawner.phase() == WavePhase::Complete
            && self.spawner.waves_remaining(self.config.waves()) == 0
        {
            self.win(out_events);
        }
    }

    fn spawn_due_enemies(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        self.spawn_buffer.clear();
        self.spawner
            .spawn_tick(now, self.config.waves(), &mut self.spawn_buffer);

        for kind in self.spawn_buffer.drain(..) {
            let id = self.next_enemy_id;
            self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
            let enemy = Enemy::spawn(
                id,
                kind,
                self.config.enemies().stats(kind),
                Arc::clone(&self.path),
            );
            out_events.push(Event::EnemySpawned {
                enemy: id,
                kind,
                position: enemy.position(),
            });
            debug!(enemy = id.get(), %kind, "enemy spawned");
            self.enemies.push(enemy);
        }

        let all_dead = self.enemies.iter().all(Enemy::is_dead);
        if let Some(wave) = self.spawner.settle(self.config.waves(), all_dead) {
            info!(wave, "wave cleared");
            out_events.push(Event::WaveCleared { wave });
        }
    }

    fn advance_enemies(&mut self, out_events: &mut Vec<Event>) {
        let penalty = self.config.economy().leak_penalty();
        let mut index = 0;

        while index < self.enemies.len() {
            let enemy = &mut self.enemies[index];
            debug_assert!(!enemy.is_dead(), "resolved enemies are removed in the same step");
            enemy.advance();

            if enemy.reached_end() {
                let enemy = self.enemies.remove(index);
                info!(enemy = enemy.id().get(), kind = %enemy.kind(), penalty, "enemy reached the base");
                out_events.push(Event::EnemyLeaked {
                    enemy: enemy.id(),
                    kind: enemy.kind(),
                    penalty,
                });
                if self.session.damage_base(penalty) {
                    warn!(
                        base_health = self.session.base_health(),
                        "base destroyed, session lost"
                    );
                    out_events.push(Event::OutcomeChanged {
                        outcome: SessionOutcome::Lost,
                    });
                    return;
                }
                continue;
            }

            if enemy.resolve_death() {
                let enemy = self.enemies.remove(index);
                let reward = enemy.reward();
                self.session.credit(reward);
                debug!(enemy = enemy.id().get(), reward, "enemy killed");
                out_events.push(Event::EnemyKilled {
                    enemy: enemy.id(),
                    kind: enemy.kind(),
                    reward,
                });
                continue;
            }

            index += 1;
        }
    }

    fn fire_towers(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        for tower in self.towers.iter_mut() {
            let Some(strike) = tower.attack(now, &mut self.enemies) else {
                continue;
            };
            self.attack_events.push(AttackEvent {
                from: strike.from,
                to: strike.to,
                created_at: now,
            });
            out_events.push(Event::TowerAttacked {
                tower: tower.id(),
                enemy: strike.enemy,
                damage: strike.damage,
                remaining_health: strike.remaining_health,
            });
        }
    }

    fn start_wave(&mut self, out_events: &mut Vec<Event>) {
        if self.is_over() {
            debug!("start wave ignored, session is over");
            return;
        }

        match self.spawner.start_wave(self.clock, self.config.waves()) {
            WaveStart::Started { wave, spawns } => {
                info!(wave, spawns, "wave started");
                out_events.push(Event::WaveStarted { wave, spawns });
            }
            WaveStart::AlreadyActive { wave } => {
                debug!(wave, "wave still in progress");
                out_events.push(Event::WaveStartIgnored { wave });
            }
            WaveStart::Exhausted => self.win(out_events),
        }
    }

    fn win(&mut self, out_events: &mut Vec<Event>) {
        if self.session.declare_victory() {
            info!(
                currency = self.session.currency(),
                base_health = self.session.base_health(),
                "all waves cleared, session won"
            );
            out_events.push(Event::OutcomeChanged {
                outcome: SessionOutcome::Won,
            });
        }
    }

    fn place_tower(&mut self, kind: TowerKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        let placed = query::placement_cost(self, kind, cell)
            .and_then(|stats| self.session.charge(stats.cost).map(|()| stats));

        match placed {
            Ok(stats) => {
                let center = self.config.grid().cell_center(cell);
                let tower = self.towers.insert(kind, cell, center, stats);
                info!(tower = tower.get(), %kind, column = cell.column(), row = cell.row(), "tower placed");
                out_events.push(Event::TowerPlaced {
                    tower,
                    kind,
                    cell,
                    cost: stats.cost,
                });
            }
            Err(reason) => {
                debug!(%kind, column = cell.column(), row = cell.row(), %reason, "tower placement rejected");
                out_events.push(Event::TowerPlacementRejected { kind, cell, reason });
            }
        }
    }

    fn use_ability(&mut self, tower: TowerId, out_events: &mut Vec<Event>) {
        if self.is_over() {
            return;
        }
        let Some(entry) = self.towers.get_mut(tower) else {
            debug!(tower = tower.get(), "ability requested for unknown tower");
            return;
        };
        let ability = entry.use_ability();
        out_events.push(Event::AbilityUsed { tower, ability });
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        *self = Self::new(Arc::clone(&self.config));
        info!("session reset");
        out_events.push(Event::SessionReset);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Arc::new(GameConfig::default()))
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { now } => world.tick(now, out_events),
        Command::StartWave => world.start_wave(out_events),
        Command::PlaceTower { kind, cell } => world.place_tower(kind, cell, out_events),
        Command::UseAbility { tower } => world.use_ability(tower, out_events),
        Command::ResetSession => world.reset(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use wild_defense_config::GameConfig;
    use wild_defense_core::{
        AttackEvent, CellCoord, EnemyView, PlacementError, SessionSnapshot, TowerKind, TowerStats,
        TowerView, WavePhase, WaveStatus, WorldPoint, WELCOME_BANNER,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(_world: &World) -> &'static str {
        WELCOME_BANNER
    }

    /// Level configuration the session was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Waypoints enemies follow.
    #[must_use]
    pub fn path(world: &World) -> &[WorldPoint] {
        &world.path
    }

    /// Session time of the most recent tick.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Captures a read-only view of the enemies on the path.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures a read-only view of the placed towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Attack lines that are still visible.
    #[must_use]
    pub fn attack_events(world: &World) -> &[AttackEvent] {
        &world.attack_events
    }

    /// Captures the economy and progress counters.
    #[must_use]
    pub fn session(world: &World) -> SessionSnapshot {
        SessionSnapshot {
            currency: world.session.currency(),
            base_health: world.session.base_health(),
            max_base_health: world.session.max_base_health(),
            waves_started: world.spawner.waves_started(),
            waves_total: world.config.waves().len() as u32,
            wave_phase: world.spawner.phase(),
            outcome: world.session.outcome(),
        }
    }

    /// Describes the current wave for display.
    #[must_use]
    pub fn wave_status(world: &World) -> WaveStatus {
        let schedule = world.config.waves();
        if world.spawner.phase() == WavePhase::Active {
            return WaveStatus::InProgress {
                wave: world.spawner.waves_started(),
                remaining_enemies: world.spawner.remaining_spawns(schedule) + world.enemies.len(),
            };
        }
        if world.spawner.waves_remaining(schedule) > 0 {
            return WaveStatus::AwaitingStart {
                next_wave: world.spawner.waves_started() + 1,
            };
        }
        WaveStatus::AllComplete
    }

    /// Reports whether a tower of `kind` could be placed on `cell` right now.
    pub fn placement_check(
        world: &World,
        kind: TowerKind,
        cell: CellCoord,
    ) -> Result<(), PlacementError> {
        placement_cost(world, kind, cell).map(|_| ())
    }

    pub(super) fn placement_cost(
        world: &World,
        kind: TowerKind,
        cell: CellCoord,
    ) -> Result<TowerStats, PlacementError> {
        let grid = world.config.grid();
        if world.is_over() {
            return Err(PlacementError::SessionOver);
        }
        if !grid.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if grid.is_reserved(cell) {
            return Err(PlacementError::ReservedRegion);
        }
        if world.towers.is_occupied(cell) {
            return Err(PlacementError::Occupied);
        }

        let stats = world.config.towers().stats(kind);
        let available = world.session.currency();
        if available < stats.cost {
            return Err(PlacementError::InsufficientFunds {
                cost: stats.cost,
                available,
            });
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wild_defense_core::PlacementError;

    #[test]
    fn fresh_world_reflects_economy_policy() {
        let world = World::default();
        let session = query::session(&world);

        assert_eq!(session.currency, 200);
        assert_eq!(session.base_health, 100);
        assert_eq!(session.waves_total, 5);
        assert_eq!(session.outcome, SessionOutcome::Running);
        assert_eq!(query::path(&world).len(), 4);
    }

    #[test]
    fn placement_checks_run_in_order() {
        let world = World::default();

        assert_eq!(
            query::placement_check(&world, TowerKind::MeerkatScout, CellCoord::new(15, 0)),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            query::placement_check(&world, TowerKind::MeerkatScout, CellCoord::new(3, 11)),
            Err(PlacementError::ReservedRegion)
        );
        assert_eq!(
            query::placement_check(&world, TowerKind::MeerkatScout, CellCoord::new(3, 3)),
            Ok(())
        );
    }

    #[test]
    fn tower_center_is_offset_by_half_a_cell() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceTower {
                kind: TowerKind::MeerkatScout,
                cell: CellCoord::new(2, 1),
            },
            &mut events,
        );

        let towers = query::tower_view(&world).into_vec();
        assert_eq!(towers.len(), 1);
        assert_eq!(towers[0].center, WorldPoint::new(160.0, 96.0));
    }

    #[test]
    fn start_wave_uses_last_tick_time() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                now: Duration::from_secs(3),
            },
            &mut events,
        );
        apply(&mut world, Command::StartWave, &mut events);
        apply(
            &mut world,
            Command::Tick {
                now: Duration::from_millis(4_999),
            },
            &mut events,
        );

        let spawned = events
            .iter()
            .filter(|event| matches!(event, Event::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 1, "only the entry at 0ms is due 1999ms into the wave");
    }

    #[test]
    fn unknown_tower_ability_is_ignored() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::UseAbility {
                tower: TowerId::new(9),
            },
            &mut events,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn rejected_placement_carries_reason() {
        let mut world = World::default();
        let mut events = Vec::new();
        let cell = CellCoord::new(0, 0);
        for _ in 0..2 {
            apply(
                &mut world,
                Command::PlaceTower {
                    kind: TowerKind::MeerkatScout,
                    cell,
                },
                &mut events,
            );
        }

        assert_eq!(
            events.last(),
            Some(&Event::TowerPlacementRejected {
                kind: TowerKind::MeerkatScout,
                cell,
                reason: PlacementError::Occupied,
            })
        );
    }
}
