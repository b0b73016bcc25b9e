#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wild Defense engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate player input into
//! [`Command`] values, the world executes those commands via its `apply` entry
//! point and broadcasts [`Event`] values describing what happened. Presentation
//! code reads immutable views ([`EnemyView`], [`TowerView`],
//! [`SessionSnapshot`]) and never mutates the simulation directly.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Wild Defense.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Runs one simulation step at the provided session time.
    Tick {
        /// Time elapsed since the session started.
        now: Duration,
    },
    /// Requests that the next wave in the schedule begins.
    StartWave,
    /// Requests placement of a tower on the provided grid cell.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Cell that the tower should occupy.
        cell: CellCoord,
    },
    /// Triggers the special ability of an existing tower.
    UseAbility {
        /// Identifier of the tower whose ability is used.
        tower: TowerId,
    },
    /// Discards all mutable session state and rebuilds it from configuration.
    ResetSession,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that a simulation step ran.
    TimeAdvanced {
        /// Session time at which the step ran.
        now: Duration,
    },
    /// Confirms that a new wave started spawning enemies.
    WaveStarted {
        /// One-based number of the wave.
        wave: u32,
        /// Number of spawns scheduled in the wave.
        spawns: usize,
    },
    /// Reports that a start request arrived while a wave was still running.
    WaveStartIgnored {
        /// One-based number of the wave that is still in progress.
        wave: u32,
    },
    /// Announces that every spawn of a wave was issued and no tracked enemy remains.
    WaveCleared {
        /// One-based number of the cleared wave.
        wave: u32,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier allocated to the enemy.
        enemy: EnemyId,
        /// Kind of the spawned enemy.
        kind: EnemyKind,
        /// Position at which the enemy appeared.
        position: WorldPoint,
    },
    /// Reports that an enemy died and its reward was credited.
    EnemyKilled {
        /// Identifier of the enemy that died.
        enemy: EnemyId,
        /// Kind of the enemy that died.
        kind: EnemyKind,
        /// Currency credited for the kill.
        reward: u32,
    },
    /// Reports that an enemy reached the base and damaged it.
    EnemyLeaked {
        /// Identifier of the enemy that leaked.
        enemy: EnemyId,
        /// Kind of the enemy that leaked.
        kind: EnemyKind,
        /// Base health removed by the leak.
        penalty: i32,
    },
    /// Confirms that a tower was placed.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
        /// Currency debited for the placement.
        cost: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower hit an enemy.
    TowerAttacked {
        /// Tower that fired.
        tower: TowerId,
        /// Enemy that was hit.
        enemy: EnemyId,
        /// Damage dealt by the attack.
        damage: i32,
        /// Enemy health left after the hit; may be negative.
        remaining_health: i32,
    },
    /// Confirms that a tower used its special ability.
    AbilityUsed {
        /// Tower whose ability was used.
        tower: TowerId,
        /// Ability state after use.
        ability: Ability,
    },
    /// Announces a change of the session outcome.
    OutcomeChanged {
        /// Outcome that became active.
        outcome: SessionOutcome,
    },
    /// Confirms that the session was rebuilt from configuration.
    SessionReset,
}

/// Discrete requests delivered by the input collaborator between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerInput {
    /// Selects the tower type used by later placement requests.
    SelectTower {
        /// Tower type to select.
        kind: TowerKind,
    },
    /// Requests placement of the selected tower type on a cell.
    PlaceTower {
        /// Cell chosen by the player.
        cell: CellCoord,
    },
    /// Requests the next wave.
    StartNextWave,
    /// Requests a tower's special ability.
    UseAbility {
        /// Tower chosen by the player.
        tower: TowerId,
    },
    /// Requests a fresh session.
    Restart,
    /// Requests that the application exits.
    Quit,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Continuous position measured in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Straight-line distance to another point.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns the point moved by `distance` units toward `target`.
    ///
    /// The caller guarantees that the two points are distinct.
    #[must_use]
    pub fn step_toward(self, target: WorldPoint, distance: f32) -> WorldPoint {
        let length = self.distance(target);
        let dx = (target.x - self.x) / length;
        let dy = (target.y - self.y) / length;
        WorldPoint::new(self.x + dx * distance, self.y + dy * distance)
    }
}

/// Enemy types known to the stat catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Fast, fragile raider.
    Poacher,
    /// Slow, sturdy logger.
    Deforester,
    /// Quick, hard-hitting intruder.
    #[serde(rename = "invasive")]
    InvasiveSpecies,
    /// Very slow, very tough machine.
    Bulldozer,
}

impl EnemyKind {
    /// Every enemy kind in catalog order.
    pub const ALL: [EnemyKind; 4] = [
        Self::Poacher,
        Self::Deforester,
        Self::InvasiveSpecies,
        Self::Bulldozer,
    ];

    /// Position of the kind inside [`EnemyKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Poacher => 0,
            Self::Deforester => 1,
            Self::InvasiveSpecies => 2,
            Self::Bulldozer => 3,
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Poacher => "Poacher",
            Self::Deforester => "Deforester",
            Self::InvasiveSpecies => "Invasive Species",
            Self::Bulldozer => "Bulldozer",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Base statistics copied into every enemy of a kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Starting and maximum health.
    pub health: i32,
    /// Distance travelled per tick in world units.
    pub speed: f32,
    /// Contact damage carried by the enemy.
    pub damage: i32,
    /// Currency credited when the enemy dies.
    pub reward: u32,
}

impl EnemyStats {
    /// Creates a stat block.
    #[must_use]
    pub const fn new(health: i32, speed: f32, damage: i32, reward: u32) -> Self {
        Self {
            health,
            speed,
            damage,
            reward,
        }
    }
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Fast attack speed, low damage, cheap.
    #[serde(rename = "meerkat")]
    MeerkatScout,
    /// High damage, long range.
    #[serde(rename = "chameleon")]
    ChameleonSniper,
}

impl TowerKind {
    /// Every tower kind in sidebar order.
    pub const ALL: [TowerKind; 2] = [Self::MeerkatScout, Self::ChameleonSniper];

    /// Position of the kind inside [`TowerKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::MeerkatScout => 0,
            Self::ChameleonSniper => 1,
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MeerkatScout => "Meerkat Scout",
            Self::ChameleonSniper => "Chameleon Sniper",
        }
    }

    /// Ability state a freshly placed tower of this kind starts with.
    #[must_use]
    pub const fn initial_ability(self) -> Ability {
        match self {
            Self::MeerkatScout => Ability::Reveal,
            Self::ChameleonSniper => Ability::Camouflage { hidden: true },
        }
    }
}

impl fmt::Display for TowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Preset statistics applied to a tower when it is placed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    /// Health removed from the target per attack.
    pub damage: i32,
    /// Attacks per second.
    pub attack_speed: f32,
    /// Targeting radius in world units, measured from the tower center.
    pub range: f32,
    /// Currency debited on placement.
    pub cost: u32,
}

impl TowerStats {
    /// Creates a stat block.
    #[must_use]
    pub const fn new(damage: i32, attack_speed: f32, range: f32, cost: u32) -> Self {
        Self {
            damage,
            attack_speed,
            range,
            cost,
        }
    }
}

/// Cosmetic special ability carried by a tower. It never affects targeting or damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Scout reveal; has no simulated effect.
    Reveal,
    /// Sniper camouflage that toggles the tower's visibility.
    Camouflage {
        /// Whether the tower is currently hidden.
        hidden: bool,
    },
}

impl Ability {
    /// Returns the ability state after one use.
    #[must_use]
    pub const fn used(self) -> Self {
        match self {
            Self::Reveal => Self::Reveal,
            Self::Camouflage { hidden } => Self::Camouflage { hidden: !hidden },
        }
    }

    /// Reports whether the tower should be drawn as hidden.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Camouflage { hidden: true })
    }
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The session already ended.
    SessionOver,
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell belongs to the region reserved for the interface.
    ReservedRegion,
    /// Another tower already occupies the cell.
    Occupied,
    /// The player cannot afford the tower.
    InsufficientFunds {
        /// Price of the requested tower.
        cost: u32,
        /// Currency available at the time of the request.
        available: u32,
    },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionOver => f.write_str("the session is over"),
            Self::OutOfBounds => f.write_str("cell lies outside the grid"),
            Self::ReservedRegion => f.write_str("cell is reserved for the interface"),
            Self::Occupied => f.write_str("cell already holds a tower"),
            Self::InsufficientFunds { cost, available } => {
                write!(f, "tower costs {cost} but only {available} is available")
            }
        }
    }
}

/// Terminal state of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// The session is still being played.
    #[default]
    Running,
    /// Every wave was cleared.
    Won,
    /// The base ran out of health.
    Lost,
}

impl SessionOutcome {
    /// Reports whether the outcome ends the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Progress of the current wave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// No wave has started yet.
    #[default]
    Idle,
    /// Spawns are being issued or spawned enemies are still alive.
    Active,
    /// The most recent wave was cleared.
    Complete,
}

/// Single scheduled spawn inside a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnEntry {
    kind: EnemyKind,
    delay: Duration,
}

impl SpawnEntry {
    /// Creates a spawn entry issued `delay` after the wave starts.
    #[must_use]
    pub const fn new(kind: EnemyKind, delay: Duration) -> Self {
        Self { kind, delay }
    }

    /// Kind of enemy to spawn.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Offset from the wave start.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

/// Ordered list of spawns. Entries are issued in list order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wave {
    entries: Vec<SpawnEntry>,
}

impl Wave {
    /// Creates a wave from its spawn entries.
    #[must_use]
    pub fn new(entries: Vec<SpawnEntry>) -> Self {
        Self { entries }
    }

    /// Spawn entries in issue order.
    #[must_use]
    pub fn entries(&self) -> &[SpawnEntry] {
        &self.entries
    }

    /// Number of scheduled spawns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the wave schedules no spawns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered sequence of waves played during a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaveSchedule {
    waves: Vec<Wave>,
}

impl WaveSchedule {
    /// Creates a schedule from its waves.
    #[must_use]
    pub fn new(waves: Vec<Wave>) -> Self {
        Self { waves }
    }

    /// Waves in play order.
    #[must_use]
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    /// Retrieves the wave at the zero-based index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Wave> {
        self.waves.get(index)
    }

    /// Number of waves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    /// Reports whether the schedule has no waves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind the enemy was spawned from.
    pub kind: EnemyKind,
    /// Current position.
    pub position: WorldPoint,
    /// Index of the last waypoint reached.
    pub path_index: usize,
    /// Current health; may be zero or negative until death is resolved.
    pub health: i32,
    /// Health at spawn time.
    pub max_health: i32,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Contact damage carried by the enemy.
    pub damage: i32,
    /// Currency credited on death.
    pub reward: u32,
}

impl EnemySnapshot {
    /// Remaining health as a fraction of maximum health, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Read-only snapshot describing every tracked enemy.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemy was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// Center of the tower footprint in world units.
    pub center: WorldPoint,
    /// Upgrade level.
    pub level: u32,
    /// Targeting radius in world units.
    pub range: f32,
    /// Damage per attack.
    pub damage: i32,
    /// Attacks per second.
    pub attack_speed: f32,
    /// Currency paid for the tower.
    pub cost: u32,
    /// Current ability state.
    pub ability: Ability,
}

/// Read-only snapshot describing all placed towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured towers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no tower was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Display-only record of a successful tower attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackEvent {
    /// Center of the tower that fired.
    pub from: WorldPoint,
    /// Position of the enemy when it was hit.
    pub to: WorldPoint,
    /// Session time of the attack.
    pub created_at: Duration,
}

impl AttackEvent {
    /// Reports whether the record outlived `lifetime` at time `now`.
    #[must_use]
    pub fn is_expired(&self, now: Duration, lifetime: Duration) -> bool {
        now.saturating_sub(self.created_at) >= lifetime
    }
}

/// Counters describing the session economy and progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Currency available for placements.
    pub currency: u32,
    /// Remaining base health; may drop below zero on the losing leak.
    pub base_health: i32,
    /// Base health at session start.
    pub max_base_health: i32,
    /// Number of waves started so far.
    pub waves_started: u32,
    /// Number of waves in the schedule.
    pub waves_total: u32,
    /// Progress of the current wave.
    pub wave_phase: WavePhase,
    /// Terminal state of the session.
    pub outcome: SessionOutcome,
}

impl SessionSnapshot {
    /// Remaining base health as a fraction, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn base_health_ratio(&self) -> f32 {
        if self.max_base_health <= 0 {
            return 0.0;
        }
        (self.base_health as f32 / self.max_base_health as f32).clamp(0.0, 1.0)
    }
}

/// Wave readout shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveStatus {
    /// No wave is running and another one can be started.
    AwaitingStart {
        /// One-based number of the next wave.
        next_wave: u32,
    },
    /// A wave is running.
    InProgress {
        /// One-based number of the running wave.
        wave: u32,
        /// Unspawned entries plus enemies still on the path.
        remaining_enemies: usize,
    },
    /// The schedule is exhausted.
    AllComplete,
}

impl fmt::Display for WaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingStart { next_wave } => {
                write!(f, "Wave {next_wave} - Click Start Wave to begin!")
            }
            Self::InProgress {
                wave,
                remaining_enemies,
            } => write!(f, "Wave {wave} - {remaining_enemies} enemies remaining"),
            Self::AllComplete => f.write_str("All waves complete!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::InsufficientFunds {
            cost: 100,
            available: 40,
        });
    }

    #[test]
    fn distance_matches_pythagoras() {
        let origin = WorldPoint::new(0.0, 0.0);
        assert!((origin.distance(WorldPoint::new(3.0, 4.0)) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn step_toward_moves_exact_distance() {
        let moved = WorldPoint::new(0.0, 0.0).step_toward(WorldPoint::new(0.0, 10.0), 2.5);
        assert_eq!(moved, WorldPoint::new(0.0, 2.5));
    }

    #[test]
    fn camouflage_toggles_and_reveal_is_inert() {
        let ability = TowerKind::ChameleonSniper.initial_ability();
        assert!(ability.is_hidden());
        assert!(!ability.used().is_hidden());
        assert_eq!(ability.used().used(), ability);
        assert_eq!(Ability::Reveal.used(), Ability::Reveal);
    }

    #[test]
    fn kind_indices_follow_declaration_order() {
        for (index, kind) in EnemyKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), index);
        }
        for (index, kind) in TowerKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), index);
        }
    }

    #[test]
    fn health_ratio_clamps_negative_health() {
        let snapshot = EnemySnapshot {
            id: EnemyId::new(1),
            kind: EnemyKind::Poacher,
            position: WorldPoint::default(),
            path_index: 0,
            health: -10,
            max_health: 50,
            speed: 2.0,
            damage: 5,
            reward: 10,
        };
        assert_eq!(snapshot.health_ratio(), 0.0);
    }

    #[test]
    fn attack_event_expires_after_lifetime() {
        let event = AttackEvent {
            from: WorldPoint::default(),
            to: WorldPoint::default(),
            created_at: Duration::from_millis(1_000),
        };
        let lifetime = Duration::from_millis(100);
        assert!(!event.is_expired(Duration::from_millis(1_099), lifetime));
        assert!(event.is_expired(Duration::from_millis(1_100), lifetime));
    }

    #[test]
    fn wave_status_renders_hud_text() {
        assert_eq!(
            WaveStatus::InProgress {
                wave: 2,
                remaining_enemies: 3
            }
            .to_string(),
            "Wave 2 - 3 enemies remaining"
        );
        assert_eq!(WaveStatus::AllComplete.to_string(), "All waves complete!");
    }
}
