#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Immutable level configuration for Wild Defense.
//!
//! A [`GameConfig`] bundles everything a session is rebuilt from: the grid the
//! player builds on, the polyline path enemies follow, the enemy and tower stat
//! tables, the wave schedule and the economy policy. Configurations are either
//! the built-in level ([`GameConfig::default`]) or parsed from a TOML level file
//! and validated before use; a constructed value is never mutated afterwards.

mod manifest;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;
use wild_defense_core::{
    CellCoord, EnemyKind, EnemyStats, SpawnEntry, TowerKind, TowerStats, Wave, WaveSchedule,
    WorldPoint,
};

/// Level file format understood by [`GameConfig::from_toml_str`].
pub const SUPPORTED_LEVEL_VERSION: u32 = 1;

/// Errors raised while loading or validating a level configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The level file could not be read.
    #[error("failed to read level file at {}", .path.display())]
    Io {
        /// Location of the level file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The level file is not valid TOML or does not match the level layout.
    #[error("failed to parse level toml contents")]
    Parse(#[from] toml::de::Error),
    /// The level file declares a format version this build does not understand.
    #[error("unsupported level version {found}; expected {expected}")]
    UnsupportedVersion {
        /// Version declared by the file.
        found: u32,
        /// Version supported by this build.
        expected: u32,
    },
    /// The path has fewer than two waypoints.
    #[error("path needs at least two waypoints, found {waypoints}")]
    PathTooShort {
        /// Number of waypoints provided.
        waypoints: usize,
    },
    /// A waypoint has a non-finite coordinate.
    #[error("waypoint {index} has a non-finite coordinate")]
    InvalidWaypoint {
        /// Position of the offending waypoint.
        index: usize,
    },
    /// The grid dimensions cannot host a level.
    #[error("invalid grid: {reason}")]
    InvalidGrid {
        /// Description of the violated constraint.
        reason: &'static str,
    },
    /// An enemy stat block is out of range.
    #[error("invalid stats for {kind}: {reason}")]
    InvalidEnemy {
        /// Enemy kind whose stats are invalid.
        kind: EnemyKind,
        /// Description of the violated constraint.
        reason: &'static str,
    },
    /// A tower stat block is out of range.
    #[error("invalid stats for {kind}: {reason}")]
    InvalidTower {
        /// Tower kind whose stats are invalid.
        kind: TowerKind,
        /// Description of the violated constraint.
        reason: &'static str,
    },
    /// The economy policy is out of range.
    #[error("invalid economy: {reason}")]
    InvalidEconomy {
        /// Description of the violated constraint.
        reason: &'static str,
    },
}

/// Complete, validated description of a level.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    grid: GridConfig,
    path: Vec<WorldPoint>,
    enemies: EnemyCatalog,
    towers: TowerCatalog,
    waves: WaveSchedule,
    economy: EconomyPolicy,
}

impl GameConfig {
    /// Validates the provided parts and assembles them into a configuration.
    pub fn new(
        grid: GridConfig,
        path: Vec<WorldPoint>,
        enemies: EnemyCatalog,
        towers: TowerCatalog,
        waves: WaveSchedule,
        economy: EconomyPolicy,
    ) -> Result<Self, ConfigError> {
        grid.validate()?;
        validate_path(&path)?;
        enemies.validate()?;
        towers.validate()?;
        economy.validate()?;

        Ok(Self {
            grid,
            path,
            enemies,
            towers,
            waves,
            economy,
        })
    }

    /// Parses and validates a TOML level description.
    ///
    /// Sections missing from the document fall back to the built-in level.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        manifest::parse(contents)
    }

    /// Reads, parses and validates the TOML level file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Grid the player builds on.
    #[must_use]
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Waypoints enemies follow, first to last.
    #[must_use]
    pub fn path(&self) -> &[WorldPoint] {
        &self.path
    }

    /// Enemy stat table.
    #[must_use]
    pub fn enemies(&self) -> &EnemyCatalog {
        &self.enemies
    }

    /// Tower stat presets.
    #[must_use]
    pub fn towers(&self) -> &TowerCatalog {
        &self.towers
    }

    /// Waves played during a session.
    #[must_use]
    pub fn waves(&self) -> &WaveSchedule {
        &self.waves
    }

    /// Currency, base health and timing policy.
    #[must_use]
    pub fn economy(&self) -> &EconomyPolicy {
        &self.economy
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            path: default_path(),
            enemies: EnemyCatalog::default(),
            towers: TowerCatalog::default(),
            waves: default_waves(),
            economy: EconomyPolicy::default(),
        }
    }
}

/// Dimensions of the build grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    columns: u32,
    rows: u32,
    cell_length: f32,
    reserved_rows: u32,
}

impl GridConfig {
    /// Creates a grid description. Validation happens in [`GameConfig::new`].
    #[must_use]
    pub const fn new(columns: u32, rows: u32, cell_length: f32, reserved_rows: u32) -> Self {
        Self {
            columns,
            rows,
            cell_length,
            reserved_rows,
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a cell in world units.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }

    /// Number of bottom rows reserved for the interface strip.
    #[must_use]
    pub const fn reserved_rows(&self) -> u32 {
        self.reserved_rows
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the cell lies inside the reserved interface strip.
    #[must_use]
    pub const fn is_reserved(&self, cell: CellCoord) -> bool {
        cell.row() >= self.rows - self.reserved_rows
    }

    /// World position of the cell's top-left corner.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> WorldPoint {
        WorldPoint::new(
            cell.column() as f32 * self.cell_length,
            cell.row() as f32 * self.cell_length,
        )
    }

    /// World position of the cell's center.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> WorldPoint {
        let origin = self.cell_origin(cell);
        let half = self.cell_length / 2.0;
        WorldPoint::new(origin.x() + half, origin.y() + half)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::InvalidGrid {
                reason: "grid needs at least one column and one row",
            });
        }
        if !self.cell_length.is_finite() || self.cell_length <= 0.0 {
            return Err(ConfigError::InvalidGrid {
                reason: "cell length must be positive",
            });
        }
        if self.reserved_rows >= self.rows {
            return Err(ConfigError::InvalidGrid {
                reason: "reserved rows must leave at least one buildable row",
            });
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(15, 12, 64.0, 2)
    }
}

/// Stat table holding one entry for every [`EnemyKind`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyCatalog {
    stats: [EnemyStats; EnemyKind::ALL.len()],
}

impl EnemyCatalog {
    /// Looks up the base stats of a kind.
    #[must_use]
    pub const fn stats(&self, kind: EnemyKind) -> EnemyStats {
        self.stats[kind.index()]
    }

    /// Returns a catalog with the stats of `kind` replaced.
    #[must_use]
    pub fn with(mut self, kind: EnemyKind, stats: EnemyStats) -> Self {
        self.stats[kind.index()] = stats;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for kind in EnemyKind::ALL {
            let stats = self.stats(kind);
            let reason = if stats.health <= 0 {
                Some("health must be positive")
            } else if !stats.speed.is_finite() || stats.speed < 0.0 {
                Some("speed must be a non-negative number")
            } else if stats.damage < 0 {
                Some("damage must not be negative")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidEnemy { kind, reason });
            }
        }
        Ok(())
    }
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self {
            stats: [
                EnemyStats::new(50, 2.0, 5, 10),
                EnemyStats::new(100, 1.0, 10, 15),
                EnemyStats::new(75, 3.0, 15, 20),
                EnemyStats::new(2000, 0.75, 50, 80),
            ],
        }
    }
}

/// Stat presets holding one entry for every [`TowerKind`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerCatalog {
    stats: [TowerStats; TowerKind::ALL.len()],
}

impl TowerCatalog {
    /// Looks up the preset of a kind.
    #[must_use]
    pub const fn stats(&self, kind: TowerKind) -> TowerStats {
        self.stats[kind.index()]
    }

    /// Returns a catalog with the preset of `kind` replaced.
    #[must_use]
    pub fn with(mut self, kind: TowerKind, stats: TowerStats) -> Self {
        self.stats[kind.index()] = stats;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for kind in TowerKind::ALL {
            let stats = self.stats(kind);
            let reason = if !stats.attack_speed.is_finite() || stats.attack_speed <= 0.0 {
                Some("attack speed must be positive")
            } else if !stats.range.is_finite() || stats.range < 0.0 {
                Some("range must be a non-negative number")
            } else if stats.damage < 0 {
                Some("damage must not be negative")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidTower { kind, reason });
            }
        }
        Ok(())
    }
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self {
            stats: [
                TowerStats::new(5, 2.5, 150.0, 75),
                TowerStats::new(30, 3.0, 200.0, 100),
            ],
        }
    }
}

/// Currency, base health and display timing rules of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EconomyPolicy {
    starting_currency: u32,
    base_health: i32,
    leak_penalty: i32,
    attack_effect_lifetime: Duration,
}

impl EconomyPolicy {
    /// Creates an economy policy. Validation happens in [`GameConfig::new`].
    #[must_use]
    pub const fn new(
        starting_currency: u32,
        base_health: i32,
        leak_penalty: i32,
        attack_effect_lifetime: Duration,
    ) -> Self {
        Self {
            starting_currency,
            base_health,
            leak_penalty,
            attack_effect_lifetime,
        }
    }

    /// Currency available when a session starts.
    #[must_use]
    pub const fn starting_currency(&self) -> u32 {
        self.starting_currency
    }

    /// Base health when a session starts.
    #[must_use]
    pub const fn base_health(&self) -> i32 {
        self.base_health
    }

    /// Base health removed for every leaked enemy.
    #[must_use]
    pub const fn leak_penalty(&self) -> i32 {
        self.leak_penalty
    }

    /// How long an attack line stays visible.
    #[must_use]
    pub const fn attack_effect_lifetime(&self) -> Duration {
        self.attack_effect_lifetime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_health <= 0 {
            return Err(ConfigError::InvalidEconomy {
                reason: "base health must be positive",
            });
        }
        if self.leak_penalty < 0 {
            return Err(ConfigError::InvalidEconomy {
                reason: "leak penalty must not be negative",
            });
        }
        Ok(())
    }
}

impl Default for EconomyPolicy {
    fn default() -> Self {
        Self::new(200, 100, 10, Duration::from_millis(100))
    }
}

fn validate_path(path: &[WorldPoint]) -> Result<(), ConfigError> {
    if path.len() < 2 {
        return Err(ConfigError::PathTooShort {
            waypoints: path.len(),
        });
    }
    if let Some(index) = path
        .iter()
        .position(|point| !point.x().is_finite() || !point.y().is_finite())
    {
        return Err(ConfigError::InvalidWaypoint { index });
    }
    Ok(())
}

fn default_path() -> Vec<WorldPoint> {
    vec![
        WorldPoint::new(0.0, 256.0),
        WorldPoint::new(512.0, 256.0),
        WorldPoint::new(512.0, 512.0),
        WorldPoint::new(768.0, 512.0),
    ]
}

fn wave(spawns: &[(EnemyKind, u64)]) -> Wave {
    Wave::new(
        spawns
            .iter()
            .map(|&(kind, delay_ms)| SpawnEntry::new(kind, Duration::from_millis(delay_ms)))
            .collect(),
    )
}

fn default_waves() -> WaveSchedule {
    use EnemyKind::{Deforester, InvasiveSpecies as Invasive, Poacher};

    WaveSchedule::new(vec![
        wave(&[
            (Poacher, 0),
            (Poacher, 2000),
            (Poacher, 4000),
            (Poacher, 6000),
            (Poacher, 8000),
        ]),
        wave(&[
            (Poacher, 0),
            (Deforester, 1000),
            (Poacher, 2000),
            (Deforester, 3000),
            (Poacher, 4000),
            (Deforester, 5000),
        ]),
        wave(&[
            (Poacher, 0),
            (Deforester, 1500),
            (Invasive, 3000),
            (Poacher, 4000),
            (Deforester, 5500),
            (Invasive, 7000),
        ]),
        wave(&[
            (Poacher, 0),
            (Poacher, 1000),
            (Deforester, 2000),
            (Invasive, 2500),
            (Deforester, 3000),
            (Invasive, 3500),
            (Poacher, 4000),
            (Deforester, 4500),
        ]),
        wave(&[
            (Invasive, 0),
            (Deforester, 500),
            (Deforester, 1000),
            (Invasive, 2000),
            (Poacher, 2100),
            (Poacher, 2200),
            (Poacher, 2300),
            (Invasive, 4000),
            (Deforester, 4100),
            (Deforester, 4200),
        ]),
    ])
}
